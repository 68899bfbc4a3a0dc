pub mod app_config;
pub mod config;
pub mod fields;
pub mod profile;
pub mod record;
pub mod values;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use fields::{DbField, FieldName, WebKey};
pub use profile::{load_profile, parse_profile, DbGapPolicy, ReconcileProfile, WeightPolicy};
pub use record::{CatalogId, DbRecord, RawValue, WebAttributes};
pub use values::{
    CanonicalDimensions, CanonicalValue, FieldVerdict, Outcome, ParsedWeight, WeightUnit,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile file {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    ProfileFileParse(#[from] serde_yaml::Error),

    #[error("profile validation failed: {0}")]
    Validation(String),
}
