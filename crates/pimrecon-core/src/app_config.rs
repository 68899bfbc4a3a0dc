use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Location of the reconciliation profile YAML.
    pub profile_path: PathBuf,
    /// `true` when `PIMRECON_PROFILE_PATH` was set explicitly rather than defaulted.
    pub profile_path_explicit: bool,
    /// Pretty-print JSON reports.
    pub output_pretty: bool,
}
