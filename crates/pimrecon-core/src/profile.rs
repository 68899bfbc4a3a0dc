use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// How two kilogram weights are judged equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum WeightPolicy {
    /// Equal iff the absolute difference is below 1e-9 kg.
    #[default]
    Exact,
    /// Equal iff the difference is within `tolerance` percent of the DB value.
    Percent { tolerance: f64 },
}

/// Verdict for a field whose Web value is present but whose DB value is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbGapPolicy {
    Missing,
    Mismatch,
}

/// Tunables for a reconciliation run, loaded from `config/reconcile.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileProfile {
    /// Three-character catalog prefix every business identifier must carry.
    pub identifier_prefix: String,
    /// String the scraper writes when an attribute was not found.
    pub not_found_sentinel: String,
    pub weight_policy: WeightPolicy,
    /// Applied to the classification-code field only; every other field
    /// reports a DB gap as missing.
    pub classification_missing_db: DbGapPolicy,
    /// Compare the DB part number against the catalog identifier when the
    /// catalog lists no separate part number.
    pub part_number_identifier_fallback: bool,
}

impl Default for ReconcileProfile {
    fn default() -> Self {
        Self {
            identifier_prefix: "ART".to_string(),
            not_found_sentinel: "Nicht gefunden".to_string(),
            weight_policy: WeightPolicy::Exact,
            classification_missing_db: DbGapPolicy::Mismatch,
            part_number_identifier_fallback: true,
        }
    }
}

/// Load and validate a reconciliation profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<ReconcileProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_profile(&content)
}

/// Parse and validate a profile from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_profile(content: &str) -> Result<ReconcileProfile, ConfigError> {
    let profile: ReconcileProfile = serde_yaml::from_str(content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

fn validate_profile(profile: &ReconcileProfile) -> Result<(), ConfigError> {
    let prefix = &profile.identifier_prefix;
    if prefix.chars().count() != 3 || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "identifier_prefix '{prefix}' must be exactly 3 ASCII letters or digits"
        )));
    }

    if profile.not_found_sentinel.trim().is_empty() {
        return Err(ConfigError::Validation(
            "not_found_sentinel must be non-empty".to_string(),
        ));
    }

    if let WeightPolicy::Percent { tolerance } = profile.weight_policy {
        if !(0.0..=100.0).contains(&tolerance) {
            return Err(ConfigError::Validation(format!(
                "weight_policy tolerance {tolerance} must be between 0 and 100 percent"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let profile = parse_profile("{}").unwrap();
        assert_eq!(profile, ReconcileProfile::default());
        assert_eq!(profile.weight_policy, WeightPolicy::Exact);
        assert_eq!(profile.classification_missing_db, DbGapPolicy::Mismatch);
    }

    #[test]
    fn percent_weight_policy_parses() {
        let yaml = "weight_policy:\n  mode: percent\n  tolerance: 2.5\n";
        let profile = parse_profile(yaml).unwrap();
        assert_eq!(
            profile.weight_policy,
            WeightPolicy::Percent { tolerance: 2.5 }
        );
    }

    #[test]
    fn full_profile_parses() {
        let yaml = r"
identifier_prefix: MTL
not_found_sentinel: n/a
weight_policy:
  mode: exact
classification_missing_db: missing
part_number_identifier_fallback: false
";
        let profile = parse_profile(yaml).unwrap();
        assert_eq!(profile.identifier_prefix, "MTL");
        assert_eq!(profile.not_found_sentinel, "n/a");
        assert_eq!(profile.classification_missing_db, DbGapPolicy::Missing);
        assert!(!profile.part_number_identifier_fallback);
    }

    #[test]
    fn rejects_prefix_of_wrong_length() {
        let err = parse_profile("identifier_prefix: ARTI\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("ARTI")));
    }

    #[test]
    fn rejects_blank_sentinel() {
        let err = parse_profile("not_found_sentinel: '  '\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("not_found_sentinel")));
    }

    #[test]
    fn rejects_out_of_range_tolerance() {
        let yaml = "weight_policy:\n  mode: percent\n  tolerance: 150\n";
        let err = parse_profile(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("tolerance")));
    }

    #[test]
    fn rejects_unknown_weight_mode() {
        let yaml = "weight_policy:\n  mode: fuzzy\n";
        let err = parse_profile(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileFileParse(_)));
    }

    #[test]
    fn load_profile_reports_missing_file() {
        let err = load_profile(Path::new("/nonexistent/pimrecon/reconcile.yaml")).unwrap_err();
        assert!(
            matches!(err, ConfigError::ProfileFileIo { ref path, .. } if path.contains("reconcile.yaml"))
        );
    }
}
