//! `reconcile` command: load inputs, run the engine, write the JSON report.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use pimrecon_core::{load_profile, AppConfig, DbRecord, ReconcileProfile};
use pimrecon_engine::{ReconcileRun, Reconciler, WebBagIndex};
use serde::Serialize;

/// Raw scraped data as written by the retrieval layer: identifier → label → value.
type RawWebData = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    profile: &'a ReconcileProfile,
    #[serde(flatten)]
    run: &'a ReconcileRun,
}

/// Run a full reconciliation and emit the report.
///
/// # Errors
///
/// Returns an error if the profile or either input file cannot be read or
/// decoded, or the report cannot be written. Malformed individual values are
/// never errors; they surface as `missing` verdicts.
pub(crate) fn run_reconcile(
    config: &AppConfig,
    records_path: &Path,
    web_path: &Path,
    profile_override: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let profile = resolve_profile(config, profile_override)?;

    let records = read_records(records_path)?;
    let index = read_web_index(web_path, &profile.not_found_sentinel)?;
    tracing::info!(
        records = records.len(),
        catalog_entries = index.len(),
        prefix = %profile.identifier_prefix,
        "inputs loaded"
    );

    let reconciler = Reconciler::new(profile);
    let run = reconciler.reconcile_all(&records, &index);

    let report = Report {
        generated_at: Utc::now(),
        profile: reconciler.profile(),
        run: &run,
    };
    let body = if config.output_pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{body}"),
    }

    Ok(())
}

/// Pick the profile: CLI flag, then configured path, then built-in defaults
/// when the default path simply does not exist.
fn resolve_profile(
    config: &AppConfig,
    profile_override: Option<&Path>,
) -> anyhow::Result<ReconcileProfile> {
    if let Some(path) = profile_override {
        return load_profile(path)
            .with_context(|| format!("failed to load profile {}", path.display()));
    }

    if config.profile_path_explicit || config.profile_path.exists() {
        return load_profile(&config.profile_path)
            .with_context(|| format!("failed to load profile {}", config.profile_path.display()));
    }

    tracing::warn!(
        path = %config.profile_path.display(),
        "profile file not found, using built-in defaults"
    );
    Ok(ReconcileProfile::default())
}

fn read_records(path: &Path) -> anyhow::Result<Vec<DbRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to decode records from {}", path.display()))
}

fn read_web_index(path: &Path, sentinel: &str) -> anyhow::Result<WebBagIndex> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog data from {}", path.display()))?;
    let raw: RawWebData = serde_json::from_str(&content)
        .with_context(|| format!("failed to decode catalog data from {}", path.display()))?;
    Ok(build_index(raw, sentinel))
}

/// Scraped values are usually strings; numbers are accepted and stringified,
/// anything else is treated as absent.
fn build_index(raw: RawWebData, sentinel: &str) -> WebBagIndex {
    let bags = raw.into_iter().map(|(identifier, attributes)| {
        let attributes: Vec<(String, String)> = attributes
            .into_iter()
            .filter_map(|(label, value)| match value {
                serde_json::Value::String(s) => Some((label, s)),
                serde_json::Value::Number(n) => Some((label, n.to_string())),
                _ => None,
            })
            .collect();
        (identifier, attributes)
    });
    WebBagIndex::from_raw(bags, sentinel)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pimrecon_core::{CatalogId, Environment, WebKey};

    use super::*;

    fn config(profile_path: &str, explicit: bool) -> AppConfig {
        AppConfig {
            env: Environment::Test,
            log_level: "info".to_string(),
            profile_path: PathBuf::from(profile_path),
            profile_path_explicit: explicit,
            output_pretty: false,
        }
    }

    #[test]
    fn build_index_stringifies_numbers_and_drops_nulls() {
        let raw: RawWebData = serde_json::from_str(
            r#"{"ART1": {"Gewicht": 0.5, "Werkstoff": null, "Produkttitel": "Bolzen"}}"#,
        )
        .unwrap();
        let index = build_index(raw, "Nicht gefunden");
        let bag = index.get(&CatalogId::new("ART1")).unwrap();
        assert_eq!(bag.get(WebKey::Weight), Some("0.5"));
        assert_eq!(bag.get(WebKey::Material), None);
        assert_eq!(bag.get(WebKey::ProductTitle), Some("Bolzen"));
    }

    #[test]
    fn resolve_profile_defaults_when_default_path_absent() {
        let cfg = config("/nonexistent/pimrecon/reconcile.yaml", false);
        let profile = resolve_profile(&cfg, None).unwrap();
        assert_eq!(profile, ReconcileProfile::default());
    }

    #[test]
    fn resolve_profile_errors_when_explicit_path_absent() {
        let cfg = config("/nonexistent/pimrecon/reconcile.yaml", true);
        assert!(resolve_profile(&cfg, None).is_err());
    }

    #[test]
    fn resolve_profile_errors_when_override_absent() {
        let cfg = config("/nonexistent/pimrecon/reconcile.yaml", false);
        let err = resolve_profile(&cfg, Some(Path::new("/nonexistent/override.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("override.yaml"));
    }
}
