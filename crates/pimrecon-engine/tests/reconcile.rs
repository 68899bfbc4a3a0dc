//! End-to-end reconciliation through the public API, starting from the JSON
//! shapes the I/O layer hands over.

use std::collections::BTreeMap;

use pimrecon_core::{CanonicalValue, DbRecord, FieldName, Outcome, ReconcileProfile};
use pimrecon_engine::{
    compare_weight, normalize_dimensions, normalize_part_number, normalize_weight,
    weight_to_kg, Reconciler, WebBagIndex,
};

const RECORDS_JSON: &str = r#"[
  {
    "Artikelnummer": "ART-0001",
    "Materialkurztext": "Schraube M6",
    "Her.-Artikelnummer": "AB-123/45",
    "Fert./Prüfhinweis": "OHNE/N/N/N/N",
    "Werkstoff": "Stahl verzinkt",
    "Nettogewicht": 0.162,
    "Länge": 40,
    "Breite": 40,
    "Höhe": 42
  },
  {
    "Artikelnummer": "art-0002",
    "Materialkurztext": "Scheibe",
    "Nettogewicht": 1.0,
    "Gewichtseinheit": "kg"
  },
  {
    "Artikelnummer": "INTERN-7",
    "Materialkurztext": "Hausteil"
  }
]"#;

const WEB_JSON: &str = r#"{
  "ART-0001": {
    "Produkttitel": "schraube  m6",
    "Weitere Artikelnummer": "AB12345",
    "Gewicht": "0,162 kg",
    "Abmessung": "4 x 4 x 4,2 cm",
    "Werkstoff": "Stahl verzinkt",
    "Materialklassifizierung": "Schweiß-/Guss-/Klebe-/Schmiedeteil: nicht relevant"
  },
  "ART-0002": {
    "Produkttitel": "Scheibe",
    "Gewicht": "900 g",
    "Werkstoff": "Nicht gefunden"
  }
}"#;

fn load() -> (Vec<DbRecord>, WebBagIndex) {
    let records: Vec<DbRecord> = serde_json::from_str(RECORDS_JSON).unwrap();
    let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(WEB_JSON).unwrap();
    let index = WebBagIndex::from_raw(raw, &ReconcileProfile::default().not_found_sentinel);
    (records, index)
}

#[test]
fn full_record_matches_every_field() {
    let (records, index) = load();
    let run = Reconciler::default().reconcile_all(&records, &index);

    let first = &run.records[0];
    assert_eq!(first.identifier.as_str(), "ART-0001");
    for v in &first.verdicts {
        assert_eq!(v.outcome, Outcome::Match, "field {}", v.field);
    }
}

#[test]
fn weight_mismatch_and_sentinel_missing_in_second_record() {
    let (records, index) = load();
    let run = Reconciler::default().reconcile_all(&records, &index);

    let second = &run.records[1];
    assert_eq!(second.identifier.as_str(), "ART-0002");

    let weight = second
        .verdicts
        .iter()
        .find(|v| v.field == FieldName::NetWeight)
        .unwrap();
    assert_eq!(weight.outcome, Outcome::Mismatch);
    assert_eq!(weight.web_value, Some(CanonicalValue::WeightKg(0.9)));

    let material = second
        .verdicts
        .iter()
        .find(|v| v.field == FieldName::Material)
        .unwrap();
    assert_eq!(material.outcome, Outcome::Missing);
    assert!(material.web_value.is_none());
}

#[test]
fn records_without_prefixed_identifier_are_skipped() {
    let (records, index) = load();
    let run = Reconciler::default().reconcile_all(&records, &index);
    assert_eq!(run.summary.records, 2);
    assert_eq!(run.summary.skipped, 1);
    assert_eq!(run.records.len(), 2);
}

#[test]
fn summary_counts_every_verdict() {
    let (records, index) = load();
    let run = Reconciler::default().reconcile_all(&records, &index);
    let s = run.summary;
    assert_eq!(s.matched + s.mismatched + s.missing, 2 * FieldName::ALL.len());
}

#[test]
fn run_serializes_to_report_json() {
    let (records, index) = load();
    let run = Reconciler::default().reconcile_all(&records, &index);
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["summary"]["skipped"], 1);
    assert_eq!(json["records"][0]["identifier"], "ART-0001");
    assert_eq!(json["records"][0]["verdicts"][0]["field"], "Materialkurztext");
    assert_eq!(json["records"][0]["verdicts"][0]["outcome"], "match");
}

#[test]
fn documented_normalizer_examples_hold() {
    assert_eq!(weight_to_kg(Some(500.0), pimrecon_core::WeightUnit::Gram), Some(0.5));
    let w = normalize_weight("0,162 kg");
    assert_eq!(w.value, Some(0.162));
    assert_eq!(w.unit.as_str(), "kg");

    let d = normalize_dimensions("3x2x1 cm");
    assert_eq!((d.length, d.width, d.height), (Some(30), Some(20), Some(10)));

    let once = normalize_part_number("AB-123/45");
    assert_eq!(normalize_part_number(&once), once);

    assert_eq!(
        compare_weight(
            &1.0.into(),
            &pimrecon_core::RawValue::Empty,
            "900 g",
            pimrecon_core::WeightPolicy::Exact
        ),
        Some(false)
    );
}
