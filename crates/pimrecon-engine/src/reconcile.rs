//! The reconciliation engine: one [`FieldVerdict`] per tracked field.
//!
//! Per field, in [`FieldName::ALL`] order:
//!
//! 1. No Web value, or one that does not normalize → `Missing`, no Web value
//!    recorded, DB side not consulted.
//! 2. DB side does not normalize → `Missing`, except for the classification
//!    code where [`ReconcileProfile::classification_missing_db`] decides.
//! 3. Otherwise `Match` or `Mismatch` by the field's equality rule.

use pimrecon_core::{
    CanonicalValue, CatalogId, DbField, DbGapPolicy, DbRecord, FieldName, FieldVerdict, Outcome,
    ReconcileProfile, WebAttributes, WebKey,
};
use serde::Serialize;

use crate::compare::{
    canonical_code, canonical_equal, canonical_part_number, classification_from_description,
    db_canonical, web_canonical,
};
use crate::matcher::{pair_records, WebBagIndex};

/// Verdicts for one paired record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub identifier: CatalogId,
    pub verdicts: Vec<FieldVerdict>,
}

/// Counts over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Records that were paired and reconciled.
    pub records: usize,
    /// Records left out for lack of a valid identifier.
    pub skipped: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub missing: usize,
}

impl ReconcileSummary {
    fn tally(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Match => self.matched += 1,
            Outcome::Mismatch => self.mismatched += 1,
            Outcome::Missing => self.missing += 1,
        }
    }
}

/// Result of [`Reconciler::reconcile_all`].
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileRun {
    pub summary: ReconcileSummary,
    pub records: Vec<RecordReport>,
}

/// Runs reconciliation under a fixed [`ReconcileProfile`].
///
/// Holds no per-call state; one instance can serve any number of records,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    profile: ReconcileProfile,
}

impl Reconciler {
    #[must_use]
    pub fn new(profile: ReconcileProfile) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &ReconcileProfile {
        &self.profile
    }

    /// One verdict per tracked field, in declaration order.
    #[must_use]
    pub fn reconcile_record(&self, record: &DbRecord, web: &WebAttributes) -> Vec<FieldVerdict> {
        FieldName::ALL
            .iter()
            .map(|&field| self.reconcile_field(field, record, web))
            .collect()
    }

    /// The verdict for a single tracked field.
    #[must_use]
    pub fn reconcile_field(
        &self,
        field: FieldName,
        record: &DbRecord,
        web: &WebAttributes,
    ) -> FieldVerdict {
        let db_value = record.get(field.db_field()).clone();

        let Some(web_value) = self.web_value(field, web) else {
            tracing::debug!(identifier = %web.identifier(), field = %field, "web value missing");
            return FieldVerdict {
                field,
                db_value,
                web_value: None,
                outcome: Outcome::Missing,
            };
        };

        let db_side = db_canonical(field, &db_value, record.get(DbField::WeightUnit));

        let outcome = match db_side {
            Some(db) if canonical_equal(&db, &web_value, self.profile.weight_policy) => {
                Outcome::Match
            }
            Some(_) => Outcome::Mismatch,
            None => self.db_gap_outcome(field),
        };

        tracing::debug!(
            identifier = %web.identifier(),
            field = %field,
            web = %web_value,
            outcome = %outcome,
            "field reconciled"
        );

        FieldVerdict {
            field,
            db_value,
            web_value: Some(web_value),
            outcome,
        }
    }

    /// Pair `records` with `index` and reconcile every pairing.
    #[must_use]
    pub fn reconcile_all(&self, records: &[DbRecord], index: &WebBagIndex) -> ReconcileRun {
        let matched = pair_records(records, index, &self.profile.identifier_prefix);

        let mut summary = ReconcileSummary {
            skipped: matched.skipped,
            ..ReconcileSummary::default()
        };

        let mut reports = Vec::with_capacity(matched.pairs.len());
        for pair in matched.pairs {
            let verdicts = self.reconcile_record(pair.record, &pair.web);
            for v in &verdicts {
                summary.tally(v.outcome);
            }
            reports.push(RecordReport {
                identifier: pair.identifier,
                verdicts,
            });
        }

        summary.records = reports.len();

        tracing::info!(
            records = summary.records,
            skipped = summary.skipped,
            matched = summary.matched,
            mismatched = summary.mismatched,
            missing = summary.missing,
            "reconciliation complete"
        );

        ReconcileRun {
            summary,
            records: reports,
        }
    }

    /// Canonical Web value for `field`, applying the per-field sourcing rules.
    fn web_value(&self, field: FieldName, web: &WebAttributes) -> Option<CanonicalValue> {
        match field {
            FieldName::PartNumber => web
                .get(WebKey::AlternatePartNumber)
                .and_then(canonical_part_number)
                .or_else(|| {
                    self.profile
                        .part_number_identifier_fallback
                        .then(|| web.identifier().as_str())
                        .and_then(canonical_part_number)
                })
                .map(CanonicalValue::Code),
            FieldName::ClassificationCode => web
                .get(WebKey::MaterialClassification)
                .and_then(classification_from_description)
                .or_else(|| web.get(WebKey::ClassificationCode).and_then(canonical_code))
                .map(CanonicalValue::Code),
            _ => web
                .get(field.web_key())
                .and_then(|raw| web_canonical(field, raw)),
        }
    }

    fn db_gap_outcome(&self, field: FieldName) -> Outcome {
        match (field, self.profile.classification_missing_db) {
            (FieldName::ClassificationCode, DbGapPolicy::Mismatch) => Outcome::Mismatch,
            _ => Outcome::Missing,
        }
    }
}

/// Reconcile one record under the default profile.
#[must_use]
pub fn reconcile_record(record: &DbRecord, web: &WebAttributes) -> Vec<FieldVerdict> {
    Reconciler::default().reconcile_record(record, web)
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
