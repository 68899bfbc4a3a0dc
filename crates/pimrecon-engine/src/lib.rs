//! Normalization, comparison and reconciliation of product master data
//! against scraped vendor catalog values.
//!
//! Everything here is synchronous and stateless; callers are free to fan
//! records out across threads.

pub mod compare;
pub mod matcher;
pub mod normalize;
mod parse_helpers;
pub mod reconcile;

pub use compare::{
    compare_classification, compare_dimension, compare_part_number, compare_text, compare_weight,
};
pub use matcher::{pair_records, MatchOutput, Pairing, WebBagIndex};
pub use normalize::{
    map_material_classification, normalize_classification_code, normalize_dimensions,
    normalize_number, normalize_part_number, normalize_weight, weight_to_kg, NO_PROCESS_CODE,
};
pub use reconcile::{
    reconcile_record, ReconcileRun, ReconcileSummary, Reconciler, RecordReport,
};
