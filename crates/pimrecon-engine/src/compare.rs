//! Field comparators and the canonicalization each side goes through first.
//!
//! Comparators are tri-state: `Some(true)` / `Some(false)` when both sides
//! reduce to a comparable canonical value, `None` when either side does not.
//! The reconciliation engine uses the same canonicalizers so a comparator and
//! the engine can never disagree on a verdict.

use pimrecon_core::{CanonicalValue, FieldName, RawValue, WeightPolicy, WeightUnit};

use crate::normalize::{
    map_material_classification, normalize_classification_code, normalize_dimensions,
    normalize_number, normalize_part_number, normalize_weight, weight_to_kg,
};
use crate::parse_helpers::collapse_whitespace;

/// Absolute kilogram difference below which two weights are equal.
pub const WEIGHT_EPSILON_KG: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Canonicalizers
// ---------------------------------------------------------------------------

/// Trimmed, lower-cased, whitespace-collapsed text; `None` when blank.
#[must_use]
pub fn canonical_text(raw: &str) -> Option<String> {
    Some(collapse_whitespace(raw)).filter(|s| !s.is_empty())
}

/// Canonical part number; `None` when nothing survives normalization.
#[must_use]
pub fn canonical_part_number(raw: &str) -> Option<String> {
    Some(normalize_part_number(raw)).filter(|s| !s.is_empty())
}

/// Canonical classification code as stored in the DB; `None` when blank.
#[must_use]
pub fn canonical_code(raw: &str) -> Option<String> {
    Some(normalize_classification_code(raw)).filter(|s| !s.is_empty())
}

/// Catalog code derived from a free-text classification description; `None`
/// when the description does not map to any code.
#[must_use]
pub fn classification_from_description(description: &str) -> Option<String> {
    canonical_code(&map_material_classification(description))
}

/// Weight in kilograms from free text. A bare number is taken as kilograms.
#[must_use]
pub fn web_weight_kg(raw: &str) -> Option<f64> {
    let parsed = normalize_weight(raw);
    weight_to_kg(parsed.value, parsed.unit)
}

/// Weight in kilograms from a DB cell plus its optional unit column.
///
/// A unit written into the cell itself wins over the unit column; with
/// neither, the value is taken as kilograms.
#[must_use]
pub fn db_weight_kg(cell: &RawValue, unit_column: &RawValue) -> Option<f64> {
    let column_unit = unit_column
        .as_text()
        .map_or(WeightUnit::Unspecified, |u| normalize_weight(&u).unit);

    match cell {
        RawValue::Number(n) => weight_to_kg(Some(*n), column_unit),
        RawValue::Text(_) => {
            let text = cell.as_text()?;
            let parsed = normalize_weight(&text);
            let unit = if parsed.unit == WeightUnit::Unspecified {
                column_unit
            } else {
                parsed.unit
            };
            weight_to_kg(parsed.value, unit)
        }
        RawValue::Empty => None,
    }
}

/// A DB dimension cell (already millimetres) rounded to whole millimetres.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn db_millimetres(cell: &RawValue) -> Option<i64> {
    let value = match cell {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(_) => cell.as_text().and_then(|t| normalize_number(&t)),
        RawValue::Empty => None,
    }?;
    value.is_finite().then(|| value.round() as i64)
}

/// The axis of a Web dimension string that corresponds to `field`.
#[must_use]
pub fn web_millimetres(field: FieldName, raw: &str) -> Option<i64> {
    normalize_dimensions(raw).axis(field)
}

/// Canonical DB-side value of a tracked field, read from its own cell (and,
/// for weight, the unit column).
#[must_use]
pub fn db_canonical(
    field: FieldName,
    cell: &RawValue,
    unit_column: &RawValue,
) -> Option<CanonicalValue> {
    match field {
        FieldName::ShortText | FieldName::Material => {
            canonical_text(&cell.as_text()?).map(CanonicalValue::Text)
        }
        FieldName::PartNumber => canonical_part_number(&cell.as_text()?).map(CanonicalValue::Code),
        FieldName::ClassificationCode => canonical_code(&cell.as_text()?).map(CanonicalValue::Code),
        FieldName::NetWeight => db_weight_kg(cell, unit_column).map(CanonicalValue::WeightKg),
        FieldName::Length | FieldName::Width | FieldName::Height => {
            db_millimetres(cell).map(CanonicalValue::Millimetres)
        }
    }
}

/// Canonical Web-side value of a tracked field from its raw scraped string.
///
/// For the classification field `raw` is the free-text description.
#[must_use]
pub fn web_canonical(field: FieldName, raw: &str) -> Option<CanonicalValue> {
    match field {
        FieldName::ShortText | FieldName::Material => canonical_text(raw).map(CanonicalValue::Text),
        FieldName::PartNumber => canonical_part_number(raw).map(CanonicalValue::Code),
        FieldName::ClassificationCode => {
            classification_from_description(raw).map(CanonicalValue::Code)
        }
        FieldName::NetWeight => web_weight_kg(raw).map(CanonicalValue::WeightKg),
        FieldName::Length | FieldName::Width | FieldName::Height => {
            web_millimetres(field, raw).map(CanonicalValue::Millimetres)
        }
    }
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

/// Weight equality under `policy`.
#[must_use]
pub fn weights_equal(db_kg: f64, web_kg: f64, policy: WeightPolicy) -> bool {
    let diff = (db_kg - web_kg).abs();
    match policy {
        WeightPolicy::Exact => diff < WEIGHT_EPSILON_KG,
        WeightPolicy::Percent { tolerance } => {
            if db_kg.abs() < WEIGHT_EPSILON_KG {
                diff < WEIGHT_EPSILON_KG
            } else {
                diff <= db_kg.abs() * tolerance / 100.0
            }
        }
    }
}

/// Equality of two canonical values of the same field.
///
/// Values of different kinds are never equal.
#[must_use]
pub fn canonical_equal(db: &CanonicalValue, web: &CanonicalValue, policy: WeightPolicy) -> bool {
    match (db, web) {
        (CanonicalValue::Text(a), CanonicalValue::Text(b))
        | (CanonicalValue::Code(a), CanonicalValue::Code(b)) => a == b,
        (CanonicalValue::WeightKg(a), CanonicalValue::WeightKg(b)) => weights_equal(*a, *b, policy),
        (CanonicalValue::Millimetres(a), CanonicalValue::Millimetres(b)) => a == b,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

fn compare_with(
    field: FieldName,
    db: &RawValue,
    unit_column: &RawValue,
    web: &str,
    policy: WeightPolicy,
) -> Option<bool> {
    let web = web_canonical(field, web)?;
    let db = db_canonical(field, db, unit_column)?;
    Some(canonical_equal(&db, &web, policy))
}

/// Short text or material text: case- and whitespace-insensitive equality.
#[must_use]
pub fn compare_text(db: &RawValue, web: &str) -> Option<bool> {
    compare_with(FieldName::ShortText, db, &RawValue::Empty, web, WeightPolicy::Exact)
}

/// Part numbers, equal iff their canonical forms are equal.
#[must_use]
pub fn compare_part_number(db: &RawValue, web: &str) -> Option<bool> {
    compare_with(FieldName::PartNumber, db, &RawValue::Empty, web, WeightPolicy::Exact)
}

/// A stored classification code against a free-text classification
/// description. `None` when the description maps to no code.
#[must_use]
pub fn compare_classification(db_code: &RawValue, web_description: &str) -> Option<bool> {
    compare_with(
        FieldName::ClassificationCode,
        db_code,
        &RawValue::Empty,
        web_description,
        WeightPolicy::Exact,
    )
}

/// DB weight (with optional unit column) against a Web weight string.
#[must_use]
pub fn compare_weight(
    db: &RawValue,
    db_unit: &RawValue,
    web: &str,
    policy: WeightPolicy,
) -> Option<bool> {
    compare_with(FieldName::NetWeight, db, db_unit, web, policy)
}

/// One dimension axis: DB millimetres against the matching axis of a Web
/// dimension string. `field` must be length, width or height.
#[must_use]
pub fn compare_dimension(field: FieldName, db: &RawValue, web: &str) -> Option<bool> {
    match field {
        FieldName::Length | FieldName::Width | FieldName::Height => {
            compare_with(field, db, &RawValue::Empty, web, WeightPolicy::Exact)
        }
        _ => None,
    }
}
