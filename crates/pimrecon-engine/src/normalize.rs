//! Value normalizers: raw, locale-formatted text to canonical values.
//!
//! Every function here is total. Unparseable input yields `None`, an empty
//! string, or an all-`None` [`CanonicalDimensions`]; nothing panics or errors.
//! Comma is accepted as a decimal mark throughout.

use std::sync::LazyLock;

use pimrecon_core::{CanonicalDimensions, ParsedWeight, WeightUnit};
use regex::Regex;

use crate::parse_helpers::{decimal_tokens, first_decimal, has_unit_token};

/// Catalog code for parts not subject to welding, casting, bonding or forging.
pub const NO_PROCESS_CODE: &str = "OHNE/N/N/N/N";

/// Parses the first decimal number out of arbitrary text.
///
/// Whitespace is removed and `,` becomes `.` before scanning, so `"1 234,5"`
/// reads as `1234.5`.
#[must_use]
pub fn normalize_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    first_decimal(&cleaned)
}

/// Splits a weight string into its leading number and unit.
///
/// Unit detection runs in priority order `mg`, `g` (only when no `kg` is
/// present), `kg`, `t`; a unit only counts when no letter touches it.
/// Without a unit token the result carries [`WeightUnit::Unspecified`].
///
/// ```
/// use pimrecon_core::WeightUnit;
/// use pimrecon_engine::normalize_weight;
///
/// let w = normalize_weight("0,162 kg");
/// assert_eq!(w.value, Some(0.162));
/// assert_eq!(w.unit, WeightUnit::Kilogram);
/// ```
#[must_use]
pub fn normalize_weight(raw: &str) -> ParsedWeight {
    let lower = raw.to_lowercase().replace(',', ".");
    let value = first_decimal(&lower);

    let unit = if has_unit_token(&lower, "mg") {
        WeightUnit::Milligram
    } else if !lower.contains("kg") && has_unit_token(&lower, "g") {
        WeightUnit::Gram
    } else if has_unit_token(&lower, "kg") {
        WeightUnit::Kilogram
    } else if has_unit_token(&lower, "t") {
        WeightUnit::Tonne
    } else {
        WeightUnit::Unspecified
    };

    ParsedWeight { value, unit }
}

/// Converts a weight to kilograms. `None` in, `None` out.
#[must_use]
pub fn weight_to_kg(value: Option<f64>, unit: WeightUnit) -> Option<f64> {
    value.map(|v| unit.to_kg(v))
}

/// Parses a dimension string such as `"40 x 40 x 42 mm"` or `"Ø20/30"`.
///
/// Two numbers describe a cylinder (diameter → width, then height; no
/// length). Three numbers are length × width × height. Any other count gives
/// all-`None`. A `cm` or `m` unit scales to millimetres; `mm` or no unit is
/// taken as millimetres. Results are rounded to whole millimetres.
#[must_use]
pub fn normalize_dimensions(raw: &str) -> CanonicalDimensions {
    let lowered = raw.to_lowercase().replace([',', ';'], ".");
    let compact: String = lowered
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if matches!(c, '×' | '*' | '/') { 'x' } else { c })
        .collect();

    let scale = dimension_scale(&compact);
    let scaled = |v: f64| -> Option<i64> { Some(round_mm(v * scale)) };

    match decimal_tokens(&compact).as_slice() {
        [diameter, height] => CanonicalDimensions {
            length: None,
            width: scaled(*diameter),
            height: scaled(*height),
        },
        [length, width, height] => CanonicalDimensions {
            length: scaled(*length),
            width: scaled(*width),
            height: scaled(*height),
        },
        _ => CanonicalDimensions::default(),
    }
}

/// Millimetre multiplier for the unit named in a compacted dimension string.
fn dimension_scale(compact: &str) -> f64 {
    // The `x` separator is itself a letter; blank it out so "3cmx2cm" still
    // sees a free-standing "cm".
    let probe = compact.replace('x', " ");
    if has_unit_token(&probe, "cm") {
        10.0
    } else if has_unit_token(&probe, "mm") {
        1.0
    } else if has_unit_token(&probe, "m") {
        1000.0
    } else {
        1.0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_mm(v: f64) -> i64 {
    v.round() as i64
}

/// Canonical part number: upper-case with whitespace, `-`, `_` and `/` removed.
#[must_use]
pub fn normalize_part_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '/'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Canonical classification code: upper-case with all whitespace removed.
#[must_use]
pub fn normalize_classification_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

static NEGATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:nicht|kein|keine|keinen|keiner|ohne|not|no|none|non)\b")
        .expect("valid negation regex")
});

/// Stems for welding, casting, bonding/gluing and forging, German and English.
const PROCESS_MARKERS: &[&str] = &[
    "schweiß", "schweiss", "weld", "guss", "gieß", "giess", "cast", "kleb", "bond", "glue",
    "gluing", "schmied", "forg",
];

const RELEVANCE_MARKER: &str = "relevan";

/// Maps a free-text material classification to a catalog code.
///
/// A description that negates relevance of at least one manufacturing process
/// (e.g. `"Schweiß-/Guss-/Klebe-/Schmiedeteil: nicht relevant"`) maps to
/// [`NO_PROCESS_CODE`]. Anything else maps to the empty string. How many
/// process markers appear does not matter.
#[must_use]
pub fn map_material_classification(description: &str) -> String {
    let lower = description.to_lowercase();

    let negated = NEGATION_RE.is_match(&lower);
    let has_process = PROCESS_MARKERS.iter().any(|m| lower.contains(m));
    let relevant = lower.contains(RELEVANCE_MARKER);

    if negated && has_process && relevant {
        NO_PROCESS_CODE.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
