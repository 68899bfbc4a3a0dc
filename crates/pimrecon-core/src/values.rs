use serde::{Deserialize, Serialize};

use crate::fields::FieldName;
use crate::record::RawValue;

/// Weight unit recognised in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Milligram,
    Gram,
    Kilogram,
    Tonne,
    /// No unit token found; callers decide the default.
    Unspecified,
}

impl WeightUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Milligram => "mg",
            WeightUnit::Gram => "g",
            WeightUnit::Kilogram => "kg",
            WeightUnit::Tonne => "t",
            WeightUnit::Unspecified => "",
        }
    }

    /// Resolve a unit symbol. Unknown symbols map to [`WeightUnit::Unspecified`].
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_lowercase().as_str() {
            "mg" => WeightUnit::Milligram,
            "g" => WeightUnit::Gram,
            "kg" => WeightUnit::Kilogram,
            "t" => WeightUnit::Tonne,
            _ => WeightUnit::Unspecified,
        }
    }

    /// Convert `value` in this unit to kilograms. Unspecified is taken as kg.
    ///
    /// Sub-kilogram units divide rather than multiply so that e.g. 162 mg
    /// lands on the same `f64` as the literal `0.000162`.
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Milligram => value / 1_000_000.0,
            WeightUnit::Gram => value / 1000.0,
            WeightUnit::Kilogram | WeightUnit::Unspecified => value,
            WeightUnit::Tonne => value * 1000.0,
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weight as read from text: the leading number and whatever unit was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParsedWeight {
    pub value: Option<f64>,
    pub unit: WeightUnit,
}

/// Physical dimensions in whole millimetres.
///
/// Cylindrical items carry no length: width is the diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CanonicalDimensions {
    pub length: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl CanonicalDimensions {
    /// The axis matching a dimension field; `None` for non-dimension fields.
    #[must_use]
    pub fn axis(&self, field: FieldName) -> Option<i64> {
        match field {
            FieldName::Length => self.length,
            FieldName::Width => self.width,
            FieldName::Height => self.height,
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.width.is_none() && self.height.is_none()
    }
}

/// A normalized, comparable field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    /// Trimmed, lower-cased, whitespace-collapsed text.
    Text(String),
    /// Part number or classification code in canonical upper-case form.
    Code(String),
    WeightKg(f64),
    Millimetres(i64),
}

impl std::fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonicalValue::Text(s) | CanonicalValue::Code(s) => f.write_str(s),
            CanonicalValue::WeightKg(kg) => write!(f, "{kg} kg"),
            CanonicalValue::Millimetres(mm) => write!(f, "{mm} mm"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Match,
    Mismatch,
    Missing,
}

impl Outcome {
    /// Cell fill (RGB hex) the rendering layer uses for this outcome.
    #[must_use]
    pub fn highlight(self) -> &'static str {
        match self {
            Outcome::Match => "C6EFCE",
            Outcome::Mismatch => "FFC7CE",
            Outcome::Missing => "F8CBAD",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Match => write!(f, "match"),
            Outcome::Mismatch => write!(f, "mismatch"),
            Outcome::Missing => write!(f, "missing"),
        }
    }
}

/// The outcome of reconciling one tracked field of one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldVerdict {
    pub field: FieldName,
    pub db_value: RawValue,
    /// Canonical Web value; `None` when the Web side was absent or unparseable.
    pub web_value: Option<CanonicalValue>,
    pub outcome: Outcome,
}
