//! Record-shaped inputs: spreadsheet rows, scraped attribute bags, and the
//! business identifier pairing them.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fields::{DbField, WebKey};

/// A spreadsheet cell as handed over by the I/O layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

static EMPTY: RawValue = RawValue::Empty;

impl RawValue {
    /// Cell contents as text, or `None` for empty and whitespace-only cells.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Text(s) if s.trim().is_empty() => None,
            RawValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            RawValue::Number(n) => Some(Cow::Owned(n.to_string())),
            RawValue::Empty => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_owned())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// Booleans become their text form; arrays and objects carry nothing a
/// tracked field can use and read as empty.
impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => RawValue::Text(s),
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Empty, RawValue::Number),
            serde_json::Value::Bool(b) => RawValue::Text(b.to_string()),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => RawValue::Empty,
        }
    }
}

/// One spreadsheet row keyed by [`DbField`]. Unknown column headers are
/// dropped before their cells are looked at, so any JSON value may sit there.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Map<String, serde_json::Value>")]
pub struct DbRecord {
    values: HashMap<DbField, RawValue>,
}

impl DbRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for callers assembling rows by hand.
    #[must_use]
    pub fn with(mut self, field: DbField, value: impl Into<RawValue>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn insert(&mut self, field: DbField, value: RawValue) {
        self.values.insert(field, value);
    }

    /// The cell for `field`, or [`RawValue::Empty`] when the column is absent.
    #[must_use]
    pub fn get(&self, field: DbField) -> &RawValue {
        self.values.get(&field).unwrap_or(&EMPTY)
    }
}

/// Headers are matched case-insensitively. When two headers resolve to the
/// same field the first in key order is kept.
impl From<serde_json::Map<String, serde_json::Value>> for DbRecord {
    fn from(cells: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut values = HashMap::new();
        for (label, value) in cells {
            let Some(field) = DbField::from_label(&label) else {
                continue;
            };
            match values.entry(field) {
                Entry::Occupied(_) => {
                    tracing::warn!(
                        header = %label,
                        field = field.label(),
                        "duplicate column header, keeping first"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(RawValue::from(value));
                }
            }
        }
        Self { values }
    }
}

/// Vendor catalog product code, trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CatalogId(String);

impl CatalogId {
    /// Normalize without checking the prefix.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Normalize and require the case-insensitive `prefix` followed by at
    /// least one further character.
    #[must_use]
    pub fn parse_with_prefix(raw: &str, prefix: &str) -> Option<Self> {
        let id = Self::new(raw);
        let prefix = prefix.trim().to_uppercase();
        if prefix.is_empty() || id.0.len() <= prefix.len() || !id.0.starts_with(&prefix) {
            return None;
        }
        Some(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scraped catalog attributes for one product.
///
/// Absence is only ever represented by a missing key: sentinel and blank
/// values are discarded on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct WebAttributes {
    identifier: CatalogId,
    values: HashMap<WebKey, String>,
}

impl WebAttributes {
    #[must_use]
    pub fn empty(identifier: CatalogId) -> Self {
        Self {
            identifier,
            values: HashMap::new(),
        }
    }

    /// Build from a raw label → string bag.
    ///
    /// Entries whose trimmed value equals `sentinel`, blank entries and
    /// unknown labels are dropped.
    #[must_use]
    pub fn from_raw<I, K, V>(identifier: CatalogId, raw: I, sentinel: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut bag = Self::empty(identifier);
        for (label, value) in raw {
            let Some(key) = WebKey::from_label(label.as_ref()) else {
                continue;
            };
            let value: String = value.into();
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed == sentinel.trim() {
                continue;
            }
            bag.values.insert(key, value);
        }
        bag
    }

    /// Builder-style insert. Blank values are ignored.
    #[must_use]
    pub fn with(mut self, key: WebKey, value: impl Into<String>) -> Self {
        let value: String = value.into();
        if !value.trim().is_empty() {
            self.values.insert(key, value);
        }
        self
    }

    #[must_use]
    pub fn identifier(&self) -> &CatalogId {
        &self.identifier
    }

    #[must_use]
    pub fn get(&self, key: WebKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
