//! Pairs spreadsheet records with scraped catalog data by business identifier.
//!
//! [`WebBagIndex`] is the identifier-keyed store the retrieval layer fills
//! (one bag per product, duplicates collapsed); [`pair_records`] walks the
//! records in source order and looks each one up.

use std::borrow::Cow;
use std::collections::HashMap;

use pimrecon_core::{CatalogId, DbField, DbRecord, WebAttributes};

/// Scraped attribute bags keyed by normalized catalog identifier.
#[derive(Debug, Clone, Default)]
pub struct WebBagIndex {
    bags: HashMap<CatalogId, WebAttributes>,
}

impl WebBagIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw identifier → (label → value) maps, dropping sentinel
    /// values. The first bag seen for an identifier wins.
    #[must_use]
    pub fn from_raw<I, B, K, V>(raw: I, sentinel: &str) -> Self
    where
        I: IntoIterator<Item = (String, B)>,
        B: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut index = Self::new();
        for (identifier, bag) in raw {
            let id = CatalogId::new(&identifier);
            index.insert(WebAttributes::from_raw(id, bag, sentinel));
        }
        index
    }

    /// Insert a bag under its own identifier.
    ///
    /// Returns `false` and keeps the existing bag when the identifier is
    /// already present.
    pub fn insert(&mut self, bag: WebAttributes) -> bool {
        let id = bag.identifier().clone();
        if self.bags.contains_key(&id) {
            tracing::warn!(identifier = %id, "duplicate catalog identifier, keeping first bag");
            return false;
        }
        self.bags.insert(id, bag);
        true
    }

    #[must_use]
    pub fn get(&self, id: &CatalogId) -> Option<&WebAttributes> {
        self.bags.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }
}

/// A DB record paired with its catalog data.
#[derive(Debug)]
pub struct Pairing<'a> {
    pub record: &'a DbRecord,
    pub identifier: CatalogId,
    /// Borrowed from the index, or an owned empty bag when the index has no
    /// entry for the identifier.
    pub web: Cow<'a, WebAttributes>,
}

/// Pairings in source order plus the number of records left out.
#[derive(Debug)]
pub struct MatchOutput<'a> {
    pub pairs: Vec<Pairing<'a>>,
    /// Records without a valid prefixed identifier.
    pub skipped: usize,
}

/// Pair every record carrying a valid `prefix`-ed identifier with its bag.
///
/// Records without such an identifier are skipped entirely; they produce no
/// verdicts at all.
#[must_use]
pub fn pair_records<'a>(
    records: &'a [DbRecord],
    index: &'a WebBagIndex,
    prefix: &str,
) -> MatchOutput<'a> {
    let mut pairs = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for (row, record) in records.iter().enumerate() {
        let identifier = record
            .get(DbField::CatalogNumber)
            .as_text()
            .and_then(|raw| CatalogId::parse_with_prefix(&raw, prefix));

        let Some(identifier) = identifier else {
            tracing::debug!(row, prefix, "skipping record without a valid catalog identifier");
            skipped += 1;
            continue;
        };

        let web = if let Some(bag) = index.get(&identifier) {
            Cow::Borrowed(bag)
        } else {
            tracing::debug!(identifier = %identifier, "no catalog data for identifier");
            Cow::Owned(WebAttributes::empty(identifier.clone()))
        };

        pairs.push(Pairing {
            record,
            identifier,
            web,
        });
    }

    MatchOutput { pairs, skipped }
}
