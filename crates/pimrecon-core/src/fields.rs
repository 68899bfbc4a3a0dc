//! Field vocabularies for both sides of a reconciliation.
//!
//! [`DbField`] names spreadsheet columns, [`WebKey`] names attributes scraped
//! from the vendor catalog, and [`FieldName`] is the fixed set of tracked
//! fields that each produce exactly one verdict per record.

use serde::{Deserialize, Serialize};

/// A tracked field. Declaration order is verdict order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    #[serde(rename = "Materialkurztext")]
    ShortText,
    #[serde(rename = "Her.-Artikelnummer")]
    PartNumber,
    #[serde(rename = "Fert./Prüfhinweis")]
    ClassificationCode,
    #[serde(rename = "Werkstoff")]
    Material,
    #[serde(rename = "Nettogewicht")]
    NetWeight,
    #[serde(rename = "Länge")]
    Length,
    #[serde(rename = "Breite")]
    Width,
    #[serde(rename = "Höhe")]
    Height,
}

impl FieldName {
    pub const ALL: [FieldName; 8] = [
        FieldName::ShortText,
        FieldName::PartNumber,
        FieldName::ClassificationCode,
        FieldName::Material,
        FieldName::NetWeight,
        FieldName::Length,
        FieldName::Width,
        FieldName::Height,
    ];

    /// Spreadsheet column holding the DB value for this field.
    #[must_use]
    pub fn db_field(self) -> DbField {
        match self {
            FieldName::ShortText => DbField::ShortText,
            FieldName::PartNumber => DbField::PartNumber,
            FieldName::ClassificationCode => DbField::ClassificationCode,
            FieldName::Material => DbField::Material,
            FieldName::NetWeight => DbField::NetWeight,
            FieldName::Length => DbField::Length,
            FieldName::Width => DbField::Width,
            FieldName::Height => DbField::Height,
        }
    }

    /// Primary Web attribute this field is compared against.
    ///
    /// The three dimension axes all read the single `Abmessung` string.
    #[must_use]
    pub fn web_key(self) -> WebKey {
        match self {
            FieldName::ShortText => WebKey::ProductTitle,
            FieldName::PartNumber => WebKey::AlternatePartNumber,
            FieldName::ClassificationCode => WebKey::MaterialClassification,
            FieldName::Material => WebKey::Material,
            FieldName::NetWeight => WebKey::Weight,
            FieldName::Length | FieldName::Width | FieldName::Height => WebKey::Dimensions,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.db_field().label()
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A spreadsheet column the record view understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbField {
    /// Vendor catalog product code used to pair records with scraped data.
    CatalogNumber,
    ShortText,
    PartNumber,
    ClassificationCode,
    Material,
    NetWeight,
    /// Optional unit column qualifying [`DbField::NetWeight`].
    WeightUnit,
    Length,
    Width,
    Height,
}

impl DbField {
    pub const ALL: [DbField; 10] = [
        DbField::CatalogNumber,
        DbField::ShortText,
        DbField::PartNumber,
        DbField::ClassificationCode,
        DbField::Material,
        DbField::NetWeight,
        DbField::WeightUnit,
        DbField::Length,
        DbField::Width,
        DbField::Height,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DbField::CatalogNumber => "Artikelnummer",
            DbField::ShortText => "Materialkurztext",
            DbField::PartNumber => "Her.-Artikelnummer",
            DbField::ClassificationCode => "Fert./Prüfhinweis",
            DbField::Material => "Werkstoff",
            DbField::NetWeight => "Nettogewicht",
            DbField::WeightUnit => "Gewichtseinheit",
            DbField::Length => "Länge",
            DbField::Width => "Breite",
            DbField::Height => "Höhe",
        }
    }

    /// Resolve a column header. Matching ignores surrounding whitespace and case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.label().to_lowercase() == wanted)
    }
}

/// A descriptive attribute key in a scraped Web attribute bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebKey {
    ProductTitle,
    AlternatePartNumber,
    Weight,
    Dimensions,
    Material,
    MaterialClassification,
    /// Pre-coded classification, used when no description maps to a code.
    ClassificationCode,
}

impl WebKey {
    pub const ALL: [WebKey; 7] = [
        WebKey::ProductTitle,
        WebKey::AlternatePartNumber,
        WebKey::Weight,
        WebKey::Dimensions,
        WebKey::Material,
        WebKey::MaterialClassification,
        WebKey::ClassificationCode,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WebKey::ProductTitle => "Produkttitel",
            WebKey::AlternatePartNumber => "Weitere Artikelnummer",
            WebKey::Weight => "Gewicht",
            WebKey::Dimensions => "Abmessung",
            WebKey::Material => "Werkstoff",
            WebKey::MaterialClassification => "Materialklassifizierung",
            WebKey::ClassificationCode => "Fert./Prüfhinweis",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.label().to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_fields_keep_declaration_order() {
        let labels: Vec<_> = FieldName::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Materialkurztext",
                "Her.-Artikelnummer",
                "Fert./Prüfhinweis",
                "Werkstoff",
                "Nettogewicht",
                "Länge",
                "Breite",
                "Höhe",
            ]
        );
    }

    #[test]
    fn db_field_from_label_ignores_case_and_padding() {
        assert_eq!(DbField::from_label("  nettogewicht "), Some(DbField::NetWeight));
        assert_eq!(DbField::from_label("HÖHE"), Some(DbField::Height));
        assert_eq!(DbField::from_label("Farbe"), None);
    }

    #[test]
    fn web_key_from_label_round_trips_every_key() {
        for key in WebKey::ALL {
            assert_eq!(WebKey::from_label(key.label()), Some(key));
        }
    }

    #[test]
    fn dimension_axes_share_one_web_key() {
        assert_eq!(FieldName::Length.web_key(), WebKey::Dimensions);
        assert_eq!(FieldName::Width.web_key(), WebKey::Dimensions);
        assert_eq!(FieldName::Height.web_key(), WebKey::Dimensions);
    }

    #[test]
    fn field_name_serializes_as_column_label() {
        let json = serde_json::to_string(&FieldName::NetWeight).unwrap();
        assert_eq!(json, "\"Nettogewicht\"");
    }
}
