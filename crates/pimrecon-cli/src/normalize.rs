//! `normalize` command: show the canonical form of a single raw value.

use clap::Subcommand;
use pimrecon_engine::{
    map_material_classification, normalize_classification_code, normalize_dimensions,
    normalize_part_number, normalize_weight, weight_to_kg,
};
use serde_json::json;

#[derive(Debug, Subcommand)]
pub(crate) enum NormalizeCommands {
    /// Parse a weight string such as "0,162 kg"
    Weight { text: String },
    /// Parse a dimension string such as "4 x 4 x 4,2 cm"
    Dimensions { text: String },
    /// Canonicalize a manufacturer part number
    PartNumber { text: String },
    /// Canonicalize a classification code
    Code { text: String },
    /// Map a material-classification description to its code
    Classification { text: String },
}

/// Normalize one value and print the result as JSON.
///
/// # Errors
///
/// Returns an error only if the result cannot be serialized.
pub(crate) fn run_normalize(command: &NormalizeCommands, pretty: bool) -> anyhow::Result<()> {
    let value = normalized_json(command);
    let body = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{body}");
    Ok(())
}

fn normalized_json(command: &NormalizeCommands) -> serde_json::Value {
    match command {
        NormalizeCommands::Weight { text } => {
            let parsed = normalize_weight(text);
            json!({
                "input": text,
                "value": parsed.value,
                "unit": parsed.unit.as_str(),
                "kg": weight_to_kg(parsed.value, parsed.unit),
            })
        }
        NormalizeCommands::Dimensions { text } => {
            let dims = normalize_dimensions(text);
            json!({
                "input": text,
                "length_mm": dims.length,
                "width_mm": dims.width,
                "height_mm": dims.height,
            })
        }
        NormalizeCommands::PartNumber { text } => {
            json!({ "input": text, "value": normalize_part_number(text) })
        }
        NormalizeCommands::Code { text } => {
            json!({ "input": text, "value": normalize_classification_code(text) })
        }
        NormalizeCommands::Classification { text } => {
            json!({ "input": text, "value": map_material_classification(text) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_json_carries_unit_and_kilograms() {
        let v = normalized_json(&NormalizeCommands::Weight {
            text: "500 g".to_string(),
        });
        assert_eq!(v["value"], 500.0);
        assert_eq!(v["unit"], "g");
        assert_eq!(v["kg"], 0.5);
    }

    #[test]
    fn malformed_dimensions_serialize_as_nulls() {
        let v = normalized_json(&NormalizeCommands::Dimensions {
            text: "10".to_string(),
        });
        assert!(v["length_mm"].is_null());
        assert!(v["width_mm"].is_null());
        assert!(v["height_mm"].is_null());
    }

    #[test]
    fn unmapped_classification_is_empty() {
        let v = normalized_json(&NormalizeCommands::Classification {
            text: "Schweißteil".to_string(),
        });
        assert_eq!(v["value"], "");
    }

    #[test]
    fn part_number_is_stripped_and_uppercased() {
        let v = normalized_json(&NormalizeCommands::PartNumber {
            text: "ab-123/45".to_string(),
        });
        assert_eq!(v["value"], "AB12345");
    }
}
