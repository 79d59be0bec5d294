use super::environment::Environment;
use super::metadata::Metadata;
use super::property::PropertyMap;
use serde::Serialize;

/// The normalized input document of the chemiscope visualizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub meta: Metadata,
    pub properties: PropertyMap,
    pub environments: Vec<Environment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::property::{Property, Target};
    use crate::core::models::value::Scalar;
    use serde_json::json;

    #[test]
    fn document_serializes_exactly_three_top_level_keys() {
        let mut properties = PropertyMap::new();
        properties
            .insert(
                "energy".into(),
                Property {
                    target: Target::Structure,
                    values: vec![Scalar::Float(1.5)],
                    description: None,
                    units: Some("eV".into()),
                },
            )
            .unwrap();
        let document = Document {
            meta: Metadata::default(),
            properties,
            environments: vec![
                Environment::new(0, 0),
                Environment::new(0, 1).with_cutoff(3.5),
            ],
        };

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value,
            json!({
                "meta": {"name": "<unknown>"},
                "properties": {
                    "energy": {"target": "structure", "values": [1.5], "units": "eV"}
                },
                "environments": [
                    {"structure": 0, "center": 0},
                    {"structure": 0, "center": 1, "cutoff": 3.5}
                ]
            })
        );
    }
}
