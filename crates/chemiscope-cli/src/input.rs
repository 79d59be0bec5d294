use crate::error::{CliError, Result};
use chemiscope::core::models::environment::Environment;
use chemiscope::core::models::frame::AtomicFrame;
use chemiscope::core::models::value::{Mapping, Value};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::path::Path;
use tracing::debug;

/// One structure of the input batch.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FrameRecord {
    size: usize,
    center_atoms_mask: Option<Vec<bool>>,
    #[serde(default)]
    info: Map<String, JsonValue>,
    #[serde(default)]
    arrays: Map<String, JsonValue>,
}

impl From<FrameRecord> for AtomicFrame {
    fn from(record: FrameRecord) -> Self {
        let mut frame = AtomicFrame::new(record.size);
        if let Some(mask) = record.center_atoms_mask {
            frame = frame.with_center_atoms_mask(mask);
        }
        for (name, value) in record.info {
            frame = frame.with_info(name, value);
        }
        for (name, value) in record.arrays {
            frame = frame.with_array(name, value);
        }
        frame
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum CenterRecord {
    WithCutoff(usize, usize, f64),
    Pair(usize, usize),
}

impl From<CenterRecord> for Environment {
    fn from(record: CenterRecord) -> Self {
        match record {
            CenterRecord::WithCutoff(structure, center, cutoff) => {
                Environment::new(structure, center).with_cutoff(cutoff)
            }
            CenterRecord::Pair(structure, center) => Environment::new(structure, center),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct RawBatch {
    frames: Vec<FrameRecord>,
    meta: Option<Map<String, JsonValue>>,
    properties: Option<Map<String, JsonValue>>,
    centers: Option<Vec<CenterRecord>>,
}

/// The decoded content of an input file, ready to be handed to the
/// conversion workflow.
#[derive(Debug)]
pub struct InputBatch {
    pub frames: Vec<AtomicFrame>,
    pub meta: Option<Mapping>,
    pub properties: Option<Mapping>,
    pub centers: Option<Vec<Environment>>,
}

impl InputBatch {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading input batch from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let raw: RawBatch = serde_json::from_str(content)?;
        Ok(Self {
            frames: raw.frames.into_iter().map(AtomicFrame::from).collect(),
            meta: raw.meta.map(to_mapping),
            properties: raw.properties.map(to_mapping),
            centers: raw
                .centers
                .map(|centers| centers.into_iter().map(Environment::from).collect()),
        })
    }
}

fn to_mapping(map: Map<String, JsonValue>) -> Mapping {
    map.into_iter()
        .map(|(key, value)| (Value::Str(key), Value::from(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemiscope::core::models::frame::Frame;
    use chemiscope::core::models::value::{NdArray, Scalar};

    #[test]
    fn frames_keep_their_annotations() {
        let batch = InputBatch::from_json(
            r#"{
                "frames": [
                    {
                        "size": 2,
                        "center_atoms_mask": [true, false],
                        "info": {"energy": -3.5},
                        "arrays": {"charge": [0.5, -0.5], "forces": [[1, 0, 0], [0, 1, 0]]}
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(batch.frames.len(), 1);
        let frame = &batch.frames[0];
        assert_eq!(frame.atom_count(), 2);
        assert_eq!(frame.center_atoms_mask(), Some(&[true, false][..]));
        assert_eq!(
            frame.structure_annotations().get("energy"),
            Some(&Value::Float(-3.5))
        );
        assert_eq!(
            frame.atom_annotations().get("charge"),
            Some(&Value::List(vec![Value::Float(0.5), Value::Float(-0.5)]))
        );
        assert!(matches!(
            frame.atom_annotations().get("forces"),
            Some(Value::Array(array)) if array.shape() == [2, 3]
        ));
        assert!(batch.meta.is_none());
        assert!(batch.properties.is_none());
        assert!(batch.centers.is_none());
    }

    #[test]
    fn meta_and_properties_keep_declaration_order() {
        let batch = InputBatch::from_json(
            r#"{
                "frames": [{"size": 1}],
                "meta": {"name": "test", "authors": ["a", "b"]},
                "properties": {
                    "zeta": {"target": "structure", "values": [1]},
                    "alpha": {"target": "structure", "values": [[1, 2]]}
                }
            }"#,
        )
        .unwrap();

        let meta = batch.meta.unwrap();
        assert_eq!(meta[0].0, Value::from("name"));
        assert_eq!(meta[1].0, Value::from("authors"));

        let properties = batch.properties.unwrap();
        assert_eq!(properties[0].0, Value::from("zeta"));
        assert_eq!(properties[1].0, Value::from("alpha"));
        assert_eq!(
            properties[1].1.get("values"),
            Some(&Value::Array(NdArray::from_rows(vec![vec![Scalar::Int(1), Scalar::Int(2)]]).unwrap()))
        );
    }

    #[test]
    fn centers_accept_an_optional_cutoff() {
        let batch = InputBatch::from_json(
            r#"{"frames": [{"size": 2}], "centers": [[0, 0], [0, 1, 3.5]]}"#,
        )
        .unwrap();

        assert_eq!(
            batch.centers.unwrap(),
            vec![
                Environment::new(0, 0),
                Environment::new(0, 1).with_cutoff(3.5)
            ]
        );
    }

    #[test]
    fn unknown_top_level_keys_are_rejected() {
        let result = InputBatch::from_json(r#"{"frames": [], "structures": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = InputBatch::from_file(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn malformed_file_is_a_parsing_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = InputBatch::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
