use super::config::ConversionConfig;
use super::error::ConversionError;
use crate::core::models::environment::Environment;
use crate::core::models::frame::{Annotations, Frame};
use crate::core::models::value::{NdArray, Scalar, Value};

/// Collects the frame-level annotations, one row per frame.
///
/// Every frame must carry every annotation name found on any frame.
pub(crate) fn structure_values<F: Frame>(
    frames: &[F],
) -> Result<Vec<(String, Value)>, ConversionError> {
    let names = annotation_names(frames.iter().map(Frame::structure_annotations));
    names
        .into_iter()
        .map(|name| {
            let rows = frames
                .iter()
                .enumerate()
                .map(|(structure, frame)| {
                    frame
                        .structure_annotations()
                        .get(&name)
                        .cloned()
                        .ok_or_else(|| ConversionError::MissingAnnotation {
                            name: name.clone(),
                            structure,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((name, stack_rows(rows)))
        })
        .collect()
}

/// Collects the per-atom annotations, one row per environment, following the
/// environment order.
pub(crate) fn atom_values<F: Frame>(
    frames: &[F],
    environments: &[Environment],
    config: &ConversionConfig,
) -> Result<Vec<(String, Value)>, ConversionError> {
    let names = annotation_names(frames.iter().map(Frame::atom_annotations));
    names
        .into_iter()
        .filter(|name| !config.is_ignored_atom_annotation(name))
        .map(|name| {
            if let Some(structure) = frames
                .iter()
                .position(|frame| !frame.atom_annotations().contains_key(&name))
            {
                return Err(ConversionError::MissingAnnotation { name, structure });
            }

            let rows = environments
                .iter()
                .map(|env| {
                    frames
                        .get(env.structure)
                        .and_then(|frame| frame.atom_annotations().get(&name))
                        .and_then(|values| row_at(values, env.center))
                        .ok_or_else(|| ConversionError::InvalidAnnotation {
                            name: name.clone(),
                            structure: env.structure,
                            center: env.center,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((name, stack_rows(rows)))
        })
        .collect()
}

/// Annotation names across all frames. Each frame yields its names sorted;
/// names first seen on a later frame are appended after the earlier ones.
fn annotation_names<'a>(maps: impl Iterator<Item = &'a Annotations>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for map in maps {
        for name in map.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

fn row_at(values: &Value, index: usize) -> Option<Value> {
    match values {
        Value::List(items) => items.get(index).cloned(),
        Value::Array(array) => array.row(index),
        _ => None,
    }
}

/// Stacks per-frame or per-environment rows into property values: scalar
/// rows give a flat list, equally long sequence rows give an `(n, K)` array.
/// Anything else is left as a list for the property normalizer to reject.
fn stack_rows(rows: Vec<Value>) -> Value {
    if !rows
        .iter()
        .any(|row| matches!(row, Value::List(_) | Value::Array(_)))
    {
        return Value::List(rows);
    }
    match rows
        .iter()
        .map(row_scalars)
        .collect::<Option<Vec<_>>>()
        .and_then(|scalars| NdArray::from_rows(scalars).ok())
    {
        Some(array) => Value::Array(array),
        None => Value::List(rows),
    }
}

fn row_scalars(row: &Value) -> Option<Vec<Scalar>> {
    match row {
        Value::List(items) => items.iter().map(Value::as_scalar).collect(),
        Value::Array(array) if array.ndim() == 1 => Some(array.data().to_vec()),
        _ => None,
    }
}
