use super::coercion::{Fields, coerce_scalar, coerce_to_string};
use super::diagnostics::{Diagnostics, Warning};
use super::environments::EnvironmentSet;
use super::error::{ConversionError, InvalidNameKind};
use crate::core::models::property::{Property, Target};
use crate::core::models::value::{Scalar, Value};
use tracing::trace;

const PROPERTY_KEYS: [&str; 4] = ["target", "values", "description", "units"];

/// One column of property values, with its 1-based index when it was split
/// out of a multi-column array.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub(crate) index: Option<usize>,
    pub(crate) values: Vec<Scalar>,
}

impl Column {
    fn name(&self, base: &str) -> String {
        match self.index {
            Some(index) => format!("{base}[{index}]"),
            None => base.to_string(),
        }
    }
}

/// Normalizes one user-declared property.
///
/// Returns one entry per resulting column: a single entry for flat values
/// and `(N,)`/`(N, 1)` arrays, `K` entries named `name[1]`..`name[K]` for
/// `(N, K)` arrays.
pub(crate) fn normalize(
    name: &Value,
    declaration: &Value,
    environments: &EnvironmentSet,
    diagnostics: &mut Diagnostics<'_, '_>,
) -> Result<Vec<(String, Property)>, ConversionError> {
    let name = validate_name(name)?;

    let Value::Map(mapping) = declaration else {
        return Err(ConversionError::InvalidDeclaration {
            name: name.to_string(),
            type_name: declaration.type_name(),
        });
    };
    let fields = Fields::partition(mapping, &PROPERTY_KEYS);

    let target = fields
        .get("target")
        .ok_or_else(|| ConversionError::MissingTarget {
            name: name.to_string(),
        })?;
    let target: Target = target
        .as_str()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ConversionError::InvalidTarget {
            name: name.to_string(),
        })?;

    let values = fields
        .get("values")
        .ok_or_else(|| ConversionError::MissingValues {
            name: name.to_string(),
        })?;
    let columns = expand(name, values)?;
    check_sizes(name, target, &columns, environments)?;

    for key in &fields.unexpected {
        diagnostics.push(Warning::UnexpectedPropertyKey { key: key.clone() });
    }

    let description = fields.get("description").map(coerce_to_string);
    let units = fields.get("units").map(coerce_to_string);
    Ok(into_properties(name, target, columns, description, units))
}

/// Normalizes values that already have a known target, such as the
/// annotations carried by frames.
pub(crate) fn normalize_values(
    name: &str,
    target: Target,
    values: &Value,
    environments: &EnvironmentSet,
) -> Result<Vec<(String, Property)>, ConversionError> {
    check_not_empty(name)?;
    let columns = expand(name, values)?;
    check_sizes(name, target, &columns, environments)?;
    Ok(into_properties(name, target, columns, None, None))
}

fn validate_name(name: &Value) -> Result<&str, ConversionError> {
    match name {
        Value::Str(s) => check_not_empty(s),
        other => Err(ConversionError::InvalidName(InvalidNameKind::NotAString {
            value: other.to_string(),
            type_name: other.type_name(),
        })),
    }
}

fn check_not_empty(name: &str) -> Result<&str, ConversionError> {
    if name.is_empty() {
        return Err(ConversionError::InvalidName(InvalidNameKind::Empty));
    }
    Ok(name)
}

/// Splits property values into single columns.
pub(crate) fn expand(name: &str, values: &Value) -> Result<Vec<Column>, ConversionError> {
    match values {
        Value::List(items) => Ok(vec![Column {
            index: None,
            values: flat_values(name, items)?,
        }]),
        Value::Array(array) => match *array.shape() {
            [_] | [_, 1] => Ok(vec![Column {
                index: None,
                values: array.data().to_vec(),
            }]),
            [_, n_columns] if n_columns > 1 => {
                trace!("Splitting '{}' into {} columns.", name, n_columns);
                Ok((0..n_columns)
                    .map(|i| Column {
                        index: Some(i + 1),
                        values: array.column(i).unwrap_or_default(),
                    })
                    .collect())
            }
            ref shape => Err(ConversionError::UnsupportedValueType {
                name: name.to_string(),
                found: format!("array of shape {shape:?}"),
            }),
        },
        other => Err(ConversionError::UnsupportedValueType {
            name: name.to_string(),
            found: other.type_name().to_string(),
        }),
    }
}

fn flat_values(name: &str, items: &[Value]) -> Result<Vec<Scalar>, ConversionError> {
    items
        .iter()
        .map(|item| match item {
            Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::Bool(_) => {
                Ok(coerce_scalar(item))
            }
            _ => Err(ConversionError::UnsupportedElementType {
                name: name.to_string(),
            }),
        })
        .collect()
}

fn check_sizes(
    name: &str,
    target: Target,
    columns: &[Column],
    environments: &EnvironmentSet,
) -> Result<(), ConversionError> {
    let expected = match target {
        Target::Atom => environments.n_environments(),
        Target::Structure => environments.n_frames(),
    };
    match columns.iter().find(|c| c.values.len() != expected) {
        Some(column) => Err(ConversionError::WrongSize {
            name: name.to_string(),
            target,
            expected,
            got: column.values.len(),
        }),
        None => Ok(()),
    }
}

fn into_properties(
    name: &str,
    target: Target,
    columns: Vec<Column>,
    description: Option<String>,
    units: Option<String>,
) -> Vec<(String, Property)> {
    columns
        .into_iter()
        .map(|column| {
            (
                column.name(name),
                Property {
                    target,
                    values: column.values,
                    description: description.clone(),
                    units: units.clone(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::environment::Environment;
    use crate::core::models::frame::AtomicFrame;
    use crate::core::models::value::NdArray;
    use crate::engine::diagnostics::WarningReporter;
    use crate::engine::environments;

    fn three_atoms() -> EnvironmentSet {
        environments::derive(&[AtomicFrame::new(3)], None, None).unwrap()
    }

    fn declaration(entries: Vec<(&str, Value)>) -> Value {
        Value::map(entries)
    }

    fn run(
        name: impl Into<Value>,
        declaration: Value,
        environments: &EnvironmentSet,
    ) -> Result<(Vec<(String, Property)>, Vec<Warning>), ConversionError> {
        let reporter = WarningReporter::new();
        let mut diagnostics = Diagnostics::new(&reporter);
        let properties = normalize(&name.into(), &declaration, environments, &mut diagnostics)?;
        Ok((properties, diagnostics.into_warnings()))
    }

    fn ints(values: &[i64]) -> Vec<Scalar> {
        values.iter().map(|&v| Scalar::Int(v)).collect()
    }

    #[test]
    fn flat_numeric_and_string_values_are_kept() {
        let envs = three_atoms();
        let (props, warnings) = run(
            "name",
            declaration(vec![("target", "atom".into()), ("values", vec![2, 3, 4].into())]),
            &envs,
        )
        .unwrap();
        assert!(warnings.is_empty());
        assert_eq!(props.len(), 1);
        let (name, property) = &props[0];
        assert_eq!(name, "name");
        assert_eq!(property.target, Target::Atom);
        assert_eq!(property.values, ints(&[2, 3, 4]));
        assert_eq!(property.field_count(), 2);

        let (props, _) = run(
            "name",
            declaration(vec![
                ("target", "atom".into()),
                ("values", vec!["2", "3", "4"].into()),
            ]),
            &envs,
        )
        .unwrap();
        assert_eq!(
            props[0].1.values,
            vec![
                Scalar::Str("2".into()),
                Scalar::Str("3".into()),
                Scalar::Str("4".into())
            ]
        );
    }

    #[test]
    fn description_and_units_are_kept_and_coerced() {
        let envs = three_atoms();
        let (props, _) = run(
            "name",
            declaration(vec![
                ("target", "atom".into()),
                ("values", vec![2, 3, 4].into()),
                ("description", "foo".into()),
            ]),
            &envs,
        )
        .unwrap();
        assert_eq!(props[0].1.description.as_deref(), Some("foo"));
        assert_eq!(props[0].1.field_count(), 3);

        let (props, _) = run(
            "name",
            declaration(vec![
                ("target", "atom".into()),
                ("values", vec![2, 3, 4].into()),
                ("units", Value::Bool(false)),
                ("description", Value::Bool(false)),
            ]),
            &envs,
        )
        .unwrap();
        assert_eq!(props[0].1.units.as_deref(), Some("False"));
        assert_eq!(props[0].1.description.as_deref(), Some("False"));
    }

    #[test]
    fn heterogeneous_flat_values_pass_through() {
        let envs = three_atoms();
        let values = Value::List(vec![Value::Int(1), Value::from("two"), Value::Bool(true)]);
        let (props, _) = run(
            "mixed",
            declaration(vec![("target", "atom".into()), ("values", values)]),
            &envs,
        )
        .unwrap();
        assert_eq!(
            props[0].1.values,
            vec![
                Scalar::Int(1),
                Scalar::Str("two".into()),
                Scalar::Str("True".into())
            ]
        );
    }

    #[test]
    fn one_dimensional_and_single_column_arrays_give_one_property() {
        let envs = three_atoms();
        let flat = NdArray::from_vec(ints(&[2, 3, 4]));
        let column = NdArray::new(vec![3, 1], ints(&[2, 3, 4])).unwrap();
        for array in [flat, column] {
            let (props, _) = run(
                "name",
                declaration(vec![("target", "atom".into()), ("values", array.into())]),
                &envs,
            )
            .unwrap();
            assert_eq!(props.len(), 1);
            assert_eq!(props[0].0, "name");
            assert_eq!(props[0].1.values, ints(&[2, 3, 4]));
        }
    }

    #[test]
    fn multi_column_arrays_are_split_into_suffixed_properties() {
        let envs = three_atoms();
        let array = NdArray::new(vec![3, 3], ints(&[1, 2, 4, 1, 2, 4, 1, 2, 4])).unwrap();
        let (props, _) = run(
            "name",
            declaration(vec![
                ("target", "atom".into()),
                ("values", array.into()),
                ("units", "eV".into()),
            ]),
            &envs,
        )
        .unwrap();
        let names: Vec<&str> = props.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["name[1]", "name[2]", "name[3]"]);
        assert_eq!(props[0].1.values, ints(&[1, 1, 1]));
        assert_eq!(props[1].1.values, ints(&[2, 2, 2]));
        assert_eq!(props[2].1.values, ints(&[4, 4, 4]));
        assert!(props.iter().all(|(_, p)| p.target == Target::Atom));
        assert!(props.iter().all(|(_, p)| p.units.as_deref() == Some("eV")));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let envs = three_atoms();
        let decl = declaration(vec![("target", "atom".into()), ("values", vec![2, 3, 4].into())]);

        let err = run("", decl.clone(), &envs).unwrap_err();
        assert_eq!(err, ConversionError::InvalidName(InvalidNameKind::Empty));
        assert_eq!(
            err.to_string(),
            "the name of a property can not be the empty string"
        );

        let err = run(Value::Bool(false), decl, &envs).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the name of a property must be a string, got 'False' of type bool"
        );
    }

    #[test]
    fn missing_or_invalid_target_is_rejected() {
        let envs = three_atoms();
        let err = run("name", declaration(vec![("values", vec![2, 3, 4].into())]), &envs)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing 'target' for the 'name' property"
        );

        let err = run(
            "name",
            declaration(vec![("target", "atoms".into()), ("values", vec![2, 3, 4].into())]),
            &envs,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidTarget { .. }));
        assert_eq!(
            err.to_string(),
            "the target must be 'atom' or 'structure' for the 'name' property"
        );
    }

    #[test]
    fn unsupported_value_types_are_rejected() {
        let envs = three_atoms();
        let err = run(
            "name",
            declaration(vec![("target", "atom".into()), ("values", Value::Int(3))]),
            &envs,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown type (int) for property 'name'");

        let err = run(
            "name",
            declaration(vec![
                ("target", "atom".into()),
                ("values", Value::map([("test", "bad")])),
            ]),
            &envs,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedValueType { .. }));

        let cube = NdArray::new(vec![3, 1, 1], ints(&[1, 2, 3])).unwrap();
        let err = run(
            "name",
            declaration(vec![("target", "atom".into()), ("values", cube.into())]),
            &envs,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedValueType { .. }));
    }

    #[test]
    fn unsupported_element_types_are_rejected() {
        let envs = three_atoms();
        let values = Value::List(vec![Value::map::<&str, Value, _>([]); 3]);
        let err = run(
            "name",
            declaration(vec![("target", "atom".into()), ("values", values)]),
            &envs,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedElementType { .. }));
        assert_eq!(
            err.to_string(),
            "unsupported type in property values: should be string or number"
        );
    }

    #[test]
    fn wrong_number_of_values_is_rejected() {
        let frames = [AtomicFrame::new(3)];
        let centers: Vec<Environment> = vec![(0, 0).into(), (0, 1).into(), (0, 2).into()];
        let envs = environments::derive(&frames, Some(centers.as_slice()), None).unwrap();

        let err = run(
            "name",
            declaration(vec![("target", "atom".into()), ("values", vec![2, 3].into())]),
            &envs,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "wrong size for the property 'name' with target=='atom': expected 3 values, got 2"
        );

        let err = run(
            "name",
            declaration(vec![
                ("target", "structure".into()),
                ("values", vec![2, 3, 5].into()),
            ]),
            &envs,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::WrongSize {
                name: "name".into(),
                target: Target::Structure,
                expected: 1,
                got: 3
            }
        );
    }

    #[test]
    fn unexpected_keys_are_dropped_with_a_warning() {
        let envs = three_atoms();
        let (props, warnings) = run(
            "name",
            declaration(vec![
                ("target", "atom".into()),
                ("values", vec![2, 3, 4].into()),
                ("what", Value::Bool(false)),
            ]),
            &envs,
        )
        .unwrap();
        assert_eq!(props[0].1.field_count(), 2);
        assert_eq!(
            warnings,
            vec![Warning::UnexpectedPropertyKey { key: "what".into() }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "ignoring unexpected property key: what"
        );
    }

    #[test]
    fn normalize_values_sizes_structure_targets_by_frame_count() {
        let envs = environments::derive(&[AtomicFrame::new(2), AtomicFrame::new(5)], None, None)
            .unwrap();
        let props =
            normalize_values("energy", Target::Structure, &vec![1.0, 2.0].into(), &envs).unwrap();
        assert_eq!(props[0].1.values, vec![Scalar::Float(1.0), Scalar::Float(2.0)]);
        assert_eq!(props[0].1.description, None);

        let err = normalize_values("energy", Target::Atom, &vec![1.0, 2.0].into(), &envs)
            .unwrap_err();
        assert!(matches!(err, ConversionError::WrongSize { expected: 7, got: 2, .. }));
    }
}
