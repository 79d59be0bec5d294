use crate::core::models::value::{Mapping, Scalar, Value};

/// Converts one scalar into an output primitive. Numbers and strings pass
/// through; anything else becomes its textual representation.
pub fn coerce_scalar(value: &Value) -> Scalar {
    value
        .as_scalar()
        .unwrap_or_else(|| Scalar::Str(value.to_string()))
}

/// Converts a whole value into a string. Sequences are rendered as a whole,
/// not element by element.
pub fn coerce_to_string(value: &Value) -> String {
    value.to_string()
}

/// Converts each element of a sequence into a string, preserving order.
/// Anything that is not a sequence is treated as a one-element sequence.
pub fn coerce_sequence(value: &Value) -> Vec<String> {
    match value {
        Value::List(items) => items.iter().map(coerce_to_string).collect(),
        Value::Array(array) if array.ndim() >= 1 => {
            let n_rows = array.shape().first().copied().unwrap_or(0);
            (0..n_rows)
                .filter_map(|i| array.row(i))
                .map(|row| coerce_to_string(&row))
                .collect()
        }
        other => vec![coerce_to_string(other)],
    }
}

/// Recognized entries of a loosely typed map, plus the keys that were not
/// recognized.
pub(crate) struct Fields<'a> {
    known: Vec<(&'static str, &'a Value)>,
    pub(crate) unexpected: Vec<String>,
}

impl<'a> Fields<'a> {
    /// Splits `mapping` against an allow-list of keys. When a key appears
    /// more than once, the last occurrence wins.
    pub(crate) fn partition(mapping: &'a Mapping, allowed: &[&'static str]) -> Self {
        let mut known: Vec<(&'static str, &'a Value)> = Vec::new();
        let mut unexpected = Vec::new();
        for (key, value) in mapping {
            match key.as_str().and_then(|k| allowed.iter().find(|a| **a == k)) {
                Some(&name) => {
                    known.retain(|(n, _)| *n != name);
                    known.push((name, value));
                }
                None => unexpected.push(key.to_string()),
            }
        }
        Self { known, unexpected }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&'a Value> {
        self.known
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::value::NdArray;

    #[test]
    fn coerce_scalar_passes_numbers_and_strings_through() {
        assert_eq!(coerce_scalar(&Value::Int(3)), Scalar::Int(3));
        assert_eq!(coerce_scalar(&Value::Float(2.5)), Scalar::Float(2.5));
        assert_eq!(coerce_scalar(&Value::from("x")), Scalar::Str("x".into()));
    }

    #[test]
    fn coerce_scalar_stringifies_unsupported_types() {
        assert_eq!(coerce_scalar(&Value::Bool(false)), Scalar::Str("False".into()));
        assert_eq!(coerce_scalar(&Value::Null), Scalar::Str("None".into()));
    }

    #[test]
    fn coerce_to_string_renders_sequences_as_a_whole() {
        assert_eq!(coerce_to_string(&Value::Int(33)), "33");
        assert_eq!(coerce_to_string(&Value::from(vec!["foo", "bar"])), "['foo', 'bar']");
        assert_eq!(coerce_to_string(&Value::Bool(false)), "False");
    }

    #[test]
    fn coerce_sequence_coerces_each_element() {
        let value = Value::List(vec![Value::Int(3), Value::Bool(false)]);
        assert_eq!(coerce_sequence(&value), vec!["3", "False"]);

        let array = NdArray::from_vec(vec![Scalar::Float(1.0), Scalar::Str("a".into())]);
        assert_eq!(coerce_sequence(&Value::Array(array)), vec!["1.0", "a"]);
    }

    #[test]
    fn coerce_sequence_wraps_non_sequences() {
        assert_eq!(coerce_sequence(&Value::from("foo")), vec!["foo"]);
    }

    #[test]
    fn fields_partition_separates_unexpected_keys_and_keeps_last_duplicate() {
        let mapping: Mapping = vec![
            (Value::from("name"), Value::from("first")),
            (Value::from("what"), Value::Int(1)),
            (Value::Bool(true), Value::Int(2)),
            (Value::from("name"), Value::from("second")),
        ];
        let fields = Fields::partition(&mapping, &["name", "description"]);
        assert_eq!(fields.get("name"), Some(&Value::from("second")));
        assert_eq!(fields.get("description"), None);
        assert_eq!(fields.unexpected, vec!["what", "True"]);
    }
}
