use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// An ordered associative container of loose values.
///
/// Keys are loose values too, since user-authored maps may carry keys of any
/// type (a property named `False` must be reported, not silently rejected by
/// the type system). Insertion order is preserved.
pub type Mapping = Vec<(Value, Value)>;

/// A primitive value allowed in the output document: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An integer number.
    Int(i64),
    /// A floating point number. JSON has no representation for NaN or
    /// infinities: non-finite values are written as `null`.
    Float(f64),
    /// A string.
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write_float(f, *x),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArrayError {
    #[error("an array of {len} elements cannot have shape {shape:?}")]
    ShapeMismatch { shape: Vec<usize>, len: usize },
    #[error("row {row} has {got} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// A rectangular, row-major, n-dimensional array of numbers and/or strings.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<Scalar>,
}

impl NdArray {
    /// Creates an array from its shape and row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::ShapeMismatch`] if the number of elements does not
    /// match the product of the shape.
    pub fn new(shape: Vec<usize>, data: Vec<Scalar>) -> Result<Self, ArrayError> {
        if shape.iter().product::<usize>() != data.len() {
            return Err(ArrayError::ShapeMismatch {
                shape,
                len: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates a one-dimensional array.
    pub fn from_vec(data: Vec<Scalar>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Stacks equally long rows into a two-dimensional array.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Scalar>>) -> Result<Self, ArrayError> {
        let n_columns = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * n_columns);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_columns {
                return Err(ArrayError::RaggedRows {
                    row,
                    expected: n_columns,
                    got: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            shape: vec![n_rows, n_columns],
            data,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &[Scalar] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Scalar> {
        self.data
    }

    /// Number of elements spanned by one step along the first axis.
    fn stride(&self) -> usize {
        self.shape.iter().skip(1).product()
    }

    /// Returns column `index` of a two-dimensional array.
    pub fn column(&self, index: usize) -> Option<Vec<Scalar>> {
        match self.shape.as_slice() {
            &[_, n_columns] if index < n_columns => Some(
                self.data
                    .iter()
                    .skip(index)
                    .step_by(n_columns)
                    .cloned()
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Returns the sub-array at `index` along the first axis: a scalar for a
    /// one-dimensional array, a lower-rank array otherwise.
    pub fn row(&self, index: usize) -> Option<Value> {
        let n_rows = *self.shape.first()?;
        if index >= n_rows {
            return None;
        }
        let stride = self.stride();
        let slice = self.data.get(index * stride..(index + 1) * stride)?;
        if self.shape.len() == 1 {
            return slice.first().cloned().map(Value::from);
        }
        Some(Value::Array(Self {
            shape: self.shape.get(1..)?.to_vec(),
            data: slice.to_vec(),
        }))
    }

    fn write_nested(f: &mut fmt::Formatter<'_>, shape: &[usize], data: &[Scalar]) -> fmt::Result {
        let Some((&n, rest)) = shape.split_first() else {
            return match data.first() {
                Some(scalar) => write_scalar_repr(f, scalar),
                None => f.write_str("[]"),
            };
        };
        let stride: usize = rest.iter().product();
        f.write_str("[")?;
        for i in 0..n {
            if i > 0 {
                f.write_str(", ")?;
            }
            let chunk = data.get(i * stride..(i + 1) * stride).unwrap_or(&[]);
            Self::write_nested(f, rest, chunk)?;
        }
        f.write_str("]")
    }
}

/// A dynamically typed value, as found in user-authored metadata and
/// property declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An ordered sequence of arbitrary values.
    List(Vec<Value>),
    /// An associative container with arbitrary keys.
    Map(Mapping),
    /// A rectangular n-dimensional array.
    Array(NdArray),
}

impl Value {
    /// Name of the runtime type of this value, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an output primitive if it already is a number or
    /// a string.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Int(i) => Some(Scalar::Int(*i)),
            Value::Float(x) => Some(Scalar::Float(*x)),
            Value::Str(s) => Some(Scalar::Str(s.clone())),
            _ => None,
        }
    }

    /// Looks up a string key in a [`Value::Map`]. The last matching entry wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries
                .iter()
                .rev()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Builds a [`Value::Map`] from string-keyed entries.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Value::Str(k.into()), v.into()))
                .collect(),
        )
    }

    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write_quoted(f, s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_repr(f)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    key.write_repr(f)?;
                    f.write_str(": ")?;
                    value.write_repr(f)?;
                }
                f.write_str("}")
            }
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// The default textual representation of a value.
///
/// Top-level strings are written verbatim; strings nested inside sequences or
/// maps are quoted, so that `["foo", "bar"]` renders as `['foo', 'bar']`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => f.write_str(s),
            Value::List(_) | Value::Map(_) => self.write_repr(f),
            Value::Array(array) => NdArray::write_nested(f, &array.shape, &array.data),
        }
    }
}

fn write_scalar_repr(f: &mut fmt::Formatter<'_>, scalar: &Scalar) -> fmt::Result {
    match scalar {
        Scalar::Str(s) => write_quoted(f, s),
        other => fmt::Display::fmt(other, f),
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// Shortest round-trip decimal, always with a fractional part or an exponent.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{x:e}");
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exponent.abs());
    }
    if x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<NdArray> for Value {
    fn from(array: NdArray) -> Self {
        Value::Array(array)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int(i) => Value::Int(i),
            Scalar::Float(x) => Value::Float(x),
            Scalar::Str(s) => Value::Str(s),
        }
    }
}

/// Converts JSON data into loose values.
///
/// Nested JSON arrays whose leaves are all numbers or strings and whose
/// sub-arrays all share one shape become [`Value::Array`]; a flat JSON array
/// stays a [`Value::List`].
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                let items: Vec<Value> = items.into_iter().map(Value::from).collect();
                match stack_subarrays(&items) {
                    Some(array) => Value::Array(array),
                    None => Value::List(items),
                }
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn as_subarray(value: &Value) -> Option<NdArray> {
    match value {
        Value::Array(array) => Some(array.clone()),
        Value::List(items) => items
            .iter()
            .map(Value::as_scalar)
            .collect::<Option<Vec<_>>>()
            .map(NdArray::from_vec),
        _ => None,
    }
}

fn stack_subarrays(items: &[Value]) -> Option<NdArray> {
    let subarrays = items.iter().map(as_subarray).collect::<Option<Vec<_>>>()?;
    let inner_shape = subarrays.first()?.shape.clone();
    if subarrays.iter().any(|a| a.shape != inner_shape) {
        return None;
    }
    let mut shape = Vec::with_capacity(inner_shape.len() + 1);
    shape.push(subarrays.len());
    shape.extend(inner_shape);
    let data = subarrays.into_iter().flat_map(NdArray::into_data).collect();
    NdArray::new(shape, data).ok()
}
