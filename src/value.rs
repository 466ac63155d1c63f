use std::collections::BTreeMap;

/// A JSON value as seen by the query engine.
///
/// This type represents all valid JSON types with a distinction between
/// integers and floats (unlike standard JSON which only has "number").
/// The engine never mutates a `Value`; every query walks a borrowed tree.
///
/// # Key Order
///
/// Objects are backed by a `BTreeMap`, so iteration is always in sorted key
/// order. Wildcard expansion, descendant walks, and key listings therefore
/// produce the same sequence for the same document, no matter how the
/// document was assembled.
///
/// # Examples
///
/// ```
/// use sorrel::Value;
/// use std::collections::BTreeMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = BTreeMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys, iterated in sorted key order
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Render a scalar as a plain string.
    ///
    /// Used by the auto-id pseudopath and the `` `str()` `` operator.
    /// Booleans and null render in their JSON spelling; collections fall
    /// back to a debug rendering and are not expected here.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "null".to_string(),
            _ => format!("{:?}", self),
        }
    }

    /// True for null, booleans, numbers, and strings.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }
}
