//! Dynamic values
//!
//! `Value` is the "any" the engine compares: null, boxed scalars, strings,
//! enums, plain objects, and three container kinds (arrays, lists, sets).

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::model::array::ArrayValue;
use crate::model::order::canonical_cmp;
use crate::model::types::{ClassDesc, PrimitiveKind, TypeDesc};

/// A plain object: class plus named fields, compared field-by-field
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    pub class: Arc<ClassDesc>,
    pub fields: Vec<(String, Value)>,
}

/// Duplicate-free collection held in canonical order
///
/// Two sets with the same members hold them in the same order regardless of
/// how they were built, so positional comparison and enumeration agree with
/// set equality. The only way in is [`SetValue::new`] (or `Value::set`):
///
/// ```compile_fail
/// use deepeq_core::{SetValue, Value};
///
/// let unchecked = SetValue { elements: vec![Value::Int(1), Value::Int(1)] };
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetValue {
    elements: Vec<Value>,
}

impl SetValue {
    pub fn new(elements: impl IntoIterator<Item = Value>) -> Self {
        let mut elements: Vec<Value> = elements.into_iter().collect();
        elements.sort_by(canonical_cmp);
        elements.dedup_by(|a, b| canonical_cmp(a, b) == Ordering::Equal);
        Self { elements }
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.elements
            .binary_search_by(|element| canonical_cmp(element, value))
            .is_ok()
    }
}

impl FromIterator<Value> for SetValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Enum { type_name: Arc<str>, variant: String },
    Object(ObjectValue),
    Array(ArrayValue),
    List(Vec<Value>),
    Set(SetValue),
}

impl Value {
    pub fn list(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::List(elements.into_iter().collect())
    }

    /// Build a set; duplicates collapse and order is canonical
    pub fn set(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetValue::new(elements))
    }

    pub fn enum_variant(type_name: &str, variant: impl Into<String>) -> Self {
        Value::Enum {
            type_name: Arc::from(type_name),
            variant: variant.into(),
        }
    }

    pub fn object(class: &Arc<ClassDesc>, fields: Vec<(String, Value)>) -> Self {
        Value::Object(ObjectValue {
            class: class.clone(),
            fields,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Arrays, lists and sets
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::List(_) | Value::Set(_))
    }

    /// Element count for containers, `None` otherwise
    pub fn container_len(&self) -> Option<usize> {
        match self {
            Value::Array(array) => Some(array.len()),
            Value::List(elements) => Some(elements.len()),
            Value::Set(set) => Some(set.len()),
            _ => None,
        }
    }

    /// Child at `index` of a container
    pub fn child(&self, index: usize) -> Option<Cow<'_, Value>> {
        match self {
            Value::Array(array) => array.get(index),
            Value::List(elements) => elements.get(index).map(Cow::Borrowed),
            Value::Set(set) => set.as_slice().get(index).map(Cow::Borrowed),
            _ => None,
        }
    }

    /// Declared type of this container's element slots
    ///
    /// Collections erase their element type, so their slots are `Object`.
    pub fn slot_type(&self) -> Option<TypeDesc> {
        match self {
            Value::Array(array) => Some(array.component_type()),
            Value::List(_) | Value::Set(_) => Some(TypeDesc::Object),
            _ => None,
        }
    }

    /// Kind of a scalar value
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Value::Bool(_) => Some(PrimitiveKind::Boolean),
            Value::Byte(_) => Some(PrimitiveKind::Byte),
            Value::Char(_) => Some(PrimitiveKind::Char),
            Value::Short(_) => Some(PrimitiveKind::Short),
            Value::Int(_) => Some(PrimitiveKind::Int),
            Value::Long(_) => Some(PrimitiveKind::Long),
            Value::Float(_) => Some(PrimitiveKind::Float),
            Value::Double(_) => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// Runtime type; scalars report their boxed type, null has none
    pub fn runtime_type(&self) -> Option<TypeDesc> {
        if let Some(kind) = self.primitive_kind() {
            return Some(TypeDesc::Boxed(kind));
        }
        match self {
            Value::Null => None,
            Value::Str(_) => Some(TypeDesc::String),
            Value::Enum { type_name, .. } => Some(TypeDesc::Enum(type_name.clone())),
            Value::Object(object) => Some(TypeDesc::Class(object.class.clone())),
            Value::Array(array) => Some(array.array_type()),
            Value::List(_) => Some(TypeDesc::List),
            Value::Set(_) => Some(TypeDesc::Set),
            _ => None,
        }
    }

    /// Runtime type name, `"null"` for null
    pub fn type_name(&self) -> String {
        self.runtime_type()
            .map(|ty| ty.to_string())
            .unwrap_or_else(|| "null".to_string())
    }
}

/// Ordinary value equality
///
/// Variants must match (`Int(1) != Double(1.0)`), floating point compares
/// bit patterns, containers compare element-wise.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (
                Value::Enum {
                    type_name: ta,
                    variant: va,
                },
                Value::Enum {
                    type_name: tb,
                    variant: vb,
                },
            ) => ta == tb && va == vb,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            _ => false,
        }
    }
}

fn write_elements(f: &mut fmt::Formatter<'_>, elements: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", element)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Byte(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Double(v) => write!(f, "{:?}", v),
            Value::Str(v) => f.write_str(v),
            Value::Enum { variant, .. } => f.write_str(variant),
            Value::Object(object) => {
                write!(f, "{}{{", object.class.name())?;
                for (index, (name, value)) in object.fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                f.write_str("}")
            }
            Value::Array(array) => write!(f, "{}", array),
            Value::List(elements) => write_elements(f, elements),
            Value::Set(set) => write_elements(f, set.as_slice()),
        }
    }
}

impl From<ArrayValue> for Value {
    fn from(array: ArrayValue) -> Self {
        Value::Array(array)
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

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl<T> From<Vec<T>> for Value
where
    ArrayValue: From<Vec<T>>,
{
    fn from(v: Vec<T>) -> Self {
        Value::Array(ArrayValue::from(v))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
