//! Typed array storage
//!
//! Primitive component types are stored unboxed so that `int[]` and
//! `Integer[]` remain distinct runtime types; every other component type is
//! stored as `Value` slots tagged with the declared component.

use std::borrow::Cow;
use std::fmt;

use crate::errors::{DeepEqError, Result};
use crate::model::types::{PrimitiveKind, TypeDesc};
use crate::model::value::Value;

#[derive(Debug, Clone)]
pub enum ArrayValue {
    Boolean(Vec<bool>),
    Byte(Vec<i8>),
    Char(Vec<char>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    /// Reference-component storage
    ///
    /// Built only inside the crate: outside callers go through
    /// [`ArrayValue::of`], which rejects primitive components and elements
    /// the component cannot hold.
    ///
    /// ```compile_fail
    /// use deepeq_core::{ArrayValue, PrimitiveKind, TypeDesc};
    ///
    /// let unchecked = ArrayValue::Ref {
    ///     component: TypeDesc::Primitive(PrimitiveKind::Int),
    ///     elements: Vec::new(),
    /// };
    /// ```
    #[non_exhaustive]
    Ref {
        component: TypeDesc,
        elements: Vec<Value>,
    },
}

impl ArrayValue {
    /// Zero/null-initialized array of `len` elements of `component`
    ///
    /// Crate-internal: allocation goes through the operator registry.
    pub(crate) fn zeroed(component: &TypeDesc, len: usize) -> Self {
        match component {
            TypeDesc::Primitive(kind) => match kind {
                PrimitiveKind::Boolean => ArrayValue::Boolean(vec![false; len]),
                PrimitiveKind::Byte => ArrayValue::Byte(vec![0; len]),
                PrimitiveKind::Char => ArrayValue::Char(vec!['\0'; len]),
                PrimitiveKind::Short => ArrayValue::Short(vec![0; len]),
                PrimitiveKind::Int => ArrayValue::Int(vec![0; len]),
                PrimitiveKind::Long => ArrayValue::Long(vec![0; len]),
                PrimitiveKind::Float => ArrayValue::Float(vec![0.0; len]),
                PrimitiveKind::Double => ArrayValue::Double(vec![0.0; len]),
            },
            other => ArrayValue::Ref {
                component: other.clone(),
                elements: vec![Value::Null; len],
            },
        }
    }

    /// Reference array from existing elements
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `component` is primitive (use the typed
    /// variants), `ElementTypeMismatch` if an element does not fit.
    pub fn of(component: TypeDesc, elements: Vec<Value>) -> Result<Self> {
        if component.is_primitive() {
            return Err(DeepEqError::InvalidArgument {
                reason: format!("{} arrays hold unboxed elements", component),
            });
        }
        for element in &elements {
            check_storable(&component, element)?;
        }
        Ok(ArrayValue::Ref {
            component,
            elements,
        })
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Boolean(v) => v.len(),
            ArrayValue::Byte(v) => v.len(),
            ArrayValue::Char(v) => v.len(),
            ArrayValue::Short(v) => v.len(),
            ArrayValue::Int(v) => v.len(),
            ArrayValue::Long(v) => v.len(),
            ArrayValue::Float(v) => v.len(),
            ArrayValue::Double(v) => v.len(),
            ArrayValue::Ref { elements, .. } => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared component type
    pub fn component_type(&self) -> TypeDesc {
        match self {
            ArrayValue::Boolean(_) => TypeDesc::Primitive(PrimitiveKind::Boolean),
            ArrayValue::Byte(_) => TypeDesc::Primitive(PrimitiveKind::Byte),
            ArrayValue::Char(_) => TypeDesc::Primitive(PrimitiveKind::Char),
            ArrayValue::Short(_) => TypeDesc::Primitive(PrimitiveKind::Short),
            ArrayValue::Int(_) => TypeDesc::Primitive(PrimitiveKind::Int),
            ArrayValue::Long(_) => TypeDesc::Primitive(PrimitiveKind::Long),
            ArrayValue::Float(_) => TypeDesc::Primitive(PrimitiveKind::Float),
            ArrayValue::Double(_) => TypeDesc::Primitive(PrimitiveKind::Double),
            ArrayValue::Ref { component, .. } => component.clone(),
        }
    }

    /// Runtime type of the array itself
    pub fn array_type(&self) -> TypeDesc {
        TypeDesc::array_of(self.component_type())
    }

    /// Element at `index`; unboxed elements are materialized as scalars
    pub fn get(&self, index: usize) -> Option<Cow<'_, Value>> {
        let owned = match self {
            ArrayValue::Boolean(v) => Value::Bool(*v.get(index)?),
            ArrayValue::Byte(v) => Value::Byte(*v.get(index)?),
            ArrayValue::Char(v) => Value::Char(*v.get(index)?),
            ArrayValue::Short(v) => Value::Short(*v.get(index)?),
            ArrayValue::Int(v) => Value::Int(*v.get(index)?),
            ArrayValue::Long(v) => Value::Long(*v.get(index)?),
            ArrayValue::Float(v) => Value::Float(*v.get(index)?),
            ArrayValue::Double(v) => Value::Double(*v.get(index)?),
            ArrayValue::Ref { elements, .. } => return elements.get(index).map(Cow::Borrowed),
        };
        Some(Cow::Owned(owned))
    }

    pub fn iter(&self) -> impl Iterator<Item = Cow<'_, Value>> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    /// Store `value` at `index`
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds`, or `ElementTypeMismatch` when the value does not
    /// fit the component type (including null into unboxed storage).
    pub(crate) fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(DeepEqError::IndexOutOfBounds { index, len });
        }
        let expected = self.component_type();
        match (self, value) {
            (ArrayValue::Boolean(v), Value::Bool(x)) => v[index] = x,
            (ArrayValue::Byte(v), Value::Byte(x)) => v[index] = x,
            (ArrayValue::Char(v), Value::Char(x)) => v[index] = x,
            (ArrayValue::Short(v), Value::Short(x)) => v[index] = x,
            (ArrayValue::Int(v), Value::Int(x)) => v[index] = x,
            (ArrayValue::Long(v), Value::Long(x)) => v[index] = x,
            (ArrayValue::Float(v), Value::Float(x)) => v[index] = x,
            (ArrayValue::Double(v), Value::Double(x)) => v[index] = x,
            (ArrayValue::Ref { component, elements }, value) => {
                check_storable(component, &value)?;
                elements[index] = value;
            }
            (_, value) => {
                return Err(DeepEqError::ElementTypeMismatch {
                    expected: expected.to_string(),
                    found: value.type_name(),
                })
            }
        }
        Ok(())
    }

    /// Copy `[from, to)` into a new array of the same component type,
    /// padding positions past the end with zero/null
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `from > to` or `from > len`.
    pub(crate) fn copy_range(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.len();
        if from > to {
            return Err(DeepEqError::InvalidArgument {
                reason: format!("range start {} exceeds end {}", from, to),
            });
        }
        if from > len {
            return Err(DeepEqError::InvalidArgument {
                reason: format!("range start {} exceeds length {}", from, len),
            });
        }
        Ok(match self {
            ArrayValue::Boolean(v) => ArrayValue::Boolean(padded(v, from, to, false)),
            ArrayValue::Byte(v) => ArrayValue::Byte(padded(v, from, to, 0)),
            ArrayValue::Char(v) => ArrayValue::Char(padded(v, from, to, '\0')),
            ArrayValue::Short(v) => ArrayValue::Short(padded(v, from, to, 0)),
            ArrayValue::Int(v) => ArrayValue::Int(padded(v, from, to, 0)),
            ArrayValue::Long(v) => ArrayValue::Long(padded(v, from, to, 0)),
            ArrayValue::Float(v) => ArrayValue::Float(padded(v, from, to, 0.0)),
            ArrayValue::Double(v) => ArrayValue::Double(padded(v, from, to, 0.0)),
            ArrayValue::Ref {
                component,
                elements,
            } => ArrayValue::Ref {
                component: component.clone(),
                elements: padded(elements, from, to, Value::Null),
            },
        })
    }
}

fn padded<T: Clone>(source: &[T], from: usize, to: usize, fill: T) -> Vec<T> {
    let available = to.min(source.len());
    let mut out = Vec::with_capacity(to - from);
    out.extend_from_slice(&source[from..available]);
    out.resize(to - from, fill);
    out
}

/// Null fits any reference slot; anything else must be assignable
fn check_storable(component: &TypeDesc, value: &Value) -> Result<()> {
    match value.runtime_type() {
        None => Ok(()),
        Some(found) if component.is_assignable_from(&found) => Ok(()),
        Some(found) => Err(DeepEqError::ElementTypeMismatch {
            expected: component.to_string(),
            found: found.to_string(),
        }),
    }
}

fn float_slices_eq<T: Copy, B: PartialEq>(a: &[T], b: &[T], bits: impl Fn(T) -> B) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| bits(*x) == bits(*y))
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArrayValue::Boolean(a), ArrayValue::Boolean(b)) => a == b,
            (ArrayValue::Byte(a), ArrayValue::Byte(b)) => a == b,
            (ArrayValue::Char(a), ArrayValue::Char(b)) => a == b,
            (ArrayValue::Short(a), ArrayValue::Short(b)) => a == b,
            (ArrayValue::Int(a), ArrayValue::Int(b)) => a == b,
            (ArrayValue::Long(a), ArrayValue::Long(b)) => a == b,
            (ArrayValue::Float(a), ArrayValue::Float(b)) => float_slices_eq(a, b, f32::to_bits),
            (ArrayValue::Double(a), ArrayValue::Double(b)) => float_slices_eq(a, b, f64::to_bits),
            (
                ArrayValue::Ref {
                    component: ca,
                    elements: ea,
                },
                ArrayValue::Ref {
                    component: cb,
                    elements: eb,
                },
            ) => ca == cb && ea == eb,
            _ => false,
        }
    }
}

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str("]")
    }
}

impl From<Vec<bool>> for ArrayValue {
    fn from(v: Vec<bool>) -> Self {
        ArrayValue::Boolean(v)
    }
}

impl From<Vec<i8>> for ArrayValue {
    fn from(v: Vec<i8>) -> Self {
        ArrayValue::Byte(v)
    }
}

impl From<Vec<char>> for ArrayValue {
    fn from(v: Vec<char>) -> Self {
        ArrayValue::Char(v)
    }
}

impl From<Vec<i16>> for ArrayValue {
    fn from(v: Vec<i16>) -> Self {
        ArrayValue::Short(v)
    }
}

impl From<Vec<i32>> for ArrayValue {
    fn from(v: Vec<i32>) -> Self {
        ArrayValue::Int(v)
    }
}

impl From<Vec<i64>> for ArrayValue {
    fn from(v: Vec<i64>) -> Self {
        ArrayValue::Long(v)
    }
}

impl From<Vec<f32>> for ArrayValue {
    fn from(v: Vec<f32>) -> Self {
        ArrayValue::Float(v)
    }
}

impl From<Vec<f64>> for ArrayValue {
    fn from(v: Vec<f64>) -> Self {
        ArrayValue::Double(v)
    }
}
