//! Type descriptors
//!
//! `TypeDesc` is the stable identifier the registry and conversion table key
//! their caches on. It models the primitive/boxed split, a small reference
//! hierarchy (`Object`, `Number`, user classes) and array types of any rank.

use std::fmt;
use std::sync::Arc;

/// Primitive-like element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    /// Unboxed name (`int`)
    pub fn primitive_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Boxed name (`Integer`)
    pub fn boxed_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    /// Boxed forms of numeric kinds are subtypes of `Number`
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PrimitiveKind::Boolean | PrimitiveKind::Char)
    }
}

/// A user-declared reference type with an optional superclass
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassDesc {
    name: String,
    parent: Option<Arc<ClassDesc>>,
}

impl ClassDesc {
    /// Root class (direct subclass of `Object`)
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: None,
        })
    }

    pub fn extending(name: impl Into<String>, parent: &Arc<ClassDesc>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Some(parent.clone()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ClassDesc>> {
        self.parent.as_ref()
    }

    /// True if `self` is `other` or one of its ancestors
    pub fn is_ancestor_of(&self, other: &ClassDesc) -> bool {
        let mut current = Some(other);
        while let Some(class) = current {
            if class == self {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }
}

/// Runtime/declared type of a value or container slot
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDesc {
    Primitive(PrimitiveKind),
    Boxed(PrimitiveKind),
    /// Top of the reference hierarchy
    Object,
    /// Supertype of the boxed numeric kinds
    Number,
    String,
    List,
    Set,
    Enum(Arc<str>),
    Class(Arc<ClassDesc>),
    Array(Box<TypeDesc>),
}

impl TypeDesc {
    pub fn array_of(component: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(component))
    }

    /// Wrap this type in `rank` array dimensions
    pub fn with_rank(self, rank: usize) -> Self {
        (0..rank).fold(self, |ty, _| TypeDesc::array_of(ty))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeDesc::Array(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDesc::Primitive(_))
    }

    pub fn is_reference(&self) -> bool {
        !self.is_primitive()
    }

    /// Component type if this is an array type
    pub fn component(&self) -> Option<&TypeDesc> {
        match self {
            TypeDesc::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Innermost non-array type
    pub fn base(&self) -> &TypeDesc {
        let mut current = self;
        while let TypeDesc::Array(component) = current {
            current = component;
        }
        current
    }

    /// Kind of a primitive or boxed type
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDesc::Primitive(kind) | TypeDesc::Boxed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Primitive or boxed after stripping array dimensions
    pub fn is_primitive_like(&self) -> bool {
        self.base().primitive_kind().is_some()
    }

    /// Primitive/boxed counterpart, propagated through array dimensions
    ///
    /// Returns `None` for types with no counterpart (ordinary reference types
    /// and arrays of them).
    pub fn equivalent(&self) -> Option<TypeDesc> {
        match self {
            TypeDesc::Primitive(kind) => Some(TypeDesc::Boxed(*kind)),
            TypeDesc::Boxed(kind) => Some(TypeDesc::Primitive(*kind)),
            TypeDesc::Array(component) => component.equivalent().map(TypeDesc::array_of),
            _ => None,
        }
    }

    /// True if a value of type `other` can be used where `self` is declared
    /// without conversion
    pub fn is_assignable_from(&self, other: &TypeDesc) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (TypeDesc::Object, other) => other.is_reference(),
            (TypeDesc::Number, TypeDesc::Boxed(kind)) => kind.is_numeric(),
            (TypeDesc::Class(target), TypeDesc::Class(source)) => target.is_ancestor_of(source),
            (TypeDesc::Array(target), TypeDesc::Array(source)) => {
                target.is_reference() && source.is_reference() && target.is_assignable_from(source)
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Primitive(kind) => f.write_str(kind.primitive_name()),
            TypeDesc::Boxed(kind) => f.write_str(kind.boxed_name()),
            TypeDesc::Object => f.write_str("Object"),
            TypeDesc::Number => f.write_str("Number"),
            TypeDesc::String => f.write_str("String"),
            TypeDesc::List => f.write_str("List"),
            TypeDesc::Set => f.write_str("Set"),
            TypeDesc::Enum(name) => f.write_str(name),
            TypeDesc::Class(class) => f.write_str(class.name()),
            TypeDesc::Array(component) => write!(f, "{}[]", component),
        }
    }
}
