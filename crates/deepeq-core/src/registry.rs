//! Type operator registry
//!
//! Maps an element type to a bundle of array operations for that type:
//! equivalence test, allocation, element store, range copy and deep
//! rendering. Bundles for the primitive and boxed kinds are seeded at
//! construction; every other type is synthesized on first request and cached
//! for the lifetime of the registry.
//!
//! Anything that needs to allocate, copy or render arrays of a type goes
//! through [`OperatorRegistry::get_operators`] so the cache stays
//! authoritative.

use std::sync::Arc;

use crate::errors::{DeepEqError, Result};
use crate::log_op_error;
use crate::memo::Memo;
use crate::model::{ArrayValue, PrimitiveKind, TypeDesc, Value};

pub type EquivalencePredicate = Arc<dyn Fn(&TypeDesc) -> bool + Send + Sync>;
pub type ArrayFactory = Arc<dyn Fn(usize) -> ArrayValue + Send + Sync>;
pub type ElementSetter = Arc<dyn Fn(&mut ArrayValue, usize, Value) -> Result<()> + Send + Sync>;
pub type RangeCopier = Arc<dyn Fn(&ArrayValue, usize, usize) -> Result<ArrayValue> + Send + Sync>;
pub type DeepToString = Arc<dyn Fn(&ArrayValue) -> String + Send + Sync>;

/// Operations for arrays whose component type is `element_type`
pub struct OperatorBundle {
    element_type: TypeDesc,
    array_type: TypeDesc,
    equivalent: EquivalencePredicate,
    array_factory: ArrayFactory,
    element_setter: ElementSetter,
    range_copier: RangeCopier,
    deep_to_string: DeepToString,
}

impl OperatorBundle {
    pub fn element_type(&self) -> &TypeDesc {
        &self.element_type
    }

    /// `element_type[]`
    pub fn array_type(&self) -> &TypeDesc {
        &self.array_type
    }

    /// True if `other` can stand in for this bundle's element type, either
    /// by assignment or as its primitive/boxed equivalent
    pub fn is_equivalent(&self, other: &TypeDesc) -> bool {
        (self.equivalent)(other)
    }

    /// Zero/null-initialized array of `len` elements
    pub fn new_array(&self, len: usize) -> ArrayValue {
        (self.array_factory)(len)
    }

    /// # Errors
    ///
    /// `InvalidArgument` if `array` is not an array of this element type,
    /// `IndexOutOfBounds` / `ElementTypeMismatch` from the store itself.
    pub fn set_element(&self, array: &mut ArrayValue, index: usize, value: Value) -> Result<()> {
        (self.element_setter)(array, index, value)
    }

    /// Copy `[from, to)` into a fresh array; `to` may exceed the source
    /// length, in which case the tail is zero/null-padded
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `from > to`, `from > len`, or `array` is not an
    /// array of this element type.
    pub fn copy_range(&self, array: &ArrayValue, from: usize, to: usize) -> Result<ArrayValue> {
        (self.range_copier)(array, from, to)
    }

    /// `[e0, e1, ...]`, recursing into nested containers, `null` for nulls
    pub fn deep_to_string(&self, array: &ArrayValue) -> String {
        (self.deep_to_string)(array)
    }
}

impl std::fmt::Debug for OperatorBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorBundle")
            .field("element_type", &self.element_type)
            .field("array_type", &self.array_type)
            .finish_non_exhaustive()
    }
}

fn check_component(expected: &TypeDesc, array: &ArrayValue) -> Result<()> {
    let actual = array.component_type();
    if &actual == expected {
        Ok(())
    } else {
        Err(DeepEqError::InvalidArgument {
            reason: format!("expected {}[] but got {}[]", expected, actual),
        })
    }
}

/// Process-wide, append-only cache of operator bundles
pub struct OperatorRegistry {
    bundles: Memo<TypeDesc, Arc<OperatorBundle>>,
}

impl OperatorRegistry {
    /// Registry seeded with the primitive and boxed kinds
    pub fn new() -> Self {
        let registry = Self {
            bundles: Memo::new(),
        };
        for kind in PrimitiveKind::ALL {
            for ty in [TypeDesc::Primitive(kind), TypeDesc::Boxed(kind)] {
                let bundle = registry.build(&ty, primitive_like_predicate(kind));
                registry.bundles.seed(ty, Arc::new(bundle));
            }
        }
        registry
    }

    /// Bundle for arrays of `element_type`, synthesized on first request
    pub fn get_operators(&self, element_type: &TypeDesc) -> Arc<OperatorBundle> {
        self.bundles.get_or_compute(element_type, || {
            tracing::trace!(type_name = %element_type, "synthesizing operator bundle");
            Arc::new(self.synthesize(element_type))
        })
    }

    /// Bundle keyed by the runtime type of `value`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for `Null`, which has no type.
    pub fn operators_of(&self, value: &Value) -> Result<Arc<OperatorBundle>> {
        let Some(ty) = value.runtime_type() else {
            let err = DeepEqError::InvalidArgument {
                reason: "null has no type to look up operators for".to_string(),
            };
            log_op_error!("operators_of", err.clone(), duration_ms = 0);
            return Err(err);
        };
        Ok(self.get_operators(&ty))
    }

    /// Bundle for the component type of an existing array
    pub fn array_operators(&self, array: &ArrayValue) -> Arc<OperatorBundle> {
        self.get_operators(&array.component_type())
    }

    /// Equal, equivalent in either direction, or assignable in either
    /// direction
    pub fn types_compatible(&self, a: &TypeDesc, b: &TypeDesc) -> bool {
        a == b
            || self.get_operators(a).is_equivalent(b)
            || self.get_operators(b).is_equivalent(a)
            || a.is_assignable_from(b)
            || b.is_assignable_from(a)
    }

    /// Number of cached bundles
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    fn synthesize(&self, element_type: &TypeDesc) -> OperatorBundle {
        let equivalent: EquivalencePredicate = match element_type {
            TypeDesc::Array(component) => {
                let component_ops = self.get_operators(component);
                Arc::new(move |other: &TypeDesc| match other {
                    TypeDesc::Array(other_component) => component_ops.is_equivalent(other_component),
                    _ => false,
                })
            }
            TypeDesc::Primitive(kind) | TypeDesc::Boxed(kind) => primitive_like_predicate(*kind),
            _ => {
                let target = element_type.clone();
                Arc::new(move |other: &TypeDesc| target.is_assignable_from(other))
            }
        };
        self.build(element_type, equivalent)
    }

    fn build(&self, element_type: &TypeDesc, equivalent: EquivalencePredicate) -> OperatorBundle {
        let factory_type = element_type.clone();
        let setter_type = element_type.clone();
        let copier_type = element_type.clone();

        OperatorBundle {
            element_type: element_type.clone(),
            array_type: TypeDesc::array_of(element_type.clone()),
            equivalent,
            array_factory: Arc::new(move |len| ArrayValue::zeroed(&factory_type, len)),
            element_setter: Arc::new(move |array, index, value| {
                check_component(&setter_type, array)?;
                array.set(index, value)
            }),
            range_copier: Arc::new(move |array, from, to| {
                check_component(&copier_type, array)?;
                array.copy_range(from, to)
            }),
            deep_to_string: Arc::new(|array| array.to_string()),
        }
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn primitive_like_predicate(kind: PrimitiveKind) -> EquivalencePredicate {
    Arc::new(move |other: &TypeDesc| other.primitive_kind() == Some(kind))
}
