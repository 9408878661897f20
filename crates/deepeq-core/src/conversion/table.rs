//! Equivalence and conversion table
//!
//! Two memoized lookups sit on top of the operator registry:
//!
//! - [`ConversionTable::get_equivalence`]: per-type entry with the
//!   primitive/boxed counterpart and a converter into it.
//! - [`ConversionTable::get_conversion`]: per-pair converter, derived in a
//!   fixed rule order (identity, equivalent, upcast, element-wise for two
//!   array types, downcast, impossible).
//!
//! Converters never fail loudly: an incompatible value converts to `None`.

use std::sync::Arc;
use std::time::Instant;

use deepeq_core_types::Scheduling;
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::conversion::bundle::{ConversionBundle, ConversionKind};
use crate::errors::{DeepEqError, Result};
use crate::memo::Memo;
use crate::model::{TypeDesc, Value};
use crate::registry::OperatorRegistry;
use crate::{log_op_end, log_op_start};

/// Single-type entry: a type, its counterpart, and a converter into it
#[derive(Debug, Clone)]
pub struct Equivalence {
    ty: TypeDesc,
    is_primitive_like: bool,
    default_value: Option<Value>,
    equivalent_type: TypeDesc,
    converters: ConversionBundle,
}

impl Equivalence {
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    pub fn is_primitive_like(&self) -> bool {
        self.is_primitive_like
    }

    /// Empty instance for container types when configured, `None` otherwise
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Primitive/boxed counterpart; the type itself when there is none
    pub fn equivalent_type(&self) -> &TypeDesc {
        &self.equivalent_type
    }

    /// Converter from `ty` into `equivalent_type`
    pub fn converters(&self) -> &ConversionBundle {
        &self.converters
    }

    pub fn serial(&self, value: &Value) -> Option<Value> {
        self.converters.serial(value)
    }

    pub fn parallel(&self, value: &Value) -> Option<Value> {
        self.converters.parallel(value)
    }

    pub fn auto(&self, value: &Value) -> Option<Value> {
        self.converters.auto(value)
    }
}

pub struct ConversionTable {
    registry: Arc<OperatorRegistry>,
    parallel_threshold: usize,
    empty_array_as_default: bool,
    equivalences: Memo<TypeDesc, Arc<Equivalence>>,
    conversions: Memo<(TypeDesc, TypeDesc), ConversionBundle>,
}

impl ConversionTable {
    pub fn new(registry: Arc<OperatorRegistry>, config: &EngineConfig) -> Self {
        Self {
            registry,
            parallel_threshold: config.parallel_threshold,
            empty_array_as_default: config.empty_array_as_default,
            equivalences: Memo::new(),
            conversions: Memo::new(),
        }
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    pub fn get_equivalence(&self, ty: &TypeDesc) -> Arc<Equivalence> {
        self.equivalences.get_or_compute(ty, || {
            tracing::trace!(type_name = %ty, "building equivalence entry");
            Arc::new(self.build_equivalence(ty))
        })
    }

    pub fn get_conversion(&self, from: &TypeDesc, to: &TypeDesc) -> ConversionBundle {
        let key = (from.clone(), to.clone());
        self.conversions.get_or_compute(&key, || {
            let bundle = self.build_conversion(from, to);
            tracing::trace!(
                type_name = %from,
                target_type = %to,
                kind = ?bundle.kind(),
                "building conversion"
            );
            bundle
        })
    }

    /// Convert `value` into `to` with auto scheduling
    pub fn convert(&self, value: &Value, to: &TypeDesc) -> Option<Value> {
        self.convert_with(value, to, Scheduling::Auto)
    }

    pub fn convert_with(&self, value: &Value, to: &TypeDesc, scheduling: Scheduling) -> Option<Value> {
        let start = Instant::now();
        log_op_start!(
            "convert",
            type_name = %value.type_name(),
            target_type = %to,
            scheduling = %scheduling
        );

        // Null has no runtime type; it fits any reference slot
        let converted = match value.runtime_type() {
            None => (!to.is_primitive()).then_some(Value::Null),
            Some(from) => self.get_conversion(&from, to).apply(value, scheduling),
        };

        log_op_end!(
            "convert",
            duration_ms = start.elapsed().as_millis() as u64,
            element_count = value.container_len().unwrap_or(0),
            result = converted.is_some()
        );
        converted
    }

    /// # Errors
    ///
    /// `Unconvertible` where [`ConversionTable::convert`] returns `None`.
    pub fn try_convert(&self, value: &Value, to: &TypeDesc) -> Result<Value> {
        self.convert(value, to)
            .ok_or_else(|| DeepEqError::Unconvertible {
                from: value.type_name(),
                to: to.to_string(),
            })
    }

    fn build_equivalence(&self, ty: &TypeDesc) -> Equivalence {
        let equivalent_type = ty.equivalent();
        let converters = match (ty, &equivalent_type) {
            (TypeDesc::Primitive(kind) | TypeDesc::Boxed(kind), _) => {
                let kind = *kind;
                ConversionBundle::new(
                    ConversionKind::Equivalent,
                    Arc::new(move |value, _| {
                        (value.primitive_kind() == Some(kind)).then(|| value.clone())
                    }),
                )
            }
            (TypeDesc::Array(component), Some(TypeDesc::Array(target_component))) => {
                let element = self.get_equivalence(component).converters().clone();
                self.elementwise(component, target_component, element, ConversionKind::Equivalent)
            }
            _ => ConversionBundle::identity(ConversionKind::Identity),
        };

        Equivalence {
            ty: ty.clone(),
            is_primitive_like: ty.is_primitive_like(),
            default_value: self.default_value(ty),
            equivalent_type: equivalent_type.unwrap_or_else(|| ty.clone()),
            converters,
        }
    }

    fn default_value(&self, ty: &TypeDesc) -> Option<Value> {
        if !self.empty_array_as_default {
            return None;
        }
        match ty {
            TypeDesc::Array(component) => {
                Some(Value::Array(self.registry.get_operators(component).new_array(0)))
            }
            TypeDesc::List => Some(Value::List(Vec::new())),
            TypeDesc::Set => Some(Value::set([])),
            _ => None,
        }
    }

    fn build_conversion(&self, from: &TypeDesc, to: &TypeDesc) -> ConversionBundle {
        // 1. Identity
        if from == to {
            return ConversionBundle::identity(ConversionKind::Identity);
        }

        // 2. Primitive/boxed counterparts
        if from.equivalent().as_ref() == Some(to) {
            return self.get_equivalence(from).converters().clone();
        }

        // 3. Widening
        if to.is_assignable_from(from) {
            return ConversionBundle::identity(ConversionKind::Upcast);
        }

        // 4. Two array types convert element by element when the components do
        if let (TypeDesc::Array(from_component), TypeDesc::Array(to_component)) = (from, to) {
            let element = self.get_conversion(from_component, to_component);
            if !element.is_possible() {
                return ConversionBundle::impossible();
            }
            return self.elementwise(from_component, to_component, element, ConversionKind::Elementwise);
        }

        // 5. Narrowing, checked per value
        if from.is_assignable_from(to) {
            let target = to.clone();
            return ConversionBundle::new(
                ConversionKind::Downcast,
                Arc::new(move |value, _| match value.runtime_type() {
                    None => (!target.is_primitive()).then_some(Value::Null),
                    Some(actual) if target.is_assignable_from(&actual) => Some(value.clone()),
                    Some(_) => None,
                }),
            );
        }

        ConversionBundle::impossible()
    }

    /// Array converter: convert each element with `element` and store the
    /// results into a fresh `to_component[]` from the registry
    fn elementwise(
        &self,
        from_component: &TypeDesc,
        to_component: &TypeDesc,
        element: ConversionBundle,
        kind: ConversionKind,
    ) -> ConversionBundle {
        let ops = self.registry.get_operators(to_component);
        let source_component = from_component.clone();
        let threshold = self.parallel_threshold;

        ConversionBundle::new(
            kind,
            Arc::new(move |value, scheduling| {
                let source = match value {
                    Value::Array(source) => source,
                    Value::Null => return Some(Value::Null),
                    _ => return None,
                };
                if !source_component.is_assignable_from(&source.component_type()) {
                    return None;
                }

                let len = source.len();
                let converted: Option<Vec<Value>> = if scheduling.is_parallel(len, threshold) {
                    (0..len)
                        .into_par_iter()
                        .map(|index| {
                            source
                                .get(index)
                                .and_then(|item| element.apply(&item, scheduling))
                        })
                        .collect()
                } else {
                    source
                        .iter()
                        .map(|item| element.apply(&item, scheduling))
                        .collect()
                };

                let mut target = ops.new_array(len);
                for (index, item) in converted?.into_iter().enumerate() {
                    ops.set_element(&mut target, index, item).ok()?;
                }
                Some(Value::Array(target))
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArrayValue, PrimitiveKind};

    fn table() -> ConversionTable {
        ConversionTable::new(Arc::new(OperatorRegistry::new()), &EngineConfig::default())
    }

    fn int() -> TypeDesc {
        TypeDesc::Primitive(PrimitiveKind::Int)
    }

    fn integer() -> TypeDesc {
        TypeDesc::Boxed(PrimitiveKind::Int)
    }

    fn boxed_ints(values: &[Option<i32>]) -> Value {
        let elements = values.iter().map(|v| Value::from(*v)).collect();
        match ArrayValue::of(integer(), elements) {
            Ok(array) => Value::Array(array),
            Err(err) => panic!("failed to build Integer[]: {err}"),
        }
    }

    #[test]
    fn test_primitive_equivalence_is_boxed_counterpart() {
        let table = table();
        let entry = table.get_equivalence(&int());
        assert!(entry.is_primitive_like());
        assert_eq!(entry.equivalent_type(), &integer());
        assert_eq!(entry.serial(&Value::Int(5)), Some(Value::Int(5)));
        assert_eq!(entry.default_value(), None);
    }

    #[test]
    fn test_reference_type_equivalence_is_identity() {
        let table = table();
        let entry = table.get_equivalence(&TypeDesc::String);
        assert!(!entry.is_primitive_like());
        assert_eq!(entry.equivalent_type(), &TypeDesc::String);
        assert_eq!(entry.converters().kind(), ConversionKind::Identity);
    }

    #[test]
    fn test_array_equivalence_converts_storage() {
        let table = table();
        let entry = table.get_equivalence(&int().with_rank(1));
        let converted = entry.serial(&Value::from(vec![1i32, 2])).unwrap();
        assert_eq!(converted, boxed_ints(&[Some(1), Some(2)]));
    }

    #[test]
    fn test_boxed_null_cannot_unbox() {
        let table = table();
        let source = boxed_ints(&[Some(1), Some(2), None]);
        assert_eq!(table.convert(&source, &int().with_rank(1)), None);
        assert!(matches!(
            table.try_convert(&source, &int().with_rank(1)),
            Err(DeepEqError::Unconvertible { .. })
        ));
    }

    #[test]
    fn test_rule_order() {
        let table = table();
        let kind = |from: &TypeDesc, to: &TypeDesc| table.get_conversion(from, to).kind();

        assert_eq!(kind(&int(), &int()), ConversionKind::Identity);
        assert_eq!(kind(&int(), &integer()), ConversionKind::Equivalent);
        assert_eq!(kind(&integer(), &TypeDesc::Number), ConversionKind::Upcast);
        assert_eq!(kind(&TypeDesc::Object, &TypeDesc::String), ConversionKind::Downcast);
        assert_eq!(
            kind(&TypeDesc::Object.with_rank(1), &integer().with_rank(1)),
            ConversionKind::Elementwise
        );
        assert_eq!(
            kind(&int().with_rank(1), &TypeDesc::Boxed(PrimitiveKind::Long).with_rank(1)),
            ConversionKind::Impossible
        );
        assert_eq!(kind(&TypeDesc::String, &integer()), ConversionKind::Impossible);
    }

    #[test]
    fn test_downcast_checks_runtime_value() {
        let table = table();
        let bundle = table.get_conversion(&TypeDesc::Object, &TypeDesc::String);
        assert_eq!(bundle.serial(&Value::from("s")), Some(Value::from("s")));
        assert_eq!(bundle.serial(&Value::Int(1)), None);
        assert_eq!(bundle.serial(&Value::Null), Some(Value::Null));
    }

    #[test]
    fn test_object_array_downcasts_elementwise() {
        let table = table();
        let objects = ArrayValue::of(TypeDesc::Object, vec![Value::Int(1), Value::Null]).unwrap();
        let converted = table
            .convert(&Value::Array(objects), &integer().with_rank(1))
            .unwrap();
        assert_eq!(converted, boxed_ints(&[Some(1), None]));

        let mixed = ArrayValue::of(TypeDesc::Object, vec![Value::Int(1), Value::from("x")]).unwrap();
        assert_eq!(table.convert(&Value::Array(mixed), &integer().with_rank(1)), None);
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let table = table();
        let source = Value::from((0..1_000).collect::<Vec<i32>>());
        let bundle = table.get_conversion(&int().with_rank(1), &integer().with_rank(1));
        assert_eq!(bundle.serial(&source), bundle.parallel(&source));
        assert!(bundle.serial(&source).is_some());
    }

    #[test]
    fn test_null_converts_to_references_only() {
        let table = table();
        assert_eq!(table.convert(&Value::Null, &integer()), Some(Value::Null));
        assert_eq!(table.convert(&Value::Null, &int()), None);
    }

    #[test]
    fn test_empty_array_default_when_configured() {
        let config = EngineConfig {
            empty_array_as_default: true,
            ..EngineConfig::default()
        };
        let table = ConversionTable::new(Arc::new(OperatorRegistry::new()), &config);
        let entry = table.get_equivalence(&int().with_rank(1));
        assert_eq!(entry.default_value(), Some(&Value::from(Vec::<i32>::new())));
        assert_eq!(table.get_equivalence(&int()).default_value(), None);
    }
}
