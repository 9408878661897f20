use deepeq_core::{ArrayValue, Engine, EngineConfig, PrimitiveKind, TypeDesc, Value};

/// Engine with default configuration
#[allow(dead_code)]
pub fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

/// Engine whose auto scheduling goes parallel at `threshold` leaves
#[allow(dead_code)]
pub fn engine_with_threshold(threshold: usize) -> Engine {
    Engine::new(EngineConfig::default().with_parallel_threshold(threshold))
}

#[allow(dead_code)]
pub fn int() -> TypeDesc {
    TypeDesc::Primitive(PrimitiveKind::Int)
}

#[allow(dead_code)]
pub fn integer() -> TypeDesc {
    TypeDesc::Boxed(PrimitiveKind::Int)
}

/// `int[]` from literals
#[allow(dead_code)]
pub fn ints(values: &[i32]) -> Value {
    Value::from(values.to_vec())
}

/// `Integer[]` with optional nulls
#[allow(dead_code)]
pub fn boxed_ints(values: &[Option<i32>]) -> Value {
    let elements = values.iter().map(|v| Value::from(*v)).collect();
    reference_array(integer(), elements)
}

/// Reference array of `component`
///
/// Panics if an element does not fit; test fixtures are built from known
/// good data.
#[allow(dead_code)]
pub fn reference_array(component: TypeDesc, elements: Vec<Value>) -> Value {
    Value::Array(ArrayValue::of(component, elements).unwrap())
}

/// List of `rows` `int[]` rows, `cols` leaves each
#[allow(dead_code)]
pub fn int_matrix(rows: usize, cols: usize) -> Value {
    Value::list((0..rows).map(|row| {
        let values: Vec<i32> = (0..cols).map(|col| (row * cols + col) as i32).collect();
        Value::from(values)
    }))
}

/// Same contents as [`int_matrix`] with boxed rows in a boxed 2D array
#[allow(dead_code)]
pub fn boxed_matrix(rows: usize, cols: usize) -> Value {
    let rows = (0..rows)
        .map(|row| {
            let values: Vec<Option<i32>> = (0..cols).map(|col| Some((row * cols + col) as i32)).collect();
            boxed_ints(&values)
        })
        .collect();
    reference_array(integer().with_rank(1), rows)
}
