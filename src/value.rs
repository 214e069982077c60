// Shared value helpers for the composition pipeline

use serde_json::Value;

/// True when every value in the slice is a JSON number.
///
/// Drives both the domain sort gate and the axis-type decision. Numeric-looking
/// strings do not count as numbers.
pub fn all_numeric(values: &[Value]) -> bool {
    values.iter().all(Value::is_number)
}

/// Value equality with numbers compared numerically.
///
/// serde_json stores 1 and 1.0 as different number variants; both must land in
/// the same x slot. Everything else compares structurally.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(fa), Some(fb)) => fa == fb,
        _ => a == b,
    }
}
