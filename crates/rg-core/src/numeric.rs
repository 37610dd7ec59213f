use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Reject a value that is exactly zero.
///
/// Used for divisors that are configuration inputs (time constants, voltages).
pub fn ensure_nonzero(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v == 0.0 {
        Err(CoreError::InvalidArg { what })
    } else {
        Ok(v)
    }
}

/// Largest absolute value in a series, ignoring NaN entries.
pub fn max_abs(values: &[Real]) -> Real {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(0.0, |acc: Real, v| acc.max(v.abs()))
}
