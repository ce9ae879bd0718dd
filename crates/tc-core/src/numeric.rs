use crate::TcError;

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, TcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TcError::NonFinite { what, value: v })
    }
}

/// Positive part of a signal, `max(v, 0)`.
///
/// Thermoregulatory control signals are split into warm and cold halves with this.
#[inline]
pub fn positive_part(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}
