// Imports
use thiserror::Error;

/// Decoration parameters violate a geometric precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decoration parameters: {0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// A new validation error with the given message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Returns an error with the message produced by `msg` if `cond` does not hold.
pub fn ensure(cond: bool, msg: impl FnOnce() -> String) -> Result<(), ValidationError> {
    if cond {
        Ok(())
    } else {
        Err(ValidationError(msg()))
    }
}

/// Ensures that the value is finite and strictly positive.
pub fn ensure_positive(name: &str, value: f64) -> Result<(), ValidationError> {
    ensure(value.is_finite() && value > 0.0, || {
        format!("{name} must be > 0, is `{value}`")
    })
}

/// Ensures that the value is finite and not negative.
pub fn ensure_non_negative(name: &str, value: f64) -> Result<(), ValidationError> {
    ensure(value.is_finite() && value >= 0.0, || {
        format!("{name} must be >= 0, is `{value}`")
    })
}

/// Ensures that at least `min` points are given.
pub fn ensure_min_points(
    name: &str,
    points: &[na::Vector2<f64>],
    min: usize,
) -> Result<(), ValidationError> {
    ensure(points.len() >= min, || {
        format!(
            "{name} needs at least {min} points, got {}",
            points.len()
        )
    })
}
