//! Estimated one-rep max.

/// Estimate a one-rep max from a set's load and repetition count.
///
/// Linear Epley-style approximation: `weight + weight * reps / 40`.
/// Non-finite input, or a result too large to represent, yields `0.0`
/// instead of an error.
pub fn estimate_e1rm(weight: f64, reps: f64) -> f64 {
    checked_e1rm(weight, reps).unwrap_or(0.0)
}

/// Like [`estimate_e1rm`], but `None` when the inputs or result are not finite
pub fn checked_e1rm(weight: f64, reps: f64) -> Option<f64> {
    if !weight.is_finite() || !reps.is_finite() {
        return None;
    }
    let e1rm = weight + (weight * reps) / 40.0;
    e1rm.is_finite().then_some(e1rm)
}
