//! Tolerant floating point comparison.
//!
//! Layout sums many child extents; a line that "exactly" fits can come out a
//! few ulps over budget. These helpers treat values within a relative epsilon
//! as equal so that such rounding never moves a child to the next line.

/// Relative tolerance scale, a small multiple of machine epsilon.
const TOLERANCE: f64 = 10.0 * f64::EPSILON;

/// True if `a` and `b` are equal within a relative epsilon.
///
/// Equal infinities are close; NaN is never close to anything.
#[inline]
pub fn are_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let eps = (a.abs() + b.abs() + 10.0) * TOLERANCE;
    let delta = a - b;
    -eps < delta && delta < eps
}

/// True if `a > b` and the two are not close.
#[inline]
pub fn greater_than(a: f64, b: f64) -> bool {
    a > b && !are_close(a, b)
}

/// True if `a < b` and the two are not close.
#[inline]
pub fn less_than(a: f64, b: f64) -> bool {
    a < b && !are_close(a, b)
}

/// True if `a` is close to zero.
#[inline]
pub fn is_zero(a: f64) -> bool {
    a.abs() < 10.0 * TOLERANCE
}
