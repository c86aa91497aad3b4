//! Linear interpolation and clamping primitives shared by the calculators and the time scale.

use num_traits::Float;

/// Trait for a type that supports the standard `lerp` (**l**inear int**erp**olation) operation.
///
/// `Lerp` assumes a normalized `x` value, such that _x0_ = 0 and _x1_ = 1, which reduces the
/// straight-line equation to:
///
/// `lerp(y0, y1, x) = y0 + x(y1 - y0)`
///
/// The result is exact at both ends (`x = 0` gives `y0`, `x = 1` gives `y1`), which the
/// calculators rely on so that saturated progress maps onto the nominal range boundary.
///
/// # Example
///
/// ```
/// use flipbook_core::interpolation::Lerp;
///
/// let y0: f64 = 5.0;
/// let y1: f64 = 15.0;
///
/// assert_eq!(y0.lerp(&y1, 0.0), 5.0);
/// assert_eq!(y0.lerp(&y1, 0.25), 7.5);
/// assert_eq!(y0.lerp(&y1, 1.0), 15.0);
/// ```
pub trait Lerp {
    /// Computes the linear interpolation between this value (`y0`) and a second (`y1`) value of the
    /// same type, at normalized position `x`. Values of `x` outside `[0, 1]` extrapolate.
    fn lerp(&self, y1: &Self, x: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, y1: &Self, x: f64) -> Self {
        if x == 1.0 {
            *y1
        } else {
            self + (y1 - self) * x
        }
    }
}

impl Lerp for f32 {
    fn lerp(&self, y1: &Self, x: f64) -> Self {
        (*self as f64).lerp(&(*y1 as f64), x) as f32
    }
}

/// Inverse of [`Lerp`]: the normalized position of `x` inside `[min, max]`.
///
/// A degenerate interval (`min == max`) has no interior, so any `x` is considered to have fully
/// traversed it and the result saturates to `1.0` rather than producing NaN.
pub fn normalize<T: Float>(x: T, min: T, max: T) -> T {
    let position = (x - min) / (max - min);
    if position.is_finite() {
        position
    } else {
        T::one()
    }
}

/// Restricts `value` to the interval spanned by `a` and `b`, in whichever order they are given.
pub fn clamp_between<T: Float>(value: T, a: T, b: T) -> T {
    num_traits::clamp(value, a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_increasing_range() {
        assert_eq!(0.0f64.lerp(&100.0, 0.0), 0.0);
        assert_eq!(0.0f64.lerp(&100.0, 0.25), 25.0);
        assert_eq!(0.0f64.lerp(&100.0, 1.0), 100.0);
    }

    #[test]
    fn lerp_decreasing_range() {
        assert_eq!(100.0f64.lerp(&-100.0, 0.0), 100.0);
        assert_eq!(100.0f64.lerp(&-100.0, 0.75), -50.0);
        assert_eq!(100.0f64.lerp(&-100.0, 1.0), -100.0);
    }

    #[test]
    fn lerp_narrow_type() {
        assert_relative_eq!(1.25e5f32.lerp(&6.77e5, 0.4), 3.458e5f32);
    }

    #[test]
    fn lerp_empty_range() {
        assert_eq!(0.5f64.lerp(&0.5, 0.0), 0.5);
        assert_eq!(0.5f64.lerp(&0.5, 0.123), 0.5);
        assert_eq!(0.5f64.lerp(&0.5, 1.0), 0.5);
    }

    #[test]
    fn normalize_maps_interval_to_unit() {
        assert_eq!(normalize(-50.0, -100.0, 100.0), 0.25);
        assert_eq!(normalize(100.0, -100.0, 100.0), 1.0);
    }

    #[test]
    fn when_interval_is_single_point_then_normalize_saturates() {
        assert_eq!(normalize(0.0, 0.0, 0.0), 1.0);
        assert_eq!(normalize(5.0f32, 5.0, 5.0), 1.0);
    }

    #[test]
    fn clamp_between_accepts_either_order() {
        assert_eq!(clamp_between(1.5, 0.0, 1.0), 1.0);
        assert_eq!(clamp_between(1.5, 1.0, 0.0), 1.0);
        assert_eq!(clamp_between(-0.5, 1.0, 0.0), 0.0);
        assert_eq!(clamp_between(0.3, 1.0, 0.0), 0.3);
    }
}
