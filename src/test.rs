//! Helpers for testing fitted curves.
//!
//! ## Sampling
//!
//! [`sample`] evaluates any closure over an inclusive, evenly spaced range.
//! Great for generating synthetic data sets!
//! ```rust
//! let data = graphfit::test::sample(|x| 2.0 * x + 3.0, 0.0, 10.0, 1.0);
//! assert_eq!(data.len(), 11);
//! ```
//!
//! ## Assertions
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal, either
//! within a few machine epsilons or within an explicit tolerance.
//! - `assert_eq!` equivalent for floats.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] for slices and vectors.
//!
//! ### [`crate::assert_curve`]
//! Asserts that a [`crate::FitResult`] curve is well formed: every sample is
//! finite, x is strictly ascending, and the y-range covers every sample.
use crate::{range::FitRange, value::Point};


/// Tolerance used by the assertion macros when none is given.
///
/// A few machine epsilons, scaled by the magnitude of the operands.
#[must_use]
pub fn epsilon_for(a: f64, b: f64) -> f64 {
    4.0 * f64::EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Evaluates `f` at `x_min, x_min + step, ...` up to `x_max` inclusive.
///
/// Returns an empty set if the range is invalid.
pub fn sample(f: impl Fn(f64) -> f64, x_min: f64, x_max: f64, step: f64) -> Vec<Point> {
    FitRange::new(x_min, x_max, step)
        .map(|range| range.values().map(|x| Point::new(x, f(x))).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close};

    #[test]
    fn test_sample() {
        let data = sample(|x| x * x, -1.0, 1.0, 0.5);
        assert_eq!(data.len(), 5);
        assert_eq!(data[0], Point::new(-1.0, 1.0));
        assert_eq!(data[2], Point::new(0.0, 0.0));
        assert!(sample(|x| x, 1.0, 0.0, 0.5).is_empty());
    }

    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0);
        assert_close!(1.0, 1.001, 0.01);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_fails() {
        assert_close!(1.0, 1.1);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = vec![1.0, 2.0, 3.0];
        let b = [1.0 + 1e-16, 2.0, 3.0];
        assert_all_close!(a, b);
        assert_all_close!(a, [1.01, 2.0, 2.99], 0.02);
    }
}
