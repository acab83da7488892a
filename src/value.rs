//! Sample points and iteration utilities for curves.
//!
//! # Types
//!
//! - [`Point`]: An immutable `(x, y)` observation.
//! - [`CoordExt`]: Coordinate accessors and extent scans over point slices.
//! - [`SteppedValues`]: An evenly spaced, inclusive iterator over an x-range,
//!   used to generate curve samples.
//!
//! # Example
//!
//! ```rust
//! use graphfit::value::{CoordExt, Point, SteppedValues};
//!
//! let points = [Point::new(1.0, 5.0), Point::new(2.0, 3.0)];
//! assert_eq!(points.x_range(), Some((1.0, 2.0)));
//!
//! // 0.0, 0.1, ..., 1.0
//! let xs: Vec<f64> = SteppedValues::new(0.0, 1.0, 0.1).collect();
//! assert_eq!(xs.len(), 11);
//! ```
use serde::{Deserialize, Serialize};

/// A single `(x, y)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}
impl Point {
    /// Creates a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Converts a slice of tuples into points.
#[must_use]
pub fn points_from_tuples(data: &[(f64, f64)]) -> Vec<Point> {
    data.iter().copied().map(Point::from).collect()
}

/// Extension trait for accessing the `x` and `y` coordinates of a point set.
///
/// # Examples
///
/// ```
/// # use graphfit::value::{CoordExt, Point};
/// let data = vec![Point::new(1.5, -2.0), Point::new(2.0, 3.0), Point::new(0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// ```
pub trait CoordExt {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = f64>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = f64>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<f64> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<f64> {
        self.y_iter().collect()
    }

    /// Returns `(min, max)` of the x-coordinates, or `None` if empty.
    fn x_range(&self) -> Option<(f64, f64)> {
        extent(self.x_iter())
    }

    /// Returns `(min, max)` of the y-coordinates, or `None` if empty.
    fn y_range(&self) -> Option<(f64, f64)> {
        extent(self.y_iter())
    }
}
impl CoordExt for [Point] {
    fn x_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|p| p.y)
    }
}
impl CoordExt for Vec<Point> {
    fn x_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = f64> {
        self.iter().map(|p| p.y)
    }
}

/// Scans an iterator for its minimum and maximum.
pub(crate) fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| {
        Some(match acc {
            Some((min, max)) => (f64::min(min, v), f64::max(max, v)),
            None => (v, v),
        })
    })
}

/// Iterator over a range of floating-point values with a specified step.
///
/// Yields `start + i * step` for `i = 0..len`, where
/// `len = floor((end - start) / step) + 1`. Values are computed from the
/// index rather than accumulated, so long ranges do not drift.
#[derive(Debug, Clone)]
pub struct SteppedValues {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}
impl SteppedValues {
    /// Relative slack applied before flooring the step count, so that
    /// `16.0 / 0.05` counts as 320 steps rather than 319.
    const SLACK: f64 = 1e-9;

    /// Creates a new iterator over stepped values in `start..=end`
    ///
    /// Yields nothing if `end < start`, `step <= 0`, or any input is not finite.
    #[must_use]
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            step,
            index: 0,
            len: Self::count(start, end, step),
        }
    }

    /// Number of values `start..=end` yields at `step`
    ///
    /// Saturates at `usize::MAX` for spans too long to count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn count(start: f64, end: f64, step: f64) -> usize {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) || step <= 0.0 || end < start
        {
            return 0;
        }

        let steps = (end - start) / step;
        let steps = (steps + steps.max(1.0) * Self::SLACK).floor();
        if steps.is_nan() {
            return 0;
        }

        // Float to int casts saturate, the +1 must too
        (steps as usize).saturating_add(1)
    }

    /// Returns the number of values remaining in the iterator
    #[must_use]
    pub fn len(&self) -> usize {
        self.len - self.index
    }

    /// Returns true if the iterator is exhausted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl Iterator for SteppedValues {
    type Item = f64;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }

        let value = self.start + self.index as f64 * self.step;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl ExactSizeIterator for SteppedValues {}
