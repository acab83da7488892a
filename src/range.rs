//! Sampling bounds shared by every regression kind
//!
//! A [`FitRange`] fixes where a fitted curve is sampled: from `x_min` to
//! `x_max` inclusive at a fixed `step`. A [`YClip`] optionally drops
//! polynomial samples that leave a vertical window.
use crate::{
    config::FitConfig,
    error::{Error, Result},
    value::{extent, CoordExt, Point, SteppedValues},
};

/// Largest number of curve samples a [`FitRange`] may yield
pub const MAX_SAMPLES: usize = 1_000_000;

/// Inclusive x-range and sample spacing for curve generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRange {
    x_min: f64,
    x_max: f64,
    step: f64,
}
impl FitRange {
    /// Creates a new range.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if:
    /// - A bound is not finite
    /// - `x_min > x_max`
    /// - `step` is not a positive finite number
    /// - The range would yield more than [`MAX_SAMPLES`] samples
    pub fn new(x_min: f64, x_max: f64, step: f64) -> Result<Self> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(Error::invalid(format!(
                "range bounds must be finite, got {x_min}..={x_max}"
            )));
        }
        if x_min > x_max {
            return Err(Error::invalid(format!(
                "range start {x_min} is greater than its end {x_max}"
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::invalid(format!("step must be positive, got {step}")));
        }

        let samples = SteppedValues::count(x_min, x_max, step);
        if samples > MAX_SAMPLES {
            return Err(Error::invalid(format!(
                "range {x_min}..={x_max} at step {step} needs {samples} samples, the limit is {MAX_SAMPLES}"
            )));
        }

        Ok(Self { x_min, x_max, step })
    }

    /// Builds the plotting range for a point set.
    ///
    /// The data extent is widened to include the origin, so both axes are
    /// always in view, then padded on each side by [`FitConfig::padding`] times its width.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `points` is empty or the resulting range is invalid.
    ///
    /// # Example
    /// ```
    /// # use graphfit::{range::FitRange, value::Point, FitConfig};
    /// let points = [Point::new(1.0, 5.0), Point::new(5.0, 11.0)];
    /// let range = FitRange::around(&points, 0.1, &FitConfig::default()).unwrap();
    /// assert_eq!(range.x_min(), -0.25);
    /// assert_eq!(range.x_max(), 5.25);
    /// ```
    pub fn around(points: &[Point], step: f64, config: &FitConfig) -> Result<Self> {
        let (min, max) = padded_bounds(points.x_iter(), config.padding)
            .ok_or_else(|| Error::invalid("cannot derive a range from an empty point set"))?;
        Self::new(min, max, step)
    }

    /// Lower bound
    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Upper bound
    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Sample spacing
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns a copy with a different step.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `step` is not positive.
    pub fn with_step(self, step: f64) -> Result<Self> {
        Self::new(self.x_min, self.x_max, step)
    }

    /// Number of x values this range yields
    #[must_use]
    pub fn len(&self) -> usize {
        SteppedValues::count(self.x_min, self.x_max, self.step)
    }

    /// Always false for a valid range; present for symmetry with [`FitRange::len`]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the x values `x_min, x_min + step, ...` up to `x_max`
    #[must_use]
    pub fn values(&self) -> SteppedValues {
        SteppedValues::new(self.x_min, self.x_max, self.step)
    }
}

/// Vertical window outside of which polynomial samples are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YClip {
    y_min: f64,
    y_max: f64,
}
impl YClip {
    /// Creates a new clip window.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `y_min > y_max` or either bound is NaN.
    pub fn new(y_min: f64, y_max: f64) -> Result<Self> {
        if y_min.is_nan() || y_max.is_nan() || y_min > y_max {
            return Err(Error::invalid(format!(
                "invalid y limits {y_min}..={y_max}"
            )));
        }
        Ok(Self { y_min, y_max })
    }

    /// Lower bound
    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Upper bound
    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// True if `y` lies inside the window, bounds included
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        (self.y_min..=self.y_max).contains(&y)
    }
}

/// Extent of `values` widened to include zero and padded by `padding * width` on each side.
pub fn padded_bounds(values: impl Iterator<Item = f64>, padding: f64) -> Option<(f64, f64)> {
    let (min, max) = extent(values)?;
    let (min, max) = (min.min(0.0), max.max(0.0));
    let pad = padding * (max - min);
    Some((min - pad, max + pad))
}
