//! Functions for evaluating how well a fitted curve explains its observations
//!
//! # Model Fit / Regression Diagnostics
//! - [`r_squared`]: Proportion of variance explained by the model. Higher is better (0 to 1).
//! - [`residual_variance`]: Unbiased estimate of variance of errors after fitting.
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values. Lower is better.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//!
//! # Examples
//!
//! ```rust
//! use graphfit::statistics::r_squared;
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! assert!(r2 > 0.98);
//! ```

/// Computes the residual variance of a model's predictions.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   n = number of observations, k = number of model parameters
/// ```
/// </div>
///
/// Returns `0.0` when there are no spare degrees of freedom (`n <= k`).
#[allow(clippy::cast_precision_loss)]
pub fn residual_variance(
    y: impl Iterator<Item = f64>,
    y_fit: impl Iterator<Item = f64>,
    k: usize,
) -> f64 {
    let mut ss_total = 0.0;
    let mut n = 0usize;
    for (y, y_fit) in y.zip(y_fit) {
        ss_total += (y - y_fit).powi(2);
        n += 1;
    }

    if n <= k {
        return 0.0;
    }
    ss_total / (n - k) as f64
}

/// Calculate the R-squared value for a set of data.
///
/// R-squared is a number between 0 and 1 that tells you how well the model explains the data:
/// - `0` means the model explains none of the variation.
/// - `1` means the model explains all the variation.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// Flat data (`SS_tot == 0`) scores `1.0` if the model reproduces it and `0.0` otherwise.
pub fn r_squared(y: impl Iterator<Item = f64>, y_fit: impl Iterator<Item = f64>) -> f64 {
    let y: Vec<f64> = y.collect();
    let y_mean = mean(y.iter().copied());

    // Sum of (y - y_fit)^2
    // Sum of (y - y_mean)^2
    let mut ss_total = 0.0;
    let mut ss_residual = 0.0;
    for (y, y_fit) in y.into_iter().zip(y_fit) {
        ss_total += (y - y_mean).powi(2);
        ss_residual += (y - y_fit).powi(2);
    }

    if ss_total == 0.0 {
        return if ss_residual <= f64::EPSILON { 1.0 } else { 0.0 };
    }

    1.0 - (ss_residual / ss_total)
}

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns NaN for an empty sequence.
#[allow(clippy::cast_precision_loss)]
pub fn mean(data: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in data {
        sum += value;
        count += 1;
    }
    sum / count as f64
}

/// Computes the mean squared error (MSE) between two sets of values.
#[allow(clippy::cast_precision_loss)]
pub fn mean_squared_error(y: impl Iterator<Item = f64>, y_fit: impl Iterator<Item = f64>) -> f64 {
    let mut total = 0.0;
    let mut n = 0usize;
    for (y, y_fit) in y.zip(y_fit) {
        total += (y - y_fit).powi(2);
        n += 1;
    }
    total / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_close;

    #[test]
    fn test_r_squared() {
        let y = [1.0, 2.0, 3.0];
        assert_close!(r_squared(y.into_iter(), y.into_iter()), 1.0);

        // Predicting the mean explains nothing
        assert_close!(r_squared(y.into_iter(), [2.0; 3].into_iter()), 0.0);
    }

    #[test]
    fn test_r_squared_flat_data() {
        let y = [4.0; 4];
        assert_eq!(r_squared(y.into_iter(), y.into_iter()), 1.0);
        assert_eq!(r_squared(y.into_iter(), [5.0; 4].into_iter()), 0.0);
    }

    #[test]
    fn test_residual_variance() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let y_fit = [1.0, 2.0, 3.0, 6.0];
        assert_close!(residual_variance(y.into_iter(), y_fit.into_iter(), 2), 2.0);
        assert_eq!(residual_variance(y.into_iter(), y_fit.into_iter(), 4), 0.0);
    }

    #[test]
    fn test_mean_and_mse() {
        assert_close!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
        assert!(mean(std::iter::empty()).is_nan());
        assert_close!(
            mean_squared_error([1.0, 2.0].into_iter(), [2.0, 4.0].into_iter()),
            2.5
        );
    }
}
