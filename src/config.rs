//! Tunable settings for curve generation and the nonlinear solver
//!
//! None of these values are invariants of the fitted models; they only
//! control sampling density, solver effort and plot padding.
//!
//! ```rust
//! # use graphfit::config::FitConfig;
//! let config = FitConfig::from_json(r#"{ "transcendental_step": 0.01 }"#).unwrap();
//! assert_eq!(config.transcendental_step, 0.01);
//! assert_eq!(config.polynomial_step, 0.1); // Missing keys keep their defaults
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings shared by every regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Spacing between curve samples for polynomial kinds
    pub polynomial_step: f64,

    /// Spacing between curve samples for exponential, logarithmic, logistic, power and sinusoidal kinds
    pub transcendental_step: f64,

    /// Patience of the nonlinear solver; it evaluates the residuals at most
    /// `max_iterations · (parameters + 1)` times
    pub max_iterations: usize,

    /// Relative tolerance on cost reduction and parameter steps at convergence
    pub tolerance: f64,

    /// Fraction of the data width added on each side by [`crate::range::FitRange::around`]
    pub padding: f64,
}
impl Default for FitConfig {
    fn default() -> Self {
        Self {
            polynomial_step: 0.1,
            transcendental_step: 0.05,
            max_iterations: 10_000,
            tolerance: 1e-10,
            padding: 0.05,
        }
    }
}
impl FitConfig {
    /// Parses a (possibly partial) JSON document.
    ///
    /// # Errors
    /// Returns an error if the document is not valid JSON, or if [`FitConfig::validate`] fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::invalid(format!("`{name}` must be positive, got {v}")))
            }
        };

        positive("polynomial_step", self.polynomial_step)?;
        positive("transcendental_step", self.transcendental_step)?;
        positive("tolerance", self.tolerance)?;

        if self.max_iterations == 0 {
            return Err(Error::invalid("`max_iterations` must be at least 1"));
        }

        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::invalid(format!(
                "`padding` must be non-negative, got {}",
                self.padding
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::default();
        assert_eq!(config.polynomial_step, 0.1);
        assert_eq!(config.transcendental_step, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = FitConfig::from_json(r#"{ "max_iterations": 50, "padding": 0.0 }"#).unwrap();
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.padding, 0.0);
        assert_eq!(config.tolerance, 1e-10);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            FitConfig::from_json(r#"{ "polynomial_step": 0.0 }"#),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            FitConfig::from_json(r#"{ "max_iterations": 0 }"#),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            FitConfig::from_json("not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("graphfit-config-does-not-exist.json");
        assert!(matches!(FitConfig::load(path), Err(Error::Io(_))));
    }
}
