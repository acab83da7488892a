//! The closed set of regression kinds
//!
//! [`RegressionKind`] is the discriminator persisted alongside a graph. Its
//! [`RegressionKind::name`] is the `modelName` string written to storage, and
//! [`std::str::FromStr`] is the dispatch table used to rebuild a live model.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::FitConfig,
    error::{Error, Result},
};

/// Highest supported polynomial order
pub const MAX_POLYNOMIAL_ORDER: usize = 4;

/// Every curve family a graph can be fitted with, plus `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegressionKind {
    /// No regression; only the raw points are shown
    #[default]
    None,
    /// Polynomial of order 0, `y = c`
    Constant,
    /// Polynomial of order 1
    Linear,
    /// Polynomial of order 2
    Quadratic,
    /// Polynomial of order 3
    Cubic,
    /// Polynomial of order 4
    Quartic,
    /// `y = A·e^(Bx)`
    Exponential,
    /// `y = A + B·ln(x)`
    Logarithmic,
    /// `y = A / (1 + e^(-B(x - C)))`
    Logistic,
    /// `y = A·x^B`
    Power,
    /// `y = A·sin(Bx + C) + D`
    Sinusoidal,
}
impl RegressionKind {
    /// Every kind, in display order
    pub const ALL: [Self; 11] = [
        Self::None,
        Self::Constant,
        Self::Linear,
        Self::Quadratic,
        Self::Cubic,
        Self::Quartic,
        Self::Exponential,
        Self::Logarithmic,
        Self::Logistic,
        Self::Power,
        Self::Sinusoidal,
    ];

    /// The persisted and displayed model name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Constant => "Constant",
            Self::Linear => "Linear",
            Self::Quadratic => "Quadratic",
            Self::Cubic => "Cubic",
            Self::Quartic => "Quartic",
            Self::Exponential => "Exponential",
            Self::Logarithmic => "Logarithmic",
            Self::Logistic => "Logistic",
            Self::Power => "Power",
            Self::Sinusoidal => "Sinusoidal",
        }
    }

    /// The polynomial kind for a given order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `order` is above [`MAX_POLYNOMIAL_ORDER`].
    pub fn polynomial(order: usize) -> Result<Self> {
        Ok(match order {
            0 => Self::Constant,
            1 => Self::Linear,
            2 => Self::Quadratic,
            3 => Self::Cubic,
            4 => Self::Quartic,
            _ => {
                return Err(Error::invalid(format!(
                    "polynomial order must be in 0..={MAX_POLYNOMIAL_ORDER}, got {order}"
                )))
            }
        })
    }

    /// Polynomial order, or `None` for non-polynomial kinds
    #[must_use]
    pub const fn order(self) -> Option<usize> {
        match self {
            Self::Constant => Some(0),
            Self::Linear => Some(1),
            Self::Quadratic => Some(2),
            Self::Cubic => Some(3),
            Self::Quartic => Some(4),
            _ => None,
        }
    }

    /// True for `Constant` through `Quartic`
    #[must_use]
    pub const fn is_polynomial(self) -> bool {
        self.order().is_some()
    }

    /// Number of fitted parameters; zero for `None`
    #[must_use]
    pub const fn parameter_count(self) -> usize {
        match self {
            Self::None => 0,
            Self::Exponential | Self::Logarithmic | Self::Power => 2,
            Self::Logistic => 3,
            Self::Sinusoidal => 4,
            Self::Constant | Self::Linear | Self::Quadratic | Self::Cubic | Self::Quartic => {
                match self.order() {
                    Some(order) => order + 1,
                    None => 0,
                }
            }
        }
    }

    /// True if the model is undefined for `x <= 0`
    #[must_use]
    pub const fn requires_positive_x(self) -> bool {
        matches!(self, Self::Logarithmic | Self::Power)
    }

    /// Curve sample spacing this kind uses by default
    #[must_use]
    pub fn default_step(self, config: &FitConfig) -> f64 {
        if self.is_polynomial() {
            config.polynomial_step
        } else {
            config.transcendental_step
        }
    }
}
impl fmt::Display for RegressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for RegressionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownModelKind(s.to_string()))
    }
}
