//! Regression models and their curve families
//!
//! A [`RegressionModel`] owns an observed point set, a [`RegressionKind`],
//! and the sampling settings for its curve. [`RegressionModel::fit`] solves
//! for the parameters, renders the equation, and samples the curve, returning
//! everything in a fresh [`FitResult`].
//!
//! Each kind is backed by a [`CurveFamily`]: the formula, its analytic
//! gradient, an initial guess, and an equation template.
//!
//! # Provided Families
//! - [`Monomial`]: `y = Σ cᵢ xⁱ` for orders 0 to 4, solved in closed form.
//! - [`Exponential`]: `y = A·e^(Bx)`
//! - [`Logarithmic`]: `y = A + B·ln(x)`, `x > 0` only
//! - [`Logistic`]: `y = A / (1 + e^(-B(x - C)))`
//! - [`Power`]: `y = A·x^B`, `x > 0` only
//! - [`Sinusoidal`]: `y = A·sin(Bx + C) + D`
//!
//! # Example
//! ```rust
//! # use graphfit::{RegressionModel, test::sample};
//! let data = sample(|x| 2.0 * x + 3.0, 0.0, 5.0, 1.0);
//!
//! let mut model = RegressionModel::polynomial(data, 1).unwrap();
//! model.set_range(0.0, 5.0).unwrap();
//!
//! let fit = model.fit().unwrap();
//! assert_eq!(fit.equation, "y = 2.000x + 3.000");
//! assert_eq!(fit.curve.len(), 51);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    config::FitConfig,
    error::{Error, Result},
    kind::{RegressionKind, MAX_POLYNOMIAL_ORDER},
    range::{FitRange, YClip},
    solver::{self, Parametric},
    statistics,
    value::{extent, CoordExt, Point},
};

pub(crate) mod exponential;
pub use exponential::Exponential;

pub(crate) mod logarithmic;
pub use logarithmic::Logarithmic;

pub(crate) mod logistic;
pub use logistic::Logistic;

pub(crate) mod polynomial;
pub use polynomial::Monomial;

pub(crate) mod power;
pub use power::Power;

pub(crate) mod sinusoidal;
pub use sinusoidal::Sinusoidal;

/// A curve family that can be fitted to observations.
///
/// The default [`CurveFamily::solve`] runs Levenberg-Marquardt from
/// [`CurveFamily::initial_guess`]; families with a closed-form solution
/// override it.
pub trait CurveFamily: Parametric + Send + Sync {
    /// The kind this family implements
    fn kind(&self) -> RegressionKind;

    /// Parameters the iterative solver starts from
    fn initial_guess(&self) -> Vec<f64>;

    /// Renders the equation with the given parameters
    fn format_equation(&self, params: &[f64]) -> String;

    /// Computes the least-squares parameters for `data`.
    ///
    /// # Errors
    /// Returns [`Error::Convergence`] or [`Error::Algebra`] if no solution is found.
    fn solve(&self, data: &[Point], config: &FitConfig) -> Result<Vec<f64>> {
        let solution = solver::levenberg_marquardt(self, data, &self.initial_guess(), config)?;
        Ok(solution.parameters)
    }
}

/// Looks up the curve family for a kind; `None` has no family.
#[must_use]
pub fn family(kind: RegressionKind) -> Option<&'static dyn CurveFamily> {
    let family: &'static dyn CurveFamily = match kind {
        RegressionKind::None => return None,
        RegressionKind::Constant => &polynomial::CONSTANT,
        RegressionKind::Linear => &polynomial::LINEAR,
        RegressionKind::Quadratic => &polynomial::QUADRATIC,
        RegressionKind::Cubic => &polynomial::CUBIC,
        RegressionKind::Quartic => &polynomial::QUARTIC,
        RegressionKind::Exponential => &Exponential,
        RegressionKind::Logarithmic => &Logarithmic,
        RegressionKind::Logistic => &Logistic,
        RegressionKind::Power => &Power,
        RegressionKind::Sinusoidal => &Sinusoidal,
    };
    Some(family)
}

/// Evaluates a fitted kind at `x`.
///
/// Returns `None` for [`RegressionKind::None`] or if `parameters` has the wrong length.
#[must_use]
pub fn evaluate(kind: RegressionKind, parameters: &[f64], x: f64) -> Option<f64> {
    if parameters.len() != kind.parameter_count() {
        return None;
    }
    family(kind).map(|f| f.value(x, parameters))
}

/// The output of a successful fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// The kind that was fitted
    pub kind: RegressionKind,

    /// Fitted parameters. For polynomials, `parameters[i]` is the coefficient of `x^i`.
    pub parameters: Vec<f64>,

    /// The rendered equation, e.g. `y = 2.000x + 3.000`
    pub equation: String,

    /// Curve samples in ascending x order
    pub curve: Vec<Point>,

    /// Smallest and largest y among the curve samples, for axis scaling
    pub y_range: Option<(f64, f64)>,

    /// R² of the fit against the observed points
    pub r_squared: f64,

    /// Mean of the squared residuals over the observed points
    pub mean_squared_error: f64,

    /// Unbiased residual variance, `SS_res / (n - k)`; `0` when `n <= k`
    pub residual_variance: f64,
}
impl FitResult {
    /// Evaluates the fitted curve at `x`
    #[must_use]
    pub fn y(&self, x: f64) -> f64 {
        evaluate(self.kind, &self.parameters, x).unwrap_or(f64::NAN)
    }
}

/// A regression of one kind over an observed point set.
///
/// `fit` never mutates the model, so repeated calls return identical results.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel {
    kind: RegressionKind,
    points: Vec<Point>,
    range: Option<(f64, f64)>,
    step: Option<f64>,
    y_clip: Option<YClip>,
    config: FitConfig,
}
impl RegressionModel {
    /// Creates a new model of the given kind.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] for [`RegressionKind::None`], which has nothing to fit.
    pub fn new(kind: RegressionKind, points: impl Into<Vec<Point>>) -> Result<Self> {
        if kind == RegressionKind::None {
            return Err(Error::invalid("the `None` regression has no model"));
        }

        Ok(Self {
            kind,
            points: points.into(),
            range: None,
            step: None,
            y_clip: None,
            config: FitConfig::default(),
        })
    }

    /// Creates a polynomial model of the given order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `order` is above 4.
    pub fn polynomial(points: impl Into<Vec<Point>>, order: usize) -> Result<Self> {
        if order > MAX_POLYNOMIAL_ORDER {
            return Err(Error::invalid(format!(
                "polynomial order must be in 0..={MAX_POLYNOMIAL_ORDER}, got {order}"
            )));
        }
        Self::new(RegressionKind::polynomial(order)?, points)
    }

    /// Creates an exponential model, `y = A·e^(Bx)`
    #[must_use]
    pub fn exponential(points: impl Into<Vec<Point>>) -> Self {
        Self::of(RegressionKind::Exponential, points)
    }

    /// Creates a logarithmic model, `y = A + B·ln(x)`
    #[must_use]
    pub fn logarithmic(points: impl Into<Vec<Point>>) -> Self {
        Self::of(RegressionKind::Logarithmic, points)
    }

    /// Creates a logistic model, `y = A / (1 + e^(-B(x - C)))`
    #[must_use]
    pub fn logistic(points: impl Into<Vec<Point>>) -> Self {
        Self::of(RegressionKind::Logistic, points)
    }

    /// Creates a power model, `y = A·x^B`
    #[must_use]
    pub fn power(points: impl Into<Vec<Point>>) -> Self {
        Self::of(RegressionKind::Power, points)
    }

    /// Creates a sinusoidal model, `y = A·sin(Bx + C) + D`
    #[must_use]
    pub fn sinusoidal(points: impl Into<Vec<Point>>) -> Self {
        Self::of(RegressionKind::Sinusoidal, points)
    }

    /// Infallible constructor for kinds known not to be `None`
    fn of(kind: RegressionKind, points: impl Into<Vec<Point>>) -> Self {
        Self {
            kind,
            points: points.into(),
            range: None,
            step: None,
            y_clip: None,
            config: FitConfig::default(),
        }
    }

    /// Replaces the solver and sampling settings
    #[must_use]
    pub fn with_config(mut self, config: FitConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the inclusive x-range the curve is sampled over. Required before [`RegressionModel::fit`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if a bound is not finite, if `x_min > x_max`,
    /// or if the range would yield more than [`crate::range::MAX_SAMPLES`] curve samples.
    pub fn set_range(&mut self, x_min: f64, x_max: f64) -> Result<()> {
        FitRange::new(x_min, x_max, self.step())?;
        self.range = Some((x_min, x_max));
        Ok(())
    }

    /// Sets the x-range to the plotting range of the observations.
    ///
    /// See [`FitRange::around`]; the padding comes from this model's [`FitConfig`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if the model has no points or the range is invalid.
    pub fn set_range_around_points(&mut self) -> Result<()> {
        let range = FitRange::around(&self.points, self.step(), &self.config)?;
        self.range = Some((range.x_min(), range.x_max()));
        Ok(())
    }

    /// Overrides the curve sample spacing for this model.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `step` is not positive.
    pub fn set_step(&mut self, step: f64) -> Result<()> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::invalid(format!("step must be positive, got {step}")));
        }
        self.step = Some(step);
        Ok(())
    }

    /// Sets the vertical window for curve samples.
    ///
    /// Only polynomial kinds apply it: samples outside the window are omitted.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if `y_min > y_max`.
    pub fn set_y_limits(&mut self, y_min: f64, y_max: f64) -> Result<()> {
        self.y_clip = Some(YClip::new(y_min, y_max)?);
        Ok(())
    }

    /// The kind of this model
    #[must_use]
    pub fn kind(&self) -> RegressionKind {
        self.kind
    }

    /// The display name of this model, e.g. `Quadratic`
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The observed points
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The configured x-range, if any
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    /// The curve sample spacing in effect
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
            .unwrap_or_else(|| self.kind.default_step(&self.config))
    }

    /// The settings in effect
    #[must_use]
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Checks the observations against the kind's requirements.
    fn validate(&self) -> Result<()> {
        let needed = self.kind.parameter_count();
        if self.points.len() < needed {
            return Err(Error::invalid(format!(
                "{} regression needs at least {needed} points, got {}",
                self.kind,
                self.points.len()
            )));
        }

        if let Some(p) = self.points.iter().find(|p| !p.is_finite()) {
            return Err(Error::invalid(format!("point ({}, {}) is not finite", p.x, p.y)));
        }

        if self.kind.requires_positive_x() {
            if let Some(p) = self.points.iter().find(|p| p.x <= 0.0) {
                return Err(Error::invalid(format!(
                    "{} regression is undefined for x <= 0, got x = {}",
                    self.kind, p.x
                )));
            }
        }

        Ok(())
    }

    /// Fits the model and samples its curve.
    ///
    /// # Returns
    /// A fresh [`FitResult`]; the model itself is untouched.
    ///
    /// # Errors
    /// - [`Error::MissingRange`] if [`RegressionModel::set_range`] was never called
    /// - [`Error::InvalidArgument`] if there are fewer points than parameters, a point is not
    ///   finite, or a logarithmic or power model sees `x <= 0`
    /// - [`Error::Convergence`] if the nonlinear solver does not settle
    /// - [`Error::Algebra`] if the polynomial system cannot be solved
    ///
    /// # Behavior
    /// - Samples `x_min, x_min + step, ...` up to `x_max` inclusive.
    /// - Samples whose y is not finite are omitted.
    /// - For polynomial kinds, samples outside the y-limits are omitted.
    /// - `y_range` is the extent of the emitted samples.
    pub fn fit(&self) -> Result<FitResult> {
        let (x_min, x_max) = self.range.ok_or(Error::MissingRange)?;
        self.config.validate()?;
        let range = FitRange::new(x_min, x_max, self.step())?;
        let family = family(self.kind)
            .ok_or_else(|| Error::invalid("the `None` regression has no model"))?;

        self.validate()?;
        log::debug!(
            "Fitting {} to {} points over {x_min}..={x_max}",
            self.kind,
            self.points.len()
        );

        let parameters = family.solve(&self.points, &self.config)?;
        if parameters.iter().any(|p| !p.is_finite()) {
            return Err(Error::Convergence {
                evaluations: 0,
                cost: f64::NAN,
            });
        }

        let equation = family.format_equation(&parameters);

        let clip = if self.kind.is_polynomial() {
            self.y_clip
        } else {
            None
        };
        let curve: Vec<Point> = range
            .values()
            .map(|x| Point::new(x, family.value(x, &parameters)))
            .filter(|p| p.y.is_finite())
            .filter(|p| clip.map_or(true, |c| c.contains(p.y)))
            .collect();
        let y_range = extent(curve.y_iter());

        let predicted: Vec<f64> = self
            .points
            .iter()
            .map(|p| family.value(p.x, &parameters))
            .collect();
        let r_squared = statistics::r_squared(self.points.y_iter(), predicted.iter().copied());
        let mean_squared_error =
            statistics::mean_squared_error(self.points.y_iter(), predicted.iter().copied());
        let residual_variance = statistics::residual_variance(
            self.points.y_iter(),
            predicted.iter().copied(),
            parameters.len(),
        );

        Ok(FitResult {
            kind: self.kind,
            parameters,
            equation,
            curve,
            y_range,
            r_squared,
            mean_squared_error,
            residual_variance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_close, assert_curve, test::sample, value::points_from_tuples};

    fn scenario() -> Vec<Point> {
        points_from_tuples(&[(1.0, 5.0), (2.0, 3.0), (3.0, 5.0), (4.0, 7.0), (5.0, 11.0)])
    }

    #[test]
    fn test_fit_requires_range() {
        let model = RegressionModel::polynomial(scenario(), 2).unwrap();
        assert!(matches!(model.fit(), Err(Error::MissingRange)));
    }

    #[test]
    fn test_none_has_no_model() {
        assert!(RegressionModel::new(RegressionKind::None, scenario()).is_err());
        assert!(family(RegressionKind::None).is_none());
    }

    #[test]
    fn test_family_kinds_match() {
        for kind in RegressionKind::ALL.into_iter().skip(1) {
            let family = family(kind).unwrap();
            assert_eq!(family.kind(), kind);
            assert_eq!(family.initial_guess().len(), kind.parameter_count());
        }
    }

    #[test]
    fn test_too_few_points() {
        for kind in RegressionKind::ALL.into_iter().skip(1) {
            let points = sample(|x| x, 1.0, 1.0, 1.0); // A single point
            let mut model = RegressionModel::new(kind, points).unwrap();
            model.set_range(1.0, 2.0).unwrap();
            let result = model.fit();
            if kind.parameter_count() > 1 {
                assert!(
                    matches!(result, Err(Error::InvalidArgument(_))),
                    "{kind} accepted a single point"
                );
            } else {
                assert!(result.is_ok());
            }
        }
    }

    #[test]
    fn test_fit_is_repeatable() {
        let mut model = RegressionModel::polynomial(scenario(), 2).unwrap();
        model.set_range(-1.0, 6.0).unwrap();
        let first = model.fit().unwrap();
        let second = model.fit().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.curve.len(), 71);
    }

    #[test]
    fn test_sinusoidal_scenario() {
        let mut model = RegressionModel::sinusoidal(scenario());
        model.set_range(-6.0, 10.0).unwrap();
        let fit = model.fit().unwrap();

        assert_eq!(fit.curve.len(), 321);
        assert_eq!(fit.curve[0].x, -6.0);
        assert!(fit.equation.starts_with("y = "));
        assert!(fit.equation.contains("\\sin{"));
        assert_curve!(fit);
    }

    #[test]
    fn test_y_range_is_a_true_scan() {
        // The extrema of y = (x - 1)^2 over [-1, 3] are 0 at x = 1 and 4 at both ends.
        // First/last sampling would report (4, 4).
        let data = sample(|x| (x - 1.0).powi(2), -1.0, 3.0, 0.5);
        let mut model = RegressionModel::polynomial(data, 2).unwrap();
        model.set_range(-1.0, 3.0).unwrap();
        let fit = model.fit().unwrap();

        let (lo, hi) = fit.y_range.unwrap();
        assert_close!(lo, 0.0, 1e-9);
        assert_close!(hi, 4.0, 1e-9);
        assert_curve!(fit);
    }

    #[test]
    fn test_y_limits_apply_to_polynomials_only() {
        let data = sample(|x| x * x, -3.0, 3.0, 1.0);

        let mut model = RegressionModel::polynomial(data.clone(), 2).unwrap();
        model.set_range(-3.0, 3.0).unwrap();
        model.set_y_limits(0.0, 4.0).unwrap();
        let fit = model.fit().unwrap();
        assert!(fit.curve.iter().all(|p| p.y <= 4.0 + 1e-9));
        assert!(fit.curve.len() < 61);
        assert!(fit.curve.len() > 0);

        let mut model = RegressionModel::exponential(sample(|x| (0.5 * x).exp(), 0.0, 3.0, 0.5));
        model.set_range(0.0, 3.0).unwrap();
        model.set_y_limits(0.0, 1.0).unwrap();
        let fit = model.fit().unwrap();
        assert_eq!(fit.curve.len(), 61);
    }

    #[test]
    fn test_custom_step() {
        let mut model = RegressionModel::logarithmic(sample(|x| 1.0 + 2.0 * x.ln(), 1.0, 5.0, 1.0));
        model.set_step(0.5).unwrap();
        model.set_range(1.0, 5.0).unwrap();
        assert_eq!(model.fit().unwrap().curve.len(), 9);
        assert!(model.set_step(0.0).is_err());
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(RegressionKind::Linear, &[3.0, 2.0], 2.0), Some(7.0));
        assert_eq!(evaluate(RegressionKind::Linear, &[3.0], 2.0), None);
        assert_eq!(evaluate(RegressionKind::None, &[], 2.0), None);
    }

    #[test]
    fn test_oversized_range_is_rejected() {
        let mut model = RegressionModel::polynomial(scenario(), 2).unwrap();
        assert!(matches!(model.set_range(0.0, 1e12), Err(Error::InvalidArgument(_))));
        assert!(matches!(model.set_range(-1e308, 1e308), Err(Error::InvalidArgument(_))));
        assert_eq!(model.range(), None);

        // A later step change is caught at fit time
        model.set_range(0.0, 10.0).unwrap();
        model.set_step(1e-9).unwrap();
        assert!(matches!(model.fit(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_range_around_points() {
        let mut model = RegressionModel::polynomial(scenario(), 1).unwrap();
        model.set_range_around_points().unwrap();
        let (lo, hi) = model.range().unwrap();
        assert_close!(lo, -0.25, 1e-12);
        assert_close!(hi, 5.25, 1e-12);

        let mut model = model.with_config(FitConfig {
            padding: 0.0,
            ..FitConfig::default()
        });
        model.set_range_around_points().unwrap();
        assert_eq!(model.range(), Some((0.0, 5.0)));
    }

    #[test]
    fn test_fit_statistics() {
        // Least-squares line through the scenario is y = 1.6x + 1.4
        let mut model = RegressionModel::polynomial(scenario(), 1).unwrap();
        model.set_range(0.0, 6.0).unwrap();
        let fit = model.fit().unwrap();

        assert_close!(fit.parameters[1], 1.6, 1e-10);
        assert_close!(fit.parameters[0], 1.4, 1e-10);
        assert_close!(fit.mean_squared_error, 11.2 / 5.0, 1e-10);
        assert_close!(fit.residual_variance, 11.2 / 3.0, 1e-10);
        assert_close!(fit.r_squared, 1.0 - 11.2 / 36.8, 1e-10);
    }

    #[test]
    fn test_convergence_budget_surfaces_from_fit() {
        let data = sample(|x| 2.0 * (0.5 * x).exp(), 0.0, 4.0, 0.5);
        let config = FitConfig {
            max_iterations: 1,
            ..FitConfig::default()
        };
        let mut model = RegressionModel::exponential(data).with_config(config);
        model.set_range(0.0, 4.0).unwrap();
        assert!(matches!(model.fit(), Err(Error::Convergence { .. })));
    }

    #[test]
    fn test_convergence_on_overflowing_data() {
        // e^x at the initial guess overflows long before x = 1000
        let data = sample(|x| 2.0 * (0.001 * x).exp(), 0.0, 1000.0, 50.0);
        let mut model = RegressionModel::exponential(data);
        model.set_range(0.0, 1000.0).unwrap();
        assert!(matches!(
            model.fit(),
            Err(Error::Convergence { evaluations: 0, .. })
        ));
    }

    #[test]
    fn test_fit_result_serializes() {
        let mut model = RegressionModel::polynomial(scenario(), 1).unwrap();
        model.set_range(0.0, 1.0).unwrap();
        let fit = model.fit().unwrap();
        let json = serde_json::to_string(&fit).unwrap();
        let back: FitResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, RegressionKind::Linear);
        assert_eq!(back.equation, fit.equation);
        assert!(json.contains("\"mean_squared_error\""));
        assert_eq!(back.residual_variance, fit.residual_variance);
    }
}
