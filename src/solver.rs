//! Least-squares solvers
//!
//! - [`least_squares`] solves a linear system in closed form, using the SVD of
//!   the design matrix. This is what the polynomial kinds use.
//! - [`levenberg_marquardt`] iteratively minimizes the squared residuals of a
//!   [`Parametric`] function using its analytic gradient. This is what every
//!   other kind uses.
//!
//! Both are deterministic: the same data and initial guess always produce the
//! same parameters.
use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt};
use nalgebra::{storage::Owned, DMatrix, DVector, Dyn, SVD};

use crate::{
    config::FitConfig,
    error::{Error, Result},
    value::Point,
};

/// A function `y = f(x; p)` with an analytic gradient in `p`.
pub trait Parametric {
    /// Evaluates the function at `x` with parameters `params`
    fn value(&self, x: f64, params: &[f64]) -> f64;

    /// Writes `∂f/∂p_j` at `x` into `out[j]` for every parameter
    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]);
}

/// Outcome of a nonlinear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Fitted parameters, in the order of the initial guess
    pub parameters: Vec<f64>,

    /// Residual evaluations performed
    pub evaluations: usize,

    /// Sum of squared residuals at `parameters`
    pub cost: f64,
}

/// Solves `design * c = y` in the least-squares sense.
///
/// The `n x k` design matrix is decomposed directly; singular values below
/// `ε · max(n, k) · σ_max` are treated as zero.
///
/// # Errors
/// Returns [`Error::Algebra`] if the system cannot be solved or produces non-finite coefficients.
pub fn least_squares(design: &DMatrix<f64>, y: &DVector<f64>) -> Result<Vec<f64>> {
    let size = design.shape();
    let decomp = SVD::new(design.clone(), true, true);

    // ~= machine_epsilon * max(size) * max_singular
    let max_size = size.0.max(size.1) as f64;
    let sigma_max = decomp.singular_values.max();
    let epsilon = f64::EPSILON * max_size * sigma_max;

    let solution = decomp.solve(y, epsilon).map_err(Error::Algebra)?;
    if solution.iter().any(|c| !c.is_finite()) {
        return Err(Error::Algebra("Non-finite value in coefficients"));
    }

    Ok(solution.data.into())
}

/// Adapts a [`Parametric`] function and its data to the solver's problem interface.
///
/// Residuals are `f(x) - y`, so the Jacobian is the gradient of `f`.
struct CurveProblem<'a, F: ?Sized> {
    function: &'a F,
    data: &'a [Point],
    params: DVector<f64>,
}

impl<F: Parametric + ?Sized> LeastSquaresProblem<f64, Dyn, Dyn> for CurveProblem<'_, F> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, x: &nalgebra::Vector<f64, Dyn, Self::ParameterStorage>) {
        self.params.copy_from(x);
    }

    fn params(&self) -> nalgebra::Vector<f64, Dyn, Self::ParameterStorage> {
        self.params.clone_owned()
    }

    fn residuals(&self) -> Option<nalgebra::Vector<f64, Dyn, Self::ResidualStorage>> {
        let params = self.params.as_slice();
        Some(DVector::from_iterator(
            self.data.len(),
            self.data.iter().map(|p| self.function.value(p.x, params) - p.y),
        ))
    }

    fn jacobian(&self) -> Option<nalgebra::Matrix<f64, Dyn, Dyn, Self::JacobianStorage>> {
        let params = self.params.as_slice();
        let mut jacobian = DMatrix::zeros(self.data.len(), params.len());
        let mut row = vec![0.0; params.len()];
        for (i, p) in self.data.iter().enumerate() {
            self.function.gradient(p.x, params, &mut row);
            for (j, &g) in row.iter().enumerate() {
                jacobian[(i, j)] = g;
            }
        }

        if jacobian.iter().all(|v| v.is_finite()) {
            Some(jacobian)
        } else {
            None
        }
    }
}

/// Minimizes `Σ (f(x; p) - y)²` starting from `initial`.
///
/// `config.tolerance` bounds both the relative cost reduction and the relative
/// parameter step at convergence. `config.max_iterations` is the solver's
/// patience: at most `max_iterations · (k + 1)` residual evaluations for `k`
/// parameters.
///
/// # Errors
/// Returns [`Error::Convergence`] if:
/// - The cost or Jacobian at the initial guess is not finite
/// - The evaluation budget runs out before convergence
/// - The solver reports no further improvement is possible, or a numerical failure
pub fn levenberg_marquardt<F: Parametric + ?Sized>(
    function: &F,
    data: &[Point],
    initial: &[f64],
    config: &FitConfig,
) -> Result<Solution> {
    let problem = CurveProblem {
        function,
        data,
        params: DVector::from_column_slice(initial),
    };

    let start = problem.residuals().map_or(f64::NAN, |r| r.norm_squared());
    if !start.is_finite() || problem.jacobian().is_none() {
        return Err(Error::Convergence {
            evaluations: 0,
            cost: start,
        });
    }

    let (problem, report) = LevenbergMarquardt::new()
        .with_tol(config.tolerance)
        .with_patience(config.max_iterations)
        .minimize(problem);

    let cost = 2.0 * report.objective_function;
    if !report.termination.was_successful() {
        log::debug!(
            "Solver stopped: {:?} after {} evaluations [cost: {cost:e}]",
            report.termination,
            report.number_of_evaluations
        );
        return Err(Error::Convergence {
            evaluations: report.number_of_evaluations,
            cost,
        });
    }

    let parameters: Vec<f64> = problem.params.iter().copied().collect();
    if parameters.iter().any(|p| !p.is_finite()) {
        return Err(Error::Convergence {
            evaluations: report.number_of_evaluations,
            cost,
        });
    }

    log::debug!(
        "Solver converged after {} evaluations [cost: {cost:e}]",
        report.number_of_evaluations
    );
    Ok(Solution {
        parameters,
        evaluations: report.number_of_evaluations,
        cost,
    })
}
