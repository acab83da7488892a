use crate::{display, kind::RegressionKind, model::CurveFamily, solver::Parametric};

/// Exponential growth or decay, `y = A·e^(Bx)`.
///
/// Parameters are `[A, B]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exponential;
impl Parametric for Exponential {
    fn value(&self, x: f64, params: &[f64]) -> f64 {
        params[0] * (params[1] * x).exp()
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) {
        let e = (params[1] * x).exp();
        out[0] = e;
        out[1] = params[0] * x * e;
    }
}
impl CurveFamily for Exponential {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Exponential
    }

    fn initial_guess(&self) -> Vec<f64> {
        vec![1.0, 1.0]
    }

    fn format_equation(&self, params: &[f64]) -> String {
        display::format_exponential(params[0], params[1])
    }
}
