use crate::{display, kind::RegressionKind, model::CurveFamily, solver::Parametric};

/// Logarithmic curve, `y = A + B·ln(x)`.
///
/// Parameters are `[A, B]`. Undefined for `x <= 0`; observations there are
/// rejected before fitting and curve samples there are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logarithmic;
impl Parametric for Logarithmic {
    fn value(&self, x: f64, params: &[f64]) -> f64 {
        params[0] + params[1] * x.ln()
    }

    fn gradient(&self, x: f64, _params: &[f64], out: &mut [f64]) {
        out[0] = 1.0;
        out[1] = x.ln();
    }
}
impl CurveFamily for Logarithmic {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Logarithmic
    }

    fn initial_guess(&self) -> Vec<f64> {
        vec![1.0, 1.0]
    }

    fn format_equation(&self, params: &[f64]) -> String {
        display::format_logarithmic(params[0], params[1])
    }
}
