use crate::{display, kind::RegressionKind, model::CurveFamily, solver::Parametric};

/// Power law, `y = A·x^B`.
///
/// Parameters are `[A, B]`. Only defined for `x > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Power;
impl Parametric for Power {
    fn value(&self, x: f64, params: &[f64]) -> f64 {
        params[0] * x.powf(params[1])
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) {
        let p = x.powf(params[1]);
        out[0] = p;
        out[1] = params[0] * p * x.ln();
    }
}
impl CurveFamily for Power {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Power
    }

    fn initial_guess(&self) -> Vec<f64> {
        vec![1.0, 1.0]
    }

    fn format_equation(&self, params: &[f64]) -> String {
        display::format_power(params[0], params[1])
    }
}
