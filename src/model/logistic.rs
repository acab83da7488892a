use crate::{display, kind::RegressionKind, model::CurveFamily, solver::Parametric};

/// Logistic (sigmoid) curve, `y = A / (1 + e^(-B(x - C)))`.
///
/// Parameters are `[A, B, C]`: the carrying capacity, the growth rate, and
/// the midpoint.
///
/// The sigmoid `s = 1 / (1 + e^(-z))` is evaluated in a form that cannot
/// overflow, and the gradient is written in terms of `s(1 - s)`:
/// - `∂y/∂A = s`
/// - `∂y/∂B = A(x - C)·s(1 - s)`
/// - `∂y/∂C = -AB·s(1 - s)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logistic;
impl Logistic {
    /// Numerically stable `1 / (1 + e^(-z))`
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let e = z.exp();
            e / (1.0 + e)
        }
    }
}
impl Parametric for Logistic {
    fn value(&self, x: f64, params: &[f64]) -> f64 {
        let (a, b, c) = (params[0], params[1], params[2]);
        a * Self::sigmoid(b * (x - c))
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) {
        let (a, b, c) = (params[0], params[1], params[2]);
        let s = Self::sigmoid(b * (x - c));
        let slope = s * (1.0 - s);
        out[0] = s;
        out[1] = a * (x - c) * slope;
        out[2] = -a * b * slope;
    }
}
impl CurveFamily for Logistic {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Logistic
    }

    fn initial_guess(&self) -> Vec<f64> {
        vec![1.0, 1.0, 1.0]
    }

    fn format_equation(&self, params: &[f64]) -> String {
        display::format_logistic(params[0], params[1], params[2])
    }
}
