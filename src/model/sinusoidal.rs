use crate::{display, kind::RegressionKind, model::CurveFamily, solver::Parametric};

/// Sine wave, `y = A·sin(Bx + C) + D`.
///
/// Parameters are `[A, B, C, D]`: amplitude, angular frequency, phase and
/// vertical offset. The fit starts from `[0, 0, 1, 1]`, so it finds a local
/// minimum near a low-frequency wave; wildly oscillating data may settle on
/// a poor fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sinusoidal;
impl Parametric for Sinusoidal {
    fn value(&self, x: f64, params: &[f64]) -> f64 {
        let (a, b, c, d) = (params[0], params[1], params[2], params[3]);
        a * (b * x + c).sin() + d
    }

    fn gradient(&self, x: f64, params: &[f64], out: &mut [f64]) {
        let (a, b, c) = (params[0], params[1], params[2]);
        let (sin, cos) = (b * x + c).sin_cos();
        out[0] = sin;
        out[1] = a * x * cos;
        out[2] = a * cos;
        out[3] = 1.0;
    }
}
impl CurveFamily for Sinusoidal {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Sinusoidal
    }

    fn initial_guess(&self) -> Vec<f64> {
        vec![0.0, 0.0, 1.0, 1.0]
    }

    fn format_equation(&self, params: &[f64]) -> String {
        display::format_sinusoidal(params[0], params[1], params[2], params[3])
    }
}
