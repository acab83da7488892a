use nalgebra::{DMatrix, DVector};

use crate::{
    config::FitConfig,
    display,
    error::Result,
    kind::RegressionKind,
    model::CurveFamily,
    solver::{self, Parametric},
    value::{extent, CoordExt, Point},
};

/// Maps x linearly from the data's extent onto `[-1, 1]`.
///
/// A monomial design matrix built on raw x far from the origin is badly
/// conditioned; built on the normalized x it is not. Coefficients solved in
/// the normalized domain are expanded back with [`DomainNormalizer::denormalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct DomainNormalizer {
    center: f64,
    half_width: f64,
}
impl DomainNormalizer {
    fn from_data(data: &[Point]) -> Self {
        let (min, max) = extent(data.x_iter()).unwrap_or((-1.0, 1.0));
        let half_width = (max - min) / 2.0;
        Self {
            center: min + half_width,
            half_width: if half_width > 0.0 && half_width.is_finite() {
                half_width
            } else {
                1.0
            },
        }
    }

    fn normalize(&self, x: f64) -> f64 {
        (x - self.center) / self.half_width
    }

    /// Rewrites `Σ aᵢ tⁱ`, with `t = (x - center) / half_width`, as `Σ bⱼ xʲ`.
    fn denormalize(&self, coefficients: &[f64]) -> Vec<f64> {
        let scale = self.half_width.recip();
        let shift = -self.center * scale;

        // Horner's method over polynomials: b = b·(shift + scale·x) + aᵢ
        let mut out = vec![0.0; coefficients.len()];
        for &a in coefficients.iter().rev() {
            for j in (0..out.len()).rev() {
                let lower = if j > 0 { out[j - 1] } else { 0.0 };
                out[j] = out[j] * shift + lower * scale;
            }
            out[0] += a;
        }
        out
    }
}

/// Standard monomial polynomial, `y = c₀ + c₁x + … + cₖxᵏ`.
///
/// Parameters are the coefficients in ascending degree, so `params[i]`
/// multiplies `xⁱ`. Fitting is linear in the parameters and is solved in
/// closed form rather than iteratively.
///
/// The solve runs on x mapped to `[-1, 1]`; the reported coefficients are
/// always for the raw x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monomial {
    kind: RegressionKind,
}
impl Monomial {
    /// Creates the family for a polynomial kind
    #[must_use]
    pub const fn new(kind: RegressionKind) -> Self {
        Self { kind }
    }

    /// Number of coefficients, `order + 1`
    #[must_use]
    pub const fn coefficient_count(&self) -> usize {
        self.kind.parameter_count()
    }

    /// Builds the `n x (k+1)` design matrix, one row of `1, t, t², …` per point.
    fn design_matrix(&self, data: &[Point], normalizer: &DomainNormalizer) -> DMatrix<f64> {
        let k = self.coefficient_count();
        let mut matrix = DMatrix::zeros(data.len(), k);
        let mut row = vec![0.0; k];
        for (i, p) in data.iter().enumerate() {
            self.gradient(normalizer.normalize(p.x), &[], &mut row);
            for (j, &v) in row.iter().enumerate() {
                matrix[(i, j)] = v;
            }
        }
        matrix
    }
}

pub(crate) const CONSTANT: Monomial = Monomial::new(RegressionKind::Constant);
pub(crate) const LINEAR: Monomial = Monomial::new(RegressionKind::Linear);
pub(crate) const QUADRATIC: Monomial = Monomial::new(RegressionKind::Quadratic);
pub(crate) const CUBIC: Monomial = Monomial::new(RegressionKind::Cubic);
pub(crate) const QUARTIC: Monomial = Monomial::new(RegressionKind::Quartic);

impl Parametric for Monomial {
    fn value(&self, x: f64, params: &[f64]) -> f64 {
        // Horner's method
        params.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    fn gradient(&self, x: f64, _params: &[f64], out: &mut [f64]) {
        let mut power = 1.0;
        for v in out.iter_mut() {
            *v = power;
            power *= x;
        }
    }
}
impl CurveFamily for Monomial {
    fn kind(&self) -> RegressionKind {
        self.kind
    }

    fn initial_guess(&self) -> Vec<f64> {
        vec![0.0; self.coefficient_count()]
    }

    fn format_equation(&self, params: &[f64]) -> String {
        display::format_polynomial(params)
    }

    fn solve(&self, data: &[Point], _config: &FitConfig) -> Result<Vec<f64>> {
        let normalizer = DomainNormalizer::from_data(data);
        let design = self.design_matrix(data, &normalizer);
        let y = DVector::from_iterator(data.len(), data.y_iter());
        let coefficients = solver::least_squares(&design, &y)?;
        Ok(normalizer.denormalize(&coefficients))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assert_all_close, assert_close, assert_curve, test::sample, value::points_from_tuples,
        RegressionModel,
    };

    #[test]
    fn test_linear_recovery() {
        let data = sample(|x| 2.0 * x + 3.0, 0.0, 10.0, 1.0);
        let mut model = RegressionModel::polynomial(data, 1).unwrap();
        model.set_range(0.0, 10.0).unwrap();
        let fit = model.fit().unwrap();

        assert_all_close!(fit.parameters, [3.0, 2.0], 1e-9);
        assert_eq!(fit.equation, "y = 2.000x + 3.000");
        assert_close!(fit.r_squared, 1.0, 1e-12);
        assert_eq!(fit.curve.len(), 101);
        assert_eq!(fit.curve[0].x, 0.0);
        assert_curve!(fit);
    }

    #[test]
    fn test_exact_points_recover_coefficients() {
        // k + 1 points determine an order k polynomial exactly
        let coefficients = [1.0, -2.0, 0.5, 0.25, -0.125];
        for order in 0..=4 {
            let c = &coefficients[..=order];
            let data = sample(|x| QUARTIC.value(x, c), -2.0, -2.0 + order as f64, 1.0);
            assert_eq!(data.len(), order + 1);

            let mut model = RegressionModel::polynomial(data, order).unwrap();
            model.set_range(-2.0, 2.0).unwrap();
            let fit = model.fit().unwrap();
            assert_all_close!(fit.parameters, c, 1e-8);
        }
    }

    #[test]
    fn test_quadratic_equation() {
        let data = sample(|x| 3.0 * x * x - 2.0 * x + 1.0, -3.0, 3.0, 0.5);
        let mut model = RegressionModel::polynomial(data, 2).unwrap();
        model.set_range(-3.0, 3.0).unwrap();
        let fit = model.fit().unwrap();
        assert_eq!(fit.equation, "y = 3.000x^2 - 2.000x + 1.000");
    }

    #[test]
    fn test_constant_is_the_mean() {
        let data = points_from_tuples(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 6.0)]);
        let mut model = RegressionModel::polynomial(data, 0).unwrap();
        model.set_range(0.0, 3.0).unwrap();
        let fit = model.fit().unwrap();
        assert_close!(fit.parameters[0], 3.0, 1e-12);
        assert_eq!(fit.equation, "y = 3.000");
    }

    #[test]
    fn test_order_above_four() {
        let data = sample(|x| x, 0.0, 10.0, 1.0);
        assert!(RegressionModel::polynomial(data, 5).is_err());
    }

    #[test]
    fn test_noisy_cubic() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let truth = [1.0, 0.5, -1.0, 0.25];
        let data: Vec<Point> = sample(|x| CUBIC.value(x, &truth), -4.0, 4.0, 0.25)
            .into_iter()
            .map(|p| Point::new(p.x, p.y + rng.gen_range(-0.05..0.05)))
            .collect();

        let mut model = RegressionModel::polynomial(data, 3).unwrap();
        model.set_range(-4.0, 4.0).unwrap();
        let fit = model.fit().unwrap();

        assert_all_close!(fit.parameters, truth, 0.1);
        assert!(fit.r_squared > 0.99);
    }

    #[test]
    fn test_offset_quadratic() {
        // Vertex at x = 2000, far from the origin
        let data = sample(|x| 0.5 * (x - 2000.0).powi(2) + 3.0, 2000.0, 2007.0, 1.0);
        assert_eq!(data.len(), 8);

        let mut model = RegressionModel::polynomial(data.clone(), 2).unwrap();
        model.set_range(2000.0, 2007.0).unwrap();
        let fit = model.fit().unwrap();

        assert_close!(fit.parameters[2], 0.5, 1e-10);
        assert_close!(fit.parameters[1], -2000.0, 1e-7);
        assert_close!(fit.parameters[0], 2_000_003.0, 1e-4);
        assert_close!(fit.y(2007.0), 27.5, 1e-6);
        assert_close!(fit.r_squared, 1.0, 1e-9);
        for p in &data {
            assert_close!(fit.y(p.x), p.y, 1e-6);
        }
    }

    #[test]
    fn test_offset_cubic_recovery() {
        let truth = [1.0, 1.0, 1.0, 1.0];
        let data = sample(|x| CUBIC.value(x, &truth), 100.0, 103.0, 1.0);
        assert_eq!(data.len(), 4);

        let mut model = RegressionModel::polynomial(data, 3).unwrap();
        model.set_range(100.0, 103.0).unwrap();
        let fit = model.fit().unwrap();

        assert_close!(fit.parameters[3], 1.0, 1e-6);
        assert_close!(fit.parameters[2], 1.0, 1e-4);
        assert_all_close!(fit.parameters, truth, 0.1);
    }

    #[test]
    fn test_offset_quartic() {
        // Five exact points on 1 + x + x² + x³ + x⁴, y ~ 1e8
        let truth = [1.0; 5];
        let data = sample(|x| QUARTIC.value(x, &truth), 100.0, 104.0, 1.0);
        assert_eq!(data.len(), 5);

        let mut model = RegressionModel::polynomial(data.clone(), 4).unwrap();
        model.set_range(100.0, 104.0).unwrap();
        let fit = model.fit().unwrap();

        // The low-order coefficients are an extrapolation to x = 0, so only
        // the leading ones are pinned down tightly
        assert_close!(fit.parameters[4], 1.0, 1e-5);
        assert_close!(fit.parameters[3], 1.0, 1e-2);
        assert_close!(fit.parameters[2], 1.0, 0.5);

        for p in &data {
            assert_close!(fit.y(p.x), p.y, 1e-9 * p.y);
        }
        let mid = QUARTIC.value(102.5, &truth);
        assert_close!(fit.y(102.5), mid, 1e-9 * mid);
        assert_close!(fit.r_squared, 1.0, 1e-9);
    }

    #[test]
    fn test_normalizer_round_trip() {
        let data = points_from_tuples(&[(10.0, 0.0), (14.0, 0.0)]);
        let normalizer = DomainNormalizer::from_data(&data);
        assert_eq!(normalizer.normalize(10.0), -1.0);
        assert_eq!(normalizer.normalize(12.0), 0.0);
        assert_eq!(normalizer.normalize(14.0), 1.0);

        // t² with t = (x - 12) / 2 is x²/4 - 6x + 36
        let b = normalizer.denormalize(&[0.0, 0.0, 1.0]);
        assert_all_close!(b, [36.0, -6.0, 0.25], 1e-12);

        // A single x value keeps a unit width
        let single = DomainNormalizer::from_data(&points_from_tuples(&[(5.0, 1.0)]));
        assert_eq!(single.normalize(6.0), 1.0);
    }

    #[test]
    fn test_horner() {
        assert_eq!(QUADRATIC.value(2.0, &[1.0, 2.0, 3.0]), 17.0);
        assert_eq!(CONSTANT.value(100.0, &[4.0]), 4.0);

        let mut row = [0.0; 3];
        QUADRATIC.gradient(3.0, &[], &mut row);
        assert_eq!(row, [1.0, 3.0, 9.0]);
    }
}
