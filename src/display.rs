//! Utilities for rendering fitted equations
//!
//! Equations are produced as LaTeX-flavoured strings for an external
//! renderer. Every coefficient is written with [`PRECISION`] decimal places.
//!
//! # Key Concepts
//! - **[`Term`]**: A single polynomial term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//! - [`format_polynomial`]: Assembles monomial coefficients into `"y = ..."`.
//! - [`format_coefficient`]: Formats a number to the fixed precision.
//!
//! Additive parameters in the other templates are joined by their sign, so a
//! negative offset reads `x - 2.000` rather than `x + -2.000`.

/// Number of decimal places used for every rendered coefficient
pub const PRECISION: usize = 3;

/// Represents the sign of a polynomial term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}
impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use graphfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    #[must_use]
    pub fn from_coef(coef: f64) -> Self {
        if coef < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }
}

/// A single rendered polynomial term.
///
/// `body` never carries the sign; it is written separately so that
/// non-leading terms can be joined with `" + "` or `" - "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Sign of the coefficient
    pub sign: Sign,
    /// Absolute coefficient followed by the variable, e.g. `3.000x^2`
    pub body: String,
}
impl Term {
    /// Creates a new term
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Renders the monomial term `coef * x^degree`, or `None` if `coef` is exactly zero.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn monomial(degree: usize, coef: f64) -> Option<Self> {
        if coef == 0.0 {
            return None;
        }

        let magnitude = format_coefficient(coef.abs());
        let body = match degree {
            0 => magnitude,
            1 => format!("{magnitude}x"),
            _ => format!("{magnitude}x^{degree}"),
        };

        Some(Self::new(Sign::from_coef(coef), body))
    }
}

/// Formats a number to [`PRECISION`] decimal places.
///
/// ```
/// # use graphfit::display::format_coefficient;
/// assert_eq!(format_coefficient(2.0), "2.000");
/// assert_eq!(format_coefficient(-0.12345), "-0.123");
/// ```
#[must_use]
pub fn format_coefficient(n: f64) -> String {
    let precision = PRECISION;
    format!("{n:.precision$}")
}

/// Renders monomial coefficients as `"y = ..."`; see [`write_polynomial`].
///
/// ```
/// # use graphfit::display::format_polynomial;
/// assert_eq!(format_polynomial(&[0.0, -2.0, 3.0]), "y = 3.000x^2 - 2.000x");
/// assert_eq!(format_polynomial(&[3.0, 2.0]), "y = 2.000x + 3.000");
/// ```
#[expect(clippy::missing_panics_doc, reason = "Infallible operation")]
#[must_use]
pub fn format_polynomial(coefficients: &[f64]) -> String {
    let mut output = String::new();
    write_polynomial(&mut output, coefficients).expect("String should be infallible");
    output
}

/// Writes monomial coefficients as `"y = ..."` into `buffer`.
///
/// # Coefficients
/// - `coefficients[i]` is the coefficient of `x^i`; terms are written from the
///   highest degree down to the constant.
/// - Exactly-zero coefficients are skipped.
///
/// # Behavior
/// - The first written term keeps its natural sign.
/// - Later terms are joined with `" + "` or `" - "` and their absolute value.
/// - If every coefficient is zero the result is `"y = 0"`.
///
/// # Errors
/// Returns an error if writing to `buffer` fails.
pub fn write_polynomial<B: std::fmt::Write>(buffer: &mut B, coefficients: &[f64]) -> std::fmt::Result {
    let mut terms = coefficients
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(degree, &coef)| Term::monomial(degree, coef));

    write!(buffer, "y = ")?;
    let Some(first) = terms.next() else {
        return write!(buffer, "0");
    };

    // Leading term keeps its natural sign
    if first.sign == Sign::Negative {
        write!(buffer, "{}", first.sign.char())?;
    }
    write!(buffer, "{}", first.body)?;

    for term in terms {
        let sign = term.sign.char();
        let body = term.body;
        write!(buffer, " {sign} {body}")?;
    }

    Ok(())
}

/// `" + {n}"` or `" - {|n|}"`
fn signed(n: f64) -> String {
    let sign = Sign::from_coef(n).char();
    format!(" {sign} {}", format_coefficient(n.abs()))
}

/// `y = {A}e^{{B}x}`
#[must_use]
pub fn format_exponential(a: f64, b: f64) -> String {
    format!(
        "y = {}e^{{{}x}}",
        format_coefficient(a),
        format_coefficient(b)
    )
}

/// `y = {A} + {B}\ln{x}`
#[must_use]
pub fn format_logarithmic(a: f64, b: f64) -> String {
    format!(
        "y = {}{}\\ln{{x}}",
        format_coefficient(a),
        signed(b)
    )
}

/// `y = \frac{A}{1 + e^{-B(x - C)}}`
///
/// A negative `B` drops the minus in the exponent and a negative `C` reads `x + |C|`.
#[must_use]
pub fn format_logistic(a: f64, b: f64, c: f64) -> String {
    let rate = if b < 0.0 {
        format_coefficient(-b)
    } else {
        format!("-{}", format_coefficient(b))
    };
    format!(
        "y = \\frac{{{}}}{{1 + e^{{{rate}(x{})}}}}",
        format_coefficient(a),
        signed(-c)
    )
}

/// `y = {A}x^{B}`
#[must_use]
pub fn format_power(a: f64, b: f64) -> String {
    format!(
        "y = {}x^{{{}}}",
        format_coefficient(a),
        format_coefficient(b)
    )
}

/// `y = {A}\sin{\left({B}x + {C}\right)} + {D}`
#[must_use]
pub fn format_sinusoidal(a: f64, b: f64, c: f64, d: f64) -> String {
    format!(
        "y = {}\\sin{{\\left({}x{}\\right)}}{}",
        format_coefficient(a),
        format_coefficient(b),
        signed(c),
        signed(d)
    )
}
