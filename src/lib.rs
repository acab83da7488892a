//! # Graphfit
//! ## Curve fits for plotted data, and the graphs that keep them
//!
//! Give it some `(x, y)` points and pick a curve family. You get back the fitted
//! parameters, an equation string ready for a LaTeX renderer, and an evenly spaced
//! set of curve samples ready for a chart.
//!
//! Supported families:
//! - Polynomials from order 0 (`Constant`) up to order 4 (`Quartic`), solved in closed form
//! - Exponential, logarithmic, logistic, power, and sinusoidal curves, solved with
//!   Levenberg-Marquardt using analytic gradients
//!
//! The simplest use-case is to fit a curve and hand it to a plot:
//! ```rust
//! # use graphfit::{RegressionModel, test::sample, assert_curve};
//! let data = sample(|x| 0.5 * x * x - x - 3.0, -4.0, 4.0, 0.5);
//!
//! let mut model = RegressionModel::polynomial(data, 2).expect("order is in range");
//! model.set_range(-5.0, 5.0).unwrap();
//!
//! let fit = model.fit().expect("Failed to fit");
//! assert_eq!(fit.equation, "y = 0.500x^2 - 1.000x - 3.000");
//! assert_eq!(fit.curve.len(), 101);
//! assert_curve!(fit);
//! ```
//!
//! # Core Concepts
//! - A [`RegressionModel`] pairs a point set with a [`RegressionKind`].
//!     - [`RegressionModel::fit`] never mutates the model, so calling it twice gives the same [`FitResult`].
//!     - A range must be set before fitting; the step defaults per kind (see [`FitConfig`]).
//! - A [`FitResult`] carries the parameters, the equation, the curve samples, and the y-range of the curve.
//! - A [`Graph`] is a titled point set with an optional regression.
//!     - Only the regression's name is persisted, in a [`GraphRecord`].
//!     - [`graph::rehydrate`] rebuilds the live regression from that name.
//! - A [`store::GraphStore`] reads and writes the whole collection of records at once.
//!
//! # Failure handling
//! Fitting can fail: too few points, `x <= 0` for logarithmic or power curves, or a solver
//! that does not converge. Callers are expected to fall back to showing the raw points;
//! [`Graph::fit`] does exactly that by returning `None`.
//!
//! # Logging
//! The crate logs through the [`log`](https://docs.rs/log) facade and never installs a logger.
//!
//! # Testing utilities
//!
//! This crate includes a few helpers for testing fits, see [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![allow(clippy::many_single_char_names)] // a, b, c, d are the parameter names

pub mod test;

pub mod config;
pub mod display;
pub mod error;
pub mod graph;
pub mod id;
pub mod kind;
pub mod model;
pub mod range;
pub mod solver;
pub mod statistics;
pub mod store;
pub mod value;

pub use config::FitConfig;
pub use error::{Error, Result};
pub use graph::{Graph, GraphRecord};
pub use kind::RegressionKind;
pub use model::{FitResult, RegressionModel};
pub use range::FitRange;
pub use value::Point;

pub use nalgebra;
