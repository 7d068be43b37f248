#![allow(clippy::many_single_char_names)]
#![warn(missing_docs)]

//! # Steepest
//!
//! Fixed-step steepest descent over a small registry of analytic objective
//! functions, producing a human-readable trace of every iteration.
//!
//! The library is built around reproducibility. Every iterate is truncated
//! to five decimal digits and every gradient is rounded to five decimal
//! digits before it is used, so that the trace of a run is identical across
//! platforms and can be compared byte for byte.
//!
//! ## Objectives
//!
//! * [Quadratic](objective::Quadratic) -- `f(x) = Σ xi²`, defined in any
//!   dimension.
//! * [Rosenbrock](objective::Rosenbrock) -- the chained Rosenbrock function,
//!   defined for dimension at least two. It comes in two variants that differ
//!   in the gradient of the interior components, see
//!   [`RosenbrockGradient`](objective::RosenbrockGradient).
//!
//! Initial points must lie in the box `[-5, 5]` in every component. The box is
//! only checked [before the run](validation), the iterates are free to leave
//! it.
//!
//! ## Problem
//!
//! Mathematically, the problem is to find a local minimum of
//!
//! ```text
//! f(x), x = { x1, ..., xn }
//! ```
//!
//! by repeating the update
//!
//! ```text
//! x <- x - η ∇f(x)
//! ```
//!
//! with a constant step size `η` until the magnitude of the gradient drops to
//! the tolerance or the maximum number of iterations is reached.
//!
//! When it comes to code, the problem is any type that implements the
//! [`Function`] and [`Problem`] traits.
//!
//! ```rust
//! // Steepest is based on `nalgebra` crate.
//! use steepest::nalgebra as na;
//! use steepest::{Function, Problem};
//! use na::Dynamic;
//!
//! struct Paraboloid;
//!
//! impl Problem for Paraboloid {
//!     fn name(&self) -> &str {
//!         "Paraboloid"
//!     }
//! }
//!
//! impl Function for Paraboloid {
//!     fn apply<Sx>(&self, x: &na::Vector<f64, Dynamic, Sx>) -> f64
//!     where
//!         Sx: na::storage::Storage<f64, Dynamic>,
//!     {
//!         x.iter().map(|xi| 0.5 * xi * xi).sum()
//!     }
//!
//!     fn gradient<Sx, Sg>(
//!         &self,
//!         x: &na::Vector<f64, Dynamic, Sx>,
//!         grad: &mut na::Vector<f64, Dynamic, Sg>,
//!     ) where
//!         Sx: na::storage::Storage<f64, Dynamic>,
//!         Sg: na::storage::StorageMut<f64, Dynamic>,
//!     {
//!         grad.iter_mut().zip(x.iter()).for_each(|(gi, xi)| *gi = *xi);
//!     }
//! }
//! ```
//!
//! ## Usage
//!
//! The [driver](driver) runs the optimization for a function and an initial
//! point:
//!
//! ```rust
//! use steepest::algo::steepest_descent::{SteepestDescent, SteepestDescentOptions};
//! use steepest::objective::Quadratic;
//! use steepest::{OptimizerDriver, Status};
//!
//! let f = Quadratic;
//! let mut options = SteepestDescentOptions::default();
//! options.set_step_size(0.5);
//!
//! let mut optimizer = OptimizerDriver::builder(&f)
//!     .with_initial(vec![1.0])
//!     .with_max_iters(10)
//!     .with_algo(|f, dom| SteepestDescent::with_options(f, dom, options))
//!     .build();
//!
//! let outcome = optimizer.run().expect("optimizer encountered an error");
//! assert!(matches!(outcome.status(), Status::Converged { .. }));
//! ```
//!
//! A complete run from a user-provided [configuration](config), including
//! validation, is handled by the [runner](runner). The interactive shell of
//! the `steepest` binary is available in [`cli`].

pub mod algo;
pub mod cli;
pub mod config;
mod core;
pub mod driver;
pub mod objective;
pub mod rounding;
pub mod runner;
pub mod trace;
pub mod validation;

pub use core::*;
pub use driver::{OptimizerDriver, Outcome, Status};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
