use thiserror::Error;

use super::domain::Domain;

/// The base trait for [`Function`](super::function::Function).
pub trait Problem {
    /// Display name of the problem.
    fn name(&self) -> &str;

    /// The smallest dimension for which the problem is defined.
    fn min_dim(&self) -> usize {
        1
    }

    /// Lower and upper bound that every component of an initial point must
    /// respect. If not overridden, the problem is unconstrained.
    fn bounds(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Get the admissible box for initial points of given dimension, built
    /// from [`Problem::bounds`].
    fn domain(&self, dim: usize) -> Domain {
        let (lower, upper) = self.bounds();
        Domain::uniform(dim, lower, upper)
    }
}

/// Error encountered while applying variables to the function.
#[derive(Debug, Error)]
pub enum ProblemError {
    /// The number of variables does not match the dimension of the domain.
    #[error("invalid dimensionality: expected {expected}, got {actual}")]
    InvalidDimensionality {
        /// Dimension of the domain.
        expected: usize,
        /// Number of variables given.
        actual: usize,
    },
}
