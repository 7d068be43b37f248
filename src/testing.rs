//! Testing utilities useful for benchmarking, debugging and smoke testing.
//!
//! The registered objectives are extended with standard initial points and
//! their known optima.
//!
//! # References
//!
//! \[1\] [A Literature Survey of Benchmark Functions For Global Optimization
//! Problems](https://arxiv.org/abs/1308.4008)
//!
//! \[2\] [Numerical Methods for Unconstrained Optimization and Nonlinear
//! Equations](https://epubs.siam.org/doi/book/10.1137/1.9781611971200)

#![allow(unused)]

use nalgebra::{storage::Storage, DVector, Dynamic, Vector};

use crate::core::{Function, Problem};
use crate::objective::{ObjectiveKind, Quadratic, Rosenbrock};

/// Extension of the [`Function`] trait that provides additional information
/// that is useful for testing optimizers.
pub trait TestFunction: Function {
    /// Standard initial points for the problem in given dimension. Using the
    /// same initial points is essential for fair comparison of methods. All of
    /// them lie in the [domain](Problem::domain).
    fn initials(&self, dim: usize) -> Vec<DVector<f64>>;

    /// A set of global optima (if known and finite).
    fn optima(&self, dim: usize) -> Vec<DVector<f64>>;

    /// Test if given point is a global optimum, given the tolerance `eps` on
    /// the distance to the closest known optimum.
    fn is_optimum<Sx>(&self, x: &Vector<f64, Dynamic, Sx>, eps: f64) -> bool
    where
        Sx: Storage<f64, Dynamic>,
    {
        self.optima(x.nrows()).iter().any(|optimum| {
            let distance = optimum
                .iter()
                .zip(x.iter())
                .map(|(oi, xi)| (oi - xi).powi(2))
                .sum::<f64>()
                .sqrt();
            distance <= eps
        })
    }
}

impl TestFunction for Quadratic {
    fn initials(&self, dim: usize) -> Vec<DVector<f64>> {
        let init1 = DVector::from_element(dim, 1.0);
        let init2 = DVector::from_iterator(
            dim,
            (0..dim).map(|i| if i % 2 == 0 { -4.5 } else { 3.25 }),
        );

        vec![init1, init2]
    }

    fn optima(&self, dim: usize) -> Vec<DVector<f64>> {
        vec![DVector::zeros(dim)]
    }
}

impl TestFunction for Rosenbrock {
    fn initials(&self, dim: usize) -> Vec<DVector<f64>> {
        let init1 = DVector::from_iterator(
            dim,
            (0..dim).map(|i| if i % 2 == 0 { -1.2 } else { 1.0 }),
        );

        let init2 = DVector::from_element(dim, 0.0);

        vec![init1, init2]
    }

    fn optima(&self, dim: usize) -> Vec<DVector<f64>> {
        vec![DVector::from_element(dim, 1.0)]
    }
}

impl TestFunction for ObjectiveKind {
    fn initials(&self, dim: usize) -> Vec<DVector<f64>> {
        match self {
            ObjectiveKind::Quadratic => Quadratic.initials(dim),
            ObjectiveKind::Rosenbrock => Rosenbrock::new().initials(dim),
            ObjectiveKind::RosenbrockBonus => Rosenbrock::bonus().initials(dim),
        }
    }

    fn optima(&self, dim: usize) -> Vec<DVector<f64>> {
        match self {
            ObjectiveKind::Quadratic => Quadratic.optima(dim),
            ObjectiveKind::Rosenbrock => Rosenbrock::new().optima(dim),
            ObjectiveKind::RosenbrockBonus => Rosenbrock::bonus().optima(dim),
        }
    }
}
