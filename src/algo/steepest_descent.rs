//! Fixed-step steepest descent.
//!
//! [Gradient descent](https://en.wikipedia.org/wiki/Gradient_descent) with a
//! constant step size *eta* does the update
//!
//! ```text
//! x <- x - eta * grad f(x)
//! ```
//!
//! in every iteration. There is no line search, no step adaptation and no
//! momentum.
//!
//! The state of the method lives on a grid of five fractional digits. The
//! gradient entering the update is rounded half away from zero
//! ([`round5`](crate::rounding::round5)) and the updated iterate is floored
//! ([`floor5`](crate::rounding::floor5)). That makes the produced sequence of
//! iterates reproducible bit for bit.
//!
//! The iterates are not kept inside the domain. The domain only restricts
//! where the process may start.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)

use getset::{CopyGetters, Setters};
use log::{debug, warn};
use nalgebra::{storage::StorageMut, DVector, Dynamic, IsContiguous, Vector};
use thiserror::Error;

use crate::core::{Domain, Function, Optimizer, ProblemError};
use crate::rounding::{floor5, floor5_mut, round5_mut};

/// Options for [`SteepestDescent`] optimizer.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SteepestDescentOptions {
    /// Constant step size. Default: `0.001`.
    step_size: f64,
}

impl Default for SteepestDescentOptions {
    fn default() -> Self {
        Self { step_size: 0.001 }
    }
}

/// Steepest descent optimizer. See [module](self) documentation for more
/// details.
pub struct SteepestDescent {
    options: SteepestDescentOptions,
    grad: DVector<f64>,
}

impl SteepestDescent {
    /// Initializes steepest descent optimizer with default options.
    pub fn new<F: Function>(f: &F, dom: &Domain) -> Self {
        Self::with_options(f, dom, SteepestDescentOptions::default())
    }

    /// Initializes steepest descent optimizer with given options.
    pub fn with_options<F: Function>(_f: &F, dom: &Domain, options: SteepestDescentOptions) -> Self {
        Self {
            options,
            grad: DVector::zeros(dom.dim()),
        }
    }

    /// Gets the options.
    pub fn options(&self) -> &SteepestDescentOptions {
        &self.options
    }

    /// Gets the gradient buffer as used in the last step.
    pub fn gradient(&self) -> &[f64] {
        self.grad.as_slice()
    }

    fn check_dim(&self, actual: usize) -> Result<(), SteepestDescentError> {
        let expected = self.grad.nrows();
        if actual == expected {
            Ok(())
        } else {
            Err(ProblemError::InvalidDimensionality { expected, actual }.into())
        }
    }
}

/// Error returned from [`SteepestDescent`] optimizer.
#[derive(Debug, Error)]
pub enum SteepestDescentError {
    /// Error that occurred when evaluating the function.
    #[error("{0}")]
    Problem(#[from] ProblemError),
}

impl<F: Function> Optimizer<F> for SteepestDescent {
    const NAME: &'static str = "Steepest descent";

    type Error = SteepestDescentError;

    fn opt_start<Sx>(
        &mut self,
        f: &F,
        _dom: &Domain,
        x: &mut Vector<f64, Dynamic, Sx>,
    ) -> Result<(), Self::Error>
    where
        Sx: StorageMut<f64, Dynamic> + IsContiguous,
    {
        self.check_dim(x.nrows())?;

        x.iter_mut().for_each(|xi| *xi = floor5(*xi));

        // The primed gradient is overwritten by the first step before being
        // used. It is still evaluated so that the number and the order of
        // gradient evaluations stays the same.
        f.gradient(&*x, &mut self.grad);
        floor5_mut(&mut self.grad);

        debug!("start at x = {:?}", x.as_slice());
        Ok(())
    }

    fn opt_next<Sx>(
        &mut self,
        f: &F,
        _dom: &Domain,
        x: &mut Vector<f64, Dynamic, Sx>,
    ) -> Result<f64, Self::Error>
    where
        Sx: StorageMut<f64, Dynamic> + IsContiguous,
    {
        self.check_dim(x.nrows())?;

        let SteepestDescentOptions { step_size } = self.options;

        // Compute the gradient in the current point.
        f.gradient(&*x, &mut self.grad);
        round5_mut(&mut self.grad);

        if self.grad.iter().any(|gi| !gi.is_finite()) {
            warn!("non-finite gradient: {:?}", self.grad.as_slice());
        }

        // Take the step.
        x.iter_mut()
            .zip(self.grad.iter())
            .for_each(|(xi, gi)| *xi = floor5(*xi - step_size * gi));

        let magnitude = f.gradient_magnitude(&self.grad);
        debug!(
            "step {} along {:?}, |g| = {}, new x = {:?}",
            step_size,
            self.grad.as_slice(),
            magnitude,
            x.as_slice()
        );

        Ok(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::Problem;
    use crate::objective::{ObjectiveKind, Quadratic, Rosenbrock};
    use crate::rounding::fixed;
    use crate::testing::*;

    use approx::assert_relative_eq;
    use nalgebra::{dvector, DVector};

    fn optimizer<F: Function>(f: &F, dim: usize, step_size: f64) -> SteepestDescent {
        let mut options = SteepestDescentOptions::default();
        options.set_step_size(step_size);
        SteepestDescent::with_options(f, &f.domain(dim), options)
    }

    #[test]
    fn default_options() {
        let f = Quadratic;
        let optimizer = SteepestDescent::new(&f, &f.domain(2));
        assert_eq!(optimizer.options().step_size(), 0.001);
    }

    #[test]
    fn start_floors_the_point() {
        let f = Quadratic;
        let dom = f.domain(2);
        let mut optimizer = optimizer(&f, 2, 0.1);
        let mut x = dvector![0.7, -0.123456];

        optimizer.opt_start(&f, &dom, &mut x).unwrap();

        assert_eq!(fixed(x[0]), "0.69999");
        assert_eq!(fixed(x[1]), "-0.12346");
        assert_eq!(fixed(optimizer.gradient()[0]), "1.39998");
    }

    #[test]
    fn quadratic_half_step_reaches_origin() {
        let f = Quadratic;
        let dom = f.domain(3);
        let mut optimizer = optimizer(&f, 3, 0.5);
        let mut x = dvector![1.5, -3.25, 4.0];

        optimizer.opt_start(&f, &dom, &mut x).unwrap();
        let magnitude = optimizer.opt_next(&f, &dom, &mut x).unwrap();

        assert_eq!(x, DVector::zeros(3));
        assert_relative_eq!(magnitude, (3.0f64.powi(2) + 6.5f64.powi(2) + 8.0f64.powi(2)).sqrt());
    }

    #[test]
    fn magnitude_is_taken_before_the_step() {
        let f = Quadratic;
        let dom = f.domain(2);
        let mut optimizer = optimizer(&f, 2, 0.1);
        let mut x = dvector![1.0, 1.0];

        optimizer.opt_start(&f, &dom, &mut x).unwrap();
        let magnitude = optimizer.opt_next(&f, &dom, &mut x).unwrap();

        assert_relative_eq!(magnitude, 8.0f64.sqrt());
        assert_eq!(fixed(x[0]), "0.80000");
        assert_eq!(optimizer.gradient(), &[2.0, 2.0]);
    }

    #[test]
    fn stationary_point_stays() {
        let f = Rosenbrock::new();
        let dom = f.domain(2);
        let mut optimizer = optimizer(&f, 2, 0.001);
        let mut x = dvector![1.0, 1.0];

        optimizer.opt_start(&f, &dom, &mut x).unwrap();
        let magnitude = optimizer.opt_next(&f, &dom, &mut x).unwrap();

        assert_eq!(magnitude, 0.0);
        assert_eq!(x, dvector![1.0, 1.0]);
    }

    #[test]
    fn iterates_may_leave_the_domain() {
        let f = Quadratic;
        let dom = f.domain(1);
        let mut optimizer = optimizer(&f, 1, 2.0);
        let mut x = dvector![4.0];

        optimizer.opt_start(&f, &dom, &mut x).unwrap();
        optimizer.opt_next(&f, &dom, &mut x).unwrap();

        // 4 - 2 * 8 = -12
        assert_eq!(x, dvector![-12.0]);
        assert!(!dom.contains(&x));
    }

    #[test]
    fn invalid_dimensionality() {
        let f = Quadratic;
        let dom = f.domain(2);
        let mut optimizer = optimizer(&f, 2, 0.1);
        let mut x = dvector![1.0, 1.0, 1.0];

        assert!(matches!(
            optimizer.opt_next(&f, &dom, &mut x),
            Err(SteepestDescentError::Problem(
                ProblemError::InvalidDimensionality {
                    expected: 2,
                    actual: 3
                }
            ))
        ));
    }

    #[test]
    fn quadratic_converges_from_initials() {
        let f = Quadratic;
        let eps = 1e-3;

        for x0 in f.initials(4) {
            let dom = f.domain(4);
            let mut optimizer = optimizer(&f, 4, 0.1);
            let mut x = x0.clone();

            optimizer.opt_start(&f, &dom, &mut x).unwrap();
            for _ in 0..200 {
                optimizer.opt_next(&f, &dom, &mut x).unwrap();
            }

            assert!(f.is_optimum(&x, eps), "x = {:?}", x.as_slice());
        }
    }

    #[test]
    fn bonus_rosenbrock_moves_towards_optimum() {
        let f = ObjectiveKind::RosenbrockBonus;
        let dom = f.domain(2);
        let mut optimizer = optimizer(&f, 2, 0.001);
        let mut x = dvector![0.0, 0.0];
        let initial = f.apply(&x);

        optimizer.opt_start(&f, &dom, &mut x).unwrap();
        for _ in 0..50 {
            optimizer.opt_next(&f, &dom, &mut x).unwrap();
        }

        assert!(f.apply(&x) < initial);
    }
}
