use nalgebra::{storage::StorageMut, Dynamic, IsContiguous, Vector};

use super::{domain::Domain, function::Function};

/// Common interface for all optimizers.
///
/// The essential method is [`opt_next`](Optimizer::opt_next) which takes
/// variables *x* and computes the next step. Thus it represents one iteration
/// in the process. Repeated call to this method should move *x* towards the
/// minimum in successful cases.
///
/// ## Implementing an optimizer
///
/// Here is an implementation of an optimizer that halves every variable,
/// which works for functions with the minimum in the origin.
///
/// ```rust
/// use steepest::nalgebra as na;
/// use steepest::{Domain, Function, Optimizer};
/// use na::{storage::StorageMut, Dynamic, IsContiguous, Vector};
///
/// struct Halving;
///
/// impl<F: Function> Optimizer<F> for Halving {
///     const NAME: &'static str = "Halving";
///     type Error = std::convert::Infallible;
///
///     fn opt_next<Sx>(
///         &mut self,
///         f: &F,
///         _dom: &Domain,
///         x: &mut Vector<f64, Dynamic, Sx>,
///     ) -> Result<f64, Self::Error>
///     where
///         Sx: StorageMut<f64, Dynamic> + IsContiguous,
///     {
///         let mut grad = x.clone_owned();
///         f.gradient(&*x, &mut grad);
///         x.iter_mut().for_each(|xi| *xi *= 0.5);
///         Ok(f.gradient_magnitude(&grad))
///     }
/// }
/// ```
pub trait Optimizer<F: Function> {
    /// Name of the optimizer.
    const NAME: &'static str;

    /// Error type of the iteration. Represents an invalid operation during
    /// computing the next step.
    type Error;

    /// Prepares the optimizer for the process starting in `x`.
    ///
    /// Called exactly once before the first [`opt_next`](Optimizer::opt_next).
    /// The optimizer may normalize `x` in place. The default does nothing.
    fn opt_start<Sx>(
        &mut self,
        f: &F,
        dom: &Domain,
        x: &mut Vector<f64, Dynamic, Sx>,
    ) -> Result<(), Self::Error>
    where
        Sx: StorageMut<f64, Dynamic> + IsContiguous,
    {
        let _ = (f, dom, x);
        Ok(())
    }

    /// Computes the next step in the optimization process.
    ///
    /// The value of `x` is the current values of variables. After the method
    /// returns, `x` should hold the variable values of the performed step and
    /// the return value *must* be the gradient magnitude, as computed by
    /// [`Function::gradient_magnitude`], of the gradient that drove the step.
    /// That is the gradient at the point *before* the step.
    ///
    /// The implementations *can* assume that subsequent calls to `opt_next`
    /// pass the value of `x` as was outputted in the previous iteration by the
    /// same method.
    fn opt_next<Sx>(
        &mut self,
        f: &F,
        dom: &Domain,
        x: &mut Vector<f64, Dynamic, Sx>,
    ) -> Result<f64, Self::Error>
    where
        Sx: StorageMut<f64, Dynamic> + IsContiguous;
}
