use nalgebra::{
    storage::{Storage, StorageMut},
    Dynamic, Vector,
};

use super::base::Problem;

/// The trait for defining differentiable objective functions.
///
/// ## Defining a function
///
/// A function is any type that implements [`Function`] and [`Problem`]
/// traits. The gradient is derived by hand, there is no automatic or
/// numerical differentiation.
///
/// ```rust
/// use steepest::nalgebra as na;
/// use steepest::{Function, Problem};
/// use na::{Dynamic, Vector};
///
/// // A problem is represented by a type.
/// struct Paraboloid;
///
/// impl Problem for Paraboloid {
///     fn name(&self) -> &str {
///         "Paraboloid"
///     }
///
///     // Initial points must lie in [-1, 1] in every dimension.
///     fn bounds(&self) -> (f64, f64) {
///         (-1.0, 1.0)
///     }
/// }
///
/// impl Function for Paraboloid {
///     fn apply<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> f64
///     where
///         Sx: na::storage::Storage<f64, Dynamic>,
///     {
///         x.iter().map(|xi| 3.0 * xi * xi).sum()
///     }
///
///     fn gradient<Sx, Sg>(&self, x: &Vector<f64, Dynamic, Sx>, grad: &mut Vector<f64, Dynamic, Sg>)
///     where
///         Sx: na::storage::Storage<f64, Dynamic>,
///         Sg: na::storage::StorageMut<f64, Dynamic>,
///     {
///         grad.iter_mut().zip(x.iter()).for_each(|(gi, xi)| *gi = 6.0 * xi);
///     }
/// }
/// ```
pub trait Function: Problem {
    /// Calculate the function value given values of the variables.
    fn apply<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> f64
    where
        Sx: Storage<f64, Dynamic>;

    /// Calculate the gradient given values of the variables. The `grad`
    /// vector has the same dimension as `x` and every component must be
    /// overwritten.
    fn gradient<Sx, Sg>(&self, x: &Vector<f64, Dynamic, Sx>, grad: &mut Vector<f64, Dynamic, Sg>)
    where
        Sx: Storage<f64, Dynamic>,
        Sg: StorageMut<f64, Dynamic>;

    /// Calculate the magnitude of a gradient vector. Note that this is applied
    /// to the gradient, not to the point.
    ///
    /// The default is the Euclidean norm.
    fn gradient_magnitude<Sv>(&self, v: &Vector<f64, Dynamic, Sv>) -> f64
    where
        Sv: Storage<f64, Dynamic>,
    {
        v.iter().map(|vi| vi * vi).sum::<f64>().sqrt()
    }
}
