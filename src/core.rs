//! Core abstractions and types for steepest.
//!
//! *Users* are mainly interested in implementing the [`Function`] trait,
//! optionally specifying the [admissible box](Domain) for initial points.
//!
//! Algorithm *developers* are interested in implementing the [`Optimizer`]
//! trait.

mod base;
mod domain;
mod function;
mod optimizer;

pub use base::*;
pub use domain::*;
pub use function::*;
pub use optimizer::*;
