//! The collection of implemented algorithms.

pub mod steepest_descent;

pub use steepest_descent::SteepestDescent;
