//! Pre-run validation of the objective name, the dimensionality and the
//! initial point.
//!
//! Validation stops at the first failure, so a configuration produces at most
//! one error. The [`Display`](std::fmt::Display) form of [`ValidationError`]
//! is the exact line written to the trace.

use nalgebra::DVector;
use thiserror::Error;

use crate::core::Problem;
use crate::objective::ObjectiveKind;
use crate::rounding;

/// Error found in a run configuration before the optimization starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The objective name is not registered.
    #[error("Error: Unknown objective function.")]
    UnknownObjective,
    /// The number of components of the initial point differs from the
    /// declared dimensionality.
    #[error("Error: Initial point dimensionality mismatch.")]
    DimensionalityMismatch,
    /// The objective is not defined in the declared dimensionality.
    #[error("Error: Dimensionality must be at least {min}.")]
    InsufficientDimensionality {
        /// The smallest supported dimensionality.
        min: usize,
    },
    /// A component of the initial point lies outside of the admissible box.
    #[error(
        "Error: Initial point {} is outside the bounds [{}, {}]",
        raw(.value),
        raw(.lower),
        raw(.upper)
    )]
    OutOfBounds {
        /// The offending component.
        value: f64,
        /// Lower bound of the box.
        lower: f64,
        /// Upper bound of the box.
        upper: f64,
    },
}

fn raw(value: &f64) -> String {
    rounding::raw(*value)
}

/// Checks that `name` denotes a registered objective.
pub fn validate_name(name: &str) -> Result<ObjectiveKind, ValidationError> {
    name.parse()
}

/// Checks the dimensionality and the initial point against the objective.
///
/// The checks run in order: the length of `x0` must equal `dim`, `dim` must
/// be supported by the objective and the first component outside of the
/// admissible box is reported.
pub fn validate_point<P: Problem>(
    f: &P,
    dim: usize,
    x0: &DVector<f64>,
) -> Result<(), ValidationError> {
    if x0.nrows() != dim {
        return Err(ValidationError::DimensionalityMismatch);
    }

    let min = f.min_dim();
    if dim < min {
        return Err(ValidationError::InsufficientDimensionality { min });
    }

    let dom = f.domain(dim);
    match dom.first_violation(x0) {
        Some(i) => {
            let (lower, upper) = dom.bounds_in(i);
            Err(ValidationError::OutOfBounds {
                value: x0[i],
                lower,
                upper,
            })
        }
        None => Ok(()),
    }
}

/// Runs all checks and returns the selected objective.
pub fn validate(name: &str, dim: usize, x0: &DVector<f64>) -> Result<ObjectiveKind, ValidationError> {
    let kind = validate_name(name)?;
    validate_point(&kind, dim, x0)?;
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::dvector;

    #[test]
    fn accepts_valid_configuration() {
        assert_eq!(
            validate("quadratic", 2, &dvector![-5.0, 5.0]),
            Ok(ObjectiveKind::Quadratic)
        );
        assert_eq!(
            validate("Rosenbrock_Bonus", 3, &dvector![0.5, 0.5, 0.5]),
            Ok(ObjectiveKind::RosenbrockBonus)
        );
    }

    #[test]
    fn unknown_objective() {
        let error = validate("Himmelblau", 2, &dvector![0.0, 0.0]).unwrap_err();

        assert_eq!(error, ValidationError::UnknownObjective);
        assert_eq!(error.to_string(), "Error: Unknown objective function.");
    }

    #[test]
    fn unknown_objective_wins_over_other_errors() {
        let error = validate("nope", 3, &dvector![9.0]).unwrap_err();
        assert_eq!(error, ValidationError::UnknownObjective);
    }

    #[test]
    fn dimensionality_mismatch() {
        let error = validate("Rosenbrock", 3, &dvector![1.0, 1.0]).unwrap_err();

        assert_eq!(error, ValidationError::DimensionalityMismatch);
        assert_eq!(
            error.to_string(),
            "Error: Initial point dimensionality mismatch."
        );
    }

    #[test]
    fn mismatch_suppresses_bounds_error() {
        let error = validate("Quadratic", 3, &dvector![10.0, 10.0]).unwrap_err();
        assert_eq!(error, ValidationError::DimensionalityMismatch);
    }

    #[test]
    fn out_of_bounds() {
        let error = validate("Quadratic", 2, &dvector![6.0, 0.0]).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Error: Initial point 6.0 is outside the bounds [-5.0, 5.0]"
        );
    }

    #[test]
    fn only_first_offender_is_reported() {
        let error = validate("Rosenbrock", 3, &dvector![1.0, -7.5, 8.0]).unwrap_err();

        assert_eq!(
            error,
            ValidationError::OutOfBounds {
                value: -7.5,
                lower: -5.0,
                upper: 5.0,
            }
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate("Quadratic", 2, &dvector![-5.0, 5.0]).is_ok());
        assert!(validate("Quadratic", 1, &dvector![5.000001]).is_err());
    }

    #[test]
    fn rosenbrock_requires_two_dimensions() {
        let error = validate("rosenbrock", 1, &dvector![1.0]).unwrap_err();

        assert_eq!(error, ValidationError::InsufficientDimensionality { min: 2 });
        assert_eq!(error.to_string(), "Error: Dimensionality must be at least 2.");
    }

    #[test]
    fn quadratic_requires_one_dimension() {
        let error = validate("quadratic", 0, &DVector::zeros(0)).unwrap_err();
        assert_eq!(error, ValidationError::InsufficientDimensionality { min: 1 });
    }
}
