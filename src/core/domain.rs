//! Admissible box for initial points.
//!
//! The box is a validation contract only. Iterates produced by an optimizer
//! are free to leave it and nothing projects them back.

use std::iter::FromIterator;

use nalgebra::{storage::Storage, DVector, Dynamic, Vector};

/// Axis-aligned box `[l1, u1] x ... x [ln, un]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    lower: DVector<f64>,
    upper: DVector<f64>,
}

impl Domain {
    /// Creates unconstrained domain with given dimension.
    pub fn unconstrained(dim: usize) -> Self {
        Self::uniform(dim, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Creates a box with the same bounds in every dimension.
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Self {
        Self {
            lower: DVector::from_element(dim, lower),
            upper: DVector::from_element(dim, upper),
        }
    }

    /// Creates rectangular domain with given bounds.
    ///
    /// Positive and negative infinity can be used to indicate value unbounded
    /// in that dimension and direction.
    pub fn rect(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        assert!(
            lower.len() == upper.len(),
            "lower and upper have different size"
        );

        Self {
            lower: DVector::from_vec(lower),
            upper: DVector::from_vec(upper),
        }
    }

    /// Gets the dimension of the domain.
    pub fn dim(&self) -> usize {
        self.lower.nrows()
    }

    /// Gets the bounds in given dimension.
    pub fn bounds_in(&self, i: usize) -> (f64, f64) {
        (self.lower[i], self.upper[i])
    }

    /// Returns the index of the first component of `x` lying outside of its
    /// bounds. Components beyond the dimension of the domain are not checked.
    pub fn first_violation<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> Option<usize>
    where
        Sx: Storage<f64, Dynamic>,
    {
        self.lower
            .iter()
            .zip(self.upper.iter())
            .zip(x.iter())
            .position(|((li, ui), xi)| xi < li || xi > ui)
    }

    /// Checks whether the point lies in the domain.
    pub fn contains<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> bool
    where
        Sx: Storage<f64, Dynamic>,
    {
        x.nrows() == self.dim() && self.first_violation(x).is_none()
    }
}

impl FromIterator<(f64, f64)> for Domain {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let (lower, upper): (Vec<_>, Vec<_>) = iter.into_iter().unzip();
        Self::rect(lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::dvector;

    #[test]
    fn uniform_box() {
        let dom = Domain::uniform(3, -5.0, 5.0);

        assert_eq!(dom.dim(), 3);
        assert_eq!(dom.bounds_in(2), (-5.0, 5.0));
        assert!(dom.contains(&dvector![-5.0, 0.0, 5.0]));
        assert!(!dom.contains(&dvector![-5.0, 0.0]));
    }

    #[test]
    fn first_violation_is_reported() {
        let dom = Domain::uniform(3, -5.0, 5.0);

        assert_eq!(dom.first_violation(&dvector![0.0, 6.0, -7.0]), Some(1));
        assert_eq!(dom.first_violation(&dvector![0.0, 1.0, -7.0]), Some(2));
        assert_eq!(dom.first_violation(&dvector![0.0, 1.0, 2.0]), None);
    }

    #[test]
    fn nan_is_not_a_violation() {
        // NaN compares false against both bounds.
        let dom = Domain::uniform(1, -5.0, 5.0);
        assert_eq!(dom.first_violation(&dvector![f64::NAN]), None);
    }

    #[test]
    fn unconstrained_accepts_everything() {
        let dom = Domain::unconstrained(2);
        assert!(dom.contains(&dvector![1e300, -1e300]));
    }

    #[test]
    fn from_iterator() {
        let dom: Domain = [(0.0, 1.0), (-1.0, 2.0)].into_iter().collect();

        assert_eq!(dom.dim(), 2);
        assert_eq!(dom.bounds_in(1), (-1.0, 2.0));
        assert_eq!(dom.first_violation(&dvector![0.5, 3.0]), Some(1));
    }
}
