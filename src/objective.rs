//! The registry of objective functions.
//!
//! The set is closed: [`Quadratic`], [`Rosenbrock`] and its variant with the
//! corrected gradient. [`ObjectiveKind`] is the tag used to select one of them
//! by name and it implements [`Function`] itself by dispatching to the
//! concrete objective.
//!
//! All objectives accept initial points in `[-5, 5]` in every dimension.
//!
//! # References
//!
//! \[1\] [A Literature Survey of Benchmark Functions For Global Optimization
//! Problems](https://arxiv.org/abs/1308.4008)

use std::fmt;
use std::str::FromStr;

use nalgebra::{
    storage::{Storage, StorageMut},
    Dynamic, Vector,
};

use crate::core::{Function, Problem};
use crate::validation::ValidationError;

/// Bounds of the admissible box shared by all registered objectives.
pub const BOUNDS: (f64, f64) = (-5.0, 5.0);

/// Sum of squares `f(x) = sum xi^2` (also known as sphere function) \[1\].
///
/// The global minimum is in the origin. Defined for any dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic;

impl Problem for Quadratic {
    fn name(&self) -> &str {
        "Quadratic"
    }

    fn bounds(&self) -> (f64, f64) {
        BOUNDS
    }
}

impl Function for Quadratic {
    fn apply<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> f64
    where
        Sx: Storage<f64, Dynamic>,
    {
        x.iter().map(|xi| xi.powi(2)).sum()
    }

    fn gradient<Sx, Sg>(&self, x: &Vector<f64, Dynamic, Sx>, grad: &mut Vector<f64, Dynamic, Sg>)
    where
        Sx: Storage<f64, Dynamic>,
        Sg: StorageMut<f64, Dynamic>,
    {
        grad.iter_mut()
            .zip(x.iter())
            .for_each(|(gi, xi)| *gi = xi * 2.0);
    }
}

/// Gradient formula used by [`Rosenbrock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosenbrockGradient {
    /// Every component except the last one carries only the term of the
    /// summand in which the variable appears squared. The coupling term from
    /// the previous summand is missing, so this is *not* the exact gradient
    /// for dimensions above two.
    Basic,
    /// Interior components carry both coupling terms.
    Coupled,
}

/// [Rosenbrock function](https://en.wikipedia.org/wiki/Rosenbrock_function)
/// \[1\] (also known as Rosenbrock's valley or banana function)
///
/// ```text
/// f(x) = sum_{i=0}^{n-2} 100 (x_{i+1} - x_i^2)^2 + (1 - x_i)^2
/// ```
///
/// The global minimum is in `(1, ..., 1)` inside a long, narrow, parabolic
/// shaped flat valley. Requires at least two dimensions. In lower dimensions
/// the value is zero and so is the gradient.
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock {
    variant: RosenbrockGradient,
}

impl Rosenbrock {
    /// Initializes the function with the [basic](RosenbrockGradient::Basic)
    /// gradient.
    pub const fn new() -> Self {
        Self::with_gradient(RosenbrockGradient::Basic)
    }

    /// Initializes the function with the
    /// [coupled](RosenbrockGradient::Coupled) gradient.
    pub const fn bonus() -> Self {
        Self::with_gradient(RosenbrockGradient::Coupled)
    }

    /// Initializes the function with given gradient formula.
    pub const fn with_gradient(variant: RosenbrockGradient) -> Self {
        Self { variant }
    }

    /// Gets the gradient formula.
    pub fn variant(&self) -> RosenbrockGradient {
        self.variant
    }
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem for Rosenbrock {
    fn name(&self) -> &str {
        match self.variant {
            RosenbrockGradient::Basic => "Rosenbrock",
            RosenbrockGradient::Coupled => "Rosenbrock_Bonus",
        }
    }

    fn min_dim(&self) -> usize {
        2
    }

    fn bounds(&self) -> (f64, f64) {
        BOUNDS
    }
}

impl Function for Rosenbrock {
    fn apply<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> f64
    where
        Sx: Storage<f64, Dynamic>,
    {
        (1..x.nrows())
            .map(|i| 100.0 * (x[i] - x[i - 1].powi(2)).powi(2) + (1.0 - x[i - 1]).powi(2))
            .sum()
    }

    fn gradient<Sx, Sg>(&self, x: &Vector<f64, Dynamic, Sx>, grad: &mut Vector<f64, Dynamic, Sg>)
    where
        Sx: Storage<f64, Dynamic>,
        Sg: StorageMut<f64, Dynamic>,
    {
        let n = x.nrows();

        if n < 2 {
            grad.fill(0.0);
            return;
        }

        // Derivative of the summand where x_i is squared.
        let outgoing = |i: usize| -400.0 * x[i] * (x[i + 1] - x[i].powi(2)) - 2.0 * (1.0 - x[i]);
        // Derivative of the summand where x_i is the leading variable.
        let incoming = |i: usize| 200.0 * (x[i] - x[i - 1].powi(2));

        for i in 0..n - 1 {
            grad[i] = match self.variant {
                RosenbrockGradient::Coupled if i > 0 => outgoing(i) + incoming(i),
                _ => outgoing(i),
            };
        }

        grad[n - 1] = incoming(n - 1);
    }
}

/// Tag of a registered objective.
///
/// Names are matched case-insensitively.
///
/// ```rust
/// use steepest::objective::ObjectiveKind;
///
/// let kind: ObjectiveKind = "rosenbrock_bonus".parse().unwrap();
/// assert_eq!(kind, ObjectiveKind::RosenbrockBonus);
/// assert_eq!(kind.to_string(), "Rosenbrock_Bonus");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    /// See [`Quadratic`].
    Quadratic,
    /// See [`Rosenbrock`] with [basic](RosenbrockGradient::Basic) gradient.
    Rosenbrock,
    /// See [`Rosenbrock`] with [coupled](RosenbrockGradient::Coupled)
    /// gradient.
    RosenbrockBonus,
}

impl ObjectiveKind {
    /// All registered objectives.
    pub const ALL: [ObjectiveKind; 3] = [
        ObjectiveKind::Quadratic,
        ObjectiveKind::Rosenbrock,
        ObjectiveKind::RosenbrockBonus,
    ];

    /// Looks up an objective by its case-insensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectiveKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(ValidationError::UnknownObjective)
    }
}

impl Problem for ObjectiveKind {
    fn name(&self) -> &str {
        match self {
            ObjectiveKind::Quadratic => "Quadratic",
            ObjectiveKind::Rosenbrock => "Rosenbrock",
            ObjectiveKind::RosenbrockBonus => "Rosenbrock_Bonus",
        }
    }

    fn min_dim(&self) -> usize {
        match self {
            ObjectiveKind::Quadratic => Quadratic.min_dim(),
            ObjectiveKind::Rosenbrock | ObjectiveKind::RosenbrockBonus => Rosenbrock::new().min_dim(),
        }
    }

    fn bounds(&self) -> (f64, f64) {
        BOUNDS
    }
}

impl Function for ObjectiveKind {
    fn apply<Sx>(&self, x: &Vector<f64, Dynamic, Sx>) -> f64
    where
        Sx: Storage<f64, Dynamic>,
    {
        match self {
            ObjectiveKind::Quadratic => Quadratic.apply(x),
            ObjectiveKind::Rosenbrock => Rosenbrock::new().apply(x),
            ObjectiveKind::RosenbrockBonus => Rosenbrock::bonus().apply(x),
        }
    }

    fn gradient<Sx, Sg>(&self, x: &Vector<f64, Dynamic, Sx>, grad: &mut Vector<f64, Dynamic, Sg>)
    where
        Sx: Storage<f64, Dynamic>,
        Sg: StorageMut<f64, Dynamic>,
    {
        match self {
            ObjectiveKind::Quadratic => Quadratic.gradient(x, grad),
            ObjectiveKind::Rosenbrock => Rosenbrock::new().gradient(x, grad),
            ObjectiveKind::RosenbrockBonus => Rosenbrock::bonus().gradient(x, grad),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use nalgebra::{dvector, DVector};

    fn gradient_of<F: Function>(f: &F, x: &DVector<f64>) -> DVector<f64> {
        let mut grad = DVector::zeros(x.nrows());
        f.gradient(x, &mut grad);
        grad
    }

    #[test]
    fn quadratic_value_and_gradient() {
        let x = dvector![1.0, -2.0, 3.0];

        assert_eq!(Quadratic.apply(&x), 14.0);
        assert_eq!(gradient_of(&Quadratic, &x), dvector![2.0, -4.0, 6.0]);
    }

    #[test]
    fn quadratic_gradient_is_doubled_point() {
        for dim in 1..=100 {
            let x = DVector::from_fn(dim, |i, _| (i as f64 - 50.0) * 199.7);
            let grad = gradient_of(&Quadratic, &x);
            assert_eq!(grad, &x * 2.0);
        }
    }

    #[test]
    fn quadratic_one_dimensional() {
        assert_eq!(Quadratic.min_dim(), 1);
        assert_eq!(gradient_of(&Quadratic, &dvector![1.0]), dvector![2.0]);
    }

    #[test]
    fn rosenbrock_optimum() {
        let x = dvector![1.0, 1.0, 1.0, 1.0];

        for f in [Rosenbrock::new(), Rosenbrock::bonus()] {
            assert_eq!(f.apply(&x), 0.0);
            assert_eq!(gradient_of(&f, &x), DVector::zeros(4));
        }
    }

    #[test]
    fn rosenbrock_value() {
        // 100 (0 - 0)^2 + (1 - 0)^2 + 100 (2 - 0)^2 + (1 - 0)^2
        let x = dvector![0.0, 0.0, 2.0];
        assert_eq!(Rosenbrock::new().apply(&x), 402.0);
    }

    #[test]
    fn rosenbrock_basic_gradient() {
        let grad = gradient_of(&Rosenbrock::new(), &dvector![0.5, 0.5, 0.5]);

        assert_relative_eq!(grad[0], -51.0);
        assert_relative_eq!(grad[1], -51.0);
        assert_relative_eq!(grad[2], 50.0);
    }

    #[test]
    fn rosenbrock_bonus_adds_coupling_term() {
        let grad = gradient_of(&Rosenbrock::bonus(), &dvector![0.5, 0.5, 0.5]);

        assert_relative_eq!(grad[0], -51.0);
        assert_relative_eq!(grad[1], -1.0);
        assert_relative_eq!(grad[2], 50.0);
    }

    #[test]
    fn rosenbrock_variants_agree_in_two_dimensions() {
        let x = dvector![-1.2, 1.0];
        assert_eq!(
            gradient_of(&Rosenbrock::new(), &x),
            gradient_of(&Rosenbrock::bonus(), &x)
        );
    }

    #[test]
    fn rosenbrock_bonus_is_exact_gradient() {
        let f = Rosenbrock::bonus();
        let x = dvector![-1.2, 0.7, 1.3, -0.4];
        let grad = gradient_of(&f, &x);
        let h = 1e-6;

        for i in 0..x.nrows() {
            let mut xp = x.clone();
            let mut xm = x.clone();
            xp[i] += h;
            xm[i] -= h;
            let fd = (f.apply(&xp) - f.apply(&xm)) / (2.0 * h);
            assert_relative_eq!(grad[i], fd, max_relative = 1e-5);
        }
    }

    #[test]
    fn rosenbrock_degenerate_dimension() {
        let f = Rosenbrock::new();
        let x = dvector![3.0];

        assert_eq!(f.apply(&x), 0.0);
        assert_eq!(gradient_of(&f, &x), dvector![0.0]);
        assert_eq!(f.min_dim(), 2);
    }

    #[test]
    fn gradient_magnitude_is_euclidean_norm() {
        let v = dvector![3.0, 4.0];

        assert_eq!(Quadratic.gradient_magnitude(&v), 5.0);
        assert_eq!(ObjectiveKind::Rosenbrock.gradient_magnitude(&v), 5.0);
    }

    #[test]
    fn registry_lookup_is_case_insensitive() {
        assert_eq!(
            ObjectiveKind::from_name("QUADRATIC"),
            Some(ObjectiveKind::Quadratic)
        );
        assert_eq!(
            ObjectiveKind::from_name("RosenBrock"),
            Some(ObjectiveKind::Rosenbrock)
        );
        assert_eq!(
            ObjectiveKind::from_name("rosenbrock_BONUS"),
            Some(ObjectiveKind::RosenbrockBonus)
        );
        assert_eq!(ObjectiveKind::from_name("sphere"), None);
        assert!(matches!(
            "himmelblau".parse::<ObjectiveKind>(),
            Err(ValidationError::UnknownObjective)
        ));
    }

    #[test]
    fn registry_dispatches_to_objectives() {
        let x = dvector![0.5, 0.5, 0.5];

        for kind in ObjectiveKind::ALL {
            assert_eq!(kind.bounds(), (-5.0, 5.0));
        }

        assert_eq!(
            gradient_of(&ObjectiveKind::Rosenbrock, &x),
            gradient_of(&Rosenbrock::new(), &x)
        );
        assert_eq!(
            gradient_of(&ObjectiveKind::RosenbrockBonus, &x),
            gradient_of(&Rosenbrock::bonus(), &x)
        );
        assert_eq!(
            ObjectiveKind::Quadratic.apply(&x),
            Quadratic.apply(&x)
        );
        assert_eq!(ObjectiveKind::RosenbrockBonus.name(), Rosenbrock::bonus().name());
    }
}
