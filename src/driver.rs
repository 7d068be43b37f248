//! High-level API for running the optimization.
//!
//! The driver encapsulates all internal state of a run and produces the
//! [`Trace`] of it. The simplest way of using the driver is to initialize it
//! with an initial point and run it:
//!
//! ```rust
//! use steepest::objective::Quadratic;
//! use steepest::OptimizerDriver;
//!
//! let f = Quadratic;
//! let mut optimizer = OptimizerDriver::builder(&f)
//!     .with_initial(vec![1.0])
//!     .build();
//!
//! let outcome = optimizer.run().expect("optimizer encountered an error");
//! println!("{}", outcome.trace());
//! ```
//!
//! If you need to specify additional settings, use the builder:
//!
//! ```rust
//! use steepest::algo::steepest_descent::{SteepestDescent, SteepestDescentOptions};
//! use steepest::objective::ObjectiveKind;
//! use steepest::{OptimizerDriver, Status};
//!
//! let f = ObjectiveKind::Rosenbrock;
//! let mut options = SteepestDescentOptions::default();
//! options.set_step_size(0.001);
//!
//! let mut optimizer = OptimizerDriver::builder(&f)
//!     .with_initial(vec![1.0, 1.0])
//!     .with_max_iters(5)
//!     .with_tolerance(1e-4)
//!     .with_algo(|f, dom| SteepestDescent::with_options(f, dom, options))
//!     .build();
//!
//! let outcome = optimizer.run().expect("optimizer encountered an error");
//! assert_eq!(outcome.status(), Status::Converged { iterations: 2 });
//! ```
//!
//! # Trace
//!
//! Every iteration contributes a block
//!
//! ```text
//! Iteration <t>:
//! Objective Function Value: <f(x)>
//! x-values: <x1> <x2> ... <xn>
//! Current Tolerance: <|g|>
//! ```
//!
//! followed by an empty line. The tolerance line is missing in the first
//! iteration. The reported tolerance is the gradient magnitude that was
//! computed in the *previous* iteration, which is also the value the stopping
//! criterion compares against the tolerance.
//!
//! When the tolerance is satisfied, one more block is emitted for the final
//! point, with the function value in canonical rather than fixed notation.
//! The trace ends with the verdict and `Optimization process completed.`.

use log::{info, warn};
use nalgebra::DVector;

use crate::algo::SteepestDescent;
use crate::core::{Domain, Function, Optimizer};
use crate::rounding::{fixed, fixed_vector, floor5, raw_grid};
use crate::trace::Trace;

/// Default maximum number of iterations.
pub const DEFAULT_MAX_ITERS: usize = 100;

/// Default tolerance on the gradient magnitude.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

type DefaultFactory<F> = fn(&F, &Domain) -> SteepestDescent;

/// Builder for the [`OptimizerDriver`].
pub struct OptimizerBuilder<'a, F: Function, FA> {
    f: &'a F,
    x0: DVector<f64>,
    max_iters: usize,
    tolerance: f64,
    factory: FA,
}

impl<'a, F: Function> OptimizerBuilder<'a, F, DefaultFactory<F>> {
    fn new(f: &'a F) -> Self {
        let x0 = DVector::zeros(f.min_dim());

        Self {
            f,
            x0,
            max_iters: DEFAULT_MAX_ITERS,
            tolerance: DEFAULT_TOLERANCE,
            factory: SteepestDescent::new::<F>,
        }
    }
}

impl<'a, F: Function, FA> OptimizerBuilder<'a, F, FA> {
    /// Sets the initial point from which the iterative process starts. Its
    /// length determines the dimension of the problem.
    pub fn with_initial(mut self, x0: Vec<f64>) -> Self {
        self.x0 = DVector::from_vec(x0);
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the tolerance on the gradient magnitude.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets specific algorithm to be used.
    ///
    /// This builder method accepts a closure that takes the reference to the
    /// problem and its domain. For the default options, you can simply pass
    /// the `new` constructor directly (e.g., `SteepestDescent::new`).
    pub fn with_algo<A, FA2>(self, factory: FA2) -> OptimizerBuilder<'a, F, FA2>
    where
        FA2: FnOnce(&F, &Domain) -> A,
    {
        OptimizerBuilder {
            f: self.f,
            x0: self.x0,
            max_iters: self.max_iters,
            tolerance: self.tolerance,
            factory,
        }
    }

    /// Builds the [`OptimizerDriver`].
    ///
    /// The initial point is *not* projected into the domain, it is the
    /// responsibility of the caller to [validate](crate::validation) it.
    pub fn build<A>(self) -> OptimizerDriver<'a, F, A>
    where
        FA: FnOnce(&F, &Domain) -> A,
    {
        let Self {
            f,
            x0,
            max_iters,
            tolerance,
            factory,
        } = self;

        let dom = f.domain(x0.nrows());
        let algo = factory(f, &dom);

        OptimizerDriver {
            f,
            dom,
            algo,
            x: x0,
            max_iters,
            tolerance,
        }
    }
}

/// The driver for the process of optimization.
///
/// Use [`OptimizerDriver::builder`] to create it. For the usage of the
/// driver, see [module](self) documentation.
pub struct OptimizerDriver<'a, F: Function, A> {
    f: &'a F,
    dom: Domain,
    algo: A,
    x: DVector<f64>,
    max_iters: usize,
    tolerance: f64,
}

impl<'a, F: Function> OptimizerDriver<'a, F, SteepestDescent> {
    /// Returns the builder for specifying the settings.
    pub fn builder(f: &'a F) -> OptimizerBuilder<'a, F, DefaultFactory<F>> {
        OptimizerBuilder::new(f)
    }
}

impl<'a, F: Function, A> OptimizerDriver<'a, F, A> {
    /// Returns reference to the current point.
    pub fn x(&self) -> &[f64] {
        self.x.as_slice()
    }

    /// Returns the domain of the problem.
    pub fn domain(&self) -> &Domain {
        &self.dom
    }

    /// Returns the maximum number of iterations.
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the tolerance on the gradient magnitude.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl<'a, F: Function, A: Optimizer<F>> OptimizerDriver<'a, F, A> {
    /// Runs the iterative process until the gradient magnitude drops to the
    /// tolerance or the maximum number of iterations is reached.
    ///
    /// The process starts from the current point, so the driver is meant to
    /// be run once.
    pub fn run(&mut self) -> Result<Outcome, A::Error> {
        let mut trace = Trace::new();

        self.algo.opt_start(self.f, &self.dom, &mut self.x)?;

        let mut current = f64::INFINITY;
        let mut remaining = self.max_iters;

        while current > self.tolerance && remaining > 0 {
            let iter = self.max_iters - remaining + 1;
            let value = fixed(floor5(self.f.apply(&self.x)));
            self.emit_block(&mut trace, iter, value, current);

            current = self.algo.opt_next(self.f, &self.dom, &mut self.x)?;

            if !current.is_finite() {
                warn!("gradient magnitude is {} in iteration {}", current, iter);
            }

            trace.blank();
            remaining -= 1;
        }

        let iter = self.max_iters - remaining + 1;

        let status = if remaining > 0 {
            let value = raw_grid(floor5(self.f.apply(&self.x)));
            self.emit_block(&mut trace, iter, value, current);
            trace.blank();

            trace.push(format!("Convergence reached after {} iterations.", iter));
            Status::Converged { iterations: iter }
        } else {
            trace.push("Maximum iterations reached without satisfying the tolerance.");
            Status::MaxItersReached
        };

        trace.blank();
        trace.push("Optimization process completed.");

        info!("{}: {:?}, |g| = {}", A::NAME, status, current);

        Ok(Outcome {
            trace,
            status,
            x: self.x.as_slice().to_vec(),
            tolerance: current,
        })
    }

    fn emit_block(&self, trace: &mut Trace, iter: usize, value: String, current: f64) {
        trace.push(format!("Iteration {}:", iter));
        trace.push(format!("Objective Function Value: {}", value));
        trace.push(format!("x-values: {}", fixed_vector(self.x.iter())));

        if iter > 1 {
            trace.push(format!("Current Tolerance: {}", fixed(floor5(current))));
        }
    }

    /// Returns the name of the used optimizer.
    pub fn name(&self) -> &str {
        A::NAME
    }
}

/// How the process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The gradient magnitude dropped to the tolerance. The count includes the
    /// final block emitted for the converged point.
    Converged {
        /// Number reported in the verdict.
        iterations: usize,
    },
    /// The maximum number of iterations was exhausted.
    MaxItersReached,
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct Outcome {
    trace: Trace,
    status: Status,
    x: Vec<f64>,
    tolerance: f64,
}

impl Outcome {
    /// Returns the trace of the run.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the outcome, returning the trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Returns how the process ended.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the final point.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the last computed gradient magnitude.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
