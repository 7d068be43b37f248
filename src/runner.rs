//! Coordination of a single run: validation, optimization and assembling of
//! the trace.
//!
//! A run either fails validation, in which case its trace is the single error
//! line, or it produces the full optimization trace. No optimization is
//! performed for a rejected configuration.

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::DVector;
use thiserror::Error;

use crate::algo::steepest_descent::{SteepestDescent, SteepestDescentError, SteepestDescentOptions};
use crate::config::RunConfig;
use crate::core::Problem;
use crate::driver::{OptimizerDriver, Status};
use crate::rounding::{fixed, raw_vector};
use crate::trace::Trace;
use crate::validation::{self, ValidationError};

/// Options for [`Runner`].
#[derive(Debug, Clone, Copy, Default, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct RunnerOptions {
    /// Prepend the settings of the run to the trace. Default: `false`.
    summary: bool,
}

/// Error of the optimizer during a run that passed validation.
#[derive(Debug, Error)]
pub enum RunError {
    /// The optimizer failed.
    #[error("{0}")]
    Optimizer(#[from] SteepestDescentError),
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The configuration was rejected before optimizing.
    Rejected(ValidationError),
    /// The optimization finished.
    Finished(Status),
}

/// Trace of a run together with its verdict.
#[derive(Debug, Clone)]
pub struct Report {
    trace: Trace,
    verdict: Verdict,
}

impl Report {
    /// Returns the trace.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the report, returning the trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Returns how the run ended.
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Checks whether the configuration was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self.verdict, Verdict::Rejected(_))
    }
}

/// Runs configurations.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: RunnerOptions,
}

impl Runner {
    /// Creates the runner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the runner with given options.
    pub fn with_options(options: RunnerOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Validates the configuration and, if it is valid, runs the optimization.
    pub fn run(&self, config: &RunConfig) -> Result<Report, RunError> {
        let x0 = DVector::from_column_slice(config.initial_point());

        let kind = match validation::validate(config.objective_name(), config.dimensionality(), &x0) {
            Ok(kind) => kind,
            Err(error) => {
                debug!("configuration rejected: {}", error);

                let mut trace = Trace::new();
                trace.push(error.to_string());
                return Ok(Report {
                    trace,
                    verdict: Verdict::Rejected(error),
                });
            }
        };

        let mut options = SteepestDescentOptions::default();
        options.set_step_size(config.step_size());

        let mut optimizer = OptimizerDriver::builder(&kind)
            .with_initial(config.initial_point().clone())
            .with_max_iters(config.max_iters())
            .with_tolerance(config.tolerance())
            .with_algo(|f, dom| SteepestDescent::with_options(f, dom, options))
            .build();

        debug!(
            "running {} on {} in {} dimensions",
            optimizer.name(),
            kind.name(),
            config.dimensionality()
        );

        let outcome = optimizer.run()?;
        let status = outcome.status();

        let mut trace = Trace::new();
        if self.options.summary() {
            trace.append(summary(kind.name(), config));
        }
        trace.append(outcome.into_trace());

        Ok(Report {
            trace,
            verdict: Verdict::Finished(status),
        })
    }
}

/// Settings of a run as they are written before the optimization trace.
pub fn summary(name: &str, config: &RunConfig) -> Trace {
    let mut trace = Trace::new();
    trace.push(format!("Objective Function: {}", name));
    trace.push(format!("Dimensionality: {}", config.dimensionality()));
    trace.push(format!("Initial Point: {}", raw_vector(config.initial_point().iter())));
    trace.push(format!("Iterations: {}", config.max_iters()));
    trace.push(format!("Tolerance: {}", fixed(config.tolerance())));
    trace.push(format!("Step Size: {}", fixed(config.step_size())));
    trace.blank();
    trace.push("Optimization process:");
    trace
}

/// Runs the configuration with default options.
pub fn run(config: &RunConfig) -> Result<Report, RunError> {
    Runner::new().run(config)
}
