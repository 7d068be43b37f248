//! Run configuration and its plain text file format.
//!
//! The file holds one value per line, each trimmed before parsing:
//!
//! ```text
//! <objective name>
//! <dimensionality>
//! <maximum number of iterations>
//! <tolerance>
//! <step size>
//! <x1> <x2> ... <xn>
//! ```
//!
//! Parsing checks only the format. Whether the values make sense together
//! is decided by [validation](crate::validation).

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use getset::{CopyGetters, Getters};
use thiserror::Error;

/// Error encountered while reading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Error reading the file.")]
    Io(#[from] io::Error),
    /// A line is missing.
    #[error("missing {0}")]
    MissingField(Field),
    /// A value is not an unsigned integer.
    #[error("invalid {field}: expected an integer, got '{value}'")]
    InvalidInteger {
        /// Field with the invalid value.
        field: Field,
        /// The offending text.
        value: String,
    },
    /// A value is not a real number.
    #[error("invalid {field}: expected a real number, got '{value}'")]
    InvalidReal {
        /// Field with the invalid value.
        field: Field,
        /// The offending text.
        value: String,
    },
}

/// Fields of the configuration, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Name of the objective function.
    Objective,
    /// Dimensionality of the problem.
    Dimensionality,
    /// Maximum number of iterations.
    Iterations,
    /// Tolerance on the gradient magnitude.
    Tolerance,
    /// Step size.
    StepSize,
    /// Initial point.
    InitialPoint,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Objective => "objective function",
            Field::Dimensionality => "dimensionality",
            Field::Iterations => "number of iterations",
            Field::Tolerance => "tolerance",
            Field::StepSize => "step size",
            Field::InitialPoint => "initial point",
        };
        f.write_str(name)
    }
}

/// Parses an unsigned integer value of given field.
pub fn parse_integer(field: Field, text: &str) -> Result<usize, ConfigError> {
    let text = text.trim();
    text.parse().map_err(|_| ConfigError::InvalidInteger {
        field,
        value: text.to_string(),
    })
}

/// Parses a real value of given field.
pub fn parse_real(field: Field, text: &str) -> Result<f64, ConfigError> {
    let text = text.trim();
    text.parse().map_err(|_| ConfigError::InvalidReal {
        field,
        value: text.to_string(),
    })
}

/// Parses whitespace-separated real values.
pub fn parse_point(text: &str) -> Result<Vec<f64>, ConfigError> {
    text.split_whitespace()
        .map(|token| parse_real(Field::InitialPoint, token))
        .collect()
}

/// Settings of a single optimization run.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct RunConfig {
    /// Name of the objective function as given by the user.
    #[getset(get = "pub")]
    objective_name: String,
    /// Declared dimensionality.
    #[getset(get_copy = "pub")]
    dimensionality: usize,
    /// Maximum number of iterations.
    #[getset(get_copy = "pub")]
    max_iters: usize,
    /// Tolerance on the gradient magnitude.
    #[getset(get_copy = "pub")]
    tolerance: f64,
    /// Constant step size.
    #[getset(get_copy = "pub")]
    step_size: f64,
    /// Initial point. Its length is not required to match the dimensionality.
    #[getset(get = "pub")]
    initial_point: Vec<f64>,
}

impl RunConfig {
    /// Creates the configuration.
    pub fn new(
        objective_name: impl Into<String>,
        dimensionality: usize,
        max_iters: usize,
        tolerance: f64,
        step_size: f64,
        initial_point: Vec<f64>,
    ) -> Self {
        Self {
            objective_name: objective_name.into(),
            dimensionality,
            max_iters,
            tolerance,
            step_size,
            initial_point,
        }
    }

    /// Reads the configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        fs::read_to_string(path)?.parse()
    }
}

impl FromStr for RunConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let mut next = |field| lines.next().ok_or(ConfigError::MissingField(field));

        let objective_name = next(Field::Objective)?.trim().to_string();
        let dimensionality = parse_integer(Field::Dimensionality, next(Field::Dimensionality)?)?;
        let max_iters = parse_integer(Field::Iterations, next(Field::Iterations)?)?;
        let tolerance = parse_real(Field::Tolerance, next(Field::Tolerance)?)?;
        let step_size = parse_real(Field::StepSize, next(Field::StepSize)?)?;
        let initial_point = parse_point(next(Field::InitialPoint)?)?;

        Ok(Self {
            objective_name,
            dimensionality,
            max_iters,
            tolerance,
            step_size,
            initial_point,
        })
    }
}
