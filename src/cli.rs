//! Interactive console protocol.
//!
//! The session asks whether to enter the program, where to take the
//! configuration from (a file or manual input) and where to send the trace
//! (a file or the console). The streams are generic, so that the protocol can
//! be driven by anything implementing [`BufRead`] and [`Write`].
//!
//! ```rust
//! use steepest::cli::Console;
//!
//! let input = "1\n1\n1\nquadratic\n1\n10\n0.0001\n0.5\n1.0\n";
//! let mut console = Console::new(input.as_bytes(), Vec::new());
//! console.run().expect("session failed");
//!
//! let output = String::from_utf8(console.into_output()).unwrap();
//! assert!(output.ends_with("Optimization process completed.\n"));
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, warn};
use thiserror::Error;

use crate::config::{self, ConfigError, Field, RunConfig};
use crate::runner::{RunError, Runner};
use crate::trace::{FileSink, StreamSink, Trace, TraceSink};
use crate::validation;

const ENTER_PROMPT: &str = "Press 0 to exit or 1 to enter the program:";
const INPUT_PROMPT: &str = "Press 0 for .txt input or 1 for manual input:";
const OUTPUT_PROMPT: &str = "Press 0 for .txt output or 1 for console output:";
const BINARY_COMPLAINT: &str = "Please enter a valid input (0 or 1).";

/// Error that ends the session prematurely.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input ended while an answer was expected.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// Reading from or writing to the console failed.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The optimization failed.
    #[error("{0}")]
    Run(#[from] RunError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    File,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    File,
    Console,
}

/// Interactive session over a pair of streams.
pub struct Console<R, W> {
    input: R,
    output: W,
    runner: Runner,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates the session with a default [`Runner`].
    pub fn new(input: R, output: W) -> Self {
        Self::with_runner(input, output, Runner::new())
    }

    /// Creates the session with given runner.
    pub fn with_runner(input: R, output: W, runner: Runner) -> Self {
        Self {
            input,
            output,
            runner,
        }
    }

    /// Returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the whole session.
    pub fn run(&mut self) -> Result<(), CliError> {
        if !self.choose(ENTER_PROMPT)? {
            self.say("Exiting Program...")?;
            return Ok(());
        }

        let source = if self.choose(INPUT_PROMPT)? {
            Source::Manual
        } else {
            Source::File
        };

        let target = if self.choose(OUTPUT_PROMPT)? {
            Target::Console
        } else {
            Target::File
        };

        debug!("session with {:?} input and {:?} output", source, target);

        match source {
            Source::File => self.file_session(target),
            Source::Manual => self.manual_session(target),
        }
    }

    fn file_session(&mut self, target: Target) -> Result<(), CliError> {
        let path = self.ask("Please provide the path to the config file:")?;

        let config = match RunConfig::from_file(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!("cannot load {}: {:?}", path, error);
                return self.say(&error.to_string());
            }
        };

        let report = self.runner.run(&config)?;

        // Errors of a loaded configuration always go to the console.
        if report.is_rejected() {
            self.deliver(report.trace(), Target::Console)
        } else {
            self.deliver(report.trace(), target)
        }
    }

    fn manual_session(&mut self, target: Target) -> Result<(), CliError> {
        let name = self.ask("Enter the choice of objective function (quadratic or rosenbrock):")?;
        let dim = self.ask_with("Enter the dimensionality of the problem:", |text| {
            config::parse_integer(Field::Dimensionality, text)
        })?;
        let max_iters = self.ask_with("Enter the number of iterations:", |text| {
            config::parse_integer(Field::Iterations, text)
        })?;
        let tolerance = self.ask_with("Enter the tolerance:", |text| {
            config::parse_real(Field::Tolerance, text)
        })?;
        let step_size = self.ask_with("Enter the step size:", |text| {
            config::parse_real(Field::StepSize, text)
        })?;

        if let Err(error) = validation::validate_name(&name) {
            let mut trace = Trace::new();
            trace.push(error.to_string());
            return self.deliver(&trace, target);
        }

        let prompt = format!("Enter the initial point as {} space-separated values:", dim);
        let x0 = self.ask_with(&prompt, config::parse_point)?;

        let config = RunConfig::new(name, dim, max_iters, tolerance, step_size, x0);
        let report = self.runner.run(&config)?;
        self.deliver(report.trace(), target)
    }

    fn deliver(&mut self, trace: &Trace, target: Target) -> Result<(), CliError> {
        match target {
            Target::Console => StreamSink::new(&mut self.output).sink(trace)?,
            Target::File => {
                let path = self.ask("Please provide the path for the output file:")?;
                if let Err(error) = FileSink::new(&path).sink(trace) {
                    warn!("cannot write {}: {}", path, error);
                    self.say("Error writing the file.")?;
                }
            }
        }

        Ok(())
    }

    fn choose(&mut self, prompt: &str) -> Result<bool, CliError> {
        loop {
            match self.ask(prompt)?.parse::<i32>() {
                Ok(0) => return Ok(false),
                Ok(1) => return Ok(true),
                _ => self.say(BINARY_COMPLAINT)?,
            }
        }
    }

    fn ask_with<T, P>(&mut self, prompt: &str, parse: P) -> Result<T, CliError>
    where
        P: Fn(&str) -> Result<T, ConfigError>,
    {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(error) => self.say(&error.to_string())?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        self.say(prompt)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::UnexpectedEof);
        }

        Ok(line.trim().to_string())
    }

    fn say(&mut self, line: &str) -> Result<(), CliError> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()?;
        Ok(())
    }
}
