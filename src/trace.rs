//! Human-readable record of a run.
//!
//! A [`Trace`] is an append-only sequence of lines. It is produced in memory
//! and handed to a [`TraceSink`] once the run is over. Empty lines are part of
//! the trace and are preserved by every sink.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

/// Ordered, append-only sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    lines: Vec<String>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Appends all lines of another trace.
    pub fn append(&mut self, other: Trace) {
        self.lines.extend(other.lines);
    }

    /// Gets the lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Gets the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks whether there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Gets the last line, if any.
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Writes every line followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lines
            .iter()
            .try_for_each(|line| writeln!(f, "{}", line))
    }
}

impl<S: Into<String>> FromIterator<S> for Trace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Destination of a finished trace.
pub trait TraceSink {
    /// Consumes the trace.
    fn sink(&mut self, trace: &Trace) -> io::Result<()>;
}

/// Sink writing to a stream, such as standard output.
pub struct StreamSink<W> {
    writer: W,
}

impl<W: Write> StreamSink<W> {
    /// Wraps the stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for StreamSink<W> {
    fn sink(&mut self, trace: &Trace) -> io::Result<()> {
        trace.write_to(&mut self.writer)
    }
}

/// Sink writing to a file, truncating it if it exists.
///
/// The file is opened only when the trace is sunk and closed before
/// [`sink`](TraceSink::sink) returns, on success and on error.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates the sink for given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Gets the path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSink for FileSink {
    fn sink(&mut self, trace: &Trace) -> io::Result<()> {
        debug!("writing {} lines to {}", trace.len(), self.path.display());
        let file = File::create(&self.path)?;
        trace.write_to(BufWriter::new(file))
    }
}
