//! Input sources for `INPUT`.

use std::collections::VecDeque;
use std::fmt;
use std::io::BufRead;

/// Where `INPUT` reads its line from.
#[derive(Default)]
pub enum InputSource {
    /// Block on one line of standard input.
    #[default]
    Stdin,
    /// Read lines from any buffered reader.
    Reader(Box<dyn BufRead + Send>),
    /// Pre-supplied lines, consumed front to back.
    Scripted(VecDeque<String>),
    /// Never read; `INPUT` suspends the session and the caller resumes it
    /// with the line.
    Deferred,
}

/// Result of asking an [`InputSource`] for a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// One line, trailing newline stripped, inner spaces kept.
    Line(String),
    /// No more input.
    Exhausted,
    /// The read itself failed; carries the I/O error text.
    Failed(String),
    /// The caller supplies the line later.
    Deferred,
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("Stdin"),
            InputSource::Reader(_) => f.write_str("Reader(..)"),
            InputSource::Scripted(lines) => f.debug_tuple("Scripted").field(lines).finish(),
            InputSource::Deferred => f.write_str("Deferred"),
        }
    }
}

impl InputSource {
    pub fn scripted<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InputSource::Scripted(lines.into_iter().map(Into::into).collect())
    }

    pub fn reader(reader: impl BufRead + Send + 'static) -> Self {
        InputSource::Reader(Box::new(reader))
    }

    pub fn read_line(&mut self) -> InputOutcome {
        match self {
            InputSource::Stdin => read_from(&mut std::io::stdin().lock()),
            InputSource::Reader(reader) => read_from(reader),
            InputSource::Scripted(lines) => lines
                .pop_front()
                .map_or(InputOutcome::Exhausted, |line| {
                    InputOutcome::Line(strip_newline(&line).to_string())
                }),
            InputSource::Deferred => InputOutcome::Deferred,
        }
    }
}

fn read_from(reader: &mut dyn BufRead) -> InputOutcome {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => InputOutcome::Exhausted,
        Ok(_) => InputOutcome::Line(strip_newline(&line).to_string()),
        Err(err) => InputOutcome::Failed(err.to_string()),
    }
}

/// Drop one trailing `\n` or `\r\n`.
pub fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
