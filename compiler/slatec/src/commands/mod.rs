//! Command handlers for the `slate` CLI.
//!
//! Each submodule implements one command. The `*_source` / `*_paths`
//! functions are pure and return their results; the `*_file` wrappers do
//! the I/O, print diagnostics and pick the exit code.

use std::io::Stderr;

use slate_diagnostic::emitter::{ColorMode, TerminalEmitter};
use slate_parse::{ParseConfig, StructureError};
use slate_store::StoreError;
use thiserror::Error;

mod check;
mod explain;
mod graph;
mod run;

pub use check::{check_files, check_paths, check_source, CheckFailure, CheckReport};
pub use explain::{explain_error, explanation_for};
pub use graph::{graph_file, render_graph, GraphFormat};
pub use run::{parse_run_options, run_file, run_source, RunOptions, RunReport};

/// Failure of a command before or outside script execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error("could not set up session user: {0}")]
    Store(#[from] StoreError),
    #[error("could not serialize graph: {0}")]
    Json(#[from] serde_json::Error),
}

/// Human-readable message for a failed read of `path`.
pub(crate) fn describe_read_error(path: &str, err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {err}"),
    }
}

/// Read a script, exiting with a message if it cannot be read.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}", describe_read_error(path, &e));
            std::process::exit(1);
        }
    }
}

/// Stderr emitter that can show source snippets for `path`.
pub(super) fn stderr_emitter(source: &str, path: &str) -> TerminalEmitter<Stderr> {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    TerminalEmitter::with_color_mode(std::io::stderr(), ColorMode::Auto, is_tty)
        .with_source(source)
        .with_file_path(path)
}

/// Parse a `--capacity=<n>` value.
pub(crate) fn parse_capacity(value: &str) -> Result<ParseConfig, String> {
    match value.parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(ParseConfig { capacity }),
        _ => Err(format!("invalid capacity '{value}': expected a positive integer")),
    }
}

/// Parse flags for commands whose only option is `--capacity=<n>`.
pub fn parse_capacity_arg(flags: &[String]) -> Result<ParseConfig, String> {
    let mut config = ParseConfig::default();
    for flag in flags {
        match flag.strip_prefix("--capacity=") {
            Some(value) => config = parse_capacity(value)?,
            None => return Err(format!("unknown option '{flag}'")),
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests;
