//! The `check` command: validate scripts without running them.
//!
//! A script passes when its block structure builds into a graph and every
//! plain statement starts with a keyword or builtin name. Multiple files
//! are checked in parallel.

use rayon::prelude::*;

use slate_diagnostic::emitter::DiagnosticEmitter;
use slate_diagnostic::Diagnostic;
use slate_eval::{Builtin, EvalError, Keyword};
use slate_ir::StatementKind;
use slate_parse::{build_graph_with, ParseConfig};

use super::{describe_read_error, stderr_emitter};

/// Why a file failed before any statement could be checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckFailure {
    Read(String),
    Structure(Diagnostic),
}

/// Result of checking one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckReport {
    pub path: String,
    /// The text that was checked, kept for rendering snippets.
    pub source: String,
    /// Number of statements, or the failure that stopped the check.
    pub statements: Result<usize, CheckFailure>,
    /// Statement-level problems and warnings, in line order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.statements.is_ok() && self.diagnostics.iter().all(|d| !d.is_error())
    }
}

/// Check one script's structure and instructions.
pub fn check_source(
    source: &str,
    config: ParseConfig,
) -> Result<(usize, Vec<Diagnostic>), Diagnostic> {
    let graph = build_graph_with(source, config).map_err(|err| err.to_diagnostic())?;
    let unknown = graph
        .iter()
        .filter(|(_, node)| node.kind() == StatementKind::Plain)
        .filter_map(|(_, node)| {
            let word = node.text.split_whitespace().next()?;
            let known = word.starts_with('#')
                || Keyword::from_word(word).is_some()
                || Builtin::from_name(word).is_some();
            (!known).then(|| {
                EvalError::UnknownInstruction {
                    word: word.to_string(),
                }
                .to_diagnostic(node.line)
            })
        });
    let mut diagnostics: Vec<Diagnostic> =
        graph.warnings().iter().cloned().chain(unknown).collect();
    diagnostics.sort_by_key(|d| d.line);
    Ok((graph.len(), diagnostics))
}

/// Check every path in parallel. Reports keep the order of `paths`.
pub fn check_paths(paths: &[String], config: ParseConfig) -> Vec<CheckReport> {
    paths
        .par_iter()
        .map(|path| match std::fs::read_to_string(path) {
            Err(err) => CheckReport {
                path: path.clone(),
                source: String::new(),
                statements: Err(CheckFailure::Read(describe_read_error(path, &err))),
                diagnostics: Vec::new(),
            },
            Ok(source) => {
                let (statements, diagnostics) = match check_source(&source, config) {
                    Ok((count, diagnostics)) => (Ok(count), diagnostics),
                    Err(diagnostic) => (Err(CheckFailure::Structure(diagnostic)), Vec::new()),
                };
                CheckReport {
                    path: path.clone(),
                    source,
                    statements,
                    diagnostics,
                }
            }
        })
        .collect()
}

/// Check files, print a line per file and exit 1 if any failed.
pub fn check_files(paths: &[String], config: ParseConfig) {
    let reports = check_paths(paths, config);
    let mut failed = 0;

    for report in &reports {
        let mut emitter = stderr_emitter(&report.source, &report.path);
        match &report.statements {
            Err(CheckFailure::Read(message)) => eprintln!("{message}"),
            Err(CheckFailure::Structure(diagnostic)) => emitter.emit(diagnostic),
            Ok(count) => {
                emitter.emit_all(&report.diagnostics);
                if report.is_ok() {
                    println!("OK {} ({count} statement{})", report.path, plural_s(*count));
                }
            }
        }
        emitter.flush();
        if !report.is_ok() {
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} file{} failed", reports.len(), plural_s(reports.len()));
        std::process::exit(1);
    }
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
