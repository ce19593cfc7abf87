//! The Slate interpreter.
//!
//! One [`Interpreter`] is one session: it owns its namespace and runs a
//! script line by line. Per-line errors become diagnostics and never stop
//! the session.
//!
//! Two execution modes exist:
//! - [`ExecMode::Sequential`] runs every non-blank, non-comment line in
//!   source order. Control keywords are not instructions here and are
//!   reported as unknown.
//! - [`ExecMode::Branching`] builds the control-flow graph first and walks
//!   it, evaluating `IF`/`ELIF` conditions to pick edges.
//!
//! With a deferred input source, `INPUT` suspends the session and
//! [`Interpreter::resume`] continues it once the line is available.

mod builder;
mod keywords;
mod walk;

use tracing::{debug, warn};

use slate_diagnostic::Diagnostic;
use slate_ir::{NodeId, Value};
use slate_parse::{build_graph_with, ParseConfig, StructureError};

use crate::errors::{EvalError, EvalResult};
use crate::expr::evaluate;
use crate::input::{strip_newline, InputSource};
use crate::output::SharedOutput;
use crate::{Builtin, Namespace, RuntimeContext};

pub use builder::{InterpreterBuilder, DEFAULT_RESULT_VARIABLE};
pub use keywords::Keyword;

/// How a script is executed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExecMode {
    /// Every line in source order, no branching.
    #[default]
    Sequential,
    /// Walk the control-flow graph, evaluating conditions.
    Branching,
}

/// What the session should do after a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// `INPUT` is waiting for a line for this variable.
    AwaitInput(String),
}

/// A pending `INPUT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputRequest {
    pub variable: String,
    /// 1-based line of the `INPUT` statement.
    pub line: usize,
}

/// Where a suspended session picks up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    /// Index of the next source line (sequential mode).
    Line(usize),
    /// Next graph node (branching mode).
    Node(NodeId),
    /// Nothing left to run.
    End,
}

/// Continuation token for a session stopped at `INPUT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suspension {
    pub request: InputRequest,
    pub cursor: Cursor,
}

/// Result of running (or resuming) a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Suspended(Suspension),
}

/// One interpreter session.
pub struct Interpreter {
    namespace: Namespace,
    context: RuntimeContext,
    output: SharedOutput,
    input: InputSource,
    result_variable: String,
    mode: ExecMode,
    parse_config: ParseConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Interpreter {
    /// Start configuring a session for `context`.
    pub fn builder(context: RuntimeContext) -> InterpreterBuilder {
        InterpreterBuilder::new(context)
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.context
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// Diagnostics reported so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Execute one line, returning its error instead of reporting it.
    ///
    /// Dispatch order: blank and `#` lines are skipped; a leading keyword
    /// (any case) goes to its handler; a leading builtin name evaluates
    /// the whole line and stores the result; anything else is an unknown
    /// instruction.
    pub fn try_exec_line(&mut self, line: &str) -> EvalResult<Step> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Step::Continue);
        }

        let (first, tail) = split_first(line);
        if let Some(keyword) = Keyword::from_word(first) {
            debug!(%keyword, tail, "dispatching keyword");
            return self.exec_keyword(keyword, tail);
        }

        if let Some(builtin) = Builtin::from_name(first) {
            debug!(%builtin, "dispatching builtin call");
            let value = evaluate(line, &self.namespace, &self.context)?;
            let outcome = self.namespace.upsert(&self.result_variable, value)?;
            debug!(variable = %self.result_variable, ?outcome, "stored builtin result");
            return Ok(Step::Continue);
        }

        Err(EvalError::UnknownInstruction {
            word: first.to_string(),
        })
    }

    /// Execute one line, reporting any error against `line_no`.
    pub fn exec_line(&mut self, line_no: usize, line: &str) -> Step {
        match self.try_exec_line(line) {
            Ok(step) => step,
            Err(err) => {
                self.report(line_no, &err);
                Step::Continue
            }
        }
    }

    /// Run a whole script in the configured mode.
    ///
    /// Only branching mode can fail: malformed block structure rejects the
    /// script before any line runs.
    pub fn run(&mut self, source: &str) -> Result<RunOutcome, StructureError> {
        match self.mode {
            ExecMode::Sequential => Ok(self.run_lines(source, 0)),
            ExecMode::Branching => {
                let graph = build_graph_with(source, self.parse_config)?;
                self.diagnostics.extend_from_slice(graph.warnings());
                Ok(self.walk(&graph, graph.entry()))
            }
        }
    }

    /// Continue a suspended run of `source`, binding `input` to the
    /// requested variable first.
    pub fn resume(
        &mut self,
        source: &str,
        suspension: Suspension,
        input: &str,
    ) -> Result<RunOutcome, StructureError> {
        let InputRequest { variable, line } = suspension.request;
        let value = Value::text(strip_newline(input));
        if let Err(err) = self.namespace.upsert(&variable, value) {
            self.report(line, &err.into());
        }

        match suspension.cursor {
            Cursor::Line(index) => Ok(self.run_lines(source, index)),
            Cursor::Node(id) => {
                let graph = build_graph_with(source, self.parse_config)?;
                Ok(self.walk(&graph, Some(id)))
            }
            Cursor::End => Ok(RunOutcome::Completed),
        }
    }

    fn run_lines(&mut self, source: &str, start: usize) -> RunOutcome {
        for (index, raw) in source.lines().enumerate().skip(start) {
            let line_no = index + 1;
            if let Step::AwaitInput(variable) = self.exec_line(line_no, raw) {
                return RunOutcome::Suspended(Suspension {
                    request: InputRequest {
                        variable,
                        line: line_no,
                    },
                    cursor: Cursor::Line(line_no),
                });
            }
        }
        RunOutcome::Completed
    }

    fn report(&mut self, line: usize, err: &EvalError) {
        warn!(line, code = %err.code(), "{err}");
        self.diagnostics.push(err.to_diagnostic(line));
    }
}

/// Split off the first whitespace-delimited word. The remainder keeps its
/// inner spacing but loses leading whitespace.
pub(crate) fn split_first(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}
