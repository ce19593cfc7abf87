//! Slate Eval - runtime for the Slate scripting language.
//!
//! # Architecture
//!
//! - [`Namespace`]: a session's variables
//! - [`resolve_token`] / [`evaluate`]: literal, variable and builtin-call
//!   expressions
//! - [`Builtin`]: the closed set of builtin functions, bound to a
//!   [`RuntimeContext`]
//! - [`Interpreter`]: keyword dispatch, the line loop and the
//!   control-flow walker
//!
//! Output goes through an explicit [`SharedOutput`] sink and input comes
//! from an [`InputSource`], so sessions can be driven entirely from tests.
//!
//! # Debugging
//!
//! - `RUST_LOG=slate_eval=debug` logs each dispatched line.
//! - `RUST_LOG=slate_eval=trace` adds every resolved token and graph step.

mod builtins;
mod context;
pub mod errors;
mod expr;
mod input;
pub mod interpreter;
mod namespace;
mod output;

pub use builtins::Builtin;
pub use context::RuntimeContext;
pub use errors::{EvalError, EvalResult};
pub use expr::{evaluate, resolve_token};
pub use input::{InputOutcome, InputSource};
pub use interpreter::{
    Cursor, ExecMode, InputRequest, Interpreter, InterpreterBuilder, Keyword, RunOutcome, Step,
    Suspension, DEFAULT_RESULT_VARIABLE,
};
pub use namespace::{NameError, Namespace, Upsert};
pub use output::{
    buffer_sink, silent_sink, stdout_sink, BufferSink, OutputSink, SharedOutput, StdoutSink,
};

#[cfg(test)]
mod tests;
