//! The `run` command: execute a Slate script.

use std::sync::Arc;

use slate_diagnostic::emitter::DiagnosticEmitter;
use slate_diagnostic::{Diagnostic, Severity};
use slate_eval::{
    stdout_sink, ExecMode, InputSource, Interpreter, RunOutcome, RuntimeContext, SharedOutput,
};
use slate_parse::ParseConfig;
use slate_store::{InMemoryStore, Role};
use tracing::debug;

use super::{parse_capacity, read_file, stderr_emitter, CommandError};

/// Options accepted by `slate run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: ExecMode,
    pub role: Role,
    /// Name the session user is registered under.
    pub user: String,
    pub parse_config: ParseConfig,
    /// Print the final variable bindings after the run.
    pub dump: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            mode: ExecMode::Sequential,
            role: Role::Teacher,
            user: "admin".to_string(),
            parse_config: ParseConfig::default(),
            dump: false,
        }
    }
}

/// Parse the flags that follow `slate run <file>`.
pub fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    for arg in args {
        match arg.as_str() {
            "--branching" | "-b" => options.mode = ExecMode::Branching,
            "--student" => options.role = Role::Student,
            "--teacher" => options.role = Role::Teacher,
            "--dump" => options.dump = true,
            other => {
                if let Some(user) = other.strip_prefix("--user=") {
                    if user.is_empty() {
                        return Err("--user needs a name".to_string());
                    }
                    options.user = user.to_string();
                } else if let Some(value) = other.strip_prefix("--capacity=") {
                    options.parse_config = parse_capacity(value)?;
                } else {
                    return Err(format!("unknown option '{other}'"));
                }
            }
        }
    }
    Ok(options)
}

/// What a finished run produced besides its output.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub diagnostics: Vec<Diagnostic>,
    /// Final bindings, one `name = value` per line.
    pub bindings: String,
}

impl RunReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Register the session user in a fresh in-memory store.
fn session_context(options: &RunOptions) -> Result<RuntimeContext, CommandError> {
    let store = InMemoryStore::new();
    let email = format!("{}@slate.local", options.user);
    let caller = store.register(options.role, &options.user, "", &email)?;
    debug!(user = %options.user, role = %options.role, %caller, "session user registered");
    Ok(RuntimeContext::new(caller, options.role, Arc::new(store)))
}

/// Run `source` to completion (or suspension) with the given I/O.
pub fn run_source(
    source: &str,
    options: &RunOptions,
    output: SharedOutput,
    input: InputSource,
) -> Result<RunReport, CommandError> {
    let context = session_context(options)?;
    let mut interpreter = Interpreter::builder(context)
        .mode(options.mode)
        .parse_config(options.parse_config)
        .output(output)
        .input(input)
        .build();

    let outcome = interpreter.run(source)?;
    Ok(RunReport {
        outcome,
        bindings: interpreter.namespace().dump(),
        diagnostics: interpreter.take_diagnostics(),
    })
}

/// Run a script file, reading `INPUT` from stdin and writing to stdout.
///
/// Exits with status 1 if the script could not start or reported errors.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_file(path);
    let mut emitter = stderr_emitter(&content, path);

    let report = match run_source(&content, options, stdout_sink(), InputSource::Stdin) {
        Ok(report) => report,
        Err(CommandError::Structure(err)) => {
            emitter.emit(&err.to_diagnostic());
            emitter.flush();
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    // SPEAK never ends a line, so terminate the script's output first.
    println!();
    if options.dump {
        print!("{}", report.bindings);
    }

    emitter.emit_all(&report.diagnostics);
    emitter.emit_summary(report.error_count(), report.warning_count());
    emitter.flush();

    if report.error_count() > 0 {
        std::process::exit(1);
    }
}
