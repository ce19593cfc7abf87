//! `InterpreterBuilder` for configuring a session.

use slate_parse::ParseConfig;

use super::{ExecMode, Interpreter};
use crate::input::InputSource;
use crate::output::{stdout_sink, SharedOutput};
use crate::{Namespace, RuntimeContext};

/// Variable that builtin-call lines store their result in.
pub const DEFAULT_RESULT_VARIABLE: &str = "result";

/// Builder for [`Interpreter`].
///
/// Defaults: stdout output, stdin input, sequential mode, results stored
/// in `result`, default parse capacity.
pub struct InterpreterBuilder {
    context: RuntimeContext,
    namespace: Option<Namespace>,
    output: Option<SharedOutput>,
    input: InputSource,
    result_variable: String,
    mode: ExecMode,
    parse_config: ParseConfig,
}

impl InterpreterBuilder {
    pub fn new(context: RuntimeContext) -> Self {
        Self {
            context,
            namespace: None,
            output: None,
            input: InputSource::default(),
            result_variable: DEFAULT_RESULT_VARIABLE.to_string(),
            mode: ExecMode::default(),
            parse_config: ParseConfig::default(),
        }
    }

    /// Start from existing bindings instead of an empty namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Set the sink `SPEAK` writes to.
    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// Set where `INPUT` reads from.
    #[must_use]
    pub fn input(mut self, input: InputSource) -> Self {
        self.input = input;
        self
    }

    /// Set the variable builtin-call lines store their result in.
    #[must_use]
    pub fn result_variable(mut self, name: impl Into<String>) -> Self {
        self.result_variable = name.into();
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parser settings used in branching mode.
    #[must_use]
    pub fn parse_config(mut self, config: ParseConfig) -> Self {
        self.parse_config = config;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            namespace: self.namespace.unwrap_or_default(),
            context: self.context,
            output: self.output.unwrap_or_else(stdout_sink),
            input: self.input,
            result_variable: self.result_variable,
            mode: self.mode,
            parse_config: self.parse_config,
            diagnostics: Vec::new(),
        }
    }
}
