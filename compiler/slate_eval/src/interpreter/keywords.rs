//! Keyword handlers: `REG`, `SPEAK` and `INPUT`.

use std::fmt;

use tracing::debug;

use slate_ir::{Value, ValueType};
use slate_lexer::{tokenize_template, TemplateToken};

use super::{split_first, Interpreter, Step};
use crate::errors::{EvalError, EvalResult};
use crate::expr::evaluate;
use crate::input::InputOutcome;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `REG <STRING|NUM|BOOL> <name> <expr>`
    Reg,
    /// `SPEAK <template>`
    Speak,
    /// `INPUT <name>`
    Input,
}

impl Keyword {
    /// Match a leading word, ignoring ASCII case.
    pub fn from_word(word: &str) -> Option<Self> {
        [Keyword::Reg, Keyword::Speak, Keyword::Input]
            .into_iter()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(word))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Reg => "REG",
            Keyword::Speak => "SPEAK",
            Keyword::Input => "INPUT",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Interpreter {
    pub(super) fn exec_keyword(&mut self, keyword: Keyword, tail: &str) -> EvalResult<Step> {
        match keyword {
            Keyword::Reg => self.exec_reg(tail).map(|()| Step::Continue),
            Keyword::Speak => self.exec_speak(tail).map(|()| Step::Continue),
            Keyword::Input => self.exec_input(tail),
        }
    }

    /// Evaluate, check against the declared type, then register.
    fn exec_reg(&mut self, tail: &str) -> EvalResult<()> {
        let malformed = |detail: String| EvalError::MalformedKeyword {
            keyword: "REG",
            detail,
        };

        let (type_word, rest) = split_first(tail);
        if type_word.is_empty() {
            return Err(malformed("expected `REG <STRING|NUM|BOOL> <name> <expr>`".into()));
        }
        let declared = ValueType::from_keyword(type_word)
            .ok_or_else(|| {
                malformed(format!(
                    "unknown type `{type_word}`, expected STRING, NUM or BOOL"
                ))
            })?;

        let (name, expr) = split_first(rest);
        if name.is_empty() {
            return Err(malformed(format!("missing variable name after {declared}")));
        }
        if expr.is_empty() {
            return Err(malformed(format!("missing expression for `{name}`")));
        }

        let value = evaluate(expr, &self.namespace, &self.context)?;
        if value.value_type() != declared {
            return Err(EvalError::TypeMismatch {
                expected: declared,
                found: value.value_type(),
            });
        }
        self.namespace.register(name, value)?;
        debug!(name, %declared, "registered variable");
        Ok(())
    }

    /// Emit fragments in order. A lexical error emits nothing; an undefined
    /// variable stops after the fragments already written.
    fn exec_speak(&mut self, tail: &str) -> EvalResult<()> {
        let tokens = tokenize_template(tail)?;
        for token in tokens {
            match token {
                TemplateToken::Literal(text) => self.output.write(text),
                TemplateToken::Variable(name) => {
                    let value = self
                        .namespace
                        .lookup(name)
                        .ok_or_else(|| EvalError::UndefinedVariable {
                            name: name.to_string(),
                        })?;
                    self.output.write(&value.render());
                }
            }
        }
        Ok(())
    }

    /// Overwrite an existing text variable with one line of input.
    fn exec_input(&mut self, tail: &str) -> EvalResult<Step> {
        let (name, extra) = split_first(tail);
        if name.is_empty() || !extra.is_empty() {
            return Err(EvalError::MalformedKeyword {
                keyword: "INPUT",
                detail: "expected `INPUT <name>`".into(),
            });
        }

        match self.namespace.lookup(name) {
            None => {
                return Err(EvalError::UndefinedVariable {
                    name: name.to_string(),
                })
            }
            Some(Value::Text(_)) => {}
            Some(other) => {
                return Err(EvalError::TypeMismatch {
                    expected: ValueType::Text,
                    found: other.value_type(),
                })
            }
        }

        match self.input.read_line() {
            InputOutcome::Line(line) => {
                self.namespace.upsert(name, Value::Text(line))?;
                debug!(name, "read input");
                Ok(Step::Continue)
            }
            InputOutcome::Exhausted => Err(EvalError::InputUnavailable {
                name: name.to_string(),
            }),
            InputOutcome::Failed(reason) => Err(EvalError::InputFailed {
                name: name.to_string(),
                reason,
            }),
            InputOutcome::Deferred => {
                debug!(name, "suspending for input");
                Ok(Step::AwaitInput(name.to_string()))
            }
        }
    }
}
