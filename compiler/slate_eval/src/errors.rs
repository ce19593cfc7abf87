//! Runtime errors.
//!
//! Every variant is local to the line that raised it: the interpreter turns
//! it into a [`Diagnostic`] and moves on.

use thiserror::Error;

use slate_diagnostic::{Diagnostic, ErrorCode};
use slate_ir::ValueType;
use slate_lexer::LexError;
use slate_store::{Role, StoreError};

use crate::namespace::NameError;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: ValueType, found: ValueType },

    #[error("`{builtin}` requires NUM operands, found {found}")]
    NonNumericOperand { builtin: &'static str, found: ValueType },

    #[error("undefined variable: ${name}")]
    UndefinedVariable { name: String },

    #[error("unparseable literal: {token}")]
    UnparseableLiteral { token: String },

    #[error("`{builtin}` expects {expected} argument{}, found {found}", plural_s(.expected))]
    ArityMismatch {
        builtin: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("empty expression")]
    EmptyExpression,

    #[error("unknown instruction: {word}")]
    UnknownInstruction { word: String },

    #[error("unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("malformed {keyword}: {detail}")]
    MalformedKeyword { keyword: &'static str, detail: String },

    #[error("no input available for `{name}`")]
    InputUnavailable { name: String },

    #[error("could not read input for `{name}`: {reason}")]
    InputFailed { name: String, reason: String },

    #[error("`{builtin}` is not permitted for a {role}")]
    NotPermitted { builtin: &'static str, role: Role },

    #[error("record store: {0}")]
    Store(#[from] StoreError),
}

fn plural_s(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::Lex(e) => e.code(),
            EvalError::Name(e) => e.code(),
            EvalError::TypeMismatch { .. } | EvalError::NonNumericOperand { .. } => {
                ErrorCode::E2003
            }
            EvalError::UndefinedVariable { .. } => ErrorCode::E2004,
            EvalError::UnparseableLiteral { .. } => ErrorCode::E2005,
            EvalError::ArityMismatch { .. } => ErrorCode::E2006,
            EvalError::EmptyExpression => ErrorCode::E2007,
            EvalError::UnknownInstruction { .. } => ErrorCode::E3001,
            EvalError::UnknownFunction { .. } => ErrorCode::E3002,
            EvalError::MalformedKeyword { .. } => ErrorCode::E3003,
            EvalError::InputUnavailable { .. } | EvalError::InputFailed { .. } => ErrorCode::E3004,
            EvalError::NotPermitted { .. } => ErrorCode::E4001,
            EvalError::Store(_) => ErrorCode::E5001,
        }
    }

    /// Report this error against a 1-based source line.
    pub fn to_diagnostic(&self, line: usize) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at_line(line);
        match self {
            EvalError::Lex(e) => e.to_diagnostic().at_line(line),
            EvalError::UnknownInstruction { .. } => {
                diag.with_note("instructions are REG, SPEAK, INPUT or a builtin call")
            }
            EvalError::UnknownFunction { .. } => {
                diag.with_note("builtins are EQUAL, GREATER, GPA and OPEN_COURSE")
            }
            EvalError::NotPermitted { .. } => diag.with_note("no changes were made to the records"),
            _ => diag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arity_message_pluralizes() {
        let one = EvalError::ArityMismatch {
            builtin: "GPA",
            expected: 1,
            found: 2,
        };
        let two = EvalError::ArityMismatch {
            builtin: "EQUAL",
            expected: 2,
            found: 3,
        };
        assert_eq!(one.to_string(), "`GPA` expects 1 argument, found 2");
        assert_eq!(two.to_string(), "`EQUAL` expects 2 arguments, found 3");
    }

    #[test]
    fn diagnostic_carries_code_and_line() {
        let diag = EvalError::UndefinedVariable { name: "x".into() }.to_diagnostic(4);
        assert_eq!(diag.code, ErrorCode::E2004);
        assert_eq!(diag.line, Some(4));
        assert_eq!(diag.message, "undefined variable: $x");
    }

    #[test]
    fn authorization_has_its_own_code() {
        let err = EvalError::NotPermitted {
            builtin: "OPEN_COURSE",
            role: Role::Student,
        };
        assert_eq!(err.code(), ErrorCode::E4001);
        assert_eq!(err.to_string(), "`OPEN_COURSE` is not permitted for a student");
    }
}
