//! Structure errors.
//!
//! Every variant is fatal for the whole parse.

use slate_diagnostic::{Diagnostic, ErrorCode};

/// Malformed block nesting or an overfull arena.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// `ELIF` or `ELSE` with no open block to attach to.
    #[error("`{keyword}` without an enclosing `IF`")]
    UnmatchedBranch { keyword: &'static str, line: usize },

    /// `ENDIF` with no open `IF`.
    #[error("`ENDIF` without a matching `IF`")]
    UnmatchedEndif { line: usize },

    /// More statements than the arena can hold.
    #[error("script exceeds the statement capacity of {capacity}")]
    CapacityExceeded { capacity: usize, line: usize },
}

impl StructureError {
    /// 1-based source line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            StructureError::UnmatchedBranch { line, .. }
            | StructureError::UnmatchedEndif { line }
            | StructureError::CapacityExceeded { line, .. } => *line,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StructureError::UnmatchedBranch { .. } => ErrorCode::E1001,
            StructureError::UnmatchedEndif { .. } => ErrorCode::E1002,
            StructureError::CapacityExceeded { .. } => ErrorCode::E1003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at_line(self.line());
        match self {
            StructureError::UnmatchedBranch { .. } => {
                diag.with_note("branches must be indented no deeper than their IF")
            }
            StructureError::UnmatchedEndif { .. } => diag,
            StructureError::CapacityExceeded { .. } => {
                diag.with_note("raise the limit with --capacity=<n>")
            }
        }
    }
}
