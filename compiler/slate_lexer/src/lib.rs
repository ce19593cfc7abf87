//! Tokenizer for `SPEAK` templates.
//!
//! A template is a whitespace-separated mix of exactly two token shapes:
//!
//! - a double-quoted literal span: `"Hello "`
//! - a variable reference: `$name`
//!
//! Anything else is a lexical error naming the offending fragment. Leading
//! and trailing whitespace is ignored; whitespace between tokens is not
//! part of the output.

use logos::Logos;
use slate_diagnostic::{Diagnostic, ErrorCode};
use slate_ir::is_valid_identifier;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0C]+")]
enum RawToken {
    #[regex(r#""[^"]*""#)]
    Literal,

    /// `$` and everything up to the next whitespace, quote or `$`. The name
    /// is checked against the variable naming rule afterwards.
    #[regex(r#"\$[^\s"$]+"#)]
    Variable,
}

/// One token of a `SPEAK` template, borrowing from the source line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TemplateToken<'src> {
    /// Literal text with the surrounding quotes removed.
    Literal(&'src str),
    /// Variable name with the leading `$` removed.
    Variable(&'src str),
}

/// A run of non-whitespace characters that is neither a quoted literal nor
/// a `$name` reference.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized template fragment `{fragment}`")]
pub struct LexError {
    /// The offending run of non-whitespace characters.
    pub fragment: String,
    /// Byte offset of the fragment in the template.
    pub offset: usize,
}

impl LexError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::E0001
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_note("templates may only contain \"quoted text\" and $name references")
    }

    /// Error for the run that `token` (starting at `start`) belongs to.
    fn run_at(source: &str, start: usize, token_end: usize) -> Self {
        let run_start = source
            .get(..start)
            .and_then(|head| head.char_indices().rev().find(|(_, c)| c.is_whitespace()))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let tail = source.get(token_end..).unwrap_or_default();
        let run_end = token_end + tail.find(char::is_whitespace).unwrap_or(tail.len());
        LexError {
            fragment: source.get(run_start..run_end).unwrap_or_default().to_string(),
            offset: run_start,
        }
    }
}

/// Split a template into tokens, failing on the first unrecognized run.
///
/// Tokens must be separated by whitespace: `"a"$b` is one run that
/// matches neither shape.
pub fn tokenize_template(source: &str) -> Result<Vec<TemplateToken<'_>>, LexError> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = logos.span();
        let slice = logos.slice();

        let token = match token_result {
            Ok(RawToken::Literal) => TemplateToken::Literal(&slice[1..slice.len() - 1]),
            Ok(RawToken::Variable) if is_valid_identifier(&slice[1..]) => {
                TemplateToken::Variable(&slice[1..])
            }
            Ok(RawToken::Variable) | Err(()) => {
                return Err(LexError::run_at(source, span.start, span.end));
            }
        };

        let adjacent = source
            .get(span.end..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| !c.is_whitespace());
        if adjacent {
            return Err(LexError::run_at(source, span.start, span.end));
        }
        tokens.push(token);
    }

    Ok(tokens)
}
