//! Diagnostic emitters.
//!
//! [`TerminalEmitter`] renders diagnostics for humans. When it has the
//! script source and the diagnostic names a line, the offending line is
//! shown as an annotated snippet; otherwise a single summary line is written.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};

use crate::{Diagnostic, Severity};

/// Trait for emitting diagnostics to some destination.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color and source snippets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
    file_path: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Attach the script source so line-located diagnostics show snippets.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the script path, shown in the summary line.
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit_snippet(
        &mut self,
        diagnostic: &Diagnostic,
        source: &str,
        span: Range<usize>,
    ) -> io::Result<()> {
        let kind = match diagnostic.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let label = match &self.file_path {
            Some(path) => format!("in {path}"),
            None => "here".to_string(),
        };
        let mut report = Report::<Range<usize>>::build(kind, (), span.start)
            .with_config(Config::default().with_color(self.colors))
            .with_code(diagnostic.code)
            .with_message(&diagnostic.message)
            .with_label(Label::new(span).with_message(label));
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
        report
            .finish()
            .write(Source::from(source.to_string()), &mut self.writer)
    }

    fn emit_plain(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        match &self.file_path {
            Some(path) => writeln!(self.writer, "{path}: {diagnostic}")?,
            None => writeln!(self.writer, "{diagnostic}")?,
        }
        for note in &diagnostic.notes {
            writeln!(self.writer, "  = note: {note}")?;
        }
        Ok(())
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let snippet = self
            .source
            .as_deref()
            .zip(diagnostic.line)
            .and_then(|(source, line)| {
                line_span(source, line).map(|span| (source.to_string(), span))
            });
        // Write failures on the diagnostic stream have nowhere to be reported.
        let _ = match snippet {
            Some((source, span)) => self.emit_snippet(diagnostic, &source, span),
            None => self.emit_plain(diagnostic),
        };
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        let _ = writeln!(
            self.writer,
            "{error_count} error{}, {warning_count} warning{} reported",
            plural_s(error_count),
            plural_s(warning_count),
        );
    }
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Byte range of the 1-based `line` in `source`, excluding the line break.
pub fn line_span(source: &str, line: usize) -> Option<Range<usize>> {
    let mut start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let trimmed = text.trim_end_matches(['\n', '\r']);
            return Some(start..start + trimmed.len());
        }
        start += text.len();
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_span_finds_lines() {
        let src = "REG NUM a 1\nSPEAK $a\r\nINPUT x";
        assert_eq!(line_span(src, 1), Some(0..11));
        assert_eq!(line_span(src, 2), Some(12..20));
        assert_eq!(line_span(src, 3), Some(22..29));
        assert_eq!(line_span(src, 4), None);
    }

    #[test]
    fn plain_output_without_source() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_file_path("demo.slate");
        let diag = Diagnostic::error(ErrorCode::E3001)
            .with_message("unknown instruction: JUMP")
            .with_note("keywords are REG, SPEAK and INPUT");
        emitter.emit(&diag);
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(
            out,
            "demo.slate: error[E3001]: unknown instruction: JUMP\n  = note: keywords are REG, SPEAK and INPUT\n"
        );
    }

    #[test]
    fn snippet_output_mentions_code_and_message() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
            .with_source("REG NUM a 1\nSPEAK $missing\n");
        let diag = Diagnostic::error(ErrorCode::E2004)
            .with_message("undefined variable: $missing")
            .at_line(2);
        emitter.emit(&diag);
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert!(out.contains("E2004"));
        assert!(out.contains("undefined variable: $missing"));
        assert!(out.contains("SPEAK $missing"));
    }

    #[test]
    fn summary_pluralizes() {
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(1, 2);
        emitter.emit_summary(0, 0);
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(out, "1 error, 2 warnings reported\n");
    }
}
