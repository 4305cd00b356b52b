//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support. When
//! the source text is supplied, the subject line is printed with the
//! subject range underlined.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
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

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<String>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the source text diagnostics refer to, enabling snippets.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    /// Print the subject's first line with the subject underlined.
    fn write_snippet(&mut self, diagnostic: &Diagnostic) {
        let Some(snippet) = self
            .source
            .as_deref()
            .and_then(|source| Snippet::locate(source, diagnostic))
        else {
            return;
        };

        let gutter = " ".repeat(snippet.line_number.len());
        let underline = format!(
            "{}{}",
            " ".repeat(snippet.caret_offset),
            "^".repeat(snippet.caret_width)
        );

        let bar = format!("{gutter} |");
        self.write_colored(&bar, colors::GUTTER);
        let _ = writeln!(self.writer);
        let numbered = format!("{} |", snippet.line_number);
        self.write_colored(&numbered, colors::GUTTER);
        let _ = writeln!(self.writer, " {}", snippet.text);
        self.write_colored(&bar, colors::GUTTER);
        let _ = write!(self.writer, " ");
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&underline, color);
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl TerminalEmitter<io::Stdout> {
    /// Create a terminal emitter for stdout.
    pub fn stdout(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stdout(), mode, is_tty)
    }
}

/// The source line a diagnostic points at.
struct Snippet {
    line_number: String,
    text: String,
    caret_offset: usize,
    caret_width: usize,
}

impl Snippet {
    fn locate(source: &str, diagnostic: &Diagnostic) -> Option<Self> {
        let subject = &diagnostic.subject;
        let start = subject.start.byte as usize;
        let end = subject.end.byte as usize;

        let before = source.get(..start)?;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let rest = source.get(line_start..)?;
        let line_end = line_start + rest.find('\n').unwrap_or(rest.len());
        let text = source.get(line_start..line_end)?.trim_end_matches('\r');

        let caret_offset = source.get(line_start..start)?.chars().count();
        let caret_end = if end <= line_start + text.len() {
            source.get(line_start..end.max(start))?.chars().count()
        } else {
            text.chars().count()
        };

        Some(Snippet {
            line_number: subject.start.line.to_string(),
            text: text.to_owned(),
            caret_offset,
            caret_width: caret_end.saturating_sub(caret_offset).max(1),
        })
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: summary
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.summary);

        let _ = writeln!(self.writer, "  --> {}", diagnostic.subject);
        self.write_snippet(diagnostic);

        if !diagnostic.detail.is_empty() {
            let _ = writeln!(self.writer, "  = {}", diagnostic.detail);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let _ = write!(
                self.writer,
                ": {error_count} error{}",
                plural_s(error_count)
            );
            if warning_count > 0 {
                let _ = write!(
                    self.writer,
                    "; {warning_count} warning{}",
                    plural_s(warning_count)
                );
            }
            let _ = writeln!(self.writer, " emitted");
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
