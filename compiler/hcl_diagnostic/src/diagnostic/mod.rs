//! Core diagnostic type.
//!
//! A [`Diagnostic`] is a value, never an unwinding error: parsing functions
//! return them next to whatever partial result they managed to build.

use std::fmt;

use hcl_ir::SourceRange;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A structured error or warning.
///
/// `subject` is the most specific range the problem applies to. `context`,
/// when present, is a broader range (typically from the start of the
/// enclosing construct to the subject) that tooling can highlight.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Short summary of the problem.
    pub summary: String,
    /// Full sentence(s) describing the problem.
    pub detail: String,
    pub subject: SourceRange,
    pub context: Option<SourceRange>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity, subject: SourceRange) -> Self {
        Diagnostic {
            code,
            severity,
            summary: String::new(),
            detail: String::new(),
            subject,
            context: None,
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode, subject: SourceRange) -> Self {
        Self::new_with_severity(code, Severity::Error, subject)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode, subject: SourceRange) -> Self {
        Self::new_with_severity(code, Severity::Warning, subject)
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Set the context range.
    pub fn with_context(mut self, context: SourceRange) -> Self {
        self.context = Some(context);
        self
    }

    /// Check if this is an error (vs warning).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]: {}",
            self.subject, self.severity, self.code, self.summary
        )?;
        if !self.detail.is_empty() {
            write!(f, "; {}", self.detail)?;
        }
        Ok(())
    }
}
