//! Grammar Modules
//!
//! Each module extends `Parser` with methods for one family of productions:
//!
//! - [`body`]: bodies, attributes, blocks and block labels
//! - [`expr`]: expressions (operators, terms, traversals, collections, calls)
//! - [`template`]: quoted, heredoc and bare templates with their directives
//!
//! Every production returns its node together with the diagnostics it
//! produced, and leaves the peeker just past the construct (or wherever
//! recovery stopped). Productions that hit an error enter recovery mode and
//! return a placeholder rather than nothing, so callers always get a tree.

mod body;
mod expr;
mod template;

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Number, Token, Value, ValueType};

/// Keywords. HCL has no reserved words; these are identifiers that only mean
/// something in particular positions.
pub(crate) mod keyword {
    pub const FOR: &str = "for";
    pub const IN: &str = "in";
    pub const IF: &str = "if";
    pub const ELSE: &str = "else";
    pub const ENDIF: &str = "endif";
    pub const ENDFOR: &str = "endfor";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const NULL: &str = "null";
}

/// Value of a number literal token.
///
/// Uses the same coercion as string-to-number conversion, so a literal and a
/// converted string with the same text always agree. Unparseable text yields
/// an unknown number and an error.
fn number_lit_value(token: &Token) -> (Value, Diagnostics) {
    match Number::parse(&token.text()) {
        Ok(number) => (Value::Number(number), Diagnostics::new()),
        Err(_) => (
            Value::Unknown(ValueType::Number),
            Diagnostics::from(
                Diagnostic::error(ErrorCode::E2002, token.range.clone())
                    .with_summary("Invalid number literal")
                    .with_detail("Failed to recognize the value of this number literal."),
            ),
        ),
    }
}
