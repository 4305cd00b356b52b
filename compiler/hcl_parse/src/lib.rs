//! Recovering recursive-descent parser for HCL native syntax.
//!
//! Takes a finished token stream and produces a syntax tree plus a list of
//! diagnostics. Parsing never fails outright: malformed input yields error
//! diagnostics and a tree with placeholder nodes where the input could not
//! be understood.
//!
//! # Entry points
//!
//! - [`parse_body`]: a whole configuration file, or a body terminated by a
//!   custom token
//! - [`parse_expression`]: a standalone expression
//! - [`parse_template`]: a bare template (the whole input is template text)
//! - [`parse_traversal`]: a static traversal such as `foo.bar[0]`
//!
//! Each call owns its own parser state, so parsing the same tokens twice
//! always gives the same result.
//!
//! # Logging
//!
//! Every consumed token is logged at `trace` level and every recovery at
//! `debug` level. Call [`init_tracing`] and run with
//! `RUST_LOG=hcl_parse=trace` to see them.

mod grammar;
mod literal;
mod peeker;
mod recovery;
mod stack;
mod suggest;

#[cfg(test)]
mod tests;

use std::sync::Once;

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Body, Expr, SourceRange, Token, TokenKind, TokenList, Traversal};
use tracing::debug_span;

pub use literal::decode_string_lit;

use peeker::{split_line_comments, Peeker};

/// Options for [`parse_body`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Token that terminates the body. `Eof` for a whole file.
    pub end: TokenKind,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            end: TokenKind::Eof,
        }
    }
}

/// Parser state for one parse invocation.
struct Parser<'a> {
    peeker: Peeker<'a>,
    /// Set once any recovery has happened; suppresses follow-on errors.
    recovery: bool,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a TokenList) -> Self {
        Parser {
            peeker: Peeker::new(tokens),
            recovery: false,
        }
    }

    // Peeker delegation

    #[inline]
    fn peek(&self) -> &'a Token {
        self.peeker.peek()
    }

    #[inline]
    fn peek_kind(&self) -> TokenKind {
        self.peeker.peek_kind()
    }

    #[inline]
    fn peek_range(&self) -> SourceRange {
        self.peeker.peek_range()
    }

    #[inline]
    fn prev_range(&self) -> SourceRange {
        self.peeker.prev_range()
    }

    #[inline]
    fn read(&mut self) -> &'a Token {
        self.peeker.read()
    }

    /// Check if the next token is the identifier `keyword`.
    #[inline]
    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    #[inline]
    fn push_include_newlines(&mut self, include: bool) {
        self.peeker.push_include_newlines(include);
    }

    #[inline]
    fn pop_include_newlines(&mut self) {
        self.peeker.pop_include_newlines();
    }
}

/// Parse a body: attributes and blocks up to `config.end`.
///
/// For a whole file use the default config, which stops at EOF.
pub fn parse_body(tokens: &TokenList, config: ParseConfig) -> (Body, Diagnostics) {
    let _span = debug_span!("parse_body", tokens = tokens.len()).entered();
    let tokens = split_line_comments(tokens);
    let mut parser = Parser::new(&tokens);
    parser.parse_body(config.end)
}

/// Parse a standalone expression.
///
/// Newlines are insignificant. Anything left over after the expression is
/// reported.
pub fn parse_expression(tokens: &TokenList) -> (Expr, Diagnostics) {
    let _span = debug_span!("parse_expression", tokens = tokens.len()).entered();
    let tokens = split_line_comments(tokens);
    let mut parser = Parser::new(&tokens);
    parser.push_include_newlines(false);
    let (expr, mut diags) = parser.parse_expression();

    let next = parser.peek();
    if next.kind != TokenKind::Eof && !parser.recovery {
        diags.push(
            Diagnostic::error(ErrorCode::E1017, next.range.clone())
                .with_summary("Extra characters after expression")
                .with_detail(
                    "An expression was successfully parsed, but extra characters were found after it.",
                ),
        );
    }
    parser.pop_include_newlines();
    (expr, diags)
}

/// Parse a source unit that is entirely template text, up to EOF.
pub fn parse_template(tokens: &TokenList) -> (Expr, Diagnostics) {
    let _span = debug_span!("parse_template", tokens = tokens.len()).entered();
    let tokens = split_line_comments(tokens);
    let mut parser = Parser::new(&tokens);
    parser.parse_bare_template()
}

/// Parse a static traversal: a root name followed by `.attr`, `[number]`
/// and `["string"]` steps only.
///
/// On the first invalid step the steps parsed so far are returned.
pub fn parse_traversal(tokens: &TokenList) -> (Traversal, Diagnostics) {
    let _span = debug_span!("parse_traversal", tokens = tokens.len()).entered();
    let tokens = split_line_comments(tokens);
    let mut parser = Parser::new(&tokens);
    parser.push_include_newlines(false);
    let result = parser.parse_static_traversal();
    parser.pop_include_newlines();
    result
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=hcl_parse=debug` or `RUST_LOG=hcl_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set. An embedding application may
        // already have installed a subscriber; keep theirs.
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
