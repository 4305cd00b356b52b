//! Error recovery for the parser.
//!
//! Two synchronization primitives, both reading forward and never
//! backtracking:
//!
//! - [`Parser::recover`] skips to just past a given closing token at nesting
//!   depth zero.
//! - [`Parser::recover_after_body_item`] skips to the end of the current body
//!   item: the next newline outside any bracket.
//!
//! Both set the parser's sticky recovery flag. While it is set, generic
//! "unexpected token" diagnostics are suppressed so one mistake produces one
//! error rather than a cascade.

use hcl_ir::{Token, TokenKind};
use tracing::debug;

use crate::Parser;

// TokenSet is a u64 bitset, so every discriminant must fit in 0..63.
const _: () = assert!(
    TokenKind::Nil.discriminant_index() <= 63,
    "TokenSet uses u64 bitset; all discriminant indices must be < 64"
);

/// A set of token kinds with O(1) membership testing.
///
/// Each bit corresponds to a [`TokenKind`] discriminant index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a token set containing a single token kind.
    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u64 << kind.discriminant_index())
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.discriminant_index()))
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u64 << kind.discriminant_index())) != 0
    }
}

/// Tokens that open a nested context a body item can span.
pub const OPENERS: TokenSet = TokenSet::new()
    .with(TokenKind::OBrace)
    .with(TokenKind::OBrack)
    .with(TokenKind::OParen)
    .with(TokenKind::OQuote)
    .with(TokenKind::OHeredoc)
    .with(TokenKind::TemplateInterp)
    .with(TokenKind::TemplateControl);

/// Tokens that close a bracket (template sequence ends are handled apart).
pub const CLOSERS: TokenSet = TokenSet::new()
    .with(TokenKind::CBrace)
    .with(TokenKind::CBrack)
    .with(TokenKind::CParen)
    .with(TokenKind::CQuote)
    .with(TokenKind::CHeredoc);

/// Either kind of template sequence introducer.
pub const TEMPLATE_SEQUENCE_OPENERS: TokenSet =
    TokenSet::single(TokenKind::TemplateInterp).with(TokenKind::TemplateControl);

impl<'a> Parser<'a> {
    /// Enter recovery mode without moving.
    #[inline]
    pub(crate) fn set_recovery(&mut self) {
        self.recovery = true;
    }

    /// Skip forward to just past `end` at nesting depth zero, or to EOF.
    ///
    /// Nesting counts the opener paired with `end`, so `recover(CParen)`
    /// inside `f(g(x` skips the inner `( ... )` as a whole. Returns the token
    /// recovery stopped on.
    pub(crate) fn recover(&mut self, end: TokenKind) -> &'a Token {
        let start = end.opposite_bracket();
        self.set_recovery();

        let from = self.peeker.position();
        let mut nest = 0usize;
        let token = loop {
            let token = self.peeker.read();
            let mut kind = token.kind;
            if end == TokenKind::TemplateSeqEnd && kind == TokenKind::TemplateControl {
                kind = TokenKind::TemplateInterp;
            }

            if kind == TokenKind::Eof {
                break token;
            } else if kind == end {
                if nest == 0 {
                    break token;
                }
                nest -= 1;
            } else if kind == start {
                nest += 1;
            }
        };

        debug!(
            sync = %end.display_name(),
            found = %token.kind.display_name(),
            skipped = self.peeker.position().saturating_sub(from),
            "recover"
        );
        token
    }

    /// Skip forward to the start of the next body item.
    ///
    /// Stops after the first newline seen outside any bracket, or at EOF.
    /// A closer pops the open stack down to and including its matching
    /// opener; a closer with no matching opener empties the stack.
    pub(crate) fn recover_after_body_item(&mut self) {
        self.set_recovery();

        let from = self.peeker.position();
        let mut open: Vec<TokenKind> = Vec::new();
        loop {
            let token = self.peeker.read();
            let kind = token.kind;
            match kind {
                TokenKind::Newline if open.is_empty() => break,
                TokenKind::Eof => break,
                TokenKind::TemplateSeqEnd => {
                    pop_to(&mut open, |k| TEMPLATE_SEQUENCE_OPENERS.contains(k));
                }
                _ if OPENERS.contains(kind) => open.push(kind),
                _ if CLOSERS.contains(kind) => {
                    let opener = kind.opposite_bracket();
                    pop_to(&mut open, |k| k == opener);
                }
                _ => {}
            }
        }

        debug!(
            skipped = self.peeker.position().saturating_sub(from),
            "recover after body item"
        );
    }
}

/// Pop entries until one matching `is_opener` has been popped.
fn pop_to(open: &mut Vec<TokenKind>, is_opener: impl Fn(TokenKind) -> bool) {
    let keep = open.iter().rposition(|&k| is_opener(k)).unwrap_or(0);
    open.truncate(keep);
}
