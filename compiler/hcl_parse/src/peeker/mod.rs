//! Token stream peeker.
//!
//! A cursor over a finite [`TokenList`] that hides tokens the grammar does
//! not care about in the current context. Comments are always skipped.
//! Newlines are skipped unless the top of the newline-mode stack says they
//! are significant: at body level and inside object constructors they
//! separate items, inside parentheses and brackets they are noise.
//!
//! A `#` or `//` comment absorbs the newline that ends it. Entry points run
//! the token list through [`split_line_comments`] first, so that newline
//! still terminates the item in front of the comment.

use std::borrow::Cow;
use std::sync::Arc;

use hcl_ir::{Pos, SourceRange, Token, TokenKind, TokenList};
use tracing::trace;

/// Cursor over tokens with a stack of "newlines significant" modes.
pub struct Peeker<'a> {
    tokens: &'a TokenList,
    /// Index of the first raw token not yet consumed. May equal
    /// `tokens.len()` once EOF has been read.
    next_index: usize,
    include_newlines: Vec<bool>,
}

impl<'a> Peeker<'a> {
    /// Create a peeker at the start of `tokens` with newlines significant.
    pub fn new(tokens: &'a TokenList) -> Self {
        Peeker {
            tokens,
            next_index: 0,
            include_newlines: vec![true],
        }
    }

    /// Index of the next visible token, or `None` when only skipped tokens
    /// (or nothing) remain before the end.
    fn next_visible(&self) -> Option<usize> {
        let include_newlines = self.include_newlines();
        (self.next_index..self.tokens.len()).find(|&i| match self.tokens[i].kind {
            TokenKind::Comment => false,
            TokenKind::Newline => include_newlines,
            _ => true,
        })
    }

    /// The next visible token, without consuming it.
    ///
    /// Past the end this keeps returning the final EOF token.
    #[inline]
    pub fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        match self.next_visible() {
            Some(i) => &tokens[i],
            None => tokens.eof(),
        }
    }

    /// Kind of the next visible token.
    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Consume and return the next visible token.
    ///
    /// Reading at EOF returns EOF again without moving past it.
    pub fn read(&mut self) -> &'a Token {
        let tokens = self.tokens;
        let (token, next) = match self.next_visible() {
            Some(i) => (&tokens[i], i + 1),
            None => (tokens.eof(), tokens.len()),
        };
        trace!(
            pos = next.saturating_sub(1),
            kind = %token.kind.display_name(),
            span_start = token.range.start.byte,
            span_end = token.range.end.byte,
            "read"
        );
        self.next_index = next;
        token
    }

    /// Range of the next visible token.
    #[inline]
    pub fn peek_range(&self) -> SourceRange {
        self.peek().range.clone()
    }

    /// Range of the most recently consumed raw token.
    ///
    /// Before anything is read this is the range of the next token, so
    /// callers always get a usable position.
    pub fn prev_range(&self) -> SourceRange {
        if self.next_index == 0 {
            return self.peek_range();
        }
        self.tokens[self.next_index - 1].range.clone()
    }

    /// Whether newlines are currently significant.
    #[inline]
    pub fn include_newlines(&self) -> bool {
        self.include_newlines.last().copied().unwrap_or(true)
    }

    pub fn push_include_newlines(&mut self, include: bool) {
        self.include_newlines.push(include);
    }

    /// Restore the previous newline mode. The base mode is never popped.
    pub fn pop_include_newlines(&mut self) {
        if self.include_newlines.len() > 1 {
            self.include_newlines.pop();
        }
    }

    /// Number of raw tokens consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.next_index
    }
}

/// Split every line comment ending in `\n` into the comment text and a
/// separate `Newline` token.
///
/// Borrows `tokens` unchanged when no comment needs splitting.
pub fn split_line_comments(tokens: &TokenList) -> Cow<'_, TokenList> {
    if !tokens.iter().any(absorbs_newline) {
        return Cow::Borrowed(tokens);
    }

    let mut split = Vec::with_capacity(tokens.len() + 1);
    for token in tokens {
        if absorbs_newline(token) {
            let (comment, newline) = split_comment(token);
            split.push(comment);
            split.push(newline);
        } else {
            split.push(token.clone());
        }
    }
    Cow::Owned(TokenList::from_vec(split))
}

fn absorbs_newline(token: &Token) -> bool {
    token.kind == TokenKind::Comment
        && (token.bytes.starts_with(b"#") || token.bytes.starts_with(b"//"))
        && token.bytes.ends_with(b"\n")
}

fn split_comment(token: &Token) -> (Token, Token) {
    let range = &token.range;
    let text = &token.bytes[..token.bytes.len() - 1];
    #[allow(clippy::cast_possible_truncation)]
    let width = String::from_utf8_lossy(text).chars().count() as u32;
    let newline_start = Pos::new(
        range.start.line,
        range.start.column + width,
        range.end.byte - 1,
    );

    let comment = Token::new(
        TokenKind::Comment,
        text,
        SourceRange::new(Arc::clone(&range.filename), range.start, newline_start),
    );
    let newline = Token::new(
        TokenKind::Newline,
        b"\n".as_slice(),
        SourceRange::new(Arc::clone(&range.filename), newline_start, range.end),
    );
    (comment, newline)
}
