//! Tokens and token lists.

mod kind;
mod list;

pub use kind::TokenKind;
pub use list::TokenList;

use std::borrow::Cow;

use crate::SourceRange;

/// A token with its kind, raw bytes and source range.
///
/// Tokens are immutable once produced; the parser only reads them.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub bytes: Vec<u8>,
    pub range: SourceRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, bytes: impl Into<Vec<u8>>, range: SourceRange) -> Self {
        Token {
            kind,
            bytes: bytes.into(),
            range,
        }
    }

    /// The token's bytes as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Check if this is the identifier `keyword`.
    ///
    /// HCL keywords (`for`, `in`, `if`, ...) are ordinary identifiers that
    /// only gain meaning in specific grammar positions.
    #[inline]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Ident && self.bytes == keyword.as_bytes()
    }
}

#[cfg(test)]
mod tests;
