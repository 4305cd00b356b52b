//! Token list guaranteed to end with EOF.

use std::fmt;
use std::sync::Arc;

use super::{Token, TokenKind};
use crate::{Pos, SourceRange};

/// A finite token sequence for one source unit.
///
/// Invariant: the last token is always `TokenKind::Eof`. Construction
/// appends one when the scanner output lacks it, so the parser can always
/// fall back to the final token when it runs off the end.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create from a Vec of tokens, appending EOF if needed.
    pub fn from_vec(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let range = match tokens.last() {
                Some(last) => last.range.end_point(),
                None => SourceRange::point(Arc::from(""), Pos::START),
            };
            tokens.push(Token::new(TokenKind::Eof, Vec::new(), range));
        }
        TokenList { tokens }
    }

    /// Get the number of tokens, including the trailing EOF.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A list always holds at least the EOF token.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The trailing EOF token.
    #[inline]
    pub fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    /// Get a slice of all tokens.
    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate over tokens.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Consume into Vec.
    #[inline]
    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList::from_vec(tokens)
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenList({} tokens)", self.tokens.len())
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
