//! Token kinds for HCL native syntax.

use std::fmt;

/// Token kinds produced by the scanner.
///
/// The parser dispatches on the kind alone; the token's bytes are only
/// inspected for identifiers, numbers and string chunks.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    OBrace,   // {
    CBrace,   // }
    OBrack,   // [
    CBrack,   // ]
    OParen,   // (
    CParen,   // )
    OQuote,   // "
    CQuote,   // "
    OHeredoc, // <<EOT
    CHeredoc, // EOT

    Star,          // *
    Slash,         // /
    Plus,          // +
    Minus,         // -
    Percent,       // %
    Equal,         // =
    EqualOp,       // ==
    NotEqual,      // !=
    LessThan,      // <
    LessThanEq,    // <=
    GreaterThan,   // >
    GreaterThanEq, // >=
    And,           // &&
    Or,            // ||
    Bang,          // !
    Dot,           // .
    Comma,         // ,
    Ellipsis,      // ...
    FatArrow,      // =>
    Question,      // ?
    Colon,         // :

    TemplateInterp,  // ${
    TemplateControl, // !{
    TemplateSeqEnd,  // }

    /// Literal chunk of a quoted string; backslash escapes are live.
    QuotedLit,
    /// Literal chunk of a heredoc or bare template; backslashes are literal.
    StringLit,
    NumberLit,
    Ident,

    Comment,
    Newline,
    Eof,

    Invalid,
    BadUtf8,

    /// Placeholder kind that never appears in a token stream.
    Nil,
}

impl TokenKind {
    /// Discriminant index, used for bitset membership tests.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Human-readable name for error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::OBrace => "`{`",
            TokenKind::CBrace => "`}`",
            TokenKind::OBrack => "`[`",
            TokenKind::CBrack => "`]`",
            TokenKind::OParen => "`(`",
            TokenKind::CParen => "`)`",
            TokenKind::OQuote => "opening quote",
            TokenKind::CQuote => "closing quote",
            TokenKind::OHeredoc => "heredoc introducer",
            TokenKind::CHeredoc => "heredoc terminator",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Percent => "`%`",
            TokenKind::Equal => "`=`",
            TokenKind::EqualOp => "`==`",
            TokenKind::NotEqual => "`!=`",
            TokenKind::LessThan => "`<`",
            TokenKind::LessThanEq => "`<=`",
            TokenKind::GreaterThan => "`>`",
            TokenKind::GreaterThanEq => "`>=`",
            TokenKind::And => "`&&`",
            TokenKind::Or => "`||`",
            TokenKind::Bang => "`!`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Question => "`?`",
            TokenKind::Colon => "`:`",
            TokenKind::TemplateInterp => "`${`",
            TokenKind::TemplateControl => "`!{`",
            TokenKind::TemplateSeqEnd => "end of template sequence",
            TokenKind::QuotedLit | TokenKind::StringLit => "string literal",
            TokenKind::NumberLit => "number literal",
            TokenKind::Ident => "identifier",
            TokenKind::Comment => "comment",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
            TokenKind::Invalid => "invalid character",
            TokenKind::BadUtf8 => "invalid UTF-8",
            TokenKind::Nil => "nothing",
        }
    }

    /// The bracket that pairs with this one, or `Nil` for non-brackets.
    ///
    /// `TemplateSeqEnd` closes both `TemplateInterp` and `TemplateControl`;
    /// its opposite is reported as `TemplateInterp`, and recovery normalizes
    /// control openers to match.
    pub fn opposite_bracket(self) -> TokenKind {
        match self {
            TokenKind::OBrace => TokenKind::CBrace,
            TokenKind::OBrack => TokenKind::CBrack,
            TokenKind::OParen => TokenKind::CParen,
            TokenKind::OQuote => TokenKind::CQuote,
            TokenKind::OHeredoc => TokenKind::CHeredoc,

            TokenKind::CBrace => TokenKind::OBrace,
            TokenKind::CBrack => TokenKind::OBrack,
            TokenKind::CParen => TokenKind::OParen,
            TokenKind::CQuote => TokenKind::OQuote,
            TokenKind::CHeredoc => TokenKind::OHeredoc,

            TokenKind::TemplateControl | TokenKind::TemplateInterp => TokenKind::TemplateSeqEnd,
            TokenKind::TemplateSeqEnd => TokenKind::TemplateInterp,

            _ => TokenKind::Nil,
        }
    }

    /// Check if this kind opens a bracketing context.
    pub fn is_opener(self) -> bool {
        matches!(
            self,
            TokenKind::OBrace
                | TokenKind::OBrack
                | TokenKind::OParen
                | TokenKind::OQuote
                | TokenKind::OHeredoc
                | TokenKind::TemplateInterp
                | TokenKind::TemplateControl
        )
    }

    /// Check if this kind closes a bracketing context.
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::CBrace
                | TokenKind::CBrack
                | TokenKind::CParen
                | TokenKind::CQuote
                | TokenKind::CHeredoc
                | TokenKind::TemplateSeqEnd
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
