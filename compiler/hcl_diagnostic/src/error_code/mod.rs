//! Error codes for all parser diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the area it comes from.

use std::fmt;

/// Error codes for all parser diagnostics.
///
/// Format: E#### where first digit indicates the area:
/// - E1xxx: Syntax errors (bodies, expressions, templates)
/// - E2xxx: Literal decoding errors (strings, escapes, numbers)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Body errors
    /// Attribute or block definition required
    E1001,
    /// Attribute redefined
    E1002,
    /// Missing newline after attribute or block definition
    E1003,
    /// Invalid block definition
    E1004,
    /// Unclosed configuration block
    E1005,
    /// Quoted attribute name
    E1006,

    // Expression errors
    /// Invalid expression
    E1010,
    /// Missing closing bracket or parenthesis
    E1011,
    /// Missing item, argument or key/value separator
    E1012,
    /// Missing false expression in conditional
    E1013,
    /// Invalid `for` expression
    E1014,
    /// Nested splat expression
    E1015,
    /// Invalid attribute name after a dot
    E1016,
    /// Extra characters after expression
    E1017,
    /// Invalid static traversal
    E1018,

    // Template errors
    /// Unterminated template
    E1020,
    /// Invalid template control sequence
    E1021,

    // Literal errors
    /// Invalid escape sequence
    E2001,
    /// Invalid number literal
    E2002,
    /// Invalid string literal
    E2003,
    /// Unterminated string literal
    E2004,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E1013,
        ErrorCode::E1014,
        ErrorCode::E1015,
        ErrorCode::E1016,
        ErrorCode::E1017,
        ErrorCode::E1018,
        ErrorCode::E1020,
        ErrorCode::E1021,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E1015 => "E1015",
            ErrorCode::E1016 => "E1016",
            ErrorCode::E1017 => "E1017",
            ErrorCode::E1018 => "E1018",
            ErrorCode::E1020 => "E1020",
            ErrorCode::E1021 => "E1021",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
        }
    }

    /// Check if this is a syntax error (E1xxx range).
    pub fn is_syntax_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Check if this is a literal decoding error (E2xxx range).
    pub fn is_literal_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
