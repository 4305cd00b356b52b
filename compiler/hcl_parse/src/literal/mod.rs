//! String literal decoding.
//!
//! Turns one `QuotedLit` or `StringLit` token into its string value.
//!
//! - In quoted literals, `\n`, `\r`, `\t`, `\"` and `\\` are escapes. Any
//!   other backslash pair is reported and kept verbatim.
//! - In heredoc and bare-template chunks, backslashes are ordinary text.
//! - In both, `$${` and `!!{` decode to a literal `${` and `!{`. A doubled
//!   marker followed by anything else is kept as both characters.
//!
//! Input is scanned one grapheme cluster at a time, so a combining sequence
//! after a backslash is never split, and positions in diagnostics count
//! columns the same way the scanner does.

use std::sync::Arc;

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Pos, SourceRange, Token, TokenKind};
use unicode_segmentation::UnicodeSegmentation;

/// What the decoder has seen but not yet emitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Pending {
    None,
    /// A backslash at this position, in a quoted literal.
    Backslash(Pos),
    /// One template marker (`$` or `!`).
    Marker(char),
    /// Two identical template markers.
    DoubleMarker(char),
}

/// Decode the value of a string literal token.
///
/// Never drops input: anything that is not a recognized escape is copied
/// through unchanged.
pub fn decode_string_lit(token: &Token) -> (String, Diagnostics) {
    let quoted = token.kind == TokenKind::QuotedLit;
    let text = token.text();
    let filename = &token.range.filename;

    let mut out = String::with_capacity(text.len());
    let mut diagnostics = Diagnostics::new();
    let mut pending = Pending::None;
    let mut pos = token.range.start;

    for grapheme in text.graphemes(true) {
        let start = pos;
        pos = advance(pos, grapheme);

        // A grapheme can be looked at twice: once to settle a pending marker,
        // and again as ordinary input.
        loop {
            match pending {
                Pending::None => {
                    match grapheme {
                        "\\" if quoted => pending = Pending::Backslash(start),
                        "$" => pending = Pending::Marker('$'),
                        "!" => pending = Pending::Marker('!'),
                        _ => out.push_str(grapheme),
                    }
                    break;
                }
                Pending::Backslash(escape_start) => {
                    pending = Pending::None;
                    match grapheme {
                        "n" => out.push('\n'),
                        "r" => out.push('\r'),
                        "t" => out.push('\t'),
                        "\"" => out.push('"'),
                        "\\" => out.push('\\'),
                        _ => {
                            diagnostics.push(invalid_escape(
                                grapheme,
                                SourceRange::new(Arc::clone(filename), escape_start, pos),
                            ));
                            out.push('\\');
                            out.push_str(grapheme);
                        }
                    }
                    break;
                }
                Pending::Marker(marker) => {
                    if grapheme.starts_with(marker) && grapheme.len() == marker.len_utf8() {
                        pending = Pending::DoubleMarker(marker);
                        break;
                    }
                    out.push(marker);
                    pending = Pending::None;
                }
                Pending::DoubleMarker(marker) => {
                    pending = Pending::None;
                    out.push(marker);
                    if grapheme == "{" {
                        out.push('{');
                        break;
                    }
                    out.push(marker);
                }
            }
        }
    }

    match pending {
        Pending::None => {}
        Pending::Backslash(_) => out.push('\\'),
        Pending::Marker(marker) => out.push(marker),
        Pending::DoubleMarker(marker) => {
            out.push(marker);
            out.push(marker);
        }
    }

    (out, diagnostics)
}

/// Position just after `grapheme`, which starts at `pos`.
fn advance(pos: Pos, grapheme: &str) -> Pos {
    #[allow(clippy::cast_possible_truncation)]
    let byte = pos.byte + grapheme.len() as u32;
    if grapheme == "\n" || grapheme == "\r\n" {
        Pos::new(pos.line + 1, 1, byte)
    } else {
        Pos::new(pos.line, pos.column + 1, byte)
    }
}

fn invalid_escape(grapheme: &str, subject: SourceRange) -> Diagnostic {
    let mut detail =
        format!("The characters \"\\{grapheme}\" do not form a recognized escape sequence.");
    match grapheme {
        "$" => detail.push_str(" To escape a \"${\" template sequence, use \"$${\"."),
        "!" => detail.push_str(" To escape a \"!{\" template sequence, use \"!!{\"."),
        _ => {}
    }
    Diagnostic::error(ErrorCode::E2001, subject)
        .with_summary("Invalid escape sequence")
        .with_detail(detail)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
