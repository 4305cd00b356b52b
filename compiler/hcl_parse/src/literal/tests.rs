#![allow(clippy::unwrap_used, clippy::expect_used)]

use hcl_diagnostic::ErrorCode;
use hcl_ir::TokenKind;
use pretty_assertions::assert_eq;

use super::*;
use crate::tests::fixture::token;

fn quoted(text: &str) -> (String, Diagnostics) {
    decode_string_lit(&token(TokenKind::QuotedLit, text, 0))
}

fn unquoted(text: &str) -> (String, Diagnostics) {
    decode_string_lit(&token(TokenKind::StringLit, text, 0))
}

#[test]
fn test_plain_text_passes_through() {
    let (value, diags) = quoted("hello, world");
    assert_eq!(value, "hello, world");
    assert!(diags.is_empty());
}

#[test]
fn test_recognized_escapes() {
    let (value, diags) = quoted(r#"a\"b\\c\n"#);
    assert_eq!(value, "a\"b\\c\n");
    assert!(diags.is_empty());

    let (value, _) = quoted(r"\r\t");
    assert_eq!(value, "\r\t");
}

#[test]
fn test_invalid_escape_keeps_both_characters() {
    let (value, diags) = quoted(r"\q");
    assert_eq!(value, r"\q");
    assert_eq!(diags.len(), 1);

    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.summary, "Invalid escape sequence");
    assert_eq!(
        diag.detail,
        "The characters \"\\q\" do not form a recognized escape sequence."
    );
    assert_eq!((diag.subject.start.byte, diag.subject.end.byte), (0, 2));
    assert_eq!((diag.subject.start.column, diag.subject.end.column), (1, 3));
}

#[test]
fn test_invalid_escape_of_marker_hints_at_doubling() {
    let (value, diags) = quoted(r"x\$");
    assert_eq!(value, r"x\$");
    let diag = diags.iter().next().unwrap();
    assert!(diag.detail.ends_with("use \"$${\"."), "{}", diag.detail);
    assert_eq!((diag.subject.start.byte, diag.subject.end.byte), (1, 3));
}

#[test]
fn test_escape_subject_covers_multibyte_character() {
    let (value, diags) = quoted("\\é");
    assert_eq!(value, "\\é");
    let diag = diags.iter().next().unwrap();
    assert_eq!((diag.subject.start.byte, diag.subject.end.byte), (0, 3));
}

#[test]
fn test_backslash_is_literal_outside_quotes() {
    let (value, diags) = unquoted(r"C:\path\n");
    assert_eq!(value, r"C:\path\n");
    assert!(diags.is_empty());
}

#[test]
fn test_doubled_marker_before_brace_is_an_escape() {
    assert_eq!(quoted("$${x}").0, "${x}");
    assert_eq!(quoted("!!{x}").0, "!{x}");
    assert_eq!(unquoted("a $${b}").0, "a ${b}");
}

#[test]
fn test_doubled_marker_elsewhere_is_literal() {
    assert_eq!(quoted("$$x").0, "$$x");
    assert_eq!(quoted("!!x").0, "!!x");
    assert_eq!(quoted("$$$").0, "$$$");
    assert_eq!(quoted("$!").0, "$!");
}

#[test]
fn test_pending_state_flushed_at_end() {
    assert_eq!(quoted("$").0, "$");
    assert_eq!(quoted("a$$").0, "a$$");
    assert_eq!(quoted("!").0, "!");
    let (value, diags) = quoted("end\\");
    assert_eq!(value, "end\\");
    assert!(diags.is_empty());
}

#[test]
fn test_marker_followed_by_escape() {
    // The character after a lone marker is decoded normally.
    let (value, diags) = quoted(r"$\n");
    assert_eq!(value, "$\n");
    assert!(diags.is_empty());

    let (value, _) = quoted(r"$$\t");
    assert_eq!(value, "$$\t");
}

#[test]
fn test_positions_track_lines() {
    let (_, diags) = unquoted("line\n");
    assert!(diags.is_empty());

    let tok = token(TokenKind::QuotedLit, "ab\n\\z", 0);
    let (_, diags) = decode_string_lit(&tok);
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.subject.start.line, 2);
    assert_eq!(diag.subject.start.column, 1);
    assert_eq!(diag.subject.start.byte, 3);
}

#[test]
fn test_multiple_invalid_escapes_each_reported() {
    let (value, diags) = quoted(r"\a\b");
    assert_eq!(value, r"\a\b");
    assert_eq!(diags.len(), 2);
}
