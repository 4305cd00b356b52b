use std::sync::Arc;

use super::*;
use crate::Pos;

fn tok(kind: TokenKind, text: &str, start: u32) -> Token {
    #[allow(clippy::cast_possible_truncation)]
    let end = start + text.len() as u32;
    Token::new(
        kind,
        text,
        SourceRange::new(
            Arc::from("t.hcl"),
            Pos::new(1, start + 1, start),
            Pos::new(1, end + 1, end),
        ),
    )
}

#[test]
fn test_opposite_bracket_pairs() {
    let pairs = [
        (TokenKind::OBrace, TokenKind::CBrace),
        (TokenKind::OBrack, TokenKind::CBrack),
        (TokenKind::OParen, TokenKind::CParen),
        (TokenKind::OQuote, TokenKind::CQuote),
        (TokenKind::OHeredoc, TokenKind::CHeredoc),
    ];
    for (open, close) in pairs {
        assert_eq!(open.opposite_bracket(), close);
        assert_eq!(close.opposite_bracket(), open);
        assert!(open.is_opener());
        assert!(close.is_closer());
    }
}

#[test]
fn test_template_sequence_brackets() {
    assert_eq!(
        TokenKind::TemplateControl.opposite_bracket(),
        TokenKind::TemplateSeqEnd
    );
    assert_eq!(
        TokenKind::TemplateSeqEnd.opposite_bracket(),
        TokenKind::TemplateInterp
    );
}

#[test]
fn test_non_bracket_has_nil_opposite() {
    assert_eq!(TokenKind::Plus.opposite_bracket(), TokenKind::Nil);
    assert_eq!(TokenKind::Eof.opposite_bracket(), TokenKind::Nil);
    assert!(!TokenKind::Ident.is_opener());
}

#[test]
fn test_is_keyword() {
    assert!(tok(TokenKind::Ident, "for", 0).is_keyword("for"));
    assert!(!tok(TokenKind::Ident, "format", 0).is_keyword("for"));
    assert!(!tok(TokenKind::QuotedLit, "for", 0).is_keyword("for"));
}

#[test]
fn test_token_list_appends_eof() {
    let list = TokenList::from_vec(vec![tok(TokenKind::Ident, "abc", 0)]);
    assert_eq!(list.len(), 2);
    assert_eq!(list.eof().kind, TokenKind::Eof);
    assert_eq!(list.eof().range.start.byte, 3);
    assert!(list.eof().range.is_empty());
}

#[test]
fn test_token_list_keeps_existing_eof() {
    let list = TokenList::from_vec(vec![
        tok(TokenKind::Ident, "abc", 0),
        tok(TokenKind::Eof, "", 3),
    ]);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_empty_token_list_has_eof() {
    let list = TokenList::from_vec(Vec::new());
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].kind, TokenKind::Eof);
    assert_eq!(list[0].range.start, Pos::START);
}

#[test]
fn test_display_name() {
    assert_eq!(TokenKind::CBrace.to_string(), "`}`");
    assert_eq!(TokenKind::Eof.to_string(), "end of file");
}
