use hcl_diagnostic::ErrorCode;
use hcl_ir::{TokenKind, TokenList};
use pretty_assertions::assert_eq;

use super::*;
use crate::tests::fixture::{lex, token};

fn parse_quoted(tokens: &TokenList) -> (Expr, Diagnostics) {
    let mut parser = Parser::new(tokens);
    let open = parser.read();
    parser.parse_template_literal(open)
}

fn template_parts(expr: &Expr) -> &[Expr] {
    match &expr.kind {
        ExprKind::Template(parts) => parts,
        other => panic!("expected a template, got {other:?}"),
    }
}

fn literal_str(expr: &Expr) -> &str {
    match expr.as_literal() {
        Some(Value::String(s)) => s,
        other => panic!("expected a string literal, got {other:?}"),
    }
}

#[test]
fn test_plain_string_is_one_literal() {
    let tokens = lex(r#""hello""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    let parts = template_parts(&expr);
    assert_eq!(parts.len(), 1);
    assert_eq!(literal_str(&parts[0]), "hello");
    assert_eq!(expr.range.to_byte_range(), 0..7);
}

#[test]
fn test_empty_string_gets_empty_literal() {
    let tokens = lex(r#""""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    let parts = template_parts(&expr);
    assert_eq!(parts.len(), 1);
    assert_eq!(literal_str(&parts[0]), "");
}

#[test]
fn test_lone_interpolation_is_passed_through() {
    let tokens = lex(r#""${a}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    let ExprKind::TemplateWrap(inner) = &expr.kind else {
        panic!("expected a template wrap, got {:?}", expr.kind);
    };
    assert_eq!(inner.root_name(), Some("a"));
    assert_eq!(expr.range.to_byte_range(), 0..6);
}

#[test]
fn test_interpolation_with_text_is_concatenated() {
    let tokens = lex(r#""a${b}c""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    let parts = template_parts(&expr);
    assert_eq!(parts.len(), 3);
    assert_eq!(literal_str(&parts[0]), "a");
    assert_eq!(parts[1].root_name(), Some("b"));
    assert_eq!(literal_str(&parts[2]), "c");
}

#[test]
fn test_if_else_directive_builds_conditional() {
    let tokens = lex(r#""!{if c}yes!{else}no!{endif}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty(), "{diags:?}");
    let parts = template_parts(&expr);
    assert_eq!(parts.len(), 1);
    let ExprKind::Conditional {
        condition,
        true_result,
        false_result,
    } = &parts[0].kind
    else {
        panic!("expected a conditional, got {:?}", parts[0].kind);
    };
    assert_eq!(condition.root_name(), Some("c"));
    assert_eq!(literal_str(&template_parts(true_result)[0]), "yes");
    assert_eq!(literal_str(&template_parts(false_result)[0]), "no");
}

#[test]
fn test_if_without_else_has_empty_false_branch() {
    let tokens = lex(r#""!{if c}yes!{endif}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    let ExprKind::Conditional { false_result, .. } = &template_parts(&expr)[0].kind else {
        panic!("expected a conditional");
    };
    assert_eq!(literal_str(false_result), "");
}

#[test]
fn test_for_directive_builds_template_join() {
    let tokens = lex(r#""!{for v in xs}${v},!{endfor}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty(), "{diags:?}");
    let ExprKind::TemplateJoin(tuple) = &template_parts(&expr)[0].kind else {
        panic!("expected a template join");
    };
    let ExprKind::For(for_expr) = &tuple.kind else {
        panic!("expected a for expression, got {:?}", tuple.kind);
    };
    assert_eq!(for_expr.key_var, None);
    assert_eq!(for_expr.val_var, "v");
    assert_eq!(for_expr.collection.root_name(), Some("xs"));
    assert!(for_expr.key_expr.is_none());
    assert!(!for_expr.group);

    let body = template_parts(&for_expr.val_expr);
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].root_name(), Some("v"));
    assert_eq!(literal_str(&body[1]), ",");
}

#[test]
fn test_for_directive_with_key() {
    let tokens = lex(r#""!{for k, v in m}${k}!{endfor}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty(), "{diags:?}");
    let ExprKind::TemplateJoin(tuple) = &template_parts(&expr)[0].kind else {
        panic!("expected a template join");
    };
    let ExprKind::For(for_expr) = &tuple.kind else {
        panic!("expected a for expression");
    };
    assert_eq!(for_expr.key_var.as_deref(), Some("k"));
    assert_eq!(for_expr.val_var, "v");
}

#[test]
fn test_for_directive_missing_in() {
    let tokens = lex(r#""!{for v xs}a!{endfor}""#);
    let (_, diags) = parse_quoted(&tokens);

    let first = &diags.as_slice()[0];
    assert_eq!(first.code, ErrorCode::E1021);
    assert_eq!(first.summary, "Invalid 'for' directive");
    assert_eq!(first.detail, "For directive requires 'in' keyword after names.");
}

#[test]
fn test_unterminated_if() {
    let tokens = lex(r#""!{if c}yes""#);
    let (_, diags) = parse_quoted(&tokens);

    assert_eq!(diags.len(), 1);
    let diag = &diags.as_slice()[0];
    assert_eq!(diag.code, ErrorCode::E1021);
    assert_eq!(diag.summary, "Unexpected end of template");
    assert_eq!(
        diag.detail,
        "The if directive at test.hcl:1,2-9 is missing its corresponding endif directive."
    );
}

#[test]
fn test_stray_endif() {
    let tokens = lex(r#""a!{endif}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags.as_slice()[0].summary, "Unexpected endif directive");
    let parts = template_parts(&expr);
    assert_eq!(literal_str(&parts[0]), "a");
    assert!(parts[1].is_placeholder());
}

#[test]
fn test_second_else_is_reported() {
    let tokens = lex(r#""!{if c}a!{else}b!{else}c!{endif}""#);
    let (_, diags) = parse_quoted(&tokens);

    let first = &diags.as_slice()[0];
    assert_eq!(first.summary, "Unexpected else directive");
    assert!(first.detail.starts_with("Already in the else clause"));
}

#[test]
fn test_endfor_inside_if() {
    let tokens = lex(r#""!{if c}a!{endfor}""#);
    let (_, diags) = parse_quoted(&tokens);

    let first = &diags.as_slice()[0];
    assert_eq!(first.summary, "Unexpected endfor directive");
    assert!(first.detail.starts_with("Expecting an endif directive"));
}

#[test]
fn test_unknown_keyword_gets_suggestion() {
    let tokens = lex(r#""!{esle}""#);
    let (_, diags) = parse_quoted(&tokens);

    assert_eq!(diags.len(), 1);
    let diag = &diags.as_slice()[0];
    assert_eq!(diag.summary, "Invalid template control keyword");
    assert_eq!(
        diag.detail,
        r#""esle" is not a valid template control keyword. Did you mean "else"?"#
    );
}

#[test]
fn test_unknown_keyword_without_suggestion() {
    let tokens = lex(r#""!{banana}""#);
    let (_, diags) = parse_quoted(&tokens);

    assert_eq!(
        diags.as_slice()[0].detail,
        r#""banana" is not a valid template control keyword."#
    );
}

#[test]
fn test_extra_characters_in_marker() {
    let tokens = lex(r#""!{else x}""#);
    let (_, diags) = parse_quoted(&tokens);

    let first = &diags.as_slice()[0];
    assert_eq!(first.summary, "Extra characters in else marker");
}

#[test]
fn test_extra_characters_after_interpolation() {
    let tokens = lex(r#""${a b}""#);
    let (expr, diags) = parse_quoted(&tokens);

    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags.as_slice()[0].summary,
        "Extra characters after interpolation expression"
    );
    // The template itself still closes normally.
    assert_eq!(expr.range.to_byte_range(), 0..8);
}

#[test]
fn test_unterminated_string() {
    let tokens = lex(r#""abc"#);
    let (expr, diags) = parse_quoted(&tokens);

    assert_eq!(diags.len(), 1);
    assert_eq!(diags.as_slice()[0].code, ErrorCode::E1020);
    assert_eq!(literal_str(&template_parts(&expr)[0]), "abc");
}

#[test]
fn test_trim_markers_strip_adjacent_whitespace() {
    let tokens = TokenList::from_vec(vec![
        token(TokenKind::OQuote, "\"", 0),
        token(TokenKind::QuotedLit, "a  ", 1),
        token(TokenKind::TemplateInterp, "${~", 4),
        token(TokenKind::Ident, "b", 7),
        token(TokenKind::TemplateSeqEnd, "~}", 8),
        token(TokenKind::QuotedLit, "  c", 10),
        token(TokenKind::CQuote, "\"", 13),
    ]);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    let parts = template_parts(&expr);
    assert_eq!(literal_str(&parts[0]), "a");
    assert_eq!(parts[1].root_name(), Some("b"));
    assert_eq!(literal_str(&parts[2]), "c");
}

#[test]
fn test_heredoc_keeps_backslashes() {
    let tokens = TokenList::from_vec(vec![
        token(TokenKind::OHeredoc, "<<EOT\n", 0),
        token(TokenKind::StringLit, "a\\b\n", 6),
        token(TokenKind::CHeredoc, "EOT", 10),
    ]);
    let (expr, diags) = parse_quoted(&tokens);

    assert!(diags.is_empty());
    assert_eq!(literal_str(&template_parts(&expr)[0]), "a\\b\n");
    assert_eq!(expr.range.to_byte_range(), 0..13);
}
