//! Collection constructors and `for` expressions.
//!
//! Tuples ignore newlines entirely. Objects treat a newline as an item
//! separator, the same as a comma. A `for` keyword directly after the
//! opening bracket turns either one into a comprehension.

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Expr, ExprKind, ForExpr, ObjectItem, SourceRange, Token, TokenKind, Traverser, Value};

use crate::grammar::keyword;
use crate::Parser;

impl<'a> Parser<'a> {
    /// `[a, b, c]` or `[for ...]`, after the opening bracket.
    pub(super) fn parse_tuple_cons(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        self.push_include_newlines(false);
        let result = if self.at_keyword(keyword::FOR) {
            self.finish_for_expr(open)
        } else {
            self.finish_tuple_cons(open)
        };
        self.pop_include_newlines();
        result
    }

    fn finish_tuple_cons(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        let mut items = Vec::new();
        let mut diags = Diagnostics::new();

        let close = loop {
            if self.peek_kind() == TokenKind::CBrack {
                break self.read();
            }

            let (item, item_diags) = self.parse_expression();
            let failed = item_diags.has_errors();
            items.push(item);
            diags.extend(item_diags);
            if self.recovery && failed {
                break self.recover(TokenKind::CBrack);
            }

            let next = self.peek();
            match next.kind {
                TokenKind::CBrack => break self.read(),
                TokenKind::Comma => {
                    self.read();
                }
                _ => {
                    if !self.recovery {
                        diags.push(
                            Diagnostic::error(ErrorCode::E1012, next.range.clone())
                                .with_summary("Missing item separator")
                                .with_detail(
                                    "Expected a comma to mark the beginning of the next item.",
                                )
                                .with_context(SourceRange::between(&open.range, &next.range)),
                        );
                    }
                    break self.recover(TokenKind::CBrack);
                }
            }
        };

        let range = SourceRange::between(&open.range, &close.range);
        let expr = Expr::new(
            ExprKind::Tuple {
                items,
                open_range: open.range.clone(),
            },
            range,
        );
        (expr, diags)
    }

    /// `{ k = v, k2: v2 }` or `{for ...}`, after the opening brace.
    pub(super) fn parse_object_cons(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        self.push_include_newlines(true);
        let result = if self.at_keyword(keyword::FOR) {
            self.finish_for_expr(open)
        } else {
            self.finish_object_cons(open)
        };
        self.pop_include_newlines();
        result
    }

    fn finish_object_cons(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        let mut items = Vec::new();
        let mut diags = Diagnostics::new();

        let close = loop {
            match self.peek_kind() {
                TokenKind::Newline => {
                    self.read();
                    continue;
                }
                TokenKind::CBrace => break self.read(),
                _ => {}
            }

            // `(name) = v` keeps `name` a variable reference.
            let key_start = self.peek();
            let force_non_literal = key_start.kind == TokenKind::OParen;
            let (key, key_diags) = self.parse_expression();
            let failed = key_diags.has_errors();
            diags.extend(key_diags);
            if self.recovery && failed {
                break self.recover(TokenKind::CBrace);
            }
            let key = if force_non_literal {
                key
            } else {
                literal_object_key(key, key_start)
            };

            let next = self.peek();
            if !matches!(next.kind, TokenKind::Equal | TokenKind::Colon) {
                if !self.recovery {
                    diags.push(missing_object_value(open, next));
                }
                break self.recover(TokenKind::CBrace);
            }
            self.read();

            let (value, value_diags) = self.parse_expression();
            let failed = value_diags.has_errors();
            items.push(ObjectItem { key, value });
            diags.extend(value_diags);
            if self.recovery && failed {
                break self.recover(TokenKind::CBrace);
            }

            let next = self.peek();
            match next.kind {
                TokenKind::CBrace => break self.read(),
                TokenKind::Comma | TokenKind::Newline => {
                    self.read();
                }
                _ => {
                    if !self.recovery {
                        diags.push(
                            Diagnostic::error(ErrorCode::E1012, next.range.clone())
                                .with_summary("Missing item separator")
                                .with_detail(
                                    "Expected a newline or comma to mark the beginning of the \
                                     next item.",
                                )
                                .with_context(SourceRange::between(&open.range, &next.range)),
                        );
                    }
                    break self.recover(TokenKind::CBrace);
                }
            }
        };

        let range = SourceRange::between(&open.range, &close.range);
        let expr = Expr::new(
            ExprKind::Object {
                items,
                open_range: open.range.clone(),
            },
            range,
        );
        (expr, diags)
    }

    /// `for k, v in coll : key => value... if cond` up to the closer matching
    /// `open`, with the peeker on the `for` keyword.
    ///
    /// `open` decides the result: a bracket builds a tuple, a brace an
    /// object.
    fn finish_for_expr(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        self.push_include_newlines(false);
        let result = self.finish_for_expr_inner(open);
        self.pop_include_newlines();
        result
    }

    fn finish_for_expr_inner(&mut self, open: &'a Token) -> (Expr, Diagnostics) {
        self.read();
        let make_object = open.kind == TokenKind::OBrace;
        let close_kind = open.kind.opposite_bracket();
        let mut diags = Diagnostics::new();

        if self.peek_kind() != TokenKind::Ident {
            self.push_for_error(
                &mut diags,
                open,
                "For expression requires variable name after 'for'.",
            );
            return self.abandon_for_expr(open, diags);
        }
        let mut val_var = self.read().text().into_owned();
        let mut key_var = None;

        if self.peek_kind() == TokenKind::Comma {
            // That was the key.
            self.read();
            if self.peek_kind() != TokenKind::Ident {
                self.push_for_error(
                    &mut diags,
                    open,
                    "For expression requires value variable name after comma.",
                );
                return self.abandon_for_expr(open, diags);
            }
            key_var = Some(val_var);
            val_var = self.read().text().into_owned();
        }

        if !self.at_keyword(keyword::IN) {
            self.push_for_error(
                &mut diags,
                open,
                "For expression requires the 'in' keyword after its name declarations.",
            );
            return self.abandon_for_expr(open, diags);
        }
        self.read();

        let (collection, coll_diags) = self.parse_expression();
        let failed = coll_diags.has_errors();
        diags.extend(coll_diags);
        if self.recovery && failed {
            return self.abandon_for_expr(open, diags);
        }

        if self.peek_kind() != TokenKind::Colon {
            self.push_for_error(
                &mut diags,
                open,
                "For expression requires a colon after the collection expression.",
            );
            return self.abandon_for_expr(open, diags);
        }
        self.read();

        let (first, first_diags) = self.parse_expression();
        let mut failed = first_diags.has_errors();
        diags.extend(first_diags);
        let (key_expr, val_expr) = if self.peek_kind() == TokenKind::FatArrow {
            // What was just parsed is the key.
            self.read();
            let (value, value_diags) = self.parse_expression();
            failed |= value_diags.has_errors();
            diags.extend(value_diags);
            (Some(first), value)
        } else {
            (None, first)
        };
        if self.recovery && failed {
            return self.abandon_for_expr(open, diags);
        }

        let ellipsis = if self.peek_kind() == TokenKind::Ellipsis {
            Some(self.read())
        } else {
            None
        };

        let cond_expr = if self.at_keyword(keyword::IF) {
            self.read();
            let (cond, cond_diags) = self.parse_expression();
            let failed = cond_diags.has_errors();
            diags.extend(cond_diags);
            if self.recovery && failed {
                return self.abandon_for_expr(open, diags);
            }
            Some(cond)
        } else {
            None
        };

        let close = if self.peek_kind() == close_kind {
            self.read()
        } else {
            self.push_for_error(
                &mut diags,
                open,
                "Extra characters after the end of the 'for' expression.",
            );
            self.recover(close_kind)
        };

        let context = SourceRange::between(&open.range, &close.range);
        if make_object {
            if key_expr.is_none() {
                diags.push(
                    invalid_for(val_expr.range.clone(), context.clone())
                        .with_detail("Key expression is required when building an object."),
                );
            }
        } else {
            if let Some(key) = &key_expr {
                diags.push(
                    invalid_for(key.range.clone(), context.clone())
                        .with_detail("Key expression is not valid when building a tuple."),
                );
            }
            if let Some(ellipsis) = ellipsis {
                diags.push(
                    invalid_for(ellipsis.range.clone(), context.clone())
                        .with_detail("Grouping ellipsis (...) cannot be used when building a tuple."),
                );
            }
        }

        let expr = Expr::new(
            ExprKind::For(Box::new(ForExpr {
                key_var,
                val_var,
                collection,
                key_expr,
                val_expr,
                cond_expr,
                group: ellipsis.is_some(),
                open_range: open.range.clone(),
                close_range: close.range.clone(),
            })),
            context,
        );
        (expr, diags)
    }

    /// Report a malformed `for` header at the next token.
    fn push_for_error(&self, diags: &mut Diagnostics, open: &Token, detail: &str) {
        if self.recovery {
            return;
        }
        let at = self.peek_range();
        let context = SourceRange::between(&open.range, &at);
        diags.push(invalid_for(at, context).with_detail(detail));
    }

    /// Skip to the closer and stand a placeholder in for the whole `for`.
    fn abandon_for_expr(&mut self, open: &'a Token, diags: Diagnostics) -> (Expr, Diagnostics) {
        let close = self.recover(open.kind.opposite_bracket());
        let range = SourceRange::between(&open.range, &close.range);
        (Expr::placeholder(range), diags)
    }
}

fn invalid_for(subject: SourceRange, context: SourceRange) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1014, subject)
        .with_summary("Invalid 'for' expression")
        .with_context(context)
}

/// A bare name used as an object key means the name itself, not the
/// variable.
fn literal_object_key(key: Expr, start: &Token) -> Expr {
    match key.kind {
        // `true`, `false` and `null` spelled as a key are names, not values.
        ExprKind::Literal(Value::Bool(_) | Value::Null)
            if start.kind == TokenKind::Ident && key.range == start.range =>
        {
            Expr::literal(Value::String(start.text().into_owned()), key.range)
        }
        ExprKind::ScopeTraversal(steps) => match <[Traverser; 1]>::try_from(steps) {
            Ok([Traverser::Root { name, .. }]) => Expr::literal(Value::String(name), key.range),
            Ok(steps) => Expr::new(ExprKind::ScopeTraversal(steps.into()), key.range),
            Err(steps) => Expr::new(ExprKind::ScopeTraversal(steps), key.range),
        },
        kind => Expr::new(kind, key.range),
    }
}

fn missing_object_value(open: &Token, next: &Token) -> Diagnostic {
    let (summary, detail) = match next.kind {
        TokenKind::Newline | TokenKind::Comma => (
            "Missing item value",
            "Expected an item value, introduced by an equals sign (\"=\").",
        ),
        TokenKind::Ident => (
            "Missing key/value separator",
            "Expected an equals sign (\"=\") to mark the beginning of the item value. If you \
             intended to give an item name containing periods or spaces, write the name in \
             quotes to create a string literal.",
        ),
        _ => (
            "Missing key/value separator",
            "Expected an equals sign (\"=\") to mark the beginning of the item value.",
        ),
    };
    Diagnostic::error(ErrorCode::E1012, next.range.clone())
        .with_summary(summary)
        .with_detail(detail)
        .with_context(SourceRange::between(&open.range, &next.range))
}
