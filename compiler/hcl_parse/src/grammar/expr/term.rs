//! Term parsing.
//!
//! A term is the operand of the operators: a literal, a variable, a
//! parenthesized expression, a unary operation, a template, a collection
//! constructor or a function call. Traversal suffixes are handled by the
//! caller.

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Expr, ExprKind, SourceRange, TokenKind, Traverser, UnaryOp, Value};

use crate::grammar::{keyword, number_lit_value};
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    pub(super) fn parse_expression_term(&mut self) -> (Expr, Diagnostics) {
        let start = self.peek();
        match start.kind {
            TokenKind::OParen => self.parse_parenthesized(),
            TokenKind::NumberLit => {
                let tok = self.read();
                let (value, diags) = number_lit_value(tok);
                (Expr::literal(value, tok.range.clone()), diags)
            }
            TokenKind::Ident => {
                let tok = self.read();
                if self.peek_kind() == TokenKind::OParen {
                    let open = self.read();
                    return self.finish_function_call(tok, open);
                }

                let name = tok.text();
                let expr = match name.as_ref() {
                    keyword::TRUE => Expr::literal(Value::Bool(true), tok.range.clone()),
                    keyword::FALSE => Expr::literal(Value::Bool(false), tok.range.clone()),
                    keyword::NULL => Expr::literal(Value::Null, tok.range.clone()),
                    _ => Expr::new(
                        ExprKind::ScopeTraversal(vec![Traverser::Root {
                            name: name.into_owned(),
                            range: tok.range.clone(),
                        }]),
                        tok.range.clone(),
                    ),
                };
                (expr, Diagnostics::new())
            }
            TokenKind::OQuote | TokenKind::OHeredoc => {
                let open = self.read();
                self.parse_template_literal(open)
            }
            TokenKind::Minus | TokenKind::Bang => {
                let symbol = self.read();
                let op = if symbol.kind == TokenKind::Minus {
                    UnaryOp::Negate
                } else {
                    UnaryOp::Not
                };
                // The operand is a term with its traversals, not a binary
                // expression: `-4 + 5` is `(-4) + 5`.
                let (operand, diags) =
                    ensure_sufficient_stack(|| self.parse_expression_with_traversals());
                let range = SourceRange::between(&symbol.range, &operand.range);
                let expr = Expr::new(
                    ExprKind::UnaryOp {
                        op,
                        operand: Box::new(operand),
                        symbol_range: symbol.range.clone(),
                    },
                    range,
                );
                (expr, diags)
            }
            TokenKind::OBrack => {
                let open = self.read();
                self.parse_tuple_cons(open)
            }
            TokenKind::OBrace => {
                let open = self.read();
                self.parse_object_cons(open)
            }
            _ => {
                let mut diags = Diagnostics::new();
                if !self.recovery {
                    diags.push(
                        Diagnostic::error(ErrorCode::E1010, start.range.clone())
                            .with_summary("Invalid expression")
                            .with_detail(
                                "Expected the start of an expression, but found an invalid \
                                 expression token.",
                            ),
                    );
                }
                self.set_recovery();
                // Keep the tree walkable.
                (Expr::placeholder(start.range.clone()), diags)
            }
        }
    }

    /// `( expr )`. Newlines inside the parentheses are insignificant.
    fn parse_parenthesized(&mut self) -> (Expr, Diagnostics) {
        let open = self.read();
        self.push_include_newlines(false);

        let (expr, mut diags) = self.parse_expression();
        if diags.has_errors() {
            // Resume after our closing paren so the caller has a chance of
            // finding more valid input.
            self.recover(TokenKind::CParen);
            self.pop_include_newlines();
            return (expr, diags);
        }

        let close = self.peek();
        if close.kind != TokenKind::CParen {
            diags.push(
                Diagnostic::error(ErrorCode::E1011, close.range.clone())
                    .with_summary("Unbalanced parentheses")
                    .with_detail("Expected a closing parenthesis to terminate the expression.")
                    .with_context(SourceRange::between(&open.range, &close.range)),
            );
            self.set_recovery();
        }
        self.read();
        self.pop_include_newlines();

        (expr, diags)
    }
}
