//! Expression parsing.
//!
//! This module extends Parser with methods for parsing expressions: the
//! conditional operator, binary operators, and everything below them.
//!
//! # Module Structure
//!
//! - `mod.rs`: Entry point (`parse_expression`), conditional and binary levels
//! - `operators.rs`: Binary operator precedence table
//! - `term.rs`: Literals, variables, parentheses, unary operators
//! - `traversal.rs`: `.attr`, `[key]` and splat suffixes, static traversals
//! - `collection.rs`: Tuple and object constructors, `for` expressions
//! - `call.rs`: Function calls

mod call;
mod collection;
mod operators;
mod term;
mod traversal;

use hcl_diagnostic::{Diagnostic, Diagnostics, ErrorCode};
use hcl_ir::{Expr, ExprKind, SourceRange, TokenKind};

use crate::stack::ensure_sufficient_stack;
use crate::Parser;

use operators::{match_binary_op, BINARY_OPS};

impl Parser<'_> {
    /// Parse a full expression.
    ///
    /// Uses `ensure_sufficient_stack` to prevent stack overflow
    /// on deeply nested expressions.
    pub(crate) fn parse_expression(&mut self) -> (Expr, Diagnostics) {
        ensure_sufficient_stack(|| self.parse_conditional())
    }

    /// `cond ? a : b`, or just `cond`.
    ///
    /// A missing `: b` is reported and `cond` alone is returned.
    fn parse_conditional(&mut self) -> (Expr, Diagnostics) {
        let start_range = self.peek_range();
        let (condition, mut diags) = self.parse_binary_ops(0);
        if self.recovery && diags.has_errors() {
            return (condition, diags);
        }

        if self.peek_kind() != TokenKind::Question {
            return (condition, diags);
        }
        self.read();

        let (true_result, true_diags) = self.parse_expression();
        let failed = true_diags.has_errors();
        diags.extend(true_diags);
        if self.recovery && failed {
            return (condition, diags);
        }

        let colon = self.peek();
        if colon.kind != TokenKind::Colon {
            diags.push(
                Diagnostic::error(ErrorCode::E1013, colon.range.clone())
                    .with_summary("Missing false expression in conditional")
                    .with_detail(
                        "The conditional operator (...?...:...) requires a false expression, \
                         delimited by a colon.",
                    )
                    .with_context(SourceRange::between(&start_range, &colon.range)),
            );
            return (condition, diags);
        }
        self.read();

        let (false_result, false_diags) = self.parse_expression();
        let failed = false_diags.has_errors();
        diags.extend(false_diags);
        if self.recovery && failed {
            return (condition, diags);
        }

        let range = SourceRange::between(&start_range, &false_result.range);
        let expr = Expr::new(
            ExprKind::Conditional {
                condition: Box::new(condition),
                true_result: Box::new(true_result),
                false_result: Box::new(false_result),
            },
            range,
        );
        (expr, diags)
    }

    /// Parse binary operators from precedence `level` upward.
    ///
    /// Operators at one level fold left: `a - b - c` is `(a - b) - c`.
    fn parse_binary_ops(&mut self, level: usize) -> (Expr, Diagnostics) {
        let Some(&ops) = BINARY_OPS.get(level) else {
            return self.parse_expression_with_traversals();
        };

        let (mut lhs, mut diags) = self.parse_binary_ops(level + 1);
        if self.recovery && diags.has_errors() {
            return (lhs, diags);
        }

        while let Some(op) = match_binary_op(ops, self.peek_kind()) {
            self.read();
            let (rhs, rhs_diags) = self.parse_binary_ops(level + 1);
            let failed = rhs_diags.has_errors();
            diags.extend(rhs_diags);
            if self.recovery && failed {
                return (lhs, diags);
            }

            let range = SourceRange::between(&lhs.range, &rhs.range);
            lhs = Expr::new(
                ExprKind::BinaryOp {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(rhs),
                },
                range,
            );
        }

        (lhs, diags)
    }
}
