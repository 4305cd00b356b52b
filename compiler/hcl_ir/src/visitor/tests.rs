use std::sync::Arc;

use super::*;
use crate::ast::{BinaryOp, Traverser};
use crate::{Number, Pos, SourceRange, Value};

fn at(start: u32) -> SourceRange {
    SourceRange::new(
        Arc::from("v.hcl"),
        Pos::new(1, start + 1, start),
        Pos::new(1, start + 2, start + 1),
    )
}

fn var(name: &str, start: u32) -> Expr {
    Expr::new(
        ExprKind::ScopeTraversal(vec![Traverser::Root {
            name: name.into(),
            range: at(start),
        }]),
        at(start),
    )
}

fn num(n: u32, start: u32) -> Expr {
    Expr::literal(Value::Number(Number::from(n)), at(start))
}

fn roots(found: &[Traversal]) -> Vec<String> {
    found
        .iter()
        .filter_map(|t| match t.first() {
            Some(Traverser::Root { name, .. }) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_variables_in_binary_op() {
    let expr = Expr::new(
        ExprKind::BinaryOp {
            lhs: Box::new(var("a", 0)),
            op: BinaryOp::Add,
            rhs: Box::new(var("b", 4)),
        },
        at(0),
    );
    assert_eq!(roots(&variables(&expr)), vec!["a", "b"]);
}

#[test]
fn test_variables_skip_for_iteration_vars() {
    // [for k, v in items : v + k + offset if v > limit]
    let val = Expr::new(
        ExprKind::BinaryOp {
            lhs: Box::new(Expr::new(
                ExprKind::BinaryOp {
                    lhs: Box::new(var("v", 20)),
                    op: BinaryOp::Add,
                    rhs: Box::new(var("k", 24)),
                },
                at(20),
            )),
            op: BinaryOp::Add,
            rhs: Box::new(var("offset", 28)),
        },
        at(20),
    );
    let cond = Expr::new(
        ExprKind::BinaryOp {
            lhs: Box::new(var("v", 38)),
            op: BinaryOp::GreaterThan,
            rhs: Box::new(var("limit", 42)),
        },
        at(38),
    );
    let expr = Expr::new(
        ExprKind::For(Box::new(ForExpr {
            key_var: Some("k".into()),
            val_var: "v".into(),
            collection: var("items", 12),
            key_expr: None,
            val_expr: val,
            cond_expr: Some(cond),
            group: false,
            open_range: at(0),
            close_range: at(50),
        })),
        at(0),
    );

    assert_eq!(roots(&variables(&expr)), vec!["items", "offset", "limit"]);
}

#[test]
fn test_iteration_vars_not_bound_outside_for() {
    let for_expr = Expr::new(
        ExprKind::For(Box::new(ForExpr {
            key_var: None,
            val_var: "x".into(),
            collection: var("x", 10),
            key_expr: None,
            val_expr: var("x", 14),
            cond_expr: None,
            group: false,
            open_range: at(0),
            close_range: at(20),
        })),
        at(0),
    );
    let expr = Expr::new(
        ExprKind::Tuple {
            items: vec![for_expr, var("x", 30)],
            open_range: at(0),
        },
        at(0),
    );
    // The collection and the trailing `x` refer to the outer scope.
    assert_eq!(roots(&variables(&expr)), vec!["x", "x"]);
}

#[derive(Default)]
struct CountLiterals {
    count: usize,
}

impl<'ast> Visitor<'ast> for CountLiterals {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let ExprKind::Literal(_) = &expr.kind {
            self.count += 1;
        }
        walk_expr(self, expr);
    }
}

#[test]
fn test_visitor_reaches_nested_literals() {
    let expr = Expr::new(
        ExprKind::FunctionCall {
            name: "max".into(),
            args: vec![
                num(1, 4),
                Expr::new(
                    ExprKind::Conditional {
                        condition: Box::new(var("c", 7)),
                        true_result: Box::new(num(2, 11)),
                        false_result: Box::new(num(3, 15)),
                    },
                    at(7),
                ),
            ],
            expand_final: false,
            name_range: at(0),
            open_paren_range: at(3),
            close_paren_range: at(16),
        },
        at(0),
    );
    let mut counter = CountLiterals::default();
    counter.visit_expr(&expr);
    assert_eq!(counter.count, 3);
}
