//! AST Visitor Pattern
//!
//! Default `visit_*` implementations call the matching `walk_*` function,
//! which visits the node's children in source order. Override a `visit_*`
//! method to act on a node, and call `walk_*` from it to keep descending.
//!
//! # Example
//!
//! ```text
//! struct CountCalls {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, expr: &'ast Expr) {
//!         if let ExprKind::FunctionCall { .. } = &expr.kind {
//!             self.count += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::ast::{Attribute, Block, Body, Expr, ExprKind, ForExpr, Traversal};

/// AST Visitor trait.
///
/// The visitor may mutate its own state; the AST is only borrowed.
pub trait Visitor<'ast> {
    fn visit_body(&mut self, body: &'ast Body) {
        walk_body(self, body);
    }

    fn visit_attribute(&mut self, attr: &'ast Attribute) {
        walk_attribute(self, attr);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// Visit a `for` comprehension.
    fn visit_for(&mut self, for_expr: &'ast ForExpr) {
        walk_for(self, for_expr);
    }
}

/// Walk a body: attributes, then blocks, each in source order.
pub fn walk_body<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, body: &'ast Body) {
    let mut attrs: Vec<&Attribute> = body.attributes.values().collect();
    attrs.sort_by_key(|attr| attr.name_range.start.byte);
    for attr in attrs {
        visitor.visit_attribute(attr);
    }
    for block in &body.blocks {
        visitor.visit_block(block);
    }
}

pub fn walk_attribute<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, attr: &'ast Attribute) {
    visitor.visit_expr(&attr.expr);
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    if let Some(body) = &block.body {
        visitor.visit_body(body);
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expr) {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::ScopeTraversal(_) | ExprKind::AnonSymbol => {}
        ExprKind::TemplateWrap(inner) | ExprKind::TemplateJoin(inner) => {
            visitor.visit_expr(inner);
        }
        ExprKind::Template(parts) => {
            for part in parts {
                visitor.visit_expr(part);
            }
        }
        ExprKind::Tuple { items, .. } => {
            for item in items {
                visitor.visit_expr(item);
            }
        }
        ExprKind::Object { items, .. } => {
            for item in items {
                visitor.visit_expr(&item.key);
                visitor.visit_expr(&item.value);
            }
        }
        ExprKind::Conditional {
            condition,
            true_result,
            false_result,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(true_result);
            visitor.visit_expr(false_result);
        }
        ExprKind::BinaryOp { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::UnaryOp { operand, .. } => visitor.visit_expr(operand),
        ExprKind::RelativeTraversal { source, .. } => visitor.visit_expr(source),
        ExprKind::Index {
            collection, key, ..
        } => {
            visitor.visit_expr(collection);
            visitor.visit_expr(key);
        }
        ExprKind::Splat { source, each, .. } => {
            visitor.visit_expr(source);
            visitor.visit_expr(each);
        }
        ExprKind::FunctionCall { args, .. } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::For(for_expr) => visitor.visit_for(for_expr),
    }
}

pub fn walk_for<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, for_expr: &'ast ForExpr) {
    visitor.visit_expr(&for_expr.collection);
    if let Some(key) = &for_expr.key_expr {
        visitor.visit_expr(key);
    }
    visitor.visit_expr(&for_expr.val_expr);
    if let Some(cond) = &for_expr.cond_expr {
        visitor.visit_expr(cond);
    }
}

/// Every scope traversal `expr` references, in source order.
///
/// Traversals rooted at a `for` comprehension's own iteration variables are
/// skipped inside that comprehension, since they are not supplied by the
/// caller's scope.
pub fn variables(expr: &Expr) -> Vec<Traversal> {
    let mut collector = VariableCollector {
        bound: Vec::new(),
        found: Vec::new(),
    };
    collector.visit_expr(expr);
    collector.found
}

struct VariableCollector<'ast> {
    bound: Vec<&'ast str>,
    found: Vec<Traversal>,
}

impl<'ast> Visitor<'ast> for VariableCollector<'ast> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let ExprKind::ScopeTraversal(traversal) = &expr.kind {
            let is_bound = expr
                .root_name()
                .is_some_and(|name| self.bound.contains(&name));
            if !is_bound {
                self.found.push(traversal.clone());
            }
            return;
        }
        walk_expr(self, expr);
    }

    fn visit_for(&mut self, for_expr: &'ast ForExpr) {
        self.visit_expr(&for_expr.collection);

        let depth = self.bound.len();
        if let Some(key_var) = &for_expr.key_var {
            self.bound.push(key_var);
        }
        self.bound.push(&for_expr.val_var);

        if let Some(key) = &for_expr.key_expr {
            self.visit_expr(key);
        }
        self.visit_expr(&for_expr.val_expr);
        if let Some(cond) = &for_expr.cond_expr {
            self.visit_expr(cond);
        }

        self.bound.truncate(depth);
    }
}

#[cfg(test)]
mod tests;
