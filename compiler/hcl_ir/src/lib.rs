//! HCL IR - Syntax Tree and Token Types
//!
//! This crate contains the core data structures shared by the HCL syntax
//! parser and its consumers:
//! - Source positions and ranges
//! - Tokens and `TokenList` for lexer output
//! - Literal values and the string-to-number coercion
//! - AST nodes (`Body`, `Attribute`, `Block`, `Expr`)
//! - A read-only visitor over the AST
//!
//! # Ownership
//!
//! AST nodes are built bottom-up by the parser and handed to the caller fully
//! owned. Children are owned exclusively by their parent (`Box<Expr>`,
//! `Vec<Expr>`); nothing is shared or mutated after construction.
//!
//! Numbers store their `f64` bits so every type can derive `Eq` and `Hash`.

pub mod ast;
mod span;
mod token;
mod value;
pub mod visitor;

pub use ast::{
    Attribute, BinaryOp, Block, Body, Expr, ExprKind, ForExpr, ObjectItem, Traversal, Traverser,
    UnaryOp,
};
pub use span::{Pos, SourceRange};
pub use token::{Token, TokenKind, TokenList};
pub use value::{Number, NumberError, Value, ValueType};
