//! Expression nodes.

use std::fmt;

use crate::{SourceRange, Value};

/// An expression with its source range.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub range: SourceRange,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, range: SourceRange) -> Self {
        Expr { kind, range }
    }

    #[inline]
    pub fn literal(value: Value, range: SourceRange) -> Self {
        Expr::new(ExprKind::Literal(value), range)
    }

    /// Dynamic placeholder standing in for an expression that failed to parse.
    #[inline]
    pub fn placeholder(range: SourceRange) -> Self {
        Expr::literal(Value::DYNAMIC, range)
    }

    /// The constant value, if this is a literal.
    pub fn as_literal(&self) -> Option<&Value> {
        match &self.kind {
            ExprKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// The root variable name, if this is a scope traversal.
    pub fn root_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::ScopeTraversal(traversal) => match traversal.first() {
                Some(Traverser::Root { name, .. }) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, ExprKind::Literal(Value::Unknown(_)))
    }
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// A constant: number, string, bool, null, or the dynamic placeholder.
    Literal(Value),

    /// A template holding exactly one interpolation and no literal text.
    ///
    /// Evaluates to the inner expression's value unchanged rather than
    /// converting it to a string.
    TemplateWrap(Box<Expr>),

    /// Concatenation of literal chunks and interpolations.
    Template(Vec<Expr>),

    /// Joins the elements of a tuple-valued expression into a string.
    /// Produced by template `for` directives.
    TemplateJoin(Box<Expr>),

    /// `[a, b, c]`
    Tuple {
        items: Vec<Expr>,
        open_range: SourceRange,
    },

    /// `{ k = v, k2: v2 }`
    Object {
        items: Vec<ObjectItem>,
        open_range: SourceRange,
    },

    /// `condition ? true_result : false_result`
    Conditional {
        condition: Box<Expr>,
        true_result: Box<Expr>,
        false_result: Box<Expr>,
    },

    BinaryOp {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },

    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
        symbol_range: SourceRange,
    },

    /// A path starting at a root variable: `foo.bar[0]`.
    ///
    /// The first step is always [`Traverser::Root`].
    ScopeTraversal(Traversal),

    /// A path applied to an arbitrary expression: `f(x).bar`.
    RelativeTraversal {
        source: Box<Expr>,
        traversal: Traversal,
    },

    /// `collection[key]` where the key is not constant.
    Index {
        collection: Box<Expr>,
        key: Box<Expr>,
        open_range: SourceRange,
    },

    /// `source.*.attr` or `source[*].attr[0]`
    ///
    /// `each` is evaluated once per element with [`ExprKind::AnonSymbol`]
    /// bound to the element.
    Splat {
        source: Box<Expr>,
        each: Box<Expr>,
        item_range: SourceRange,
        marker_range: SourceRange,
    },

    /// The per-element placeholder inside a splat's `each` expression.
    AnonSymbol,

    /// `name(arg, arg...)`
    FunctionCall {
        name: String,
        args: Vec<Expr>,
        /// The final argument was followed by `...`.
        expand_final: bool,
        name_range: SourceRange,
        open_paren_range: SourceRange,
        close_paren_range: SourceRange,
    },

    /// `[for k, v in c : v]` or `{for k, v in c : k => v}`
    For(Box<ForExpr>),
}

/// One `key = value` pair of an object constructor.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectItem {
    pub key: Expr,
    pub value: Expr,
}

/// A `for` comprehension.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForExpr {
    pub key_var: Option<String>,
    pub val_var: String,
    pub collection: Expr,
    /// Present for object comprehensions only.
    pub key_expr: Option<Expr>,
    pub val_expr: Expr,
    pub cond_expr: Option<Expr>,
    /// `...` after the value: collect values with equal keys into tuples.
    pub group: bool,
    pub open_range: SourceRange,
    pub close_range: SourceRange,
}

/// A sequence of traversal steps.
pub type Traversal = Vec<Traverser>;

/// One traversal step.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Traverser {
    Root { name: String, range: SourceRange },
    Attr { name: String, range: SourceRange },
    Index { key: Value, range: SourceRange },
}

impl Traverser {
    pub fn range(&self) -> &SourceRange {
        match self {
            Traverser::Root { range, .. }
            | Traverser::Attr { range, .. }
            | Traverser::Index { range, .. } => range,
        }
    }
}

/// Binary operators, lowest precedence first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Or,
    And,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
