//! Syntax tree for HCL native syntax.
//!
//! Every node is built bottom-up by the parser and handed to the caller fully
//! owned. Children are owned exclusively by their parent; nothing is shared
//! or mutated after construction.

mod expr;

pub use expr::{
    BinaryOp, Expr, ExprKind, ForExpr, ObjectItem, Traversal, Traverser, UnaryOp,
};

use rustc_hash::FxHashMap;

use crate::SourceRange;

/// The attributes and nested blocks of one `{ ... }` scope, or of a whole file.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    /// Attributes by name. Names are unique within one body.
    pub attributes: FxHashMap<String, Attribute>,
    /// Nested blocks in source order.
    pub blocks: Vec<Block>,
    pub range: SourceRange,
    /// Zero-width range at the end of the body, where new items would go.
    pub end_range: SourceRange,
}

impl Body {
    /// Create an empty body spanning `range`.
    pub fn empty(range: SourceRange) -> Self {
        Body {
            attributes: FxHashMap::default(),
            blocks: Vec::new(),
            end_range: range.end_point(),
            range,
        }
    }

    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Blocks of the given type, in source order.
    pub fn blocks_of_type<'a>(&'a self, block_type: &'a str) -> impl Iterator<Item = &'a Block> {
        self.blocks
            .iter()
            .filter(move |block| block.block_type == block_type)
    }
}

/// `name = expr`
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub expr: Expr,
    pub range: SourceRange,
    pub name_range: SourceRange,
    pub equals_range: SourceRange,
}

/// `type "label" ... { body }`
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub block_type: String,
    pub labels: Vec<String>,
    pub label_ranges: Vec<SourceRange>,
    /// `None` when a label error kept the parser from reaching the body.
    pub body: Option<Body>,
    pub type_range: SourceRange,
    pub open_brace_range: SourceRange,
    pub close_brace_range: SourceRange,
}

impl Block {
    /// Range from the block type to the closing brace.
    pub fn range(&self) -> SourceRange {
        SourceRange::between(&self.type_range, &self.close_brace_range)
    }
}
