//! Binary operator precedence table.

use hcl_ir::{BinaryOp, TokenKind};

/// Binary operators by precedence level, lowest first. All levels are
/// left-associative.
pub(super) const BINARY_OPS: &[&[(TokenKind, BinaryOp)]] = &[
    &[(TokenKind::Or, BinaryOp::Or)],
    &[(TokenKind::And, BinaryOp::And)],
    &[
        (TokenKind::EqualOp, BinaryOp::Equal),
        (TokenKind::NotEqual, BinaryOp::NotEqual),
    ],
    &[
        (TokenKind::GreaterThan, BinaryOp::GreaterThan),
        (TokenKind::GreaterThanEq, BinaryOp::GreaterThanOrEqual),
        (TokenKind::LessThan, BinaryOp::LessThan),
        (TokenKind::LessThanEq, BinaryOp::LessThanOrEqual),
    ],
    &[
        (TokenKind::Plus, BinaryOp::Add),
        (TokenKind::Minus, BinaryOp::Subtract),
    ],
    &[
        (TokenKind::Star, BinaryOp::Multiply),
        (TokenKind::Slash, BinaryOp::Divide),
        (TokenKind::Percent, BinaryOp::Modulo),
    ],
];

/// The operator `kind` denotes at this precedence level, if any.
#[inline]
pub(super) fn match_binary_op(level: &[(TokenKind, BinaryOp)], kind: TokenKind) -> Option<BinaryOp> {
    level
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|&(_, op)| op)
}
