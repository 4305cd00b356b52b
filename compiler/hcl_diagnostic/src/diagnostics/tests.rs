use std::sync::Arc;

use hcl_ir::{Pos, SourceRange};

use super::*;
use crate::ErrorCode;

fn at(byte: u32) -> SourceRange {
    SourceRange::point(Arc::from("t.hcl"), Pos::new(1, byte + 1, byte))
}

#[test]
fn test_empty_has_no_errors() {
    let diags = Diagnostics::new();
    assert!(diags.is_empty());
    assert!(!diags.has_errors());
}

#[test]
fn test_warnings_alone_are_not_errors() {
    let mut diags = Diagnostics::new();
    diags.push(Diagnostic::warning(ErrorCode::E1003, at(0)));
    assert!(!diags.has_errors());
    assert_eq!(diags.warning_count(), 1);
    assert_eq!(diags.error_count(), 0);
}

#[test]
fn test_extend_preserves_order() {
    let mut first = Diagnostics::from(Diagnostic::error(ErrorCode::E1001, at(0)));
    let mut second = Diagnostics::new();
    second.push(Diagnostic::error(ErrorCode::E1010, at(5)));
    second.push(Diagnostic::warning(ErrorCode::E1003, at(9)));
    first.extend(second);

    let codes: Vec<ErrorCode> = first.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1001, ErrorCode::E1010, ErrorCode::E1003]);
    assert!(first.has_errors());
    assert_eq!(first[1].subject, at(5));
}
