use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E2003.as_str(), "E2003");
}

#[test]
fn test_error_code_ranges() {
    assert!(ErrorCode::E1010.is_syntax_error());
    assert!(!ErrorCode::E1010.is_literal_error());
    assert!(ErrorCode::E2001.is_literal_error());
    assert!(!ErrorCode::E2001.is_syntax_error());
}

#[test]
fn test_all_codes_are_unique_and_sorted() {
    let names: Vec<&str> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn test_from_str_round_trips_every_code() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e1002".parse::<ErrorCode>(), Ok(ErrorCode::E1002));
    assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
}
