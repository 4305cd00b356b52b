use super::*;

#[test]
fn edit_distance_empty() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("", "abc"), 3);
}

#[test]
fn edit_distance_same() {
    assert_eq!(edit_distance("endif", "endif"), 0);
}

#[test]
fn edit_distance_mixed_edits() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("edif", "endif"), 1);
    assert_eq!(edit_distance("fro", "for"), 2);
}

#[test]
fn edit_distance_counts_chars_not_bytes() {
    assert_eq!(edit_distance("für", "fur"), 1);
}

#[test]
fn suggest_close_keyword() {
    let keywords = ["if", "for", "else", "endif", "endfor"];
    assert_eq!(suggest_keyword("esle", &keywords), Some("else"));
    assert_eq!(suggest_keyword("endfro", &keywords), Some("endfor"));
}

#[test]
fn suggest_nothing_for_distant_words() {
    let keywords = ["if", "for", "else", "endif", "endfor"];
    assert_eq!(suggest_keyword("banana", &keywords), None);
    assert_eq!(suggest_keyword("", &keywords), None);
}

#[test]
fn suggest_prefers_first_on_tie() {
    // "fi" is two edits from both "if" and "for".
    assert_eq!(suggest_keyword("fi", &["if", "for"]), Some("if"));
}
