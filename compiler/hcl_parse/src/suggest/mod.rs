//! "Did You Mean?" Suggestions
//!
//! Fuzzy matching of misspelled keywords against the keywords valid at that
//! point, using Levenshtein edit distance.

/// Edits allowed between a misspelling and a suggestion.
const MAX_DISTANCE: usize = 2;

/// Levenshtein edit distance between two strings, counted in chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    // Two rows instead of the full matrix.
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

/// The closest candidate within [`MAX_DISTANCE`] edits of `given`.
///
/// Ties go to the candidate listed first.
pub fn suggest_keyword<'a>(given: &str, candidates: &[&'a str]) -> Option<&'a str> {
    if given.is_empty() {
        return None;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for &candidate in candidates {
        let distance = edit_distance(given, candidate);
        if distance > MAX_DISTANCE {
            continue;
        }
        match best {
            Some((_, best_dist)) if best_dist <= distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(s, _)| s)
}

#[cfg(test)]
mod tests;
