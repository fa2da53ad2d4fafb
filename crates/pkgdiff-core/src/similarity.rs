//! Position-wise change ratio between two strings.
//!
//! The ratio is a cheap gate for deciding whether a deleted line and the
//! inserted line after it are "the same line, edited". It is not an edit
//! distance: a single inserted character near the start shifts every later
//! position and counts as many mismatches.

/// Change ratio in `[0, 1]`; `0` means identical.
///
/// Both strings empty yields `1.0`, so an empty pair is never considered
/// similar under a threshold below one.
pub fn score(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let longest = a.len().max(b.len());
    let positional = (0..longest).filter(|&i| a.get(i) != b.get(i)).count();
    let mismatches = positional + a.len().abs_diff(b.len());

    (mismatches as f64 / (a.len() + b.len()) as f64).min(1.0)
}

/// Whether `a` and `b` are close enough to be shown as one modified line.
///
/// `max_ratio <= 0` demands exact equality; `max_ratio >= 1` accepts anything.
pub fn similar_enough(a: &str, b: &str, max_ratio: f64) -> bool {
    if max_ratio <= 0.0 {
        return a == b;
    }
    if max_ratio >= 1.0 {
        return true;
    }
    score(a, b) <= max_ratio
}
