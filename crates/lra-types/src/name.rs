//! Name normalization and fuzzy matching.
//!
//! Knowledge-base tables cross-reference each other by free-text name, so
//! every join in the matching engine goes through the same two primitives:
//! [`normalize`] folds a name down to lowercase alphanumerics, and
//! [`overlaps`] declares two normalized names the same concept when they are
//! equal or one contains the other.
//!
//! The substring rule is intentionally recall-heavy: a short name will match
//! many longer ones. Callers that need stricter joins must gate on exact
//! fields (for example units) before falling back to this.

/// Normalize a name for fuzzy comparison.
///
/// Case-folds the input and strips every character outside `[a-z0-9]`.
/// Normalization is idempotent: applying it twice yields the same string.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Whether two already-normalized names denote the same concept.
///
/// True when the names are equal or either is a substring of the other.
/// Both arguments must have gone through [`normalize`] first; raw names
/// compare incorrectly here.
pub fn overlaps(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}
