//! Case-insensitive label keys.
//!
//! A suggested label and an existing category name refer to the same
//! category iff their normalized keys are equal.

use std::fmt;

/// Lookup key for a category or label name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a label for matching.
///
/// Lowercases only; whitespace and punctuation are significant.
pub fn normalize(label: &str) -> NormalizedKey {
    NormalizedKey(label.to_lowercase())
}

/// Whether two labels name the same category.
pub fn labels_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("Tech").as_str(), "tech");
        assert_eq!(normalize("AI").as_str(), "ai");
    }

    #[test]
    fn test_match_ignores_case_only() {
        assert!(labels_match("Machine Learning", "machine learning"));
        assert!(!labels_match("Machine Learning", "machine-learning"));
        assert!(!labels_match("Tech", " tech"));
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize("ÉCOLE"), normalize("école"));
    }
}
