//! Parsing of raw classifier output into label names.

use stash_core::defaults::{MAX_LABEL_LEN, MAX_SUGGESTED_LABELS};

/// Turn the model's reply into at most two label names.
///
/// The reply is trimmed and stripped of surrounding quote characters, then
/// split on commas. Pieces are trimmed; empty pieces and pieces longer
/// than `MAX_LABEL_LEN` characters are dropped. Order is preserved.
pub fn parse_labels(response: &str) -> Vec<String> {
    response
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && part.chars().count() <= MAX_LABEL_LEN)
        .take(MAX_SUGGESTED_LABELS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_at_two_preserving_order() {
        assert_eq!(parse_labels("Tech, AI, Extra, MoreExtra"), vec!["Tech", "AI"]);
    }

    #[test]
    fn test_strips_quotes_and_whitespace() {
        assert_eq!(parse_labels("  \"Design, Marketing\"\n"), vec!["Design", "Marketing"]);
        assert_eq!(parse_labels("'News'"), vec!["News"]);
    }

    #[test]
    fn test_drops_empty_pieces() {
        assert_eq!(parse_labels(",, Tech ,,AI"), vec!["Tech", "AI"]);
        assert!(parse_labels("   ").is_empty());
        assert!(parse_labels("\"\"").is_empty());
    }

    #[test]
    fn test_drops_overlong_pieces() {
        let long = "x".repeat(51);
        let exact = "y".repeat(50);
        let response = format!("{}, {}, Tech", long, exact);
        assert_eq!(parse_labels(&response), vec![exact, "Tech".to_string()]);
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let label = "日本語".repeat(6);
        assert_eq!(parse_labels(&label), vec![label.clone()]);
        assert!(parse_labels(&"日".repeat(51)).is_empty());
    }

    #[test]
    fn test_prose_reply_becomes_single_long_label_and_is_dropped() {
        let reply = "I think this tweet is best described as being about technology and startups";
        assert!(parse_labels(reply).is_empty());
    }
}
