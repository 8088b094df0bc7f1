//! Categorization prompt construction.

/// Placeholder used when the user has no categories yet.
pub const NO_CATEGORIES: &str = "None yet";

/// Build the classification prompt for one bookmark.
pub fn build_categorization_prompt(text: &str, known_labels: &[String]) -> String {
    let categories = if known_labels.is_empty() {
        NO_CATEGORIES.to_string()
    } else {
        known_labels.join(", ")
    };

    format!(
        r#"You are a bookmark categorization assistant. Analyze this tweet and suggest 1-2 relevant categories.

Tweet text: "{text}"

Existing user categories: {categories}

Instructions:
1. If the tweet matches existing categories, use those (exact name match)
2. If no match, suggest NEW categories (max 2)
3. Use simple, clear category names (e.g., "Tech", "Coding", "Design", "AI", "Business", "Marketing")
4. Respond with ONLY category names, comma-separated
5. No explanations, just category names

Example responses:
- "Tech, AI"
- "Design"
- "Marketing, Business"

Your response:"#
    )
}
