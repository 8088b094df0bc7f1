//! Default display styling for categories created from suggested labels.

use crate::labels::normalize;

/// Color used when a label is not in the well-known table.
pub const DEFAULT_COLOR: &str = "#6B7280";

/// Icon used when a label is not in the well-known table.
pub const DEFAULT_ICON: &str = "📁";

/// Display color and icon for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

impl CategoryStyle {
    pub const DEFAULT: CategoryStyle = CategoryStyle {
        color: DEFAULT_COLOR,
        icon: DEFAULT_ICON,
    };
}

/// Well-known categories keyed by normalized name.
const KNOWN_STYLES: [(&str, CategoryStyle); 10] = [
    ("tech", CategoryStyle { color: "#3B82F6", icon: "💻" }),
    ("ai", CategoryStyle { color: "#8B5CF6", icon: "🤖" }),
    ("design", CategoryStyle { color: "#EC4899", icon: "🎨" }),
    ("coding", CategoryStyle { color: "#10B981", icon: "⚡" }),
    ("business", CategoryStyle { color: "#F59E0B", icon: "💼" }),
    ("marketing", CategoryStyle { color: "#EF4444", icon: "📈" }),
    ("news", CategoryStyle { color: "#6366F1", icon: "📰" }),
    ("tutorial", CategoryStyle { color: "#14B8A6", icon: "📚" }),
    ("meme", CategoryStyle { color: "#F97316", icon: "😂" }),
    ("thread", CategoryStyle { color: "#A855F7", icon: "🧵" }),
];

/// Resolve the default style for a label. Total; never fails.
pub fn style_for(label: &str) -> CategoryStyle {
    let key = normalize(label);
    KNOWN_STYLES
        .iter()
        .find(|(name, _)| *name == key.as_str())
        .map(|(_, style)| *style)
        .unwrap_or(CategoryStyle::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(style_for("AI"), style_for("ai"));
        assert_eq!(style_for("Ai").color, "#8B5CF6");
        assert_eq!(style_for("Ai").icon, "🤖");
    }

    #[test]
    fn test_unknown_label_gets_default() {
        assert_eq!(style_for("Unrecognized"), CategoryStyle::DEFAULT);
        assert_eq!(style_for("").color, DEFAULT_COLOR);
        assert_eq!(style_for("tech ").icon, DEFAULT_ICON);
    }

    #[test]
    fn test_every_known_entry_resolves() {
        for (name, style) in KNOWN_STYLES {
            assert_eq!(style_for(&name.to_uppercase()), style, "{}", name);
            assert_ne!(style.color, DEFAULT_COLOR);
        }
    }
}
