use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Color used for categories the front matter does not mention
pub const DEFAULT_CATEGORY_COLOR: &str = "cyan";

/// Per-document display attributes read from front matter.
///
/// Every top-level string value is a `category: color` pair, e.g.
///
/// ```yaml
/// ---
/// urgent: red
/// home: "#44FF88"
/// ---
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAttributes {
    /// Category name → color identifier, in front matter order
    #[serde(default)]
    pub category_colors: IndexMap<String, String>,
}

impl DocumentAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, color: impl Into<String>) {
        self.category_colors.insert(category.into(), color.into());
    }

    /// Color identifier for a category, falling back to the default
    pub fn category_color(&self, category: &str) -> &str {
        self.category_colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }

    pub fn is_empty(&self) -> bool {
        self.category_colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_color_fallback() {
        let mut attrs = DocumentAttributes::new();
        attrs.insert("urgent", "red");
        assert_eq!(attrs.category_color("urgent"), "red");
        assert_eq!(attrs.category_color("someday"), DEFAULT_CATEGORY_COLOR);
    }
}
