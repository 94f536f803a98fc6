//! Token categories and their branded TypeScript type names.

use std::fmt;

use heck::ToUpperCamelCase;
use indexmap::{IndexMap, IndexSet};

/// The `category` attribute of a token, e.g. `color` or `size`.
///
/// A distinct type from plain strings so that category names and the type
/// names derived from them cannot be mixed up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The branded TypeScript type for this category: `color` → `DesignTokenColor`.
    pub fn type_name(&self) -> String {
        format!("DesignToken{}", self.0.to_upper_camel_case())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Collect distinct categories in order of first appearance.
pub fn distinct_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<Category> {
    let seen: IndexSet<&str> = categories.into_iter().collect();
    seen.into_iter().map(Category::new).collect()
}

/// The first pair of distinct categories that share a type name, such as
/// `font-size` and `fontSize`.
pub fn type_name_collision(categories: &[Category]) -> Option<(&Category, &Category)> {
    let mut names: IndexMap<String, &Category> = IndexMap::new();
    for category in categories {
        if let Some(previous) = names.insert(category.type_name(), category) {
            return Some((previous, category));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        assert_eq!(Category::new("color").type_name(), "DesignTokenColor");
        assert_eq!(Category::new("size").type_name(), "DesignTokenSize");
        assert_eq!(Category::new("font-size").type_name(), "DesignTokenFontSize");
    }

    #[test]
    fn test_type_name_collision() {
        let distinct = distinct_categories(["color", "size"]);
        assert_eq!(type_name_collision(&distinct), None);

        let clashing = distinct_categories(["font-size", "color", "fontSize"]);
        let (first, second) = type_name_collision(&clashing).unwrap();
        assert_eq!(first.as_str(), "font-size");
        assert_eq!(second.as_str(), "fontSize");
    }

    #[test]
    fn test_distinct_categories_preserves_first_appearance() {
        let categories = distinct_categories(["size", "color", "size", "time", "color"]);
        let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["size", "color", "time"]);
    }
}
