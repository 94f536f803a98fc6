//! The design token leaf type.

use std::path::PathBuf;

use serde_json::Value;

use super::attributes::Attributes;

/// A single design token: a leaf of the token tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Display identifier. Starts as the last path segment; name transforms
    /// replace it.
    pub name: String,
    /// Keys from the tree root down to this token. Never empty.
    pub path: Vec<String>,
    /// Current value (resolved and transformed as the pipeline runs).
    pub value: Value,
    /// The value as written in the source file.
    pub original_value: Value,
    pub attributes: Attributes,
    /// Human-readable description, emitted as documentation.
    pub comment: Option<String>,
    /// The authored `type` key, if any.
    pub token_type: Option<String>,
    /// Source file the token was loaded from.
    pub file_path: Option<PathBuf>,
}

impl Token {
    /// Create a token at `path` with `value`.
    pub fn new(path: Vec<String>, value: Value) -> Self {
        let name = path.last().cloned().unwrap_or_default();
        Self {
            name,
            path,
            original_value: value.clone(),
            value,
            attributes: Attributes::new(),
            comment: None,
            token_type: None,
            file_path: None,
        }
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set explicit attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The `category` attribute, if set.
    pub fn category(&self) -> Option<&str> {
        self.attributes.category.as_deref()
    }

    /// Dot-joined path, as used in references: `color.brand.primary`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_names_after_last_segment() {
        let token = Token::new(vec!["color".into(), "brand".into()], json!("#ff0000"));
        assert_eq!(token.name, "brand");
        assert_eq!(token.original_value, json!("#ff0000"));
        assert_eq!(token.dotted_path(), "color.brand");
        assert_eq!(token.category(), None);
    }
}
