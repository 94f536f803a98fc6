//! Attribute transforms: derive semantic attributes from a token's path.

use crate::error::Result;
use crate::types::{Attributes, Token};

use super::{Transform, TransformOutput};

/// `attribute/cti-custom`: fills category, type, item, theme, subitem and
/// state from the first six path segments. Explicit attributes win.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeCtiCustom;

impl Transform for AttributeCtiCustom {
    fn name(&self) -> &str {
        "attribute/cti-custom"
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        let derived = Attributes::from_path(&token.path).overlay(&token.attributes);
        Ok(TransformOutput::Attributes(derived))
    }
}

/// `attribute/cti`: the conventional category/type/item/subitem/state
/// mapping without a theme slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeCti;

impl Transform for AttributeCti {
    fn name(&self) -> &str {
        "attribute/cti"
    }

    fn transform(&self, token: &Token) -> Result<TransformOutput> {
        let derived = Attributes::from_path_cti(&token.path).overlay(&token.attributes);
        Ok(TransformOutput::Attributes(derived))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn derive(transform: &dyn Transform, token: &Token) -> Attributes {
        match transform.transform(token).unwrap() {
            TransformOutput::Attributes(attrs) => attrs,
            other => panic!("expected attributes, got {:?}", other),
        }
    }

    #[test]
    fn test_cti_custom_brand_primary() {
        let token = Token::new(
            vec!["color".into(), "brand".into(), "primary".into()],
            json!("#ff0000"),
        );
        let attrs = derive(&AttributeCtiCustom, &token);

        assert_eq!(attrs.category.as_deref(), Some("color"));
        assert_eq!(attrs.kind.as_deref(), Some("brand"));
        assert_eq!(attrs.item.as_deref(), Some("primary"));
        assert_eq!(attrs.theme, None);
    }

    #[test]
    fn test_cti_custom_keeps_explicit() {
        let mut explicit = Attributes::new();
        explicit.set("category", "content");
        explicit.set("type", "icon");
        let token = Token::new(vec!["icon".into(), "home".into()], json!("&#xE001;"))
            .with_attributes(explicit);

        let attrs = derive(&AttributeCtiCustom, &token);
        assert_eq!(attrs.category.as_deref(), Some("content"));
        assert_eq!(attrs.kind.as_deref(), Some("icon"));
    }

    #[test]
    fn test_cti_custom_fills_theme_and_state() {
        let path: Vec<String> = ["color", "bg", "button", "dark", "primary", "hover", "extra"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let attrs = derive(&AttributeCtiCustom, &Token::new(path, json!("#000")));

        assert_eq!(attrs.theme.as_deref(), Some("dark"));
        assert_eq!(attrs.subitem.as_deref(), Some("primary"));
        assert_eq!(attrs.state.as_deref(), Some("hover"));
    }

    #[test]
    fn test_cti_standard_has_no_theme() {
        let path: Vec<String> = ["color", "bg", "button", "primary", "hover"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let attrs = derive(&AttributeCti, &Token::new(path, json!("#000")));

        assert_eq!(attrs.theme, None);
        assert_eq!(attrs.subitem.as_deref(), Some("primary"));
        assert_eq!(attrs.state.as_deref(), Some("hover"));
    }
}
