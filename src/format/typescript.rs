//! TypeScript declaration formats.
//!
//! The branded declarations give every category its own nominal string
//! type, so a `DesignTokenSize` cannot be passed where a `DesignTokenColor`
//! is expected even though both are strings at runtime:
//!
//! ```ts
//! type Branded<T, U extends string> = T & { [key in U]: never }
//! type TokenType = 'color' | 'size'
//! type DesignToken<T extends string> = T extends TokenType ? Branded<string, T | 'designToken'> : never
//! export type DesignTokenColor = DesignToken<'color'>
//! export const ColorBrandPrimary: DesignTokenColor;
//! ```

use serde_json::Value;

use crate::error::{DtkError, Result};
use crate::types::{type_name_collision, Category, Token};

use super::javascript::nested_tree;
use super::literal::{ts_type, Literal};
use super::{export_name, file_header, join_sections, jsdoc, CommentStyle, Format, FormatContext};

/// `typescript/es6-declarations-branded`: flat declarations with one branded
/// type per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandedDeclarations;

impl Format for BrandedDeclarations {
    fn name(&self) -> &str {
        "typescript/es6-declarations-branded"
    }

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
        let categories = ctx.dictionary.categories();
        if let Some((first, second)) = type_name_collision(&categories) {
            return Err(DtkError::Build {
                message: format!(
                    "Categories '{}' and '{}' both map to type {} in {}",
                    first,
                    second,
                    first.type_name(),
                    ctx.destination.display()
                ),
                help: Some("Rename one of the categories".to_string()),
            });
        }

        let mut sections = vec![preamble(&categories)];
        sections.extend(ctx.dictionary.all_tokens.iter().map(|token| {
            let declaration = format!("export const {}: {};", token.name, declared_type(token));
            match &token.comment {
                Some(comment) => format!("{}\n{}", jsdoc(comment), declaration),
                None => declaration,
            }
        }));

        Ok(file_header(ctx.options, CommentStyle::Long) + &join_sections(&sections))
    }
}

fn preamble(categories: &[Category]) -> String {
    let union = if categories.is_empty() {
        "never".to_string()
    } else {
        categories
            .iter()
            .map(|c| quote(c.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut lines = vec![
        "type Branded<T, U extends string> = T & { [key in U]: never }".to_string(),
        format!("type TokenType = {}", union),
        "type DesignToken<T extends string> = T extends TokenType ? Branded<string, T | 'designToken'> : never"
            .to_string(),
    ];
    lines.extend(categories.iter().map(|c| {
        format!("export type {} = DesignToken<{}>", c.type_name(), quote(c.as_str()))
    }));

    lines.join("\n")
}

/// Branded type for string tokens with a category, otherwise the value's
/// own TypeScript type.
fn declared_type(token: &Token) -> String {
    match (&token.value, token.category()) {
        (Value::String(_), Some(category)) => Category::new(category).type_name(),
        (value, _) => ts_type(value).render(),
    }
}

/// A single-quoted TypeScript string literal.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// `typescript/esm-declarations`: the type shape of `javascript/esm`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EsmDeclarations;

impl Format for EsmDeclarations {
    fn name(&self) -> &str {
        "typescript/esm-declarations"
    }

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
        let tree = nested_tree(ctx);
        let exports: Vec<String> = tree
            .iter()
            .map(|(key, node)| {
                format!("export const {}: {};", export_name(key), Literal::types(node).render())
            })
            .collect();

        Ok(file_header(ctx.options, CommentStyle::Long) + &join_sections(&exports))
    }
}
