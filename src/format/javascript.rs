//! JavaScript module formats.

use crate::error::Result;
use crate::types::TokenGroup;

use super::literal::Literal;
use super::{export_name, file_header, join_sections, jsdoc, CommentStyle, Format, FormatContext};

/// `javascript/es6-jsdoc`: one flat `export const` per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Es6Jsdoc;

impl Format for Es6Jsdoc {
    fn name(&self) -> &str {
        "javascript/es6-jsdoc"
    }

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
        let statements: Vec<String> = ctx
            .dictionary
            .all_tokens
            .iter()
            .map(|token| {
                let export = format!("export const {} = {};", token.name, token.value);
                match &token.comment {
                    Some(comment) => format!("{}\n{}", jsdoc(comment), export),
                    None => export,
                }
            })
            .collect();

        Ok(file_header(ctx.options, CommentStyle::Long) + &join_sections(&statements))
    }
}

/// `javascript/esm`: one nested object export per top-level key.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavascriptEsm;

impl Format for JavascriptEsm {
    fn name(&self) -> &str {
        "javascript/esm"
    }

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
        let tree = nested_tree(ctx);
        let exports: Vec<String> = tree
            .iter()
            .map(|(key, node)| {
                format!("export const {} = {};", export_name(key), Literal::values(node).render())
            })
            .collect();

        Ok(file_header(ctx.options, CommentStyle::Long) + &join_sections(&exports))
    }
}

/// The dictionary tree, wrapped under the `prefix` option when set.
pub(super) fn nested_tree(ctx: &FormatContext<'_>) -> TokenGroup {
    let tree = ctx.dictionary.tokens.clone();
    match &ctx.options.prefix {
        Some(prefix) => tree.wrap(prefix.clone()),
        None => tree,
    }
}
