//! Stylesheet variable formats.

use crate::error::Result;
use crate::resolve::value_to_string;
use crate::types::Token;

use super::{file_header, CommentStyle, Format, FormatContext};

/// `scss/variables`: one `$name: value;` line per token.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssVariables;

impl Format for ScssVariables {
    fn name(&self) -> &str {
        "scss/variables"
    }

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
        let mut out = file_header(ctx.options, CommentStyle::Short);
        for token in &ctx.dictionary.all_tokens {
            out.push_str(&format!("${}: {};", token.name, value_to_string(&token.value)));
            if let Some(comment) = single_line_comment(token) {
                out.push_str(&format!(" // {}", comment));
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// `css/variables`: custom properties on `:root`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssVariables;

impl Format for CssVariables {
    fn name(&self) -> &str {
        "css/variables"
    }

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String> {
        let mut out = file_header(ctx.options, CommentStyle::Long);
        out.push_str(":root {\n");
        for token in &ctx.dictionary.all_tokens {
            out.push_str(&format!("  --{}: {};", token.name, value_to_string(&token.value)));
            if let Some(comment) = single_line_comment(token) {
                out.push_str(&format!(" /* {} */", comment.replace("*/", "* /")));
            }
            out.push('\n');
        }
        out.push_str("}\n");
        Ok(out)
    }
}

/// The token comment collapsed onto one line.
fn single_line_comment(token: &Token) -> Option<String> {
    token
        .comment
        .as_deref()
        .map(|c| c.lines().map(str::trim).collect::<Vec<_>>().join(" "))
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use crate::types::{Dictionary, TokenGroup, TokenNode};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    fn dictionary() -> Dictionary {
        let mut root = TokenGroup::new();
        let mut red = Token::new(vec!["color".into(), "red".into()], json!("#ff0000"))
            .with_comment("Brand red");
        red.name = "color-red".to_string();
        let mut small = Token::new(vec!["size".into(), "small".into()], json!("0.25rem"));
        small.name = "size-small".to_string();
        root.insert("red", TokenNode::Token(red));
        root.insert("small", TokenNode::Token(small));
        Dictionary::new(root)
    }

    fn render(format: &dyn Format, show_file_header: bool) -> String {
        let dictionary = dictionary();
        let options = FormatOptions {
            show_file_header,
            prefix: None,
        };
        format
            .format(&FormatContext {
                dictionary: &dictionary,
                options: &options,
                destination: Path::new("out"),
            })
            .unwrap()
    }

    #[test]
    fn test_scss_variables() {
        assert_eq!(
            render(&ScssVariables, true),
            "// Do not edit directly, this file was auto-generated.\n\n\
             $color-red: #ff0000; // Brand red\n\
             $size-small: 0.25rem;\n"
        );
    }

    #[test]
    fn test_css_variables() {
        assert_eq!(
            render(&CssVariables, false),
            ":root {\n  --color-red: #ff0000; /* Brand red */\n  --size-small: 0.25rem;\n}\n"
        );
    }

    #[test]
    fn test_multiline_comment_collapses() {
        let mut token = Token::new(vec!["a".into()], json!(1));
        token.comment = Some("first\n  second".to_string());
        assert_eq!(single_line_comment(&token).as_deref(), Some("first second"));
    }
}
