//! Output formats.
//!
//! A format turns a transformed `Dictionary` into the text of one output
//! file. Formats are pure: the same dictionary and options always produce
//! the same bytes (the file header carries no timestamp).
//!
//! | name | output |
//! |---|---|
//! | `scss/variables` | `$name: value;` |
//! | `css/variables` | `:root { --name: value; }` |
//! | `javascript/es6-jsdoc` | `export const Name = value;` |
//! | `javascript/esm` | one nested object export per category |
//! | `typescript/es6-declarations-branded` | flat declarations with branded types |
//! | `typescript/esm-declarations` | nested type-shape declarations |

mod css;
mod javascript;
pub mod literal;
mod typescript;

use std::path::Path;

use heck::ToUpperCamelCase;

use crate::error::Result;
use crate::types::Dictionary;

pub use css::{CssVariables, ScssVariables};
pub use javascript::{Es6Jsdoc, JavascriptEsm};
pub use literal::Literal;
pub use typescript::{BrandedDeclarations, EsmDeclarations};

/// Text of the generated-file header.
pub const HEADER_MESSAGE: &str = "Do not edit directly, this file was auto-generated.";

/// Effective options for one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub show_file_header: bool,
    /// Wrap the nested tree under this key (nested formats only).
    pub prefix: Option<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_file_header: true,
            prefix: None,
        }
    }
}

/// Everything a format sees for one output file.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    pub dictionary: &'a Dictionary,
    pub options: &'a FormatOptions,
    /// Destination relative to the platform build path.
    pub destination: &'a Path,
}

/// A named output format.
pub trait Format: Send + Sync {
    /// Registry name, e.g. `scss/variables`.
    fn name(&self) -> &str;

    fn format(&self, ctx: &FormatContext<'_>) -> Result<String>;
}

/// All builtin formats.
pub fn builtin_formats() -> Vec<Box<dyn Format>> {
    vec![
        Box::new(ScssVariables),
        Box::new(CssVariables),
        Box::new(Es6Jsdoc),
        Box::new(JavascriptEsm),
        Box::new(BrandedDeclarations),
        Box::new(EsmDeclarations),
    ]
}

/// Comment syntax used for the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...`
    Short,
    /// `/** ... */`
    Long,
}

/// The generated-file header followed by a blank line, or nothing when
/// headers are disabled.
pub fn file_header(options: &FormatOptions, style: CommentStyle) -> String {
    if !options.show_file_header {
        return String::new();
    }
    match style {
        CommentStyle::Short => format!("// {}\n\n", HEADER_MESSAGE),
        CommentStyle::Long => format!("/**\n * {}\n */\n\n", HEADER_MESSAGE),
    }
}

/// A JSDoc block for `comment`: one line when possible.
pub(crate) fn jsdoc(comment: &str) -> String {
    let comment = comment.replace("*/", "*\\/");
    let lines: Vec<&str> = comment.lines().collect();

    match lines.as_slice() {
        [] => "/** */".to_string(),
        [line] => format!("/** {} */", line),
        lines => {
            let mut out = String::from("/**\n");
            for line in lines {
                if line.is_empty() {
                    out.push_str(" *\n");
                } else {
                    out.push_str(" * ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push_str(" */");
            out
        }
    }
}

/// Exported identifier for a top-level key: `color` → `Color`.
pub(crate) fn export_name(key: &str) -> String {
    let name = key.to_upper_camel_case();
    if name.starts_with(|c: char| c.is_ascii_digit()) || name.is_empty() {
        format!("_{}", name)
    } else {
        name
    }
}

/// Join sections with blank lines and end with a newline.
pub(crate) fn join_sections(sections: &[String]) -> String {
    if sections.is_empty() {
        return String::new();
    }
    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}
