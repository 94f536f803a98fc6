//! List command implementation.
//!
//! Prints tokens as tab-separated lines on stdout so the output can be piped
//! into `grep`, `cut` or `sort`. Status lines still go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{DtkError, Result};
use crate::output::{plural, Printer};
use crate::registry::Registry;
use crate::resolve::{resolve_references, value_to_string};
use crate::transform::transform_tree;
use crate::types::{Token, TokenGroup};

use super::load_project;

/// List tokens, optionally as a platform would see them
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Manifest file (default: ./dtk.yaml, or the built-in manifest)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Show names and values after this platform's transforms
    #[arg(long, short)]
    pub platform: Option<String>,

    /// Only list tokens of this category
    #[arg(long)]
    pub category: Option<String>,

    /// List registered transforms, transform groups and formats instead
    #[arg(long, conflicts_with_all = ["platform", "category"])]
    pub registry: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let registry = Registry::with_builtins();
    let mut stdout = io::stdout().lock();

    if args.registry {
        return write_registry(&mut stdout, &registry).map_err(DtkError::from);
    }

    let discovery = load_project(args.config.as_deref())?;
    let tokens = discovery.load()?;
    let resolved = resolve_references(&tokens.tree)?;

    let listed = match &args.platform {
        Some(name) => {
            let platform = discovery.manifest.platform(name).ok_or_else(|| DtkError::Config {
                message: format!("Unknown platform '{}'", name),
                help: Some(format!(
                    "Platforms in the manifest: {}",
                    discovery
                        .manifest
                        .platforms
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            })?;
            let chain =
                registry.resolve_chain(platform.transform_group.as_deref(), &platform.transforms)?;
            let transformed = transform_tree(&resolved, &chain)?;
            write_tokens(&mut stdout, &transformed, args.category.as_deref(), true)?
        }
        None => write_tokens(&mut stdout, &resolved, args.category.as_deref(), false)?,
    };

    printer.status("Listed", &plural(listed, "token", "tokens"));
    Ok(())
}

/// Category used by `--category`: the attribute when a transform set it,
/// otherwise the first path segment.
fn category_of(token: &Token) -> &str {
    token
        .category()
        .or_else(|| token.path.first().map(String::as_str))
        .unwrap_or_default()
}

/// One line per token: `path<TAB>value`, or `path<TAB>name<TAB>value` with
/// `with_names`. Returns the number of lines written.
fn write_tokens(
    out: &mut impl Write,
    tree: &TokenGroup,
    category: Option<&str>,
    with_names: bool,
) -> Result<usize> {
    let mut count = 0;
    for token in tree.tokens() {
        if category.is_some_and(|c| c != category_of(token)) {
            continue;
        }
        let value = value_to_string(&token.value);
        if with_names {
            writeln!(out, "{}\t{}\t{}", token.dotted_path(), token.name, value)?;
        } else {
            writeln!(out, "{}\t{}", token.dotted_path(), value)?;
        }
        count += 1;
    }
    Ok(count)
}

fn write_registry(out: &mut impl Write, registry: &Registry) -> io::Result<()> {
    for name in registry.transform_names() {
        writeln!(out, "transform\t{}", name)?;
    }
    for name in registry.group_names() {
        let members = registry.group(name).unwrap_or_default();
        writeln!(out, "group\t{}\t{}", name, members.join(","))?;
    }
    for name in registry.format_names() {
        writeln!(out, "format\t{}", name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_token_file;
    use pretty_assertions::assert_eq;

    const TOKENS: &str = r##"
color:
  brand:
    primary: { value: "#ff0000" }
    accent: { value: "{color.brand.primary}" }
size:
  padding:
    small: { value: 0.5 }
"##;

    fn listing(tree: &TokenGroup, category: Option<&str>, with_names: bool) -> (String, usize) {
        let mut out = Vec::new();
        let count = write_tokens(&mut out, tree, category, with_names).unwrap();
        (String::from_utf8(out).unwrap(), count)
    }

    #[test]
    fn test_list_resolved_tokens() {
        let tree = resolve_references(&parse_token_file(TOKENS, None).unwrap()).unwrap();
        let (out, count) = listing(&tree, None, false);

        assert_eq!(count, 3);
        assert_eq!(
            out,
            "color.brand.primary\t#ff0000\n\
             color.brand.accent\t#ff0000\n\
             size.padding.small\t0.5\n"
        );
    }

    #[test]
    fn test_list_by_category() {
        let tree = resolve_references(&parse_token_file(TOKENS, None).unwrap()).unwrap();
        let (out, count) = listing(&tree, Some("size"), false);

        assert_eq!(count, 1);
        assert_eq!(out, "size.padding.small\t0.5\n");
    }

    #[test]
    fn test_list_after_platform_transforms() {
        let registry = Registry::with_builtins();
        let tree = resolve_references(&parse_token_file(TOKENS, None).unwrap()).unwrap();
        let chain = registry.resolve_chain(Some("css"), &[]).unwrap();
        let transformed = transform_tree(&tree, &chain).unwrap();

        let (out, _) = listing(&transformed, Some("size"), true);
        assert_eq!(out, "size.padding.small\tsize-padding-small\t0.5rem\n");
    }

    #[test]
    fn test_list_registry() {
        let mut out = Vec::new();
        write_registry(&mut out, &Registry::with_builtins()).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("transform\tname/cti/kebab\n"));
        assert!(out.contains("format\tscss/variables\n"));
        assert!(out.lines().any(|l| l.starts_with("group\tcss\t")));
    }
}
