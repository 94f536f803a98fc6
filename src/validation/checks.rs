//! Validation checks.
//!
//! Each check returns a `ValidationResult`; none of them stop at the first
//! problem.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::build::output_path;
use crate::discovery::{DiscoveryResult, Manifest, TokenSet};
use crate::format::FormatContext;
use crate::registry::Registry;
use crate::transform::transform_tree;
use crate::types::{Dictionary, Token, TokenGroup};

use super::diagnostic::{Diagnostic, ValidationResult};

/// Warn when the source globs matched no files.
pub fn check_sources(discovery: &DiscoveryResult) -> ValidationResult {
    let mut result = ValidationResult::new();

    if discovery.scan.is_empty() {
        result.push(
            Diagnostic::warning(
                "dtk::validate::no-sources",
                format!("No token files match {}", discovery.manifest.source.join(", ")),
            )
            .with_help("Check the `source` globs in dtk.yaml"),
        );
    }

    result
}

/// Warn for every token or group a later file redefined.
pub fn check_collisions(tokens: &TokenSet) -> ValidationResult {
    let mut result = ValidationResult::new();

    for collision in &tokens.collisions {
        let origin = match (&collision.previous, &collision.replacement) {
            (Some(previous), Some(replacement)) => format!(
                " ({} overrides {})",
                replacement.display(),
                previous.display()
            ),
            _ => String::new(),
        };
        result.push(
            Diagnostic::warning(
                "dtk::validate::collision",
                format!("'{}' is defined more than once{}", collision.path, origin),
            )
            .with_help("The definition from the later file wins"),
        );
    }

    result
}

/// Error for every transform, group or format name the registry lacks.
pub fn check_registry_names(manifest: &Manifest, registry: &Registry) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, platform) in &manifest.platforms {
        if let Some(group) = &platform.transform_group {
            match registry.group(group) {
                None => result.push(
                    Diagnostic::error(
                        "dtk::validate::unknown-group",
                        format!("unknown transform group '{}'", group),
                    )
                    .at(name),
                ),
                Some(members) => {
                    for member in members {
                        if registry.transform(member).is_none() {
                            result.push(
                                Diagnostic::error(
                                    "dtk::validate::unknown-transform",
                                    format!(
                                        "transform group '{}' names unknown transform '{}'",
                                        group, member
                                    ),
                                )
                                .at(name),
                            );
                        }
                    }
                }
            }
        }

        for transform in &platform.transforms {
            if registry.transform(transform).is_none() {
                result.push(
                    Diagnostic::error(
                        "dtk::validate::unknown-transform",
                        format!("unknown transform '{}'", transform),
                    )
                    .at(name),
                );
            }
        }

        for file in &platform.files {
            if registry.format(&file.format).is_none() {
                result.push(
                    Diagnostic::error(
                        "dtk::validate::unknown-format",
                        format!(
                            "unknown format '{}' for {}",
                            file.format,
                            file.destination.display()
                        ),
                    )
                    .at(name)
                    .with_help("Run `dtk list` to see registered formats"),
                );
            }
        }
    }

    result
}

/// Warn when two files of the manifest write the same path.
pub fn check_destinations(discovery: &DiscoveryResult) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();

    for (name, platform) in &discovery.manifest.platforms {
        for file in &platform.files {
            let path = output_path(&discovery.root, platform, file);
            match seen.get(&path) {
                Some(first) => result.push(
                    Diagnostic::warning(
                        "dtk::validate::duplicate-destination",
                        format!("{} is also written by platform '{}'", path.display(), first),
                    )
                    .at(name),
                ),
                None => {
                    seen.insert(path, name);
                }
            }
        }
    }

    result
}

/// Transform and render every platform without writing, reporting
/// transform and format failures, duplicate output names and filters that
/// match nothing.
///
/// Platforms with unknown names are skipped; `check_registry_names` reports
/// those.
pub fn check_platforms(
    manifest: &Manifest,
    registry: &Registry,
    resolved: &TokenGroup,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (name, platform) in &manifest.platforms {
        let Ok(chain) =
            registry.resolve_chain(platform.transform_group.as_deref(), &platform.transforms)
        else {
            continue;
        };

        let dictionary = match transform_tree(resolved, &chain) {
            Ok(tree) => Dictionary::new(tree),
            Err(e) => {
                result.push(Diagnostic::error("dtk::validate::transform", e.to_string()).at(name));
                continue;
            }
        };

        result.merge(check_output_names(name, &dictionary));

        for file in &platform.files {
            let Some(format) = registry.format(&file.format) else {
                continue;
            };

            let filtered;
            let dictionary = if file.filter.is_some() {
                filtered = dictionary.filtered(&|token: &Token| file.accepts(token));
                if filtered.is_empty() {
                    result.push(
                        Diagnostic::warning(
                            "dtk::validate::empty-filter",
                            format!("filter for {} matches no tokens", file.destination.display()),
                        )
                        .at(name),
                    );
                }
                &filtered
            } else {
                &dictionary
            };

            let options = platform.file_options(file);
            if let Err(e) = format.format(&FormatContext {
                dictionary,
                options: &options,
                destination: &file.destination,
            }) {
                result.push(Diagnostic::error("dtk::validate::format", e.to_string()).at(name));
            }
        }
    }

    result
}

/// Warn when a platform's name transform gives two tokens the same name.
pub fn check_output_names(platform: &str, dictionary: &Dictionary) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: HashMap<&str, &Token> = HashMap::new();

    for token in &dictionary.all_tokens {
        match seen.get(token.name.as_str()) {
            Some(first) => result.push(
                Diagnostic::warning(
                    "dtk::validate::duplicate-name",
                    format!(
                        "'{}' and '{}' are both named '{}'",
                        first.dotted_path(),
                        token.dotted_path(),
                        token.name
                    ),
                )
                .at(platform)
                .with_help("Only one of them will be usable in the output"),
            ),
            None => {
                seen.insert(token.name.as_str(), token);
            }
        }
    }

    result
}
