//! Build orchestration.
//!
//! A build resolves references once, then for every platform (in manifest
//! order) runs the platform's transform chain over its own copy of the tree
//! and renders each of its files. Rendering and writing are separate steps:
//! every artifact is rendered before anything touches the disk, so a failing
//! platform leaves previous outputs intact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::{DiscoveryResult, FileConfig, Manifest, Platform};
use crate::error::{DtkError, Result};
use crate::format::FormatContext;
use crate::registry::Registry;
use crate::resolve::resolve_references;
use crate::transform::transform_tree;
use crate::types::{Dictionary, Token, TokenGroup};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Platform that produced the file.
    pub platform: String,
    /// Format name used.
    pub format: String,
    /// Output path (project root joined with build path and destination).
    pub path: PathBuf,
    /// Number of tokens that reached the formatter.
    pub token_count: usize,
    pub contents: String,
}

/// Load, resolve and render every selected platform of a discovered project.
pub fn compile_project(
    discovery: &DiscoveryResult,
    registry: &Registry,
    only: &[String],
) -> Result<Vec<Artifact>> {
    let tokens = discovery.load()?;
    compile(&tokens.tree, &discovery.manifest, registry, &discovery.root, only)
}

/// Resolve references in `tree` and render the selected platforms.
///
/// An empty `only` selects every platform.
pub fn compile(
    tree: &TokenGroup,
    manifest: &Manifest,
    registry: &Registry,
    root: &Path,
    only: &[String],
) -> Result<Vec<Artifact>> {
    for name in only {
        if manifest.platform(name).is_none() {
            return Err(DtkError::Config {
                message: format!("Unknown platform '{}'", name),
                help: Some(format!(
                    "Platforms in the manifest: {}",
                    manifest.platforms.keys().cloned().collect::<Vec<_>>().join(", ")
                )),
            });
        }
    }

    let resolved = resolve_references(tree)?;

    let mut artifacts = Vec::new();
    for (name, platform) in &manifest.platforms {
        if !only.is_empty() && !only.contains(name) {
            continue;
        }
        artifacts.extend(compile_platform(name, platform, &resolved, registry, root)?);
    }

    Ok(artifacts)
}

/// Render every file of one platform from an already resolved tree.
pub fn compile_platform(
    name: &str,
    platform: &Platform,
    resolved: &TokenGroup,
    registry: &Registry,
    root: &Path,
) -> Result<Vec<Artifact>> {
    let chain = registry.resolve_chain(platform.transform_group.as_deref(), &platform.transforms)?;
    let dictionary = Dictionary::new(transform_tree(resolved, &chain)?);

    platform
        .files
        .iter()
        .map(|file| {
            let format = registry.require_format(&file.format)?;
            let filtered;
            let dictionary = if file.filter.is_some() {
                filtered = dictionary.filtered(&|token: &Token| file.accepts(token));
                &filtered
            } else {
                &dictionary
            };

            let options = platform.file_options(file);
            let contents = format.format(&FormatContext {
                dictionary,
                options: &options,
                destination: &file.destination,
            })?;

            Ok(Artifact {
                platform: name.to_string(),
                format: file.format.clone(),
                path: output_path(root, platform, file),
                token_count: dictionary.len(),
                contents,
            })
        })
        .collect()
}

/// Where a platform file is written.
pub fn output_path(root: &Path, platform: &Platform, file: &FileConfig) -> PathBuf {
    root.join(&platform.build_path).join(&file.destination)
}

/// Write artifacts, creating parent directories as needed.
pub fn write_artifacts(artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent).map_err(|e| DtkError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
        fs::write(&artifact.path, &artifact.contents).map_err(|e| DtkError::Io {
            path: artifact.path.clone(),
            message: format!("Failed to write output: {}", e),
        })?;
    }
    Ok(())
}

/// Artifacts whose file on disk is missing or differs.
pub fn stale_artifacts(artifacts: &[Artifact]) -> Vec<&Artifact> {
    artifacts
        .iter()
        .filter(|a| fs::read_to_string(&a.path).map_or(true, |current| current != a.contents))
        .collect()
}
