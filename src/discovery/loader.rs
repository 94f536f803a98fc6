//! Token loader - parses discovered files into one merged tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DtkError, Result};
use crate::parser::parse_token_file;
use crate::types::{Collision, TokenGroup};

use super::scanner::ScanResult;

/// The merged token tree of a project.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    /// All files deep-merged in scan order.
    pub tree: TokenGroup,
    /// Nodes a later file redefined.
    pub collisions: Vec<Collision>,
    /// Files that were loaded.
    pub files: Vec<PathBuf>,
}

/// Load and merge every scanned file.
///
/// All files are parsed before failing, so one run reports every broken
/// file.
pub fn load_tokens(scan: &ScanResult) -> Result<TokenSet> {
    let mut set = TokenSet::default();
    let mut errors: Vec<String> = Vec::new();

    for path in &scan.files {
        match load_file(path) {
            Ok(tree) => {
                set.tree.merge(tree, &mut set.collisions);
                set.files.push(path.clone());
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    if !errors.is_empty() {
        return Err(DtkError::Parse {
            message: format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ),
            help: Some("Fix the errors above and try again".to_string()),
        });
    }

    Ok(set)
}

/// Read and parse one token file.
pub fn load_file(path: &Path) -> Result<TokenGroup> {
    let content = fs::read_to_string(path).map_err(|e| DtkError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_token_file(&content, Some(path))
}
