//! File discovery and token loading for dtk projects.
//!
//! Finds the `dtk.yaml` manifest (falling back to the built-in default),
//! scans the source globs and loads the matching files into one tree.
//!
//! # Example
//!
//! ```ignore
//! use dtk::discovery::discover;
//!
//! let result = discover("./my-project")?;
//! println!("Found {} token files", result.scan.total());
//!
//! let tokens = result.load()?;
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use loader::{load_file, load_tokens, TokenSet};
pub use manifest::{FileConfig, Manifest, OptionsConfig, Platform};
pub use scanner::{glob_match, scan_pattern, scan_sources, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "dtk.yaml";

/// Result of discovering token files in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no dtk.yaml was found).
    pub manifest: Manifest,

    /// Path of the manifest file, when one was found.
    pub manifest_path: Option<PathBuf>,

    /// Scan results with discovered files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Whether a dtk.yaml manifest was found.
    pub fn has_manifest(&self) -> bool {
        self.manifest_path.is_some()
    }

    /// Load and merge all discovered token files.
    pub fn load(&self) -> Result<TokenSet> {
        load_tokens(&self.scan)
    }
}

/// Discover token files in a project directory.
///
/// Looks for a `dtk.yaml` manifest in the root directory and scans its
/// source globs. Without a manifest the default manifest is used.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let manifest_path = root.join(MANIFEST_FILENAME);
    if manifest_path.exists() {
        discover_with_manifest(&manifest_path)
    } else {
        let manifest = Manifest::default();
        let scan = scan_sources(&root, &manifest);
        Ok(DiscoveryResult {
            root,
            manifest,
            manifest_path: None,
            scan,
        })
    }
}

/// Discover using an explicit manifest file. Its directory is the project
/// root.
pub fn discover_with_manifest(path: &Path) -> Result<DiscoveryResult> {
    let manifest = Manifest::load(path)?;
    let root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let scan = scan_sources(&root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        manifest_path: Some(path.to_path_buf()),
        scan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest());
        assert!(result.scan.is_empty());
        assert_eq!(result.manifest, Manifest::default());
    }

    #[test]
    fn test_discover_without_manifest() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/color.yaml"), "color:\n  red: { value: '#f00' }\n").unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest());
        assert_eq!(result.scan.total(), 1);
        assert_eq!(result.load().unwrap().tree.token_count(), 1);
    }

    #[test]
    fn test_discover_with_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("dtk.yaml"),
            r#"
source:
  - tokens/*.yaml
platforms:
  scss:
    transform_group: scss
    files:
      - destination: _tokens.scss
        format: scss/variables
"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("tokens")).unwrap();
        fs::write(dir.path().join("tokens/size.yaml"), "size:\n  small: { value: 4 }\n").unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(result.has_manifest());
        assert_eq!(result.manifest.platforms.len(), 1);
        assert_eq!(result.scan.total(), 1);
    }

    #[test]
    fn test_discover_with_explicit_manifest_path() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("design")).unwrap();
        let manifest = dir.path().join("design/tokens.yaml");
        fs::write(&manifest, "source: ['*.yml']\n").unwrap();
        fs::write(dir.path().join("design/a.yml"), "a: { value: 1 }\n").unwrap();

        let result = discover_with_manifest(&manifest).unwrap();

        assert_eq!(result.root, dir.path().join("design"));
        assert_eq!(result.scan.total(), 1);
    }
}
