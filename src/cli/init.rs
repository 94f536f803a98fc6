//! Init command implementation.
//!
//! Generates a `dtk.yaml` manifest with the default platforms, pointing
//! `source` at the directories that already hold YAML files. An empty
//! project also gets a starter token file.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{scan_pattern, Manifest, MANIFEST_FILENAME};
use crate::error::{DtkError, Result};
use crate::output::{display_path, plural, Printer};

/// Starter tokens written when the project has none.
const STARTER_TOKENS: &str = r##"color:
  brand:
    primary:
      value: "#0a66c2"
      comment: Primary brand colour
size:
  spacing:
    small: { value: 0.5 }
    medium: { value: 1 }
time:
  transition:
    fast: { value: 150 }
"##;

/// Path of the starter token file, relative to the project root.
const STARTER_PATH: &str = "src/tokens.yaml";

/// Initialize a dtk project by generating a dtk.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing dtk.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(DtkError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let sources = source_globs(&args.path);

    let mut manifest = Manifest::default();
    if sources.is_empty() {
        write_file(&args.path.join(STARTER_PATH), STARTER_TOKENS)?;
        printer.status("Created", STARTER_PATH);
    } else {
        manifest.source = sources;
        printer.info("Discovered", &manifest.source.join(", "));
    }

    write_file(&manifest_path, &manifest.to_yaml()?)?;
    printer.success(
        "Created",
        &format!(
            "{} ({})",
            MANIFEST_FILENAME,
            plural(manifest.platforms.len(), "platform", "platforms")
        ),
    );

    Ok(())
}

/// One glob per top-level directory holding YAML files.
fn source_globs(root: &Path) -> Vec<String> {
    let scan_manifest = Manifest {
        excludes: vec![
            MANIFEST_FILENAME.to_string(),
            "dist".to_string(),
            "node_modules".to_string(),
            ".*".to_string(),
        ],
        ..Manifest::default()
    };

    let mut globs = BTreeSet::new();
    for pattern in ["**/*.yaml", "**/*.yml"] {
        let extension = &pattern[3..];
        for file in scan_pattern(root, pattern, &scan_manifest).files {
            let Ok(relative) = file.strip_prefix(root) else {
                continue;
            };
            let mut components = relative.components();
            let first = components.next();
            let glob = match (first, components.next()) {
                (Some(dir), Some(_)) => {
                    format!("{}/**/{}", dir.as_os_str().to_string_lossy(), extension)
                }
                _ => extension.to_string(),
            };
            globs.insert(glob);
        }
    }

    globs.into_iter().collect()
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DtkError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create directory: {}", e),
        })?;
    }
    fs::write(path, contents).map_err(|e| DtkError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_token_file;
    use tempfile::tempdir;

    fn init(path: &Path, force: bool) -> Result<()> {
        let args = InitArgs {
            path: path.to_path_buf(),
            force,
        };
        run(args, &Printer::new().quiet(true))
    }

    #[test]
    fn test_init_empty_directory_writes_starter() {
        let dir = tempdir().unwrap();

        init(dir.path(), false).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(manifest, Manifest::default());

        let starter = fs::read_to_string(dir.path().join(STARTER_PATH)).unwrap();
        let tokens = parse_token_file(&starter, None).unwrap();
        assert_eq!(tokens.token_count(), 4);
    }

    #[test]
    fn test_init_discovers_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tokens/color")).unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("tokens/color/base.yaml"), "").unwrap();
        fs::write(dir.path().join("tokens/size.yml"), "").unwrap();
        fs::write(dir.path().join("dist/ignored.yaml"), "").unwrap();
        fs::write(dir.path().join("root.yaml"), "").unwrap();

        init(dir.path(), false).unwrap();

        let manifest = Manifest::load(&dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert_eq!(
            manifest.source,
            vec!["*.yaml", "tokens/**/*.yaml", "tokens/**/*.yml"]
        );
        assert!(!dir.path().join(STARTER_PATH).exists());
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "source: []").unwrap();

        assert!(init(dir.path(), false).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "source: []").unwrap();

        init(dir.path(), true).unwrap();

        let content = fs::read_to_string(dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(content.contains("transform_group: scss"));
    }
}
