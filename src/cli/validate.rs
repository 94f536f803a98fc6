//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::registry::Registry;
use crate::validation::{print_diagnostics, validate_project};

use super::load_project;

/// Check tokens and the manifest without writing outputs
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifest file (default: ./dtk.yaml, or the built-in manifest)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let discovery = load_project(args.config.as_deref())?;
    let source = discovery
        .manifest_path
        .as_deref()
        .map(display_path)
        .unwrap_or_else(|| "built-in manifest".to_string());
    printer.status(
        "Checking",
        &format!(
            "{} ({})",
            plural(discovery.scan.total(), "token file", "token files"),
            source
        ),
    );

    let tokens = discovery.load()?;
    let result = validate_project(&discovery, &tokens, &Registry::with_builtins());
    print_diagnostics(&result, printer);

    result.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run_with(manifest: &str, tokens: &str) -> Result<()> {
        let dir = tempdir().unwrap();
        let config = dir.path().join("dtk.yaml");
        fs::write(&config, manifest).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/tokens.yaml"), tokens).unwrap();

        run(
            ValidateArgs {
                config: Some(config),
            },
            &Printer::new().quiet(true),
        )
    }

    #[test]
    fn test_validate_passes_on_default_manifest() {
        let tokens = "color:\n  red: { value: '#f00' }\n";
        // Empty manifest falls back to the default platforms
        assert!(run_with("", tokens).is_ok());
    }

    #[test]
    fn test_validate_fails_on_unknown_format() {
        let manifest = "platforms:\n  web:\n    files:\n      - { destination: a.txt, format: text/plain }\n";
        let err = run_with(manifest, "a: { value: 1 }\n").unwrap_err();
        assert!(err.to_string().contains("1 error(s)"));
    }

    #[test]
    fn test_missing_config() {
        let err = run(
            ValidateArgs {
                config: Some(PathBuf::from("/nonexistent/dtk.yaml")),
            },
            &Printer::new().quiet(true),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Manifest not found"));
    }
}
