//! Validation of a dtk project.
//!
//! Runs every check against the discovered project and its loaded tokens
//! and reports errors and warnings. Used by `dtk validate`.

mod checks;
mod diagnostic;

pub use checks::{
    check_collisions, check_destinations, check_output_names, check_platforms,
    check_registry_names, check_sources,
};
pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::discovery::{DiscoveryResult, TokenSet};
use crate::output::{plural, Printer};
use crate::registry::Registry;
use crate::resolve::resolve_references;

/// Run all checks.
pub fn validate_project(
    discovery: &DiscoveryResult,
    tokens: &TokenSet,
    registry: &Registry,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(check_sources(discovery));
    result.merge(check_collisions(tokens));
    result.merge(check_registry_names(&discovery.manifest, registry));
    result.merge(check_destinations(discovery));

    match resolve_references(&tokens.tree) {
        Ok(resolved) => result.merge(check_platforms(&discovery.manifest, registry, &resolved)),
        Err(e) => result.push(Diagnostic::error("dtk::validate::reference", e.to_string())),
    }

    result
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        printer.diagnostic(d);
    }

    let errors = plural(result.error_count(), "error", "errors");
    let warnings = plural(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.error("Failed", &format!("{}, {}", errors, warnings));
    } else {
        printer.success("Validated", &format!("no errors, {}", warnings));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::discover;
    use std::fs;
    use tempfile::tempdir;

    fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for (path, contents) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        dir
    }

    fn validate(dir: &tempfile::TempDir) -> ValidationResult {
        let discovery = discover(dir.path()).unwrap();
        let tokens = discovery.load().unwrap();
        validate_project(&discovery, &tokens, &Registry::with_builtins())
    }

    #[test]
    fn test_valid_project() {
        let dir = project(&[("src/color.yaml", "color:\n  red: { value: '#f00' }\n")]);
        assert!(validate(&dir).is_ok());
    }

    #[test]
    fn test_collision_across_files() {
        let dir = project(&[
            ("src/a.yaml", "color:\n  red: { value: '#f00' }\n"),
            ("src/b.yaml", "color:\n  red: { value: '#e00' }\n"),
        ]);
        let result = validate(&dir);

        assert!(!result.has_errors());
        assert_eq!(result.with_code("dtk::validate::collision").count(), 1);
    }

    #[test]
    fn test_reference_errors() {
        let dir = project(&[(
            "src/a.yaml",
            "a: { value: '{b}' }\nb: { value: '{a}' }\n",
        )]);
        let result = validate(&dir);

        assert_eq!(result.error_count(), 1);
        let error = result.with_code("dtk::validate::reference").next().unwrap();
        assert!(error.message.contains("a -> b -> a") || error.message.contains("b -> a -> b"));
    }
}
