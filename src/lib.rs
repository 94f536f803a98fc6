//! dtk - Design token build pipeline
//!
//! Loads design tokens from YAML files, resolves `{path}` references,
//! runs each platform's transform chain and renders SCSS, CSS, JavaScript
//! and TypeScript outputs.

pub mod build;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod format;
pub mod output;
pub mod parser;
pub mod registry;
pub mod resolve;
pub mod transform;
pub mod types;
pub mod validation;

pub use build::{compile, compile_project, write_artifacts, Artifact};
pub use discovery::{discover, discover_with_manifest, DiscoveryResult, Manifest, Platform, ScanResult};
pub use error::{DtkError, Result};
pub use format::{Format, FormatContext, FormatOptions};
pub use parser::parse_token_file;
pub use registry::Registry;
pub use resolve::resolve_references;
pub use transform::{transform_tree, Transform, TransformOutput};
pub use types::{Attributes, Category, Dictionary, Token, TokenGroup, TokenNode};
pub use validation::{validate_project, Diagnostic, Severity, ValidationResult};
