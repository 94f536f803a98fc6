pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod validate;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::discovery::{discover, discover_with_manifest, DiscoveryResult};
use crate::error::{DtkError, Result};

/// dtk - Design token build pipeline
#[derive(Parser, Debug)]
#[command(name = "dtk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build SCSS, CSS, JavaScript and TypeScript outputs from token files
    Build(build::BuildArgs),

    /// Check tokens and the manifest without writing outputs
    Validate(validate::ValidateArgs),

    /// List tokens, platforms, transforms and formats
    List(list::ListArgs),

    /// Initialize a dtk project (generates dtk.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Discover the project for a command: an explicit manifest when given,
/// otherwise the current directory.
pub(crate) fn load_project(config: Option<&Path>) -> Result<DiscoveryResult> {
    match config {
        Some(path) if !path.exists() => Err(DtkError::Config {
            message: format!("Manifest not found: {}", path.display()),
            help: Some("Run `dtk init` to create one".to_string()),
        }),
        Some(path) => discover_with_manifest(path),
        None => discover("."),
    }
}
