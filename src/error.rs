use miette::Diagnostic;
use thiserror::Error;

/// Main error type for dtk operations
#[derive(Error, Diagnostic, Debug)]
pub enum DtkError {
    #[error("IO error: {0}")]
    #[diagnostic(code(dtk::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(dtk::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(dtk::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Reference error: {message}")]
    #[diagnostic(code(dtk::reference))]
    Reference {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Transform error: {message}")]
    #[diagnostic(code(dtk::transform))]
    Transform {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(dtk::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(dtk::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(dtk::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, DtkError>;
