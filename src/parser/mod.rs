//! Parser for dtk token files.
//!
//! Token sources are plain YAML. Each file parses into a `TokenGroup`; the
//! loader merges the per-file trees into one.
//!
//! # Usage
//!
//! ```ignore
//! use dtk::parser::parse_token_file;
//!
//! let source = std::fs::read_to_string("src/color.yaml")?;
//! let tree = parse_token_file(&source, None)?;
//!
//! for token in tree.tokens() {
//!     println!("{} = {}", token.dotted_path(), token.value);
//! }
//! ```

mod tokens;

pub use tokens::{parse_token_file, VALUE_KEY};
