//! Project manifest (dtk.yaml) parsing.
//!
//! The manifest names the token source globs and the platforms to build.
//! Platforms are kept in declaration order, which is also build order.
//! Keys are snake_case; the camelCase spellings (`transformGroup`,
//! `buildPath`, `showFileHeader`) are accepted as aliases.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DtkError, Result};
use crate::format::FormatOptions;
use crate::types::Token;

use super::scanner::glob_match;

/// Project manifest loaded from dtk.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Glob patterns, relative to the project root, selecting token files.
    pub source: Vec<String>,

    /// Patterns to exclude from discovery.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,

    /// Platforms to build, in order.
    pub platforms: IndexMap<String, Platform>,
}

/// One build target: a transform chain and the files it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    /// Named transform group applied first.
    #[serde(alias = "transformGroup", skip_serializing_if = "Option::is_none")]
    pub transform_group: Option<String>,

    /// Extra transforms applied after the group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<String>,

    /// Output directory, relative to the project root.
    #[serde(alias = "buildPath")]
    pub build_path: PathBuf,

    pub files: Vec<FileConfig>,

    /// Options shared by every file of the platform.
    #[serde(skip_serializing_if = "OptionsConfig::is_empty")]
    pub options: OptionsConfig,
}

/// One output file of a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Path relative to the platform's build path.
    pub destination: PathBuf,

    /// Registered format name.
    pub format: String,

    /// Attribute values a token must carry to reach this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, String>>,

    /// Overrides for the platform options.
    #[serde(default, skip_serializing_if = "OptionsConfig::is_empty")]
    pub options: OptionsConfig,
}

/// Format options as written in the manifest; unset keys inherit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    #[serde(alias = "showFileHeader", skip_serializing_if = "Option::is_none")]
    pub show_file_header: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

fn default_source() -> Vec<String> {
    vec!["src/**/*.yaml".to_string()]
}

fn default_build_path() -> PathBuf {
    PathBuf::from("dist/")
}

impl Default for Manifest {
    fn default() -> Self {
        let platform = |group: &str, files: &[(&str, &str)]| Platform {
            transform_group: Some(group.to_string()),
            files: files
                .iter()
                .map(|&(destination, format)| FileConfig::new(destination, format))
                .collect(),
            options: OptionsConfig {
                show_file_header: Some(false),
                prefix: None,
            },
            ..Platform::default()
        };

        let mut platforms = IndexMap::new();
        platforms.insert(
            "scss".to_string(),
            platform("scss", &[("_tokens.scss", "scss/variables")]),
        );
        platforms.insert(
            "css".to_string(),
            platform("css", &[("tokens.css", "css/variables")]),
        );
        platforms.insert(
            "js".to_string(),
            platform(
                "js",
                &[
                    ("tokens.js", "javascript/es6-jsdoc"),
                    ("tokens.d.ts", "typescript/es6-declarations-branded"),
                ],
            ),
        );
        platforms.insert(
            "js-module".to_string(),
            platform(
                "js",
                &[
                    ("tokens.module.js", "javascript/esm"),
                    ("tokens.module.d.ts", "typescript/esm-declarations"),
                ],
            ),
        );

        Self {
            source: default_source(),
            excludes: vec![],
            platforms,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            transform_group: None,
            transforms: vec![],
            build_path: default_build_path(),
            files: vec![],
            options: OptionsConfig::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a dtk.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DtkError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string. An empty document is the default
    /// manifest.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| DtkError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check dtk.yaml syntax".to_string()),
        })
    }

    /// Serialize back to YAML, as written by `dtk init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| DtkError::Config {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Check if a project-relative path should be excluded.
    ///
    /// Patterns without a `/` also match against any single path component,
    /// so `*.bak` and `drafts` work at any depth.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.excludes.iter().any(|pattern| {
            let pattern = pattern.trim_start_matches("./").trim_end_matches('/');
            glob_match(pattern, &path)
                || (!pattern.contains('/') && path.split('/').any(|c| glob_match(pattern, c)))
        })
    }

    /// Look up a platform by name.
    pub fn platform(&self, name: &str) -> Option<&Platform> {
        self.platforms.get(name)
    }
}

impl Platform {
    /// Effective format options for one of this platform's files.
    pub fn file_options(&self, file: &FileConfig) -> FormatOptions {
        file.options.inherit(&self.options).resolve()
    }
}

impl FileConfig {
    pub fn new(destination: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            format: format.into(),
            filter: None,
            options: OptionsConfig::default(),
        }
    }

    /// Whether `token` passes this file's attribute filter.
    pub fn accepts(&self, token: &Token) -> bool {
        self.filter.as_ref().map_or(true, |filter| {
            filter
                .iter()
                .all(|(key, expected)| token.attributes.get(key) == Some(expected.as_str()))
        })
    }
}

impl OptionsConfig {
    pub fn is_empty(&self) -> bool {
        self.show_file_header.is_none() && self.prefix.is_none()
    }

    /// These options with unset keys taken from `base`.
    pub fn inherit(&self, base: &OptionsConfig) -> OptionsConfig {
        OptionsConfig {
            show_file_header: self.show_file_header.or(base.show_file_header),
            prefix: self.prefix.clone().or_else(|| base.prefix.clone()),
        }
    }

    /// Fill remaining defaults.
    pub fn resolve(&self) -> FormatOptions {
        let defaults = FormatOptions::default();
        FormatOptions {
            show_file_header: self.show_file_header.unwrap_or(defaults.show_file_header),
            prefix: self.prefix.clone().filter(|p| !p.is_empty()),
        }
    }
}

/// A path as a `/`-separated string with no leading `./`.
pub(crate) fn normalize(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
