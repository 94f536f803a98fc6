//! File system scanner for discovering token files.
//!
//! Source globs are relative to the project root. Each glob is walked from
//! its longest wildcard-free prefix, so `src/**/*.yaml` only visits `src/`.
//! Supported syntax: `**` (any number of directories), `*` (any run of
//! characters within one component) and `?` (one character).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::{normalize, Manifest};

/// Token files matched by the manifest's source globs.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matched files in sorted path order, without duplicates.
    pub files: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Merge another scan result into this one, keeping order and
    /// uniqueness.
    pub fn merge(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        self.files.sort();
        self.files.dedup();
    }
}

/// Scan the project root for files matching the manifest's source globs.
pub fn scan_sources(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for pattern in &manifest.source {
        let scan = scan_pattern(root, pattern, manifest);
        result.merge(scan);
    }

    result
}

/// Scan for a single glob pattern.
pub fn scan_pattern(root: &Path, pattern: &str, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();
    let pattern = pattern.trim_start_matches("./");
    let base = root.join(literal_prefix(pattern));

    if !base.exists() {
        return result;
    }

    for entry in WalkDir::new(&base)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if manifest.is_excluded(relative) {
            continue;
        }

        if glob_match(pattern, &normalize(relative)) {
            result.files.push(entry.path().to_path_buf());
        }
    }

    result.files.sort();
    result
}

/// The leading components of `pattern` that contain no wildcard.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut components: Vec<&str> = pattern
        .split('/')
        .take_while(|c| !c.contains(['*', '?']))
        .collect();

    // A wildcard-free pattern names a file; walk its parent.
    if components.len() == pattern.split('/').count() {
        components.pop();
    }

    components.iter().filter(|c| !c.is_empty()).collect()
}

/// Match a `/`-separated path against a glob pattern.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match_components(&pattern, &path)
}

fn match_components(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_components(rest, &path[skip..])),
        Some((head, rest)) => match path.split_first() {
            Some((component, remaining)) => {
                match_component(head.as_bytes(), component.as_bytes())
                    && match_components(rest, remaining)
            }
            None => false,
        },
    }
}

fn match_component(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(b'*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == b'?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp + 1;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
