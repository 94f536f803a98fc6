//! Build command implementation.
//!
//! Loads the project's tokens, renders every selected platform and writes
//! the outputs. `--check` compares instead of writing; `--watch` rebuilds
//! whenever a token source or the manifest changes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::build::{compile, stale_artifacts, write_artifacts, Artifact};
use crate::discovery::{glob_match, DiscoveryResult, MANIFEST_FILENAME};
use crate::error::{DtkError, Result};
use crate::output::{display_path, plural, Printer};
use crate::registry::Registry;

use super::load_project;

/// Quiet period before a watched rebuild starts.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Build token outputs for every platform in the manifest
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Manifest file (default: ./dtk.yaml, or the built-in manifest)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Only build this platform (repeatable)
    #[arg(long = "platform", short = 'p', value_name = "NAME")]
    pub platforms: Vec<String>,

    /// Fail if any output is missing or out of date, without writing
    #[arg(long, conflicts_with = "watch")]
    pub check: bool,

    /// Rebuild when token files or the manifest change
    #[arg(long, short)]
    pub watch: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let registry = Registry::with_builtins();

    if args.watch {
        return watch(&args, &registry, printer);
    }

    let discovery = load_project(args.config.as_deref())?;
    build_once(&args, &discovery, &registry, printer)
}

fn build_once(
    args: &BuildArgs,
    discovery: &DiscoveryResult,
    registry: &Registry,
    printer: &Printer,
) -> Result<()> {
    let tokens = discovery.load()?;
    printer.status(
        "Loaded",
        &format!(
            "{} from {}",
            plural(tokens.tree.token_count(), "token", "tokens"),
            plural(tokens.files.len(), "file", "files")
        ),
    );
    if !tokens.collisions.is_empty() {
        printer.warning(
            "Warning",
            &format!(
                "{} redefined by later files (see `dtk validate`)",
                plural(tokens.collisions.len(), "token", "tokens")
            ),
        );
    }

    let artifacts = compile(
        &tokens.tree,
        &discovery.manifest,
        registry,
        &discovery.root,
        &args.platforms,
    )?;

    if args.check {
        return check(&artifacts, printer);
    }

    write_artifacts(&artifacts)?;
    for artifact in &artifacts {
        printer.status("Wrote", &describe(artifact, printer));
    }
    printer.success(
        "Finished",
        &format!(
            "{} for {}",
            plural(artifacts.len(), "file", "files"),
            plural(platform_count(&artifacts), "platform", "platforms")
        ),
    );

    Ok(())
}

fn check(artifacts: &[Artifact], printer: &Printer) -> Result<()> {
    let stale = stale_artifacts(artifacts);
    if stale.is_empty() {
        printer.success(
            "Checked",
            &format!("{} up to date", plural(artifacts.len(), "file", "files")),
        );
        return Ok(());
    }

    for artifact in &stale {
        printer.warning("Stale", &describe(artifact, printer));
    }
    Err(DtkError::Build {
        message: format!(
            "{} out of date: {}",
            plural(stale.len(), "file", "files"),
            stale
                .iter()
                .map(|a| display_path(&a.path))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        help: Some("Run `dtk build` to regenerate them".to_string()),
    })
}

fn describe(artifact: &Artifact, printer: &Printer) -> String {
    format!(
        "{} {}",
        printer.cyan(&display_path(&artifact.path)),
        printer.dim(&format!(
            "({}, {})",
            artifact.platform,
            plural(artifact.token_count, "token", "tokens")
        ))
    )
}

fn platform_count(artifacts: &[Artifact]) -> usize {
    let mut platforms: Vec<&str> = artifacts.iter().map(|a| a.platform.as_str()).collect();
    platforms.dedup();
    platforms.len()
}

/// Build, then rebuild after every relevant change until interrupted.
///
/// Failed rebuilds are reported and watching continues.
fn watch(args: &BuildArgs, registry: &Registry, printer: &Printer) -> Result<()> {
    let rebuild = |printer: &Printer| -> Option<DiscoveryResult> {
        let result = load_project(args.config.as_deref()).and_then(|discovery| {
            build_once(args, &discovery, registry, printer)?;
            Ok(discovery)
        });
        match result {
            Ok(discovery) => Some(discovery),
            Err(e) => {
                printer.error("Error", &e.to_string());
                None
            }
        }
    };

    let mut discovery = rebuild(printer);
    let root = match &discovery {
        Some(d) => d.root.clone(),
        None => project_root(args.config.as_deref()),
    };
    // Events carry absolute paths
    let root = root.canonicalize().unwrap_or(root);

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })
    .map_err(watch_error)?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(watch_error)?;

    printer.info("Watching", &format!("{} for changes", display_path(&root)));

    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            Err(_) => return Ok(()),
        };
        if !is_relevant(&event, &root, discovery.as_ref()) {
            continue;
        }

        // Let a burst of editor writes settle
        loop {
            match rx.recv_timeout(DEBOUNCE) {
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }

        if let Some(path) = event.paths.first() {
            printer.info("Changed", &display_path(path));
        }
        if let Some(rebuilt) = rebuild(printer) {
            discovery = Some(rebuilt);
        }
    }
}

/// Whether an event touches the manifest or a token source. Writes to
/// outputs are ignored.
fn is_relevant(event: &Event, root: &Path, discovery: Option<&DiscoveryResult>) -> bool {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }

    let manifest_name = discovery
        .and_then(|d| d.manifest_path.as_deref())
        .and_then(Path::file_name)
        .unwrap_or(OsStr::new(MANIFEST_FILENAME));

    event.paths.iter().any(|path| {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };
        if relative.as_os_str() == manifest_name {
            return true;
        }

        let Some(discovery) = discovery else {
            // Nothing loaded yet: any YAML file may fix the project
            return relative.extension().is_some_and(|e| e == "yaml" || e == "yml");
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        !discovery.manifest.is_excluded(Path::new(&relative))
            && discovery
                .manifest
                .source
                .iter()
                .any(|pattern| glob_match(pattern.trim_start_matches("./"), &relative))
    })
}

fn project_root(config: Option<&Path>) -> PathBuf {
    config
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn watch_error(e: notify::Error) -> DtkError {
    DtkError::Build {
        message: format!("Failed to watch for changes: {}", e),
        help: None,
    }
}
