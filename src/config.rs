use crate::{Result, cli::CliArgs, error};
use snafu::{ResultExt, ensure};
use std::path::PathBuf;
use tracing::debug;

/// Conventional pattern file looked for when no pattern source is given explicitly.
pub(crate) const DEFAULT_PATTERNS_FILE: &str = "harvest.patterns";

/// Conventional ignore file looked for when `--ignore-file` is absent.
pub(crate) const DEFAULT_IGNORE_FILE: &str = "harvest.ignore";

/// Where the inclusion patterns come from. Exactly one source per run; the CLI layer
/// rejects attempts to give both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    /// Comma-separated list given directly on the command line.
    Inline(String),
    /// Line-oriented pattern file, explicit or discovered.
    File(PathBuf),
}

/// Validated configuration for a single run.
///
/// Everything here is resolved before any traversal starts, so all configuration
/// errors surface before the tree is touched.
#[derive(Debug, Clone)]
pub struct Config {
    /// Canonicalized scan root. Guaranteed to exist and be a directory.
    pub root: PathBuf,

    /// Where the mirrored tree, match list, and manifest land.
    pub output_dir: PathBuf,

    pub pattern_source: PatternSource,

    /// Ignore rule file, if one was named or discovered. `None` means nothing is
    /// pruned.
    pub ignore_file: Option<PathBuf>,

    pub dry_run: bool,
    pub interactive: bool,
}

impl Config {
    /// Load and validate the configuration from parsed CLI args.
    pub fn load(args: &CliArgs) -> Result<Self> {
        ensure!(
            args.root.exists(),
            error::RootNotFoundSnafu { path: args.root.clone() }
        );
        ensure!(
            args.root.is_dir(),
            error::RootNotADirectorySnafu { path: args.root.clone() }
        );
        let root = args
            .root
            .canonicalize()
            .context(error::IoSnafu { path: args.root.clone() })?;

        let pattern_source = if let Some(list) = &args.patterns {
            PatternSource::Inline(list.clone())
        } else if let Some(file) = &args.patterns_file {
            ensure!(
                file.exists(),
                error::PatternFileNotFoundSnafu { path: file.clone() }
            );
            PatternSource::File(file.clone())
        } else if let Some(found) = discover(DEFAULT_PATTERNS_FILE) {
            debug!(path = %found.display(), "using discovered pattern file");
            PatternSource::File(found)
        } else {
            return error::NoPatternsSnafu.fail();
        };

        let ignore_file = if let Some(file) = &args.ignore_file {
            ensure!(
                file.exists(),
                error::IgnoreFileNotFoundSnafu { path: file.clone() }
            );
            Some(file.clone())
        } else {
            let found = discover(DEFAULT_IGNORE_FILE);
            if let Some(path) = &found {
                debug!(path = %path.display(), "using discovered ignore file");
            }
            found
        };

        Ok(Self {
            root,
            output_dir: args.output.clone(),
            pattern_source,
            ignore_file,
            dry_run: args.dry_run,
            interactive: args.interactive,
        })
    }
}

/// Look for a conventionally named file, first in the current working directory and
/// then next to the executable itself. First hit wins.
fn discover(name: &str) -> Option<PathBuf> {
    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|exe| {
        exe.parent().map(std::path::Path::to_path_buf)
    }) {
        let candidate = exe_dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    None
}
