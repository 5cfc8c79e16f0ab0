mod cli;
mod config;
mod error;
mod logging;
mod metadata;
mod output;
mod patterns;
mod rules;
mod scanner;

pub use cli::CliArgs;
use config::Config;
pub use error::{Error, Result};
use metadata::MatchRecord;
use output::{AlwaysCopy, CopyPolicy, NeverCopy, OutputWriter, PromptEach};
use patterns::PatternSet;
use rules::RuleSet;
use tracing::{debug, info};

/// Instance of the engine that powers the `harvest` tool.
///
/// This is packaged this way so that our `main.rs` is as minimal as possible: parse
/// the arguments, hand them here, and map any error to an exit code.
pub struct Harvest {
    config: Config,
    patterns: PatternSet,
    rules: RuleSet,
}

/// Counts reported at the end of a run.
///
/// `skipped` covers everything a manifest entry exists for but no copy happened:
/// dry-run suppressions, interactive declines, and failed copies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub matched: usize,
    pub copied: usize,
    pub skipped: usize,
}

impl Harvest {
    /// Create a new instance from our [`CliArgs`], loading and validating all
    /// configuration up front. Nothing here touches the scan tree beyond checking
    /// that the root exists; every configuration error surfaces before traversal.
    pub fn new_from_cli_args(args: &CliArgs) -> Result<Self> {
        let config = Config::load(args)?;
        let patterns = PatternSet::load(&config.pattern_source)?;
        let rules = match &config.ignore_file {
            Some(path) => RuleSet::load(path)?,
            None => RuleSet::empty(),
        };

        debug!(
            root = %config.root.display(),
            patterns = patterns.len(),
            rules = rules.len(),
            "configuration loaded"
        );

        Ok(Self {
            config,
            patterns,
            rules,
        })
    }

    /// Run one scan: walk and prune, match base names, record metadata, and copy
    /// whatever the disposition policy allows.
    ///
    /// The index files are truncated before the walk starts, matched paths are
    /// sorted before anything is written, and each file flows through
    /// record-then-copy so an interrupted run leaves a valid manifest prefix.
    pub fn run(&self) -> Result<RunSummary> {
        let mut writer = OutputWriter::create(&self.config.output_dir)?;

        let mut matched: Vec<_> = scanner::walk(&self.config.root, &self.rules)
            .filter(|path| self.patterns.matches(path))
            .collect();
        matched.sort();
        info!(matched = matched.len(), "scan complete");

        let mut policy = self.copy_policy();
        let mut summary = RunSummary::default();

        for path in &matched {
            let record = MatchRecord::collect(&self.config.root, path);
            writer.append(&record)?;
            summary.matched += 1;

            if writer.copy(&record, policy.as_mut()) {
                summary.copied += 1;
            } else {
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }

    fn copy_policy(&self) -> Box<dyn CopyPolicy> {
        if self.config.dry_run {
            Box::new(NeverCopy)
        } else if self.config.interactive {
            Box::new(PromptEach)
        } else {
            Box::new(AlwaysCopy)
        }
    }
}

/// Main entry point for the `harvest` engine.
///
/// Meant to be called from `main.rs` or other frontends.
pub fn harvest_main() -> Result<RunSummary> {
    let args = CliArgs::parse_from_cli_args();
    logging::init(&args);

    let harvest = Harvest::new_from_cli_args(&args)?;
    let summary = harvest.run()?;

    // Zero matches is a legitimate outcome of pattern refinement, not an error.
    if summary.matched == 0 {
        println!("No files matched.");
    } else if harvest.config.dry_run {
        println!(
            "Matched {} files (dry run, nothing copied).",
            summary.matched
        );
    } else {
        println!(
            "Matched {} files; copied {}, skipped {}.",
            summary.matched, summary.copied, summary.skipped
        );
    }

    Ok(summary)
}
