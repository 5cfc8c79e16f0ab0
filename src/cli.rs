use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Collect files matching name patterns into an auditable subset of a tree")]
#[command(version)]
pub struct CliArgs {
    /// Root of the directory tree to scan
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Directory that receives the mirrored tree, the match list, and the manifest
    #[arg(short, long, value_name = "DIR", default_value = "harvested")]
    pub output: PathBuf,

    /// Comma-separated list of case-insensitive substrings to match against base
    /// filenames.
    ///
    /// A file is selected when its final path component contains any of these,
    /// ignoring case. Directory names and file contents are never matched.
    #[arg(short, long, value_name = "LIST", conflicts_with = "patterns_file")]
    pub patterns: Option<String>,

    /// File with one pattern per line.
    ///
    /// Blank lines and lines starting with '#' are ignored. Mutually exclusive with
    /// --patterns. When neither is given, a 'harvest.patterns' file is looked for in
    /// the working directory and then next to the executable.
    #[arg(long, value_name = "FILE")]
    pub patterns_file: Option<PathBuf>,

    /// File with one ignore rule per line; a directory matching any rule is pruned
    /// wholesale, before it is descended into.
    ///
    /// A bare token matches anywhere in a directory's path; a token ending in '/'
    /// matches only a full path component; tokens with wildcards or an embedded '/'
    /// are shell-style globs against the full path. When absent, a 'harvest.ignore'
    /// file is looked for the same way as the default pattern file.
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Scan and write the manifest, but do not copy any files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Ask before copying each matched file.
    ///
    /// Declining a copy skips that one file; its manifest entry remains.
    #[arg(short, long)]
    pub interactive: bool,

    /// Use verbose output (-vv for debug, -vvv for trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Parse the real process arguments. Clap prints usage and exits with code 2 on
    /// any usage error, including giving both pattern sources at once.
    pub fn parse_from_cli_args() -> Self {
        Self::parse()
    }

    /// Parse from an explicit argument list, for tests. The binary name is prepended.
    #[cfg(test)]
    pub(crate) fn parse_from_test_args<'a>(args: impl IntoIterator<Item = &'a str>) -> Self {
        Self::parse_from(std::iter::once("harvest").chain(args))
    }
}
