use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Scan root '{}' does not exist", path.display()))]
    RootNotFound { path: PathBuf },

    #[snafu(display("Scan root '{}' is not a directory", path.display()))]
    RootNotADirectory { path: PathBuf },

    #[snafu(display("Pattern file '{}' does not exist", path.display()))]
    PatternFileNotFound { path: PathBuf },

    #[snafu(display("Ignore file '{}' does not exist", path.display()))]
    IgnoreFileNotFound { path: PathBuf },

    #[snafu(display("Failed to read pattern file '{}': {}", path.display(), source))]
    ReadPatternFile { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to read ignore file '{}': {}", path.display(), source))]
    ReadIgnoreFile { path: PathBuf, source: std::io::Error },

    #[snafu(display("Invalid glob '{glob}' in ignore rules: {source}"))]
    InvalidGlob { glob: String, source: globset::Error },

    #[snafu(display(
        "No usable patterns. Give an inline list, a pattern file, or place a 'harvest.patterns' \
         file in the working directory."
    ))]
    NoPatterns,

    #[snafu(display("Failed to create output directory '{}': {}", path.display(), source))]
    CreateOutputDir { path: PathBuf, source: std::io::Error },

    #[snafu(display("{}: {}", path.display(), source))]
    Io { path: PathBuf, source: std::io::Error },
}

impl Error {
    /// Map the error taxonomy onto process exit codes.
    ///
    /// Usage errors never reach here (clap exits with 2 on its own). A required path
    /// that does not exist is 3, an empty pattern set is 4, and everything else that
    /// kills the run is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RootNotFound { .. }
            | Self::RootNotADirectory { .. }
            | Self::PatternFileNotFound { .. }
            | Self::IgnoreFileNotFound { .. } => 3,
            Self::NoPatterns => 4,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
