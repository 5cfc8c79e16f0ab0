use crate::{Result, config::PatternSource, error};
use snafu::{ResultExt, ensure};
use std::path::Path;

/// The set of case-insensitive substrings a file's base name is tested against.
///
/// Patterns are trimmed and lower-cased once at load time, so the per-file test is a
/// plain substring scan against the lower-cased base name. Order is irrelevant and
/// duplicates are harmless; the first hit wins.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
}

impl PatternSet {
    /// Load the pattern set from whichever source the config resolved.
    ///
    /// An inline list is split on commas; a file is read line by line, with blank
    /// lines and '#' comments skipped. Ending up with zero usable patterns is a fatal
    /// configuration error either way.
    pub fn load(source: &PatternSource) -> Result<Self> {
        let patterns = match source {
            PatternSource::Inline(list) => Self::normalize(list.split(',')),
            PatternSource::File(path) => {
                let content = std::fs::read_to_string(path)
                    .context(error::ReadPatternFileSnafu { path: path.clone() })?;
                Self::normalize(
                    content
                        .lines()
                        .filter(|line| !line.trim_start().starts_with('#')),
                )
            }
        };

        ensure!(!patterns.is_empty(), error::NoPatternsSnafu);
        Ok(Self { patterns })
    }

    fn normalize<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
        tokens
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .collect()
    }

    /// True if the file's base name contains at least one pattern, ignoring case.
    ///
    /// Only the final path component is tested; directory names and file contents
    /// never participate. Paths with no base name (or a non-UTF-8 one) never match.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        let name = name.to_lowercase();
        self.patterns.iter().any(|pattern| name.contains(pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
