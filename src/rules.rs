use crate::{Result, error};
use globset::{Glob, GlobMatcher};
use snafu::ResultExt;
use std::path::Path;

/// A single ignore rule, resolved into its matching strategy once at load time so no
/// token is re-parsed per path test.
///
/// The three interpretations of a token:
/// - anything containing a wildcard, or a '/' before the final character, is a
///   shell-style glob matched against the full path;
/// - a token ending in '/' anchors a directory: it matches only a full path
///   component;
/// - a bare token matches anywhere in the path string.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    Substring(String),
    DirAnchor(String),
    Glob(GlobMatcher),
}

impl IgnoreRule {
    fn parse(token: &str) -> Result<Self> {
        let has_wildcard = token.contains(['*', '?', '[']);
        let has_mid_slash = token.trim_end_matches('/').contains('/');

        if has_wildcard || has_mid_slash {
            let matcher = Glob::new(token)
                .context(error::InvalidGlobSnafu { glob: token.to_string() })?
                .compile_matcher();
            Ok(Self::Glob(matcher))
        } else if let Some(anchor) = token.strip_suffix('/') {
            Ok(Self::DirAnchor(anchor.to_string()))
        } else {
            Ok(Self::Substring(token.to_string()))
        }
    }

    fn matches(&self, path: &Path) -> bool {
        match self {
            Self::Substring(token) => path.to_string_lossy().contains(token.as_str()),
            Self::DirAnchor(anchor) => path
                .components()
                .any(|component| component.as_os_str().to_string_lossy() == anchor.as_str()),
            Self::Glob(matcher) => matcher.is_match(path),
        }
    }
}

/// The full ignore rule set for a run. Rules match on paths only, never content, and
/// are only ever tested against directories: a hit prunes the whole subtree.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<IgnoreRule>,
}

impl RuleSet {
    /// A set with no rules, which never matches. Used when no ignore file is present.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load rules from a line-oriented file. Blank lines and '#' comments are
    /// skipped, matching the pattern file format.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(error::ReadIgnoreFileSnafu { path: path.to_path_buf() })?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for line in content.lines() {
            let token = line.trim();
            if token.is_empty() || token.starts_with('#') {
                continue;
            }
            rules.push(IgnoreRule::parse(token)?);
        }
        Ok(Self { rules })
    }

    /// True if any rule matches this directory path. The walker prunes on a hit, so
    /// nothing beneath the directory is ever visited.
    pub fn matches(&self, path: &Path) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
