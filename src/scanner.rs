use crate::rules::RuleSet;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walk `root` depth-first, yielding the absolute path of every regular file that is
/// not inside a pruned subtree.
///
/// Every directory is tested against the rule set before it is descended into; a hit
/// prunes the entire subtree structurally, so nothing beneath it is visited, yielded,
/// or stat'd. Symbolic links are not followed. Unreadable directories are skipped and
/// traversal continues; a permission hole on a messy external tree shows up as a
/// smaller result set, not a failed run.
///
/// Filesystem iteration order is unspecified; callers that need determinism sort the
/// paths they keep.
pub fn walk(root: &Path, rules: &RuleSet) -> impl Iterator<Item = PathBuf> {
    let rules = rules.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
            if is_dir && rules.matches(entry.path()) {
                debug!(path = %entry.path().display(), "pruning ignored subtree");
                return false;
            }
            true
        })
        .build();

    walker.filter_map(|result| match result {
        Ok(entry) => {
            let is_file = entry.file_type().is_some_and(|file_type| file_type.is_file());
            is_file.then(|| entry.into_path())
        }
        Err(err) => {
            debug!(error = %err, "skipping unreadable entry");
            None
        }
    })
}
