use crate::{Result, error, metadata::MatchRecord};
use snafu::ResultExt;
use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the plain match list inside the output directory: one absolute path per
/// line, sorted.
pub const MATCH_LIST_FILE: &str = "matches.txt";

/// Name of the manifest inside the output directory: one tab-separated record per
/// matched file, same order as the match list.
pub const MANIFEST_FILE: &str = "manifest.tsv";

/// What to do with a matched file after its manifest entry has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Copy,
    Skip,
}

/// Per-file copy decision, injected into the writer.
///
/// Dry-run and interactive confirmation are both just policies plugged in here,
/// which keeps the writer itself free of mode branching.
pub trait CopyPolicy {
    fn decide(&mut self, path: &Path) -> Disposition;
}

/// Copy every matched file. The default mode.
pub struct AlwaysCopy;

impl CopyPolicy for AlwaysCopy {
    fn decide(&mut self, _path: &Path) -> Disposition {
        Disposition::Copy
    }
}

/// Copy nothing. Dry-run mode: the manifest is still produced in full.
pub struct NeverCopy;

impl CopyPolicy for NeverCopy {
    fn decide(&mut self, _path: &Path) -> Disposition {
        Disposition::Skip
    }
}

/// Ask on the terminal before each copy. Anything other than 'y'/'yes' skips the
/// file; the manifest entry has already been written and remains.
pub struct PromptEach;

impl CopyPolicy for PromptEach {
    fn decide(&mut self, path: &Path) -> Disposition {
        eprint!("copy {}? [y/N] ", path.display());
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return Disposition::Skip;
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Disposition::Copy,
            _ => Disposition::Skip,
        }
    }
}

/// A line-oriented output file where every line is flushed as it is written, so an
/// interrupted run leaves a valid prefix rather than a torn buffer.
struct LineFile {
    path: PathBuf,
    file: File,
}

impl LineFile {
    /// Create or truncate the file.
    fn create(path: PathBuf) -> Result<Self> {
        let file = File::create(&path).context(error::IoSnafu { path: path.clone() })?;
        Ok(Self { path, file })
    }

    fn append_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{line}")
            .and_then(|()| self.file.flush())
            .context(error::IoSnafu { path: self.path.clone() })
    }
}

/// Writes the match list and manifest, and mirrors accepted files under the output
/// root.
pub struct OutputWriter {
    output_dir: PathBuf,
    match_list: LineFile,
    manifest: LineFile,
}

impl OutputWriter {
    /// Create the output directory and truncate both index files.
    ///
    /// This runs before any scan results exist, so a run that dies partway still
    /// leaves partial, valid artifacts rather than stale ones from a previous run.
    pub fn create(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).context(error::CreateOutputDirSnafu {
            path: output_dir.to_path_buf(),
        })?;

        let match_list = LineFile::create(output_dir.join(MATCH_LIST_FILE))?;
        let manifest = LineFile::create(output_dir.join(MANIFEST_FILE))?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            match_list,
            manifest,
        })
    }

    /// Append one record to the match list and the manifest.
    pub fn append(&mut self, record: &MatchRecord) -> Result<()> {
        self.match_list
            .append_line(&record.absolute_path.display().to_string())?;
        self.manifest.append_line(&manifest_line(record))
    }

    /// Mirror one matched file to `<output_root>/<relative_path>`, if the policy
    /// says so. Returns true iff the file was actually copied.
    ///
    /// A failed copy is a warning, not an error: the manifest entry already exists
    /// and the remaining files still get their chance.
    pub fn copy(&self, record: &MatchRecord, policy: &mut dyn CopyPolicy) -> bool {
        if policy.decide(&record.absolute_path) == Disposition::Skip {
            debug!(path = %record.absolute_path.display(), "copy skipped by policy");
            return false;
        }

        let dest = self.output_dir.join(&record.relative_path);
        match copy_file(&record.absolute_path, &dest) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    src = %record.absolute_path.display(),
                    dest = %dest.display(),
                    error = %err,
                    "copy failed"
                );
                false
            }
        }
    }
}

/// Copy `src` to `dest`, creating parent directories on demand. Re-copying over an
/// existing destination overwrites it, which is what makes re-runs idempotent.
fn copy_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;
    Ok(())
}

fn manifest_line(record: &MatchRecord) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        record.display_timestamp,
        record.epoch_seconds,
        record.size_bytes,
        record.content_hash,
        record.relative_path.display(),
        record.absolute_path.display()
    )
}
