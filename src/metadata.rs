use chrono::{Local, TimeZone};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::warn;

/// Sentinel recorded in place of a digest when a matched file's content could not be
/// read. Shaped like a real SHA-256 so the manifest columns stay uniform.
pub const UNREADABLE_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Everything the manifest records about one matched file.
///
/// A record is collected once per match, written once, and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Modification time rendered in local time for human readers.
    pub display_timestamp: String,

    /// Modification time as seconds since the Unix epoch.
    pub epoch_seconds: i64,

    pub size_bytes: u64,

    /// Hex-encoded SHA-256 of the file content, or [`UNREADABLE_HASH`].
    pub content_hash: String,

    /// Path relative to the scan root; also the file's path under the output root.
    pub relative_path: PathBuf,

    pub absolute_path: PathBuf,
}

impl MatchRecord {
    /// Collect metadata for one matched file.
    ///
    /// Collection is best-effort: files on a large external tree can vanish or turn
    /// unreadable between the walk and this stat, and that must not abort the run.
    /// A file we cannot stat is recorded with zero size and epoch; a file we cannot
    /// hash gets [`UNREADABLE_HASH`]. Either way the match itself is preserved.
    pub fn collect(root: &Path, path: &Path) -> Self {
        let (epoch_seconds, size_bytes) = match std::fs::metadata(path) {
            Ok(metadata) => (mtime_epoch(&metadata), metadata.len()),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not stat matched file");
                (0, 0)
            }
        };

        let display_timestamp = Local
            .timestamp_opt(epoch_seconds, 0)
            .single()
            .map(|timestamp| timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let content_hash = match hash_file(path) {
            Ok(digest) => digest,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not hash matched file");
                UNREADABLE_HASH.to_string()
            }
        };

        Self {
            display_timestamp,
            epoch_seconds,
            size_bytes,
            content_hash,
            relative_path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
            absolute_path: path.to_path_buf(),
        }
    }
}

fn mtime_epoch(metadata: &std::fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
        .and_then(|elapsed| i64::try_from(elapsed.as_secs()).ok())
        .unwrap_or(0)
}

/// SHA-256 of the full file content, streamed so large files do not land in memory.
fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
