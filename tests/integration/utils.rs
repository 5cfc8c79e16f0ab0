//! Utility functions to help run our CLI as part of a test
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::path::PathBuf;

/// Names of the two index files the tool writes into its output directory.
pub(crate) const MATCH_LIST_FILE: &str = "matches.txt";
pub(crate) const MANIFEST_FILE: &str = "manifest.tsv";

/// An isolated filesystem for one test run: a scan root to populate, an output
/// directory, and a scratch working directory so default-file discovery never picks
/// anything up from the host system.
pub(crate) struct TestFs {
    pub(crate) root: TempDir,
    pub(crate) output: TempDir,
    pub(crate) cwd: TempDir,
}

impl TestFs {
    fn new() -> Self {
        Self {
            root: TempDir::with_prefix("harvest-root-").unwrap(),
            output: TempDir::with_prefix("harvest-out-").unwrap(),
            cwd: TempDir::with_prefix("harvest-cwd-").unwrap(),
        }
    }

    /// Create a file at `rel` under the scan root, parents included.
    pub(crate) fn file(&self, rel: &str, content: &str) -> &Self {
        self.root.child(rel).write_str(content).unwrap();
        self
    }

    /// Drop a file into the scratch working directory, e.g. a conventionally named
    /// pattern file for discovery tests.
    pub(crate) fn cwd_file(&self, name: &str, content: &str) {
        self.cwd.child(name).write_str(content).unwrap();
    }

    pub(crate) fn output_file(&self, rel: &str) -> PathBuf {
        self.output.path().join(rel)
    }

    pub(crate) fn read_output(&self, rel: &str) -> String {
        std::fs::read_to_string(self.output_file(rel)).unwrap()
    }
}

/// Represents the `harvest` binary for use in tests.
///
/// The `cmd` field provides helpers for running the binary and asserting on its
/// output.
pub(crate) struct Harvest {
    pub(crate) cmd: Command,
    pub(crate) fs: TestFs,
}

impl Harvest {
    fn find_bin(fs: &TestFs) -> Command {
        let mut cmd = Command::cargo_bin("harvest").expect("Failed to find harvest binary");
        cmd.current_dir(fs.cwd.path());
        cmd
    }

    /// A command wired to an isolated filesystem, with the scan root and output
    /// directory arguments already set. Tests add pattern and mode flags on top.
    pub(crate) fn with_test_fs() -> Self {
        let fs = TestFs::new();
        let mut cmd = Self::find_bin(&fs);
        cmd.arg(fs.root.path());
        cmd.arg("--output").arg(fs.output.path());
        Self { cmd, fs }
    }

    /// A bare command with only the working directory isolated; the test supplies
    /// every argument itself.
    pub(crate) fn bare() -> Self {
        let fs = TestFs::new();
        let cmd = Self::find_bin(&fs);
        Self { cmd, fs }
    }

    /// Recreate the command for a second run against the same filesystem, with root
    /// and output re-applied.
    pub(crate) fn rerun(self) -> Self {
        let mut cmd = Self::find_bin(&self.fs);
        cmd.arg(self.fs.root.path());
        cmd.arg("--output").arg(self.fs.output.path());
        Self { cmd, fs: self.fs }
    }
}
