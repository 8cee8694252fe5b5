//! History provider traits and the `git` CLI implementation

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, instrument};

use mergelog_core::error::HistoryError;
use mergelog_core::record::CommitRecord;

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// A live, cancellable stream of commit records, newest first
#[async_trait]
pub trait RecordStream: Send {
    /// Next record, or `None` once history is exhausted
    async fn next_record(&mut self) -> Result<Option<CommitRecord>>;

    /// Stop consuming and terminate the underlying source.
    ///
    /// Aborting is not an error condition; the remaining history is simply
    /// not needed.
    async fn abort(&mut self) -> Result<()>;
}

/// Supplies commit history and raw commit message bodies
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Open the history of a branch (checked-out branch when `None`)
    async fn open_history(&self, branch: Option<&str>) -> Result<Box<dyn RecordStream>>;

    /// Fetch the full, raw message body of one commit
    async fn commit_message(&self, hash: &str) -> Result<String>;
}

/// History provider backed by the `git` command line
///
/// History lines come from `git log --pretty=format:%H %P#%D`, one commit per
/// line: the full hash, the space-separated parent hashes, a `#`, then the
/// comma-separated ref decorations. Message bodies come from
/// `git show -s --format=%B`.
pub struct GitCliProvider {
    workdir: PathBuf,
}

impl GitCliProvider {
    /// Create a provider running `git` inside `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// The directory `git` is invoked in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

#[async_trait]
impl HistoryProvider for GitCliProvider {
    #[instrument(skip(self))]
    async fn open_history(&self, branch: Option<&str>) -> Result<Box<dyn RecordStream>> {
        let mut command = Command::new("git");
        command
            .arg("log")
            .arg("--pretty=format:%H %P#%D")
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(branch) = branch.filter(|b| !b.is_empty()) {
            command.arg(branch);
        }

        let mut child = command
            .spawn()
            .map_err(|e| HistoryError::SpawnFailed(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HistoryError::SpawnFailed("no stdout pipe".to_string()))?;

        debug!(workdir = %self.workdir.display(), "history stream opened");

        Ok(Box::new(GitLogStream {
            child,
            lines: BufReader::new(stdout).lines(),
            finished: false,
        }))
    }

    #[instrument(skip(self))]
    async fn commit_message(&self, hash: &str) -> Result<String> {
        let output = Command::new("git")
            .arg("show")
            .arg("-s")
            .arg("--format=%B")
            .arg(hash)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| HistoryError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(HistoryError::MessageFetchFailed {
                hash: hash.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Streaming wrapper over a running `git log` process
struct GitLogStream {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    finished: bool,
}

#[async_trait]
impl RecordStream for GitLogStream {
    async fn next_record(&mut self) -> Result<Option<CommitRecord>> {
        if self.finished {
            return Ok(None);
        }

        if let Some(line) = self.lines.next_line().await? {
            return parse_record_line(&line).map(Some);
        }

        // Stream ended normally; a nonzero exit means the history was
        // incomplete and everything parsed so far must be abandoned.
        self.finished = true;
        let status = self.child.wait().await?;
        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = self.child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr).await;
            }
            return Err(HistoryError::ProviderExited {
                status: status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(None)
    }

    async fn abort(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        debug!("aborting history stream");
        self.child.kill().await?;
        Ok(())
    }
}

/// Parse one `%H %P#%D` line into a commit record
fn parse_record_line(line: &str) -> Result<CommitRecord> {
    let (commit_part, decoration_part) = line.split_once('#').unwrap_or((line, ""));

    let mut tokens = commit_part.split_whitespace();
    let hash = tokens
        .next()
        .ok_or_else(|| HistoryError::MalformedRecord(line.to_string()))?;
    let parent_count = tokens.count();

    let decorations = decoration_part
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(CommitRecord::new(hash, parent_count).with_decorations(decorations))
}
