//! Append-only trace file with size-based rotation.
//!
//! Each export batch is one line. Before a write, a file that has grown past
//! the policy's limit is renamed to `<name>.<unix millis>-<rotation>` and a
//! fresh file is started; only the newest backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Size and retention limits for a rotating file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// A file larger than this is rotated before the next write.
    pub max_bytes: u64,
    /// Number of rotated files kept next to the live one.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Line writer over a rotating file, shared by the span exporter.
///
/// The handle is opened lazily on the first write so constructing the writer
/// never touches the filesystem.
pub struct FileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
    rotations: AtomicU64,
}

impl FileWriter {
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
            rotations: AtomicU64::new(0),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too big.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from rotation, opening or writing, and an error if
    /// the handle lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("trace file lock poisoned: {e}")))?;

        let oversized = fs::metadata(&self.path).is_ok_and(|m| m.len() > self.policy.max_bytes);
        if oversized {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::other("trace file unavailable"))?;

        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis();

        let rotation = self.rotations.fetch_add(1, Ordering::Relaxed);
        let backup = self.backup_path(&format!("{millis}-{rotation:06}"));

        if self.path.exists() {
            fs::rename(&self.path, &backup)?;
        }
        self.prune_backups()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.file_name().to_string();
        name.push('.');
        name.push_str(suffix);
        self.path.with_file_name(name)
    }

    fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Rotated files next to the live one, newest first.
    fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let prefix = format!("{}.", self.file_name());

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        for stale in self.backups()?.iter().skip(self.policy.max_backups) {
            if let Err(e) = fs::remove_file(stale) {
                tracing::debug!(path = %stale.display(), error = %e, "could not remove old trace file");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
