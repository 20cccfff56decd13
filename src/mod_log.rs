//! Debug-gated text log for mod authors.
//!
//! [`ModLog`] appends one line per message to a file. The first write of
//! an instance truncates whatever a previous run left behind; every
//! later write appends. Nothing is written while debug is off.
//!
//! Every message is also emitted as a `tracing` event so it shows up in
//! the process log regardless of the debug flag.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::HookError;

/// Append-only diagnostic sink.
#[derive(Debug)]
pub struct ModLog {
    path: PathBuf,
    enabled: bool,
    /// `true` until the first write has truncated the file.
    fresh: Mutex<bool>,
}

impl ModLog {
    /// Creates a sink writing to `path` when `enabled` is set.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
            fresh: Mutex::new(true),
        }
    }

    /// Creates a sink that never touches the filesystem.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    /// Returns the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if messages are written to the file.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Writes `info` as one line.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ModLog`] if the file cannot be opened or
    /// written. A failed first write leaves the sink fresh, so the next
    /// attempt truncates again.
    pub fn write(&self, info: &str) -> Result<(), HookError> {
        tracing::debug!(target: "mod_log", "{info}");
        if !self.enabled {
            return Ok(());
        }

        let mut fresh = self.fresh.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(*fresh)
            .append(!*fresh)
            .open(&self.path)?;
        writeln!(file, "{info}")?;
        *fresh = false;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::fs;

    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn first_write_truncates_then_appends() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("ModLog.txt");
        if fs::write(&path, "stale line from last run\n").is_err() {
            panic!("seed log file");
        }

        let log = ModLog::new(&path, true);
        assert!(log.write("first").is_ok());
        assert_eq!(read(&path), "first\n");

        assert!(log.write("second").is_ok());
        assert_eq!(read(&path), "first\nsecond\n");
    }

    #[test]
    fn new_instance_truncates_again() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("ModLog.txt");

        assert!(ModLog::new(&path, true).write("run one").is_ok());
        assert!(ModLog::new(&path, true).write("run two").is_ok());
        assert_eq!(read(&path), "run two\n");
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("ModLog.txt");

        let log = ModLog::new(&path, false);
        assert!(!log.is_enabled());
        assert!(log.write("ignored").is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_reports_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let log = ModLog::new(dir.path().join("missing").join("ModLog.txt"), true);
        assert!(matches!(log.write("x"), Err(HookError::ModLog(_))));
    }
}
