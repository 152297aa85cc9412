use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{DiagnosticSink, Error};

/// `ctime(3)` layout, e.g. `Wed Jun 30 21:49:08 1993`.
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Appends `[<timestamp>] <message>` lines to a log file, creating it on
/// first write. Everything except a failed login is prefixed with `Error: `.
#[derive(Debug)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl DiagnosticSink for FileLog {
    fn report(&self, error: &Error) {
        tracing::warn!(%error, "operation failed");

        let now = chrono::Local::now().format(CTIME_FORMAT);
        let line = match error {
            Error::Authentication(_) => format!("[{}] {}", now, error),
            _ => format!("[{}] Error: {}", now, error),
        };
        if let Err(e) = self.append(&line) {
            tracing::error!(path = %self.path.display(), error = %e, "cannot write diagnostic log");
        }
    }
}

/// Used when no log file is wanted; failures only reach the tracing output.
#[derive(Default, Debug)]
pub struct StdErrLog {}

impl DiagnosticSink for StdErrLog {
    fn report(&self, error: &Error) {
        tracing::warn!(%error, "operation failed");
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Box<T> {
    fn report(&self, error: &Error) {
        (**self).report(error);
    }
}

#[cfg(test)]
#[derive(Default, Debug)]
pub struct MemoryLog {
    messages: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemoryLog {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

#[cfg(test)]
impl DiagnosticSink for MemoryLog {
    fn report(&self, error: &Error) {
        self.messages.borrow_mut().push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{FileLog, MemoryLog};
    use crate::domain::{DiagnosticSink, Error};

    #[test]
    fn file_log_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::new(dir.path().join("cout.log"));

        log.report(&Error::NegativeCount { count: -4 });
        log.report(&Error::Authentication("mallory".to_string()));

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Error: Negative value: -4"));
        assert!(lines[1].ends_with("] Login failed for user: mallory"));
        assert!(!lines[1].contains("Error:"));
    }

    #[test]
    fn unwritable_log_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for append.
        let log = FileLog::new(dir.path());
        log.report(&Error::NegativeCount { count: -1 });
    }

    #[test]
    fn boxed_sinks_forward_reports() {
        let log: Box<MemoryLog> = Box::default();
        log.report(&Error::Overflow("1 shares at 2".to_string()));
        assert_eq!(log.messages(), vec!["Value overflow: 1 shares at 2".to_string()]);
    }
}
