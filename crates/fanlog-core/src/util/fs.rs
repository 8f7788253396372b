//! Filesystem utilities.

use chrono::NaiveDate;
use fanlog_types::{LogError, Result};
use std::fs::DirBuilder;
use std::path::Path;

use crate::time::directory_date;

/// Join a directory and a file name with exactly one separator.
pub fn join(directory: &str, name: &str) -> String {
    format!("{}/{}", directory.trim_end_matches('/'), name.trim_start_matches('/'))
}

/// `{directory}/{YYYY_MM_DD}`
pub fn dated_directory(directory: &str, date: NaiveDate) -> String {
    join(directory, &directory_date(date))
}

/// `{directory}/{YYYY_MM_DD}/{file_name}`
pub fn dated_log_path(directory: &str, date: NaiveDate, file_name: &str) -> String {
    join(&dated_directory(directory, date), file_name)
}

/// Create `path` and every missing parent directory.
///
/// Directories are created world/group readable and owner writable.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path).map_err(|e| {
        LogError::Configuration(format!(
            "Failed to create log directory {}: {}",
            path.display(),
            e
        ))
    })?;
    tracing::debug!(path = %path.display(), "created log directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_join_uses_single_separator() {
        assert_eq!(join("/usr/share/logs", "test.log"), "/usr/share/logs/test.log");
        assert_eq!(join("/usr/share/logs/", "test.log"), "/usr/share/logs/test.log");
        assert_eq!(join("logs", "/test.log"), "logs/test.log");
    }

    #[test]
    fn test_dated_log_path() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(
            dated_log_path("/var/log/build", date, "build_DETAILED.log"),
            "/var/log/build/2024_01_02/build_DETAILED.log"
        );
    }

    #[test]
    fn test_ensure_directory_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");

        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
        // Existing directories are fine
        ensure_directory(&nested).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = std::fs::metadata(&nested).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_directory_reports_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_directory(&blocker.join("logs")).unwrap_err();
        assert!(err.is_configuration());
    }
}
