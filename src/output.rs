//! Export file naming and writing

use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

/// Write finished export bytes to `path`.
///
/// Parent directories are created as needed. The bytes go to a `.part`
/// sibling first and are renamed into place, so an interrupted write never
/// leaves a truncated file under the final name.
pub fn write_export(bytes: &[u8], path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let written = std::fs::write(&partial, bytes).and_then(|()| std::fs::rename(&partial, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

/// File name for an export made at `when`: `lightmoji-YYYYMMDD-HHMMSS.gif` (UTC).
pub fn export_file_name(when: SystemTime) -> String {
    let secs = when.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let (year, month, day, hours, mins, secs) = civil_from_unix(secs);
    format!(
        "lightmoji-{:04}{:02}{:02}-{:02}{:02}{:02}.gif",
        year, month, day, hours, mins, secs
    )
}

/// Split a Unix timestamp into UTC calendar fields.
fn civil_from_unix(secs: u64) -> (i32, u32, u64, u64, u64, u64) {
    let days = secs / 86400;
    let time_secs = secs % 86400;
    let hours = time_secs / 3600;
    let mins = (time_secs % 3600) / 60;
    let secs = time_secs % 60;

    // Calculate year/month/day from days since epoch (1970-01-01)
    let mut remaining_days = days;
    let mut year = 1970i32;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let days_in_months: [u64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for days_in_month in days_in_months.iter() {
        if remaining_days < *days_in_month {
            break;
        }
        remaining_days -= days_in_month;
        month += 1;
    }

    (year, month, remaining_days + 1, hours, mins, secs)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_export_file_name_epoch() {
        assert_eq!(export_file_name(UNIX_EPOCH), "lightmoji-19700101-000000.gif");
    }

    #[test]
    fn test_export_file_name_leap_day() {
        // 2024-02-29T13:45:07Z
        let when = UNIX_EPOCH + Duration::from_secs(1_709_214_307);
        assert_eq!(export_file_name(when), "lightmoji-20240229-134507.gif");
    }

    #[test]
    fn test_write_export_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/anim.gif");
        write_export(b"GIF89a", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"GIF89a");
        assert!(!dir.path().join("nested/out/anim.gif.part").exists());
    }

    #[test]
    fn test_write_export_failure_leaves_no_partial_file() {
        let dir = tempdir().unwrap();
        // A directory under the final name makes the rename fail
        let path = dir.path().join("anim.gif");
        std::fs::create_dir(&path).unwrap();

        assert!(write_export(b"GIF89a", &path).is_err());
        assert!(!dir.path().join("anim.gif.part").exists());
        assert!(path.is_dir());
    }
}
