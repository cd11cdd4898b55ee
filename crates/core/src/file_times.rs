use chrono::{DateTime, Local, NaiveDateTime};
use std::fs::{self, Metadata};
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// Filesystem timestamps of one file. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTimes {
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl FileTimes {
    pub fn read(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) => Self::from_metadata(&meta),
            Err(err) => {
                debug!(path = %path.display(), %err, "file times unavailable");
                Self::default()
            }
        }
    }

    pub fn from_metadata(meta: &Metadata) -> Self {
        Self {
            created: creation_time(meta),
            modified: meta.modified().ok(),
        }
    }

    /// Earlier of creation and modification time, as local wall-clock time.
    pub fn earliest_local(&self) -> Option<NaiveDateTime> {
        [self.created, self.modified]
            .into_iter()
            .flatten()
            .min()
            .map(|time| DateTime::<Local>::from(time).naive_local())
    }
}

/// Birth time where the platform records it, otherwise the closest substitute.
fn creation_time(meta: &Metadata) -> Option<SystemTime> {
    meta.created().ok().or_else(|| status_change_time(meta))
}

#[cfg(unix)]
fn status_change_time(meta: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::{Duration, UNIX_EPOCH};

    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    match u64::try_from(meta.ctime()) {
        Ok(secs) => UNIX_EPOCH.checked_add(Duration::new(secs, nanos)),
        Err(_) => UNIX_EPOCH.checked_sub(Duration::from_secs(meta.ctime().unsigned_abs())),
    }
}

#[cfg(not(unix))]
fn status_change_time(_meta: &Metadata) -> Option<SystemTime> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    #[test]
    fn earliest_local_prefers_older_timestamp() {
        let older = UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        let newer = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        let times = FileTimes {
            created: Some(newer),
            modified: Some(older),
        };
        let expected = Local
            .timestamp_opt(1_000_000_000, 0)
            .single()
            .expect("local time")
            .naive_local();
        assert_eq!(times.earliest_local(), Some(expected));
    }

    #[test]
    fn earliest_local_uses_whichever_side_exists() {
        let only = UNIX_EPOCH + Duration::from_secs(1_234_567_890);
        let times = FileTimes {
            created: None,
            modified: Some(only),
        };
        assert!(times.earliest_local().is_some());

        let times = FileTimes {
            created: Some(only),
            modified: None,
        };
        assert_eq!(
            times.earliest_local(),
            Some(DateTime::<Local>::from(only).naive_local())
        );
    }

    #[test]
    fn earliest_local_is_none_without_any_time() {
        assert_eq!(FileTimes::default().earliest_local(), None);
    }

    #[test]
    fn read_missing_file_yields_no_times() {
        let temp = tempdir().expect("tempdir");
        let times = FileTimes::read(&temp.path().join("missing.bin"));
        assert_eq!(times, FileTimes::default());
    }

    #[test]
    fn read_existing_file_has_modification_time() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("note.txt");
        fs::write(&path, b"x").expect("write file");

        let times = FileTimes::read(&path);
        assert!(times.modified.is_some());
        assert!(times.earliest_local().is_some());
    }
}
