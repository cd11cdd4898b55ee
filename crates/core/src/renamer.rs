use crate::media::FileEntry;
use crate::metadata::CaptureTime;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::fs;
use tracing::warn;

const NAME_FORMAT: &str = "%Y.%m.%d.%H.%M.%S";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameOutcome {
    Renamed { target: String },
    WouldRename { target: String },
    SkippedAlreadyNamed,
    SkippedCollision { target: String },
    SkippedNoDate,
    Failed { target: String, error: String },
}

/// `2023.05.01.10.20.30` followed by the extension exactly as given.
pub fn target_file_name(timestamp: &NaiveDateTime, extension: &OsStr) -> OsString {
    let mut name = OsString::from(timestamp.format(NAME_FORMAT).to_string());
    name.push(extension);
    name
}

/// Renames one file after its capture time. Never overwrites anything and
/// never returns an error; failures are reported through the outcome.
pub fn rename_entry(
    entry: &FileEntry,
    capture: Option<&CaptureTime>,
    dry_run: bool,
) -> RenameOutcome {
    let Some(capture) = capture else {
        return RenameOutcome::SkippedNoDate;
    };

    let file_name = target_file_name(&capture.timestamp, &entry.extension);
    if entry.path.file_name() == Some(file_name.as_os_str()) {
        return RenameOutcome::SkippedAlreadyNamed;
    }

    let target = entry.path.with_file_name(&file_name);
    let target_name = file_name.to_string_lossy().into_owned();
    if fs::symlink_metadata(&target).is_ok() {
        return RenameOutcome::SkippedCollision {
            target: target_name,
        };
    }

    if dry_run {
        return RenameOutcome::WouldRename {
            target: target_name,
        };
    }

    match fs::rename(&entry.path, &target) {
        Ok(()) => RenameOutcome::Renamed {
            target: target_name,
        },
        Err(err) => {
            warn!(path = %entry.path.display(), %err, "rename failed");
            RenameOutcome::Failed {
                target: target_name,
                error: err.to_string(),
            }
        }
    }
}
