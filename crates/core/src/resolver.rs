use crate::exif_reader::{parse_exif_datetime, read_image_tags, IMAGE_DATE_TAGS};
use crate::file_times::FileTimes;
use crate::media::{FileEntry, MediaKind};
use crate::metadata::{first_present, CaptureTime, DateSource, TagMap};
use crate::video_reader::{parse_container_date, read_container_metadata, VIDEO_DATE_FIELDS};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::debug;

/// Resolves the capture time of one file: embedded metadata first, then
/// filesystem times. `None` means no usable date exists at all.
pub fn resolve_capture_time(entry: &FileEntry) -> Option<CaptureTime> {
    let embedded = match entry.kind {
        MediaKind::Image => image_capture_time(&entry.path),
        MediaKind::Video => video_capture_time(&entry.path),
        MediaKind::Unclassified => None,
    };
    resolve_with(embedded, || FileTimes::read(&entry.path))
}

/// Combines an embedded date with a lazily read filesystem fallback.
fn resolve_with(
    embedded: Option<CaptureTime>,
    file_times: impl FnOnce() -> FileTimes,
) -> Option<CaptureTime> {
    embedded.or_else(|| {
        file_times()
            .earliest_local()
            .map(|timestamp| CaptureTime::new(timestamp, DateSource::FilesystemTimes))
    })
}

fn image_capture_time(path: &Path) -> Option<CaptureTime> {
    let tags = match read_image_tags(path) {
        Ok(tags) => tags,
        Err(err) => {
            debug!(path = %path.display(), %err, "no usable EXIF; falling back");
            return None;
        }
    };
    date_from_image_tags(&tags).map(|ts| CaptureTime::new(ts, DateSource::ImageExif))
}

fn video_capture_time(path: &Path) -> Option<CaptureTime> {
    let section = match read_container_metadata(path) {
        Ok(section) => section,
        Err(err) => {
            debug!(path = %path.display(), %err, "no usable container metadata; falling back");
            return None;
        }
    };
    date_from_container_fields(&section).map(|ts| CaptureTime::new(ts, DateSource::VideoContainer))
}

pub fn date_from_image_tags(tags: &TagMap) -> Option<NaiveDateTime> {
    let raw = first_present(tags, IMAGE_DATE_TAGS)?;
    match parse_exif_datetime(raw) {
        Ok(timestamp) => Some(timestamp),
        Err(err) => {
            debug!(%err, "EXIF date rejected");
            None
        }
    }
}

pub fn date_from_container_fields(section: &TagMap) -> Option<NaiveDateTime> {
    let raw = first_present(section, VIDEO_DATE_FIELDS)?;
    match parse_container_date(raw) {
        Ok(timestamp) => Some(timestamp),
        Err(err) => {
            debug!(%err, "container date rejected");
            None
        }
    }
}
