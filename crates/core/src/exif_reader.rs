use crate::error::MetadataError;
use crate::metadata::TagMap;
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Capture-time tags in priority order.
pub const IMAGE_DATE_TAGS: &[&str] = &["DateTimeOriginal", "DateTimeDigitized", "DateTime"];

const TAG_TABLE: &[(Tag, &str)] = &[
    (Tag::DateTimeOriginal, "DateTimeOriginal"),
    (Tag::DateTimeDigitized, "DateTimeDigitized"),
    (Tag::DateTime, "DateTime"),
];

pub fn read_image_tags(path: &Path) -> Result<TagMap, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = BufReader::new(file);
    // Tags decoded before a malformed IFD are kept.
    let exif = Reader::new()
        .continue_on_error(true)
        .read_from_container(&mut buf)
        .or_else(|err| {
            err.distill_partial_result(|errors| {
                for error in errors {
                    debug!(path = %path.display(), %error, "EXIF read partially");
                }
            })
        })
        .map_err(|err| MetadataError::unreadable(path, err))?;

    let mut tags = TagMap::new();
    for (tag, name) in TAG_TABLE {
        let Some(field) = exif.get_field(*tag, In::PRIMARY) else {
            continue;
        };
        if let Some(raw) = ascii_value(&field.value) {
            tags.insert((*name).to_string(), raw);
        }
    }
    Ok(tags)
}

fn ascii_value(value: &Value) -> Option<String> {
    match value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

pub fn parse_exif_datetime(raw: &str) -> Result<NaiveDateTime, MetadataError> {
    NaiveDateTime::parse_from_str(raw, EXIF_DATE_FORMAT).map_err(|_| MetadataError::DateParse {
        value: raw.to_string(),
        format: EXIF_DATE_FORMAT,
    })
}
