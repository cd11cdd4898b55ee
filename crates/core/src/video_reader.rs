use crate::error::MetadataError;
use crate::exif_reader::EXIF_DATE_FORMAT;
use crate::metadata::TagMap;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use mp4::{box_start, read_box_header_ext, skip_bytes_to, BoxHeader, BoxType, HEADER_SIZE};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

pub const CREATION_DATE_FIELD: &str = "Creation date";
pub const MODIFIED_DATE_FIELD: &str = "Modified date";

/// Container date fields in priority order. Both casings occur in the wild.
pub const VIDEO_DATE_FIELDS: &[&str] = &[
    "Creation date",
    "Creation Date",
    "Modified date",
    "Modified Date",
];

const CONTAINER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MovieHeaderTimes {
    creation: u64,
    modification: u64,
}

/// Reads the movie header of an ISO-BMFF / QuickTime file and returns its
/// dates as a flat "Metadata" section.
pub fn read_container_metadata(path: &Path) -> Result<TagMap, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let size = file
        .metadata()
        .map_err(|source| MetadataError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    let mut reader = BufReader::new(file);
    let times = read_movie_header_times(&mut reader, size)
        .map_err(|err| MetadataError::unreadable(path, err))?
        .ok_or_else(|| MetadataError::unreadable(path, "moov/mvhd が見つかりません"))?;

    let mut section = TagMap::new();
    if let Some(created) = mac_epoch_to_naive(times.creation) {
        section.insert(
            CREATION_DATE_FIELD.to_string(),
            created.format(CONTAINER_DATE_FORMAT).to_string(),
        );
    }
    if let Some(modified) = mac_epoch_to_naive(times.modification) {
        section.insert(
            MODIFIED_DATE_FIELD.to_string(),
            modified.format(CONTAINER_DATE_FORMAT).to_string(),
        );
    }
    Ok(section)
}

/// Only `moov/mvhd` is decoded. `ftyp` is optional (old QuickTime files lack
/// it) and tracks are skipped unparsed.
fn read_movie_header_times<R: Read + Seek>(
    reader: &mut R,
    size: u64,
) -> mp4::Result<Option<MovieHeaderTimes>> {
    let Some(moov) = seek_to_child(reader, size, BoxType::MoovBox)? else {
        return Ok(None);
    };
    let moov_end = box_start(reader)? + moov.size;
    if seek_to_child(reader, moov_end, BoxType::MvhdBox)?.is_none() {
        return Ok(None);
    }

    let (version, _flags) = read_box_header_ext(reader)?;
    let times = match version {
        0 => MovieHeaderTimes {
            creation: u64::from(read_u32(reader)?),
            modification: u64::from(read_u32(reader)?),
        },
        1 => MovieHeaderTimes {
            creation: read_u64(reader)?,
            modification: read_u64(reader)?,
        },
        _ => return Err(mp4::Error::InvalidData("mvhd version must be 0 or 1")),
    };
    Ok(Some(times))
}

/// Walks sibling boxes up to `end` and stops right after the header of the
/// first `wanted` box. A size of zero means "up to `end`".
fn seek_to_child<R: Read + Seek>(
    reader: &mut R,
    end: u64,
    wanted: BoxType,
) -> mp4::Result<Option<BoxHeader>> {
    let mut current = reader.stream_position()?;
    while current + HEADER_SIZE <= end {
        let header = BoxHeader::read(reader)?;
        let start = box_start(reader)?;
        let size = if header.size == 0 {
            end - start
        } else {
            header.size
        };
        if size < HEADER_SIZE {
            return Err(mp4::Error::InvalidData("box size too small"));
        }
        if header.name == wanted {
            return Ok(Some(BoxHeader::new(header.name, size)));
        }
        current = start + size;
        skip_bytes_to(reader, current)?;
    }
    Ok(None)
}

fn read_u32<R: Read>(reader: &mut R) -> mp4::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> mp4::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

/// Movie header times count seconds since 1904-01-01 00:00:00 UTC; zero means unset.
fn mac_epoch_to_naive(seconds: u64) -> Option<NaiveDateTime> {
    if seconds == 0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1904, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let seconds = i64::try_from(seconds).ok()?;
    epoch.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Parses a container date value.
///
/// Values with at least two hyphens are ISO-like (`2022-11-02T08:15:00+02:00`):
/// the `T` separator becomes a space and any `+...` or `Z` suffix is cut off
/// without converting the offset. Everything else is read as an EXIF-style
/// `YYYY:MM:DD HH:MM:SS` value.
pub fn parse_container_date(raw: &str) -> Result<NaiveDateTime, MetadataError> {
    if raw.matches('-').count() >= 2 {
        let spaced = raw.replace('T', " ");
        let without_offset = spaced.split('+').next().unwrap_or_default().trim();
        let cleaned = without_offset.split('Z').next().unwrap_or_default().trim();
        NaiveDateTime::parse_from_str(cleaned, CONTAINER_DATE_FORMAT).map_err(|_| {
            MetadataError::DateParse {
                value: raw.to_string(),
                format: CONTAINER_DATE_FORMAT,
            }
        })
    } else {
        NaiveDateTime::parse_from_str(raw, EXIF_DATE_FORMAT).map_err(|_| {
            MetadataError::DateParse {
                value: raw.to_string(),
                format: EXIF_DATE_FORMAT,
            }
        })
    }
}
