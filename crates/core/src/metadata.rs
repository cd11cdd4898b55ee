use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat tag name -> raw string value mapping produced by the metadata readers.
pub type TagMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    ImageExif,
    VideoContainer,
    FilesystemTimes,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaptureTime {
    pub timestamp: NaiveDateTime,
    pub source: DateSource,
}

impl CaptureTime {
    pub fn new(timestamp: NaiveDateTime, source: DateSource) -> Self {
        Self { timestamp, source }
    }
}

/// Returns the value of the first key in `keys` that is present in `values`.
///
/// Later keys are never consulted once an earlier one is found, even if its
/// value turns out to be unusable.
pub fn first_present<'a>(values: &'a TagMap, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| values.get(*key))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::{first_present, TagMap};

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_present_follows_key_order_not_map_order() {
        let values = tags(&[("a", "first"), ("z", "last")]);
        assert_eq!(first_present(&values, &["z", "a"]), Some("last"));
        assert_eq!(first_present(&values, &["a", "z"]), Some("first"));
    }

    #[test]
    fn first_present_skips_missing_keys() {
        let values = tags(&[("DateTime", "2020:01:01 00:00:00")]);
        assert_eq!(
            first_present(&values, &["DateTimeOriginal", "DateTimeDigitized", "DateTime"]),
            Some("2020:01:01 00:00:00")
        );
        assert_eq!(first_present(&values, &["Missing"]), None);
    }

    #[test]
    fn first_present_returns_empty_value_as_present() {
        let values = tags(&[("DateTimeOriginal", ""), ("DateTime", "2020:01:01 00:00:00")]);
        assert_eq!(
            first_present(&values, &["DateTimeOriginal", "DateTime"]),
            Some("")
        );
    }
}
