use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic", "dng"];
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionClassifier {
    image: Vec<String>,
    video: Vec<String>,
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS, DEFAULT_VIDEO_EXTENSIONS)
    }
}

impl ExtensionClassifier {
    pub fn new<I, V>(image: &[I], video: &[V]) -> Self
    where
        I: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            image: image.iter().map(|v| normalize_extension(v.as_ref())).collect(),
            video: video.iter().map(|v| normalize_extension(v.as_ref())).collect(),
        }
    }

    pub fn classify(&self, extension: &str) -> MediaKind {
        let normalized = normalize_extension(extension);
        if normalized.is_empty() {
            return MediaKind::Unclassified;
        }
        if self.image.contains(&normalized) {
            MediaKind::Image
        } else if self.video.contains(&normalized) {
            MediaKind::Video
        } else {
            MediaKind::Unclassified
        }
    }
}

/// Lowercases an extension and drops a leading dot: `".JPG"` -> `"jpg"`.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Extension as written on disk, including the leading dot. Empty if none.
    /// Kept as raw OS bytes so non-UTF-8 extensions survive a rename.
    pub extension: OsString,
    pub kind: MediaKind,
}

impl FileEntry {
    pub fn new(path: PathBuf, classifier: &ExtensionClassifier) -> Self {
        let extension = extension_with_dot(&path);
        let kind = classifier.classify(&extension.to_string_lossy());
        Self {
            path,
            extension,
            kind,
        }
    }
}

fn extension_with_dot(path: &Path) -> OsString {
    let mut out = OsString::new();
    if let Some(ext) = path.extension() {
        out.push(".");
        out.push(ext);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive() {
        let classifier = ExtensionClassifier::default();
        assert_eq!(classifier.classify(".JPG"), MediaKind::Image);
        assert_eq!(classifier.classify(".Heic"), MediaKind::Image);
        assert_eq!(classifier.classify(".MOV"), MediaKind::Video);
        assert_eq!(classifier.classify(".mp4"), MediaKind::Video);
        assert_eq!(classifier.classify(".txt"), MediaKind::Unclassified);
        assert_eq!(classifier.classify(""), MediaKind::Unclassified);
    }

    #[test]
    fn custom_lists_accept_dotted_and_upper_case_entries() {
        let classifier = ExtensionClassifier::new(&[".ARW"], &["mkv"]);
        assert_eq!(classifier.classify(".arw"), MediaKind::Image);
        assert_eq!(classifier.classify(".MKV"), MediaKind::Video);
        assert_eq!(classifier.classify(".jpg"), MediaKind::Unclassified);
    }

    #[test]
    fn file_entry_keeps_original_extension_case() {
        let entry = FileEntry::new(
            PathBuf::from("/tmp/IMG_0001.JPG"),
            &ExtensionClassifier::default(),
        );
        assert_eq!(entry.extension, ".JPG");
        assert_eq!(entry.kind, MediaKind::Image);
    }

    #[test]
    fn file_entry_without_extension_is_unclassified() {
        let classifier = ExtensionClassifier::default();
        let entry = FileEntry::new(PathBuf::from("/tmp/README"), &classifier);
        assert_eq!(entry.extension, "");
        assert_eq!(entry.kind, MediaKind::Unclassified);

        let dotfile = FileEntry::new(PathBuf::from("/tmp/.jpg"), &classifier);
        assert_eq!(dotfile.extension, "");
        assert_eq!(dotfile.kind, MediaKind::Unclassified);
    }
}
