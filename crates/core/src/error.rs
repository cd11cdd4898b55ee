use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("メタデータ読み込み対象を開けませんでした: {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("メタデータを解析できませんでした: {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    #[error("日時を解釈できませんでした: {value:?} (形式 {format})")]
    DateParse { value: String, format: &'static str },
}

impl MetadataError {
    pub(crate) fn unreadable(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
