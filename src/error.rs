use crate::format::FileFormat;
use std::path::PathBuf;
use thiserror::Error;

/// filebook 統一エラー型
#[derive(Debug, Error)]
pub enum FilebookError {
    #[error("Invalid name: names must not be empty")]
    InvalidName,

    #[error("'{name}' is already registered and override is disabled (attempted path: {})", .path.display())]
    NameConflict { name: String, path: PathBuf },

    #[error("Name not registered: {0}")]
    NameNotFound(String),

    #[error("Invalid {} content in '{name}' ({}): {source}", .source.format(), .path.display())]
    InvalidFormat {
        name: String,
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("Cannot write {content} content to '{name}' ({format} file)")]
    UnsupportedContent {
        name: String,
        format: FileFormat,
        content: &'static str,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// パース失敗の原因
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Csv(#[from] crate::csv::CsvError),
}

impl FormatError {
    /// 失敗したフォーマット
    pub fn format(&self) -> FileFormat {
        match self {
            FormatError::Json(_) => FileFormat::Json,
            FormatError::Yaml(_) => FileFormat::Yaml,
            FormatError::Csv(_) => FileFormat::Csv,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilebookError>;

impl FilebookError {
    /// 呼び出し側で回復可能なエラーかどうか
    ///
    /// 名前の衝突は override を有効にするか別名で再試行できる。
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FilebookError::NameConflict { .. })
    }
}
