//! ファイルフォーマット判定
//!
//! 登録時にパスの拡張子から一度だけフォーマットを決定する。
//! 拡張子の比較は大文字小文字を区別する完全一致。

use std::fmt;
use std::path::Path;

/// ファイルフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    PlainText,
    Json,
    Yaml,
    Csv,
}

impl FileFormat {
    /// パスの拡張子からフォーマットを判定
    ///
    /// `.json` / `.yaml` / `.csv` 以外（`.yml`、`.JSON`、拡張子なしを含む）は PlainText。
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => FileFormat::Json,
            Some("yaml") => FileFormat::Yaml,
            Some("csv") => FileFormat::Csv,
            _ => FileFormat::PlainText,
        }
    }

    /// 診断用のタグ名
    pub fn tag(&self) -> &'static str {
        match self {
            FileFormat::PlainText => "normal",
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
