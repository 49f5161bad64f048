//! 保存操作
//!
//! すべての保存は既存ファイルを上書きする。

use super::load::invalid_format;
use super::Registry;
use crate::content::Content;
use crate::csv::{self, CsvOptions};
use crate::error::{FilebookError, Result};
use crate::format::FileFormat;
use serde::Serialize;
use std::fmt::Display;

/// smart_save のオプション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// CSV のヘッダー行
    pub headers: Vec<String>,
    pub csv: CsvOptions,
}

impl SaveOptions {
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }
}

impl Registry {
    /// 文字列をそのまま書き込み
    pub fn save_text(&mut self, name: &str, text: impl AsRef<str>) -> Result<()> {
        self.write_plain(name, text.as_ref())
    }

    /// 各要素を文字列化し、改行で結合して書き込み
    pub fn save_lines<I>(&mut self, name: &str, lines: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let text = lines
            .into_iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.write_plain(name, &text)
    }

    /// テキストとして書き込み
    ///
    /// JSON 配列は要素ごと、オブジェクトはキーごとに 1 行とする。
    /// 文字列以外のスカラーは JSON 表現で書き込む。
    pub fn save(&mut self, name: &str, content: &Content) -> Result<()> {
        let text = match content {
            Content::Text(text) => text.clone(),
            Content::Lines(lines) => lines.join("\n"),
            Content::Json(serde_json::Value::Array(items)) => {
                items.iter().map(json_part).collect::<Vec<_>>().join("\n")
            }
            Content::Json(serde_json::Value::Object(map)) => {
                map.keys().cloned().collect::<Vec<_>>().join("\n")
            }
            Content::Json(value) => json_part(value),
            Content::Csv(rows) => rows
                .iter()
                .map(|row| csv::encode_row(row.as_slice(), ','))
                .collect::<Vec<_>>()
                .join("\n"),
            Content::Yaml(_) | Content::YamlDocuments(_) => {
                return Err(FilebookError::UnsupportedContent {
                    name: name.to_string(),
                    format: FileFormat::PlainText,
                    content: content.kind(),
                });
            }
        };
        self.write_plain(name, &text)
    }

    /// JSON（2 スペースインデント）で書き込み
    pub fn json_save<T: Serialize + ?Sized>(&mut self, name: &str, data: &T) -> Result<()> {
        let path = self.begin(name, FileFormat::Json, "saving data to")?;
        let text = serde_json::to_string_pretty(data)
            .map_err(|e| invalid_format(name, path.clone(), e.into()))?;
        self.fs.write(&path, text.as_bytes())
    }

    /// 単一の YAML ドキュメントとして書き込み
    pub fn yaml_save<T: Serialize + ?Sized>(&mut self, name: &str, data: &T) -> Result<()> {
        let path = self.begin(name, FileFormat::Yaml, "saving data to")?;
        let text = serde_yaml::to_string(data)
            .map_err(|e| invalid_format(name, path.clone(), e.into()))?;
        self.fs.write(&path, text.as_bytes())
    }

    /// YAML ドキュメントストリームとして書き込み
    ///
    /// 各ドキュメントの前に `---` を置く。空のリストなら空ファイル。
    pub fn yaml_save_all<T: Serialize>(&mut self, name: &str, documents: &[T]) -> Result<()> {
        let path = self.begin(name, FileFormat::Yaml, "saving data to")?;

        let mut text = String::new();
        for document in documents {
            let rendered = serde_yaml::to_string(document)
                .map_err(|e| invalid_format(name, path.clone(), e.into()))?;
            text.push_str("---\n");
            text.push_str(&rendered);
        }
        self.fs.write(&path, text.as_bytes())
    }

    /// CSV として書き込み（区切り文字は `,`）
    ///
    /// 行が 0 件なら何もしない。ヘッダー行は常に先頭に書き込む。
    pub fn csv_save<R, F, H>(&mut self, name: &str, rows: &[R], headers: &[H]) -> Result<()>
    where
        R: AsRef<[F]>,
        F: AsRef<str>,
        H: AsRef<str>,
    {
        self.csv_save_with(name, rows, headers, &CsvOptions::default())
    }

    /// CSV として書き込み
    pub fn csv_save_with<R, F, H>(
        &mut self,
        name: &str,
        rows: &[R],
        headers: &[H],
        options: &CsvOptions,
    ) -> Result<()>
    where
        R: AsRef<[F]>,
        F: AsRef<str>,
        H: AsRef<str>,
    {
        let path = self.begin(name, FileFormat::Csv, "saving data to")?;
        if rows.is_empty() {
            return Ok(());
        }

        let text = std::iter::once(csv::encode_row(headers, options.separator))
            .chain(
                rows.iter()
                    .map(|row| csv::encode_row(row.as_ref(), options.separator)),
            )
            .collect::<Vec<_>>()
            .join("\n");
        self.fs.write(&path, text.as_bytes())
    }

    /// 登録時のフォーマットで書き込み（デフォルトオプション）
    pub fn smart_save(&mut self, name: &str, content: &Content) -> Result<()> {
        self.smart_save_with(name, content, &SaveOptions::default())
    }

    /// 登録時のフォーマットで書き込み
    pub fn smart_save_with(
        &mut self,
        name: &str,
        content: &Content,
        options: &SaveOptions,
    ) -> Result<()> {
        match (self.format_of(name)?, content) {
            (FileFormat::Yaml, Content::YamlDocuments(documents)) => {
                self.yaml_save_all(name, documents)
            }
            (FileFormat::Yaml, _) => self.yaml_save(name, content),
            (FileFormat::Json, _) => self.json_save(name, content),
            (FileFormat::Csv, Content::Csv(rows)) => {
                self.csv_save_with(name, rows.as_slice(), options.headers.as_slice(), &options.csv)
            }
            (FileFormat::Csv, _) => Err(FilebookError::UnsupportedContent {
                name: name.to_string(),
                format: FileFormat::Csv,
                content: content.kind(),
            }),
            (FileFormat::PlainText, _) => self.save(name, content),
        }
    }

    fn write_plain(&mut self, name: &str, text: &str) -> Result<()> {
        let path = self.begin(name, FileFormat::PlainText, "saving data to")?;
        self.fs.write(&path, text.as_bytes())
    }
}

fn json_part(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "save_test.rs"]
mod tests;
