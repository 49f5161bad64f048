//! 読み込み操作

use super::Registry;
use crate::content::Content;
use crate::csv::{self, CsvOptions};
use crate::error::{FilebookError, FormatError, Result};
use crate::format::FileFormat;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// smart_load のオプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// テキストを行に分割する
    pub split: bool,
    /// 各行の前後の空白を除去する
    pub strip: bool,
    /// YAML をドキュメントストリームとして読む
    pub multi_document: bool,
    pub csv: CsvOptions,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            split: true,
            strip: true,
            multi_document: true,
            csv: CsvOptions::default(),
        }
    }
}

impl Registry {
    /// テキストとして読み込み
    ///
    /// `split` なら行の列（`strip` でなければ改行を含む）、そうでなければ全体を 1 つの文字列で返す。
    pub fn load(&mut self, name: &str, split: bool, strip: bool) -> Result<Content> {
        let path = self.begin(name, FileFormat::PlainText, "loading")?;
        let text = normalize_newlines(self.fs.read_to_string(&path)?);

        if !split {
            return Ok(Content::Text(text));
        }
        Ok(Content::Lines(split_lines(&text, strip)))
    }

    /// 前後の空白を除去した行の列として読み込み
    pub fn load_lines(&mut self, name: &str) -> Result<Vec<String>> {
        let path = self.begin(name, FileFormat::PlainText, "loading")?;
        let text = normalize_newlines(self.fs.read_to_string(&path)?);
        Ok(split_lines(&text, true))
    }

    /// ファイル全体を文字列として読み込み
    pub fn load_text(&mut self, name: &str) -> Result<String> {
        let path = self.begin(name, FileFormat::PlainText, "loading")?;
        Ok(normalize_newlines(self.fs.read_to_string(&path)?))
    }

    /// JSON として読み込み
    ///
    /// 0 バイトのファイルは空オブジェクト `{}` として扱う。
    pub fn json_load<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        let path = self.begin(name, FileFormat::Json, "loading")?;
        let text = self.fs.read_to_string(&path)?;

        let parsed = if text.is_empty() {
            serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
        } else {
            serde_json::from_str(&text)
        };
        parsed.map_err(|e| invalid_format(name, path, e.into()))
    }

    /// YAML ドキュメントストリームとして読み込み
    ///
    /// ドキュメントが 1 つでも常にリストを返す。空白とコメントだけのファイルは空リスト。
    pub fn yaml_load<T: DeserializeOwned>(&mut self, name: &str) -> Result<Vec<T>> {
        let path = self.begin(name, FileFormat::Yaml, "loading")?;
        let text = self.fs.read_to_string(&path)?;

        if !has_yaml_content(&text) {
            return Ok(Vec::new());
        }

        serde_yaml::Deserializer::from_str(&text)
            .map(|document| {
                T::deserialize(document).map_err(|e| invalid_format(name, path.clone(), e.into()))
            })
            .collect()
    }

    /// 単一の YAML ドキュメントとして読み込み
    pub fn yaml_load_one<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        let path = self.begin(name, FileFormat::Yaml, "loading")?;
        let text = self.fs.read_to_string(&path)?;

        serde_yaml::from_str(&text).map_err(|e| invalid_format(name, path, e.into()))
    }

    /// CSV として読み込み
    ///
    /// 0 バイトのファイルは空リスト。
    pub fn csv_load(&mut self, name: &str, options: &CsvOptions) -> Result<Vec<Vec<String>>> {
        let path = self.begin(name, FileFormat::Csv, "loading")?;
        if self.fs.file_len(&path)? == 0 {
            return Ok(Vec::new());
        }

        let text = self.fs.read_to_string(&path)?;
        csv::parse(&text, options).map_err(|e| invalid_format(name, path, e.into()))
    }

    /// 登録時のフォーマットで読み込み（デフォルトオプション）
    pub fn smart_load(&mut self, name: &str) -> Result<Content> {
        self.smart_load_with(name, &LoadOptions::default())
    }

    /// 登録時のフォーマットで読み込み
    pub fn smart_load_with(&mut self, name: &str, options: &LoadOptions) -> Result<Content> {
        match self.format_of(name)? {
            FileFormat::Yaml if options.multi_document => {
                Ok(Content::YamlDocuments(self.yaml_load(name)?))
            }
            FileFormat::Yaml => Ok(Content::Yaml(self.yaml_load_one(name)?)),
            FileFormat::Json => Ok(Content::Json(self.json_load(name)?)),
            FileFormat::Csv => Ok(Content::Csv(self.csv_load(name, &options.csv)?)),
            FileFormat::PlainText => self.load(name, options.split, options.strip),
        }
    }
}

/// 改行コードを `\n` に揃える（`\r\n` と単独の `\r`）
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// コメントと空行以外の行があるか
///
/// ドキュメント区切り `---` も内容として数える（空ドキュメントを 1 つ生む）。
fn has_yaml_content(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

fn split_lines(text: &str, strip: bool) -> Vec<String> {
    text.split_inclusive('\n')
        .map(|line| if strip { line.trim() } else { line })
        .map(String::from)
        .collect()
}

pub(super) fn invalid_format(name: &str, path: PathBuf, source: FormatError) -> FilebookError {
    FilebookError::InvalidFormat {
        name: name.to_string(),
        path,
        source,
    }
}

#[cfg(test)]
#[path = "load_test.rs"]
mod tests;
