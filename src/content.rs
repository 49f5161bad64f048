//! smart_load / smart_save で受け渡すデータ

use serde::Serialize;

/// フォーマットに応じて読み込んだ（または保存する）データ
///
/// シリアライズ時は中身だけを出力する（タグなし）。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// ファイル全体の文字列
    Text(String),
    /// 行の列
    Lines(Vec<String>),
    Json(serde_json::Value),
    /// 単一の YAML ドキュメント
    Yaml(serde_yaml::Value),
    /// YAML ドキュメントストリーム
    YamlDocuments(Vec<serde_yaml::Value>),
    /// CSV の行（ヘッダーを除く）
    Csv(Vec<Vec<String>>),
}

impl Content {
    /// エラーメッセージ用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Text(_) => "text",
            Content::Lines(_) => "lines",
            Content::Json(_) => "JSON",
            Content::Yaml(_) => "YAML",
            Content::YamlDocuments(_) => "YAML stream",
            Content::Csv(_) => "CSV",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            Content::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Content::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_yaml_documents(&self) -> Option<&[serde_yaml::Value]> {
        match self {
            Content::YamlDocuments(documents) => Some(documents),
            _ => None,
        }
    }

    pub fn as_csv(&self) -> Option<&[Vec<String>]> {
        match self {
            Content::Csv(rows) => Some(rows),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Content::Json(value)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}
