//! CSV レコードの読み書き
//!
//! 行はフィールドの列として扱う。保存時は区切り文字で結合し、
//! 区切り文字・引用符・改行・前後の空白を含むフィールドを引用符で囲む。
//! 読み込み時は引用符の外側の改行でレコードを分割し、各レコードの前後の空白を除去する。

use thiserror::Error;

/// 空行の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    /// 空行は空文字列 1 フィールドの行になる
    #[default]
    Keep,
    /// 空行を読み飛ばす
    Skip,
}

/// CSV 読み込み/保存オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// 先頭行をヘッダーとして読み飛ばす
    pub headers: bool,
    /// フィールド区切り文字
    pub separator: char,
    pub blank_lines: BlankLines,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            headers: true,
            separator: ',',
            blank_lines: BlankLines::Keep,
        }
    }
}

impl CsvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダー行の有無を設定
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    /// 区切り文字を設定
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// 空行を読み飛ばす
    pub fn skip_blank_lines(mut self) -> Self {
        self.blank_lines = BlankLines::Skip;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("unterminated quoted field in record {record}")]
    UnterminatedQuote { record: usize },
}

/// テキスト全体を行（フィールドの列）に変換
pub fn parse(text: &str, options: &CsvOptions) -> Result<Vec<Vec<String>>, CsvError> {
    let records = split_records(text, options.separator)?;
    let skip = usize::from(options.headers);

    Ok(records
        .into_iter()
        .skip(skip)
        .filter(|record| options.blank_lines == BlankLines::Keep || !record.is_empty())
        .map(|record| parse_record(record, options.separator))
        .collect())
}

/// 1 行をエンコード
///
/// フィールドのない行は空行になり、読み込み時は `BlankLines::Keep` なら `[""]`、
/// `BlankLines::Skip` なら読み飛ばされる。
pub fn encode_row<S: AsRef<str>>(fields: &[S], separator: char) -> String {
    // 空文字列 1 フィールドだけの行は空行と区別する
    if let [only] = fields {
        if only.as_ref().is_empty() {
            return "\"\"".to_string();
        }
    }

    let last = fields.len().saturating_sub(1);
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let field = field.as_ref();
            // 空白の区切り文字ではレコードの trim で端の空フィールドが消える
            if field.is_empty() && separator.is_whitespace() && (i == 0 || i == last) {
                "\"\"".to_string()
            } else {
                encode_field(field, separator)
            }
        })
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

fn encode_field(field: &str, separator: char) -> String {
    let needs_quote = field.contains(separator)
        || field.contains(['"', '\n', '\r'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace);

    if needs_quote {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 引用符の外側の改行でレコードを分割し、前後の空白を除去
///
/// 末尾の改行の後ろは空レコードとして数えない。
fn split_records(text: &str, separator: char) -> Result<Vec<&str>, CsvError> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut record_started = false;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if in_quotes {
            if c == '"' {
                if matches!(chars.peek(), Some((_, '"'))) {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }

        match c {
            '\n' => {
                records.push(text[start..i].trim());
                start = i + 1;
                at_field_start = true;
                record_started = false;
            }
            c if c == separator => {
                at_field_start = true;
                record_started = true;
            }
            // 先頭の空白はレコードの trim で消えるため、フィールド開始位置を維持する
            c if c.is_whitespace() && !record_started => {}
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
                record_started = true;
            }
            _ => {
                at_field_start = false;
                record_started = true;
            }
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote {
            record: records.len() + 1,
        });
    }
    if start < text.len() {
        records.push(text[start..].trim());
    }

    Ok(records)
}

fn parse_record(record: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }

        if c == '"' && at_field_start {
            in_quotes = true;
            at_field_start = false;
        } else if c == separator {
            fields.push(std::mem::take(&mut current));
            at_field_start = true;
        } else {
            current.push(c);
            at_field_start = false;
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
#[path = "csv_test.rs"]
mod tests;
