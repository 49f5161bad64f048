//! ファイルレジストリ
//!
//! 論理名 → ファイルパスの対応を管理する。
//!
//! - 一度登録した名前は override が無効な限り別のパスに付け替えられない
//! - 同じパスでの再登録は何もしない（冪等）
//! - フォーマットは登録時に拡張子から決定し、smart_load / smart_save の振り分けに使う
//! - 読み書きのたびに最後に使ったフォーマットを記録する（診断用）

mod load;
mod save;

pub use load::LoadOptions;
pub use save::SaveOptions;

use crate::config::RegistryConfig;
use crate::error::{FilebookError, Result};
use crate::format::FileFormat;
use crate::fs::{FileSystem, RealFs};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// 登録エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub format: FileFormat,
}

/// 登録操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Added,
    /// 同じパスで登録済み
    Unchanged,
    /// override により付け替えた
    Overridden { previous: PathBuf },
}

/// 登録結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub path: PathBuf,
    pub outcome: RegisterOutcome,
}

/// ファイルの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Absent,
    Empty,
    NonEmpty,
}

/// ファイルレジストリ
pub struct Registry {
    config: RegistryConfig,
    fs: Box<dyn FileSystem>,
    entries: IndexMap<String, Entry>,
    /// 名前ごとに最後に使ったフォーマット
    file_types: HashMap<String, FileFormat>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// デフォルト設定で作成
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_fs(config, Box::new(RealFs))
    }

    /// ファイルシステムを指定して作成（テスト用）
    pub fn with_fs(config: RegistryConfig, fs: Box<dyn FileSystem>) -> Self {
        Self {
            config,
            fs,
            entries: IndexMap::new(),
            file_types: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// override を切り替え
    pub fn set_override(&mut self, allow_override: bool) {
        self.config.allow_override = allow_override;
    }

    /// ファイルを登録
    ///
    /// パスは `directory` と `name` を結合したもの。ディレクトリが存在しなければ
    /// 親も含めて作成する。`alias` を指定すると同じパスを別名でも登録する。
    ///
    /// # Errors
    /// - `name` が空の場合は `InvalidName`
    /// - 別のパスで登録済みかつ override が無効な場合は `NameConflict`
    pub fn register(
        &mut self,
        name: &str,
        directory: impl AsRef<Path>,
        alias: Option<&str>,
    ) -> Result<Registration> {
        if name.is_empty() {
            return Err(FilebookError::InvalidName);
        }

        let directory = directory.as_ref();
        let path = directory.join(name);

        let outcome = match self.entries.get(name) {
            Some(entry) if entry.path == path => {
                return Ok(Registration {
                    path: entry.path.clone(),
                    outcome: RegisterOutcome::Unchanged,
                });
            }
            Some(_) if !self.config.allow_override => {
                return Err(FilebookError::NameConflict {
                    name: name.to_string(),
                    path,
                });
            }
            Some(entry) => {
                warn!(
                    "'{}' already exists and is pointing to '{}'... Overriding with '{}'.",
                    name,
                    entry.path.display(),
                    path.display()
                );
                RegisterOutcome::Overridden {
                    previous: entry.path.clone(),
                }
            }
            None => RegisterOutcome::Added,
        };

        if !directory.as_os_str().is_empty() && !self.fs.exists(directory) {
            self.fs.create_dir_all(directory)?;
        }

        let entry = Entry {
            format: FileFormat::from_path(&path),
            path: path.clone(),
        };

        self.entries.insert(name.to_string(), entry.clone());

        if let Some(alias) = alias.filter(|a| !a.is_empty()) {
            if let Some(existing) = self.entries.get(alias) {
                if existing.path != path {
                    warn!(
                        "alias '{}' moved from '{}' to '{}'",
                        alias,
                        existing.path.display(),
                        path.display()
                    );
                }
            }
            self.entries.insert(alias.to_string(), entry);
        }

        Ok(Registration { path, outcome })
    }

    /// 登録済みのパスを取得
    pub fn path(&self, name: &str) -> Result<&Path> {
        Ok(&self.entry(name)?.path)
    }

    /// 登録済みかどうか（ファイルの存在とは無関係）
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// 登録時に決定したフォーマット
    pub fn format_of(&self, name: &str) -> Result<FileFormat> {
        Ok(self.entry(name)?.format)
    }

    /// 最後の読み書きで使ったフォーマット
    pub fn last_format(&self, name: &str) -> Option<FileFormat> {
        self.file_types.get(name).copied()
    }

    /// 登録パスにファイル（またはディレクトリ）が存在するか
    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.fs.exists(self.path(name)?))
    }

    /// ファイルの状態（存在しない / 空 / 中身あり）
    pub fn file_state(&self, name: &str) -> Result<FileState> {
        let path = self.path(name)?;
        if !self.fs.exists(path) {
            return Ok(FileState::Absent);
        }
        Ok(match self.fs.file_len(path)? {
            0 => FileState::Empty,
            _ => FileState::NonEmpty,
        })
    }

    /// ファイルが存在し、かつ 0 バイトか
    ///
    /// 存在しない場合も false を返す。区別が必要なら [`Registry::file_state`] を使う。
    pub fn is_file_empty(&self, name: &str) -> Result<bool> {
        Ok(self.file_state(name)? == FileState::Empty)
    }

    /// 登録数（別名を含む）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 登録順の名前一覧
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// 登録順の (名前, パス) 一覧
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.path.as_path()))
    }

    /// すべての登録を削除
    pub fn clear(&mut self) {
        self.entries.clear();
        self.file_types.clear();
    }

    /// ディレクトリ内のファイルをまとめて登録
    ///
    /// 各ファイルはファイル名で登録し、拡張子を除いた名前が異なる場合は別名にもする。
    /// `recursive` の場合はサブディレクトリ配下もすべて登録する。異なるディレクトリに
    /// 同名のファイルがあると同じ名前になるため、override が無効なら `NameConflict` になる。
    ///
    /// # Returns
    /// 見つかったファイル名の一覧（再帰時は重複あり）
    pub fn scan_directory(
        &mut self,
        directory: impl AsRef<Path>,
        recursive: bool,
    ) -> Result<Vec<String>> {
        let directory = directory.as_ref();

        let files: Vec<(PathBuf, String)> = if recursive {
            self.fs
                .walk_files(directory)?
                .into_iter()
                .filter_map(|path| {
                    let parent = path.parent()?.to_path_buf();
                    let file_name = path.file_name()?.to_str()?.to_string();
                    Some((parent, file_name))
                })
                .collect()
        } else {
            self.fs
                .read_dir(directory)?
                .into_iter()
                .filter(|entry| entry.is_file())
                .filter_map(|entry| Some((directory.to_path_buf(), entry.file_name()?.to_string())))
                .collect()
        };

        let mut names = Vec::with_capacity(files.len());
        for (parent, file_name) in files {
            let alias = derived_alias(&file_name);
            self.register(&file_name, &parent, alias)?;
            names.push(file_name);
        }

        debug!(
            "registered {} file(s) from '{}'",
            names.len(),
            directory.display()
        );
        Ok(names)
    }

    fn entry(&self, name: &str) -> Result<&Entry> {
        self.entries
            .get(name)
            .ok_or_else(|| FilebookError::NameNotFound(name.to_string()))
    }

    /// 読み書き前の共通処理: パス解決・フォーマット記録・ログ
    fn begin(&mut self, name: &str, format: FileFormat, action: &str) -> Result<PathBuf> {
        let path = self.entry(name)?.path.clone();
        self.file_types.insert(name.to_string(), format);

        if self.config.verbose {
            debug!("{} {} ({})", action, path.display(), format);
        } else {
            trace!("{} {} ({})", action, path.display(), format);
        }

        Ok(path)
    }
}

/// 拡張子を除いた別名（除去しても変わらない場合は None）
fn derived_alias(file_name: &str) -> Option<&str> {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| *stem != file_name)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
