//! ファイルシステム抽象化
//!
//! レジストリが使用するファイルシステム操作の抽象化レイヤー。
//! テスト時に MockFs を注入してファイル操作をモック化できる。

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// ファイル種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsFileType {
    File,
    Dir,
    Symlink,
}

/// ファイルシステム抽象化のための独自 DirEntry
#[derive(Debug, Clone)]
pub struct FsDirEntry {
    pub path: PathBuf,
    pub file_type: FsFileType,
}

impl FsDirEntry {
    /// ディレクトリかどうか
    pub fn is_dir(&self) -> bool {
        self.file_type == FsFileType::Dir
    }

    /// ファイルかどうか
    pub fn is_file(&self) -> bool {
        self.file_type == FsFileType::File
    }

    /// ファイル名（UTF-8 変換不可の場合は None）
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// ファイルシステム操作を抽象化するトレイト
///
/// テスト時に MockFs を注入してファイル操作をモック化できる。
/// 本番コードでは RealFs を使用する。
pub trait FileSystem: Send + Sync {
    /// パスが存在するか（シンボリックリンク追従）
    fn exists(&self, path: &Path) -> bool;

    /// ディレクトリを再帰的に作成
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// ファイルサイズ（バイト）を取得
    fn file_len(&self, path: &Path) -> Result<u64>;

    /// ファイル内容を読み込み
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// ファイルに書き込み
    ///
    /// - 親ディレクトリは自動作成
    /// - 既存ファイルは上書き（パーミッションとシンボリックリンクは維持）
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;

    /// ディレクトリ直下のエントリを取得
    ///
    /// - ファイル名順にソート
    /// - シンボリックリンクはリンク先の種別で分類（リンク切れは Symlink）
    /// - 引数がディレクトリでない場合は Err
    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>>;

    /// ディレクトリ配下のすべてのファイルを列挙
    ///
    /// - トップダウン、各ディレクトリ内はファイルが先、その後サブディレクトリ（それぞれ名前順）
    /// - ディレクトリ自体は含まない
    /// - ファイルへのシンボリックリンクは含む。ディレクトリへのリンクは辿らない
    fn walk_files(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// 本番用ファイルシステム実装
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }

    fn file_len(&self, path: &Path) -> Result<u64> {
        Ok(std::fs::metadata(path)?.len())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        // 親ディレクトリを作成
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            // リンク先を辿って分類する
            let file_type = match std::fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_dir() => FsFileType::Dir,
                Ok(_) => FsFileType::File,
                Err(_) => FsFileType::Symlink,
            };
            entries.push(FsDirEntry {
                path: entry.path(),
                file_type,
            });
        }
        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }

    fn walk_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(path).sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if is_walked_file(&entry) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

fn is_walked_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[path = "fs_test.rs"]
mod tests;
