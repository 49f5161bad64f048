//! テスト用モックファイルシステム

use super::*;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// テスト用モックファイルシステム
///
/// パス文字列をキーとして保持する。キーは常にソートされている。
/// clone したインスタンスは同じ内容を共有する。
#[derive(Clone)]
pub struct MockFs {
    files: Arc<RwLock<BTreeMap<String, MockFile>>>,
}

struct MockFile {
    content: Vec<u8>,
    file_type: FsFileType,
}

fn not_found() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::NotFound, "not found")
}

fn dir_prefix(path: &Path) -> String {
    let path_str = path.to_string_lossy().to_string();
    if path_str.ends_with('/') {
        path_str
    } else {
        format!("{}/", path_str)
    }
}

impl MockFs {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// ファイルを追加
    pub fn add_file(&self, path: &str, content: &str) {
        self.files.write().unwrap().insert(
            path.to_string(),
            MockFile {
                content: content.as_bytes().to_vec(),
                file_type: FsFileType::File,
            },
        );
    }

    /// ディレクトリを追加
    pub fn add_dir(&self, path: &str) {
        self.files.write().unwrap().insert(
            path.trim_end_matches('/').to_string(),
            MockFile {
                content: Vec::new(),
                file_type: FsFileType::Dir,
            },
        );
    }

    /// ディレクトリかどうか
    pub fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.read().unwrap();
        match files.get(path.to_string_lossy().as_ref()) {
            Some(file) => file.file_type == FsFileType::Dir,
            // 配下にエントリがあれば暗黙のディレクトリ
            None => {
                let prefix = dir_prefix(path);
                files.keys().any(|k| k.starts_with(&prefix))
            }
        }
    }

    /// ファイル内容を取得（存在しなければ None）
    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .filter(|f| f.file_type == FsFileType::File)
            .map(|f| String::from_utf8_lossy(&f.content).to_string())
    }
}

impl Default for MockFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFs {
    fn exists(&self, path: &Path) -> bool {
        let files = self.files.read().unwrap();
        let prefix = dir_prefix(path);
        files.contains_key(path.to_string_lossy().as_ref())
            || files.keys().any(|k| k.starts_with(&prefix))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.add_dir(&path.to_string_lossy());
        Ok(())
    }

    fn file_len(&self, path: &Path) -> Result<u64> {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .map(|f| f.content.len() as u64)
            .ok_or_else(|| not_found().into())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path.to_string_lossy().as_ref())
            .filter(|f| f.file_type == FsFileType::File)
            .map(|f| String::from_utf8_lossy(&f.content).to_string())
            .ok_or_else(|| not_found().into())
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        self.files.write().unwrap().insert(
            path.to_string_lossy().to_string(),
            MockFile {
                content: content.to_vec(),
                file_type: FsFileType::File,
            },
        );
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FsDirEntry>> {
        if !self.is_dir(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                "Not a directory",
            )
            .into());
        }

        let prefix = dir_prefix(path);
        let files = self.files.read().unwrap();
        let mut children: BTreeMap<String, FsFileType> = BTreeMap::new();

        for (key, file) in files.iter() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((child, _)) => {
                    children.insert(child.to_string(), FsFileType::Dir);
                }
                None if !rest.is_empty() => {
                    children.entry(rest.to_string()).or_insert(file.file_type);
                }
                None => {}
            }
        }

        Ok(children
            .into_iter()
            .map(|(name, file_type)| FsDirEntry {
                path: path.join(name),
                file_type,
            })
            .collect())
    }

    fn walk_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(not_found().into());
        }

        // ファイルを先に、その後サブディレクトリを名前順に辿る
        let (dirs, files): (Vec<_>, Vec<_>) =
            self.read_dir(path)?.into_iter().partition(FsDirEntry::is_dir);
        let mut result: Vec<PathBuf> = files
            .into_iter()
            .filter(FsDirEntry::is_file)
            .map(|entry| entry.path)
            .collect();
        for dir in dirs {
            result.extend(self.walk_files(&dir.path)?);
        }
        Ok(result)
    }
}
