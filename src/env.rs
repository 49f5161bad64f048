/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.is_empty())
    }

    /// 真偽値として取得
    ///
    /// `1` / `true` / `yes` / `on` を true、`0` / `false` / `no` / `off` を false とする
    /// （大文字小文字は区別しない）。未設定・空・それ以外の値は None。
    pub fn get_bool(key: &str) -> Option<bool> {
        let value = Self::get(key)?;
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "env_test.rs"]
mod tests;
