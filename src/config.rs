//! レジストリ設定

use crate::env::EnvVar;

/// override を有効にする環境変数
pub const OVERRIDE_ENV: &str = "FILEBOOK_OVERRIDE";
/// 読み書きのたびにデバッグログを出す環境変数
pub const VERBOSE_ENV: &str = "FILEBOOK_VERBOSE";

/// レジストリ設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// 登録済みの名前を別のパスで再登録できる
    pub allow_override: bool,
    /// ファイルの読み書きを debug レベルで記録する
    pub verbose: bool,
}

impl RegistryConfig {
    /// 新しい設定を作成（すべて無効）
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数から設定を作成
    ///
    /// 未設定・解釈できない値は false。
    pub fn from_env() -> Self {
        Self {
            allow_override: EnvVar::get_bool(OVERRIDE_ENV).unwrap_or(false),
            verbose: EnvVar::get_bool(VERBOSE_ENV).unwrap_or(false),
        }
    }

    /// override を設定
    pub fn with_override(mut self, allow_override: bool) -> Self {
        self.allow_override = allow_override;
        self
    }

    /// verbose を設定
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
