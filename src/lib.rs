//! filebook
//!
//! 論理名でファイルを登録し、テキスト / JSON / YAML / CSV として読み書きする。
//!
//! ```no_run
//! use filebook::{Registry, RegistryConfig};
//!
//! # fn main() -> filebook::Result<()> {
//! let mut registry = Registry::with_config(RegistryConfig::from_env());
//! registry.register("settings.json", "data", Some("settings"))?;
//! registry.json_save("settings", &serde_json::json!({ "k": 1 }))?;
//! let value: serde_json::Value = registry.json_load("settings")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod csv;
pub mod env;
pub mod error;
pub mod format;
pub mod fs;
pub mod registry;

pub use config::RegistryConfig;
pub use content::Content;
pub use csv::{BlankLines, CsvOptions};
pub use error::{FilebookError, FormatError, Result};
pub use format::FileFormat;
pub use fs::{FileSystem, RealFs};
pub use registry::{
    Entry, FileState, LoadOptions, RegisterOutcome, Registration, Registry, SaveOptions,
};
