//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `APP_*` env vars (nested keys separated by `__`, so
//! `APP_INDEX__MAX_VOCAB_SIZE=300` sets `index.max_vocab_size`). Provides
//! helpers to expand `~` and `${VAR}` and to resolve relative paths against a
//! known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::data_processor::ChunkingConfig;
use crate::error::{Error, Result};

pub const DEFAULT_SOURCE_DIR: &str = "data/raw";
pub const DEFAULT_OUTPUT_DIR: &str = "index/faiss";
pub const DEFAULT_MAX_VOCAB_SIZE: usize = 200;
pub const DEFAULT_CHUNK_WINDOW_SIZE: usize = 50;
pub const DEFAULT_CHUNK_STRIDE: usize = 40;

/// Settings for one index build, read from the `[index]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub max_vocab_size: usize,
    pub chunk_window_size: usize,
    pub chunk_stride: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_vocab_size: DEFAULT_MAX_VOCAB_SIZE,
            chunk_window_size: DEFAULT_CHUNK_WINDOW_SIZE,
            chunk_stride: DEFAULT_CHUNK_STRIDE,
        }
    }
}

impl IndexConfig {
    /// Rejects window settings the chunker cannot honour.
    ///
    /// A stride wider than the window would skip the words between windows,
    /// so it is refused rather than silently dropping text.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_window_size == 0 {
            return Err(Error::InvalidConfig("chunk_window_size must be at least 1".into()));
        }
        if self.chunk_stride == 0 {
            return Err(Error::InvalidConfig("chunk_stride must be at least 1".into()));
        }
        if self.chunk_stride > self.chunk_window_size {
            return Err(Error::InvalidConfig(format!(
                "chunk_stride ({}) must not exceed chunk_window_size ({})",
                self.chunk_stride, self.chunk_window_size
            )));
        }
        Ok(())
    }

    pub fn chunking(&self) -> ChunkingConfig {
        ChunkingConfig { window_size: self.chunk_window_size, stride: self.chunk_stride }
    }

    /// Expands both directories and anchors relative ones at `base`.
    #[must_use]
    pub fn resolved(mut self, base: &Path) -> Self {
        self.source_directory = resolve_with_base(base, self.source_directory.to_string_lossy());
        self.output_directory = resolve_with_base(base, self.output_directory.to_string_lossy());
        self
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        let base_dir = env::current_dir().map_err(|e| Error::io(Path::new("."), e))?;
        Ok(Self::from_figment(Self::figment_for_env(&env_name), base_dir))
    }

    pub fn from_figment(figment: Figment, base_dir: PathBuf) -> Self {
        Self { figment, base_dir }
    }

    fn figment_for_env(env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::default("index", IndexConfig::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment.merge(Env::prefixed("APP_").split("__"))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment.extract_inner(key).map_err(|e| Error::Config(Box::new(e)))
    }

    /// The validated `[index]` section with paths resolved against the
    /// directory the configuration was loaded from.
    pub fn index(&self) -> Result<IndexConfig> {
        let index: IndexConfig = self.get("index")?;
        index.validate()?;
        Ok(index.resolved(&self.base_dir))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
