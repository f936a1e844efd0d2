//! Errors raised while loading `.agent-gallery/`.

use std::path::PathBuf;
use thiserror::Error;

/// Every variant names the file or directory that caused it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// `config.toml` is not valid TOML or has wrongly typed keys.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A `.yaml` entrypoint definition could not be deserialized.
    #[error("Failed to parse entrypoint definition at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A `.md` entrypoint has no front matter, or front matter that does
    /// not describe an entrypoint.
    #[error("Failed to parse Markdown front matter in {path}: {reason}")]
    MarkdownParse { path: PathBuf, reason: String },

    #[error("Failed to list entrypoints in {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// The env file named by `env-file` exists but is malformed.
    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    /// Parsed fine but violates a rule such as unique entrypoint names.
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
