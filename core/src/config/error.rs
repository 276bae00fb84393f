use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading and saving timer definition files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read timer file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse timer TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read timer directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write timer file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize timers to TOML")]
    Serialize(#[source] toml::ser::Error),
}
