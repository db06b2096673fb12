// Error Types
// Failures surfaced by the project helpers; nothing is recovered internally

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

use crate::figure::FigureError;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read configuration file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no command given")]
    EmptyCommand,

    #[error("failed to launch `{command}`")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    /// No script identity was supplied to build a provenance string
    #[error("no entry-point script is known for this project context")]
    EntryPointUnavailable,

    #[error("failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to determine the running executable")]
    CurrentExe(#[source] std::io::Error),

    #[error("failed to create directory {}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid figure format {format:?}: expected an extension such as \".png\"")]
    InvalidFormat { format: String },

    #[error("failed to save figure {}", path.display())]
    FigureSave {
        path: PathBuf,
        #[source]
        source: FigureError,
    },
}
