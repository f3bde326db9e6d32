use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileCollectError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed at {path}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Root directory not found: {}", .path.display())]
    RootNotFound { path: PathBuf },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for FileCollectError {
    fn user_message(&self) -> String {
        match self {
            FileCollectError::Io(e) => format!("File operation failed: {}", e),
            FileCollectError::Walk { path, source } => {
                format!("Failed to read {}: {}", path, source)
            }
            FileCollectError::RootNotFound { path } => {
                format!("Root directory does not exist: {}", path.display())
            }
            FileCollectError::InvalidPath { path } => format!("Invalid path: {}", path),
            FileCollectError::Config { message } => format!("Configuration error: {}", message),
            FileCollectError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            FileCollectError::RootNotFound { .. } => Some(
                "Pass an existing directory as the first argument (e.g., filecollect ./my-project)".to_string()
            ),
            FileCollectError::InvalidPath { .. } => Some(
                "Make sure the root path points to a directory, not a file.".to_string()
            ),
            FileCollectError::Config { .. } => Some(
                "Check your configuration file syntax or generate a fresh one with --generate-config.".to_string()
            ),
            FileCollectError::Permission { .. } => Some(
                "Ensure you have read access to every file under the root and write access to the output location.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for FileCollectError {
    fn from(error: walkdir::Error) -> Self {
        let path = error
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if error
            .io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
        {
            return FileCollectError::Permission { path };
        }

        FileCollectError::Walk {
            path,
            source: error,
        }
    }
}

impl From<toml::de::Error> for FileCollectError {
    fn from(error: toml::de::Error) -> Self {
        FileCollectError::Config {
            message: error.to_string(),
        }
    }
}

impl FileCollectError {
    /// Process exit code reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FileCollectError::Config { .. } => 2,
            FileCollectError::RootNotFound { .. } | FileCollectError::InvalidPath { .. } => 3,
            FileCollectError::Permission { .. } => 7,
            FileCollectError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => 7,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FileCollectError>;
