use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("'{}' could not be found", .path.display())]
    FileMissing { path: PathBuf },

    #[error("'{}' already exists", .path.display())]
    FileExists { path: PathBuf },

    #[error("Catalog error: {0}")]
    CatalogLoad(String),

    #[error("Could not find '{primary}' or '{fallback}'")]
    ExecutableMissing { primary: String, fallback: String },

    #[error("Unknown server '{0}'")]
    UnknownServer(String),

    #[error("Unknown update channel '{0}'")]
    UnknownUpdateChannel(String),

    #[error("Invalid server: {0}")]
    InvalidServer(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Launch error: {0}")]
    Launch(String),
}

pub type Result<T> = std::result::Result<T, LauncherError>;

impl LauncherError {
    /// Maps an IO failure on `path`, turning `NotFound` into `FileMissing`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            LauncherError::FileMissing {
                path: path.to_path_buf(),
            }
        } else {
            LauncherError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// True for failures caused by the current selection or the files on disk,
    /// as opposed to the launcher itself misbehaving.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, LauncherError::Io { .. } | LauncherError::CatalogLoad(_))
    }
}
