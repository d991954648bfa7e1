use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading the input tables at startup.
///
/// All of these are fatal: the server must not start with a partially built index.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: PathBuf, column: &'static str },
}

pub type Result<T> = std::result::Result<T, LoadError>;

impl LoadError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: impl AsRef<Path>, source: csv::Error) -> Self {
        LoadError::Csv {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn missing_column(path: impl AsRef<Path>, column: &'static str) -> Self {
        LoadError::MissingColumn {
            path: path.as_ref().to_path_buf(),
            column,
        }
    }
}
