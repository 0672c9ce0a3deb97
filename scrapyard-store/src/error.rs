use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Copying {0:?} to {1:?} failed")]
    CopyFailed(PathBuf, PathBuf, #[source] std::io::Error),
    #[error("Copy of {0:?} holds {2} bytes, expected {1}")]
    CopyVerificationFailed(PathBuf, u64, u64),
    #[error("Creating directory {0:?} failed")]
    DirectoryCreationFailed(PathBuf, #[source] std::io::Error),
    #[error("Reading {0:?} failed")]
    EntryReadFailed(PathBuf, #[source] std::io::Error),
    #[error("Removing {0:?} failed")]
    EntryRemovalFailed(PathBuf, #[source] std::io::Error),
    #[error("Home directory could not be resolved")]
    HomeDirectoryNotResolved,
    #[error("Encoding index records failed")]
    IndexEncodeFailed(#[from] csv::Error),
    #[error("Reading index {0:?} failed")]
    IndexReadFailed(PathBuf, #[source] std::io::Error),
    #[error("Writing index {0:?} failed")]
    IndexWriteFailed(PathBuf, #[source] std::io::Error),
    #[error("Path {0:?} has no usable file name")]
    InvalidSourcePath(PathBuf),
    #[error("Moving {0:?} to {1:?} failed")]
    MoveFailed(PathBuf, PathBuf, #[source] std::io::Error),
    #[error("Path {0:?} is not valid unicode")]
    NonUnicodePath(PathBuf),
    #[error("Path {0:?} is already inside the yard")]
    SourceInsideYard(PathBuf),
    #[error("No origin recorded for {0}")]
    UnknownOrigin(String),
}
