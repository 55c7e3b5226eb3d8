//! Driver error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the batch driver.
///
/// The scan/render core never fails; everything here is I/O or path
/// plumbing, reported distinctly so callers can tell a missing file
/// from a conversion producing empty output.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot derive a module name from {}", .0.display())]
    NoModuleName(PathBuf),
}

impl DriverError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DriverError::Io {
            path: path.into(),
            source,
        }
    }
}
