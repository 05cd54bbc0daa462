use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The resolved store file does not exist.
    ///
    /// Raised by every operation that requires an existing file; the file
    /// is never created on this path.
    #[error("unable to locate .env store in {}", .dir.display())]
    StoreNotFound { dir: PathBuf },

    #[error(transparent)]
    Malformed(#[from] MalformedLineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A line without a `KEY=VALUE` separator.
///
/// Aborts the whole parse; no partial result is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed line {line}: missing `=` separator")]
pub struct MalformedLineError {
    /// 1-based line number in the input.
    pub line: u32,
}
