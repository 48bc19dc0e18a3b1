// src/error.rs
//! Error handling for todo.

#![deny(missing_docs)]

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// TodoResult is alias for anyhow
pub type TodoResult<T> = anyhow::Result<T>;

/// The mode a store file was being opened in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Create or truncate (init).
    Create,
    /// Read (load).
    Read,
    /// Append a single record.
    Append,
    /// Truncate and write the whole list back.
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Access::Create => "create",
            Access::Read => "read",
            Access::Append => "append to",
            Access::Write => "write",
        };
        f.write_str(s)
    }
}

/// Failures reported by store operations and the dispatcher.
///
/// None of these abort the process; each ends in a printed notice.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The global scope was requested but the home directory variable is unset.
    #[error("home directory is not set (${var})")]
    HomeUnset {
        /// Name of the environment variable that was consulted.
        var: &'static str,
    },

    /// The backing file could not be opened in the requested mode.
    #[error("could not {access} {}: {source}", .path.display())]
    Unavailable {
        /// Path of the backing file.
        path: PathBuf,
        /// What we were trying to do.
        access: Access,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An index outside `0..len`.
    #[error("no such item: {index} (list has {len} entries)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of entries in the loaded list.
        len: usize,
    },

    /// An unknown command, a missing argument or a rejected index token.
    #[error("{0}")]
    InvalidArgument(String),
}

impl StoreError {
    /// Wrap an I/O failure on `path`.
    pub fn unavailable(path: impl Into<PathBuf>, access: Access, source: io::Error) -> Self {
        StoreError::Unavailable {
            path: path.into(),
            access,
            source,
        }
    }
}
