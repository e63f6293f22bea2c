//! Storage file for the form page's saved state.
//!
//! One SQLite file plays the part of the browser's local storage: a single
//! `kv_entries` table keyed by the fixed store keys (`contractData`,
//! `loadedSignature`, ...). A page opens it once and hands the connection to
//! `SqliteKeyValueStore`.
//!
//! # Invariants
//! - The `kv_entries` table exists before a connection is returned.
//! - A file written by a newer build is refused rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
pub use rusqlite::Connection;

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or prepare the storage file.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open, configure or migrate the file.
    Sqlite(rusqlite::Error),
    /// The file's `kv_entries` layout comes from a newer build.
    NewerStoreLayout { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "form store: {err}"),
            Self::NewerStoreLayout { found, supported } => write!(
                f,
                "form store layout v{found} was written by a newer build (this build reads up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerStoreLayout { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
