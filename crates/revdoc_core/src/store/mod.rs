//! Versioned store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow conditional-write interface the service layer
//!   consumes.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - A lost write precondition is reported as the `Write::ConditionFailed`
//!   value, never as an error code callers have to inspect.
//! - Every other store failure is an error and treated as transient by the
//!   service layer.

use crate::db::DbError;
use crate::model::document::{Cursor, Document};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a conditional write.
///
/// `ConditionFailed` means the existence or revision precondition did not
/// hold at write time; whether that is a real conflict is decided by the
/// service layer's reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    /// The write landed; carries the document as stored.
    Applied(Document),
    ConditionFailed,
}

/// Store failures other than a failed write precondition.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Connection has no applied schema, or one from a different binary.
    UninitializedSchema {
        expected_version: u32,
        actual_version: u32,
    },
    MissingTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedSchema {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version is {actual_version}, expected {expected_version}; run migrations first"
            ),
            Self::MissingTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedSchema { .. } => None,
            Self::MissingTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Narrow versioned-store interface consumed by the service layer.
///
/// Implementations must guarantee atomic conditional writes: `create`
/// succeeds only if no document with the id exists, `update` only if the
/// stored revision equals `expected_revision` (a missing document counts as
/// a failed condition).
pub trait DocumentStore {
    fn create(&self, doc: &Document) -> StoreResult<Write>;
    fn update(&self, expected_revision: i64, doc: &Document) -> StoreResult<Write>;
    fn get(&self, id: &str) -> StoreResult<Option<Document>>;
    /// Returns whether a document was actually removed.
    fn delete(&self, id: &str) -> StoreResult<bool>;
    /// Returns up to `fetch_size` documents ordered by
    /// `(creation_timestamp, id)`, starting strictly after `after`.
    fn scan(&self, fetch_size: usize, after: Option<&Cursor>) -> StoreResult<Vec<Document>>;
}
