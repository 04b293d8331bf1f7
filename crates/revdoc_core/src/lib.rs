//! Core domain logic for the revdoc versioned document store.
//! This crate is the single source of truth for concurrency invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Cursor, Document, Page};
pub use model::result::{Entity, OperationResult, StatusCode};
pub use service::{DocumentService, DEFAULT_PAGE_SIZE};
pub use store::{DocumentStore, SqliteDocumentStore, StoreError, StoreResult, Write};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
