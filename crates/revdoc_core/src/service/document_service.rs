//! Document use-case service.
//!
//! # Responsibility
//! - Provide the five document operations (create, update, delete, get,
//!   list) over an injected store.
//! - Assign server-side timestamps and revisions before writes.
//!
//! # Invariants
//! - Each operation is a single linear pass with one branch point: the
//!   conditional-write outcome. No retries happen here; a 409 is the
//!   caller's cue to re-base and resubmit.
//! - Caller-supplied timestamps are never trusted.

use crate::model::document::{Cursor, Document};
use crate::model::result::{Entity, OperationResult};
use crate::service::conflict::{resolve_condition_failure, WritePath};
use crate::service::pagination::build_page;
use crate::store::{DocumentStore, Write};
use log::{error, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Documents returned per list page unless overridden.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Use-case service for versioned document operations.
///
/// The store handle is constructed once at process start and injected;
/// the service holds no other state and no locks. Concurrent writers race
/// at the store's conditional writes, and the loser ends up in
/// reconciliation.
pub struct DocumentService<S: DocumentStore> {
    store: S,
    page_size: usize,
}

impl<S: DocumentStore> DocumentService<S> {
    /// Creates a service with the default page size.
    pub fn new(store: S) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// Creates a service with an explicit page size.
    pub fn with_page_size(store: S, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// Creates a new document.
    ///
    /// Both timestamps are stamped server-side from one clock reading. A
    /// failed existence precondition goes through reconciliation and
    /// resolves to 200 (idempotent retry) or 409 (true conflict).
    pub fn create(&self, mut doc: Document) -> OperationResult {
        let errors = doc.validate();
        if !errors.is_empty() {
            return OperationResult::invalid(Entity::Document(doc), errors);
        }

        let now = unix_now();
        doc.creation_timestamp = now;
        doc.update_timestamp = now;

        match self.store.create(&doc) {
            Ok(Write::Applied(stored)) => OperationResult::ok(Entity::Document(stored)),
            Ok(Write::ConditionFailed) => {
                warn!(
                    "event=doc_create module=service status=condition_failed id={}",
                    doc.id
                );
                resolve_condition_failure(&self.store, doc, WritePath::Create)
            }
            Err(err) => {
                error!(
                    "event=doc_create module=service status=error id={} error={err}",
                    doc.id
                );
                OperationResult::internal(Entity::Document(doc))
            }
        }
    }

    /// Updates an existing document using its `revision` as the
    /// optimistic-concurrency token.
    ///
    /// The caller sends the revision it read; the write succeeds only if
    /// the store still holds exactly that revision, and the stored document
    /// then advances to `revision + 1`.
    pub fn update(&self, mut doc: Document) -> OperationResult {
        let errors = doc.validate();
        if !errors.is_empty() {
            return OperationResult::invalid(Entity::Document(doc), errors);
        }

        doc.update_timestamp = unix_now();
        let expected_revision = doc.revision;
        doc.revision = expected_revision + 1;

        match self.store.update(expected_revision, &doc) {
            Ok(Write::Applied(stored)) => OperationResult::ok(Entity::Document(stored)),
            Ok(Write::ConditionFailed) => {
                warn!(
                    "event=doc_update module=service status=condition_failed id={} expected_revision={expected_revision}",
                    doc.id
                );
                resolve_condition_failure(&self.store, doc, WritePath::Update)
            }
            Err(err) => {
                error!(
                    "event=doc_update module=service status=error id={} error={err}",
                    doc.id
                );
                OperationResult::internal(Entity::Document(doc))
            }
        }
    }

    /// Deletes a document by id.
    pub fn delete(&self, id: &str) -> OperationResult {
        match self.store.delete(id) {
            Ok(true) => OperationResult::ok(Entity::Id(id.to_string())),
            Ok(false) => OperationResult::not_found(Entity::Id(id.to_string())),
            Err(err) => {
                error!("event=doc_delete module=service status=error id={id} error={err}");
                OperationResult::internal(Entity::Id(id.to_string()))
            }
        }
    }

    /// Fetches a document by id.
    pub fn get(&self, id: &str) -> OperationResult {
        match self.store.get(id) {
            Ok(Some(doc)) => OperationResult::ok(Entity::Document(doc)),
            Ok(None) => OperationResult::not_found(Entity::Id(id.to_string())),
            Err(err) => {
                error!("event=doc_get module=service status=error id={id} error={err}");
                OperationResult::internal(Entity::Id(id.to_string()))
            }
        }
    }

    /// Lists the first page of documents.
    pub fn list_first(&self) -> OperationResult {
        self.list(None)
    }

    /// Lists the page following `cursor`.
    ///
    /// A cursor with a blank id cannot mark a pagination boundary and is
    /// rejected as invalid input.
    pub fn list_after(&self, cursor: &Cursor) -> OperationResult {
        if cursor.id.trim().is_empty() {
            return OperationResult::invalid(
                Entity::None,
                vec!["The cursor is invalid.".to_string()],
            );
        }
        self.list(Some(cursor))
    }

    fn list(&self, after: Option<&Cursor>) -> OperationResult {
        // Fetch one extra row so "has next page" needs no second round trip.
        match self.store.scan(self.page_size + 1, after) {
            Ok(documents) => OperationResult::ok(Entity::Page(build_page(documents, self.page_size))),
            Err(err) => {
                error!("event=doc_list module=service status=error error={err}");
                OperationResult::internal(Entity::None)
            }
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs() as i64)
}
