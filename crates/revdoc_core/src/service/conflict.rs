//! Reconciliation of failed conditional writes.
//!
//! # Responsibility
//! - Decide whether a lost write precondition was an idempotent retry of an
//!   already-applied write or a genuine conflict.
//!
//! # Invariants
//! - Server-assigned fields (timestamps, and the revision on the update
//!   path) are normalized to the stored values before comparing, so only
//!   caller intent participates in the equality check.
//! - A conflict always carries the authoritative stored document when one
//!   exists, never the caller's candidate.

use crate::model::document::Document;
use crate::model::result::{Entity, OperationResult};
use crate::store::DocumentStore;
use log::error;

/// Which write produced the failed condition. The update path additionally
/// treats `revision` as server-assigned during comparison, because the
/// orchestrator bumped it before the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WritePath {
    Create,
    Update,
}

/// Re-reads the stored document and classifies the failed write.
///
/// A failed precondition is ambiguous: either someone else wrote a
/// different value, or the caller's own write already landed and this is a
/// retry (e.g. after a network timeout). Comparing the candidate against
/// the stored document with server-assigned fields normalized makes the
/// distinction deterministic.
pub(crate) fn resolve_condition_failure<S: DocumentStore>(
    store: &S,
    mut candidate: Document,
    path: WritePath,
) -> OperationResult {
    let stored = match store.get(&candidate.id) {
        Ok(stored) => stored,
        Err(err) => {
            error!(
                "event=conflict_reread module=service status=error id={} error={err}",
                candidate.id
            );
            // No stored-state claim can be made; hand back the caller's
            // input as best effort.
            return OperationResult::internal(Entity::Document(candidate));
        }
    };

    let Some(stored) = stored else {
        // Gone between the failed write and the re-read; nothing
        // authoritative to return.
        return OperationResult::conflict(Entity::None);
    };

    candidate.creation_timestamp = stored.creation_timestamp;
    candidate.update_timestamp = stored.update_timestamp;
    if path == WritePath::Update {
        candidate.revision = stored.revision;
    }

    if candidate == stored {
        OperationResult::ok(Entity::Document(stored))
    } else {
        OperationResult::conflict(Entity::Document(stored))
    }
}
