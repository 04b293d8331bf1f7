//! Uniform operation result envelope.
//!
//! # Responsibility
//! - Define the value every service operation returns: entity, error
//!   messages and a closed set of status codes.
//!
//! # Invariants
//! - Service operations never raise across the core boundary; all four
//!   failure kinds (validation, not-found, conflict, transient store
//!   failure) arrive as `OperationResult` values.

use crate::model::document::{Document, Page};
use serde::ser::Serializer;
use serde::Serialize;

/// Closed set of status codes a service operation can produce.
///
/// Serialized as the bare number so the transport adapter can forward it
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl StatusCode {
    /// Numeric wire value.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// Payload of an operation result.
///
/// `None` is used when no authoritative entity exists, e.g. a conflict
/// whose stored document vanished between the failed write and the
/// reconciliation re-read. Serializes untagged (`None` becomes `null`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Document(Document),
    Page(Page),
    Id(String),
    None,
}

/// Result value returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub entity: Entity,
    pub errors: Vec<String>,
    pub status_code: StatusCode,
}

impl OperationResult {
    /// Successful operation carrying its entity.
    pub fn ok(entity: Entity) -> Self {
        Self {
            entity,
            errors: Vec::new(),
            status_code: StatusCode::Ok,
        }
    }

    /// Validation failure with the full list of violated rules.
    pub fn invalid(entity: Entity, errors: Vec<String>) -> Self {
        Self {
            entity,
            errors,
            status_code: StatusCode::BadRequest,
        }
    }

    /// Target `id` does not exist.
    pub fn not_found(entity: Entity) -> Self {
        Self {
            entity,
            errors: Vec::new(),
            status_code: StatusCode::NotFound,
        }
    }

    /// Conditional write lost against a different stored value; the entity
    /// is the authoritative stored document when one exists.
    pub fn conflict(entity: Entity) -> Self {
        Self {
            entity,
            errors: Vec::new(),
            status_code: StatusCode::Conflict,
        }
    }

    /// Transient store failure; detail stays in the logs.
    pub fn internal(entity: Entity) -> Self {
        Self {
            entity,
            errors: Vec::new(),
            status_code: StatusCode::Internal,
        }
    }
}
