//! Core orchestration services.
//!
//! # Responsibility
//! - Compose validation, conditional writes, conflict reconciliation and
//!   pagination into the public document operations.
//! - Keep transport layers decoupled from storage details.
//!
//! # Invariants
//! - Every operation returns an `OperationResult` value; nothing in this
//!   layer panics or propagates store errors upward.

mod conflict;
pub mod document_service;
mod pagination;

pub use document_service::{DocumentService, DEFAULT_PAGE_SIZE};
