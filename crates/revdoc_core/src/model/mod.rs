//! Domain model for versioned documents.
//!
//! # Responsibility
//! - Define the canonical document record and its field validation rules.
//! - Define the pagination types (`Cursor`, `Page`) and the uniform
//!   operation result envelope.
//!
//! # Invariants
//! - Every document is identified by a caller-supplied stable `id`.
//! - `revision` is the optimistic-concurrency token; it starts at 1 and
//!   moves by exactly 1 per successful update.

pub mod document;
pub mod result;
