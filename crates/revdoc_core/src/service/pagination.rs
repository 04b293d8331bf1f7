//! Page assembly for forward scans.
//!
//! # Responsibility
//! - Turn an over-fetched scan result into a bounded page plus
//!   continuation cursor.
//!
//! # Invariants
//! - Callers fetch `page_size + 1` rows; the extra row only signals that a
//!   next page exists and is never returned.
//! - The cursor always points at the last retained document.

use crate::model::document::{Cursor, Document, Page};

/// Builds a page from a scan result fetched with `page_size + 1`.
///
/// More than `page_size` rows means a next page exists: the result is
/// truncated and the cursor set to the last retained document's sort key.
/// Otherwise the zero cursor signals exhaustion.
pub(crate) fn build_page(mut documents: Vec<Document>, page_size: usize) -> Page {
    if documents.len() <= page_size {
        return Page {
            documents,
            cursor: Cursor::default(),
        };
    }

    documents.truncate(page_size);
    let cursor = documents.last().map(Cursor::after).unwrap_or_default();
    Page { documents, cursor }
}
