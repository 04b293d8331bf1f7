//! Document record, pagination cursor and page shapes.
//!
//! # Responsibility
//! - Define the canonical document record shared by store and service.
//! - Provide declarative field validation independent of persisted state.
//!
//! # Invariants
//! - `id` is immutable after creation and never reused.
//! - `creation_timestamp` / `update_timestamp` are server-assigned; caller
//!   values are overwritten before any write.
//! - Validation is pure: duplicate-id detection belongs to the store's
//!   conditional create, not to `validate`.

use serde::{Deserialize, Serialize};

/// Upper bound for short text fields (`id`, `title`, `description`).
const MAX_SHORT_FIELD_CHARS: usize = 250;

/// Canonical versioned document record.
///
/// External JSON naming is camelCase to match the wire schema consumed by
/// the transport adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Caller-supplied primary key, immutable after creation.
    pub id: String,
    pub title: String,
    pub description: String,
    pub body: String,
    /// Optimistic-concurrency token. Starts at 1, +1 per successful update.
    pub revision: i64,
    /// Unix seconds, server-assigned on create.
    pub creation_timestamp: i64,
    /// Unix seconds, server-assigned on every write.
    pub update_timestamp: i64,
}

impl Document {
    /// Checks declarative field rules and returns one message per violation.
    ///
    /// An empty result means the document is valid. Rules are
    /// required-field and max-length only; nothing here consults the store.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value, max_chars) in self.text_rules() {
            if value.is_empty() {
                errors.push(format!("The {name} is required."));
            } else if let Some(max) = max_chars {
                if value.chars().count() > max {
                    errors.push(format!("The {name} may have up to {max} characters."));
                }
            }
        }

        // `revision` is caller-supplied on create; the zero value counts
        // as missing, same as an absent required field.
        if self.revision < 1 {
            errors.push("The revision is required.".to_string());
        }

        errors
    }

    /// Rule table: field label, current value, optional max length.
    fn text_rules(&self) -> [(&'static str, &str, Option<usize>); 4] {
        [
            ("id", self.id.as_str(), Some(MAX_SHORT_FIELD_CHARS)),
            ("title", self.title.as_str(), Some(MAX_SHORT_FIELD_CHARS)),
            (
                "description",
                self.description.as_str(),
                Some(MAX_SHORT_FIELD_CHARS),
            ),
            ("body", self.body.as_str(), None),
        ]
    }
}

/// Forward-pagination token: the `(creation_timestamp, id)` sort key of the
/// last item on the previous page.
///
/// The zero value (`Cursor::default()`) means "no more pages".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub id: String,
    pub creation_timestamp: i64,
}

impl Cursor {
    /// Builds the continuation token pointing at `doc`.
    pub fn after(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            creation_timestamp: doc.creation_timestamp,
        }
    }

    /// Returns whether this is the zero "no more pages" cursor.
    pub fn is_exhausted(&self) -> bool {
        self.id.is_empty() && self.creation_timestamp == 0
    }
}

/// One bounded page of documents plus the continuation cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub documents: Vec<Document>,
    pub cursor: Cursor,
}

#[cfg(test)]
mod tests {
    use super::{Cursor, Document};

    fn valid_document() -> Document {
        Document {
            id: "post-1".to_string(),
            title: "First post".to_string(),
            description: "Intro".to_string(),
            body: "Hello.".to_string(),
            revision: 1,
            creation_timestamp: 0,
            update_timestamp: 0,
        }
    }

    #[test]
    fn valid_document_has_no_errors() {
        assert!(valid_document().validate().is_empty());
    }

    #[test]
    fn empty_document_reports_every_required_field() {
        let errors = Document::default().validate();

        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&"The id is required.".to_string()));
        assert!(errors.contains(&"The title is required.".to_string()));
        assert!(errors.contains(&"The description is required.".to_string()));
        assert!(errors.contains(&"The body is required.".to_string()));
        assert!(errors.contains(&"The revision is required.".to_string()));
    }

    #[test]
    fn overlong_short_field_is_rejected() {
        let mut doc = valid_document();
        doc.title = "x".repeat(251);

        let errors = doc.validate();
        assert_eq!(
            errors,
            vec!["The title may have up to 250 characters.".to_string()]
        );
    }

    #[test]
    fn body_has_no_max_length() {
        let mut doc = valid_document();
        doc.body = "x".repeat(100_000);
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn zero_revision_counts_as_missing() {
        let mut doc = valid_document();
        doc.revision = 0;
        assert_eq!(doc.validate(), vec!["The revision is required.".to_string()]);
    }

    #[test]
    fn cursor_zero_value_is_exhausted() {
        assert!(Cursor::default().is_exhausted());
        assert!(!Cursor::after(&valid_document()).is_exhausted());
    }

    #[test]
    fn document_serializes_with_camel_case_names() {
        let json = serde_json::to_value(valid_document()).unwrap();
        assert!(json.get("creationTimestamp").is_some());
        assert!(json.get("updateTimestamp").is_some());
        assert!(json.get("creation_timestamp").is_none());
    }
}
