//! SQLite-backed document store.
//!
//! # Responsibility
//! - Implement the conditional-write contract on a migrated SQLite
//!   connection.
//!
//! # Invariants
//! - `create` relies on the primary-key constraint for its existence
//!   precondition; `update` relies on an exact revision match in the WHERE
//!   clause.
//! - `update` never touches `id` or `creation_timestamp`.
//! - Scan order is `(creation_timestamp, id)` ascending, matching the
//!   `idx_documents_creation_id` index.

use super::{DocumentStore, StoreError, StoreResult, Write};
use crate::db::migrations::latest_version;
use crate::model::document::{Cursor, Document};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};

const DOCUMENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    body,
    revision,
    creation_timestamp,
    update_timestamp
FROM documents";

/// Document store over a single migrated SQLite connection.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    /// Wraps a connection after verifying its schema is usable.
    ///
    /// # Errors
    /// - `UninitializedSchema` when migrations have not been applied or the
    ///   version does not match this binary.
    /// - `MissingTable` when the `documents` table is absent.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected = latest_version();
        if actual != expected {
            return Err(StoreError::UninitializedSchema {
                expected_version: expected,
                actual_version: actual,
            });
        }

        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'documents';",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            return Err(StoreError::MissingTable("documents"));
        }

        Ok(Self { conn })
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn create(&self, doc: &Document) -> StoreResult<Write> {
        let inserted = self.conn.execute(
            "INSERT INTO documents (
                id,
                title,
                description,
                body,
                revision,
                creation_timestamp,
                update_timestamp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                doc.id.as_str(),
                doc.title.as_str(),
                doc.description.as_str(),
                doc.body.as_str(),
                doc.revision,
                doc.creation_timestamp,
                doc.update_timestamp,
            ],
        );

        match inserted {
            Ok(_) => Ok(Write::Applied(doc.clone())),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Ok(Write::ConditionFailed)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, expected_revision: i64, doc: &Document) -> StoreResult<Write> {
        let mut stmt = self.conn.prepare(
            "UPDATE documents
             SET
                title = ?1,
                description = ?2,
                body = ?3,
                revision = ?4,
                update_timestamp = ?5
             WHERE id = ?6 AND revision = ?7
             RETURNING id, title, description, body, revision,
                       creation_timestamp, update_timestamp;",
        )?;

        let mut rows = stmt.query(params![
            doc.title.as_str(),
            doc.description.as_str(),
            doc.body.as_str(),
            doc.revision,
            doc.update_timestamp,
            doc.id.as_str(),
            expected_revision,
        ])?;

        match rows.next()? {
            Some(row) => Ok(Write::Applied(parse_document_row(row)?)),
            None => Ok(Write::ConditionFailed),
        }
    }

    fn get(&self, id: &str) -> StoreResult<Option<Document>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_document_row(row)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?1;", params![id])?;
        Ok(removed > 0)
    }

    fn scan(&self, fetch_size: usize, after: Option<&Cursor>) -> StoreResult<Vec<Document>> {
        let mut sql = DOCUMENT_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(cursor) = after {
            sql.push_str(" WHERE (creation_timestamp, id) > (?, ?)");
            bind_values.push(Value::Integer(cursor.creation_timestamp));
            bind_values.push(Value::Text(cursor.id.clone()));
        }

        sql.push_str(" ORDER BY creation_timestamp, id LIMIT ?");
        bind_values.push(Value::Integer(i64::try_from(fetch_size).unwrap_or(i64::MAX)));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }

        Ok(documents)
    }
}

fn parse_document_row(row: &Row<'_>) -> StoreResult<Document> {
    Ok(Document {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        body: row.get("body")?,
        revision: row.get("revision")?,
        creation_timestamp: row.get("creation_timestamp")?,
        update_timestamp: row.get("update_timestamp")?,
    })
}
