//! End-to-end pagination over the SQLite store.

use revdoc_core::db::open_db_in_memory;
use revdoc_core::{
    Cursor, Document, DocumentService, DocumentStore, Entity, Page, SqliteDocumentStore,
    StatusCode,
};
use rusqlite::Connection;

const PAGE_SIZE: usize = 3;

fn seed(conn: &Connection, count: usize) {
    let store = SqliteDocumentStore::try_new(conn).unwrap();
    for i in 0..count {
        let doc = Document {
            id: format!("post-{i:03}"),
            title: format!("title {i}"),
            description: "descr".to_string(),
            body: "body".to_string(),
            revision: 1,
            creation_timestamp: 1000 + i as i64,
            update_timestamp: 1000 + i as i64,
        };
        store.create(&doc).unwrap();
    }
}

fn service(conn: &Connection) -> DocumentService<SqliteDocumentStore<'_>> {
    DocumentService::with_page_size(SqliteDocumentStore::try_new(conn).unwrap(), PAGE_SIZE)
}

fn entity_page(entity: Entity) -> Page {
    match entity {
        Entity::Page(page) => page,
        other => panic!("expected a page entity, got {other:?}"),
    }
}

#[test]
fn empty_store_lists_an_empty_exhausted_page() {
    let conn = open_db_in_memory().unwrap();
    let result = service(&conn).list_first();

    assert_eq!(result.status_code, StatusCode::Ok);
    let page = entity_page(result.entity);
    assert!(page.documents.is_empty());
    assert!(page.cursor.is_exhausted());
}

#[test]
fn exactly_one_page_of_documents_needs_no_cursor() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, PAGE_SIZE);

    let page = entity_page(service(&conn).list_first().entity);

    assert_eq!(page.documents.len(), PAGE_SIZE);
    assert!(page.cursor.is_exhausted());
}

#[test]
fn one_extra_document_produces_a_cursor_at_the_last_retained_row() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, PAGE_SIZE + 1);
    let svc = service(&conn);

    let first = entity_page(svc.list_first().entity);
    assert_eq!(first.documents.len(), PAGE_SIZE);
    let last_retained = first.documents.last().unwrap();
    assert_eq!(first.cursor.id, last_retained.id);
    assert_eq!(
        first.cursor.creation_timestamp,
        last_retained.creation_timestamp
    );

    let rest = entity_page(svc.list_after(&first.cursor).entity);
    assert_eq!(rest.documents.len(), 1);
    assert_eq!(rest.documents[0].id, format!("post-{:03}", PAGE_SIZE));
    assert!(rest.cursor.is_exhausted());
}

#[test]
fn pages_walk_the_whole_set_in_order_without_duplicates() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, 8);
    let svc = service(&conn);

    let mut ids = Vec::new();
    let mut page = entity_page(svc.list_first().entity);
    loop {
        ids.extend(page.documents.iter().map(|d| d.id.clone()));
        if page.cursor.is_exhausted() {
            break;
        }
        page = entity_page(svc.list_after(&page.cursor).entity);
    }

    let expected: Vec<String> = (0..8).map(|i| format!("post-{i:03}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn blank_cursor_input_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, 2);

    let result = service(&conn).list_after(&Cursor::default());

    assert_eq!(result.status_code, StatusCode::BadRequest);
    assert_eq!(result.errors, vec!["The cursor is invalid.".to_string()]);

    let whitespace = Cursor {
        id: "   ".to_string(),
        creation_timestamp: 500,
    };
    let result = service(&conn).list_after(&whitespace);
    assert_eq!(result.status_code, StatusCode::BadRequest);
}

#[test]
fn cursor_past_the_end_yields_an_empty_page() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, 2);

    let cursor = Cursor {
        id: "post-001".to_string(),
        creation_timestamp: 1001,
    };
    let page = entity_page(service(&conn).list_after(&cursor).entity);

    assert!(page.documents.is_empty());
    assert!(page.cursor.is_exhausted());
}
