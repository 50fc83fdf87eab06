use bookshelf_core::{
    AddOutcome, Book, BookId, CatalogStore, DeleteOutcome, SearchOutcome, UpdateStatusOutcome,
};
use rusqlite::Connection;
use std::collections::HashSet;
use tempfile::TempDir;

fn temp_store() -> (TempDir, CatalogStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("library.sqlite3"));
    (dir, store)
}

fn added_id(outcome: AddOutcome) -> BookId {
    match outcome {
        AddOutcome::Added(id) => id,
        other => panic!("expected Added, got {other:?}"),
    }
}

fn found(outcome: SearchOutcome) -> Vec<Book> {
    match outcome {
        SearchOutcome::Found(books) => books,
        other => panic!("expected Found, got {other:?}"),
    }
}

#[test]
fn list_all_on_fresh_store_is_empty() {
    let (_dir, store) = temp_store();
    assert!(store.list_all().is_empty());
    assert!(store.try_list_all().unwrap().is_empty());
}

#[test]
fn list_all_is_stable_without_writes() {
    let (_dir, store) = temp_store();
    added_id(store.add(&Book::new("Dune", "Herbert", 1965)));
    added_id(store.add(&Book::new("Solaris", "Lem", 1961)));

    let first: HashSet<_> = store.list_all().into_iter().map(|b| b.id).collect();
    let second: HashSet<_> = store.list_all().into_iter().map(|b| b.id).collect();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn adding_same_triple_twice_is_rejected() {
    let (_dir, store) = temp_store();
    let book = Book::new("Dune", "Herbert", 1965);

    added_id(store.add(&book));
    assert_eq!(store.add(&book), AddOutcome::Duplicate);

    let matching = store
        .list_all()
        .into_iter()
        .filter(|b| b.title == "Dune" && b.author == "Herbert" && b.year == 1965)
        .count();
    assert_eq!(matching, 1);
}

#[test]
fn different_year_is_not_a_duplicate() {
    let (_dir, store) = temp_store();
    added_id(store.add(&Book::new("Dune", "Herbert", 1965)));
    added_id(store.add(&Book::new("Dune", "Herbert", 1990)));
    assert_eq!(store.list_all().len(), 2);
}

#[test]
fn add_ignores_caller_supplied_id() {
    let (_dir, store) = temp_store();
    let mut book = Book::new("Dune", "Herbert", 1965);
    book.id = Some(999);

    let id = added_id(store.add(&book));
    assert_ne!(id, 999);
    assert_eq!(store.list_all()[0].id, Some(id));
}

#[test]
fn delete_is_terminal() {
    let (_dir, store) = temp_store();
    let id = added_id(store.add(&Book::new("Dune", "Herbert", 1965)));

    assert_eq!(store.delete(id), DeleteOutcome::Deleted(id));
    assert_eq!(store.delete(id), DeleteOutcome::NotFound(id));
    assert!(store.list_all().iter().all(|b| b.id != Some(id)));
}

#[test]
fn delete_missing_id_leaves_store_unchanged() {
    let (_dir, store) = temp_store();
    added_id(store.add(&Book::new("Dune", "Herbert", 1965)));

    assert_eq!(store.delete(404), DeleteOutcome::NotFound(404));
    assert_eq!(store.list_all().len(), 1);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let (_dir, store) = temp_store();
    let first = added_id(store.add(&Book::new("Dune", "Herbert", 1965)));
    assert_eq!(store.delete(first), DeleteOutcome::Deleted(first));

    let second = added_id(store.add(&Book::new("Dune", "Herbert", 1965)));
    assert!(second > first);
}

#[test]
fn update_status_changes_only_status() {
    let (_dir, store) = temp_store();
    let id = added_id(store.add(&Book::new("Dune", "Herbert", 1965)));
    let before = store.list_all().remove(0);

    assert_eq!(
        store.update_status(id, "checked-out"),
        UpdateStatusOutcome::Updated {
            id,
            status: "checked-out".to_string()
        }
    );

    let after = store.list_all().remove(0);
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, before.title);
    assert_eq!(after.author, before.author);
    assert_eq!(after.year, before.year);
    assert_eq!(after.status.as_deref(), Some("checked-out"));
}

#[test]
fn update_status_accepts_free_text() {
    let (_dir, store) = temp_store();
    let id = added_id(store.add(&Book::new("Dune", "Herbert", 1965)));

    assert!(matches!(
        store.update_status(id, "at the bindery"),
        UpdateStatusOutcome::Updated { .. }
    ));
    assert_eq!(
        store.list_all()[0].status.as_deref(),
        Some("at the bindery")
    );
}

#[test]
fn update_status_missing_id_is_not_found() {
    let (_dir, store) = temp_store();
    assert_eq!(
        store.update_status(7, "checked-out"),
        UpdateStatusOutcome::NotFound(7)
    );
}

#[test]
fn search_matches_title_author_and_year() {
    let (_dir, store) = temp_store();
    let id = added_id(store.add(&Book::new("Dune", "Herbert", 1965)));
    added_id(store.add(&Book::new("Solaris", "Lem", 1961)));

    for query in ["Dune", "Herbert", "1965", "une", "herb"] {
        let books = found(store.search(query));
        assert_eq!(books.len(), 1, "query {query}");
        assert_eq!(books[0].id, Some(id), "query {query}");
    }

    assert_eq!(store.search("nonexistent-zzz"), SearchOutcome::Empty);
}

#[test]
fn search_returns_every_match() {
    let (_dir, store) = temp_store();
    added_id(store.add(&Book::new("Foundation", "Asimov", 1951)));
    added_id(store.add(&Book::new("Foundation and Empire", "Asimov", 1952)));
    added_id(store.add(&Book::new("Dune", "Herbert", 1965)));

    let books = found(store.search("Foundation"));
    assert_eq!(books.len(), 2);
    assert!(books.iter().all(|b| b.author == "Asimov"));
}

#[test]
fn search_treats_wildcards_literally() {
    let (_dir, store) = temp_store();
    added_id(store.add(&Book::new("100% Rust", "Crab", 2020)));
    added_id(store.add(&Book::new("Plain Title", "Somebody", 2021)));

    let books = found(store.search("%"));
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "100% Rust");
    assert_eq!(store.search("_"), SearchOutcome::Empty);
}

#[test]
fn null_status_rows_read_back_as_unspecified() {
    let (dir, store) = temp_store();
    // Create the table through the store first.
    assert!(store.list_all().is_empty());

    let conn = Connection::open(dir.path().join("library.sqlite3")).unwrap();
    conn.execute(
        "INSERT INTO library (title, author, year) VALUES ('Legacy', 'Unknown', 1900);",
        [],
    )
    .unwrap();
    drop(conn);

    let books = store.list_all();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].status, None);
    assert_eq!(books[0].status_label(), "Not specified");
}

#[test]
fn unreachable_store_fails_soft_for_list_and_hard_for_try_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = CatalogStore::new(dir.path().join("no-such-dir").join("library.sqlite3"));

    assert!(store.list_all().is_empty());
    assert!(store.try_list_all().is_err());
    assert!(matches!(store.search("Dune"), SearchOutcome::Failed(_)));
}

#[test]
fn corrupt_store_returns_failed_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.sqlite3");
    std::fs::write(&path, vec![b'x'; 4096]).unwrap();
    let store = CatalogStore::new(&path);

    match store.add(&Book::new("Dune", "Herbert", 1965)) {
        AddOutcome::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(matches!(store.delete(1), DeleteOutcome::Failed(_)));
    assert!(store.list_all().is_empty());
}

#[test]
fn end_to_end_catalog_scenario() {
    let (_dir, store) = temp_store();
    let foundation = Book::new("Foundation", "Asimov", 1951);

    let id = added_id(store.add(&foundation));
    assert_eq!(store.add(&foundation), AddOutcome::Duplicate);

    let books = found(store.search("Asimov"));
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, Some(id));
    assert_eq!(books[0].status.as_deref(), Some("available"));

    assert!(matches!(
        store.update_status(id, "checked-out"),
        UpdateStatusOutcome::Updated { .. }
    ));
    let books = found(store.search("Foundation"));
    assert_eq!(books[0].status.as_deref(), Some("checked-out"));

    assert_eq!(store.delete(id), DeleteOutcome::Deleted(id));
    assert!(store.list_all().iter().all(|b| b.title != "Foundation"));
}
