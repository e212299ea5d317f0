use customer_core::db::migrations::latest_version;
use customer_core::db::{open_db, open_db_in_memory, open_store, DbError, StoreUri};
use customer_core::{Customer, CustomerRepository, SqliteCustomerRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "documents");
}

#[test]
fn opening_same_store_twice_is_idempotent_and_keeps_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.sqlite3");

    let conn_first = open_db(&path).unwrap();
    SqliteCustomerRepository::new(&conn_first)
        .save(&Customer::new("Alice", "Smith"))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let repo = SqliteCustomerRepository::new(&conn_second);
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn open_store_resolves_file_uri() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("from_uri.sqlite3");
    let uri: StoreUri = format!("sqlite://{}", path.display()).parse().unwrap();

    let conn = open_store(&uri).unwrap();
    assert_table_exists(&conn, "documents");
    assert!(path.exists());
}

#[test]
fn open_store_memory_uri_starts_empty() {
    let conn = open_store(&StoreUri::Memory).unwrap();
    let repo = SqliteCustomerRepository::new(&conn);

    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn opening_unreachable_path_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("store.sqlite3");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)), "unexpected error: {err}");
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
