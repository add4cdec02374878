use rusqlite::Connection;
use todo_core::db::migrations::{apply_migrations, latest_version, schema_version};
use todo_core::db::{open_db, open_db_in_memory, DbError};
use todo_core::{KvError, KvStore, SqliteKvStore};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "kv_slots");
}

#[test]
fn applying_migrations_twice_is_a_no_op() {
    let mut conn = open_db_in_memory().unwrap();
    assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let conn_first = open_db(&path).unwrap();
    SqliteKvStore::try_new(&conn_first)
        .unwrap()
        .set("k", "v")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    let store = SqliteKvStore::try_new(&conn_second).unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

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

#[test]
fn kv_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(&conn) {
        Err(KvError::Uninitialized {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn kv_set_overwrites_and_remove_clears() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.get("slot").unwrap(), None);
    store.set("slot", "one").unwrap();
    store.set("slot", "two").unwrap();
    assert_eq!(store.get("slot").unwrap().as_deref(), Some("two"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    store.remove("slot").unwrap();
    assert_eq!(store.get("slot").unwrap(), None);
    store.remove("slot").unwrap();
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
