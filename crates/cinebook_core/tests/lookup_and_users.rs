use cinebook_core::db::open_db_in_memory;
use cinebook_core::repo::lookup_repo::{self, LookupTable};
use cinebook_core::repo::{count_all, delete_all, user_repo};
use cinebook_core::{User, UserId};
use rusqlite::Connection;
use uuid::Uuid;

fn fresh_conn() -> Connection {
    open_db_in_memory().unwrap()
}

#[test]
fn upsert_creates_then_renames_in_place() {
    let conn = fresh_conn();

    let created = lookup_repo::upsert(&conn, LookupTable::PermissionGroups, 0, "ADMIN").unwrap();
    assert_eq!(created.id, 0);
    assert_eq!(created.readable, "ADMIN");

    lookup_repo::upsert(&conn, LookupTable::PermissionGroups, 0, "ADMINISTRATOR").unwrap();
    assert_eq!(
        lookup_repo::count(&conn, LookupTable::PermissionGroups).unwrap(),
        1
    );
    assert_eq!(
        lookup_repo::get(&conn, LookupTable::PermissionGroups, 0)
            .unwrap()
            .unwrap()
            .readable,
        "ADMINISTRATOR"
    );
}

#[test]
fn find_by_readable_misses_with_none() {
    let conn = fresh_conn();
    lookup_repo::upsert(&conn, LookupTable::TicketHolderTypes, 0, "ADULT").unwrap();

    assert!(
        lookup_repo::find_by_readable(&conn, LookupTable::TicketHolderTypes, "PENSIONER")
            .unwrap()
            .is_none()
    );
    assert_eq!(
        lookup_repo::find_by_readable(&conn, LookupTable::TicketHolderTypes, "ADULT")
            .unwrap()
            .unwrap()
            .id,
        0
    );
}

#[test]
fn delete_then_create_replaces_the_row_with_a_fresh_id() {
    let conn = fresh_conn();

    let first = user_repo::delete_then_create(&conn, "admin", "old-pw").unwrap();
    let second = user_repo::delete_then_create(&conn, "admin", "new-pw").unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(count_all::<User>(&conn).unwrap(), 1);

    let stored = user_repo::find_by_username(&conn, "admin")
        .unwrap()
        .expect("admin should exist");
    assert_eq!(stored.id, second.id);
    assert_eq!(stored.password, "new-pw");
}

#[test]
fn get_by_id_misses_with_none() {
    let conn = fresh_conn();
    let missing: UserId = Uuid::new_v4();

    assert!(
        cinebook_core::repo::get_by_id::<User>(&conn, missing.to_string())
            .unwrap()
            .is_none()
    );
}

#[test]
fn delete_all_clears_the_table() {
    let conn = fresh_conn();
    user_repo::create_user(&conn, "alice", "pw").unwrap();
    user_repo::create_user(&conn, "bob", "pw").unwrap();

    let removed = delete_all::<User>(&conn).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(count_all::<User>(&conn).unwrap(), 0);
}
