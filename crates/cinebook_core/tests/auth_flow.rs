use cinebook_core::db::open_db_in_memory;
use cinebook_core::repo::{count_all, user_repo};
use cinebook_core::{seed, Access, AuthOutcome, BookingOutcome, RegisterOutcome, User};

// 2025-01-01T18:00:00Z
const SHOW_AT_MS: i64 = 1_735_754_400_000;

fn seeded_access() -> Access {
    let conn = open_db_in_memory().unwrap();
    seed::run(&conn).unwrap();
    Access::new(conn)
}

#[test]
fn registered_credentials_authenticate() {
    let access = seeded_access();

    let registered = access.register("alice", "pw1").unwrap();
    let view = match registered {
        RegisterOutcome::Registered(view) => view,
        RegisterOutcome::UsernameTaken => panic!("fresh username reported taken"),
    };
    assert_eq!(view.username, "alice");
    assert!(view.bookings.is_empty());
    assert!(view.permission_groups.is_empty());

    match access.authenticate("alice", "pw1").unwrap() {
        AuthOutcome::Authenticated(view) => assert_eq!(view.username, "alice"),
        AuthOutcome::InvalidCredentials => panic!("valid credentials rejected"),
    }
}

#[test]
fn wrong_password_is_rejected() {
    let access = seeded_access();
    access.register("alice", "pw1").unwrap();

    let outcome = access.authenticate("alice", "wrong").unwrap();
    assert_eq!(outcome, AuthOutcome::InvalidCredentials);
}

#[test]
fn unknown_username_is_rejected() {
    let access = seeded_access();

    let outcome = access.authenticate("nobody", "pw").unwrap();
    assert_eq!(outcome, AuthOutcome::InvalidCredentials);
}

#[test]
fn duplicate_registration_leaves_one_row() {
    let access = seeded_access();

    assert!(matches!(
        access.register("alice", "pw1").unwrap(),
        RegisterOutcome::Registered(_)
    ));
    assert_eq!(
        access.register("alice", "pw2").unwrap(),
        RegisterOutcome::UsernameTaken
    );

    let matches = user_repo::find_by_username(access.connection(), "alice")
        .unwrap()
        .expect("alice should exist");
    assert_eq!(matches.password, "pw1");
    // Seed admin plus alice.
    assert_eq!(count_all::<User>(access.connection()).unwrap(), 2);
}

#[test]
fn user_view_never_serializes_the_password() {
    let access = seeded_access();
    access.register("alice", "topsecret").unwrap();

    let view = match access.authenticate("alice", "topsecret").unwrap() {
        AuthOutcome::Authenticated(view) => view,
        AuthOutcome::InvalidCredentials => panic!("valid credentials rejected"),
    };

    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("topsecret"));
    assert!(!json.contains("password"));
}

#[test]
fn register_book_and_list_scenario() {
    let access = seeded_access();

    let alice = match access.register("alice", "pw1").unwrap() {
        RegisterOutcome::Registered(view) => view,
        RegisterOutcome::UsernameTaken => panic!("fresh username reported taken"),
    };
    assert_eq!(
        access.register("alice", "pw2").unwrap(),
        RegisterOutcome::UsernameTaken
    );

    match access.authenticate("alice", "pw1").unwrap() {
        AuthOutcome::Authenticated(view) => assert!(view.bookings.is_empty()),
        AuthOutcome::InvalidCredentials => panic!("valid credentials rejected"),
    }

    let specs = vec!["ADULT".to_string(), "CHILD".to_string()];
    let outcome = access
        .create_booking(alice.id, SHOW_AT_MS, "Jurassic Cabin", &specs)
        .unwrap();
    let confirmation = match outcome {
        BookingOutcome::Confirmed(confirmation) => confirmation,
        other => panic!("booking rejected: {other:?}"),
    };
    assert_eq!(confirmation.film, "Jurassic Cabin");
    assert_eq!(confirmation.ticket_count, 2);

    let bookings = access.list_bookings_for_user(alice.id).unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].film, "Jurassic Cabin");
    assert_eq!(bookings[0].show_at_ms, SHOW_AT_MS);
}

#[test]
fn listings_expose_catalogue_and_holder_types() {
    let access = seeded_access();

    assert_eq!(
        access.list_film_titles().unwrap(),
        seed::FILM_TITLES.map(String::from).to_vec()
    );
    assert_eq!(
        access.list_ticket_holder_type_names().unwrap(),
        vec!["ADULT", "TEENAGER", "CHILD", "STUDENT"]
    );
}

#[test]
fn list_all_bookings_is_reachable_without_an_admin_check() {
    // The facade trusts callers to have verified ADMIN membership from
    // their UserView; it does not gate this listing itself.
    let access = seeded_access();
    let alice = match access.register("alice", "pw1").unwrap() {
        RegisterOutcome::Registered(view) => view,
        RegisterOutcome::UsernameTaken => panic!("fresh username reported taken"),
    };
    access
        .create_booking(
            alice.id,
            SHOW_AT_MS,
            "Quantum Mania",
            &["STUDENT".to_string()],
        )
        .unwrap();

    assert!(!alice.permission_groups.contains(&"ADMIN".to_string()));
    let all = access.list_all_bookings().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].film, "Quantum Mania");
}
