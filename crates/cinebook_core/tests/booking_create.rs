use cinebook_core::db::open_db_in_memory;
use cinebook_core::repo::booking_repo::{self, CreateBooking};
use cinebook_core::repo::{count_all, user_repo};
use cinebook_core::{seed, Booking, Ticket, User, TICKET_PRICE_PENCE};
use rusqlite::Connection;
use uuid::Uuid;

const SHOW_AT_MS: i64 = 1_735_754_400_000;

fn seeded_conn_with_user(username: &str) -> (Connection, User) {
    let conn = open_db_in_memory().unwrap();
    seed::run(&conn).unwrap();
    let user = match user_repo::create_user(&conn, username, "pw").unwrap() {
        user_repo::NewUser::Created(user) => user,
        user_repo::NewUser::UsernameTaken => panic!("fresh username reported taken"),
    };
    (conn, user)
}

fn specs(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn booking_with_three_tickets_writes_one_booking_and_three_tickets() {
    let (conn, user) = seeded_conn_with_user("alice");

    let outcome = booking_repo::create_booking(
        &conn,
        user.id,
        "Jurassic Cabin",
        SHOW_AT_MS,
        &specs(&["ADULT", "ADULT", "CHILD"]),
    )
    .unwrap();
    let booking = match outcome {
        CreateBooking::Created(booking) => booking,
        other => panic!("booking rejected: {other:?}"),
    };

    assert_eq!(count_all::<Booking>(&conn).unwrap(), 1);
    assert_eq!(count_all::<Ticket>(&conn).unwrap(), 3);

    let tickets = booking_repo::tickets_for_booking(&conn, booking.id).unwrap();
    assert_eq!(tickets.len(), 3);
    for ticket in tickets {
        assert_eq!(ticket.booking_id, booking.id);
        assert_eq!(ticket.paid_price_pence, TICKET_PRICE_PENCE);
    }
}

#[test]
fn unknown_film_writes_nothing() {
    let (conn, user) = seeded_conn_with_user("alice");

    let outcome = booking_repo::create_booking(
        &conn,
        user.id,
        "No Such Film",
        SHOW_AT_MS,
        &specs(&["ADULT"]),
    )
    .unwrap();

    assert_eq!(outcome, CreateBooking::FilmNotFound);
    assert_eq!(count_all::<Booking>(&conn).unwrap(), 0);
    assert_eq!(count_all::<Ticket>(&conn).unwrap(), 0);
}

#[test]
fn unknown_user_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    seed::run(&conn).unwrap();

    let outcome = booking_repo::create_booking(
        &conn,
        Uuid::new_v4(),
        "Jurassic Cabin",
        SHOW_AT_MS,
        &specs(&["ADULT"]),
    )
    .unwrap();

    assert_eq!(outcome, CreateBooking::UserNotFound);
    assert_eq!(count_all::<Booking>(&conn).unwrap(), 0);
    assert_eq!(count_all::<Ticket>(&conn).unwrap(), 0);
}

#[test]
fn unknown_holder_type_rolls_back_the_whole_booking() {
    let (conn, user) = seeded_conn_with_user("alice");

    let outcome = booking_repo::create_booking(
        &conn,
        user.id,
        "Jurassic Cabin",
        SHOW_AT_MS,
        &specs(&["ADULT", "PENSIONER", "CHILD"]),
    )
    .unwrap();

    assert_eq!(
        outcome,
        CreateBooking::UnknownHolderType("PENSIONER".to_string())
    );
    // The booking insert and the first ticket insert both rolled back.
    assert_eq!(count_all::<Booking>(&conn).unwrap(), 0);
    assert_eq!(count_all::<Ticket>(&conn).unwrap(), 0);
}

#[test]
fn zero_ticket_specs_aborts_before_any_write() {
    let (conn, user) = seeded_conn_with_user("alice");

    let outcome =
        booking_repo::create_booking(&conn, user.id, "Jurassic Cabin", SHOW_AT_MS, &[]).unwrap();

    assert_eq!(outcome, CreateBooking::NoTicketSpecs);
    assert_eq!(count_all::<Booking>(&conn).unwrap(), 0);
}

#[test]
fn bookings_list_per_user_only_their_rows() {
    let (conn, alice) = seeded_conn_with_user("alice");
    let bob = match user_repo::create_user(&conn, "bob", "pw").unwrap() {
        user_repo::NewUser::Created(user) => user,
        user_repo::NewUser::UsernameTaken => panic!("fresh username reported taken"),
    };

    booking_repo::create_booking(&conn, alice.id, "Quantum Mania", SHOW_AT_MS, &specs(&["ADULT"]))
        .unwrap();
    booking_repo::create_booking(
        &conn,
        bob.id,
        "The Dark Night",
        SHOW_AT_MS + 1,
        &specs(&["STUDENT"]),
    )
    .unwrap();

    let alices = booking_repo::list_for_user(&conn, alice.id).unwrap();
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].film_title, "Quantum Mania");

    let all = booking_repo::list_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
}
