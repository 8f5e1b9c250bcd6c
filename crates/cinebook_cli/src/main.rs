//! Standalone seed entry point.
//!
//! # Responsibility
//! - Open (or create) the booking store at its fixed path and run the
//!   idempotent seed routine: catalogue films, lookup reconciliation, and
//!   the bootstrap admin account.
//!
//! The interactive menu lives elsewhere; this binary only initializes a
//! usable store.

use cinebook_core::{db, default_log_level, init_logging, seed};
use std::error::Error;
use std::path::Path;

const DATA_DIR: &str = "data";
const DB_FILE: &str = "cinebook.db";
const LOG_DIR: &str = "logs";

fn main() {
    if let Err(err) = run() {
        eprintln!("seed failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    init_logging(default_log_level(), LOG_DIR)?;

    std::fs::create_dir_all(DATA_DIR)?;
    let conn = db::open_db(Path::new(DATA_DIR).join(DB_FILE))?;
    let admin = seed::run(&conn)?;

    println!(
        "store ready: {} films, admin user `{}` (id {})",
        seed::FILM_TITLES.len(),
        admin.username,
        admin.id
    );
    Ok(())
}
