// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EXPECTED_TABLES, Persistence, PersistenceError};

#[test]
fn test_in_memory_database_has_booking_tables() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let tables: Vec<String> = persistence.list_tables().unwrap();
    for expected in EXPECTED_TABLES {
        assert!(tables.iter().any(|t| t == expected), "missing {expected}");
    }
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    super::submit(&mut first, super::hall_draft(&["10:00"]), "Only here");

    assert_eq!(first.list_bookings().unwrap().len(), 1);
    assert!(second.list_bookings().unwrap().is_empty());
}

#[test]
fn test_missing_booking_is_reported() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(
        persistence.get_booking(42),
        Err(PersistenceError::BookingNotFound(42))
    );
}
