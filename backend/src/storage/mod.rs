//! # Storage Module
//!
//! Data persistence for the check-in tracker. The domain layer talks to the
//! traits in [`traits`]; the CSV backend in [`csv`] is the concrete store.

pub mod csv;
pub mod traits;

pub use csv::{AttendanceRepository, ChildRepository, ContactRepository, CsvConnection};
pub use traits::{AttendanceStorage, ChildStorage, ContactStorage, DuplicateAttendanceDay};
