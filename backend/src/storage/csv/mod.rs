//! CSV/YAML filesystem storage backend.
//!
//! Layout: one directory per child under the data directory, holding
//! `child.yaml` (the roster entry), `attendance.csv` and `contacts.csv`.

pub mod attendance_repository;
pub mod child_repository;
pub mod connection;
pub mod contact_repository;

#[cfg(test)]
pub mod test_utils;

pub use attendance_repository::AttendanceRepository;
pub use child_repository::ChildRepository;
pub use connection::CsvConnection;
pub use contact_repository::ContactRepository;
