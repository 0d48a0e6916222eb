//! # Domain Module
//!
//! Business logic for the check-in tracker, grouped into services. Handlers
//! in `io::rest` call into these services with the command types from
//! [`commands`]; the services enforce the rules (one check-in per child per
//! day, picked-up is terminal) and talk to storage through the traits in
//! `crate::storage`.

pub mod attendance_service;
pub mod child_service;
pub mod commands;
pub mod contact_service;
pub mod error;
pub mod models;
pub mod roster_service;

pub use attendance_service::AttendanceService;
pub use child_service::ChildService;
pub use contact_service::ContactService;
pub use error::AttendanceError;
pub use roster_service::RosterService;
