//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the check-in tracker. This layer
//! handles:
//! - HTTP request/response serialization and deserialization
//! - Error translation from domain to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer: the mappers convert between the public
//! DTOs in `shared` and the domain command types, and every rule lives in
//! the domain services.

pub mod attendance_apis;
pub mod child_apis;
pub mod contact_apis;
pub mod mappers;
pub mod roster_apis;

pub use attendance_apis::{check_in, check_out, get_attendance_history, get_today_attendance};
pub use child_apis::{create_child, delete_child, get_child, list_children, update_child};
pub use contact_apis::{create_contact, delete_contact, list_contacts};
pub use roster_apis::{get_roster, get_roster_summary};
