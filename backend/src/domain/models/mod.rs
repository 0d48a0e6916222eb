//! Domain models for the check-in tracker.

pub mod attendance;
pub mod child;
pub mod contact;
