//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work against
//! different backends without modification. All operations are synchronous.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::models::attendance::AttendanceRecord;
use crate::domain::models::child::Child;
use crate::domain::models::contact::Contact;

/// Returned (inside the `anyhow` chain) when an insert would create a
/// second attendance record for the same child and local calendar day.
/// This is the storage-boundary uniqueness check that backs up the
/// advisory duplicate guard.
#[derive(Debug, thiserror::Error)]
#[error("attendance already recorded for child {child_id} on {day}")]
pub struct DuplicateAttendanceDay {
    pub child_id: String,
    pub day: NaiveDate,
}

/// Trait defining the interface for child roster storage operations
pub trait ChildStorage: Send + Sync {
    /// Store a new child
    fn store_child(&self, child: &Child) -> Result<()>;

    /// Retrieve a specific child by ID
    fn get_child(&self, child_id: &str) -> Result<Option<Child>>;

    /// List all children ordered by first name, then last name
    fn list_children(&self) -> Result<Vec<Child>>;

    /// Update an existing child
    fn update_child(&self, child: &Child) -> Result<()>;

    /// Delete a child and all data filed under them
    fn delete_child(&self, child_id: &str) -> Result<()>;
}

/// Trait defining the interface for attendance record storage operations
pub trait AttendanceStorage: Send + Sync {
    /// Store a new attendance record.
    ///
    /// Fails with [`DuplicateAttendanceDay`] when a record for the same
    /// child and local calendar day is already on file.
    fn store_attendance(&self, record: &AttendanceRecord) -> Result<()>;

    /// Retrieve a specific attendance record by ID
    fn get_attendance(&self, attendance_id: &str) -> Result<Option<AttendanceRecord>>;

    /// List a child's records with check-in time in `[start, end)`,
    /// oldest first
    fn list_attendance_in_window(
        &self,
        child_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>>;

    /// List a child's records with check-in time at or after `since`,
    /// newest first
    fn list_attendance_since(
        &self,
        child_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>>;

    /// Update an existing attendance record (the check-out mutation)
    fn update_attendance(&self, record: &AttendanceRecord) -> Result<()>;
}

/// Trait defining the interface for emergency contact storage operations
pub trait ContactStorage: Send + Sync {
    /// Store a new contact
    fn store_contact(&self, contact: &Contact) -> Result<()>;

    /// Retrieve a specific contact by ID
    fn get_contact(&self, contact_id: &str) -> Result<Option<Contact>>;

    /// List a child's contacts, primary contacts first
    fn list_contacts(&self, child_id: &str) -> Result<Vec<Contact>>;

    /// Delete a contact by ID; returns true if something was removed
    fn delete_contact(&self, contact_id: &str) -> Result<bool>;
}
