use serde::{Deserialize, Serialize};
use std::fmt;

/// Child ID in format: "child::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Birth date (ISO 8601 date, YYYY-MM-DD)
    pub date_of_birth: Option<String>,
    /// Group the child belongs to (e.g. "Sunflowers")
    pub group_name: Option<String>,
    /// URL or path of the child's photo, if one is on file
    pub photo_url: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub group_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Partial update; fields left as `None` keep their current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateChildRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub group_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteChildResponse {
    pub success_message: String,
}

/// One attendance session for one child on one calendar day.
///
/// Record ID in format: "attendance::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub child_id: String,
    /// Arrival timestamp (RFC 3339)
    pub check_in_time: String,
    /// User who performed the check-in, for audit
    pub check_in_by: Option<String>,
    /// Departure timestamp (RFC 3339); a set value makes the record terminal
    pub check_out_time: Option<String>,
    pub check_out_by: Option<String>,
}

/// Derived attendance state for a child on a given day. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    NotArrived,
    Present,
    PickedUp,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttendanceStatus::NotArrived => "not_arrived",
            AttendanceStatus::Present => "present",
            AttendanceStatus::PickedUp => "picked_up",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    /// User performing the check-in, recorded for audit
    pub checked_in_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutRequest {
    /// User performing the check-out, recorded for audit
    pub checked_out_by: Option<String>,
}

/// Today's attendance for one child: the record (if any) and the status
/// derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayAttendanceResponse {
    pub status: AttendanceStatus,
    pub record: Option<AttendanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceHistoryRequest {
    /// How many days back to include; defaults to 7
    pub days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceHistoryResponse {
    /// Records within the window, newest first
    pub records: Vec<AttendanceRecord>,
}

/// Emergency contact for a child.
///
/// Contact ID in format: "contact::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub child_id: String,
    pub contact_name: String,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub contact_name: String,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactListResponse {
    /// Contacts for the child, primary contacts first
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteContactResponse {
    pub success_message: String,
}

/// One roster row: a child joined with their today-record and derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub child: Child,
    pub status: AttendanceStatus,
    pub today_attendance: Option<AttendanceRecord>,
}

/// Query parameters for the roster view. All filters are optional and
/// combine with AND semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterQuery {
    /// Case-insensitive substring match on the child's full name
    pub search: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub entries: Vec<RosterEntry>,
}

/// Dashboard head-count summary for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: u32,
    pub present: u32,
    pub not_arrived: u32,
    pub picked_up: u32,
}
