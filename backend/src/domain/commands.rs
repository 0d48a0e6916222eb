//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping
//! the public DTOs defined in the `shared` crate to these internal types.

pub mod children {
    use crate::domain::models::child::Child;

    /// Input for adding a child to the roster.
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub first_name: String,
        pub last_name: String,
        /// ISO 8601 date (YYYY-MM-DD)
        pub date_of_birth: Option<String>,
        pub group_name: Option<String>,
        pub photo_url: Option<String>,
    }

    /// Partial update; `None` fields keep their current value.
    #[derive(Debug, Clone)]
    pub struct UpdateChildCommand {
        pub child_id: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub date_of_birth: Option<String>,
        pub group_name: Option<String>,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateChildResult {
        pub child: Child,
    }

    #[derive(Debug, Clone)]
    pub struct GetChildResult {
        pub child: Option<Child>,
    }

    #[derive(Debug, Clone)]
    pub struct ListChildrenResult {
        pub children: Vec<Child>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateChildResult {
        pub child: Child,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteChildResult {
        pub success_message: String,
    }
}

pub mod attendance {
    use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};

    /// Input for marking a child's arrival.
    #[derive(Debug, Clone)]
    pub struct CheckInCommand {
        pub child_id: String,
        /// Acting user, recorded for audit
        pub checked_in_by: Option<String>,
    }

    /// Input for marking a departure. Takes the record id, not the child id:
    /// check-out only ever closes an existing open record.
    #[derive(Debug, Clone)]
    pub struct CheckOutCommand {
        pub attendance_id: String,
        pub checked_out_by: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CheckInResult {
        pub record: AttendanceRecord,
    }

    #[derive(Debug, Clone)]
    pub struct CheckOutResult {
        pub record: AttendanceRecord,
    }

    /// Today's record (if any) with the status derived from it.
    #[derive(Debug, Clone)]
    pub struct TodayAttendanceResult {
        pub status: AttendanceStatus,
        pub record: Option<AttendanceRecord>,
    }

    /// Query for a child's recent attendance.
    #[derive(Debug, Clone)]
    pub struct AttendanceHistoryQuery {
        pub child_id: String,
        /// Days back from now; defaults to 7 when absent
        pub days: Option<u32>,
    }

    #[derive(Debug, Clone)]
    pub struct AttendanceHistoryResult {
        /// Newest first
        pub records: Vec<AttendanceRecord>,
    }
}

pub mod contacts {
    use crate::domain::models::contact::Contact;

    #[derive(Debug, Clone)]
    pub struct CreateContactCommand {
        pub child_id: String,
        pub contact_name: String,
        pub relationship: Option<String>,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub is_primary: bool,
    }

    #[derive(Debug, Clone)]
    pub struct CreateContactResult {
        pub contact: Contact,
    }

    #[derive(Debug, Clone)]
    pub struct ListContactsResult {
        /// Primary contacts first
        pub contacts: Vec<Contact>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteContactCommand {
        pub contact_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteContactResult {
        pub success_message: String,
    }
}

pub mod roster {
    use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::domain::models::child::Child;

    /// Filters for the roster view; all optional, combined with AND.
    #[derive(Debug, Clone, Default)]
    pub struct RosterQuery {
        /// Case-insensitive substring match on the full name
        pub search: Option<String>,
        pub status: Option<AttendanceStatus>,
        pub group: Option<String>,
    }

    /// One roster row: a child joined with their today-record.
    #[derive(Debug, Clone)]
    pub struct RosterEntry {
        pub child: Child,
        pub status: AttendanceStatus,
        pub today_attendance: Option<AttendanceRecord>,
    }

    #[derive(Debug, Clone)]
    pub struct RosterResult {
        pub entries: Vec<RosterEntry>,
    }

    /// Head-count summary for today's dashboard.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RosterSummary {
        pub total: u32,
        pub present: u32,
        pub not_arrived: u32,
        pub picked_up: u32,
    }
}
