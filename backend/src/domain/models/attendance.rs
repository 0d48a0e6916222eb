use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model for one attendance session: one child, one calendar day.
///
/// Exactly zero or one record is expected per (child, day). The check-in
/// timestamp is always set; a set check-out timestamp makes the record
/// terminal and no further mutation is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub child_id: String,
    pub check_in_time: DateTime<Utc>,
    /// User who performed the check-in, kept for audit only
    pub check_in_by: Option<String>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_out_by: Option<String>,
}

impl AttendanceRecord {
    /// Generate a unique ID for an attendance record
    pub fn generate_id() -> String {
        format!("attendance::{}", Uuid::new_v4())
    }

    /// True while the child is checked in but not yet picked up
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}

/// Derived attendance state for a child on a given day.
///
/// Never persisted; always recomputed from the record (or its absence)
/// via [`AttendanceStatus::of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    NotArrived,
    Present,
    PickedUp,
}

impl AttendanceStatus {
    /// Resolve the status for a child from today's record, or its absence.
    ///
    /// Total and deterministic: no record means the child has not arrived,
    /// an open record means present, a closed record means picked up. A
    /// record whose check-out precedes its check-in is trusted as-is here;
    /// ordering is enforced on the write path.
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            None => AttendanceStatus::NotArrived,
            Some(r) if r.check_out_time.is_some() => AttendanceStatus::PickedUp,
            Some(_) => AttendanceStatus::Present,
        }
    }
}

/// Decide whether a new check-in is permitted for `child_id`, given the
/// records already on file for the current day window.
///
/// Advisory only: the caller reads today's records, asks this function, and
/// then inserts. The check and the insert are separate operations, so two
/// concurrent check-ins can both pass; the storage layer's same-day
/// uniqueness check is what finally refuses the second insert.
pub fn can_check_in(existing_today: &[AttendanceRecord], child_id: &str) -> bool {
    !existing_today.iter().any(|r| r.child_id == child_id)
}

/// The "today" window `[local midnight, next local midnight)` as UTC
/// instants, for the host's wall-clock timezone.
///
/// A single facility runs a single backend, so host-local midnight stands
/// in for facility midnight. Both bounds come from this one function so the
/// policy has a single seam.
pub fn local_day_bounds(now: DateTime<Local>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = now.date_naive();
    (local_midnight(day), local_midnight(day + Duration::days(1)))
}

fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_hms_opt(0, 0, 0).unwrap();
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(t) => t.with_timezone(&Utc),
        // Fall-back transition: two local midnights, the earlier one starts the day
        chrono::LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        // Spring-forward transition skipped midnight; the day starts at the
        // first valid local time after it
        chrono::LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}
