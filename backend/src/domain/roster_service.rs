use chrono::Local;
use log::info;
use std::sync::Arc;

use crate::domain::commands::roster::{RosterEntry, RosterQuery, RosterResult, RosterSummary};
use crate::domain::error::AttendanceError;
use crate::domain::models::attendance::{local_day_bounds, AttendanceStatus};
use crate::storage::csv::{AttendanceRepository, ChildRepository, CsvConnection};
use crate::storage::traits::{AttendanceStorage, ChildStorage};

/// Service for the whole-group view: every child joined with their status
/// for today, plus the head-count summary.
#[derive(Clone)]
pub struct RosterService {
    child_repository: ChildRepository,
    attendance_repository: AttendanceRepository,
}

impl RosterService {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            child_repository: ChildRepository::new(connection.clone()),
            attendance_repository: AttendanceRepository::new(connection),
        }
    }

    /// Today's roster, filtered by the query.
    ///
    /// Filters combine with AND: name search is a case-insensitive substring
    /// match on the full name, status and group match exactly. Entries keep
    /// the roster's first-name ordering.
    pub fn roster(&self, query: RosterQuery) -> Result<RosterResult, AttendanceError> {
        let entries = self.todays_entries()?;

        let mut entries: Vec<RosterEntry> = entries;
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            entries.retain(|e| e.child.full_name().to_lowercase().contains(&needle));
        }
        if let Some(status) = query.status {
            entries.retain(|e| e.status == status);
        }
        if let Some(group) = &query.group {
            entries.retain(|e| e.child.group_name.as_deref() == Some(group.as_str()));
        }

        info!("Roster query matched {} children", entries.len());

        Ok(RosterResult { entries })
    }

    /// Head counts for today's dashboard.
    ///
    /// `not_arrived` is derived as `total - present - picked_up`, so the
    /// three buckets always sum to the roster size.
    pub fn summary(&self) -> Result<RosterSummary, AttendanceError> {
        let entries = self.todays_entries()?;

        let total = entries.len() as u32;
        let present = entries
            .iter()
            .filter(|e| e.status == AttendanceStatus::Present)
            .count() as u32;
        let picked_up = entries
            .iter()
            .filter(|e| e.status == AttendanceStatus::PickedUp)
            .count() as u32;

        Ok(RosterSummary {
            total,
            present,
            picked_up,
            not_arrived: total - present - picked_up,
        })
    }

    fn todays_entries(&self) -> Result<Vec<RosterEntry>, AttendanceError> {
        let children = self.child_repository.list_children()?;
        let (day_start, day_end) = local_day_bounds(Local::now());

        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            let record = self
                .attendance_repository
                .list_attendance_in_window(&child.id, day_start, day_end)?
                .into_iter()
                .next();
            entries.push(RosterEntry {
                status: AttendanceStatus::of(record.as_ref()),
                today_attendance: record,
                child,
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attendance_service::AttendanceService;
    use crate::domain::commands::attendance::{CheckInCommand, CheckOutCommand};
    use crate::storage::csv::test_utils::TestHelper;

    fn setup() -> (RosterService, AttendanceService, TestHelper) {
        let helper = TestHelper::new().unwrap();
        let roster = RosterService::new(helper.env.connection.clone());
        let attendance = AttendanceService::new(helper.env.connection.clone());
        (roster, attendance, helper)
    }

    fn check_in(attendance: &AttendanceService, child_id: &str) -> String {
        attendance
            .check_in(CheckInCommand {
                child_id: child_id.to_string(),
                checked_in_by: None,
            })
            .unwrap()
            .record
            .id
    }

    #[test]
    fn test_roster_joins_children_with_today() {
        let (roster, attendance, helper) = setup();
        let emma = helper.seed_child("Emma", "Smith", Some("Sunflowers")).unwrap();
        let noah = helper.seed_child("Noah", "Young", Some("Bumblebees")).unwrap();

        check_in(&attendance, &emma.id);

        let result = roster.roster(RosterQuery::default()).unwrap();
        assert_eq!(result.entries.len(), 2);

        let emma_entry = result.entries.iter().find(|e| e.child.id == emma.id).unwrap();
        assert_eq!(emma_entry.status, AttendanceStatus::Present);
        assert!(emma_entry.today_attendance.is_some());

        let noah_entry = result.entries.iter().find(|e| e.child.id == noah.id).unwrap();
        assert_eq!(noah_entry.status, AttendanceStatus::NotArrived);
        assert!(noah_entry.today_attendance.is_none());
    }

    #[test]
    fn test_roster_filters() {
        let (roster, attendance, helper) = setup();
        let emma = helper.seed_child("Emma", "Smith", Some("Sunflowers")).unwrap();
        helper.seed_child("Noah", "Young", Some("Bumblebees")).unwrap();
        helper.seed_child("Mia", "Smithson", Some("Sunflowers")).unwrap();

        check_in(&attendance, &emma.id);

        // Substring search on the full name, case-insensitive
        let by_name = roster
            .roster(RosterQuery {
                search: Some("smith".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_name.entries.len(), 2);

        let by_status = roster
            .roster(RosterQuery {
                status: Some(AttendanceStatus::Present),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_status.entries.len(), 1);
        assert_eq!(by_status.entries[0].child.id, emma.id);

        let by_group = roster
            .roster(RosterQuery {
                group: Some("Bumblebees".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_group.entries.len(), 1);
        assert_eq!(by_group.entries[0].child.first_name, "Noah");

        // Filters combine with AND
        let combined = roster
            .roster(RosterQuery {
                search: Some("smith".to_string()),
                status: Some(AttendanceStatus::NotArrived),
                group: Some("Sunflowers".to_string()),
            })
            .unwrap();
        assert_eq!(combined.entries.len(), 1);
        assert_eq!(combined.entries[0].child.first_name, "Mia");
    }

    #[test]
    fn test_summary_buckets_sum_to_total() {
        let (roster, attendance, helper) = setup();
        let emma = helper.seed_child("Emma", "Smith", None).unwrap();
        let noah = helper.seed_child("Noah", "Young", None).unwrap();
        helper.seed_child("Mia", "Lopez", None).unwrap();

        check_in(&attendance, &emma.id);
        let noah_record = check_in(&attendance, &noah.id);
        attendance
            .check_out(CheckOutCommand {
                attendance_id: noah_record,
                checked_out_by: None,
            })
            .unwrap();

        let summary = roster.summary().unwrap();
        assert_eq!(
            summary,
            RosterSummary {
                total: 3,
                present: 1,
                picked_up: 1,
                not_arrived: 1,
            }
        );
    }

    #[test]
    fn test_empty_roster_summary() {
        let (roster, _attendance, _helper) = setup();
        let summary = roster.summary().unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.not_arrived, 0);
    }
}
