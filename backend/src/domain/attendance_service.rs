use chrono::{Duration, Local, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::attendance::{
    AttendanceHistoryQuery, AttendanceHistoryResult, CheckInCommand, CheckInResult,
    CheckOutCommand, CheckOutResult, TodayAttendanceResult,
};
use crate::domain::error::AttendanceError;
use crate::domain::models::attendance::{
    can_check_in, local_day_bounds, AttendanceRecord, AttendanceStatus,
};
use crate::storage::csv::{AttendanceRepository, ChildRepository, CsvConnection};
use crate::storage::traits::{AttendanceStorage, ChildStorage, DuplicateAttendanceDay};

/// Days of history shown on the child profile when the caller doesn't ask
/// for a specific window.
const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Service for recording arrivals and departures.
///
/// The status resolver and the duplicate guard are pure functions in
/// `models::attendance`; this service wires them to the storage boundary:
/// it loads today's records, consults the guard before inserting, and
/// derives the status from whatever record is on file.
#[derive(Clone)]
pub struct AttendanceService {
    attendance_repository: AttendanceRepository,
    child_repository: ChildRepository,
}

impl AttendanceService {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            attendance_repository: AttendanceRepository::new(connection.clone()),
            child_repository: ChildRepository::new(connection),
        }
    }

    /// Mark a child's arrival.
    ///
    /// Refuses with [`AttendanceError::DuplicateCheckIn`] when a record for
    /// the child already exists in today's window, whether or not the child
    /// has been picked up again.
    pub fn check_in(&self, command: CheckInCommand) -> Result<CheckInResult, AttendanceError> {
        info!("Check-in requested for {}", command.child_id);

        self.child_repository
            .get_child(&command.child_id)?
            .ok_or_else(|| AttendanceError::UnknownChild(command.child_id.clone()))?;

        let (day_start, day_end) = local_day_bounds(Local::now());
        let existing_today =
            self.attendance_repository
                .list_attendance_in_window(&command.child_id, day_start, day_end)?;

        if !can_check_in(&existing_today, &command.child_id) {
            warn!("Duplicate check-in refused for {}", command.child_id);
            return Err(AttendanceError::DuplicateCheckIn(command.child_id));
        }

        let record = AttendanceRecord {
            id: AttendanceRecord::generate_id(),
            child_id: command.child_id,
            check_in_time: Utc::now(),
            check_in_by: command.checked_in_by,
            check_out_time: None,
            check_out_by: None,
        };

        // The guard above is advisory. If a concurrent check-in won the race
        // between our read and this insert, the storage layer's same-day
        // uniqueness check rejects the write; report that as a duplicate too.
        if let Err(e) = self.attendance_repository.store_attendance(&record) {
            return if e.downcast_ref::<DuplicateAttendanceDay>().is_some() {
                warn!(
                    "Raced duplicate check-in for {} refused by storage",
                    record.child_id
                );
                Err(AttendanceError::DuplicateCheckIn(record.child_id))
            } else {
                Err(AttendanceError::Store(e))
            };
        }

        info!(
            "Checked in {} at {} ({})",
            record.child_id, record.check_in_time, record.id
        );

        Ok(CheckInResult { record })
    }

    /// Mark a departure by closing an open attendance record.
    ///
    /// Takes the record id, not a child id. A missing record or one that
    /// already carries a check-out timestamp yields
    /// [`AttendanceError::InvalidTransition`]: nothing is updated, picked-up
    /// is terminal.
    pub fn check_out(&self, command: CheckOutCommand) -> Result<CheckOutResult, AttendanceError> {
        info!("Check-out requested for record {}", command.attendance_id);

        let mut record = self
            .attendance_repository
            .get_attendance(&command.attendance_id)?
            .ok_or_else(|| AttendanceError::InvalidTransition(command.attendance_id.clone()))?;

        if !record.is_open() {
            warn!(
                "Check-out refused: record {} is already closed",
                record.id
            );
            return Err(AttendanceError::InvalidTransition(record.id));
        }

        // Keep check-out >= check-in even if the clock stepped backwards
        record.check_out_time = Some(Utc::now().max(record.check_in_time));
        record.check_out_by = command.checked_out_by;

        self.attendance_repository.update_attendance(&record)?;

        info!(
            "Checked out {} at {} ({})",
            record.child_id,
            record.check_out_time.map(|t| t.to_rfc3339()).unwrap_or_default(),
            record.id
        );

        Ok(CheckOutResult { record })
    }

    /// Today's record for a child (if any) and the status derived from it
    pub fn today(&self, child_id: &str) -> Result<TodayAttendanceResult, AttendanceError> {
        self.child_repository
            .get_child(child_id)?
            .ok_or_else(|| AttendanceError::UnknownChild(child_id.to_string()))?;

        let (day_start, day_end) = local_day_bounds(Local::now());
        let record = self
            .attendance_repository
            .list_attendance_in_window(child_id, day_start, day_end)?
            .into_iter()
            .next();

        let status = AttendanceStatus::of(record.as_ref());

        Ok(TodayAttendanceResult { status, record })
    }

    /// A child's recent attendance, newest first
    pub fn history(
        &self,
        query: AttendanceHistoryQuery,
    ) -> Result<AttendanceHistoryResult, AttendanceError> {
        self.child_repository
            .get_child(&query.child_id)?
            .ok_or_else(|| AttendanceError::UnknownChild(query.child_id.clone()))?;

        let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
        let since = Utc::now() - Duration::days(i64::from(days));

        let records = self
            .attendance_repository
            .list_attendance_since(&query.child_id, since)?;

        Ok(AttendanceHistoryResult { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestHelper;

    fn setup() -> (AttendanceService, TestHelper) {
        let helper = TestHelper::new().unwrap();
        let service = AttendanceService::new(helper.env.connection.clone());
        (service, helper)
    }

    fn check_in_cmd(child_id: &str) -> CheckInCommand {
        CheckInCommand {
            child_id: child_id.to_string(),
            checked_in_by: Some("profile::staff-1".to_string()),
        }
    }

    #[test]
    fn test_full_day_scenario() {
        let (service, helper) = setup();
        let child = helper.seed_child("Emma", "Smith", None).unwrap();

        // Before arrival
        let today = service.today(&child.id).unwrap();
        assert_eq!(today.status, AttendanceStatus::NotArrived);
        assert!(today.record.is_none());

        // Arrival
        let checked_in = service.check_in(check_in_cmd(&child.id)).unwrap();
        assert_eq!(checked_in.record.child_id, child.id);
        assert!(checked_in.record.is_open());
        assert_eq!(
            checked_in.record.check_in_by.as_deref(),
            Some("profile::staff-1")
        );

        let today = service.today(&child.id).unwrap();
        assert_eq!(today.status, AttendanceStatus::Present);

        // Second arrival the same day is refused, no new record appears
        let err = service.check_in(check_in_cmd(&child.id)).unwrap_err();
        assert!(matches!(err, AttendanceError::DuplicateCheckIn(_)));
        let history = service
            .history(AttendanceHistoryQuery {
                child_id: child.id.clone(),
                days: None,
            })
            .unwrap();
        assert_eq!(history.records.len(), 1);

        // Departure
        let checked_out = service
            .check_out(CheckOutCommand {
                attendance_id: checked_in.record.id.clone(),
                checked_out_by: Some("profile::parent-1".to_string()),
            })
            .unwrap();
        assert!(checked_out.record.check_out_time.is_some());
        assert!(checked_out.record.check_out_time.unwrap() >= checked_out.record.check_in_time);

        let today = service.today(&child.id).unwrap();
        assert_eq!(today.status, AttendanceStatus::PickedUp);

        // Further check-out attempts change nothing
        let err = service
            .check_out(CheckOutCommand {
                attendance_id: checked_in.record.id.clone(),
                checked_out_by: None,
            })
            .unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidTransition(_)));
        let after = service.today(&child.id).unwrap().record.unwrap();
        assert_eq!(after.check_out_by.as_deref(), Some("profile::parent-1"));
    }

    #[test]
    fn test_check_in_after_pick_up_is_still_refused() {
        let (service, helper) = setup();
        let child = helper.seed_child("Emma", "Smith", None).unwrap();

        let checked_in = service.check_in(check_in_cmd(&child.id)).unwrap();
        service
            .check_out(CheckOutCommand {
                attendance_id: checked_in.record.id,
                checked_out_by: None,
            })
            .unwrap();

        let err = service.check_in(check_in_cmd(&child.id)).unwrap_err();
        assert!(matches!(err, AttendanceError::DuplicateCheckIn(_)));
    }

    #[test]
    fn test_guard_is_scoped_per_child() {
        let (service, helper) = setup();
        let emma = helper.seed_child("Emma", "Smith", None).unwrap();
        let noah = helper.seed_child("Noah", "Young", None).unwrap();

        service.check_in(check_in_cmd(&emma.id)).unwrap();
        // Emma's record doesn't block Noah
        service.check_in(check_in_cmd(&noah.id)).unwrap();
    }

    #[test]
    fn test_check_in_unknown_child() {
        let (service, _helper) = setup();
        let err = service.check_in(check_in_cmd("child::missing")).unwrap_err();
        assert!(matches!(err, AttendanceError::UnknownChild(_)));
    }

    #[test]
    fn test_check_out_unknown_record() {
        let (service, _helper) = setup();
        let err = service
            .check_out(CheckOutCommand {
                attendance_id: "attendance::missing".to_string(),
                checked_out_by: None,
            })
            .unwrap_err();
        assert!(matches!(err, AttendanceError::InvalidTransition(_)));
    }

    #[test]
    fn test_history_defaults_to_seven_days() {
        let (service, helper) = setup();
        let child = helper.seed_child("Emma", "Smith", None).unwrap();

        // Seed records directly: one recent, one outside the default window
        let recent = AttendanceRecord {
            id: AttendanceRecord::generate_id(),
            child_id: child.id.clone(),
            check_in_time: Utc::now() - Duration::days(2),
            check_in_by: None,
            check_out_time: Some(Utc::now() - Duration::days(2) + Duration::hours(8)),
            check_out_by: None,
        };
        let old = AttendanceRecord {
            id: AttendanceRecord::generate_id(),
            child_id: child.id.clone(),
            check_in_time: Utc::now() - Duration::days(30),
            check_in_by: None,
            check_out_time: None,
            check_out_by: None,
        };
        helper.attendance_repo.store_attendance(&recent).unwrap();
        helper.attendance_repo.store_attendance(&old).unwrap();

        let history = service
            .history(AttendanceHistoryQuery {
                child_id: child.id.clone(),
                days: None,
            })
            .unwrap();
        assert_eq!(history.records.len(), 1);
        assert_eq!(history.records[0].id, recent.id);

        let wide = service
            .history(AttendanceHistoryQuery {
                child_id: child.id,
                days: Some(60),
            })
            .unwrap();
        assert_eq!(wide.records.len(), 2);
        // Newest first
        assert_eq!(wide.records[0].id, recent.id);
    }
}
