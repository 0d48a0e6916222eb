use crate::domain::commands::attendance::{AttendanceHistoryResult, TodayAttendanceResult};
use crate::domain::models::attendance::{
    AttendanceRecord as DomainRecord, AttendanceStatus as DomainStatus,
};
use shared::{
    AttendanceHistoryResponse, AttendanceRecord as SharedRecord,
    AttendanceStatus as SharedStatus, TodayAttendanceResponse,
};

/// Mapper to convert between shared attendance DTOs and domain models.
pub struct AttendanceMapper;

impl AttendanceMapper {
    /// Converts a domain attendance record to a shared DTO.
    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            id: domain.id,
            child_id: domain.child_id,
            check_in_time: domain.check_in_time.to_rfc3339(),
            check_in_by: domain.check_in_by,
            check_out_time: domain.check_out_time.map(|t| t.to_rfc3339()),
            check_out_by: domain.check_out_by,
        }
    }

    pub fn status_to_dto(status: DomainStatus) -> SharedStatus {
        match status {
            DomainStatus::NotArrived => SharedStatus::NotArrived,
            DomainStatus::Present => SharedStatus::Present,
            DomainStatus::PickedUp => SharedStatus::PickedUp,
        }
    }

    pub fn status_to_domain(status: SharedStatus) -> DomainStatus {
        match status {
            SharedStatus::NotArrived => DomainStatus::NotArrived,
            SharedStatus::Present => DomainStatus::Present,
            SharedStatus::PickedUp => DomainStatus::PickedUp,
        }
    }

    pub fn to_today_dto(domain: TodayAttendanceResult) -> TodayAttendanceResponse {
        TodayAttendanceResponse {
            status: Self::status_to_dto(domain.status),
            record: domain.record.map(Self::to_dto),
        }
    }

    pub fn to_history_dto(domain: AttendanceHistoryResult) -> AttendanceHistoryResponse {
        AttendanceHistoryResponse {
            records: domain.records.into_iter().map(Self::to_dto).collect(),
        }
    }
}
