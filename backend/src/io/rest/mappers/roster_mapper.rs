use super::attendance_mapper::AttendanceMapper;
use super::child_mapper::ChildMapper;
use crate::domain::commands::roster::{
    RosterEntry as DomainEntry, RosterQuery as DomainQuery, RosterResult,
    RosterSummary as DomainSummary,
};
use shared::{RosterEntry, RosterQuery, RosterResponse, RosterSummary};

/// Mapper to convert between shared roster DTOs and domain roster types.
pub struct RosterMapper;

impl RosterMapper {
    pub fn to_query_command(query: RosterQuery) -> DomainQuery {
        DomainQuery {
            search: query.search,
            status: query.status.map(AttendanceMapper::status_to_domain),
            group: query.group,
        }
    }

    pub fn to_roster_dto(domain: RosterResult) -> RosterResponse {
        RosterResponse {
            entries: domain.entries.into_iter().map(Self::entry_to_dto).collect(),
        }
    }

    pub fn to_summary_dto(domain: DomainSummary) -> RosterSummary {
        RosterSummary {
            total: domain.total,
            present: domain.present,
            not_arrived: domain.not_arrived,
            picked_up: domain.picked_up,
        }
    }

    fn entry_to_dto(entry: DomainEntry) -> RosterEntry {
        RosterEntry {
            child: ChildMapper::to_dto(entry.child),
            status: AttendanceMapper::status_to_dto(entry.status),
            today_attendance: entry.today_attendance.map(AttendanceMapper::to_dto),
        }
    }
}
