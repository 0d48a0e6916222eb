//! Translation between the public DTOs in `shared` (string timestamps) and
//! the domain models (chrono types). Handlers never pass shared types into
//! the domain layer directly.

pub mod attendance_mapper;
pub mod child_mapper;
pub mod contact_mapper;
pub mod roster_mapper;

pub use attendance_mapper::AttendanceMapper;
pub use child_mapper::ChildMapper;
pub use contact_mapper::ContactMapper;
pub use roster_mapper::RosterMapper;
