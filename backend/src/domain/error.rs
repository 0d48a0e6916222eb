use thiserror::Error;

/// Errors raised by the attendance write path.
///
/// The status resolver and the duplicate guard themselves are total
/// functions and never fail; everything fallible lives in the calls that
/// feed them or act on their answer.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// A record already exists for this child in today's window. Raised by
    /// the advisory guard, or by the storage layer when a raced insert
    /// slips past it.
    #[error("child {0} already has an attendance record for today")]
    DuplicateCheckIn(String),

    /// Check-out requested against a missing or already-closed record.
    /// Nothing was updated.
    #[error("attendance record {0} has no open check-in to close")]
    InvalidTransition(String),

    /// Check-in requested for a child that is not on the roster.
    #[error("child not found: {0}")]
    UnknownChild(String),

    /// Failure from the storage layer, propagated unchanged. No retry.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
