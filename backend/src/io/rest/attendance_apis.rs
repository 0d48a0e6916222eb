//! # REST API for Attendance
//!
//! Endpoints for check-in, check-out, today's status and attendance history.
//! Rule violations (a second check-in the same day, closing an already
//! closed record) map to 409 Conflict; unknown children map to 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use super::mappers::AttendanceMapper;
use crate::domain::commands::attendance::{
    AttendanceHistoryQuery, CheckInCommand, CheckOutCommand,
};
use crate::domain::error::AttendanceError;
use crate::AppState;
use shared::{AttendanceHistoryRequest, CheckInRequest, CheckOutRequest};

/// HTTP status for a domain attendance error
fn error_status(e: &AttendanceError) -> StatusCode {
    match e {
        AttendanceError::DuplicateCheckIn(_) => StatusCode::CONFLICT,
        AttendanceError::InvalidTransition(_) => StatusCode::CONFLICT,
        AttendanceError::UnknownChild(_) => StatusCode::NOT_FOUND,
        AttendanceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Check a child in for today
pub async fn check_in(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Json(request): Json<CheckInRequest>,
) -> impl IntoResponse {
    info!("POST /api/children/{}/check-in", child_id);

    let command = CheckInCommand {
        child_id,
        checked_in_by: request.checked_in_by,
    };
    match state.attendance_service.check_in(command) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(AttendanceMapper::to_dto(result.record)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to check in: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Check out an open attendance record
pub async fn check_out(
    State(state): State<AppState>,
    Path(attendance_id): Path<String>,
    Json(request): Json<CheckOutRequest>,
) -> impl IntoResponse {
    info!("POST /api/attendance/{}/check-out", attendance_id);

    let command = CheckOutCommand {
        attendance_id,
        checked_out_by: request.checked_out_by,
    };
    match state.attendance_service.check_out(command) {
        Ok(result) => (
            StatusCode::OK,
            Json(AttendanceMapper::to_dto(result.record)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to check out: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Today's attendance status for a child
pub async fn get_today_attendance(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/attendance/today", child_id);

    match state.attendance_service.today(&child_id) {
        Ok(result) => (
            StatusCode::OK,
            Json(AttendanceMapper::to_today_dto(result)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to resolve today's attendance: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// A child's recent attendance records, newest first
pub async fn get_attendance_history(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Query(request): Query<AttendanceHistoryRequest>,
) -> impl IntoResponse {
    info!(
        "GET /api/children/{}/attendance - days: {:?}",
        child_id, request.days
    );

    let query = AttendanceHistoryQuery {
        child_id,
        days: request.days,
    };
    match state.attendance_service.history(query) {
        Ok(result) => (
            StatusCode::OK,
            Json(AttendanceMapper::to_history_dto(result)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load attendance history: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
