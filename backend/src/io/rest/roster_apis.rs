//! # REST API for the Roster View
//!
//! Endpoints for the whole-group overview: every child with their derived
//! status for today, plus the head-count summary for the dashboard.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use super::mappers::RosterMapper;
use crate::AppState;
use shared::RosterQuery;

/// Today's roster, optionally filtered by name, status or group
pub async fn get_roster(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> impl IntoResponse {
    info!("GET /api/roster - query: {:?}", query);

    let command = RosterMapper::to_query_command(query);
    match state.roster_service.roster(command) {
        Ok(result) => (StatusCode::OK, Json(RosterMapper::to_roster_dto(result))).into_response(),
        Err(e) => {
            error!("Failed to build roster: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building roster").into_response()
        }
    }
}

/// Today's head counts
pub async fn get_roster_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/roster/summary");

    match state.roster_service.summary() {
        Ok(summary) => (
            StatusCode::OK,
            Json(RosterMapper::to_summary_dto(summary)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build roster summary: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building summary").into_response()
        }
    }
}
