//! # REST API for Child Management
//!
//! Endpoints for creating, retrieving, updating, and deleting children on
//! the roster.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use super::mappers::ChildMapper;
use crate::AppState;
use shared::{CreateChildRequest, DeleteChildResponse, UpdateChildRequest};

/// Create a new child
pub async fn create_child(
    State(state): State<AppState>,
    Json(request): Json<CreateChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - request: {:?}", request);

    let command = ChildMapper::to_create_command(request);
    match state.child_service.create_child(command) {
        Ok(result) => {
            (StatusCode::CREATED, Json(ChildMapper::to_dto(result.child))).into_response()
        }
        Err(e) => {
            error!("Failed to create child: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Get a child by ID
pub async fn get_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}", child_id);

    match state.child_service.get_child(&child_id) {
        Ok(result) => match result.child {
            Some(child) => (StatusCode::OK, Json(ChildMapper::to_dto(child))).into_response(),
            None => (StatusCode::NOT_FOUND, "Child not found").into_response(),
        },
        Err(e) => {
            error!("Failed to get child: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving child").into_response()
        }
    }
}

/// List all children
pub async fn list_children(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children");

    match state.child_service.list_children() {
        Ok(result) => (
            StatusCode::OK,
            Json(ChildMapper::to_child_list_dto(result.children)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list children: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing children").into_response()
        }
    }
}

/// Update a child
pub async fn update_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Json(request): Json<UpdateChildRequest>,
) -> impl IntoResponse {
    info!("PUT /api/children/{} - request: {:?}", child_id, request);

    let command = ChildMapper::to_update_command(&child_id, request);
    match state.child_service.update_child(command) {
        Ok(result) => (StatusCode::OK, Json(ChildMapper::to_dto(result.child))).into_response(),
        Err(e) => {
            error!("Failed to update child: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a child
pub async fn delete_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/children/{}", child_id);

    match state.child_service.delete_child(&child_id) {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteChildResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete child: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
