//! # REST API for Emergency Contacts
//!
//! Endpoints for listing, adding and removing a child's contacts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use super::mappers::ContactMapper;
use crate::domain::commands::contacts::DeleteContactCommand;
use crate::AppState;
use shared::{CreateContactRequest, DeleteContactResponse};

/// Add a contact for a child
pub async fn create_contact(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Json(request): Json<CreateContactRequest>,
) -> impl IntoResponse {
    info!("POST /api/children/{}/contacts - request: {:?}", child_id, request);

    let command = ContactMapper::to_create_command(&child_id, request);
    match state.contact_service.create_contact(command) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ContactMapper::to_dto(result.contact)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create contact: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// List a child's contacts, primary first
pub async fn list_contacts(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/contacts", child_id);

    match state.contact_service.list_contacts(&child_id) {
        Ok(result) => (
            StatusCode::OK,
            Json(ContactMapper::to_contact_list_dto(result.contacts)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list contacts: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a contact
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/contacts/{}", contact_id);

    match state.contact_service.delete_contact(DeleteContactCommand { contact_id }) {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteContactResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete contact: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
