//! # Backend Crate
//!
//! Contains all non-UI logic for the kindergarten check-in tracker.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     v
//! Domain Layer (services, rules)
//!     v
//! Storage Layer (CSV/YAML persistence)
//! ```
//!
//! The rules live in the domain layer: one attendance record per child per
//! local calendar day, picked-up is terminal, and a child's status is always
//! derived from today's record rather than stored.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{AttendanceService, ChildService, ContactService, RosterService};
use crate::storage::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub child_service: ChildService,
    pub attendance_service: AttendanceService,
    pub roster_service: RosterService,
    pub contact_service: ContactService,
}

/// Initialize the backend with all required services
pub fn initialize_backend() -> Result<AppState> {
    info!("Setting up data directory");
    let connection = Arc::new(CsvConnection::new_default()?);

    info!("Setting up domain services");
    let app_state = AppState {
        child_service: ChildService::new(connection.clone()),
        attendance_service: AttendanceService::new(connection.clone()),
        roster_service: RosterService::new(connection.clone()),
        contact_service: ContactService::new(connection),
    };

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/children", get(io::list_children).post(io::create_child))
        .route(
            "/children/:child_id",
            get(io::get_child)
                .put(io::update_child)
                .delete(io::delete_child),
        )
        .route("/children/:child_id/check-in", post(io::check_in))
        .route(
            "/children/:child_id/attendance/today",
            get(io::get_today_attendance),
        )
        .route(
            "/children/:child_id/attendance",
            get(io::get_attendance_history),
        )
        .route(
            "/attendance/:attendance_id/check-out",
            post(io::check_out),
        )
        .route(
            "/children/:child_id/contacts",
            get(io::list_contacts).post(io::create_contact),
        )
        .route("/contacts/:contact_id", delete(io::delete_contact))
        .route("/roster", get(io::get_roster))
        .route("/roster/summary", get(io::get_roster_summary));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
