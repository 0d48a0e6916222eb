//! Test utilities for the CSV storage backend.
//!
//! Provides an RAII-scoped data directory so test data is removed even if a
//! test panics.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tempfile::TempDir;

use super::attendance_repository::AttendanceRepository;
use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use super::contact_repository::ContactRepository;
use crate::domain::models::child::Child;
use crate::storage::traits::ChildStorage;

/// A temporary data directory plus a connection into it. Dropping the
/// environment deletes the directory.
pub struct TestEnvironment {
    pub connection: Arc<CsvConnection>,
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = Arc::new(CsvConnection::new(temp_dir.path())?);
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Repository bundle over a fresh test environment.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub child_repo: ChildRepository,
    pub attendance_repo: AttendanceRepository,
    pub contact_repo: ContactRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let child_repo = ChildRepository::new(env.connection.clone());
        let attendance_repo = AttendanceRepository::new(env.connection.clone());
        let contact_repo = ContactRepository::new(env.connection.clone());
        Ok(Self {
            env,
            child_repo,
            attendance_repo,
            contact_repo,
        })
    }

    /// Seed a child on the roster and return it.
    pub fn seed_child(&self, first_name: &str, last_name: &str, group: Option<&str>) -> Result<Child> {
        let child = Child {
            id: Child::generate_id(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: None,
            group_name: group.map(|g| g.to_string()),
            photo_url: None,
            created_at: Utc::now(),
        };
        self.child_repo.store_child(&child)?;
        Ok(child)
    }
}
