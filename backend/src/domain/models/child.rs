use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a child on the facility roster.
///
/// The core performs no validation beyond what the services enforce at the
/// write path; the child is otherwise an opaque key plus display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub group_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Child {
    /// Generate a unique ID for a child
    pub fn generate_id() -> String {
        format!("child::{}", Uuid::new_v4())
    }

    /// Display name as shown on the roster
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
