use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emergency contact for a child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub child_id: String,
    pub contact_name: String,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Primary contacts are listed first on the child profile
    pub is_primary: bool,
}

impl Contact {
    /// Generate a unique ID for a contact
    pub fn generate_id() -> String {
        format!("contact::{}", Uuid::new_v4())
    }
}
