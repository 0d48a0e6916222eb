use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::commands::contacts::{
    CreateContactCommand, CreateContactResult, DeleteContactCommand, DeleteContactResult,
    ListContactsResult,
};
use crate::domain::models::contact::Contact;
use crate::storage::csv::{ChildRepository, ContactRepository, CsvConnection};
use crate::storage::traits::{ChildStorage, ContactStorage};

/// Service for a child's emergency contacts
#[derive(Clone)]
pub struct ContactService {
    contact_repository: ContactRepository,
    child_repository: ChildRepository,
}

impl ContactService {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            contact_repository: ContactRepository::new(connection.clone()),
            child_repository: ChildRepository::new(connection),
        }
    }

    /// File a contact under a child
    pub fn create_contact(&self, command: CreateContactCommand) -> Result<CreateContactResult> {
        info!(
            "Adding contact '{}' for {}",
            command.contact_name, command.child_id
        );

        let name = command.contact_name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow::anyhow!("Contact name cannot be empty"));
        }

        self.child_repository
            .get_child(&command.child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        let contact = Contact {
            id: Contact::generate_id(),
            child_id: command.child_id,
            contact_name: name,
            relationship: normalize_optional(command.relationship),
            phone: normalize_optional(command.phone),
            email: normalize_optional(command.email),
            is_primary: command.is_primary,
        };

        self.contact_repository.store_contact(&contact)?;

        Ok(CreateContactResult { contact })
    }

    /// List a child's contacts, primary first
    pub fn list_contacts(&self, child_id: &str) -> Result<ListContactsResult> {
        self.child_repository
            .get_child(child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))?;

        let contacts = self.contact_repository.list_contacts(child_id)?;
        Ok(ListContactsResult { contacts })
    }

    /// Remove a contact by ID
    pub fn delete_contact(&self, command: DeleteContactCommand) -> Result<DeleteContactResult> {
        info!("Deleting contact: {}", command.contact_id);

        let removed = self.contact_repository.delete_contact(&command.contact_id)?;
        if !removed {
            return Err(anyhow::anyhow!(
                "Contact not found: {}",
                command.contact_id
            ));
        }

        Ok(DeleteContactResult {
            success_message: "Contact removed".to_string(),
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
