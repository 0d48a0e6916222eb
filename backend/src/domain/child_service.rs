use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::children::{
    CreateChildCommand, CreateChildResult, DeleteChildResult, GetChildResult, ListChildrenResult,
    UpdateChildCommand, UpdateChildResult,
};
use crate::domain::models::child::Child;
use crate::storage::csv::{ChildRepository, CsvConnection};
use crate::storage::traits::ChildStorage;

/// Service for managing the child roster
#[derive(Clone)]
pub struct ChildService {
    child_repository: ChildRepository,
}

impl ChildService {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let child_repository = ChildRepository::new(connection);
        Self { child_repository }
    }

    /// Add a child to the roster
    pub fn create_child(&self, command: CreateChildCommand) -> Result<CreateChildResult> {
        info!(
            "Creating child: {} {}",
            command.first_name, command.last_name
        );

        self.validate_names(&command.first_name, &command.last_name)?;
        let date_of_birth = command
            .date_of_birth
            .as_deref()
            .map(parse_birth_date)
            .transpose()?;

        let child = Child {
            id: Child::generate_id(),
            first_name: command.first_name.trim().to_string(),
            last_name: command.last_name.trim().to_string(),
            date_of_birth,
            group_name: normalize_optional(command.group_name),
            photo_url: normalize_optional(command.photo_url),
            created_at: Utc::now(),
        };

        self.child_repository.store_child(&child)?;

        info!("Created child {} ({})", child.full_name(), child.id);

        Ok(CreateChildResult { child })
    }

    /// Get a child by ID
    pub fn get_child(&self, child_id: &str) -> Result<GetChildResult> {
        let child = self.child_repository.get_child(child_id)?;

        if child.is_none() {
            warn!("Child not found: {}", child_id);
        }

        Ok(GetChildResult { child })
    }

    /// List all children, ordered by first name
    pub fn list_children(&self) -> Result<ListChildrenResult> {
        let children = self.child_repository.list_children()?;
        info!("Listed {} children", children.len());
        Ok(ListChildrenResult { children })
    }

    /// Update an existing child
    pub fn update_child(&self, command: UpdateChildCommand) -> Result<UpdateChildResult> {
        info!("Updating child: {}", command.child_id);

        let mut child = self
            .child_repository
            .get_child(&command.child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        if let Some(first_name) = command.first_name {
            child.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = command.last_name {
            child.last_name = last_name.trim().to_string();
        }
        self.validate_names(&child.first_name, &child.last_name)?;

        if let Some(date_str) = command.date_of_birth {
            child.date_of_birth = Some(parse_birth_date(&date_str)?);
        }
        if let Some(group_name) = command.group_name {
            child.group_name = normalize_optional(Some(group_name));
        }
        if let Some(photo_url) = command.photo_url {
            child.photo_url = normalize_optional(Some(photo_url));
        }

        self.child_repository.update_child(&child)?;

        info!("Updated child {} ({})", child.full_name(), child.id);

        Ok(UpdateChildResult { child })
    }

    /// Remove a child and everything filed under them
    pub fn delete_child(&self, child_id: &str) -> Result<DeleteChildResult> {
        info!("Deleting child: {}", child_id);

        let child = self
            .child_repository
            .get_child(child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))?;

        self.child_repository.delete_child(child_id)?;

        Ok(DeleteChildResult {
            success_message: format!("Child '{}' removed from the roster", child.full_name()),
        })
    }

    fn validate_names(&self, first_name: &str, last_name: &str) -> Result<()> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Child name cannot be empty"));
        }
        if first_name.len() > 100 || last_name.len() > 100 {
            return Err(anyhow::anyhow!("Child name cannot exceed 100 characters"));
        }
        Ok(())
    }
}

fn parse_birth_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .context("Invalid date_of_birth format, expected YYYY-MM-DD")
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
