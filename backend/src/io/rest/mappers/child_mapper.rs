use crate::domain::commands::children::{CreateChildCommand, UpdateChildCommand};
use crate::domain::models::child::Child as DomainChild;
use shared::{Child as SharedChild, ChildListResponse, CreateChildRequest, UpdateChildRequest};

/// Mapper to convert between shared Child DTOs and domain Child models.
pub struct ChildMapper;

impl ChildMapper {
    /// Converts a domain Child model to a shared Child DTO.
    pub fn to_dto(domain: DomainChild) -> SharedChild {
        SharedChild {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            date_of_birth: domain
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string()),
            group_name: domain.group_name,
            photo_url: domain.photo_url,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_child_list_dto(domain_children: Vec<DomainChild>) -> ChildListResponse {
        ChildListResponse {
            children: domain_children.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_create_command(request: CreateChildRequest) -> CreateChildCommand {
        CreateChildCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            group_name: request.group_name,
            photo_url: request.photo_url,
        }
    }

    pub fn to_update_command(child_id: &str, request: UpdateChildRequest) -> UpdateChildCommand {
        UpdateChildCommand {
            child_id: child_id.to_string(),
            first_name: request.first_name,
            last_name: request.last_name,
            date_of_birth: request.date_of_birth,
            group_name: request.group_name,
            photo_url: request.photo_url,
        }
    }
}
