use crate::domain::commands::contacts::CreateContactCommand;
use crate::domain::models::contact::Contact as DomainContact;
use shared::{Contact as SharedContact, ContactListResponse, CreateContactRequest};

/// Mapper to convert between shared contact DTOs and domain models.
pub struct ContactMapper;

impl ContactMapper {
    pub fn to_dto(domain: DomainContact) -> SharedContact {
        SharedContact {
            id: domain.id,
            child_id: domain.child_id,
            contact_name: domain.contact_name,
            relationship: domain.relationship,
            phone: domain.phone,
            email: domain.email,
            is_primary: domain.is_primary,
        }
    }

    pub fn to_contact_list_dto(domain_contacts: Vec<DomainContact>) -> ContactListResponse {
        ContactListResponse {
            contacts: domain_contacts.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_create_command(child_id: &str, request: CreateContactRequest) -> CreateContactCommand {
        CreateContactCommand {
            child_id: child_id.to_string(),
            contact_name: request.contact_name,
            relationship: request.relationship,
            phone: request.phone,
            email: request.email,
            is_primary: request.is_primary,
        }
    }
}
