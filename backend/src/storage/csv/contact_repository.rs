use anyhow::Result;
use csv::{Reader, Writer};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use crate::domain::models::contact::Contact;
use crate::storage::traits::ChildStorage;

/// CSV-based contact repository: one `contacts.csv` per child directory.
#[derive(Clone)]
pub struct ContactRepository {
    connection: Arc<CsvConnection>,
    child_repository: ChildRepository,
}

impl ContactRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let child_repository = ChildRepository::new(connection.clone());
        Self {
            connection,
            child_repository,
        }
    }

    fn read_contacts(&self, directory_name: &str) -> Result<Vec<Contact>> {
        self.connection.ensure_child_files_exist(directory_name)?;

        let file_path = self.connection.contacts_file_path(directory_name);
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut contacts = Vec::new();

        for result in csv_reader.records() {
            let row = result?;

            let contact = Contact {
                id: row.get(0).unwrap_or("").to_string(),
                child_id: row.get(1).unwrap_or("").to_string(),
                contact_name: row.get(2).unwrap_or("").to_string(),
                relationship: non_empty(row.get(3)),
                phone: non_empty(row.get(4)),
                email: non_empty(row.get(5)),
                is_primary: row.get(6).unwrap_or("false") == "true",
            };

            contacts.push(contact);
        }

        Ok(contacts)
    }

    fn write_contacts(&self, directory_name: &str, contacts: &[Contact]) -> Result<()> {
        let file_path = self.connection.contacts_file_path(directory_name);

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;

        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "child_id",
            "contact_name",
            "relationship",
            "phone",
            "email",
            "is_primary",
        ])?;

        for contact in contacts {
            csv_writer.write_record([
                contact.id.as_str(),
                contact.child_id.as_str(),
                contact.contact_name.as_str(),
                contact.relationship.as_deref().unwrap_or(""),
                contact.phone.as_deref().unwrap_or(""),
                contact.email.as_deref().unwrap_or(""),
                if contact.is_primary { "true" } else { "false" },
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn directory_for_child(&self, child_id: &str) -> Result<String> {
        self.child_repository
            .find_directory_by_child_id(child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))
    }
}

fn non_empty(field: Option<&str>) -> Option<String> {
    match field.unwrap_or("") {
        "" => None,
        s => Some(s.to_string()),
    }
}

impl crate::storage::traits::ContactStorage for ContactRepository {
    fn store_contact(&self, contact: &Contact) -> Result<()> {
        let dir_name = self.directory_for_child(&contact.child_id)?;
        let mut contacts = self.read_contacts(&dir_name)?;
        contacts.push(contact.clone());
        self.write_contacts(&dir_name, &contacts)?;
        debug!("Stored contact {} for {}", contact.id, contact.child_id);
        Ok(())
    }

    fn get_contact(&self, contact_id: &str) -> Result<Option<Contact>> {
        for child in self.child_repository.list_children()? {
            let dir_name = ChildRepository::directory_name_for(&child);
            let contacts = self.read_contacts(&dir_name)?;
            if let Some(contact) = contacts.into_iter().find(|c| c.id == contact_id) {
                return Ok(Some(contact));
            }
        }
        Ok(None)
    }

    fn list_contacts(&self, child_id: &str) -> Result<Vec<Contact>> {
        let dir_name = match self.child_repository.find_directory_by_child_id(child_id)? {
            Some(dir) => dir,
            None => return Ok(Vec::new()),
        };

        let mut contacts = self.read_contacts(&dir_name)?;
        // Primary contacts first, then alphabetical
        contacts.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| a.contact_name.cmp(&b.contact_name))
        });
        Ok(contacts)
    }

    fn delete_contact(&self, contact_id: &str) -> Result<bool> {
        for child in self.child_repository.list_children()? {
            let dir_name = ChildRepository::directory_name_for(&child);
            let mut contacts = self.read_contacts(&dir_name)?;
            let before = contacts.len();
            contacts.retain(|c| c.id != contact_id);
            if contacts.len() != before {
                self.write_contacts(&dir_name, &contacts)?;
                debug!("Deleted contact {}", contact_id);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::ContactStorage;
    use tempfile::TempDir;

    fn setup() -> (ContactRepository, ChildRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (
            ContactRepository::new(connection.clone()),
            ChildRepository::new(connection),
            temp_dir,
        )
    }

    fn seed_child(child_repo: &ChildRepository) -> String {
        let child = crate::domain::models::child::Child {
            id: crate::domain::models::child::Child::generate_id(),
            first_name: "Emma".to_string(),
            last_name: "Smith".to_string(),
            date_of_birth: None,
            group_name: None,
            photo_url: None,
            created_at: chrono::Utc::now(),
        };
        child_repo.store_child(&child).unwrap();
        child.id
    }

    fn contact(child_id: &str, name: &str, is_primary: bool) -> Contact {
        Contact {
            id: Contact::generate_id(),
            child_id: child_id.to_string(),
            contact_name: name.to_string(),
            relationship: Some("mother".to_string()),
            phone: Some("+49 170 0000000".to_string()),
            email: None,
            is_primary,
        }
    }

    #[test]
    fn test_store_and_list_primary_first() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo);

        repo.store_contact(&contact(&child_id, "Uncle Bob", false)).unwrap();
        repo.store_contact(&contact(&child_id, "Zoe Smith", true)).unwrap();
        repo.store_contact(&contact(&child_id, "Aunt Ann", false)).unwrap();

        let contacts = repo.list_contacts(&child_id).unwrap();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].contact_name, "Zoe Smith");
        assert!(contacts[0].is_primary);
        assert_eq!(contacts[1].contact_name, "Aunt Ann");
        assert_eq!(contacts[2].contact_name, "Uncle Bob");
    }

    #[test]
    fn test_optional_fields_round_trip() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo);

        let mut c = contact(&child_id, "Grandma", true);
        c.phone = None;
        c.email = Some("grandma@example.com".to_string());
        repo.store_contact(&c).unwrap();

        let fetched = repo.get_contact(&c.id).unwrap();
        assert_eq!(fetched, Some(c));
    }

    #[test]
    fn test_delete_contact() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo);
        let c = contact(&child_id, "Uncle Bob", false);
        repo.store_contact(&c).unwrap();

        assert!(repo.delete_contact(&c.id).unwrap());
        assert!(repo.list_contacts(&child_id).unwrap().is_empty());
        // Second delete finds nothing
        assert!(!repo.delete_contact(&c.id).unwrap());
    }

    #[test]
    fn test_list_contacts_for_unknown_child_is_empty() {
        let (repo, _child_repo, _tmp) = setup();
        assert!(repo.list_contacts("child::missing").unwrap().is_empty());
    }
}
