use anyhow::Result;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::domain::models::child::Child;

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlChild {
    id: String,
    first_name: String,
    last_name: String,
    date_of_birth: Option<String>,
    group_name: Option<String>,
    photo_url: Option<String>,
    created_at: String,
}

/// Filesystem-backed child repository: one directory per child, discovered
/// by scanning the base directory for `child.yaml` files.
#[derive(Clone)]
pub struct ChildRepository {
    connection: Arc<CsvConnection>,
}

impl ChildRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Directory name for a child: the name slug plus a fragment of the
    /// child's id, so two children sharing a full name never share a
    /// directory. "Emma Smith" with id `child::3f2a...` -> `emma_smith_3f2a...`.
    pub fn directory_name_for(child: &Child) -> String {
        let slug = Self::generate_safe_directory_name(&child.full_name());
        format!("{}_{}", slug, Self::id_fragment(&child.id))
    }

    fn id_fragment(child_id: &str) -> &str {
        let raw = child_id.strip_prefix("child::").unwrap_or(child_id);
        &raw[..raw.len().min(8)]
    }

    /// Generate a safe filesystem identifier from a child's full name.
    /// "Emma Smith" -> "emma_smith", "José María" -> "jose_maria".
    pub fn generate_safe_directory_name(full_name: &str) -> String {
        let mapped: String = full_name
            .chars()
            .map(|c| {
                if c.is_whitespace() {
                    '_'
                } else {
                    match c {
                        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
                        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
                        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
                        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
                        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
                        'ñ' | 'Ñ' => 'n',
                        'ç' | 'Ç' => 'c',
                        c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
                        _ => '_',
                    }
                }
            })
            .collect();

        // Collapse consecutive underscores
        let mut collapsed = String::new();
        let mut last_was_underscore = false;
        for c in mapped.chars() {
            if c == '_' {
                if !last_was_underscore {
                    collapsed.push('_');
                }
                last_was_underscore = true;
            } else {
                collapsed.push(c);
                last_was_underscore = false;
            }
        }

        collapsed.trim_matches('_').to_string()
    }

    fn child_yaml_path(&self, directory_name: &str) -> PathBuf {
        self.connection.child_directory(directory_name).join("child.yaml")
    }

    /// Discover all children by scanning subdirectories of the base directory
    fn discover_children(&self) -> Result<Vec<Child>> {
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            debug!("Base directory doesn't exist, returning empty roster");
            return Ok(Vec::new());
        }

        let mut children = Vec::new();

        for entry in fs::read_dir(base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => {
                    warn!("Skipping directory with invalid name: {:?}", path);
                    continue;
                }
            };

            match self.load_child_from_directory(dir_name) {
                Ok(Some(child)) => {
                    debug!("Discovered child {} in directory {}", child.id, dir_name);
                    children.push(child);
                }
                Ok(None) => {
                    debug!("Directory {} doesn't contain a child.yaml", dir_name);
                }
                Err(e) => {
                    warn!("Error loading child from directory {}: {}", dir_name, e);
                }
            }
        }

        // Roster ordering: first name, then last name
        children.sort_by(|a, b| {
            a.first_name
                .cmp(&b.first_name)
                .then_with(|| a.last_name.cmp(&b.last_name))
        });

        Ok(children)
    }

    fn load_child_from_directory(&self, directory_name: &str) -> Result<Option<Child>> {
        let yaml_path = self.child_yaml_path(directory_name);

        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let yaml_child: YamlChild = serde_yaml::from_str(&yaml_content)?;

        let date_of_birth = match yaml_child.date_of_birth {
            Some(s) => Some(
                chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Failed to parse date_of_birth: {}", e))?,
            ),
            None => None,
        };

        let child = Child {
            id: yaml_child.id,
            first_name: yaml_child.first_name,
            last_name: yaml_child.last_name,
            date_of_birth,
            group_name: yaml_child.group_name,
            photo_url: yaml_child.photo_url,
            created_at: chrono::DateTime::parse_from_rfc3339(&yaml_child.created_at)
                .map_err(|e| anyhow::anyhow!("Failed to parse created_at: {}", e))?
                .with_timezone(&chrono::Utc),
        };

        Ok(Some(child))
    }

    fn save_child_to_directory(&self, child: &Child, directory_name: &str) -> Result<()> {
        self.connection.ensure_child_files_exist(directory_name)?;

        let yaml_child = YamlChild {
            id: child.id.clone(),
            first_name: child.first_name.clone(),
            last_name: child.last_name.clone(),
            date_of_birth: child.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
            group_name: child.group_name.clone(),
            photo_url: child.photo_url.clone(),
            created_at: child.created_at.to_rfc3339(),
        };

        let yaml_path = self.child_yaml_path(directory_name);
        let yaml_content = serde_yaml::to_string(&yaml_child)?;

        // Atomic write using temp file
        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &yaml_path)?;

        info!("Saved child {} to directory {}", child.id, directory_name);

        Ok(())
    }

    /// Find the directory name for a child by ID
    pub fn find_directory_by_child_id(&self, child_id: &str) -> Result<Option<String>> {
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            return Ok(None);
        }

        for entry in fs::read_dir(base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let dir_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            if let Ok(Some(loaded)) = self.load_child_from_directory(&dir_name) {
                if loaded.id == child_id {
                    return Ok(Some(dir_name));
                }
            }
        }

        Ok(None)
    }
}

impl crate::storage::traits::ChildStorage for ChildRepository {
    fn store_child(&self, child: &Child) -> Result<()> {
        let dir_name = Self::directory_name_for(child);
        self.save_child_to_directory(child, &dir_name)
    }

    fn get_child(&self, child_id: &str) -> Result<Option<Child>> {
        let children = self.discover_children()?;
        Ok(children.into_iter().find(|c| c.id == child_id))
    }

    fn list_children(&self) -> Result<Vec<Child>> {
        self.discover_children()
    }

    fn update_child(&self, child: &Child) -> Result<()> {
        // Locate the existing directory first so renames don't orphan data
        if let Some(old_dir) = self.find_directory_by_child_id(&child.id)? {
            let new_dir = Self::directory_name_for(child);
            if new_dir != old_dir {
                let old_path = self.connection.child_directory(&old_dir);
                let new_path = self.connection.child_directory(&new_dir);
                fs::rename(&old_path, &new_path)?;
                info!("Renamed child directory {} -> {}", old_dir, new_dir);
            }
            self.save_child_to_directory(child, &new_dir)
        } else {
            warn!("Attempted to update a non-existent child: {}", child.id);
            Err(anyhow::anyhow!("Child not found for update"))
        }
    }

    fn delete_child(&self, child_id: &str) -> Result<()> {
        if let Some(dir_name) = self.find_directory_by_child_id(child_id)? {
            let child_dir = self.connection.child_directory(&dir_name);
            if child_dir.exists() {
                fs::remove_dir_all(&child_dir)?;
                info!("Deleted child directory: {:?}", child_dir);
            }
        } else {
            warn!("Attempted to delete a non-existent child: {}", child_id);
        }
        Ok(())
    }
}
