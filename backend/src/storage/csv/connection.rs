use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory location.
const DATA_DIR_ENV: &str = "KINDERTRACK_DATA_DIR";

/// CsvConnection manages the data directory layout: one subdirectory per
/// child holding `child.yaml`, `attendance.csv` and `contacts.csv`.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection with an explicit base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory, honoring the
    /// `KINDERTRACK_DATA_DIR` override.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let default_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Kindertrack");
        info!("Using default data directory: {}", default_dir.display());
        Self::new(default_dir)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the directory for a child's data by its directory name
    pub fn child_directory(&self, directory_name: &str) -> PathBuf {
        self.base_directory.join(directory_name)
    }

    /// Get the path of a child's attendance CSV file
    pub fn attendance_file_path(&self, directory_name: &str) -> PathBuf {
        self.child_directory(directory_name).join("attendance.csv")
    }

    /// Get the path of a child's contacts CSV file
    pub fn contacts_file_path(&self, directory_name: &str) -> PathBuf {
        self.child_directory(directory_name).join("contacts.csv")
    }

    /// Ensure a child's directory and CSV files exist, creating them with
    /// headers when missing.
    pub fn ensure_child_files_exist(&self, directory_name: &str) -> Result<()> {
        let child_dir = self.child_directory(directory_name);
        if !child_dir.exists() {
            fs::create_dir_all(&child_dir)?;
        }

        let attendance_path = self.attendance_file_path(directory_name);
        if !attendance_path.exists() {
            let header = "id,child_id,check_in_time,check_in_by,check_out_time,check_out_by\n";
            fs::write(&attendance_path, header)?;
        }

        let contacts_path = self.contacts_file_path(directory_name);
        if !contacts_path.exists() {
            let header = "id,child_id,contact_name,relationship,phone,email,is_primary\n";
            fs::write(&contacts_path, header)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("data");
        let connection = CsvConnection::new(&base).unwrap();
        assert!(base.exists());
        assert_eq!(connection.base_directory(), base.as_path());
    }

    #[test]
    fn test_ensure_child_files_exist() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.ensure_child_files_exist("emma_smith").unwrap();

        let attendance = connection.attendance_file_path("emma_smith");
        let contacts = connection.contacts_file_path("emma_smith");
        assert!(attendance.exists());
        assert!(contacts.exists());

        let header = std::fs::read_to_string(&attendance).unwrap();
        assert!(header.starts_with("id,child_id,check_in_time"));
    }

    #[test]
    fn test_ensure_is_idempotent_and_preserves_content() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.ensure_child_files_exist("emma_smith").unwrap();
        let attendance = connection.attendance_file_path("emma_smith");
        std::fs::write(&attendance, "id,child_id\nsome,row\n").unwrap();

        connection.ensure_child_files_exist("emma_smith").unwrap();
        let content = std::fs::read_to_string(&attendance).unwrap();
        assert!(content.contains("some,row"));
    }
}
