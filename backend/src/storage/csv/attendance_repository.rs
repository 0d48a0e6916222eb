use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use csv::{Reader, Writer};
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use crate::domain::models::attendance::AttendanceRecord;
use crate::storage::traits::{ChildStorage, DuplicateAttendanceDay};

/// CSV-based attendance repository: one `attendance.csv` per child directory.
#[derive(Clone)]
pub struct AttendanceRepository {
    connection: Arc<CsvConnection>,
    child_repository: ChildRepository,
}

impl AttendanceRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let child_repository = ChildRepository::new(connection.clone());
        Self {
            connection,
            child_repository,
        }
    }

    /// Resolve the directory name for a child id, failing when the child is
    /// not on the roster.
    fn directory_for_child(&self, child_id: &str) -> Result<String> {
        self.child_repository
            .find_directory_by_child_id(child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))
    }

    /// Read all attendance records from a child's CSV file
    fn read_records(&self, directory_name: &str) -> Result<Vec<AttendanceRecord>> {
        self.connection.ensure_child_files_exist(directory_name)?;

        let file_path = self.connection.attendance_file_path(directory_name);
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut records = Vec::new();

        for result in csv_reader.records() {
            let row = result?;

            let record = AttendanceRecord {
                id: row.get(0).unwrap_or("").to_string(),
                child_id: row.get(1).unwrap_or("").to_string(),
                check_in_time: parse_instant(row.get(2).unwrap_or(""))
                    .context("Invalid check_in_time in attendance.csv")?,
                check_in_by: parse_optional_string(row.get(3)),
                check_out_time: match row.get(4).unwrap_or("") {
                    "" => None,
                    s => Some(parse_instant(s).context("Invalid check_out_time in attendance.csv")?),
                },
                check_out_by: parse_optional_string(row.get(5)),
            };

            records.push(record);
        }

        Ok(records)
    }

    /// Write all attendance records to a child's CSV file
    fn write_records(&self, directory_name: &str, records: &[AttendanceRecord]) -> Result<()> {
        let file_path = self.connection.attendance_file_path(directory_name);

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
            "check_in_time",
            "check_in_by",
            "check_out_time",
            "check_out_by",
        ])?;

        for record in records {
            csv_writer.write_record([
                record.id.as_str(),
                record.child_id.as_str(),
                &record.check_in_time.to_rfc3339(),
                record.check_in_by.as_deref().unwrap_or(""),
                &record
                    .check_out_time
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                record.check_out_by.as_deref().unwrap_or(""),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

fn parse_optional_string(field: Option<&str>) -> Option<String> {
    match field.unwrap_or("") {
        "" => None,
        s => Some(s.to_string()),
    }
}

impl crate::storage::traits::AttendanceStorage for AttendanceRepository {
    fn store_attendance(&self, record: &AttendanceRecord) -> Result<()> {
        let dir_name = self.directory_for_child(&record.child_id)?;
        let mut records = self.read_records(&dir_name)?;

        // One record per child and local calendar day. This is the
        // write-side backstop behind the advisory guard: a raced second
        // check-in that read stale state is refused here.
        let day = record.check_in_time.with_timezone(&Local).date_naive();
        if records
            .iter()
            .any(|r| r.check_in_time.with_timezone(&Local).date_naive() == day)
        {
            return Err(DuplicateAttendanceDay {
                child_id: record.child_id.clone(),
                day,
            }
            .into());
        }

        records.push(record.clone());
        self.write_records(&dir_name, &records)?;
        debug!("Stored attendance record {} for {}", record.id, record.child_id);
        Ok(())
    }

    fn get_attendance(&self, attendance_id: &str) -> Result<Option<AttendanceRecord>> {
        // Record ids are globally unique, so scan each child's file
        for child in self.child_repository.list_children()? {
            let dir_name = ChildRepository::directory_name_for(&child);
            let records = self.read_records(&dir_name)?;
            if let Some(record) = records.into_iter().find(|r| r.id == attendance_id) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn list_attendance_in_window(
        &self,
        child_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>> {
        let dir_name = match self.child_repository.find_directory_by_child_id(child_id)? {
            Some(dir) => dir,
            None => return Ok(Vec::new()),
        };

        let mut records: Vec<AttendanceRecord> = self
            .read_records(&dir_name)?
            .into_iter()
            .filter(|r| r.check_in_time >= start && r.check_in_time < end)
            .collect();
        records.sort_by_key(|r| r.check_in_time);
        Ok(records)
    }

    fn list_attendance_since(
        &self,
        child_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AttendanceRecord>> {
        let dir_name = match self.child_repository.find_directory_by_child_id(child_id)? {
            Some(dir) => dir,
            None => return Ok(Vec::new()),
        };

        let mut records: Vec<AttendanceRecord> = self
            .read_records(&dir_name)?
            .into_iter()
            .filter(|r| r.check_in_time >= since)
            .collect();
        records.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
        Ok(records)
    }

    fn update_attendance(&self, record: &AttendanceRecord) -> Result<()> {
        let dir_name = self.directory_for_child(&record.child_id)?;
        let mut records = self.read_records(&dir_name)?;

        let position = records
            .iter()
            .position(|r| r.id == record.id)
            .ok_or_else(|| anyhow::anyhow!("Attendance record not found: {}", record.id))?;

        records[position] = record.clone();
        self.write_records(&dir_name, &records)?;
        debug!("Updated attendance record {}", record.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::AttendanceStorage;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn setup() -> (AttendanceRepository, ChildRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        let attendance_repo = AttendanceRepository::new(connection.clone());
        let child_repo = ChildRepository::new(connection);
        (attendance_repo, child_repo, temp_dir)
    }

    fn seed_child(child_repo: &ChildRepository, first: &str) -> String {
        let child = crate::domain::models::child::Child {
            id: crate::domain::models::child::Child::generate_id(),
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            date_of_birth: None,
            group_name: None,
            photo_url: None,
            created_at: Utc::now(),
        };
        child_repo.store_child(&child).unwrap();
        child.id
    }

    fn record_at(child_id: &str, check_in_time: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            id: AttendanceRecord::generate_id(),
            child_id: child_id.to_string(),
            check_in_time,
            check_in_by: Some("profile::staff-1".to_string()),
            check_out_time: None,
            check_out_by: None,
        }
    }

    #[test]
    fn test_store_and_round_trip() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo, "Emma");
        let record = record_at(&child_id, Utc::now());

        repo.store_attendance(&record).unwrap();

        let fetched = repo.get_attendance(&record.id).unwrap();
        assert_eq!(fetched, Some(record));
    }

    #[test]
    fn test_store_rejects_second_record_same_day() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo, "Emma");
        let now = Utc::now();

        repo.store_attendance(&record_at(&child_id, now)).unwrap();

        let err = repo
            .store_attendance(&record_at(&child_id, now + Duration::minutes(5)))
            .unwrap_err();
        assert!(err.downcast_ref::<DuplicateAttendanceDay>().is_some());
    }

    #[test]
    fn test_store_allows_different_days_and_children() {
        let (repo, child_repo, _tmp) = setup();
        let child_a = seed_child(&child_repo, "Emma");
        let child_b = seed_child(&child_repo, "Noah");
        let now = Utc::now();

        repo.store_attendance(&record_at(&child_a, now)).unwrap();
        repo.store_attendance(&record_at(&child_a, now - Duration::days(1)))
            .unwrap();
        repo.store_attendance(&record_at(&child_b, now)).unwrap();
    }

    #[test]
    fn test_same_name_children_keep_separate_files() {
        let (repo, child_repo, _tmp) = setup();
        let first = seed_child(&child_repo, "Emma");
        let second = seed_child(&child_repo, "Emma");
        let now = Utc::now();

        // Same full name, same day: each child has their own file, so the
        // per-day uniqueness check must not block one on the other
        let first_record = record_at(&first, now);
        let second_record = record_at(&second, now);
        repo.store_attendance(&first_record).unwrap();
        repo.store_attendance(&second_record).unwrap();

        assert_eq!(repo.get_attendance(&first_record.id).unwrap(), Some(first_record));
        assert_eq!(
            repo.get_attendance(&second_record.id).unwrap(),
            Some(second_record)
        );
    }

    #[test]
    fn test_store_for_unknown_child_fails() {
        let (repo, _child_repo, _tmp) = setup();
        let record = record_at("child::missing", Utc::now());
        assert!(repo.store_attendance(&record).is_err());
    }

    #[test]
    fn test_list_attendance_in_window() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo, "Emma");

        let start = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(1);

        let inside = record_at(&child_id, start + Duration::hours(8));
        let before = record_at(&child_id, start - Duration::days(2));
        repo.store_attendance(&inside).unwrap();
        repo.store_attendance(&before).unwrap();

        let found = repo
            .list_attendance_in_window(&child_id, start, end)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, inside.id);
    }

    #[test]
    fn test_list_attendance_since_is_newest_first() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo, "Emma");
        let base = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();

        let older = record_at(&child_id, base - Duration::days(2));
        let newer = record_at(&child_id, base);
        let ancient = record_at(&child_id, base - Duration::days(30));
        repo.store_attendance(&older).unwrap();
        repo.store_attendance(&newer).unwrap();
        repo.store_attendance(&ancient).unwrap();

        let found = repo
            .list_attendance_since(&child_id, base - Duration::days(7))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, newer.id);
        assert_eq!(found[1].id, older.id);
    }

    #[test]
    fn test_update_attendance_closes_record() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo, "Emma");
        let mut record = record_at(&child_id, Utc::now());
        repo.store_attendance(&record).unwrap();

        record.check_out_time = Some(record.check_in_time + Duration::hours(8));
        record.check_out_by = Some("profile::parent-1".to_string());
        repo.update_attendance(&record).unwrap();

        let fetched = repo.get_attendance(&record.id).unwrap().unwrap();
        assert_eq!(fetched.check_out_time, record.check_out_time);
        assert_eq!(fetched.check_out_by.as_deref(), Some("profile::parent-1"));
    }

    #[test]
    fn test_update_missing_record_fails() {
        let (repo, child_repo, _tmp) = setup();
        let child_id = seed_child(&child_repo, "Emma");
        let record = record_at(&child_id, Utc::now());
        assert!(repo.update_attendance(&record).is_err());
    }
}
