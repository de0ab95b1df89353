//! The folder of day records.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::config::DaycalConfig;
use crate::constants::RECORD_EXTENSION;
use crate::day::DayBucket;
use crate::error::{DayCalError, DayCalResult};
use crate::event::Event;

/// Result of enumerating the record folder.
#[derive(Debug, Clone, PartialEq)]
pub enum DayListing {
    /// At least one decodable day, sorted by date
    Days(Vec<DayBucket>),
    /// The folder exists but holds no decodable day
    Empty,
    /// The folder does not exist or cannot be read
    Unavailable,
}

impl DayListing {
    /// The days, or `None` when there is no data (empty or unavailable alike).
    pub fn into_days(self) -> Option<Vec<DayBucket>> {
        match self {
            DayListing::Days(days) => Some(days),
            DayListing::Empty | DayListing::Unavailable => None,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, DayListing::Days(_))
    }
}

/// Loads and stores day records under one folder.
#[derive(Debug, Clone)]
pub struct DayRepository {
    dir: PathBuf,
}

impl DayRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DayRepository { dir: dir.into() }
    }

    pub fn from_config(config: &DaycalConfig) -> Self {
        Self::new(config.calendar_path())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(DayBucket::file_name_for(date))
    }

    /// Read the day for `date`, or create and save an empty one if there is
    /// no readable record. An unreadable record is overwritten by the empty day.
    pub fn load_or_create(&self, date: NaiveDate) -> DayCalResult<DayBucket> {
        let path = self.record_path(date);
        debug!("Loading calendar day {} from {}", date, path.display());

        if path.is_file() {
            match DayBucket::from_file(&path) {
                Ok(day) => return Ok(day),
                Err(e) => error!("Unable to read calendar day {}: {e}", path.display()),
            }
        }

        let day = DayBucket::new(date);
        self.persist(&day)?;
        Ok(day)
    }

    /// The day an epoch-millisecond instant falls on, in UTC.
    pub fn bucket_for_timestamp(&self, millis: i64) -> DayCalResult<DayBucket> {
        let date = Self::date_for_timestamp(millis)?;
        debug!("Resolved calendar day from epoch ms {} -> {}", millis, date);
        self.load_or_create(date)
    }

    pub fn date_for_timestamp(millis: i64) -> DayCalResult<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.date_naive())
            .ok_or(DayCalError::InvalidTimestamp(millis))
    }

    /// Write the whole day into this repository's folder, replacing its record.
    pub fn persist(&self, day: &DayBucket) -> DayCalResult<()> {
        match self.write(day) {
            Ok(()) => {
                info!("Saved calendar day: {}", day.date());
                Ok(())
            }
            Err(e) => {
                error!(
                    "Could not save calendar day {} to {}: {e}",
                    day.date(),
                    self.dir.display()
                );
                Err(e)
            }
        }
    }

    fn write(&self, day: &DayBucket) -> DayCalResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.record_path(day.date());
        let temp = path.with_extension(format!("{RECORD_EXTENSION}.tmp"));
        let content = serde_json::to_string_pretty(day)?;

        std::fs::write(&temp, content)?;
        if let Err(e) = std::fs::rename(&temp, &path) {
            let _ = std::fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Remove an event equal to `event` from `day` and persist the day.
    ///
    /// Returns `Ok(None)` without touching storage if no equal event is there.
    /// If the write fails the event stays removed in memory.
    pub fn remove_event(&self, day: &mut DayBucket, event: &Event) -> DayCalResult<Option<Event>> {
        let Some(removed) = day.remove_event(event) else {
            return Ok(None);
        };

        self.persist(day)?;
        Ok(Some(removed))
    }

    /// Every decodable day record in the folder, sorted by date.
    /// Records that fail to decode are skipped.
    pub fn list_all(&self) -> DayListing {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                if self.dir.exists() {
                    warn!("Could not read calendar folder {}: {e}", self.dir.display());
                } else {
                    debug!("Calendar folder {} does not exist", self.dir.display());
                }
                return DayListing::Unavailable;
            }
        };

        let mut days: Vec<DayBucket> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == RECORD_EXTENSION))
            .filter_map(|path| match DayBucket::from_file(&path) {
                Ok(day) => Some(day),
                Err(e) => {
                    warn!("Skipping calendar day {}: {e}", path.display());
                    None
                }
            })
            .collect();

        if days.is_empty() {
            return DayListing::Empty;
        }

        days.sort_by_key(|day| day.date());
        DayListing::Days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_or_create_writes_empty_day() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path().join("calendar"));

        let day = repo.load_or_create(date(2024, 5, 4)).unwrap();

        assert!(day.is_empty());
        assert!(repo.record_path(date(2024, 5, 4)).is_file());
    }

    #[test]
    fn test_load_or_create_reads_existing_day() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());

        let mut day = repo.load_or_create(date(2024, 5, 4)).unwrap();
        let mut event = Event::new();
        event.set_start(1);
        day.upsert(event.clone());
        repo.persist(&day).unwrap();

        let loaded = repo.load_or_create(date(2024, 5, 4)).unwrap();
        assert_eq!(loaded.events(), &[event]);
    }

    #[test]
    fn test_load_or_create_replaces_corrupt_record() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        std::fs::write(repo.record_path(date(2024, 5, 4)), "{ not json").unwrap();

        let day = repo.load_or_create(date(2024, 5, 4)).unwrap();

        assert!(day.is_empty());
        assert!(DayBucket::from_file(&repo.record_path(date(2024, 5, 4))).is_ok());
    }

    #[test]
    fn test_load_or_create_fails_when_folder_is_unwritable() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let repo = DayRepository::new(&blocker);

        assert!(repo.load_or_create(date(2024, 5, 4)).is_err());
    }

    #[test]
    fn test_bucket_for_timestamp_uses_utc_date() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        let late = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap();

        let day = repo.bucket_for_timestamp(late.timestamp_millis()).unwrap();
        assert_eq!(day.date(), date(2024, 2, 29));

        let day = repo.bucket_for_timestamp(late.timestamp_millis() + 1_000).unwrap();
        assert_eq!(day.date(), date(2024, 3, 1));
    }

    #[test]
    fn test_date_for_out_of_range_timestamp() {
        assert!(DayRepository::date_for_timestamp(i64::MAX).is_err());
        assert_eq!(
            DayRepository::date_for_timestamp(-1).unwrap(),
            date(1969, 12, 31)
        );
    }

    #[test]
    fn test_list_all_on_missing_folder_is_unavailable() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path().join("missing"));

        let listing = repo.list_all();
        assert_eq!(listing, DayListing::Unavailable);
        assert!(!listing.has_data());
        assert_eq!(listing.into_days(), None);
    }

    #[test]
    fn test_list_all_on_empty_folder_has_no_data() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());

        let listing = repo.list_all();
        assert_eq!(listing, DayListing::Empty);
        assert_eq!(listing.into_days(), None);
    }

    #[test]
    fn test_list_all_skips_undecodable_records() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        repo.load_or_create(date(2024, 1, 2)).unwrap();
        repo.load_or_create(date(2023, 12, 31)).unwrap();
        std::fs::write(tmp.path().join("2024-01-03.msgcal"), "garbage").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "{}").unwrap();

        let days = repo.list_all().into_days().expect("Should have days");

        let dates: Vec<_> = days.iter().map(|d| d.date()).collect();
        assert_eq!(dates, vec![date(2023, 12, 31), date(2024, 1, 2)]);
    }

    #[test]
    fn test_list_all_with_only_garbage_is_empty() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2024-01-03.msgcal"), "garbage").unwrap();

        assert_eq!(DayRepository::new(tmp.path()).list_all(), DayListing::Empty);
    }

    #[test]
    fn test_persist_replaces_record_without_leftovers() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path().join("calendar"));
        let mut day = DayBucket::new(date(2024, 7, 1));
        let mut event = Event::new();
        event.set_alert(5);
        day.upsert(event);

        repo.persist(&day).unwrap();
        repo.persist(&day).unwrap();

        let stored = DayBucket::from_file(&repo.record_path(date(2024, 7, 1))).unwrap();
        assert_eq!(stored, day);
        assert!(!tmp.path().join("calendar/2024-07-01.msgcal.tmp").exists());
    }

    #[test]
    fn test_decoded_day_persists_into_repository_folder() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        let day: DayBucket =
            serde_json::from_str(r#"{ "DAY_OF_YEAR": 1, "YEAR": 2024, "EVENTS": [] }"#).unwrap();

        repo.persist(&day).unwrap();

        assert!(repo.record_path(date(2024, 1, 1)).is_file());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        // A directory in place of the record makes the rename fail
        std::fs::create_dir(repo.record_path(date(2024, 7, 1))).unwrap();
        std::fs::write(repo.record_path(date(2024, 7, 1)).join("keep"), "").unwrap();

        assert!(repo.persist(&DayBucket::new(date(2024, 7, 1))).is_err());
        assert!(!tmp.path().join("2024-07-01.msgcal.tmp").exists());
    }

    #[test]
    fn test_remove_event_persists_day() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        let mut day = DayBucket::new(date(2024, 7, 1));
        let mut keep = Event::new();
        keep.set_start(1);
        let mut doomed = Event::new();
        doomed.set_start(2);
        day.upsert(keep.clone());
        day.upsert(doomed.clone());
        repo.persist(&day).unwrap();

        let removed = repo.remove_event(&mut day, &doomed).unwrap();

        assert_eq!(removed, Some(doomed));
        let stored = DayBucket::from_file(&repo.record_path(date(2024, 7, 1))).unwrap();
        assert_eq!(stored.events(), &[keep]);
    }

    #[test]
    fn test_remove_missing_event_does_not_write() {
        let tmp = TempDir::new().unwrap();
        let repo = DayRepository::new(tmp.path());
        let mut day = DayBucket::new(date(2024, 7, 1));
        let mut event = Event::new();
        event.set_start(1);

        assert_eq!(repo.remove_event(&mut day, &event).unwrap(), None);
        assert!(!repo.record_path(date(2024, 7, 1)).exists());
    }
}
