//! One calendar day and the events announced on it.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::RECORD_EXTENSION;
use crate::error::{DayCalError, DayCalResult};
use crate::event::Event;

/// All events anchored to one date, stored as `YYYY-MM-DD.msgcal` in the
/// repository folder.
///
/// Events keep insertion order. The bucket owns them; lookups that need to
/// point back at the day return a [`crate::DayEvent`]. A bucket only lives in
/// memory: writing it is up to [`crate::DayRepository::persist`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    date: NaiveDate,
    events: Vec<Event>,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        DayBucket {
            date,
            events: Vec::new(),
        }
    }

    pub fn from_file(path: &Path) -> DayCalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DayCalError::Serialization(format!("{}: {e}", path.display())))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Storage key of a date: `1970-01-01.msgcal`
    pub fn file_name_for(date: NaiveDate) -> String {
        format!("{}.{}", date, RECORD_EXTENSION)
    }

    pub fn file_name(&self) -> String {
        Self::file_name_for(self.date)
    }

    /// First event with the same id as `event`.
    pub fn get_event(&self, event: &Event) -> Option<&Event> {
        self.get_event_by_id(event.id())
    }

    pub fn get_event_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_event_by_id(id).is_some()
    }

    /// Drop any entry with the event's id, then append the event.
    /// Returns true if an entry was replaced. Does not save.
    pub fn upsert(&mut self, event: Event) -> bool {
        let existing = self.events.iter().position(|e| e.id() == event.id());
        if let Some(index) = existing {
            self.events.remove(index);
        }
        self.events.push(event);
        existing.is_some()
    }

    /// Remove the first event equal to `event`. Does not save.
    ///
    /// An entry with the same id but different content is left alone.
    pub fn remove_event(&mut self, event: &Event) -> Option<Event> {
        let index = self.events.iter().position(|e| e == event)?;
        Some(self.events.remove(index))
    }
}

// =============================================================================
// Record format
// =============================================================================

impl Serialize for DayBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("DayBucket", 3)?;
        record.serialize_field("DAY_OF_YEAR", &self.day_of_year())?;
        record.serialize_field("YEAR", &self.year())?;
        record.serialize_field("EVENTS", &self.events)?;
        record.end()
    }
}

#[derive(Deserialize)]
struct DayRecord {
    #[serde(rename = "DAY_OF_YEAR")]
    day_of_year: u32,
    #[serde(rename = "YEAR")]
    year: i32,
    #[serde(rename = "EVENTS", default)]
    events: Option<Vec<Event>>,
}

impl<'de> Deserialize<'de> for DayBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = DayRecord::deserialize(deserializer)?;

        let date = NaiveDate::from_yo_opt(record.year, record.day_of_year).ok_or_else(|| {
            D::Error::custom(DayCalError::InvalidDay {
                year: record.year,
                day_of_year: record.day_of_year,
            })
        })?;

        Ok(DayBucket {
            date,
            events: record.events.unwrap_or_default(),
        })
    }
}
