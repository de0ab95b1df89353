//! A schedulable item such as a reminder, an alert or a time range.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;
use uuid::Uuid;

use crate::calendar::DayEvent;
use crate::error::{DayCalError, DayCalResult};
use crate::payload::Payload;
use crate::repository::DayRepository;
use crate::timing::{Timing, millis_between};

/// A calendar event, such as someone's birthday or when dinner is ready.
///
/// Identity and creation time are fixed at construction. All timestamps are
/// epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: String,
    created_on: i64,
    /// Caller-defined, typically "not yet announced"
    active: bool,
    timing: Timing,
    name: Option<String>,
    description: Option<String>,
    payload: Option<Payload>,
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl Event {
    /// A new event with a fresh id, created now.
    pub fn new() -> Self {
        Self::from_stored(Uuid::new_v4().to_string(), Utc::now().timestamp_millis())
    }

    /// An event restored from a record. Everything but identity and creation
    /// time starts out unset.
    pub fn from_stored(id: impl Into<String>, created_on: i64) -> Self {
        Event {
            id: id.into(),
            created_on,
            active: true,
            timing: Timing::default(),
            name: None,
            description: None,
            payload: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_on(&self) -> i64 {
        self.created_on
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_inactive(&self) -> bool {
        !self.active
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn alert(&self) -> Option<i64> {
        self.timing.alert()
    }

    pub fn start(&self) -> Option<i64> {
        self.timing.start()
    }

    pub fn end(&self) -> Option<i64> {
        self.timing.end()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.active = active;
        self
    }

    /// Also sets start (and end) when they are unset. See [`Timing::with_alert`].
    pub fn set_alert(&mut self, millis: i64) -> &mut Self {
        self.timing = self.timing.with_alert(millis);
        self
    }

    /// Also sets end when it is unset. See [`Timing::with_start`].
    pub fn set_start(&mut self, millis: i64) -> &mut Self {
        self.timing = self.timing.with_start(millis);
        self
    }

    pub fn set_end(&mut self, millis: i64) -> &mut Self {
        self.timing = self.timing.with_end(millis);
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_payload(&mut self, payload: impl Into<Payload>) -> &mut Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn clear_payload(&mut self) -> &mut Self {
        self.payload = None;
        self
    }

    // =========================================================================
    // Computed times
    // =========================================================================

    /// Alert if set, otherwise start. Decides which day the event is stored in.
    pub fn announcement_time(&self) -> Option<i64> {
        self.timing.announcement_time()
    }

    /// Time between creation and the announcement.
    pub fn time_between(&self) -> Option<TimeDelta> {
        millis_between(self.created_on, self.announcement_time()?)
    }

    /// Time from now until the announcement, negative once it has passed.
    pub fn time_until(&self) -> Option<TimeDelta> {
        self.time_until_at(Utc::now())
    }

    pub fn time_until_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        signed_from(now, self.announcement_time()?)
    }

    /// Time from now until the event starts.
    pub fn starts_in(&self) -> Option<TimeDelta> {
        self.starts_in_at(Utc::now())
    }

    pub fn starts_in_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        signed_from(now, self.start()?)
    }

    /// Time from now until the event ends.
    pub fn ends_in(&self) -> Option<TimeDelta> {
        self.ends_in_at(Utc::now())
    }

    pub fn ends_in_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        signed_from(now, self.end()?)
    }

    /// Length of the event from start to end.
    pub fn duration(&self) -> Option<TimeDelta> {
        self.timing.duration()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Add or update this event in the day of its announcement time.
    ///
    /// An existing entry with the same id in that day is replaced and the
    /// event moves to the end of the day. Only that day is looked at: if the
    /// announcement time moved to another day since the last save, the old
    /// day keeps its stale copy.
    ///
    /// An event with neither alert nor start has no announcement day and
    /// fails with [`DayCalError::Unscheduled`]; nothing is written.
    pub fn save(&self, repo: &DayRepository) -> DayCalResult<DayEvent> {
        let at = self
            .announcement_time()
            .ok_or_else(|| DayCalError::Unscheduled(self.id.clone()))?;

        let mut day = repo.bucket_for_timestamp(at)?;
        let replaced = day.upsert(self.clone());
        debug!(
            "{} calendar event: {}",
            if replaced { "Updating" } else { "Adding" },
            self.id
        );
        repo.persist(&day)?;

        Ok(DayEvent {
            day,
            event: self.clone(),
        })
    }

    /// Multi-line dump of every field.
    pub fn pretty_print(&self) -> String {
        let (alert, start, end) = self.timing.to_stored();
        format!(
            "# Event #\n id: {}\n active: {}\n created_on: {}\n alert: {}\n start: {}\n end: {}\n name: {}\n description: {}\n payload: {}",
            self.id,
            self.active,
            self.created_on,
            alert,
            start,
            end,
            self.name.as_deref().unwrap_or("-"),
            self.description.as_deref().unwrap_or("-"),
            self.payload
                .as_ref()
                .map(|p| format!("{p:?}"))
                .unwrap_or_else(|| "-".to_string()),
        )
    }
}

fn signed_from(now: DateTime<Utc>, millis: i64) -> Option<TimeDelta> {
    let at = DateTime::<Utc>::from_timestamp_millis(millis)?;
    Some(at.signed_duration_since(now))
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

// =============================================================================
// Record format
// =============================================================================

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (alert, start, end) = self.timing.to_stored();

        let mut record = serializer.serialize_struct("Event", 9)?;
        record.serialize_field("UNIQUE_ID", &self.id)?;
        record.serialize_field("active", &self.active)?;
        record.serialize_field("CREATED_ON", &self.created_on)?;
        record.serialize_field("alert", &alert)?;
        record.serialize_field("start", &start)?;
        record.serialize_field("end", &end)?;
        record.serialize_field("name", &self.name)?;
        record.serialize_field("description", &self.description)?;
        record.serialize_field("data", &self.payload)?;
        record.end()
    }
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
struct EventRecord {
    #[serde(rename = "UNIQUE_ID")]
    id: String,
    #[serde(rename = "CREATED_ON")]
    created_on: i64,
    #[serde(default = "default_active")]
    active: bool,
    alert: Option<i64>,
    start: Option<i64>,
    end: Option<i64>,
    name: Option<String>,
    description: Option<String>,
    data: Option<Payload>,
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = EventRecord::deserialize(deserializer)?;

        let mut event = Event::from_stored(record.id, record.created_on);
        event.active = record.active;

        // Applied in record order through the setters, so a record missing
        // start or end gets them filled the same way a caller would.
        if let Some(alert) = record.alert {
            event.set_alert(alert);
        }
        if let Some(start) = record.start {
            event.set_start(start);
        }
        if let Some(end) = record.end {
            event.set_end(end);
        }

        event.name = record.name;
        event.description = record.description;
        event.payload = record.data;
        Ok(event)
    }
}
