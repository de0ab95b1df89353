//! Lookup, save and delete across all days.

use tracing::debug;

use crate::config::DaycalConfig;
use crate::day::DayBucket;
use crate::error::DayCalResult;
use crate::event::Event;
use crate::repository::{DayListing, DayRepository};

/// An event together with the day it was found in. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEvent {
    pub day: DayBucket,
    pub event: Event,
}

/// Entry point for working with stored events.
///
/// Days are scanned in date order. An id stored in two days (see
/// [`Event::save`]) resolves to the earliest day.
#[derive(Debug, Clone)]
pub struct Calendar {
    repo: DayRepository,
}

impl Calendar {
    pub fn new(repo: DayRepository) -> Self {
        Calendar { repo }
    }

    /// Calendar in the folder named by the global config.
    pub fn load() -> DayCalResult<Self> {
        let config = DaycalConfig::load()?;
        Ok(Self::new(DayRepository::from_config(&config)))
    }

    pub fn repository(&self) -> &DayRepository {
        &self.repo
    }

    /// The day an epoch-millisecond instant belongs to, created if needed.
    pub fn day_for(&self, millis: i64) -> DayCalResult<DayBucket> {
        self.repo.bucket_for_timestamp(millis)
    }

    pub fn days(&self) -> DayListing {
        self.repo.list_all()
    }

    pub fn save_event(&self, event: &Event) -> DayCalResult<DayEvent> {
        event.save(&self.repo)
    }

    pub fn find_event(&self, id: &str) -> Option<DayEvent> {
        let days = self.repo.list_all().into_days()?;

        days.into_iter().find_map(|day| {
            let event = day.get_event_by_id(id)?.clone();
            Some(DayEvent { day, event })
        })
    }

    /// Remove the event with `id` from the first day holding it.
    ///
    /// `Ok(None)` if no day holds it. The returned day no longer contains the event.
    pub fn delete_event(&self, id: &str) -> DayCalResult<Option<DayEvent>> {
        let Some(DayEvent { mut day, event }) = self.find_event(id) else {
            debug!("No calendar event to delete: {id}");
            return Ok(None);
        };

        match self.repo.remove_event(&mut day, &event)? {
            Some(removed) => {
                debug!("Deleted calendar event {} from {}", id, day.date());
                Ok(Some(DayEvent {
                    day,
                    event: removed,
                }))
            }
            None => Ok(None),
        }
    }
}
