//! Alert, start and end timestamps of an event.
//!
//! All values are epoch milliseconds. Setting a value cascades forward:
//! alert fills an unset start, start fills an unset end. Nothing is checked
//! for ordering, so a start after the end is accepted.

use chrono::TimeDelta;

use crate::constants::UNSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timing {
    alert: Option<i64>,
    start: Option<i64>,
    end: Option<i64>,
}

impl Timing {
    pub fn alert(&self) -> Option<i64> {
        self.alert
    }

    pub fn start(&self) -> Option<i64> {
        self.start
    }

    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Set the alert time. An unset start (and through it an unset end)
    /// takes the same value. `UNSET` clears the alert.
    pub fn with_alert(mut self, millis: i64) -> Self {
        self.alert = from_stored(millis);
        if self.start.is_none() {
            self = self.with_start(millis);
        }
        self
    }

    /// Set the start time. An unset end takes the same value.
    pub fn with_start(mut self, millis: i64) -> Self {
        self.start = from_stored(millis);
        if self.end.is_none() {
            self = self.with_end(millis);
        }
        self
    }

    pub fn with_end(mut self, millis: i64) -> Self {
        self.end = from_stored(millis);
        self
    }

    /// The instant that decides which day an event belongs to: the alert if
    /// set, otherwise the start.
    pub fn announcement_time(&self) -> Option<i64> {
        self.alert.or(self.start)
    }

    /// Length of the event. Absolute, since start may exceed end.
    pub fn duration(&self) -> Option<TimeDelta> {
        let (start, end) = (self.start?, self.end?);
        millis_between(start, end)
    }

    /// The three values as written to a day record, `UNSET` standing in for none.
    pub fn to_stored(&self) -> (i64, i64, i64) {
        (
            self.alert.unwrap_or(UNSET),
            self.start.unwrap_or(UNSET),
            self.end.unwrap_or(UNSET),
        )
    }
}

fn from_stored(millis: i64) -> Option<i64> {
    (millis != UNSET).then_some(millis)
}

/// Absolute span between two epoch-millisecond instants.
pub(crate) fn millis_between(a: i64, b: i64) -> Option<TimeDelta> {
    i64::try_from(a.abs_diff(b))
        .ok()
        .and_then(TimeDelta::try_milliseconds)
}
