//! Core types for daycal.
//!
//! Events are grouped by the UTC calendar day on which they are announced and
//! each day is stored as one `YYYY-MM-DD.msgcal` record:
//! - `event` and `timing` for the schedulable item and its alert/start/end rules
//! - `payload` for typed side-data attached to events (tag-dispatched registry)
//! - `day` and `repository` for day records and the folder that holds them
//! - `calendar` for cross-day lookup, save and delete

pub mod calendar;
pub mod config;
pub mod constants;
pub mod day;
pub mod duration;
pub mod error;
pub mod event;
pub mod payload;
pub mod repository;
pub mod timing;

pub use calendar::{Calendar, DayEvent};
pub use day::DayBucket;
pub use duration::format_duration;
pub use error::{DayCalError, DayCalResult};
pub use event::Event;
pub use payload::{ChatPayload, DefaultPayload, Payload, PayloadVariant};
pub use repository::{DayListing, DayRepository};
pub use timing::Timing;
