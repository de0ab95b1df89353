/// Extension of a day record: `1970-01-01.msgcal`
pub const RECORD_EXTENSION: &str = "msgcal";

/// Stored value of a timestamp that has not been set.
pub const UNSET: i64 = -1;

/// Default folder holding the day records.
pub const DEFAULT_CALENDAR_DIR: &str = "~/.daycal/calendar";
