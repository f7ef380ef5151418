//! The small set of value types built on top of [`crate::tz`]: plain
//! calendar dates and times, a fixed-offset datetime, and a datetime
//! resolved against a named zone.
pub mod offset_datetime;
pub mod plain_date;
pub mod plain_datetime;
pub mod zoned_datetime;
