//! `tzengine`: a time-zone transition engine that resolves instants between
//! a 32-bit epoch-seconds counter, a "plain" (wall-clock) date-time, and a
//! "zoned" date-time annotated with a named IANA time zone, using the
//! transition rules encoded in a compiled form of the IANA TZ Database.
//!
//! The core of the crate is [`tz::processor::ZoneProcessor`]: given a packed
//! [`tz::info::ZoneInfo`] descriptor and a target year, it materialises the
//! active set of DST transitions straddling that year and answers two
//! questions: what offset/abbreviation is in force at a given instant, and
//! which transition(s) cover a given wall-clock date-time.
//!
//! Everything under [`classes`] is a thin façade over the processor, enough
//! to exercise and test it end to end; it is not meant to be a full-featured
//! date-time library in its own right (see `SPEC_FULL.md` for the scope
//! boundary).

pub mod classes;
pub mod common;
pub mod date_tuple;
pub mod epoch;
pub mod error;
pub mod tz;

pub use classes::offset_datetime::OffsetDateTime;
pub use classes::plain_date::PlainDate;
pub use classes::plain_datetime::{PlainDateTime, PlainTime};
pub use classes::zoned_datetime::ZonedDateTime;
pub use epoch::EpochConfig;
pub use error::{Error, Result};
pub use tz::find::Disambiguate;
pub use tz::info::ZoneInfo;
