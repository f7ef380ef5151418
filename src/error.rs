//! Typed error surface for the few entry points that take raw caller input.
//!
//! Internal pipeline stages keep using the sentinel-based contract of the
//! reference implementation (`EpochSeconds::INVALID`, a zero month meaning
//! "no such date") because they're called only with already-validated data.
//! This type exists for the handful of outer boundaries that accept input
//! straight from a library consumer.
use std::fmt;
use std::ops::RangeInclusive;

use crate::common::scalar::Year;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// year/month/day combination does not name a real calendar date
    InvalidDate,
    /// hour/minute/second combination is out of range
    InvalidTime,
    /// a requested year falls outside what the zone context supports
    YearOutOfRange {
        year: i32,
        valid: RangeInclusive<i16>,
    },
    /// a wall-clock instant falls beyond every matching era for the zone
    NotFound,
    /// epoch-seconds value equals the invalid sentinel, or is otherwise unusable
    InvalidEpochSeconds,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDate => write!(f, "invalid calendar date"),
            Error::InvalidTime => write!(f, "invalid time of day"),
            Error::YearOutOfRange { year, valid } => write!(
                f,
                "year {} out of supported range {}..={}",
                year,
                valid.start(),
                valid.end()
            ),
            Error::NotFound => write!(f, "wall-clock instant not covered by any zone transition"),
            Error::InvalidEpochSeconds => write!(f, "invalid epoch-seconds value"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

pub(crate) fn check_year(year: i32) -> Result<Year> {
    if year < Year::MIN.get() as i32 || year > Year::MAX.get() as i32 {
        return Err(Error::YearOutOfRange {
            year,
            valid: Year::MIN.get()..=Year::MAX.get(),
        });
    }
    Ok(Year::new_unchecked(year as i16))
}
