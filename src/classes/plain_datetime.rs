//! `PlainTime` and `PlainDateTime`: a validated time-of-day and a calendar
//! date combined with one, both still independent of any UTC offset or time
//! zone.
use std::fmt;

use crate::classes::plain_date::PlainDate;
use crate::date_tuple::{DateTuple, Suffix};
use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PlainTime {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
}

impl PlainTime {
    pub const MIDNIGHT: PlainTime = PlainTime { hour: 0, minute: 0, second: 0 };

    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(Error::InvalidTime);
        }
        Ok(PlainTime { hour, minute, second })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn second(self) -> u8 {
        self.second
    }

    pub(crate) fn seconds_of_day(self) -> i32 {
        i32::from(self.hour) * 3600 + i32::from(self.minute) * 60 + i32::from(self.second)
    }

    pub(crate) fn from_seconds_of_day(seconds: i32) -> Self {
        debug_assert!((0..86_400).contains(&seconds));
        PlainTime {
            hour: (seconds / 3600) as u8,
            minute: ((seconds % 3600) / 60) as u8,
            second: (seconds % 60) as u8,
        }
    }
}

impl fmt::Display for PlainTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A date paired with a time of day, with no attached offset or zone. The
/// seed representation that [`crate::classes::offset_datetime::OffsetDateTime`]
/// and [`crate::classes::zoned_datetime::ZonedDateTime`] attach meaning to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlainDateTime {
    pub date: PlainDate,
    pub time: PlainTime,
}

impl PlainDateTime {
    pub fn new(date: PlainDate, time: PlainTime) -> Self {
        PlainDateTime { date, time }
    }

    pub(crate) fn to_date_tuple(self, suffix: Suffix) -> DateTuple {
        self.date.to_date_tuple(self.time.seconds_of_day(), suffix)
    }

    pub(crate) fn from_date_tuple(dt: &DateTuple) -> Self {
        PlainDateTime {
            date: PlainDate::from_date_tuple(dt),
            time: PlainTime::from_seconds_of_day(dt.seconds.rem_euclid(86_400)),
        }
    }
}

impl fmt::Display for PlainDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_time() {
        assert_eq!(PlainTime::new(24, 0, 0), Err(Error::InvalidTime));
        assert_eq!(PlainTime::new(23, 60, 0), Err(Error::InvalidTime));
        assert!(PlainTime::new(23, 59, 59).is_ok());
    }

    #[test]
    fn seconds_of_day_round_trips() {
        let t = PlainTime::new(13, 45, 30).unwrap();
        assert_eq!(PlainTime::from_seconds_of_day(t.seconds_of_day()), t);
    }

    #[test]
    fn displays_as_iso() {
        let dt = PlainDateTime::new(PlainDate::new(2022, 3, 13).unwrap(), PlainTime::new(2, 30, 0).unwrap());
        assert_eq!(dt.to_string(), "2022-03-13T02:30:00");
    }

    #[test]
    fn date_tuple_round_trips() {
        let dt = PlainDateTime::new(PlainDate::new(2022, 11, 6).unwrap(), PlainTime::new(1, 30, 0).unwrap());
        let tuple = dt.to_date_tuple(Suffix::Wall);
        assert_eq!(PlainDateTime::from_date_tuple(&tuple), dt);
    }
}
