//! `PlainDate`: a validated (year, month, day) calendar date, independent of
//! any time zone or time of day. Thin wrapper over [`crate::common::scalar`]
//! plus the day-counting in [`crate::epoch`].
use std::fmt;

use crate::common::scalar::{days_in_month, Month, Weekday, Year};
use crate::date_tuple::{DateTuple, Suffix};
use crate::epoch::{day_of_week, EpochConfig};
use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlainDate {
    pub(crate) year: Year,
    pub(crate) month: Month,
    pub(crate) day: u8,
}

impl PlainDate {
    pub const MIN: PlainDate = PlainDate { year: Year::MIN, month: Month::January, day: 1 };
    pub const MAX: PlainDate = PlainDate { year: Year::MAX, month: Month::December, day: 31 };

    /// Validate `(year, month, day)` as a real calendar date. `month`/`day`
    /// out of range, or a day that doesn't exist in that year/month (e.g.
    /// 2021-02-29), is rejected with [`Error::InvalidDate`].
    pub fn new(year: i16, month: u8, day: u8) -> Result<Self> {
        let year = Year::new(year).ok_or(Error::InvalidDate)?;
        let month = Month::new(month).ok_or(Error::InvalidDate)?;
        if day < 1 || day > days_in_month(year, month) {
            return Err(Error::InvalidDate);
        }
        Ok(PlainDate { year, month, day })
    }

    pub fn year(self) -> i16 {
        self.year.get()
    }

    pub fn month(self) -> u8 {
        self.month.get()
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn day_of_week(self) -> Weekday {
        day_of_week(self.year.get(), self.month, self.day)
    }

    pub(crate) fn to_date_tuple(self, seconds: i32, suffix: Suffix) -> DateTuple {
        DateTuple::new(self.year.get(), self.month.get(), self.day, seconds, suffix)
    }

    pub(crate) fn from_date_tuple(dt: &DateTuple) -> Self {
        PlainDate {
            year: Year::new_unchecked(dt.year),
            month: Month::new_unchecked(dt.month),
            day: dt.day,
        }
    }

    /// Day count relative to `cfg`'s current epoch year.
    pub fn epoch_days(self, cfg: &EpochConfig) -> i32 {
        cfg.days_from_ymd(i32::from(self.year.get()), self.month.get(), self.day)
    }

    pub fn from_epoch_days(cfg: &EpochConfig, epoch_days: i32) -> Self {
        let (y, m, d) = cfg.date_from_days(epoch_days);
        PlainDate { year: Year::new_unchecked(y as i16), month: Month::new_unchecked(m), day: d }
    }
}

impl fmt::Display for PlainDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year.get(), self.month.get(), self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonexistent_day() {
        assert_eq!(PlainDate::new(2021, 2, 29), Err(Error::InvalidDate));
        assert!(PlainDate::new(2020, 2, 29).is_ok());
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert_eq!(PlainDate::new(2022, 13, 1), Err(Error::InvalidDate));
        assert_eq!(PlainDate::new(2022, 0, 1), Err(Error::InvalidDate));
    }

    #[test]
    fn displays_as_iso() {
        assert_eq!(PlainDate::new(2022, 3, 13).unwrap().to_string(), "2022-03-13");
    }

    #[test]
    fn day_of_week_matches_known_date() {
        // 2022-11-06 was a Sunday.
        assert_eq!(PlainDate::new(2022, 11, 6).unwrap().day_of_week(), Weekday::Sunday);
    }

    #[test]
    fn epoch_days_round_trips() {
        let cfg = EpochConfig::default();
        let d = PlainDate::new(2022, 3, 13).unwrap();
        assert_eq!(PlainDate::from_epoch_days(&cfg, d.epoch_days(&cfg)), d);
    }
}
