//! `OffsetDateTime`: a [`PlainDateTime`] paired with a fixed UTC [`Offset`],
//! with no attachment to any named zone or its transition rules.
use std::fmt;

use crate::classes::plain_date::PlainDate;
use crate::classes::plain_datetime::{PlainDateTime, PlainTime};
use crate::common::scalar::Offset;
use crate::epoch::EpochConfig;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OffsetDateTime {
    pub datetime: PlainDateTime,
    pub offset: Offset,
}

impl OffsetDateTime {
    pub fn new(datetime: PlainDateTime, offset: Offset) -> Self {
        OffsetDateTime { datetime, offset }
    }

    /// Convert to epoch-seconds under `cfg`, interpreting `datetime` as
    /// already expressed in `offset`.
    pub fn to_epoch_seconds(self, cfg: &EpochConfig) -> i32 {
        let date = self.datetime.date;
        let epoch_days = cfg.days_from_ymd(i32::from(date.year()), date.month(), date.day());
        epoch_days * 86_400 + self.datetime.time.seconds_of_day() - self.offset.get()
    }

    /// Inverse of [`Self::to_epoch_seconds`]: the wall-clock reading of
    /// `epoch_seconds` as seen from a fixed `offset`.
    pub fn from_epoch_seconds(cfg: &EpochConfig, epoch_seconds: i32, offset: Offset) -> Self {
        let local_seconds = epoch_seconds as i64 + i64::from(offset.get());
        let epoch_days = local_seconds.div_euclid(86_400) as i32;
        let seconds_of_day = local_seconds.rem_euclid(86_400) as i32;
        let date = PlainDate::from_epoch_days(cfg, epoch_days);
        let time = PlainTime::from_seconds_of_day(seconds_of_day);
        OffsetDateTime { datetime: PlainDateTime::new(date, time), offset }
    }

    /// Re-express the same instant under a different fixed offset.
    pub fn to_offset(self, cfg: &EpochConfig, offset: Offset) -> Self {
        Self::from_epoch_seconds(cfg, self.to_epoch_seconds(cfg), offset)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.datetime, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::plain_datetime::PlainTime;

    fn cfg() -> EpochConfig {
        EpochConfig::default()
    }

    #[test]
    fn epoch_seconds_round_trip() {
        let offset = Offset::new_unchecked(-8 * 3600);
        let odt = OffsetDateTime::new(
            PlainDateTime::new(PlainDate::new(2022, 3, 13).unwrap(), PlainTime::new(1, 30, 0).unwrap()),
            offset,
        );
        let es = odt.to_epoch_seconds(&cfg());
        assert_eq!(OffsetDateTime::from_epoch_seconds(&cfg(), es, offset), odt);
    }

    #[test]
    fn to_offset_preserves_instant() {
        let cfg = cfg();
        let odt = OffsetDateTime::new(
            PlainDateTime::new(PlainDate::new(2022, 3, 13).unwrap(), PlainTime::new(10, 0, 0).unwrap()),
            Offset::new_unchecked(-8 * 3600),
        );
        let shifted = odt.to_offset(&cfg, Offset::new_unchecked(0));
        assert_eq!(shifted.to_epoch_seconds(&cfg), odt.to_epoch_seconds(&cfg));
        assert_eq!(shifted.datetime.time.hour(), 18);
    }

    #[test]
    fn displays_with_offset_suffix() {
        let odt = OffsetDateTime::new(
            PlainDateTime::new(PlainDate::new(2022, 1, 1).unwrap(), PlainTime::new(0, 0, 0).unwrap()),
            Offset::new_unchecked(-8 * 3600),
        );
        assert_eq!(odt.to_string(), "2022-01-01T00:00:00-08:00");
    }
}
