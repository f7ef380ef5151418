//! `ZonedDateTime`: a [`PlainDateTime`] resolved against a named IANA zone,
//! carrying the offset/delta/abbreviation the zone's transitions assign to
//! it and the disambiguation outcome used to pick them when the wall-clock
//! reading was ambiguous (fall-back overlap) or nonexistent (spring-forward
//! gap).
use std::fmt;

use crate::classes::offset_datetime::OffsetDateTime;
use crate::classes::plain_datetime::PlainDateTime;
use crate::common::scalar::{EpochSeconds, Offset};
use crate::date_tuple::{DateTuple, Suffix};
use crate::epoch::EpochConfig;
use crate::error::{Error, Result};
use crate::tz::find::{Disambiguate, Resolved};
use crate::tz::info::ZoneInfo;
use crate::tz::processor::ZoneProcessor;
use crate::tz::transition::AbbrevBuf;

#[derive(Debug, Copy, Clone)]
pub struct ZonedDateTime {
    pub datetime: PlainDateTime,
    pub offset_seconds: i32,
    pub delta_seconds: i32,
    pub abbrev: AbbrevBuf,
    pub fold: u8,
    pub resolved: Resolved,
    pub zone: &'static ZoneInfo,
}

/// Interpret `dt`'s (year, month, day, seconds) fields as wall-clock time
/// under `total_offset`, and convert to epoch-seconds.
fn date_tuple_to_epoch_seconds(cfg: &EpochConfig, dt: &DateTuple, total_offset: i32) -> i32 {
    let epoch_days = cfg.days_from_ymd(i32::from(dt.year), dt.month, dt.day);
    epoch_days * 86_400 + dt.seconds - total_offset
}

impl ZonedDateTime {
    /// Resolve a wall-clock `datetime` in `zone`. When the reading is
    /// ambiguous (overlap) or doesn't exist (gap), `disambiguate` picks
    /// which of the two valid interpretations wins; the wall-clock reading
    /// reported back is adjusted to match whichever offset that resolves to,
    /// so a gap resolution comes back shifted by the size of the gap (same
    /// behaviour as the reference library's `resolve_using_disambiguate`).
    pub fn from_local(
        cfg: EpochConfig,
        zone: &'static ZoneInfo,
        datetime: PlainDateTime,
        disambiguate: Disambiguate,
    ) -> Result<Self> {
        let mut proc = ZoneProcessor::with_epoch_config(cfg);
        let target_dt = datetime.to_date_tuple(Suffix::Wall);
        let res = proc.find_by_local_date_time(zone, &target_dt, disambiguate)?;

        let req_total_offset = res.req_offset_seconds + res.req_delta_seconds;
        let epoch_seconds = date_tuple_to_epoch_seconds(&cfg, &target_dt, req_total_offset);

        let idx = res.transition.ok_or(Error::NotFound)?;
        let t = proc.storage().get(idx);
        let (offset_seconds, delta_seconds, abbrev) = (t.offset_seconds, t.delta_seconds, t.abbrev);
        let total_offset = offset_seconds + delta_seconds;

        let resolved_dt = OffsetDateTime::from_epoch_seconds(&cfg, epoch_seconds, Offset::new_unchecked(total_offset));
        Ok(ZonedDateTime {
            datetime: resolved_dt.datetime,
            offset_seconds,
            delta_seconds,
            abbrev,
            fold: res.fold,
            resolved: res.resolved,
            zone,
        })
    }

    /// Resolve an instant in `zone`: there is exactly one applicable offset,
    /// but `fold` still distinguishes the first and second pass of a
    /// fall-back overlap (PEP 495 style).
    pub fn from_epoch_seconds(cfg: EpochConfig, zone: &'static ZoneInfo, epoch_seconds: i32) -> Result<Self> {
        let mut proc = ZoneProcessor::with_epoch_config(cfg);
        let res = proc.find_by_epoch_seconds(zone, EpochSeconds::new(epoch_seconds))?;
        let total_offset = res.offset_seconds + res.delta_seconds;
        let odt = OffsetDateTime::from_epoch_seconds(&cfg, epoch_seconds, Offset::new_unchecked(total_offset));
        let resolved = if res.fold == 1 { Resolved::OverlapEarlier } else { Resolved::Unique };
        Ok(ZonedDateTime {
            datetime: odt.datetime,
            offset_seconds: res.offset_seconds,
            delta_seconds: res.delta_seconds,
            abbrev: res.abbrev,
            fold: res.fold,
            resolved,
            zone,
        })
    }

    pub fn offset(self) -> Offset {
        Offset::new_unchecked(self.offset_seconds + self.delta_seconds)
    }

    pub fn to_epoch_seconds(self, cfg: &EpochConfig) -> i32 {
        OffsetDateTime::new(self.datetime, self.offset()).to_epoch_seconds(cfg)
    }

    pub fn to_offset_datetime(self) -> OffsetDateTime {
        OffsetDateTime::new(self.datetime, self.offset())
    }

    /// Re-resolve the same instant against a different zone.
    pub fn to_zone(self, cfg: EpochConfig, zone: &'static ZoneInfo) -> Result<Self> {
        let es = self.to_epoch_seconds(&cfg);
        Self::from_epoch_seconds(cfg, zone, es)
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}[{}]", self.datetime, self.offset(), self.zone.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::plain_date::PlainDate;
    use crate::classes::plain_datetime::PlainTime;
    use crate::tz::zonedb;

    fn cfg() -> EpochConfig {
        EpochConfig::default()
    }

    fn dt(y: i16, m: u8, d: u8, hh: u8, mm: u8, ss: u8) -> PlainDateTime {
        PlainDateTime::new(PlainDate::new(y, m, d).unwrap(), PlainTime::new(hh, mm, ss).unwrap())
    }

    #[test]
    fn unambiguous_local_time_resolves_uniquely() {
        let zdt = ZonedDateTime::from_local(cfg(), zonedb::LOS_ANGELES, dt(2022, 1, 1, 12, 0, 0), Disambiguate::Compatible)
            .unwrap();
        assert_eq!(zdt.offset_seconds, -8 * 3600);
        assert_eq!(zdt.delta_seconds, 0);
        assert_eq!(zdt.resolved, Resolved::Unique);
    }

    #[test]
    fn gap_time_shifts_forward_under_compatible() {
        // 2022-03-13 02:30 local doesn't exist in America/Los_Angeles.
        let zdt = ZonedDateTime::from_local(cfg(), zonedb::LOS_ANGELES, dt(2022, 3, 13, 2, 30, 0), Disambiguate::Compatible)
            .unwrap();
        assert_eq!(zdt.resolved, Resolved::GapLater);
        assert_eq!(zdt.delta_seconds, 3600);
        // Shifted an hour later, into PDT: 03:30.
        assert_eq!((zdt.datetime.time.hour(), zdt.datetime.time.minute()), (3, 30));
    }

    #[test]
    fn gap_time_shifts_earlier_under_earlier_disambiguation() {
        let zdt = ZonedDateTime::from_local(cfg(), zonedb::LOS_ANGELES, dt(2022, 3, 13, 2, 30, 0), Disambiguate::Earlier)
            .unwrap();
        assert_eq!(zdt.resolved, Resolved::GapEarlier);
        assert_eq!(zdt.delta_seconds, 0);
        assert_eq!((zdt.datetime.time.hour(), zdt.datetime.time.minute()), (1, 30));
    }

    #[test]
    fn overlap_time_resolves_both_ways() {
        // 2022-11-06 01:30 local happens twice in America/Los_Angeles.
        let earlier =
            ZonedDateTime::from_local(cfg(), zonedb::LOS_ANGELES, dt(2022, 11, 6, 1, 30, 0), Disambiguate::Earlier)
                .unwrap();
        let later =
            ZonedDateTime::from_local(cfg(), zonedb::LOS_ANGELES, dt(2022, 11, 6, 1, 30, 0), Disambiguate::Later)
                .unwrap();
        assert_eq!(earlier.resolved, Resolved::OverlapEarlier);
        assert_eq!(earlier.delta_seconds, 3600);
        assert_eq!(later.resolved, Resolved::OverlapLater);
        assert_eq!(later.delta_seconds, 0);
        assert!(earlier.to_epoch_seconds(&cfg()) < later.to_epoch_seconds(&cfg()));
    }

    #[test]
    fn to_zone_preserves_instant() {
        let zdt = ZonedDateTime::from_local(cfg(), zonedb::LOS_ANGELES, dt(2022, 7, 1, 12, 0, 0), Disambiguate::Compatible)
            .unwrap();
        let es_before = zdt.to_epoch_seconds(&cfg());
        let converted = zdt.to_zone(cfg(), zonedb::NEW_YORK).unwrap();
        assert_eq!(converted.to_epoch_seconds(&cfg()), es_before);
        assert_eq!(converted.offset_seconds, -5 * 3600);
    }
}
