//! [`ZoneProcessor`]: the single-entry, per-(zone, year) cache that ties
//! together matching-era discovery, transition generation, and the two
//! lookup directions into one small stateful object. Mirrors the reference
//! library's `AtcZoneProcessor`, except it owns its [`EpochConfig`] instead
//! of reading it from a process-wide global.
use crate::common::scalar::EpochSeconds;
use crate::date_tuple::DateTuple;
use crate::epoch::EpochConfig;
use crate::error::{Error, Result};
use crate::tz::assign::{calc_abbreviations, generate_start_until_times};
use crate::tz::find::{self, Disambiguate, FindResultType, LocalDateTimeResult};
use crate::tz::generator::create_transitions_for_match;
use crate::tz::info::ZoneInfo;
use crate::tz::matching::{find_matches, heapless_matches::MatchList};
use crate::tz::storage::{fix_transition_times, TransitionStorage};
use crate::tz::transition::AbbrevBuf;

/// The result of resolving an epoch-seconds instant: the offset/delta/
/// abbreviation in force, plus whether that instant sits in a fall-back
/// overlap and (if so) which occurrence `fold` selects.
#[derive(Debug, Copy, Clone)]
pub struct EpochSecondsResolution {
    pub offset_seconds: i32,
    pub delta_seconds: i32,
    pub abbrev: AbbrevBuf,
    pub fold: u8,
    pub result_type: FindResultType,
}

pub struct ZoneProcessor {
    epoch_config: EpochConfig,
    zone_info: Option<&'static ZoneInfo>,
    year: i16,
    is_filled: bool,
    matches: MatchList,
    storage: TransitionStorage,
}

impl Default for ZoneProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneProcessor {
    pub fn new() -> Self {
        Self::with_epoch_config(EpochConfig::default())
    }

    pub fn with_epoch_config(epoch_config: EpochConfig) -> Self {
        Self {
            epoch_config,
            zone_info: None,
            year: crate::common::scalar::Year::INVALID.get(),
            is_filled: false,
            matches: MatchList::new(),
            storage: TransitionStorage::new(),
        }
    }

    pub fn epoch_config(&self) -> &EpochConfig {
        &self.epoch_config
    }

    pub fn set_epoch_config(&mut self, epoch_config: EpochConfig) {
        self.epoch_config = epoch_config;
        self.is_filled = false;
    }

    pub fn storage(&self) -> &TransitionStorage {
        &self.storage
    }

    fn ensure_year(&mut self, zone_info: &'static ZoneInfo, year: i16) -> Result<()> {
        let resolved = zone_info.resolved();
        let same_zone = self.zone_info.map(|z| std::ptr::eq(z, resolved)).unwrap_or(false);
        if self.is_filled && same_zone && self.year == year {
            return Ok(());
        }

        let context = resolved.context;
        if year < context.start_year - 1 || year > context.until_year {
            return Err(Error::YearOutOfRange {
                year: i32::from(year),
                valid: (context.start_year - 1)..=context.until_year,
            });
        }

        self.zone_info = Some(resolved);
        self.year = year;
        self.storage = TransitionStorage::new();

        let start = (year - 1, 12u8);
        let until = (year + 1, 2u8);
        self.matches = find_matches(resolved, start, until);

        let num_matches = self.matches.len();
        for i in 0..num_matches {
            create_transitions_for_match(&mut self.storage, self.matches.as_mut_slice(), i, context.letters);
        }

        let active = self.storage.active_range();
        fix_transition_times(&mut self.storage, active.clone());
        generate_start_until_times(&mut self.storage, active.clone(), self.matches.as_slice(), &self.epoch_config);
        calc_abbreviations(&mut self.storage, active, self.matches.as_slice());

        self.is_filled = true;
        Ok(())
    }

    fn year_from_epoch_seconds(&self, epoch_seconds: i32) -> i16 {
        let epoch_days = epoch_seconds.div_euclid(86_400);
        let (year, _, _) = self.epoch_config.date_from_days(epoch_days);
        year as i16
    }

    pub fn find_by_epoch_seconds(
        &mut self,
        zone_info: &'static ZoneInfo,
        epoch_seconds: EpochSeconds,
    ) -> Result<EpochSecondsResolution> {
        if !epoch_seconds.is_valid() {
            return Err(Error::InvalidEpochSeconds);
        }
        let year = self.year_from_epoch_seconds(epoch_seconds.get());
        self.ensure_year(zone_info, year)?;

        let found = find::find_by_epoch_seconds(&self.storage, epoch_seconds.get()).ok_or(Error::NotFound)?;
        let t = self.storage.get(found.transition_index);
        Ok(EpochSecondsResolution {
            offset_seconds: t.offset_seconds,
            delta_seconds: t.delta_seconds,
            abbrev: t.abbrev,
            fold: found.fold,
            result_type: if found.num == 2 { FindResultType::Overlap } else { FindResultType::Exact },
        })
    }

    pub fn find_by_local_date_time(
        &mut self,
        zone_info: &'static ZoneInfo,
        target: &DateTuple,
        disambiguate: Disambiguate,
    ) -> Result<LocalDateTimeResult> {
        self.ensure_year(zone_info, target.year)?;
        let find = find::find_by_local_date_time(&self.storage, target);
        let res = find::resolve_local(&self.storage, find, disambiguate);
        if res.result_type == FindResultType::NotFound {
            return Err(Error::NotFound);
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::zonedb;

    #[test]
    fn los_angeles_epoch_zero_is_pst() {
        let mut proc = ZoneProcessor::new();
        let res = proc.find_by_epoch_seconds(zonedb::LOS_ANGELES, EpochSeconds::new(0)).unwrap();
        assert_eq!(res.offset_seconds, -8 * 3600);
        assert_eq!(res.delta_seconds, 0);
    }

    #[test]
    fn los_angeles_dst_in_july_is_pdt() {
        let mut proc = ZoneProcessor::new();
        // 2022-07-01T00:00:00Z, well inside PDT.
        let res = proc
            .find_by_epoch_seconds(zonedb::LOS_ANGELES, EpochSeconds::new(proc.epoch_config().epoch_seconds_from_unix_seconds(1_656_633_600)))
            .unwrap();
        assert_eq!(res.offset_seconds, -8 * 3600);
        assert_eq!(res.delta_seconds, 3600);
    }

    #[test]
    fn reusing_the_same_zone_and_year_does_not_refill() {
        let mut proc = ZoneProcessor::new();
        let es = EpochSeconds::new(proc.epoch_config().epoch_seconds_from_unix_seconds(1_656_633_600));
        proc.find_by_epoch_seconds(zonedb::LOS_ANGELES, es).unwrap();
        assert!(proc.is_filled);
        let year_before = proc.year;
        proc.find_by_epoch_seconds(zonedb::LOS_ANGELES, es).unwrap();
        assert_eq!(proc.year, year_before);
    }
}
