//! Finds the [`MatchingEra`] values whose validity interval intersects the
//! 14-month processing window around a target year.
use crate::date_tuple::{DateTuple, Suffix};
use crate::tz::info::{ZoneEra, ZoneInfo};
use crate::tz::transition::MatchingEra;

/// At most this many eras can be active within any 14-month window; the
/// IANA data set never has denser era boundaries than this in practice.
pub const MAX_MATCHES: usize = 4;

const INVALID_YEAR: i16 = i16::MIN;

/// Compares an era's UNTIL instant against `(year, month)`, at month
/// granularity (ignores day/time, matching the tolerance the matching-era
/// finder needs for this pre-filter).
pub fn compare_era_to_year_month(era: &ZoneEra, year: i16, month: u8) -> std::cmp::Ordering {
    (era.until_year, era.until_month).cmp(&(year, month))
}

/// Does `era`'s effective validity span -- from the end of `prev_era` (or
/// the dawn of time) to its own UNTIL -- overlap `[start_ym, until_ym)`?
pub fn era_overlaps_interval(
    prev_era: Option<&ZoneEra>,
    era: &ZoneEra,
    start: (i16, u8),
    until: (i16, u8),
) -> bool {
    let starts_before_until = match prev_era {
        Some(prev) => compare_era_to_year_month(prev, until.0, until.1).is_lt(),
        None => true,
    };
    let ends_after_start = compare_era_to_year_month(era, start.0, start.1).is_gt();
    starts_before_until && ends_after_start
}

fn until_dt_of(era: &ZoneEra) -> DateTuple {
    DateTuple::new(era.until_year, era.until_month, era.until_day, era.until_seconds(), era.until_suffix())
}

/// Clip `era` to `[start_bound, until_bound)`, chaining off `prev` (the
/// previously created match in this window, if any) to resolve the start
/// boundary the way the C original's `prev_match` pointer does.
pub fn create_matching_era(
    matches: &[MatchingEra],
    prev_index: Option<usize>,
    era: &'static ZoneEra,
    start_bound: DateTuple,
    until_bound: DateTuple,
) -> MatchingEra {
    let era_start = match prev_index {
        Some(i) => matches[i].until_dt,
        None => DateTuple::new(INVALID_YEAR, 1, 1, 0, Suffix::Wall),
    };
    let start_dt = if era_start.compare(&start_bound).is_gt() { era_start } else { start_bound };

    let era_until = until_dt_of(era);
    let until_dt = if era_until.compare(&until_bound).is_lt() { era_until } else { until_bound };

    MatchingEra {
        start_dt,
        until_dt,
        era,
        prev_match: prev_index,
        last_offset_seconds: 0,
        last_delta_seconds: 0,
    }
}

/// Walk `zone_info`'s eras in order, returning the matches overlapping
/// `[start_ym, until_ym)`, capped at [`MAX_MATCHES`].
pub fn find_matches(
    zone_info: &'static ZoneInfo,
    start: (i16, u8),
    until: (i16, u8),
) -> heapless_matches::MatchList {
    let mut out = heapless_matches::MatchList::new();
    let start_bound = DateTuple::new(start.0, start.1, 1, 0, Suffix::Wall);
    let until_bound = DateTuple::new(until.0, until.1, 1, 0, Suffix::Wall);

    let eras = zone_info.eras;
    let mut prev_index: Option<usize> = None;
    for (i, era) in eras.iter().enumerate() {
        let prev_era = if i == 0 { None } else { Some(&eras[i - 1]) };
        if !era_overlaps_interval(prev_era, era, start, until) {
            continue;
        }
        if out.len() >= MAX_MATCHES {
            break;
        }
        let m = create_matching_era(out.as_slice(), prev_index, era, start_bound, until_bound);
        out.push(m);
        prev_index = Some(out.len() - 1);
    }
    out
}

/// A small vector capped at [`MAX_MATCHES`], since no 14-month window ever
/// overlaps more eras than that in practice.
pub mod heapless_matches {
    use crate::tz::transition::MatchingEra;

    use super::MAX_MATCHES;

    #[derive(Debug, Clone, Default)]
    pub struct MatchList {
        items: Vec<MatchingEra>,
    }

    impl MatchList {
        pub fn new() -> Self {
            Self { items: Vec::with_capacity(MAX_MATCHES) }
        }

        pub fn push(&mut self, m: MatchingEra) {
            if self.items.len() < MAX_MATCHES {
                self.items.push(m);
            }
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }

        pub fn as_slice(&self) -> &[MatchingEra] {
            &self.items
        }

        pub fn as_mut_slice(&mut self) -> &mut [MatchingEra] {
            &mut self.items
        }

        pub fn iter(&self) -> impl Iterator<Item = &MatchingEra> {
            self.items.iter()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::info::{ZoneContext, ZoneEra};

    static CTX: ZoneContext =
        ZoneContext { start_year: 2000, until_year: 2100, version: "test", letters: &[] };

    fn era(until_year: i16, until_month: u8) -> ZoneEra {
        ZoneEra {
            policy: None,
            format: "XST",
            offset_code: -32,
            delta_code: 0x04,
            until_year,
            until_month,
            until_day: 1,
            until_time_code: 0,
            until_time_modifier: 0,
        }
    }

    #[test]
    fn single_perpetual_era_matches_any_window() {
        static ERAS: [ZoneEra; 1] = [ZoneEra {
            policy: None,
            format: "XST",
            offset_code: -32,
            delta_code: 0x04,
            until_year: 9999,
            until_month: 1,
            until_day: 1,
            until_time_code: 0,
            until_time_modifier: 0,
        }];
        static INFO: ZoneInfo =
            ZoneInfo { name: "Test/Zone", context: &CTX, eras: &ERAS, target: None };

        let matches = find_matches(&INFO, (2021, 12), (2023, 2));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.as_slice()[0].until_dt.year, 2023);
    }

    #[test]
    fn era_ending_before_window_is_excluded() {
        static ERAS: [ZoneEra; 2] = [
            ZoneEra {
                policy: None,
                format: "XST",
                offset_code: -32,
                delta_code: 0x04,
                until_year: 2000,
                until_month: 1,
                until_day: 1,
                until_time_code: 0,
                until_time_modifier: 0,
            },
            ZoneEra {
                policy: None,
                format: "XDT",
                offset_code: -28,
                delta_code: 0x04,
                until_year: 9999,
                until_month: 1,
                until_day: 1,
                until_time_code: 0,
                until_time_modifier: 0,
            },
        ];
        static INFO: ZoneInfo =
            ZoneInfo { name: "Test/Zone", context: &CTX, eras: &ERAS, target: None };

        let matches = find_matches(&INFO, (2021, 12), (2023, 2));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.as_slice()[0].era.format, "XDT");
    }

    #[test]
    fn compare_era_to_year_month_orders_by_until() {
        let e = era(2020, 6);
        assert_eq!(compare_era_to_year_month(&e, 2020, 5), std::cmp::Ordering::Greater);
        assert_eq!(compare_era_to_year_month(&e, 2020, 7), std::cmp::Ordering::Less);
        assert_eq!(compare_era_to_year_month(&e, 2020, 6), std::cmp::Ordering::Equal);
    }
}
