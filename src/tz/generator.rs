//! Turns each [`MatchingEra`] into the [`Transition`]s active within it:
//! a single synthetic transition for a "simple" era (no policy), or a
//! candidate pool built from every rule interior to the match plus the
//! most recent rule transition before it, narrowed down to the active
//! ones via [`crate::tz::transition::MatchStatus`].
use crate::common::scalar::{days_in_month, Month, Year};
use crate::date_tuple::{DateTuple, FuzzyCompare, Suffix};
use crate::epoch::day_of_week;
use crate::tz::info::ZoneRule;
use crate::tz::storage::{fix_transition_times, TransitionStorage};
use crate::tz::transition::{MatchStatus, MatchingEra, Transition};

/// A rule can match at most this many years inside one 14-month window.
const MAX_INTERIOR_YEARS: usize = 4;

/// Resolve a rule's `(on_day_of_week, on_day_of_month)` pair to a concrete
/// `(month, day)` for a given year. `on_day_of_week == 0` means "exactly
/// `on_day_of_month`"; otherwise it means "the first `on_day_of_week` on or
/// after `on_day_of_month`" (positive), "the last `on_day_of_week` of the
/// month" (zero), or "the last `on_day_of_week` on or before `|n|`"
/// (negative). Shifting past a month boundary rolls into the adjacent
/// month but never crosses a year, matching the limits the TZDB rule
/// format itself never exceeds.
pub fn calc_start_day_of_month(year: i16, month: u8, on_day_of_week: u8, on_day_of_month: i8) -> (u8, u8) {
    if on_day_of_week == 0 {
        return (month, on_day_of_month as u8);
    }

    let yr = Year::new_unchecked(year);
    if on_day_of_month >= 0 {
        let days_in = days_in_month(yr, Month::new_unchecked(month));
        let anchor = if on_day_of_month == 0 { days_in as i32 - 6 } else { on_day_of_month as i32 };
        let dow = day_of_week(year, Month::new_unchecked(month), anchor as u8).get();
        let shift = (i32::from(on_day_of_week) - i32::from(dow)).rem_euclid(7);
        let day = anchor + shift;
        if day as u8 > days_in {
            (month + 1, (day as u8) - days_in)
        } else {
            (month, day as u8)
        }
    } else {
        let anchor = -on_day_of_month as i32;
        let dow = day_of_week(year, Month::new_unchecked(month), anchor as u8).get();
        let shift = (i32::from(dow) - i32::from(on_day_of_week)).rem_euclid(7);
        let day = anchor - shift;
        if day < 1 {
            let prev_month = month - 1;
            let days_in_prev = days_in_month(yr, Month::new_unchecked(prev_month));
            (prev_month, (day + days_in_prev as i32) as u8)
        } else {
            (month, day as u8)
        }
    }
}

fn letter_for(letters: &'static [&'static str], index: u8) -> &'static str {
    letters.get(index as usize).copied().unwrap_or("")
}

/// Build the transition a rule would produce in `year`, or (when `rule` is
/// `None`) the single synthetic transition a simple era produces at its own
/// start boundary.
fn create_transition_for_year(
    year: i16,
    rule: Option<&'static ZoneRule>,
    match_era: &MatchingEra,
    match_index: usize,
    letters: &'static [&'static str],
) -> Transition {
    let mut t = Transition::default();
    t.match_index = match_index;
    t.rule = rule;
    t.offset_seconds = match_era.era.std_offset_seconds();
    match rule {
        Some(r) => {
            let (month, day) = calc_start_day_of_month(year, r.in_month, r.on_day_of_week, r.on_day_of_month);
            t.transition_time = DateTuple::new(year, month, day, r.at_seconds(), r.at_suffix());
            t.delta_seconds = r.dst_offset_seconds();
            t.letter = letter_for(letters, r.letter_index);
        }
        None => {
            t.transition_time = match_era.start_dt;
            t.delta_seconds = match_era.era.dst_offset_seconds();
            t.letter = "";
        }
    }
    t
}

fn create_transitions_from_simple_match(storage: &mut TransitionStorage, match_era: &mut MatchingEra, match_index: usize) {
    let mut t = create_transition_for_year(0, None, match_era, match_index, &[]);
    t.match_status = MatchStatus::ExactMatch;
    match_era.last_offset_seconds = t.offset_seconds;
    match_era.last_delta_seconds = t.delta_seconds;
    *storage.get_free_agent() = t;
    storage.add_free_agent_to_active_pool();
}

/// `from_year < start_year`: the rule has a transition before the window
/// opens, and we need the single most recent one to seed the prior slot.
fn most_recent_prior_year(from_year: i16, to_year: i16, start_year: i16) -> Option<i16> {
    if from_year < start_year {
        Some(if to_year < start_year { to_year } else { start_year - 1 })
    } else {
        None
    }
}

fn find_candidate_transitions(
    storage: &mut TransitionStorage,
    matches: &[MatchingEra],
    match_index: usize,
    letters: &'static [&'static str],
) {
    let match_era = &matches[match_index];
    let policy = match_era.era.policy.expect("named-era transition generation requires a policy");
    let start_year = match_era.start_dt.year;
    let end_year = match_era.until_dt.year;

    let prior_region = storage.reserve_prior();
    storage.get_mut(prior_region).is_valid_prior = false;

    for rule in policy.rules {
        let mut interior_years = [0i16; MAX_INTERIOR_YEARS];
        let mut n = 0;
        for year in start_year..=end_year {
            if rule.from_year <= year && year <= rule.to_year {
                if n >= MAX_INTERIOR_YEARS {
                    break;
                }
                interior_years[n] = year;
                n += 1;
            }
        }
        for &year in &interior_years[..n] {
            let t = create_transition_for_year(year, Some(rule), match_era, match_index, letters);
            match t.transition_time.compare_fuzzy(&match_era.start_dt, &match_era.until_dt) {
                FuzzyCompare::Prior => {
                    *storage.get_free_agent() = t;
                    storage.set_free_agent_as_prior_if_valid();
                }
                FuzzyCompare::Within => {
                    *storage.get_free_agent() = t;
                    storage.add_free_agent_to_candidate_pool();
                }
                FuzzyCompare::FarFuture => {}
            }
        }

        if let Some(year) = most_recent_prior_year(rule.from_year, rule.to_year, start_year) {
            let t = create_transition_for_year(year, Some(rule), match_era, match_index, letters);
            *storage.get_free_agent() = t;
            storage.set_free_agent_as_prior_if_valid();
        }
    }

    if storage.get(storage.prior_index()).is_valid_prior {
        storage.add_prior_to_candidate_pool();
    }
}

fn transition_compare_to_match(t: &Transition, matches: &[MatchingEra], match_index: usize) -> MatchStatus {
    let m = &matches[match_index];
    let (prev_offset, prev_delta) = match m.prev_match {
        Some(i) => (matches[i].last_offset_seconds, matches[i].last_delta_seconds),
        None => (m.era.std_offset_seconds(), 0),
    };
    let (start_w, start_s, start_u) = m.start_dt.expand(
        crate::common::scalar::Offset::new_unchecked(prev_offset),
        crate::common::scalar::Offset::new_unchecked(prev_delta),
    );

    if t.transition_time.compare(&start_w).is_eq()
        || t.transition_time_s.compare(&start_s).is_eq()
        || t.transition_time_u.compare(&start_u).is_eq()
    {
        return MatchStatus::ExactMatch;
    }
    if t.transition_time_u.compare(&start_u).is_lt() {
        return MatchStatus::Prior;
    }

    let relevant = match m.until_dt.suffix {
        Suffix::Standard => &t.transition_time_s,
        Suffix::Utc => &t.transition_time_u,
        Suffix::Wall => &t.transition_time,
    };
    if relevant.compare(&m.until_dt).is_lt() {
        MatchStatus::WithinMatch
    } else {
        MatchStatus::FarFuture
    }
}

/// Classify every candidate against its match, keeping only the single
/// latest valid `Prior`/`ExactMatch` transition (anything earlier demotes
/// to `FarPast`), then clamp the surviving prior's visible start to the
/// match's own start boundary.
fn select_active_transitions(storage: &mut TransitionStorage, range: std::ops::Range<u8>, matches: &[MatchingEra]) {
    let mut prior_idx: Option<u8> = None;
    for i in range.clone() {
        let match_index = storage.get(i).match_index;
        let status = transition_compare_to_match(storage.get(i), matches, match_index);
        storage.get_mut(i).match_status = status;
        match status {
            MatchStatus::ExactMatch => {
                if let Some(p) = prior_idx {
                    storage.get_mut(p).match_status = MatchStatus::FarPast;
                }
                prior_idx = Some(i);
            }
            MatchStatus::Prior => {
                if let Some(p) = prior_idx {
                    if storage.get(p).transition_time_u.compare(&storage.get(i).transition_time_u).is_le() {
                        storage.get_mut(p).match_status = MatchStatus::FarPast;
                        prior_idx = Some(i);
                    } else {
                        storage.get_mut(i).match_status = MatchStatus::FarPast;
                    }
                } else {
                    prior_idx = Some(i);
                }
            }
            _ => {}
        }
    }
    if let Some(p) = prior_idx {
        let match_index = storage.get(p).match_index;
        storage.get_mut(p).transition_time = matches[match_index].start_dt;
    }
}

fn create_transitions_from_named_match(
    storage: &mut TransitionStorage,
    matches: &mut [MatchingEra],
    match_index: usize,
    letters: &'static [&'static str],
) {
    storage.reset_candidate_pool();
    find_candidate_transitions(storage, matches, match_index, letters);
    let range = storage.candidate_range();
    fix_transition_times(storage, range.clone());
    select_active_transitions(storage, range, matches);
    let last_idx = storage.add_active_candidates_to_active_pool();
    let last = storage.get(last_idx);
    matches[match_index].last_offset_seconds = last.offset_seconds;
    matches[match_index].last_delta_seconds = last.delta_seconds;
}

/// Generate and fold into the active pool the transitions for a single
/// match, dispatching on whether its era carries a policy.
pub fn create_transitions_for_match(
    storage: &mut TransitionStorage,
    matches: &mut [MatchingEra],
    match_index: usize,
    letters: &'static [&'static str],
) {
    if matches[match_index].era.policy.is_none() {
        create_transitions_from_simple_match(storage, &mut matches[match_index], match_index);
    } else {
        create_transitions_from_named_match(storage, matches, match_index, letters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scalar::Weekday;

    #[test]
    fn exact_day_of_month_ignores_day_of_week() {
        assert_eq!(calc_start_day_of_month(2022, 3, 0, 15), (3, 15));
    }

    #[test]
    fn on_or_after_rolls_forward_within_month() {
        // 2022-03-01 is a Tuesday; "Sun>=8" should land on 2022-03-13.
        assert_eq!(day_of_week(2022, Month::March, 8), Weekday::Tuesday);
        assert_eq!(calc_start_day_of_month(2022, 3, Weekday::Sunday.get(), 8), (3, 13));
    }

    #[test]
    fn last_day_of_week_of_month() {
        // last Sunday of March 2022 is the 27th.
        assert_eq!(calc_start_day_of_month(2022, 3, Weekday::Sunday.get(), 0), (3, 27));
    }

    #[test]
    fn on_or_before_rolls_into_prior_month() {
        // "Sun<=3" in a month whose 1st-3rd are all after the last Sunday
        // rolls back into February.
        let (month, day) = calc_start_day_of_month(2022, 3, Weekday::Sunday.get(), -1);
        assert_eq!((month, day), (2, 27));
    }

    #[test]
    fn most_recent_prior_year_picks_latest_before_window() {
        assert_eq!(most_recent_prior_year(1990, 2010, 2022), Some(2021));
        assert_eq!(most_recent_prior_year(1990, 2000, 2022), Some(2000));
        assert_eq!(most_recent_prior_year(2023, 2030, 2022), None);
    }
}
