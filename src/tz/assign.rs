//! Final pass over the accumulated active pool (§4.7): stamps `start_dt`,
//! `until_dt`, and `start_epoch_seconds` onto every transition, and
//! synthesises each transition's abbreviation from its era's FORMAT
//! template plus its own DST letter/delta.
use crate::date_tuple::DateTuple;
use crate::epoch::EpochConfig;
use crate::tz::transition::{AbbrevBuf, MatchingEra};
use crate::tz::storage::TransitionStorage;

/// Walk the active transitions in order, deriving each one's `start_dt`
/// (its own transition time, re-expressed in the offset/delta that is *in
/// force after* it takes effect) and setting the previous transition's
/// `until_dt` to that same instant. The final transition's `until_dt`
/// comes from its match's own boundary.
pub fn generate_start_until_times(
    storage: &mut TransitionStorage,
    range: std::ops::Range<u8>,
    matches: &[MatchingEra],
    cfg: &EpochConfig,
) {
    if range.is_empty() {
        return;
    }

    let mut prev_idx: Option<u8> = None;
    for i in range.clone() {
        let transition_time = storage.get(i).transition_time;
        if let Some(p) = prev_idx {
            // The previous transition's until_dt is the *raw*, unshifted
            // transition_time of the current one -- not its start_dt. The two
            // differ exactly across a gap/overlap, which is the whole point:
            // shifting both to the same instant would collapse that interval.
            storage.get_mut(p).until_dt = transition_time;
        }

        let mut start_dt = transition_time;
        if let Some(p) = prev_idx {
            let prev_offset = storage.get(p).offset_seconds;
            let prev_delta = storage.get(p).delta_seconds;
            let offset = storage.get(i).offset_seconds;
            let delta = storage.get(i).delta_seconds;
            start_dt.seconds += -prev_offset - prev_delta + offset + delta;
            start_dt.normalize();
        }

        let offset = storage.get(i).offset_seconds;
        let delta = storage.get(i).delta_seconds;
        let epoch_days = cfg.days_from_ymd(i32::from(start_dt.year), start_dt.month, start_dt.day);
        let start_epoch_seconds =
            (i64::from(epoch_days) * 86_400 + i64::from(start_dt.seconds) - i64::from(offset + delta)) as i32;

        let t = storage.get_mut(i);
        t.start_dt = start_dt;
        t.start_epoch_seconds = start_epoch_seconds;

        prev_idx = Some(i);
    }

    let last = prev_idx.expect("range checked non-empty above");
    let match_index = storage.get(last).match_index;
    let m = &matches[match_index];
    let offset = storage.get(last).offset_seconds;
    let delta = storage.get(last).delta_seconds;
    let (until_dt, _, _) = m.until_dt.expand(
        crate::common::scalar::Offset::new_unchecked(offset),
        crate::common::scalar::Offset::new_unchecked(delta),
    );
    storage.get_mut(last).until_dt = until_dt;
}

fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Render a FORMAT template (e.g. `"P%T"`, `"GMT/BST"`, `"EST"`) given the
/// DST delta in force and the rule's letter, truncated to fit a `dest_size`
/// byte buffer (including the implicit terminator, matching the reference
/// C buffer convention). `%`-templates substitute the letter once; `/`-
/// templates pick the half before or after the slash depending on whether
/// `delta_seconds` is zero; anything else is copied verbatim.
pub fn format_abbreviation(fmt: &str, delta_seconds: i32, letter: &str, dest_size: usize) -> String {
    let max_len = dest_size.saturating_sub(1);
    let raw: std::borrow::Cow<str> = if let Some(pct) = fmt.find('%') {
        let mut s = String::with_capacity(fmt.len() + letter.len());
        s.push_str(&fmt[..pct]);
        s.push_str(letter);
        s.push_str(&fmt[pct + 1..]);
        std::borrow::Cow::Owned(s)
    } else if let Some(slash) = fmt.find('/') {
        std::borrow::Cow::Borrowed(if delta_seconds == 0 { &fmt[..slash] } else { &fmt[slash + 1..] })
    } else {
        std::borrow::Cow::Borrowed(fmt)
    };
    truncate(&raw, max_len).to_string()
}

pub fn create_abbreviation(fmt: &str, delta_seconds: i32, letter: &str) -> AbbrevBuf {
    AbbrevBuf::from_str(&format_abbreviation(fmt, delta_seconds, letter, AbbrevBuf::CAPACITY + 1))
}

/// Synthesise and stamp the abbreviation onto every transition in `range`,
/// looking up each transition's FORMAT template through its match's era
/// (a `Transition` only stores a `match_index`, not the era itself).
pub fn calc_abbreviations(storage: &mut TransitionStorage, range: std::ops::Range<u8>, matches: &[MatchingEra]) {
    for i in range {
        let t = storage.get(i);
        let fmt = matches[t.match_index].era.format;
        let abbrev = create_abbreviation(fmt, t.delta_seconds, t.letter);
        storage.get_mut(i).abbrev = abbrev;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_template_substitutes_letter() {
        assert_eq!(format_abbreviation("P%T", 3600, "D", 8), "PDT");
        assert_eq!(format_abbreviation("P%T", 0, "", 8), "PT");
    }

    #[test]
    fn percent_s_template_substitutes_empty_letter() {
        assert_eq!(format_abbreviation("%", 3600, "CAT", 8), "CAT");
    }

    #[test]
    fn slash_template_picks_std_or_dst_half() {
        assert_eq!(format_abbreviation("GMT/BST", 0, "", 8), "GMT");
        assert_eq!(format_abbreviation("GMT/BST", 3600, "", 8), "BST");
    }

    #[test]
    fn verbatim_template_is_copied() {
        assert_eq!(format_abbreviation("EST", 0, "", 8), "EST");
    }

    #[test]
    fn truncates_to_destination_capacity() {
        assert_eq!(format_abbreviation("P%T3456", 3600, "DD", 6), "PDDT3");
    }
}
