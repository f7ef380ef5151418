//! The central [`Transition`] record and [`MatchingEra`], the 14-month-window
//! clipped view of a [`crate::tz::info::ZoneEra`] that generates it.
use crate::common::scalar::Offset;
use crate::date_tuple::DateTuple;
use crate::tz::info::{ZoneEra, ZoneRule};

/// A `ZoneEra` clipped to the processing window around a target year.
/// `prev_match` is an index into the processor's match array rather than a
/// pointer, since Rust borrowing makes a self-referential linked list
/// awkward; it serves the same purpose as the C library's `prev_match`
/// back-pointer, used only to re-interpret `start_dt`'s offsets.
#[derive(Debug, Copy, Clone)]
pub struct MatchingEra {
    pub start_dt: DateTuple,
    pub until_dt: DateTuple,
    pub era: &'static ZoneEra,
    pub prev_match: Option<usize>,
    pub last_offset_seconds: i32,
    pub last_delta_seconds: i32,
}

/// Where a [`Transition`] falls relative to the [`MatchingEra`] interval it
/// was generated for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    FarPast,
    Prior,
    ExactMatch,
    WithinMatch,
    FarFuture,
}

impl MatchStatus {
    pub fn is_active(self) -> bool {
        matches!(self, MatchStatus::ExactMatch | MatchStatus::WithinMatch | MatchStatus::Prior)
    }
}

/// A fixed-capacity inline buffer for the synthesised abbreviation, capped at
/// 7 visible bytes to accommodate a programmatic `+hhmmss` form alongside
/// human abbreviations like "PST"/"PDT". Plays the role of the reference
/// implementation's `char abbrev[8]`, minus the explicit NUL terminator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AbbrevBuf {
    bytes: [u8; 7],
    len: u8,
}

impl AbbrevBuf {
    pub const CAPACITY: usize = 7;

    pub const EMPTY: AbbrevBuf = AbbrevBuf { bytes: [0; 7], len: 0 };

    pub fn from_str(s: &str) -> Self {
        let truncated = truncate_to_char_boundary(s, Self::CAPACITY);
        let mut bytes = [0u8; 7];
        bytes[..truncated.len()].copy_from_slice(truncated.as_bytes());
        Self { bytes, len: truncated.len() as u8 }
    }

    pub fn as_str(&self) -> &str {
        // Safety: constructed only from valid UTF-8 via from_str/truncate_to_char_boundary
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

impl Default for AbbrevBuf {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn truncate_to_char_boundary(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// A DST transition: the rule (or lack of one) that took effect, the time it
/// took effect in, and the offsets/abbreviation that hold until the next
/// transition.
#[derive(Debug, Copy, Clone)]
pub struct Transition {
    pub match_index: usize,
    /// `None` when the owning `MatchingEra` had no policy ("simple" era)
    pub rule: Option<&'static ZoneRule>,
    /// original transition time, using the UTC offset of the *previous*
    /// transition; starts out 'w', 's', or 'u' and is normalised to 'w' by
    /// [`crate::tz::generator::fix_transition_times`]
    pub transition_time: DateTuple,
    pub transition_time_s: DateTuple,
    pub transition_time_u: DateTuple,
    /// valid once [`crate::tz::generator::generate_start_until_times`] has run
    pub start_dt: DateTuple,
    pub until_dt: DateTuple,
    pub start_epoch_seconds: i32,
    /// STD offset seconds, not the total effective UTC offset
    pub offset_seconds: i32,
    pub delta_seconds: i32,
    pub abbrev: AbbrevBuf,
    pub letter: &'static str,
    pub is_valid_prior: bool,
    pub match_status: MatchStatus,
}

impl Transition {
    pub fn total_offset(&self) -> Offset {
        Offset::new_unchecked(self.offset_seconds + self.delta_seconds)
    }
}

impl Default for Transition {
    fn default() -> Self {
        let zero_dt = DateTuple::new(0, 1, 1, 0, crate::date_tuple::Suffix::Wall);
        Self {
            match_index: 0,
            rule: None,
            transition_time: zero_dt,
            transition_time_s: zero_dt,
            transition_time_u: zero_dt,
            start_dt: zero_dt,
            until_dt: zero_dt,
            start_epoch_seconds: 0,
            offset_seconds: 0,
            delta_seconds: 0,
            abbrev: AbbrevBuf::EMPTY,
            letter: "",
            is_valid_prior: false,
            match_status: MatchStatus::FarFuture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbrev_truncates_to_capacity() {
        let a = AbbrevBuf::from_str("+1234567890");
        assert_eq!(a.as_str(), "+123456");
        assert_eq!(a.as_str().len(), AbbrevBuf::CAPACITY);
    }

    #[test]
    fn abbrev_round_trips_short_strings() {
        assert_eq!(AbbrevBuf::from_str("PDT").as_str(), "PDT");
    }

    #[test]
    fn match_status_active_classification() {
        assert!(MatchStatus::ExactMatch.is_active());
        assert!(MatchStatus::WithinMatch.is_active());
        assert!(MatchStatus::Prior.is_active());
        assert!(!MatchStatus::FarPast.is_active());
        assert!(!MatchStatus::FarFuture.is_active());
    }
}
