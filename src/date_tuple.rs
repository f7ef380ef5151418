//! `DateTuple`: an internal, normalised (year, month, day, seconds-of-day,
//! suffix) value that keeps track of whether a TZDB timestamp was given in
//! wall ('w'), standard ('s'), or UTC ('u') time.
use crate::common::scalar::{days_in_month, Month, Offset, Year};
use crate::epoch::EpochConfig;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Suffix {
    Wall,
    Standard,
    Utc,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateTuple {
    pub year: i16,
    pub month: u8,
    pub day: u8,
    /// seconds-of-day; may exceed ±86 400 before `normalize` is applied
    pub seconds: i32,
    pub suffix: Suffix,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FuzzyCompare {
    Prior,
    Within,
    FarFuture,
}

impl DateTuple {
    pub const fn new(year: i16, month: u8, day: u8, seconds: i32, suffix: Suffix) -> Self {
        Self { year, month, day, seconds, suffix }
    }

    /// Lexicographic compare on (year, month, day, seconds); suffix ignored.
    pub fn compare(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month, self.day, self.seconds).cmp(&(
            other.year,
            other.month,
            other.day,
            other.seconds,
        ))
    }

    /// `self - other`, as a signed second count. The day delta is computed
    /// first and only then combined with the seconds delta, so that the
    /// result never overflows even when the two dates are decades apart.
    pub fn subtract(&self, other: &Self, cfg: &EpochConfig) -> i32 {
        let da = cfg.days_from_ymd(self.year as i32, self.month, self.day);
        let db = cfg.days_from_ymd(other.year as i32, other.month, other.day);
        (da - db) * 86_400 + (self.seconds - other.seconds)
    }

    /// Roll the day forward or back while `seconds` is outside `[-86400, 86400)`.
    pub fn normalize(&mut self) {
        const ONE_DAY: i32 = 86_400;
        if self.seconds <= -ONE_DAY {
            self.decrement_one_day();
            self.seconds += ONE_DAY;
        } else if self.seconds >= ONE_DAY {
            self.increment_one_day();
            self.seconds -= ONE_DAY;
        }
    }

    fn increment_one_day(&mut self) {
        let year = Year::new_unchecked(self.year);
        self.day += 1;
        if self.day > days_in_month(year, Month::new_unchecked(self.month)) {
            self.day = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
                self.year += 1;
            }
        }
    }

    fn decrement_one_day(&mut self) {
        self.day -= 1;
        if self.day == 0 {
            self.month -= 1;
            if self.month == 0 {
                self.month = 12;
                self.year -= 1;
                self.day = 31;
            } else {
                let year = Year::new_unchecked(self.year);
                self.day = days_in_month(year, Month::new_unchecked(self.month));
            }
        }
    }

    /// Expand a tuple tagged w, s, or u into its w/s/u siblings, given the STD
    /// offset and DST delta in force. w = s + delta = u + off + delta;
    /// s = w - delta = u + off; u = s - off = w - off - delta.
    pub fn expand(&self, offset: Offset, delta: Offset) -> (DateTuple, DateTuple, DateTuple) {
        let off = offset.get();
        let delt = delta.get();
        let (mut w, mut s, mut u) = match self.suffix {
            Suffix::Standard => (
                DateTuple::new(self.year, self.month, self.day, self.seconds + delt, Suffix::Wall),
                *self,
                DateTuple::new(self.year, self.month, self.day, self.seconds - off, Suffix::Utc),
            ),
            Suffix::Utc => (
                DateTuple::new(
                    self.year,
                    self.month,
                    self.day,
                    self.seconds + off + delt,
                    Suffix::Wall,
                ),
                DateTuple::new(self.year, self.month, self.day, self.seconds + off, Suffix::Standard),
                *self,
            ),
            Suffix::Wall => (
                DateTuple { suffix: Suffix::Wall, ..*self },
                DateTuple::new(self.year, self.month, self.day, self.seconds - delt, Suffix::Standard),
                DateTuple::new(
                    self.year,
                    self.month,
                    self.day,
                    self.seconds - delt - off,
                    Suffix::Utc,
                ),
            ),
        };
        w.normalize();
        s.normalize();
        u.normalize();
        (w, s, u)
    }

    /// Compare against `[start, until)` with about one month of slop,
    /// tolerating the day/seconds fields so callers can pre-filter rules
    /// without exact arithmetic. Widens to `i32` months so a year delta past
    /// 2730 (32767 / 12) doesn't overflow.
    pub fn compare_fuzzy(&self, start: &Self, until: &Self) -> FuzzyCompare {
        let t_months = i32::from(self.year) * 12 + i32::from(self.month);
        let start_months = i32::from(start.year) * 12 + i32::from(start.month);
        if t_months < start_months - 1 {
            return FuzzyCompare::Prior;
        }
        let until_months = i32::from(until.year) * 12 + i32::from(until.month);
        if until_months + 1 < t_months {
            return FuzzyCompare::FarFuture;
        }
        FuzzyCompare::Within
    }
}
