//! Typed views over the packed zone descriptor tables: [`ZoneInfo`],
//! [`ZoneEra`], [`ZonePolicy`], [`ZoneRule`], and the pure decoder functions
//! that unpack their bit-packed offset/delta/until/at fields into seconds.
use crate::date_tuple::Suffix;

/// Database-wide constants shared by every zone built from the same TZDB
/// release.
#[derive(Debug)]
pub struct ZoneContext {
    pub start_year: i16,
    pub until_year: i16,
    pub version: &'static str,
    /// DST letter strings referenced by `ZoneRule::letter_index`.
    pub letters: &'static [&'static str],
}

/// One `Rule` line: a named DST rule, valid over `[from_year, to_year]`.
#[derive(Debug)]
pub struct ZoneRule {
    pub from_year: i16,
    pub to_year: i16,
    pub in_month: u8,
    /// 0 means "exactly `on_day_of_month`"; 1-7 (Sun=1..Sat=7) means
    /// "on or after/before `on_day_of_month`", per [`crate::tz::generator::calc_start_day_of_month`].
    pub on_day_of_week: u8,
    /// 0 means "last `on_day_of_week`"; negative means "on or before |n|".
    pub on_day_of_month: i8,
    pub at_time_code: u8,
    pub at_time_modifier: u8,
    /// packed DST delta: 4-bit biased, see [`ZoneRule::dst_offset_seconds`]
    pub delta_code: u8,
    pub letter_index: u8,
}

impl ZoneRule {
    pub fn at_seconds(&self) -> i32 {
        (i32::from(self.at_time_code) * 15 + i32::from(self.at_time_modifier & 0x0f)) * 60
    }

    pub fn at_suffix(&self) -> Suffix {
        suffix_from_nibble(self.at_time_modifier & 0xf0)
    }

    pub fn dst_offset_seconds(&self) -> i32 {
        (i32::from(self.delta_code & 0x0f) - 4) * 15 * 60
    }
}

#[derive(Debug)]
pub struct ZonePolicy {
    pub rules: &'static [ZoneRule],
}

/// The body of a single `Zone` line: a fixed offset delta (`policy = None`
/// for "simple" eras) or a reference to a named rule set, plus the abbreviation
/// FORMAT template and the UNTIL boundary.
#[derive(Debug)]
pub struct ZoneEra {
    pub policy: Option<&'static ZonePolicy>,
    pub format: &'static str,
    /// packed STD offset code (15-minute units, with a high-nibble remainder
    /// folded into `delta_code`)
    pub offset_code: i8,
    pub delta_code: u8,
    pub until_year: i16,
    pub until_month: u8,
    pub until_day: u8,
    pub until_time_code: u8,
    pub until_time_modifier: u8,
}

impl ZoneEra {
    pub fn std_offset_seconds(&self) -> i32 {
        60 * (i32::from(self.offset_code) * 15 + i32::from((self.delta_code & 0xf0) >> 4))
    }

    pub fn dst_offset_seconds(&self) -> i32 {
        (i32::from(self.delta_code & 0x0f) - 4) * 15 * 60
    }

    pub fn until_seconds(&self) -> i32 {
        (i32::from(self.until_time_code) * 15 + i32::from(self.until_time_modifier & 0x0f)) * 60
    }

    pub fn until_suffix(&self) -> Suffix {
        suffix_from_nibble(self.until_time_modifier & 0xf0)
    }
}

fn suffix_from_nibble(n: u8) -> Suffix {
    match n {
        0x00 => Suffix::Wall,
        0x10 => Suffix::Standard,
        0x20 => Suffix::Utc,
        _ => Suffix::Wall,
    }
}

/// A named zone (or, when `target` is set, a LINK redirecting to another
/// zone). `eras` is empty iff this entry is a link.
#[derive(Debug)]
pub struct ZoneInfo {
    pub name: &'static str,
    pub context: &'static ZoneContext,
    pub eras: &'static [ZoneEra],
    pub target: Option<&'static ZoneInfo>,
}

impl ZoneInfo {
    pub fn is_link(&self) -> bool {
        self.target.is_some()
    }

    /// Resolve through a LINK redirect to the concrete zone carrying eras.
    pub fn resolved(&'static self) -> &'static ZoneInfo {
        match self.target {
            Some(target) => target,
            None => self,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self.name.rfind('/') {
            Some(idx) => &self.name[idx + 1..],
            None => self.name,
        }
    }

    pub fn hash(&self) -> u32 {
        djb2(self.name)
    }
}

/// The djb2 hash used by the (test-fixture-only) name registry.
pub fn djb2(s: &str) -> u32 {
    let mut hash: u32 = 5381;
    for b in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u32::from(b));
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_std_offset_and_dst_delta() {
        // offset_code=-32 (-8h in 15-min units), delta_code high nibble 0,
        // low nibble 4 (bias 4 -> 0 delta)
        let era = ZoneEra {
            policy: None,
            format: "PST",
            offset_code: -32,
            delta_code: 0x04,
            until_year: 9999,
            until_month: 1,
            until_day: 1,
            until_time_code: 0,
            until_time_modifier: 0,
        };
        assert_eq!(era.std_offset_seconds(), -8 * 3600);
        assert_eq!(era.dst_offset_seconds(), 0);
    }

    #[test]
    fn decodes_dst_delta_with_bias() {
        // low nibble 5 -> (5-4)*15*60 = 900s = 15 minutes... use 8 for 1h
        let era = ZoneEra {
            policy: None,
            format: "P%sT",
            offset_code: -32,
            delta_code: 0x08,
            until_year: 9999,
            until_month: 1,
            until_day: 1,
            until_time_code: 0,
            until_time_modifier: 0,
        };
        assert_eq!(era.dst_offset_seconds(), 3600);
    }

    #[test]
    fn decodes_until_seconds_and_suffix() {
        let era = ZoneEra {
            policy: None,
            format: "",
            offset_code: 0,
            delta_code: 0x04,
            until_year: 2007,
            until_month: 3,
            until_day: 11,
            until_time_code: 2 * 4, // 2:00 in 15-min units
            until_time_modifier: 0x20, // 'u'
        };
        assert_eq!(era.until_seconds(), 2 * 3600);
        assert_eq!(era.until_suffix(), Suffix::Utc);
    }

    #[test]
    fn djb2_is_deterministic() {
        assert_eq!(djb2("America/Los_Angeles"), djb2("America/Los_Angeles"));
        assert_ne!(djb2("America/Los_Angeles"), djb2("America/New_York"));
    }

    #[test]
    fn short_name_takes_final_path_component() {
        let ctx = ZoneContext { start_year: 2000, until_year: 2100, version: "test", letters: &[] };
        let info = ZoneInfo { name: "America/Los_Angeles", context: &ctx, eras: &[], target: None };
        assert_eq!(info.short_name(), "Los_Angeles");
    }
}
