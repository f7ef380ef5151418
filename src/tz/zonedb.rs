//! A tiny, hand-built zone registry used only by this crate's own tests and
//! doc examples. Real deployments are expected to supply their own
//! `&'static ZoneInfo` tables (generated from the IANA TZDB the same way
//! the reference library's `zonedb` code generator does); this module is
//! deliberately not part of the crate's public surface.
use crate::tz::info::{djb2, ZoneContext, ZoneEra, ZoneInfo, ZonePolicy, ZoneRule};

static US_CONTEXT: ZoneContext =
    ZoneContext { start_year: 1970, until_year: 2100, version: "fixture-2024a", letters: &["S", "D"] };

// US DST rules as fixed by the Energy Policy Act of 2005, effective 2007
// onward: spring forward the second Sunday in March, fall back the first
// Sunday in November, both at 02:00 local wall time.
static US_RULES: [ZoneRule; 2] = [
    ZoneRule {
        from_year: 2007,
        to_year: 9999,
        in_month: 3,
        on_day_of_week: 1, // Sunday
        on_day_of_month: 8,
        at_time_code: 8, // 02:00
        at_time_modifier: 0x00,
        delta_code: 0x08, // +1h
        letter_index: 1,  // "D"
    },
    ZoneRule {
        from_year: 2007,
        to_year: 9999,
        in_month: 11,
        on_day_of_week: 1, // Sunday
        on_day_of_month: 1,
        at_time_code: 8, // 02:00
        at_time_modifier: 0x00,
        delta_code: 0x04, // +0h
        letter_index: 0,  // "S"
    },
];

static US_POLICY: ZonePolicy = ZonePolicy { rules: &US_RULES };

static LOS_ANGELES_ERAS: [ZoneEra; 1] = [ZoneEra {
    policy: Some(&US_POLICY),
    format: "P%T",
    offset_code: -32, // -8h
    delta_code: 0x04,
    until_year: 9999,
    until_month: 1,
    until_day: 1,
    until_time_code: 0,
    until_time_modifier: 0,
}];

pub static LOS_ANGELES: &ZoneInfo =
    &ZoneInfo { name: "America/Los_Angeles", context: &US_CONTEXT, eras: &LOS_ANGELES_ERAS, target: None };

static NEW_YORK_ERAS: [ZoneEra; 1] = [ZoneEra {
    policy: Some(&US_POLICY),
    format: "E%T",
    offset_code: -20, // -5h
    delta_code: 0x04,
    until_year: 9999,
    until_month: 1,
    until_day: 1,
    until_time_code: 0,
    until_time_modifier: 0,
}];

pub static NEW_YORK: &ZoneInfo =
    &ZoneInfo { name: "America/New_York", context: &US_CONTEXT, eras: &NEW_YORK_ERAS, target: None };

// A link alias, exercising `ZoneInfo::is_link`/`resolved`.
pub static INDIANAPOLIS: &ZoneInfo =
    &ZoneInfo { name: "America/Indiana/Indianapolis", context: &US_CONTEXT, eras: &[], target: Some(NEW_YORK) };

static UTC_CONTEXT: ZoneContext = ZoneContext { start_year: 1970, until_year: 2100, version: "fixture-2024a", letters: &[] };

static UTC_ERAS: [ZoneEra; 1] = [ZoneEra {
    policy: None,
    format: "UTC",
    offset_code: 0,
    delta_code: 0x04,
    until_year: 9999,
    until_month: 1,
    until_day: 1,
    until_time_code: 0,
    until_time_modifier: 0,
}];

pub static UTC: &ZoneInfo = &ZoneInfo { name: "Etc/UTC", context: &UTC_CONTEXT, eras: &UTC_ERAS, target: None };

static ALL_ZONES: &[&ZoneInfo] = &[LOS_ANGELES, NEW_YORK, INDIANAPOLIS, UTC];

/// Look up a zone fixture by name, via the same djb2 hash the reference
/// library's generated registries index by (collisions are broken by a
/// plain name comparison, as there are only a handful of entries here).
pub fn find_by_name(name: &str) -> Option<&'static ZoneInfo> {
    let target_hash = djb2(name);
    ALL_ZONES.iter().copied().find(|z| z.hash() == target_hash && z.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_zones_by_name() {
        assert_eq!(find_by_name("America/Los_Angeles").map(|z| z.name), Some("America/Los_Angeles"));
        assert_eq!(find_by_name("America/New_York").map(|z| z.name), Some("America/New_York"));
        assert_eq!(find_by_name("Nonexistent/Zone").map(|z| z.name), None);
    }

    #[test]
    fn link_resolves_to_target() {
        assert!(INDIANAPOLIS.is_link());
        assert_eq!(INDIANAPOLIS.resolved().name, "America/New_York");
    }

    #[test]
    fn fixed_offset_zone_has_no_policy() {
        assert!(UTC.eras[0].policy.is_none());
    }
}
