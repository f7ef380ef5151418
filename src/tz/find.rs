//! Resolving an epoch-seconds instant or a local (wall-clock) date-time
//! against the active transition pool (§4.9/§4.10), including fold/overlap
//! detection and disambiguation-policy resolution for ambiguous wall times.
use crate::date_tuple::DateTuple;
use crate::tz::storage::TransitionStorage;

/// How to resolve a wall-clock instant that falls in a gap (spring-forward)
/// or overlap (fall-back).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Disambiguate {
    /// Gap: later side. Overlap: earlier side. Never produces an error.
    Compatible,
    /// Always the earlier of the two valid interpretations.
    Earlier,
    /// Always the later of the two valid interpretations.
    Later,
    /// Gap: earlier side. Overlap: later side (the opposite of `Compatible`).
    Reversed,
}

/// How an instant's wall-clock reading related to the zone's transitions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Unambiguous: exactly one offset applies.
    Unique,
    /// In a fall-back overlap, resolved to the first (earlier, pre-transition) occurrence.
    OverlapEarlier,
    /// In a fall-back overlap, resolved to the second (later, post-transition) occurrence.
    OverlapLater,
    /// In a spring-forward gap, resolved by shifting to the earlier side.
    GapEarlier,
    /// In a spring-forward gap, resolved by shifting to the later side.
    GapLater,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FindResultType {
    NotFound,
    Exact,
    Gap,
    Overlap,
}

/// Result of resolving an epoch-seconds instant: which transition covers
/// it, and whether that instant fell in the first or second pass of a
/// fall-back overlap (`fold`).
#[derive(Debug, Copy, Clone)]
pub struct EpochSecondsFind {
    pub transition_index: u8,
    pub fold: u8,
    pub num: u8,
}

/// Walk the active transitions in order, stopping at the first whose
/// `start_epoch_seconds` is after `epoch_seconds`; `curr` is then the
/// transition whose interval contains it.
pub fn find_by_epoch_seconds(storage: &TransitionStorage, epoch_seconds: i32) -> Option<EpochSecondsFind> {
    let mut prev: Option<u8> = None;
    let mut curr: Option<u8> = None;
    let mut next: Option<u8> = None;
    for i in storage.active_range() {
        next = Some(i);
        if storage.get(i).start_epoch_seconds > epoch_seconds {
            break;
        }
        prev = curr;
        curr = next;
        next = None;
    }
    let curr_idx = curr?;
    let (fold, num) = calc_fold_and_overlap(storage, prev, curr_idx, next, epoch_seconds);
    Some(EpochSecondsFind { transition_index: curr_idx, fold, num })
}

/// Determine whether `epoch_seconds` falls in the shadow a neighbouring
/// transition casts across a fall-back overlap, by comparing how far the
/// neighbour's wall clock shifted (`shift_seconds`, negative for a
/// fall-back) against how far into `curr`'s interval the instant sits.
fn calc_fold_and_overlap(
    storage: &TransitionStorage,
    prev: Option<u8>,
    curr: u8,
    next: Option<u8>,
    epoch_seconds: i32,
) -> (u8, u8) {
    if let Some(p) = prev {
        let shift = storage.get(curr).offset_seconds + storage.get(curr).delta_seconds
            - (storage.get(p).offset_seconds + storage.get(p).delta_seconds);
        if shift < 0 {
            let elapsed = epoch_seconds - storage.get(curr).start_epoch_seconds;
            if elapsed < -shift {
                return (1, 2);
            }
        }
    }
    if let Some(n) = next {
        let shift = storage.get(n).offset_seconds + storage.get(n).delta_seconds
            - (storage.get(curr).offset_seconds + storage.get(curr).delta_seconds);
        if shift < 0 {
            let remaining = storage.get(n).start_epoch_seconds - epoch_seconds;
            if remaining <= -shift {
                return (0, 2);
            }
        }
    }
    (0, 1)
}

/// Result of walking the active transitions for a local date-time: how many
/// distinct transitions claim it (0 = gap, 1 = unique, 2 = overlap) and
/// which ones.
#[derive(Debug, Copy, Clone)]
pub struct LocalFind {
    pub prev: Option<u8>,
    pub curr: Option<u8>,
    pub num: u8,
}

/// Walk the active transitions, counting how many `[start_dt, until_dt)`
/// intervals contain `target`.
pub fn find_by_local_date_time(storage: &TransitionStorage, target: &DateTuple) -> LocalFind {
    let mut prev: Option<u8> = None;
    let mut curr: Option<u8> = None;
    let mut num: u8 = 0;

    for i in storage.active_range() {
        curr = Some(i);
        let t = storage.get(i);
        let is_exact = t.start_dt.compare(target).is_le() && target.compare(&t.until_dt).is_lt();
        if is_exact {
            if num == 1 {
                num = 2;
                break;
            }
            num = 1;
        } else if t.start_dt.compare(target).is_gt() {
            break;
        }
        prev = curr;
        curr = None;
    }
    if num == 1 {
        curr = prev;
    }
    LocalFind { prev, curr, num }
}

/// The outcome of resolving a (possibly ambiguous) local date-time: which
/// transition's offset/abbreviation should be reported as authoritative,
/// and which offset was used to compute the epoch-seconds value that may
/// then need reinterpreting (distinct from the target only in a gap).
#[derive(Debug, Copy, Clone)]
pub struct LocalDateTimeResult {
    pub result_type: FindResultType,
    pub resolved: Resolved,
    pub fold: u8,
    pub transition: Option<u8>,
    pub req_offset_seconds: i32,
    pub req_delta_seconds: i32,
}

impl LocalDateTimeResult {
    fn not_found() -> Self {
        Self {
            result_type: FindResultType::NotFound,
            resolved: Resolved::Unique,
            fold: 0,
            transition: None,
            req_offset_seconds: 0,
            req_delta_seconds: 0,
        }
    }
}

/// Resolve a [`LocalFind`] using `disambiguate`. For a gap, the transition
/// whose offset should be used to compute epoch-seconds (`req`) is the
/// *other* one from the transition ultimately reported as authoritative
/// (`target`) -- converting with `req`'s offset and then reinterpreting at
/// `target`'s offset is what produces the shift across the gap.
pub fn resolve_local(storage: &TransitionStorage, find: LocalFind, disambiguate: Disambiguate) -> LocalDateTimeResult {
    match find.num {
        1 => {
            let idx = match find.curr {
                Some(idx) => idx,
                None => return LocalDateTimeResult::not_found(),
            };
            let t = storage.get(idx);
            LocalDateTimeResult {
                result_type: FindResultType::Exact,
                resolved: Resolved::Unique,
                fold: 0,
                transition: Some(idx),
                req_offset_seconds: t.offset_seconds,
                req_delta_seconds: t.delta_seconds,
            }
        }
        0 => {
            let (prev, curr) = match (find.prev, find.curr) {
                (Some(p), Some(c)) => (p, c),
                _ => return LocalDateTimeResult::not_found(),
            };
            let (target, req, resolved) = match disambiguate {
                Disambiguate::Earlier | Disambiguate::Reversed => (prev, curr, Resolved::GapEarlier),
                Disambiguate::Compatible | Disambiguate::Later => (curr, prev, Resolved::GapLater),
            };
            let r = storage.get(req);
            LocalDateTimeResult {
                result_type: FindResultType::Gap,
                resolved,
                fold: 0,
                transition: Some(target),
                req_offset_seconds: r.offset_seconds,
                req_delta_seconds: r.delta_seconds,
            }
        }
        2 => {
            let (prev, curr) = match (find.prev, find.curr) {
                (Some(p), Some(c)) => (p, c),
                _ => return LocalDateTimeResult::not_found(),
            };
            let (target, fold, resolved) = match disambiguate {
                Disambiguate::Earlier | Disambiguate::Compatible => (prev, 0u8, Resolved::OverlapEarlier),
                Disambiguate::Later | Disambiguate::Reversed => (curr, 1u8, Resolved::OverlapLater),
            };
            let t = storage.get(target);
            LocalDateTimeResult {
                result_type: FindResultType::Overlap,
                resolved,
                fold,
                transition: Some(target),
                req_offset_seconds: t.offset_seconds,
                req_delta_seconds: t.delta_seconds,
            }
        }
        _ => LocalDateTimeResult::not_found(),
    }
}
