//! Fixed-capacity arena of [`Transition`] records, partitioned into
//! *active / prior / candidate / free* regions via three indices into a
//! reorderable permutation array (swaps move indices, never the records
//! themselves).
//!
//! ```text
//! | active … | prior | candidate … | free … |
//! 0        prior   cand          free       CAPACITY
//! ```
use crate::date_tuple::DateTuple;
use crate::tz::transition::{MatchStatus, Transition};

pub const CAPACITY: usize = 8;

#[derive(Debug)]
pub struct TransitionStorage {
    pool: [Transition; CAPACITY],
    indices: [u8; CAPACITY],
    index_prior: u8,
    index_candidate: u8,
    index_free: u8,
    alloc_size: u8,
}

impl Default for TransitionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionStorage {
    pub fn new() -> Self {
        let mut indices = [0u8; CAPACITY];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Self {
            pool: [Transition::default(); CAPACITY],
            indices,
            index_prior: 0,
            index_candidate: 0,
            index_free: 0,
            alloc_size: 0,
        }
    }

    fn slot(&self, region_index: u8) -> usize {
        self.indices[region_index as usize] as usize
    }

    pub fn get(&self, region_index: u8) -> &Transition {
        &self.pool[self.slot(region_index)]
    }

    pub fn get_mut(&mut self, region_index: u8) -> &mut Transition {
        let slot = self.slot(region_index);
        &mut self.pool[slot]
    }

    /// Return the free slot without consuming it. Repeated calls return the
    /// same slot until one of the `add_*`/`reserve_*` methods commits it.
    /// Once capacity is exhausted, degrades to returning the last slot
    /// rather than panicking or indexing out of bounds.
    pub fn get_free_agent(&mut self) -> &mut Transition {
        let region = if (self.index_free as usize) < CAPACITY {
            if self.index_free >= self.alloc_size {
                self.alloc_size = self.index_free + 1;
            }
            self.index_free
        } else {
            (CAPACITY - 1) as u8
        };
        self.get_mut(region)
    }

    /// Used only when the candidate pool is empty (simple eras): absorb the
    /// free slot into active by advancing all three indices by one.
    pub fn add_free_agent_to_active_pool(&mut self) {
        if self.index_free as usize >= CAPACITY {
            return;
        }
        self.index_free += 1;
        self.index_prior = self.index_free;
        self.index_candidate = self.index_free;
    }

    pub fn reset_candidate_pool(&mut self) {
        self.index_candidate = self.index_prior;
        self.index_free = self.index_prior;
    }

    /// Consume a free slot to serve as the current prior, shifting the
    /// candidate region right by one. Returns the prior's region index.
    pub fn reserve_prior(&mut self) -> u8 {
        let _ = self.get_free_agent();
        self.index_candidate += 1;
        self.index_free += 1;
        self.index_prior
    }

    /// If the free slot is a valid prior and is later than (or the existing
    /// prior isn't valid), swap it into the prior slot, keeping the latest
    /// valid prior.
    pub fn set_free_agent_as_prior_if_valid(&mut self) {
        let free_region = self.index_free;
        let prior_region = self.index_prior;
        let free_slot = self.slot(free_region);
        let prior_slot = self.slot(prior_region);

        let should_swap = {
            let prior = &self.pool[prior_slot];
            let free = &self.pool[free_slot];
            (prior.is_valid_prior && prior.transition_time.compare(&free.transition_time).is_lt())
                || !prior.is_valid_prior
        };
        if should_swap {
            self.pool[free_slot].is_valid_prior = true;
            self.pool[prior_slot].is_valid_prior = false;
            self.indices.swap(prior_region as usize, free_region as usize);
        }
    }

    /// Fold the prior into the candidate region by decrementing `candidate`.
    pub fn add_prior_to_candidate_pool(&mut self) {
        self.index_candidate -= 1;
    }

    /// Insertion-sort the free slot into the candidate region by
    /// `transition_time`, then consume it from the free pool.
    pub fn add_free_agent_to_candidate_pool(&mut self) {
        if self.index_free as usize >= CAPACITY {
            return;
        }
        let mut i = self.index_free;
        while i > self.index_candidate {
            let curr = self.slot(i);
            let prev = self.slot(i - 1);
            if self.pool[curr].transition_time.compare(&self.pool[prev].transition_time).is_ge() {
                break;
            }
            self.indices.swap(i as usize, (i - 1) as usize);
            i -= 1;
        }
        self.index_free += 1;
    }

    /// Scan candidates; those whose `match_status` is active are moved by
    /// index-swap into `[prior, new_active)`, then all three indices collapse
    /// to `new_active`. Returns the region index of the last transition moved.
    pub fn add_active_candidates_to_active_pool(&mut self) -> u8 {
        let mut i_active = self.index_prior;
        let mut i_candidate = self.index_candidate;
        while i_candidate < self.index_free {
            if self.get(i_candidate).match_status.is_active() {
                if i_active != i_candidate {
                    self.indices.swap(i_active as usize, i_candidate as usize);
                }
                i_active += 1;
            }
            i_candidate += 1;
        }
        self.index_prior = i_active;
        self.index_candidate = i_active;
        self.index_free = i_active;
        i_active - 1
    }

    pub fn candidate_range(&self) -> std::ops::Range<u8> {
        self.index_candidate..self.index_free
    }

    pub fn active_range(&self) -> std::ops::Range<u8> {
        0..self.index_prior
    }

    pub fn prior_index(&self) -> u8 {
        self.index_prior
    }

    pub fn is_empty_active(&self) -> bool {
        self.index_prior == 0
    }
}

/// Normalise the `transition_time*` fields of a run of transitions; most are
/// given in 'w' mode, but 's' or 'u' ones are expanded into 'w' using the UTC
/// offset of the *previous* transition.
pub fn fix_transition_times(storage: &mut TransitionStorage, range: std::ops::Range<u8>) {
    if range.is_empty() {
        return;
    }
    let mut prev_offset = storage.get(range.start).offset_seconds;
    let mut prev_delta = storage.get(range.start).delta_seconds;
    for i in range {
        let t = storage.get_mut(i);
        let (w, s, u) = t.transition_time.expand(
            crate::common::scalar::Offset::new_unchecked(prev_offset),
            crate::common::scalar::Offset::new_unchecked(prev_delta),
        );
        t.transition_time = w;
        t.transition_time_s = s;
        t.transition_time_u = u;
        prev_offset = t.offset_seconds;
        prev_delta = t.delta_seconds;
    }
}

pub fn compare_date_tuples(a: &DateTuple, b: &DateTuple) -> std::cmp::Ordering {
    a.compare(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_tuple::Suffix;

    fn dt(day: u8, seconds: i32) -> DateTuple {
        DateTuple::new(2022, 1, day, seconds, Suffix::Wall)
    }

    #[test]
    fn simple_era_goes_straight_to_active_pool() {
        let mut ts = TransitionStorage::new();
        ts.get_free_agent().transition_time = dt(1, 0);
        ts.add_free_agent_to_active_pool();
        assert_eq!(ts.active_range(), 0..1);
    }

    #[test]
    fn candidate_pool_is_insertion_sorted() {
        let mut ts = TransitionStorage::new();
        ts.get_free_agent().transition_time = dt(10, 0);
        ts.add_free_agent_to_candidate_pool();
        ts.get_free_agent().transition_time = dt(5, 0);
        ts.add_free_agent_to_candidate_pool();
        ts.get_free_agent().transition_time = dt(7, 0);
        ts.add_free_agent_to_candidate_pool();

        let days: Vec<u8> = ts.candidate_range().map(|i| ts.get(i).transition_time.day).collect();
        assert_eq!(days, vec![5, 7, 10]);
    }

    #[test]
    fn prior_swap_keeps_latest_valid_prior() {
        let mut ts = TransitionStorage::new();
        let prior_region = ts.reserve_prior();
        ts.get_mut(prior_region).is_valid_prior = false;

        ts.get_free_agent().transition_time = dt(3, 0);
        ts.get_free_agent().is_valid_prior = true;
        ts.set_free_agent_as_prior_if_valid();
        assert_eq!(ts.get(prior_region).transition_time.day, 3);

        ts.get_free_agent().transition_time = dt(20, 0);
        ts.get_free_agent().is_valid_prior = true;
        ts.set_free_agent_as_prior_if_valid();
        assert_eq!(ts.get(prior_region).transition_time.day, 20);
    }

    #[test]
    fn active_candidates_are_compacted_left() {
        let mut ts = TransitionStorage::new();
        ts.get_free_agent().transition_time = dt(1, 0);
        ts.get_free_agent().match_status = MatchStatus::FarPast;
        ts.add_free_agent_to_candidate_pool();
        ts.get_free_agent().transition_time = dt(2, 0);
        ts.get_free_agent().match_status = MatchStatus::ExactMatch;
        ts.add_free_agent_to_candidate_pool();

        ts.add_active_candidates_to_active_pool();
        assert_eq!(ts.active_range(), 0..1);
        assert_eq!(ts.get(0).transition_time.day, 2);
    }
}
