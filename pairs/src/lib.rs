// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the [PairTable] tracking which two-column interactions
//! the generated suite still has to cover.
//!
//! The table is filled once per invocation from the specification and then only
//! transitions forward: a pair starts `Uncovered`, the feasibility screen may
//! demote it to `Infeasible`, and the builder (or an initial suite) marks it
//! `Covered` exactly once. The enumeration order is shuffled with the seeded
//! generator; every later tie-break and warning refers back to that order, so a
//! fixed seed reproduces the output byte for byte.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use partition::{ExclusionTable, Slot, Spec};

#[cfg(test)]
mod test_table;

/// An unordered two-column slice of a vector.
///
/// Stored with the lower category first, so `{a, b}` and `{b, a}` intern to the
/// same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pair {
    /// The endpoint in the lower-numbered category.
    pub first: Slot,
    /// The endpoint in the higher-numbered category.
    pub second: Slot,
}

impl Pair {
    /// Normalize two slots of distinct categories into a [Pair].
    pub fn new(a: Slot, b: Slot) -> Self {
        debug_assert_ne!(a.category, b.category);
        if a.category < b.category {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Both endpoints, lower category first.
    pub fn slots(&self) -> [Slot; 2] {
        [self.first, self.second]
    }
}

/// The life of a required pair. Transitions only move left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairStatus {
    /// Feasible until shown otherwise, not yet in any vector.
    Uncovered,
    /// Present in at least one emitted or pre-existing vector.
    Covered,
    /// No valid vector contains both endpoints.
    Infeasible,
}

/// The required-pair universe with per-pair status.
pub struct PairTable {
    pairs: Vec<Pair>,
    index: HashMap<Pair, usize>,
    status: Vec<PairStatus>,
    uncovered: usize,
}

impl PairTable {
    /// Enumerate the required pairs of the specification.
    ///
    /// Every pair of normal choices from distinct categories is required,
    /// except those conflicting through an `if`-derived exclusion, which are
    /// unsatisfiable by construction and leave the universe without a warning.
    /// The surviving pairs are shuffled once; the resulting order is the
    /// enumeration order referred to throughout the builder.
    pub fn enumerate<R: Rng>(spec: &Spec, exclusions: &ExclusionTable, rng: &mut R) -> Self {
        let mut pairs = Vec::new();
        for left in spec.category_ids() {
            for right in spec.category_ids().skip(left.as_usize() + 1) {
                for a in spec.normal_slots(left) {
                    for b in spec.normal_slots(right) {
                        if exclusions.dropped_silently(a, b) {
                            continue;
                        }
                        pairs.push(Pair::new(a, b));
                    }
                }
            }
        }
        pairs.shuffle(rng);

        let mut index = HashMap::with_capacity(pairs.len());
        for (position, &pair) in pairs.iter().enumerate() {
            index.insert(pair, position);
        }
        let uncovered = pairs.len();
        let status = vec![PairStatus::Uncovered; pairs.len()];
        Self { pairs, index, status, uncovered }
    }

    /// The number of required pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True iff no pair is required.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pair at a position of the enumeration order.
    pub fn pair(&self, position: usize) -> Pair {
        self.pairs[position]
    }

    /// The status at a position of the enumeration order.
    pub fn status_at(&self, position: usize) -> PairStatus {
        self.status[position]
    }

    /// The status of the pair of two slots, if the pair is required.
    pub fn status_of(&self, a: Slot, b: Slot) -> Option<PairStatus> {
        if a.category == b.category {
            return None;
        }
        self.index.get(&Pair::new(a, b)).map(|&position| self.status[position])
    }

    /// True iff the pair of the two slots is required and still uncovered.
    pub fn is_uncovered(&self, a: Slot, b: Slot) -> bool {
        self.status_of(a, b) == Some(PairStatus::Uncovered)
    }

    /// The number of pairs still uncovered.
    pub fn uncovered(&self) -> usize {
        self.uncovered
    }

    /// Positions of the still-uncovered pairs, in enumeration order.
    pub fn uncovered_positions(&self) -> Vec<usize> {
        (0..self.pairs.len()).filter(|&position| self.status[position] == PairStatus::Uncovered).collect()
    }

    /// All pairs with their status, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, PairStatus)> + '_ {
        self.pairs.iter().copied().zip(self.status.iter().copied())
    }

    /// Demote an uncovered pair: no vector can contain it.
    pub fn mark_infeasible(&mut self, position: usize) {
        debug_assert_eq!(self.status[position], PairStatus::Uncovered);
        self.status[position] = PairStatus::Infeasible;
        self.uncovered -= 1;
    }

    /// Mark the pair of two slots covered.
    ///
    /// Returns true iff the pair was required and uncovered until now. Covering
    /// twice is a no-op, infeasible pairs stay infeasible.
    pub fn cover(&mut self, a: Slot, b: Slot) -> bool {
        if a.category == b.category {
            return false;
        }
        match self.index.get(&Pair::new(a, b)) {
            Some(&position) if self.status[position] == PairStatus::Uncovered => {
                self.status[position] = PairStatus::Covered;
                self.uncovered -= 1;
                true
            }
            _ => false,
        }
    }

    /// Mark every pair of the given slots covered and return how many were new.
    ///
    /// The slots of one complete or partial vector, one per category.
    pub fn cover_all(&mut self, slots: &[Slot]) -> usize {
        let mut fresh = 0;
        for (offset, &a) in slots.iter().enumerate() {
            for &b in slots.iter().skip(offset + 1) {
                if self.cover(a, b) {
                    fresh += 1;
                }
            }
        }
        fresh
    }
}
