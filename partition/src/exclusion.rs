// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashSet;

use common::ChoiceId;

use crate::model::{Slot, Spec};

/// The pairwise conflicts derived once from the `except` and `if` qualifiers.
///
/// This table is the single compatibility oracle for every search in the
/// builder: two choices can share a vector only if no entry forbids it.
///
/// Two derivations fill it:
///   * `c except P` conflicts with every choice of another category that
///     declares `P`, whatever its kind.
///   * `c if P` conflicts with every normal choice of a category holding a
///     provider of `P` that does not itself declare `P`. Requiring a property
///     pins every provider-holding column to a declaring value; `single` and
///     `error` choices of such a column stay out of the table so that their
///     own vectors can still be filled.
///
/// The two derivation families are kept apart because the pair enumerator
/// treats them differently: an `if`-derived conflict removes the pair from the
/// required universe silently, an `except`-derived conflict leaves it required
/// so that its infeasibility is reported.
pub struct ExclusionTable {
    except_derived: HashSet<(Slot, Slot)>,
    if_derived: HashSet<(Slot, Slot)>,
}

fn key(a: Slot, b: Slot) -> (Slot, Slot) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl ExclusionTable {
    /// Derive the conflict entries from a resolved specification.
    pub fn build(spec: &Spec) -> Self {
        let mut except_derived = HashSet::new();
        let mut if_derived = HashSet::new();

        for category_id in spec.category_ids() {
            for (choice_index, choice) in spec.category(category_id).choices.iter().enumerate() {
                let slot = Slot::new(category_id, ChoiceId::from_usize(choice_index));

                for &property in choice.excludes.iter() {
                    for &provider in spec.property(property).providers.iter() {
                        if provider.category != category_id {
                            except_derived.insert(key(slot, provider));
                        }
                    }
                }

                for &property in choice.requires.iter() {
                    for provider_category in spec.property(property).provider_categories() {
                        if provider_category == category_id {
                            continue;
                        }
                        for other in spec.normal_slots(provider_category) {
                            if !spec.choice(other).declares(property) {
                                if_derived.insert(key(slot, other));
                            }
                        }
                    }
                }
            }
        }

        Self { except_derived, if_derived }
    }

    /// True iff the two slots may never share a vector.
    pub fn is_excluded(&self, a: Slot, b: Slot) -> bool {
        let key = key(a, b);
        self.except_derived.contains(&key) || self.if_derived.contains(&key)
    }

    /// True iff the conflict stems from an `if` qualifier alone.
    ///
    /// Such pairs drop out of the required universe without a warning.
    pub fn dropped_silently(&self, a: Slot, b: Slot) -> bool {
        self.if_derived.contains(&key(a, b))
    }

    /// True iff the slot conflicts with none of the given assignment.
    pub fn compatible_with<I>(&self, slot: Slot, assigned: I) -> bool
    where
        I: IntoIterator<Item = Slot>,
    {
        assigned.into_iter().all(|other| !self.is_excluded(slot, other))
    }
}
