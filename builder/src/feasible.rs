// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use tracing::debug;

use common::CategoryId;
use pairs::{Pair, PairStatus, PairTable};
use partition::{ExclusionTable, Kind, Slot, Spec};
use suite::{Vector, Warning};

/// Search nodes allowed per witness search. An exhausted budget reports the
/// pair feasible; the builder demotes such a pair later if no vector works out.
pub(crate) const NODE_BUDGET: usize = 20_000;

/// True iff the slot can join the partial vector: its column is free and no
/// exclusion entry pairs it with an assigned slot.
pub(crate) fn compatible(exclusions: &ExclusionTable, partial: &Vector, slot: Slot) -> bool {
    !partial.is_assigned(slot.category) && exclusions.compatible_with(slot, partial.assigned_slots())
}

/// True iff every property required by an assigned slot is declared by another
/// assigned slot, or can still be declared by a compatible normal choice in an
/// unassigned category.
pub(crate) fn requires_reachable(spec: &Spec, exclusions: &ExclusionTable, partial: &Vector) -> bool {
    let assigned = partial.assigned_slots();
    for &slot in assigned.iter() {
        for &property in spec.choice(slot).requires.iter() {
            if assigned.iter().any(|&other| other != slot && spec.choice(other).declares(property)) {
                continue;
            }
            let open = spec.property(property).providers.iter().any(|&provider| {
                spec.choice(provider).kind == Kind::Normal
                    && !partial.is_assigned(provider.category)
                    && exclusions.compatible_with(provider, assigned.iter().copied())
            });
            if !open {
                return false;
            }
        }
    }
    true
}

/// True iff every property required by an assigned slot is declared by some
/// other assigned slot.
pub(crate) fn requires_met(spec: &Spec, vector: &Vector) -> bool {
    let assigned = vector.assigned_slots();
    assigned.iter().all(|&slot| {
        spec.choice(slot)
            .requires
            .iter()
            .all(|&property| assigned.iter().any(|&other| other != slot && spec.choice(other).declares(property)))
    })
}

fn extend(
    spec: &Spec,
    exclusions: &ExclusionTable,
    partial: &mut Vector,
    remaining: &[CategoryId],
    budget: &mut usize,
) -> bool {
    if *budget == 0 {
        return true;
    }
    *budget -= 1;

    let (&category, rest) = match remaining.split_first() {
        Some(split) => split,
        None => return requires_met(spec, partial),
    };

    for slot in spec.normal_slots(category) {
        if !compatible(exclusions, partial, slot) {
            continue;
        }
        partial.set(slot);
        if requires_reachable(spec, exclusions, partial) && extend(spec, exclusions, partial, rest, budget) {
            return true;
        }
        partial.clear(category);
    }
    false
}

/// Search for any complete valid vector containing both endpoints of the pair.
pub(crate) fn has_witness(spec: &Spec, exclusions: &ExclusionTable, pair: Pair) -> bool {
    let [a, b] = pair.slots();
    if exclusions.is_excluded(a, b) {
        return false;
    }
    let mut partial = Vector::from_pair(spec.width(), pair);
    if !requires_reachable(spec, exclusions, &partial) {
        return false;
    }
    let remaining: Vec<CategoryId> = spec.category_ids().filter(|&id| !partial.is_assigned(id)).collect();
    let mut budget = NODE_BUDGET;
    extend(spec, exclusions, &mut partial, &remaining, &mut budget)
}

/// Test every required pair for feasibility, in enumeration order.
///
/// Pairs without a witness vector become infeasible and each yields one
/// warning. Re-screening an already demoted pair would find the same answer;
/// the table never revisits them.
pub fn screen(spec: &Spec, exclusions: &ExclusionTable, table: &mut PairTable) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for position in 0..table.len() {
        if table.status_at(position) != PairStatus::Uncovered {
            continue;
        }
        let pair = table.pair(position);
        if !has_witness(spec, exclusions, pair) {
            table.mark_infeasible(position);
            debug!(pair = ?pair, "no witness vector");
            warnings.push(Warning::from_pair(spec.width(), pair));
        }
    }
    warnings
}
