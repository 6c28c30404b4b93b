// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use tracing::debug;

use common::CategoryId;
use pairs::{Pair, PairTable};
use partition::{ExclusionTable, Slot, Spec};
use suite::{Vector, Warning};

use crate::feasible::{compatible, requires_reachable};

/// Estimate how many completions remain for a pair: the product over the other
/// categories of the number of normal choices compatible with both endpoints.
fn completion_estimate(spec: &Spec, exclusions: &ExclusionTable, pair: Pair) -> u64 {
    let [a, b] = pair.slots();
    let mut product: u64 = 1;
    for category in spec.category_ids() {
        if category == a.category || category == b.category {
            continue;
        }
        let count = spec
            .normal_slots(category)
            .filter(|&slot| !exclusions.is_excluded(slot, a) && !exclusions.is_excluded(slot, b))
            .count() as u64;
        product = product.saturating_mul(count);
    }
    product
}

/// The most constrained uncovered pair, ties broken by enumeration order.
fn select_seed(spec: &Spec, exclusions: &ExclusionTable, table: &PairTable) -> usize {
    let positions = table.uncovered_positions();
    let mut best_position = positions[0];
    let mut best_estimate = completion_estimate(spec, exclusions, table.pair(best_position));
    for &position in positions[1..].iter() {
        let estimate = completion_estimate(spec, exclusions, table.pair(position));
        if estimate < best_estimate {
            best_position = position;
            best_estimate = estimate;
        }
    }
    best_position
}

/// The unassigned category with the fewest compatible choices, ties broken by
/// input order. `None` once the vector is complete.
fn most_constrained_category(spec: &Spec, exclusions: &ExclusionTable, partial: &Vector) -> Option<CategoryId> {
    let mut best: Option<(CategoryId, usize)> = None;
    for category in spec.category_ids() {
        if partial.is_assigned(category) {
            continue;
        }
        let count = spec.normal_slots(category).filter(|&slot| compatible(exclusions, partial, slot)).count();
        if best.map_or(true, |(_, best_count)| count < best_count) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

/// The compatible choices of a category, best first.
///
/// Ordered by the number of still-uncovered pairs the choice forms with the
/// assigned columns, then by how many choices stay compatible in the remaining
/// categories, then by input order (the sort is stable).
fn ranked_candidates(
    spec: &Spec,
    exclusions: &ExclusionTable,
    table: &PairTable,
    partial: &mut Vector,
    category: CategoryId,
) -> Vec<Slot> {
    let assigned = partial.assigned_slots();
    let mut scored: Vec<(Slot, usize, usize)> = Vec::new();

    for slot in spec.normal_slots(category) {
        if !exclusions.compatible_with(slot, assigned.iter().copied()) {
            continue;
        }
        let coverage = assigned.iter().filter(|&&other| table.is_uncovered(slot, other)).count();

        partial.set(slot);
        let mut freedom = 0;
        for other in spec.category_ids() {
            if partial.is_assigned(other) {
                continue;
            }
            freedom += spec.normal_slots(other).filter(|&filler| compatible(exclusions, partial, filler)).count();
        }
        partial.clear(category);

        scored.push((slot, coverage, freedom));
    }

    scored.sort_by(|x, y| (y.1, y.2).cmp(&(x.1, x.2)));
    scored.into_iter().map(|(slot, _, _)| slot).collect()
}

fn fill(spec: &Spec, exclusions: &ExclusionTable, table: &PairTable, partial: &mut Vector) -> bool {
    let category = match most_constrained_category(spec, exclusions, partial) {
        Some(category) => category,
        None => return true,
    };
    for slot in ranked_candidates(spec, exclusions, table, partial, category) {
        partial.set(slot);
        if requires_reachable(spec, exclusions, partial) && fill(spec, exclusions, table, partial) {
            return true;
        }
        partial.clear(category);
    }
    false
}

/// Emit pairwise vectors until every feasible pair is covered.
///
/// Each iteration seeds a vector with the most constrained uncovered pair and
/// fills the other columns greedily, backtracking over this iteration's
/// placements when a column runs dry. A seed that survives screening but
/// admits no vector here is demoted retroactively with the same warning.
pub fn build(spec: &Spec, exclusions: &ExclusionTable, table: &mut PairTable) -> (Vec<Vector>, Vec<Warning>) {
    let mut vectors = Vec::new();
    let mut warnings = Vec::new();

    while table.uncovered() > 0 {
        let position = select_seed(spec, exclusions, table);
        let pair = table.pair(position);
        let mut partial = Vector::from_pair(spec.width(), pair);

        if requires_reachable(spec, exclusions, &partial) && fill(spec, exclusions, table, &mut partial) {
            let fresh = table.cover_all(&partial.assigned_slots());
            debug!(seed = ?pair, fresh, "vector complete");
            vectors.push(partial);
        } else {
            debug!(seed = ?pair, "seed demoted, screening was too optimistic");
            table.mark_infeasible(position);
            warnings.push(Warning::from_pair(spec.width(), pair));
        }
    }

    (vectors, warnings)
}
