// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use partition::{Analysis, Slot, Spec};

use crate::{Pair, PairStatus, PairTable};

fn slot(spec: &Spec, category: &str, choice: &str) -> Slot {
    let category_id = spec.category_to_id[category];
    Slot::new(category_id, spec.choice_to_id[category_id.as_usize()][choice])
}

fn table_for(source: &str) -> (Analysis, PairTable) {
    let analysis = partition::parse(source).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let table = PairTable::enumerate(&analysis.spec, &analysis.exclusions, &mut rng);
    (analysis, table)
}

#[test]
fn test_unconstrained_universe() {
    let (_, table) = table_for("x: x1 x2\ny: y1 y2\nz: z1 z2");
    // Three category pairs, four value pairs each.
    assert_eq!(table.len(), 12);
    assert_eq!(table.uncovered(), 12);
}

#[test]
fn test_singles_join_no_pairs() {
    let (analysis, table) = table_for("x: x1 x2 e error\ny: y1 y2 s single");
    assert_eq!(table.len(), 4);
    let spec = &analysis.spec;
    assert_eq!(table.status_of(slot(spec, "x", "e"), slot(spec, "y", "y1")), None);
    assert_eq!(table.status_of(slot(spec, "x", "x1"), slot(spec, "y", "s")), None);
}

#[test]
fn test_if_conflicts_leave_silently() {
    let (analysis, table) = table_for("
        col0: e0 error e1 error v0.0 prop v0 v0.1 prop v1
        col1: s0 single s1 single v1.0 if v0 v1.1 if v1
        col2: v2.0 if v0 if v1 v2.1
    ");
    // col0/col1 keeps 2 of 4, col0/col2 keeps 2 of 4, col1/col2 keeps all 4.
    assert_eq!(table.len(), 8);
    let spec = &analysis.spec;
    assert_eq!(table.status_of(slot(spec, "col0", "v0.1"), slot(spec, "col1", "v1.0")), None);
    assert_eq!(table.status_of(slot(spec, "col1", "v1.0"), slot(spec, "col2", "v2.0")), Some(PairStatus::Uncovered));
}

#[test]
fn test_except_conflicts_stay() {
    let (analysis, table) = table_for("a: a1 prop p a2\nb: b1 except p b2");
    assert_eq!(table.len(), 4);
    let spec = &analysis.spec;
    assert_eq!(table.status_of(slot(spec, "a", "a1"), slot(spec, "b", "b1")), Some(PairStatus::Uncovered));
}

#[test]
fn test_status_transitions() {
    let (analysis, mut table) = table_for("x: x1 x2\ny: y1 y2");
    let spec = &analysis.spec;
    let x1 = slot(spec, "x", "x1");
    let y1 = slot(spec, "y", "y1");
    assert!(table.cover(x1, y1));
    assert!(!table.cover(x1, y1));
    assert!(!table.cover(y1, x1));
    assert_eq!(table.uncovered(), 3);
    assert_eq!(table.status_of(x1, y1), Some(PairStatus::Covered));
    assert_eq!(table.status_of(x1, x1), None);
}

#[test]
fn test_cover_all() {
    let (analysis, mut table) = table_for("x: x1 x2\ny: y1 y2\nz: z1 z2");
    let spec = &analysis.spec;
    let row = [slot(spec, "x", "x1"), slot(spec, "y", "y1"), slot(spec, "z", "z1")];
    assert_eq!(table.cover_all(&row), 3);
    assert_eq!(table.cover_all(&row), 0);
    assert_eq!(table.uncovered(), 9);
}

#[test]
fn test_infeasible_is_final() {
    let (_analysis, mut table) = table_for("x: x1 x2\ny: y1 y2");
    let position = table.uncovered_positions()[0];
    let pair = table.pair(position);
    table.mark_infeasible(position);
    assert_eq!(table.status_at(position), PairStatus::Infeasible);
    assert_eq!(table.uncovered(), 3);
    // Covering an infeasible pair does not resurrect it.
    assert!(!table.cover(pair.first, pair.second));
    assert_eq!(table.status_at(position), PairStatus::Infeasible);
}

#[test]
fn test_enumeration_is_seed_stable() {
    let (_, table_a) = table_for("x: x1 x2\ny: y1 y2\nz: z1 z2");
    let (_, table_b) = table_for("x: x1 x2\ny: y1 y2\nz: z1 z2");
    let order_a: Vec<Pair> = table_a.iter().map(|(pair, _)| pair).collect();
    let order_b: Vec<Pair> = table_b.iter().map(|(pair, _)| pair).collect();
    assert_eq!(order_a, order_b);
}
