// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the test-vector types shared between the builder and
//! the writer, and the adapter subtracting a pre-existing suite from the
//! coverage target.
//!
//! A [Vector] assigns at most one choice per category; the builder grows
//! partial vectors and only hands out complete ones. A [Warning] wraps the
//! partial vector of a pair or single that no complete vector can contain.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use common::{CategoryId, ChoiceId, DONT_CARE_TEXT};
use pairs::Pair;
use partition::{Slot, Spec};

pub use initial::subtract_initial;

mod initial;

/// An assignment of at most one choice per category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector {
    cells: Vec<Option<ChoiceId>>,
}

impl Vector {
    /// A vector with every column unassigned.
    pub fn new(width: usize) -> Self {
        Self { cells: vec![None; width] }
    }

    /// A vector holding exactly the two endpoints of a pair.
    pub fn from_pair(width: usize, pair: Pair) -> Self {
        let mut vector = Self::new(width);
        for slot in pair.slots() {
            vector.set(slot);
        }
        vector
    }

    /// The number of columns.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Assign a column.
    pub fn set(&mut self, slot: Slot) {
        self.cells[slot.category.as_usize()] = Some(slot.choice);
    }

    /// Unassign a column.
    pub fn clear(&mut self, category: CategoryId) {
        self.cells[category.as_usize()] = None;
    }

    /// The choice assigned to a column, if any.
    pub fn get(&self, category: CategoryId) -> Option<ChoiceId> {
        self.cells[category.as_usize()]
    }

    /// True iff the column is assigned.
    pub fn is_assigned(&self, category: CategoryId) -> bool {
        self.cells[category.as_usize()].is_some()
    }

    /// True iff every column is assigned.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The assigned slots, in category order.
    pub fn assigned_slots(&self) -> Vec<Slot> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(category, cell)| {
                cell.map(|choice| Slot::new(CategoryId::from_usize(category), choice))
            })
            .collect()
    }

    /// The text of a column: the choice name, or `_` when unassigned.
    pub fn cell_text<'s>(&self, spec: &'s Spec, category: CategoryId) -> &'s str {
        match self.cells[category.as_usize()] {
            Some(choice) => spec.choice(Slot::new(category, choice)).name.as_str(),
            None => DONT_CARE_TEXT,
        }
    }
}

/// A non-fatal report: a pair or single no complete vector can contain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// The assignment that could not be completed.
    pub partial: Vector,
}

impl Warning {
    /// Wrap an uncompletable pair.
    pub fn from_pair(width: usize, pair: Pair) -> Self {
        Self { partial: Vector::from_pair(width, pair) }
    }

    /// Wrap an uncompletable partial vector.
    pub fn from_partial(partial: Vector) -> Self {
        Self { partial }
    }

    /// Render the warning line: the assigned columns between brackets.
    pub fn render(&self, spec: &Spec) -> String {
        let slots = self.partial.assigned_slots();
        let mut line = String::from("Warning - No pair possible:  [");
        for slot in slots {
            line.push(' ');
            line.push_str(&spec.slot_text(slot));
        }
        line.push_str(" ]");
        line
    }
}
