// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashMap;
use std::fmt::{Debug, Error, Formatter};

use common::{CategoryId, ChoiceId, PropertyId};

/// How a choice participates in the generated suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Participates in pairwise coverage.
    Normal,
    /// Appears in exactly one vector of the singles section.
    Single,
    /// Appears in exactly one vector of the singles section, before all singles.
    Error,
}

/// One cell of a test vector: a choice within its category.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    /// The column.
    pub category: CategoryId,
    /// The value within the column.
    pub choice: ChoiceId,
}

impl Slot {
    /// Pair up a category and one of its choices.
    pub fn new(category: CategoryId, choice: ChoiceId) -> Self {
        Self { category, choice }
    }
}

impl Debug for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}.{}", self.category, self.choice)
    }
}

/// A value of a category together with its qualifiers.
pub struct Choice {
    /// The name, unique within the owning category.
    pub name: String,
    /// Normal, single, or error.
    pub kind: Kind,
    /// Properties this choice declares through `prop`.
    pub declares: Vec<PropertyId>,
    /// Properties this choice demands through `if`.
    pub requires: Vec<PropertyId>,
    /// Properties this choice forbids through `except`.
    pub excludes: Vec<PropertyId>,
}

impl Choice {
    /// True iff the choice declares the property.
    pub fn declares(&self, property: PropertyId) -> bool {
        self.declares.contains(&property)
    }
}

/// A named column holding its choices in input order.
pub struct Category {
    /// The name, unique across the specification.
    pub name: String,
    /// All choices, in input order.
    pub choices: Vec<Choice>,
    /// The normal choices, in input order.
    pub normals: Vec<ChoiceId>,
}

/// A label declared by choices and referenced by `if`/`except` qualifiers.
pub struct Property {
    /// The name, unique across the specification.
    pub name: String,
    /// Every choice declaring the property, regardless of kind.
    pub providers: Vec<Slot>,
}

impl Property {
    /// The distinct categories containing a provider, in input order.
    pub fn provider_categories(&self) -> Vec<CategoryId> {
        let mut result: Vec<CategoryId> = Vec::new();
        for provider in self.providers.iter() {
            if !result.contains(&provider.category) {
                result.push(provider.category);
            }
        }
        result
    }
}

/// The resolved specification: the immutable input to enumeration and building.
pub struct Spec {
    /// The categories, in input order. Column order of all output follows this order.
    pub categories: Vec<Category>,
    /// The interned properties.
    pub properties: Vec<Property>,
    /// Reverse lookup of category ids by name.
    pub category_to_id: HashMap<String, CategoryId>,
    /// Reverse lookup of choice ids by name, one map per category.
    pub choice_to_id: Vec<HashMap<String, ChoiceId>>,
}

impl Spec {
    /// The number of categories.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// All category ids, in input order.
    pub fn category_ids(&self) -> impl Iterator<Item = CategoryId> {
        (0..self.categories.len()).map(CategoryId::from_usize)
    }

    /// Borrow a category.
    pub fn category(&self, id: CategoryId) -> &Category {
        &self.categories[id.as_usize()]
    }

    /// Borrow the choice in a slot.
    pub fn choice(&self, slot: Slot) -> &Choice {
        &self.categories[slot.category.as_usize()].choices[slot.choice.as_usize()]
    }

    /// Borrow a property.
    pub fn property(&self, id: PropertyId) -> &Property {
        &self.properties[id.as_usize()]
    }

    /// The normal choices of a category as slots, in input order.
    pub fn normal_slots(&self, category: CategoryId) -> impl Iterator<Item = Slot> + '_ {
        self.category(category).normals.iter().map(move |&choice| Slot::new(category, choice))
    }

    /// Render a slot as `category=choice`.
    pub fn slot_text(&self, slot: Slot) -> String {
        format!("{}={}", self.category(slot.category).name, self.choice(slot).name)
    }

    /// True iff any choice is marked `single` or `error`.
    pub fn has_singles(&self) -> bool {
        self.categories.iter().any(|category| category.choices.iter().any(|choice| choice.kind != Kind::Normal))
    }

    /// The slots of a given kind, in category-then-input order.
    pub fn slots_of_kind(&self, kind: Kind) -> Vec<Slot> {
        let mut result = Vec::new();
        for (category_id, category) in self.categories.iter().enumerate() {
            for (choice_id, choice) in category.choices.iter().enumerate() {
                if choice.kind == kind {
                    result.push(Slot::new(CategoryId::from_usize(category_id), ChoiceId::from_usize(choice_id)));
                }
            }
        }
        result
    }

    /// The categories offering more than one normal choice, in input order.
    pub fn varying_categories(&self) -> Vec<CategoryId> {
        self.category_ids().filter(|&id| self.category(id).normals.len() > 1).collect()
    }
}
