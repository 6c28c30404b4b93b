// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashMap;

use common::{CategoryId, ChoiceId, PropertyId};

use crate::error::{LineIndex, SpecError};
use crate::model::{Category, Choice, Kind, Property, Slot, Spec};
use crate::parser::grammar::RawCategory;
use crate::parser::Reserved;

fn intern(
    name: &str,
    properties: &mut Vec<Property>,
    property_to_id: &mut HashMap<String, PropertyId>,
) -> PropertyId {
    if let Some(&id) = property_to_id.get(name) {
        return id;
    }
    let id = PropertyId::from_usize(properties.len());
    properties.push(Property { name: name.to_string(), providers: Vec::new() });
    property_to_id.insert(name.to_string(), id);
    id
}

/// Resolve the raw categories into a [Spec].
///
/// Raises the static diagnostics: duplicate names, contradictory kinds,
/// self-exclusion, and references to properties nothing declares.
pub(crate) fn analyze(raw: Vec<RawCategory<'_>>, lines: &LineIndex) -> Result<Spec, SpecError> {
    let mut categories: Vec<Category> = Vec::new();
    let mut category_to_id: HashMap<String, CategoryId> = HashMap::new();
    let mut choice_to_id: Vec<HashMap<String, ChoiceId>> = Vec::new();
    let mut properties: Vec<Property> = Vec::new();
    let mut property_to_id: HashMap<String, PropertyId> = HashMap::new();
    // Offsets of every `if`/`except` reference, for the provider check below.
    let mut references: Vec<(PropertyId, usize)> = Vec::new();

    for (category_index, raw_category) in raw.into_iter().enumerate() {
        let category_id = CategoryId::from_usize(category_index);
        if category_to_id.insert(raw_category.name.to_string(), category_id).is_some() {
            return Err(SpecError::semantic(
                lines.position(raw_category.offset),
                format!("duplicate category name '{}'", raw_category.name),
            ));
        }

        let mut names: HashMap<String, ChoiceId> = HashMap::new();
        let mut choices: Vec<Choice> = Vec::new();
        let mut normals: Vec<ChoiceId> = Vec::new();

        for (choice_index, raw_choice) in raw_category.choices.into_iter().enumerate() {
            let choice_id = ChoiceId::from_usize(choice_index);
            if names.insert(raw_choice.name.to_string(), choice_id).is_some() {
                return Err(SpecError::semantic(
                    lines.position(raw_choice.offset),
                    format!("duplicate choice name '{}' in category '{}'", raw_choice.name, raw_category.name),
                ));
            }
            let slot = Slot::new(category_id, choice_id);

            let mut kind = Kind::Normal;
            let mut declares: Vec<PropertyId> = Vec::new();
            let mut requires: Vec<PropertyId> = Vec::new();
            let mut excludes: Vec<(PropertyId, usize)> = Vec::new();

            for qualifier in raw_choice.qualifiers.into_iter() {
                match qualifier.reserved {
                    Reserved::Single | Reserved::Error => {
                        let wanted = if qualifier.reserved == Reserved::Single { Kind::Single } else { Kind::Error };
                        if kind != Kind::Normal && kind != wanted {
                            return Err(SpecError::semantic(
                                lines.position(qualifier.offset),
                                format!("choice '{}' cannot be both 'single' and 'error'", raw_choice.name),
                            ));
                        }
                        kind = wanted;
                    }
                    Reserved::Prop | Reserved::If | Reserved::Except => {
                        let argument = match qualifier.argument {
                            Some(argument) => argument,
                            None => {
                                return Err(SpecError::parse(
                                    lines.position(qualifier.offset),
                                    format!("expected a property name after '{}'", qualifier.reserved.text()),
                                ));
                            }
                        };
                        let property = intern(argument.text, &mut properties, &mut property_to_id);
                        match qualifier.reserved {
                            Reserved::Prop => {
                                if !declares.contains(&property) {
                                    declares.push(property);
                                    properties[property.as_usize()].providers.push(slot);
                                }
                            }
                            Reserved::If => {
                                references.push((property, argument.offset));
                                if !requires.contains(&property) {
                                    requires.push(property);
                                }
                            }
                            _ => {
                                references.push((property, argument.offset));
                                if !excludes.iter().any(|&(id, _)| id == property) {
                                    excludes.push((property, argument.offset));
                                }
                            }
                        }
                    }
                }
            }

            for &(property, offset) in excludes.iter() {
                if declares.contains(&property) {
                    return Err(SpecError::semantic(
                        lines.position(offset),
                        format!(
                            "choice '{}' excludes property '{}' which it declares itself",
                            raw_choice.name,
                            properties[property.as_usize()].name
                        ),
                    ));
                }
            }

            if kind == Kind::Normal {
                normals.push(choice_id);
            }
            choices.push(Choice {
                name: raw_choice.name.to_string(),
                kind,
                declares,
                requires,
                excludes: excludes.into_iter().map(|(id, _)| id).collect(),
            });
        }

        choice_to_id.push(names);
        categories.push(Category { name: raw_category.name.to_string(), choices, normals });
    }

    for &(property, offset) in references.iter() {
        if properties[property.as_usize()].providers.is_empty() {
            return Err(SpecError::semantic(
                lines.position(offset),
                format!("property '{}' has no provider", properties[property.as_usize()].name),
            ));
        }
    }

    Ok(Spec { categories, properties, category_to_id, choice_to_id })
}
