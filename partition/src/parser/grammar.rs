// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use crate::error::{LineIndex, SpecError};
use crate::parser::{classify, RawToken, Reserved, TokenKind};

/// A qualifier attached to a choice. `prop`/`if`/`except` carry an argument.
#[derive(Debug)]
pub(crate) struct RawQualifier<'s> {
    pub reserved: Reserved,
    pub argument: Option<RawToken<'s>>,
    pub offset: usize,
}

/// A choice and its qualifiers, as written.
#[derive(Debug)]
pub(crate) struct RawChoice<'s> {
    pub name: &'s str,
    pub offset: usize,
    pub qualifiers: Vec<RawQualifier<'s>>,
}

/// A category header and its choices, as written.
#[derive(Debug)]
pub(crate) struct RawCategory<'s> {
    pub name: &'s str,
    pub offset: usize,
    pub choices: Vec<RawChoice<'s>>,
}

/// LL pass over the token stream.
///
/// ```text
/// spec      := category+
/// category  := HEADER choice+
/// choice    := VALUE qualifier*
/// qualifier := ('prop' | 'if' | 'except') VALUE | 'single' | 'error'
/// ```
pub(crate) fn parse<'s>(tokens: &[RawToken<'s>], lines: &LineIndex) -> Result<Vec<RawCategory<'s>>, SpecError> {
    let mut categories: Vec<RawCategory<'s>> = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index];
        let name = match classify(token.text) {
            TokenKind::Header(name) => name,
            _ => {
                return Err(SpecError::parse(
                    lines.position(token.offset),
                    format!("expected a category header, saw '{}'", token.text),
                ));
            }
        };
        if name.is_empty() {
            return Err(SpecError::parse(lines.position(token.offset), "empty category name"));
        }
        index += 1;

        let choices = parse_choices(tokens, &mut index, lines)?;
        if choices.is_empty() {
            return Err(SpecError::parse(
                lines.position(token.offset),
                format!("category '{}' has no choices", name),
            ));
        }
        categories.push(RawCategory { name, offset: token.offset, choices });
    }

    if categories.is_empty() {
        let position = lines.position(0);
        return Err(SpecError::parse(position, "the specification is empty"));
    }
    Ok(categories)
}

fn parse_choices<'s>(
    tokens: &[RawToken<'s>],
    index: &mut usize,
    lines: &LineIndex,
) -> Result<Vec<RawChoice<'s>>, SpecError> {
    let mut choices: Vec<RawChoice<'s>> = Vec::new();

    while *index < tokens.len() {
        let token = tokens[*index];
        match classify(token.text) {
            TokenKind::Header(_) => break,
            TokenKind::Value => {
                *index += 1;
                let qualifiers = parse_qualifiers(tokens, index, lines)?;
                choices.push(RawChoice { name: token.text, offset: token.offset, qualifiers });
            }
            TokenKind::Reserved(reserved) => {
                return Err(SpecError::parse(
                    lines.position(token.offset),
                    format!("stray reserved word '{}', expected a choice name", reserved.text()),
                ));
            }
        }
    }
    Ok(choices)
}

fn parse_qualifiers<'s>(
    tokens: &[RawToken<'s>],
    index: &mut usize,
    lines: &LineIndex,
) -> Result<Vec<RawQualifier<'s>>, SpecError> {
    let mut qualifiers = Vec::new();

    while *index < tokens.len() {
        let token = tokens[*index];
        let reserved = match classify(token.text) {
            TokenKind::Reserved(reserved) => reserved,
            _ => break,
        };
        *index += 1;

        let argument = match reserved {
            Reserved::Single | Reserved::Error => None,
            Reserved::Prop | Reserved::If | Reserved::Except => {
                let argument = tokens.get(*index).copied();
                match argument.map(|token| classify(token.text)) {
                    Some(TokenKind::Value) => {}
                    _ => {
                        return Err(SpecError::parse(
                            lines.position(token.offset),
                            format!("expected a property name after '{}'", reserved.text()),
                        ));
                    }
                }
                *index += 1;
                argument
            }
        };
        qualifiers.push(RawQualifier { reserved, argument, offset: token.offset });
    }
    Ok(qualifiers)
}
