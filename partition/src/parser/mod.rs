// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use nom::bytes::complete::{tag, take_till, take_till1};
use nom::character::complete::multispace0;
use nom::sequence::preceded;
use nom::IResult;

pub(crate) mod grammar;

/// One whitespace-delimited token with the byte offset of its first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RawToken<'s> {
    pub text: &'s str,
    pub offset: usize,
}

/// The reserved qualifier words of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reserved {
    Prop,
    If,
    Except,
    Single,
    Error,
}

impl Reserved {
    pub(crate) fn text(self) -> &'static str {
        match self {
            Reserved::Prop => "prop",
            Reserved::If => "if",
            Reserved::Except => "except",
            Reserved::Single => "single",
            Reserved::Error => "error",
        }
    }
}

/// What a token means to the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind<'s> {
    /// `name:` introducing a category. The colon is stripped.
    Header(&'s str),
    /// One of the reserved qualifier words.
    Reserved(Reserved),
    /// Anything else: a category, choice, or property name.
    Value,
}

pub(crate) fn classify(text: &str) -> TokenKind<'_> {
    if let Some(name) = text.strip_suffix(':') {
        return TokenKind::Header(name);
    }
    match text {
        "prop" => TokenKind::Reserved(Reserved::Prop),
        "if" => TokenKind::Reserved(Reserved::If),
        "except" => TokenKind::Reserved(Reserved::Except),
        "single" => TokenKind::Reserved(Reserved::Single),
        "error" => TokenKind::Reserved(Reserved::Error),
        _ => TokenKind::Value,
    }
}

fn blank(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    preceded(tag("//"), take_till(|c| c == '\n'))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

fn line_rest(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == '\n')(input)
}

/// Split the source into tokens.
///
/// Whitespace, including line breaks, only separates tokens. A `//` starts a
/// comment running to the end of the line, even when glued to the tail of a
/// token (`v0//note` lexes as `v0`).
pub(crate) fn lex(source: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = source;
    loop {
        if let Ok((after, _)) = blank(rest) {
            rest = after;
        }
        if rest.is_empty() {
            break;
        }
        if let Ok((after, _)) = comment(rest) {
            rest = after;
            continue;
        }
        let offset = source.len() - rest.len();
        let Ok((mut after, mut text)) = word(rest) else { break };
        if let Some(cut) = text.find("//") {
            text = &text[..cut];
            if let Ok((beyond, _)) = line_rest(after) {
                after = beyond;
            }
        }
        tokens.push(RawToken { text, offset });
        rest = after;
    }
    tokens
}
