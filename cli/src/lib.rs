// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides a basic cli for genpairs.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::crate_version;
use clap::{App, Arg, ArgMatches};
use writer::OutputFormat;

const CSV_ARG: &str = "csv";
const VARYING_ARG: &str = "varying";
const SINGLES_ONLY_ARG: &str = "singles-only";
const OMIT_SINGLES_ARG: &str = "omit-singles";
const INITIAL_ARG: &str = "initial";
const PAIRS_ARG: &str = "pairs";
const SEED_ARG: &str = "seed";
const DEBUG_ARG: &str = "debug";

/// The selected modes of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Table rendering: plain text or CSV.
    pub format: OutputFormat,
    /// Restrict the pairwise table to categories with more than one normal choice.
    pub varying: bool,
    /// Emit the pairwise section.
    pub combinations: bool,
    /// Emit the singles/errors section.
    pub singles: bool,
    /// List the uncovered pairs instead of building vectors.
    pub report_pairs: bool,
    /// Pre-existing suites whose pairs count as covered.
    pub initial_suites: Vec<PathBuf>,
    /// Seed for the enumeration-order shuffle.
    pub seed: u64,
    /// Enable debug logging.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            varying: false,
            combinations: true,
            singles: true,
            report_pairs: false,
            initial_suites: Vec::new(),
            seed: 0,
            debug: false,
        }
    }
}

fn get_app<'a, 'b>() -> App<'a, 'b> {
    App::new("genpairs")
        .version(crate_version!())
        .about("Generate a pairwise covering test suite from a category-partition specification read from standard input.")
        .arg(
            Arg::with_name(CSV_ARG)
                .short("c")
                .long("csv")
                .alias("comma-separated-values")
                .help("Output tables as comma-separated values."),
        )
        .arg(
            Arg::with_name(VARYING_ARG)
                .short("v")
                .long("varying")
                .alias("varying-columns-only")
                .help("Include only categories with more than one non-error and non-single choice."),
        )
        .arg(
            Arg::with_name(SINGLES_ONLY_ARG)
                .short("s")
                .long("singles-only")
                .help("Print only test vectors covering 'error' and 'single' choices."),
        )
        .arg(
            Arg::with_name(OMIT_SINGLES_ARG)
                .short("o")
                .long("omit-singles")
                .help("Do not produce test vectors covering 'error' and 'single' choices."),
        )
        .arg(
            Arg::with_name(INITIAL_ARG)
                .short("i")
                .long("initial")
                .alias("initial-suite")
                .takes_value(true)
                .value_name("FILE")
                .multiple(true)
                .number_of_values(1)
                .help("Read an initial test suite in CSV format. Often used together with --pairs."),
        )
        .arg(
            Arg::with_name(PAIRS_ARG)
                .short("p")
                .long("pairs")
                .alias("print-pairs")
                .help("Report pairs not covered by the initial test suites instead of building vectors."),
        )
        .arg(
            Arg::with_name(SEED_ARG)
                .long("seed")
                .takes_value(true)
                .default_value("0")
                .help("Seed of the pseudorandom tie-breaking. Equal seeds reproduce equal output."),
        )
        .arg(
            Arg::with_name(DEBUG_ARG)
                .short("d")
                .long("debug")
                .help("Print a lot of debugging messages."),
        )
}

fn validate_args(matches: ArgMatches) -> Result<Options, String> {
    let seed = matches
        .value_of(SEED_ARG)
        .ok_or("The seed should have a value")?
        .parse::<u64>()
        .map_err(|_| "The seed should be an unsigned number.".to_string())?;

    let initial_suites = matches
        .values_of(INITIAL_ARG)
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();

    Ok(Options {
        format: if matches.is_present(CSV_ARG) { OutputFormat::Csv } else { OutputFormat::Plain },
        varying: matches.is_present(VARYING_ARG),
        combinations: !matches.is_present(SINGLES_ONLY_ARG),
        singles: !matches.is_present(OMIT_SINGLES_ARG),
        report_pairs: matches.is_present(PAIRS_ARG),
        initial_suites,
        seed,
        debug: matches.is_present(DEBUG_ARG),
    })
}

/// Parse the commandline arguments of the process into [Options].
pub fn parse_arguments() -> Result<Options, String> {
    validate_args(get_app().get_matches())
}

/// Parse the given arguments into [Options]. The first item names the binary.
pub fn parse_arguments_from<I, T>(arguments: I) -> Result<Options, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = get_app().get_matches_from_safe(arguments).map_err(|e| e.to_string())?;
    validate_args(matches)
}

#[cfg(test)]
mod test_lib;
