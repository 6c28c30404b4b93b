// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::path::PathBuf;

use writer::OutputFormat;

use crate::{parse_arguments_from, Options};

#[test]
fn test_defaults() {
    let options = parse_arguments_from(["genpairs"]).unwrap();
    assert_eq!(options, Options::default());
    assert_eq!(options.format, OutputFormat::Plain);
    assert!(options.combinations);
    assert!(options.singles);
    assert_eq!(options.seed, 0);
}

#[test]
fn test_mode_flags() {
    let options = parse_arguments_from(["genpairs", "-c", "-v", "-o", "-p", "-d"]).unwrap();
    assert_eq!(options.format, OutputFormat::Csv);
    assert!(options.varying);
    assert!(options.combinations);
    assert!(!options.singles);
    assert!(options.report_pairs);
    assert!(options.debug);
}

#[test]
fn test_singles_only() {
    let options = parse_arguments_from(["genpairs", "--singles-only"]).unwrap();
    assert!(!options.combinations);
    assert!(options.singles);
}

#[test]
fn test_initial_suites_accumulate() {
    let options = parse_arguments_from(["genpairs", "-i", "one.csv", "--initial", "two.csv"]).unwrap();
    assert_eq!(options.initial_suites, vec![PathBuf::from("one.csv"), PathBuf::from("two.csv")]);
}

#[test]
fn test_seed() {
    let options = parse_arguments_from(["genpairs", "--seed", "42"]).unwrap();
    assert_eq!(options.seed, 42);
    assert!(parse_arguments_from(["genpairs", "--seed", "many"]).is_err());
    assert!(parse_arguments_from(["genpairs", "--seed", "-1"]).is_err());
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(parse_arguments_from(["genpairs", "--strength", "2"]).is_err());
}
