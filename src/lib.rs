// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate generates a compact pairwise covering test suite from a
//! category-partition specification.
//!
//! The member crates split the work:
//!   * [partition] Parse the specification and resolve names, kinds, and the
//!     exclusion table derived from `if`/`except` qualifiers.
//!   * [pairs] Track the required pairs and their coverage status.
//!   * [suite] Test-vector types and the initial-suite adapter.
//!   * [builder] Feasibility screening, the greedy pairwise builder, and the
//!     singles/errors enumerator.
//!   * [writer] Plain and CSV rendering of warnings and tables.
//!   * [cli] Command-line argument parsing.
//!
//! [run] wires them into the full pipeline behind the `genpairs` binary. The
//! engine is single-threaded and works entirely in memory: the source is read
//! before processing and results are streamed out at the end.
//!
//! # Example
//! ```
//! let options = genpairs::cli::Options::default();
//! let mut out = Vec::new();
//! genpairs::run("size: small big\nmode: fast safe", &[], &options, &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("Pairwise coverage:"));
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::io::{self, Write};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use cli::Options;
use pairs::PairTable;
use partition::SpecError;
use suite::Vector;

pub use builder;
pub use cli;
pub use common;
pub use pairs;
pub use partition;
pub use suite;
pub use writer;

/// Failures that abort an invocation.
#[derive(Debug, Error)]
pub enum RunError {
    /// The specification was rejected with a fatal diagnostic.
    #[error("{0}")]
    Spec(#[from] SpecError),
    /// The output stream failed.
    #[error("writing results failed: {0}")]
    Io(#[from] io::Error),
}

/// Run the full pipeline on one specification.
///
/// Parses the source, enumerates and screens the required pairs, subtracts the
/// pairs of the given initial suites, builds the requested sections, and
/// renders everything to `out`: initial-suite reports, warnings, then the
/// uncovered-pair report or the pairwise table, then the singles/errors table.
/// Warnings never fail a run; only a fatal diagnostic or a broken stream does.
pub fn run<W: Write>(
    source: &str,
    initial_suites: &[String],
    options: &Options,
    out: &mut W,
) -> Result<(), RunError> {
    let analysis = partition::parse(source)?;
    let spec = &analysis.spec;
    let exclusions = &analysis.exclusions;

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut table = PairTable::enumerate(spec, exclusions, &mut rng);
    debug!(required = table.len(), "pairs enumerated");

    let mut warnings = builder::screen(spec, exclusions, &mut table);

    let mut reports = Vec::new();
    for text in initial_suites {
        reports.extend(suite::subtract_initial(text, spec, &mut table));
    }

    let mut pairwise: Option<Vec<Vector>> = None;
    if options.combinations && !options.report_pairs {
        let (vectors, demotions) = builder::build(spec, exclusions, &mut table);
        warnings.extend(demotions);
        pairwise = Some(vectors);
    }

    let mut specials: Option<Vec<Vector>> = None;
    if options.singles && spec.has_singles() {
        let (vectors, failures) = builder::build_singles(spec, exclusions);
        warnings.extend(failures);
        specials = Some(vectors);
    }

    writer::write_reports(out, &reports)?;
    writer::write_warnings(out, spec, &warnings)?;

    if options.report_pairs {
        writer::write_uncovered(out, spec, &table)?;
    }

    if let Some(vectors) = pairwise {
        let (columns, title) = if options.varying {
            (spec.varying_categories(), "Pairwise coverage, varying columns only")
        } else {
            (spec.category_ids().collect(), "Pairwise coverage")
        };
        writer::write_suite(out, spec, title, &vectors, &columns, options.format)?;
    }

    if let Some(vectors) = specials {
        let columns: Vec<common::CategoryId> = spec.category_ids().collect();
        writer::write_suite(out, spec, "Single and error vectors", &vectors, &columns, options.format)?;
    }

    Ok(())
}
