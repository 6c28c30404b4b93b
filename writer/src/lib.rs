// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module contains the methods for writing warnings, test-vector tables,
//! and the uncovered-pair report to a stream.
//!
//! Warnings and initial-suite reports always precede the tables. The plain
//! format right-aligns every column to a common width wide enough for the
//! longest name in the table; the CSV format emits one comma-separated row per
//! vector and never quotes, which is safe because the input syntax cannot
//! produce a value containing a comma.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::io::{self, Write};

use itertools::Itertools;

use common::CategoryId;
use pairs::{PairStatus, PairTable};
use partition::Spec;
use suite::{Vector, Warning};

/// How tables are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Right-aligned columns for reading.
    Plain,
    /// Comma-separated values for other tools.
    Csv,
}

/// Write the initial-suite report lines, one per line.
pub fn write_reports<W: Write>(out: &mut W, reports: &[String]) -> io::Result<()> {
    for report in reports {
        writeln!(out, "{}", report)?;
    }
    Ok(())
}

/// Write the warnings, one line each, in the order they were raised.
pub fn write_warnings<W: Write>(out: &mut W, spec: &Spec, warnings: &[Warning]) -> io::Result<()> {
    for warning in warnings {
        writeln!(out, "{}", warning.render(spec))?;
    }
    Ok(())
}

/// Write one table of vectors restricted to the given columns.
pub fn write_suite<W: Write>(
    out: &mut W,
    spec: &Spec,
    title: &str,
    vectors: &[Vector],
    columns: &[CategoryId],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, spec, title, vectors, columns),
        OutputFormat::Csv => write_csv(out, spec, vectors, columns),
    }
}

fn column_width(spec: &Spec, vectors: &[Vector], columns: &[CategoryId]) -> usize {
    let mut longest = 0;
    for &column in columns {
        longest = longest.max(spec.category(column).name.len());
        for vector in vectors {
            longest = longest.max(vector.cell_text(spec, column).len());
        }
    }
    longest + 2
}

fn write_plain<W: Write>(
    out: &mut W,
    spec: &Spec,
    title: &str,
    vectors: &[Vector],
    columns: &[CategoryId],
) -> io::Result<()> {
    writeln!(out, "{}: {}  test vectors", title, vectors.len())?;
    writeln!(out)?;

    let width = column_width(spec, vectors, columns);
    for &column in columns {
        write!(out, "{:>width$}", spec.category(column).name, width = width)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "_".repeat(width * columns.len()))?;

    for vector in vectors {
        for &column in columns {
            write!(out, "{:>width$}", vector.cell_text(spec, column), width = width)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

fn write_csv<W: Write>(out: &mut W, spec: &Spec, vectors: &[Vector], columns: &[CategoryId]) -> io::Result<()> {
    writeln!(out, "{}", columns.iter().map(|&column| spec.category(column).name.as_str()).join(","))?;
    for vector in vectors {
        writeln!(out, "{}", columns.iter().map(|&column| vector.cell_text(spec, column)).join(","))?;
    }
    Ok(())
}

/// List every feasible pair the suite still has to cover, in enumeration order.
pub fn write_uncovered<W: Write>(out: &mut W, spec: &Spec, table: &PairTable) -> io::Result<()> {
    writeln!(out, "=== Pairs required for completion ===")?;
    for (pair, status) in table.iter() {
        if status == PairStatus::Uncovered {
            writeln!(out, "{}, {}", spec.slot_text(pair.first), spec.slot_text(pair.second))?;
        }
    }
    writeln!(out, "=====================================")
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use partition::Slot;

    use super::*;

    fn spec() -> Spec {
        partition::parse("alpha: a1 a2\nb: b1 longvalue").unwrap().spec
    }

    fn vector_of(spec: &Spec, names: &[&str]) -> Vector {
        let mut vector = Vector::new(spec.width());
        for (category, name) in names.iter().enumerate() {
            vector.set(Slot::new(
                CategoryId::from_usize(category),
                spec.choice_to_id[category][*name],
            ));
        }
        vector
    }

    fn rendered<F: FnOnce(&mut Vec<u8>)>(render: F) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_plain_table() {
        let spec = spec();
        let vectors = vec![vector_of(&spec, &["a1", "b1"]), vector_of(&spec, &["a2", "longvalue"])];
        let columns: Vec<CategoryId> = spec.category_ids().collect();
        let text = rendered(|out| {
            write_suite(out, &spec, "Pairwise coverage", &vectors, &columns, OutputFormat::Plain).unwrap()
        });
        // Width fits "longvalue" plus two spaces of padding.
        assert_eq!(
            text,
            "Pairwise coverage: 2  test vectors\n\
             \n\
             \u{20}     alpha          b\n\
             ______________________\n\
             \u{20}        a1         b1\n\
             \u{20}        a2  longvalue\n\
             \n"
        );
    }

    #[test]
    fn test_csv_table() {
        let spec = spec();
        let vectors = vec![vector_of(&spec, &["a1", "b1"])];
        let columns: Vec<CategoryId> = spec.category_ids().collect();
        let text = rendered(|out| {
            write_suite(out, &spec, "Pairwise coverage", &vectors, &columns, OutputFormat::Csv).unwrap()
        });
        assert_eq!(text, "alpha,b\na1,b1\n");
    }

    #[test]
    fn test_column_subset() {
        let spec = spec();
        let vectors = vec![vector_of(&spec, &["a1", "b1"])];
        let columns = vec![CategoryId::from_usize(1)];
        let text = rendered(|out| {
            write_suite(out, &spec, "Pairwise coverage, varying columns only", &vectors, &columns, OutputFormat::Csv)
                .unwrap()
        });
        assert_eq!(text, "b\nb1\n");
    }

    #[test]
    fn test_uncovered_listing() {
        let analysis = partition::parse("x: x1\ny: y1").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let table = PairTable::enumerate(&analysis.spec, &analysis.exclusions, &mut rng);
        let text = rendered(|out| write_uncovered(out, &analysis.spec, &table).unwrap());
        assert_eq!(
            text,
            "=== Pairs required for completion ===\n\
             x=x1, y=y1\n\
             =====================================\n"
        );
    }

    #[test]
    fn test_warning_block() {
        let analysis = partition::parse("a: a1 prop p\nb: b1 except p").unwrap();
        let spec = &analysis.spec;
        let pair = pairs::Pair::new(
            Slot::new(CategoryId::from_usize(0), spec.choice_to_id[0]["a1"]),
            Slot::new(CategoryId::from_usize(1), spec.choice_to_id[1]["b1"]),
        );
        let warnings = vec![Warning::from_pair(spec.width(), pair)];
        let text = rendered(|out| write_warnings(out, spec, &warnings).unwrap());
        assert_eq!(text, "Warning - No pair possible:  [ a=a1 b=b1 ]\n");
    }
}
