// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use tracing::debug;

use common::CategoryId;
use pairs::PairTable;
use partition::{Kind, Slot, Spec};

/// Subtract the pairs already covered by a pre-existing suite.
///
/// The text is comma-separated with a header row of category names. Header
/// columns naming unknown categories are reported and ignored; rows with the
/// wrong number of values, or naming an unknown choice in a known category,
/// are reported and skipped whole. Every pair of normal choices in an accepted
/// row is marked covered. Returns the report lines.
pub fn subtract_initial(text: &str, spec: &Spec, table: &mut PairTable) -> Vec<String> {
    let mut reports = Vec::new();
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = match lines.next() {
        Some(header) => header,
        None => {
            reports.push("Warning: initial suite is empty".to_string());
            return reports;
        }
    };

    let columns: Vec<Option<CategoryId>> = header
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, name)| match spec.category_to_id.get(name) {
            Some(&id) => Some(id),
            None => {
                reports.push(format!(
                    "Warning: initial suite column {} '{}' is not in the specification",
                    index + 1,
                    name
                ));
                None
            }
        })
        .collect();

    'row: for line in lines {
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        if values.len() != columns.len() {
            reports.push(format!(
                "Warning: initial suite row has {} values, expected {}: '{}'",
                values.len(),
                columns.len(),
                line
            ));
            continue;
        }

        let mut slots: Vec<Slot> = Vec::with_capacity(values.len());
        for (value, column) in values.iter().zip(columns.iter()) {
            let category = match column {
                Some(category) => *category,
                None => continue,
            };
            match spec.choice_to_id[category.as_usize()].get(*value) {
                Some(&choice) => slots.push(Slot::new(category, choice)),
                None => {
                    reports.push(format!(
                        "Warning: unknown choice '{}' for category '{}' in initial suite row '{}'",
                        value,
                        spec.category(category).name,
                        line
                    ));
                    continue 'row;
                }
            }
        }

        slots.retain(|&slot| spec.choice(slot).kind == Kind::Normal);
        let fresh = table.cover_all(&slots);
        debug!(row = line, fresh, "initial suite row subtracted");
    }

    reports
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::Vector;

    fn setup(source: &str) -> (Spec, partition::ExclusionTable, PairTable) {
        let analysis = partition::parse(source).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let table = PairTable::enumerate(&analysis.spec, &analysis.exclusions, &mut rng);
        (analysis.spec, analysis.exclusions, table)
    }

    #[test]
    fn test_two_rows_cover_six_pairs() {
        let (spec, _, mut table) = setup("x: x1 x2\ny: y1 y2\nz: z1 z2");
        let reports = subtract_initial("x,y,z\nx1,y1,z1\nx2,y2,z2", &spec, &mut table);
        assert!(reports.is_empty());
        assert_eq!(table.uncovered(), 6);
    }

    #[test]
    fn test_repeated_rows_are_monotone() {
        let (spec, _, mut table) = setup("x: x1 x2\ny: y1 y2\nz: z1 z2");
        subtract_initial("x,y,z\nx1,y1,z1", &spec, &mut table);
        let before = table.uncovered();
        subtract_initial("x,y,z\nx1,y1,z1\nx1,y1,z2", &spec, &mut table);
        assert!(table.uncovered() <= before);
        assert_eq!(table.uncovered(), 7);
    }

    #[test]
    fn test_unknown_column_is_ignored() {
        let (spec, _, mut table) = setup("x: x1 x2\ny: y1 y2");
        let reports = subtract_initial("x,bogus,y\nx1,what,y1", &spec, &mut table);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("column 2 'bogus'"));
        // The known columns still subtract coverage.
        assert_eq!(table.uncovered(), 3);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let (spec, _, mut table) = setup("x: x1 x2\ny: y1 y2");
        let reports = subtract_initial("x,y\nx1\nx1,y9\nx2,y2", &spec, &mut table);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].contains("1 values, expected 2"));
        assert!(reports[1].contains("unknown choice 'y9'"));
        assert_eq!(table.uncovered(), 3);
    }

    #[test]
    fn test_single_values_cover_nothing() {
        let (spec, _, mut table) = setup("x: x1 x2 e error\ny: y1 y2");
        let reports = subtract_initial("x,y\ne,y1", &spec, &mut table);
        assert!(reports.is_empty());
        assert_eq!(table.uncovered(), 4);
    }

    #[test]
    fn test_vector_round_trip() {
        let (spec, _, _) = setup("x: x1 x2\ny: y1 y2");
        let mut vector = Vector::new(spec.width());
        let x2 = Slot::new(spec.category_to_id["x"], spec.choice_to_id[0]["x2"]);
        vector.set(x2);
        assert_eq!(vector.assigned_slots(), vec![x2]);
    }
}
