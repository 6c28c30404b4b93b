// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use tracing::debug;

use partition::{ExclusionTable, Kind, Spec};
use suite::{Vector, Warning};

/// Emit one vector per `error` and `single` choice.
///
/// Errors come first, then singles; within each group the choices follow
/// category-then-input order. The other columns take the first normal choice
/// (input order) that no exclusion entry pairs with the vector so far; there
/// is no backtracking, each special choice appears exactly once. A choice
/// whose columns cannot all be filled yields a warning instead of a vector.
pub fn build_singles(spec: &Spec, exclusions: &ExclusionTable) -> (Vec<Vector>, Vec<Warning>) {
    let mut vectors = Vec::new();
    let mut warnings = Vec::new();

    for kind in [Kind::Error, Kind::Single] {
        for seed in spec.slots_of_kind(kind) {
            let mut partial = Vector::new(spec.width());
            partial.set(seed);

            let mut complete = true;
            for category in spec.category_ids() {
                if partial.is_assigned(category) {
                    continue;
                }
                let filler = spec
                    .normal_slots(category)
                    .find(|&slot| exclusions.compatible_with(slot, partial.assigned_slots()));
                match filler {
                    Some(slot) => partial.set(slot),
                    None => {
                        complete = false;
                        break;
                    }
                }
            }

            if complete {
                vectors.push(partial);
            } else {
                debug!(seed = ?seed, "special choice has no completion");
                warnings.push(Warning::from_partial(partial));
            }
        }
    }

    (vectors, warnings)
}

#[cfg(test)]
mod test {
    use super::*;

    fn singles_for(source: &str) -> (partition::Analysis, Vec<Vector>, Vec<Warning>) {
        let analysis = partition::parse(source).unwrap();
        let (vectors, warnings) = build_singles(&analysis.spec, &analysis.exclusions);
        (analysis, vectors, warnings)
    }

    fn rows(analysis: &partition::Analysis, vectors: &[Vector]) -> Vec<Vec<String>> {
        vectors
            .iter()
            .map(|vector| {
                analysis
                    .spec
                    .category_ids()
                    .map(|id| vector.cell_text(&analysis.spec, id).to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_errors_before_singles() {
        let (analysis, vectors, warnings) = singles_for("
            col0: e0 error e1 error v0.0 prop v0 v0.1 prop v1
            col1: s0 single s1 single v1.0 if v0 v1.1 if v1
            col2: v2.0 if v0 if v1 v2.1
        ");
        assert!(warnings.is_empty());
        let rows = rows(&analysis, &vectors);
        assert_eq!(
            rows,
            vec![
                vec!["e0", "v1.0", "v2.0"],
                vec!["e1", "v1.0", "v2.0"],
                vec!["v0.0", "s0", "v2.1"],
                vec!["v0.0", "s1", "v2.1"],
            ]
        );
    }

    #[test]
    fn test_exclusions_steer_the_fill() {
        // The error choice declares p, so the excepting b1 is passed over.
        let (analysis, vectors, warnings) = singles_for("a: e error prop p a1\nb: b1 except p b2");
        assert!(warnings.is_empty());
        assert_eq!(rows(&analysis, &vectors), vec![vec!["e", "b2"]]);
    }

    #[test]
    fn test_no_singles_no_vectors() {
        let (_, vectors, warnings) = singles_for("x: x1 x2\ny: y1 y2");
        assert!(vectors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unfillable_column_warns() {
        let (analysis, vectors, warnings) = singles_for("x: x1\ny: s single\nz: e error");
        assert!(vectors.is_empty());
        assert_eq!(warnings.len(), 2);
        // The error vector failed at the singles-only column.
        assert!(warnings[0].render(&analysis.spec).contains("z=e"));
        assert!(warnings[1].render(&analysis.spec).contains("y=s"));
    }
}
