//! Cleaning pass: trim, null out empty-like tokens, drop repeated rows.

use crate::domain::model::{Cell, Dataset, Row};
use std::collections::HashSet;

/// Tokens that mean "no value". Matching is exact and case sensitive.
pub const EMPTY_MARKERS: [&str; 5] = ["", "NA", "N/A", "null", "None"];

pub fn is_empty_marker(value: &str) -> bool {
    EMPTY_MARKERS.contains(&value)
}

/// Trim first, then test for a marker, so that `"  NA "` is null too and a
/// second pass never changes anything.
pub fn normalize_cell(cell: &Cell) -> Cell {
    let trimmed = cell.as_deref()?.trim();
    if is_empty_marker(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Keeps the first occurrence of every row, preserving order. Nulls compare equal.
pub fn dedup_rows(rows: Vec<Row>) -> Vec<Row> {
    let mut seen: HashSet<Row> = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| {
            if seen.contains(row) {
                false
            } else {
                seen.insert(row.clone());
                true
            }
        })
        .collect()
}

/// Returns a cleaned copy; the input is left untouched.
pub fn normalize(dataset: &Dataset) -> Dataset {
    if dataset.is_empty() {
        return dataset.clone();
    }

    let cleaned: Vec<Row> = dataset
        .rows()
        .iter()
        .map(|row| row.iter().map(normalize_cell).collect())
        .collect();
    let before = cleaned.len();
    let rows = dedup_rows(cleaned);

    if rows.len() < before {
        tracing::debug!("Dropped {} duplicate rows", before - rows.len());
    }
    dataset.with_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Cell {
        Some(v.to_string())
    }

    fn dataset(columns: &[&str], rows: Vec<Row>) -> Dataset {
        Dataset::new(columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn every_marker_maps_to_null() {
        for marker in EMPTY_MARKERS {
            assert_eq!(normalize_cell(&s(marker)), None, "marker {:?}", marker);
        }
    }

    #[test]
    fn marker_match_is_case_sensitive() {
        for other in ["n/a", "na", "NULL", "none", "Null", "NaN", "-"] {
            assert_eq!(normalize_cell(&s(other)), s(other), "value {:?}", other);
        }
    }

    #[test]
    fn trims_and_treats_padded_markers_as_null() {
        assert_eq!(normalize_cell(&s("  Bob  ")), s("Bob"));
        assert_eq!(normalize_cell(&s("\tN/A ")), None);
        assert_eq!(normalize_cell(&s("   ")), None);
        assert_eq!(normalize_cell(&None), None);
    }

    #[test]
    fn rows_equal_after_cleaning_collapse_to_one() {
        let ds = dataset(
            &["name", "note"],
            vec![vec![s("  Bob  "), s("NA")], vec![s("Bob"), s("")]],
        );
        let out = normalize(&ds);
        assert_eq!(out.rows(), &[vec![s("Bob"), None]]);
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let rows = vec![
            vec![s("b")],
            vec![s("a")],
            vec![s("b")],
            vec![None],
            vec![s("c")],
            vec![None],
            vec![s("a")],
        ];
        assert_eq!(
            dedup_rows(rows),
            vec![vec![s("b")], vec![s("a")], vec![None], vec![s("c")]]
        );
    }

    #[test]
    fn normalizing_twice_matches_once() {
        let ds = dataset(
            &["a", "b"],
            vec![
                vec![s(" x "), s("None")],
                vec![s("x"), None],
                vec![s(" NA "), s("y ")],
                vec![s("n/a"), s(" ")],
                vec![None, s("y")],
            ],
        );
        let once = normalize(&ds);
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn input_is_not_mutated() {
        let ds = dataset(&["a"], vec![vec![s(" x ")], vec![s("x")]]);
        let snapshot = ds.clone();
        let _ = normalize(&ds);
        assert_eq!(ds, snapshot);
    }

    #[test]
    fn empty_dataset_passes_through() {
        let ds = dataset(&["a", "b"], vec![]);
        let out = normalize(&ds);
        assert_eq!(out, ds);
        assert_eq!(out.columns().len(), 2);
    }
}
