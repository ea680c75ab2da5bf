use crate::utils::error::{EtlError, Result};
use crate::utils::validation::MAX_IDENTIFIER_BYTES;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single value; `None` is the null marker.
pub type Cell = Option<String>;

pub type Row = Vec<Cell>;

/// In-memory table: named columns in header order, every row as wide as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Duplicate header names are rejected rather than renamed, so a column
    /// always maps to exactly one header cell of the source file.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if name.trim().is_empty() {
                return Err(EtlError::ValidationError {
                    message: "column names cannot be empty".to_string(),
                });
            }
            if name.len() > MAX_IDENTIFIER_BYTES {
                return Err(EtlError::ValidationError {
                    message: format!(
                        "column name '{}' is longer than {} bytes",
                        name, MAX_IDENTIFIER_BYTES
                    ),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(EtlError::ValidationError {
                    message: format!("duplicate column name '{}'", name),
                });
            }
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(EtlError::ValidationError {
                message: format!(
                    "row {} has {} values, expected {}",
                    index + 1,
                    row.len(),
                    columns.len()
                ),
            });
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(move |row| &row[index]))
    }

    /// Same columns, different rows. Widths were already checked by the caller's source.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == self.columns.len()));
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

/// Storage type for a created column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    BigInt,
    Double,
    Boolean,
}

impl ColumnType {
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Boolean => "BOOLEAN",
        }
    }
}

/// How column types are chosen when the destination table is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TypePolicy {
    /// Every column is TEXT.
    #[default]
    Text,
    /// Integer, float and boolean columns are detected from the sample values.
    Infer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

/// A column of an existing table as the store reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub name: String,
    /// Fully qualified, already quoted type usable in a cast, e.g. `"pg_catalog"."int8"`.
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKind {
    BaseTable,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub table: String,
    pub rows_inserted: u64,
    pub table_created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::new(
            cols(&["a", "b"]),
            vec![vec![Some("1".into()), None], vec![Some("2".into())]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn rejects_duplicate_and_blank_headers() {
        assert!(Dataset::new(cols(&["a", "a"]), vec![]).is_err());
        assert!(Dataset::new(cols(&["a", " "]), vec![]).is_err());
        assert!(Dataset::new(vec!["x".repeat(64)], vec![]).is_err());
    }

    #[test]
    fn column_accessor_walks_values_in_order() {
        let ds = Dataset::new(
            cols(&["name", "age"]),
            vec![
                vec![Some("Ann".into()), Some("30".into())],
                vec![Some("Bob".into()), None],
            ],
        )
        .unwrap();
        let ages: Vec<&Cell> = ds.column("age").unwrap().collect();
        assert_eq!(ages, vec![&Some("30".to_string()), &None]);
        assert!(ds.column("missing").is_none());
        assert_eq!(ds.len(), 2);
    }
}
