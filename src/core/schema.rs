//! Check-or-create of the destination table.

use crate::domain::model::{Cell, ColumnDef, ColumnType, Dataset, TableKind, TypePolicy};
use crate::domain::ports::TableStore;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_identifier;

/// Narrowest type that accepts every non-null value. All-null columns stay TEXT.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a Cell>,
{
    let values: Vec<&str> = values.into_iter().flatten().map(String::as_str).collect();
    if values.is_empty() {
        return ColumnType::Text;
    }

    [ColumnType::BigInt, ColumnType::Double, ColumnType::Boolean]
        .into_iter()
        .find(|ty| values.iter().all(|v| fits(*ty, v)))
        .unwrap_or(ColumnType::Text)
}

fn fits(ty: ColumnType, value: &str) -> bool {
    match ty {
        ColumnType::BigInt => value.parse::<i64>().is_ok(),
        ColumnType::Double => value.parse::<f64>().map(f64::is_finite).unwrap_or(false),
        ColumnType::Boolean => matches!(
            value.to_ascii_lowercase().as_str(),
            "true" | "false" | "t" | "f"
        ),
        ColumnType::Text => true,
    }
}

pub fn column_defs(sample: &Dataset, policy: TypePolicy) -> Vec<ColumnDef> {
    sample
        .columns()
        .iter()
        .map(|name| {
            let ty = match policy {
                TypePolicy::Text => ColumnType::Text,
                TypePolicy::Infer => sample
                    .column(name)
                    .map(infer_column_type)
                    .unwrap_or(ColumnType::Text),
            };
            ColumnDef {
                name: name.clone(),
                ty,
            }
        })
        .collect()
}

/// Creates `table` from the sample's columns unless it already exists.
/// Returns `true` when the table was created by this call.
pub async fn ensure_table<S: TableStore + ?Sized>(
    store: &S,
    table: &str,
    sample: &Dataset,
    policy: TypePolicy,
) -> Result<bool> {
    validate_identifier("table", table)?;

    match store.table_kind(table).await? {
        Some(TableKind::BaseTable) => {
            tracing::debug!("Table '{}' already exists", table);
            Ok(false)
        }
        Some(TableKind::Other(kind)) => Err(EtlError::IncompatibleObject {
            name: table.to_string(),
            kind,
        }),
        None => {
            if sample.columns().is_empty() {
                return Err(EtlError::ValidationError {
                    message: format!("cannot create '{}' without any columns", table),
                });
            }
            let defs = column_defs(sample, policy);
            tracing::info!("Creating table '{}' with {} columns", table, defs.len());
            store.create_table(table, &defs).await?;
            Ok(true)
        }
    }
}
