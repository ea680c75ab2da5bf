use crate::domain::model::Dataset;
use crate::domain::ports::TableStore;
use crate::utils::error::{EtlError, Result};

/// Appends every row of `dataset` to `table` and returns the number written.
///
/// An empty dataset never touches the store. The dataset's columns must match
/// the table's columns by name and position, otherwise nothing is written.
pub async fn append_rows<S: TableStore + ?Sized>(
    store: &S,
    table: &str,
    dataset: &Dataset,
) -> Result<u64> {
    if dataset.is_empty() {
        tracing::debug!("Nothing to append to '{}'", table);
        return Ok(0);
    }

    let table_columns = store.table_columns(table).await?;
    let found: Vec<&str> = table_columns.iter().map(|c| c.name.as_str()).collect();
    if found != dataset.columns() {
        return Err(EtlError::SchemaMismatch {
            table: table.to_string(),
            expected: found.into_iter().map(str::to_string).collect(),
            found: dataset.columns().to_vec(),
        });
    }

    let written = store
        .insert_rows(table, &table_columns, dataset.rows())
        .await?;
    tracing::info!("Appended {} rows to '{}'", written, table);
    Ok(written)
}
