use crate::core::{ingest, normalize, persist, schema};
use crate::core::{ConfigProvider, Dataset, LoadReport, Pipeline, TableStore};
use crate::utils::error::Result;

/// CSV file in, PostgreSQL table out.
pub struct CsvPgPipeline<S: TableStore, C: ConfigProvider> {
    store: S,
    config: C,
}

impl<S: TableStore, C: ConfigProvider> CsvPgPipeline<S, C> {
    pub fn new(store: S, config: C) -> Self {
        Self { store, config }
    }
}

#[async_trait::async_trait]
impl<S: TableStore, C: ConfigProvider> Pipeline for CsvPgPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        ingest::read_csv(self.config.csv_path())
    }

    async fn transform(&self, data: Dataset) -> Result<Dataset> {
        Ok(normalize::normalize(&data))
    }

    async fn load(&self, data: Dataset) -> Result<LoadReport> {
        let table = self.config.table_name();
        let table_created =
            schema::ensure_table(&self.store, table, &data, self.config.type_policy()).await?;
        let rows_inserted = persist::append_rows(&self.store, table, &data).await?;

        Ok(LoadReport {
            table: table.to_string(),
            rows_inserted,
            table_created,
        })
    }
}
