use crate::core::{LoadReport, Pipeline};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order. The first failure aborts the run.
    pub async fn run(&self) -> Result<LoadReport> {
        tracing::info!("Starting ETL process");

        tracing::debug!("Extracting data");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", raw_data.len());

        tracing::debug!("Transforming data");
        let cleaned = self.pipeline.transform(raw_data).await?;
        tracing::info!("{} rows left after cleaning", cleaned.len());

        tracing::debug!("Loading data");
        let report = self.pipeline.load(cleaned).await?;
        tracing::info!(
            "Loaded {} rows into '{}' (created: {})",
            report.rows_inserted,
            report.table,
            report.table_created
        );

        Ok(report)
    }
}
