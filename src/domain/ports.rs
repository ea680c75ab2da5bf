use crate::domain::model::{ColumnDef, Dataset, LoadReport, Row, TableColumn, TableKind, TypePolicy};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination relational store. Table names are unqualified; the store owns the schema.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// `None` when nothing with that name exists.
    async fn table_kind(&self, table: &str) -> Result<Option<TableKind>>;
    async fn create_table(&self, table: &str, columns: &[ColumnDef]) -> Result<()>;
    /// Columns in ordinal order.
    async fn table_columns(&self, table: &str) -> Result<Vec<TableColumn>>;
    /// Writes all rows as one unit and returns the number written.
    async fn insert_rows(&self, table: &str, columns: &[TableColumn], rows: &[Row]) -> Result<u64>;
}

pub trait ConfigProvider: Send + Sync {
    fn csv_path(&self) -> &str;
    fn table_name(&self) -> &str;
    fn type_policy(&self) -> TypePolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<Dataset>;
    async fn load(&self, data: Dataset) -> Result<LoadReport>;
}
