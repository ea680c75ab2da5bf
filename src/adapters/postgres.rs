//! `TableStore` backed by PostgreSQL through `sqlx`.

use crate::config::database::DbConfig;
use crate::domain::model::{ColumnDef, Row, TableColumn, TableKind};
use crate::domain::ports::TableStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};
use sqlx::QueryBuilder;

/// Upper bound on bind parameters in one statement (the wire protocol uses a u16).
const MAX_BIND_PARAMS: usize = 65_535;

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn create_table_sql(schema: &str, table: &str, columns: &[ColumnDef]) -> String {
    let column_list = columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), c.ty.sql_name()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TABLE {}.{} ({})",
        quote_identifier(schema),
        quote_identifier(table),
        column_list
    )
}

/// How many rows fit in one INSERT without exceeding the bind limit.
pub fn rows_per_statement(column_count: usize) -> usize {
    (MAX_BIND_PARAMS / column_count.max(1)).max(1)
}

pub struct PgTableStore {
    pool: PgPool,
    schema: String,
}

impl PgTableStore {
    /// Opens the single connection used for the whole run.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        tracing::debug!(
            "Connecting to postgres at {}:{}/{}",
            config.host,
            config.port,
            config.database
        );
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(config.connection_url()?.as_str())
            .await?;

        Ok(Self::from_pool(pool, config.schema.clone()))
    }

    pub fn from_pool(pool: PgPool, schema: String) -> Self {
        Self { pool, schema }
    }

    fn qualified(&self, table: &str) -> String {
        format!("{}.{}", quote_identifier(&self.schema), quote_identifier(table))
    }
}

#[async_trait]
impl TableStore for PgTableStore {
    async fn table_kind(&self, table: &str) -> Result<Option<TableKind>> {
        let table_type: Option<(String,)> = sqlx::query_as(
            "SELECT table_type::text FROM information_schema.tables \
             WHERE table_schema = $1 AND table_name = $2",
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;

        if let Some((kind,)) = table_type {
            return Ok(Some(match kind.as_str() {
                "BASE TABLE" => TableKind::BaseTable,
                _ => TableKind::Other(kind.to_lowercase()),
            }));
        }

        // Sequences, indexes and types share the relation namespace but are
        // invisible to information_schema.tables.
        let relkind: Option<(String,)> = sqlx::query_as(
            "SELECT c.relkind::text FROM pg_catalog.pg_class c \
             JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace \
             WHERE n.nspname = $1 AND c.relname = $2",
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;

        Ok(relkind.map(|(kind,)| TableKind::Other(describe_relkind(&kind).to_string())))
    }

    async fn create_table(&self, table: &str, columns: &[ColumnDef]) -> Result<()> {
        let sql = create_table_sql(&self.schema, table, columns);
        tracing::debug!("{}", sql);
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<TableColumn>> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT column_name::text, udt_schema::text, udt_name::text \
             FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 \
             ORDER BY ordinal_position",
        )
        .bind(&self.schema)
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, udt_schema, udt_name)| TableColumn {
                name,
                type_name: format!(
                    "{}.{}",
                    quote_identifier(&udt_schema),
                    quote_identifier(&udt_name)
                ),
            })
            .collect())
    }

    async fn insert_rows(&self, table: &str, columns: &[TableColumn], rows: &[Row]) -> Result<u64> {
        let target = self.qualified(table);
        let mut tx = self.pool.begin().await?;
        let mut written = 0u64;

        for chunk in rows.chunks(rows_per_statement(columns.len())) {
            let mut builder = insert_statement(&target, columns, chunk);
            written += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }
}

/// One multi-row INSERT; each value is bound as text and cast to its column's type.
pub fn insert_statement(
    target: &str,
    columns: &[TableColumn],
    rows: &[Row],
) -> QueryBuilder<'static, Postgres> {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = QueryBuilder::new(format!("INSERT INTO {} ({}) ", target, column_list));
    builder.push_values(rows, |mut values, row| {
        for (cell, column) in row.iter().zip(columns) {
            values
                .push("CAST(")
                .push_bind_unseparated(cell.clone())
                .push_unseparated(" AS ")
                .push_unseparated(column.type_name.as_str())
                .push_unseparated(")");
        }
    });
    builder
}

fn describe_relkind(relkind: &str) -> &'static str {
    match relkind {
        "r" | "p" => "a table without read access for the current user",
        "v" => "view",
        "m" => "materialized view",
        "S" => "sequence",
        "i" | "I" => "index",
        "c" => "composite type",
        "f" => "foreign table",
        _ => "relation",
    }
}
