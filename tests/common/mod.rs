#![allow(dead_code)]

use async_trait::async_trait;
use csv_pg_etl::domain::model::{ColumnDef, Row, TableColumn, TableKind, TypePolicy};
use csv_pg_etl::domain::ports::{ConfigProvider, TableStore};
use csv_pg_etl::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct MockTable {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Row>,
}

/// In-memory stand-in for PostgreSQL that counts every call it receives.
#[derive(Clone, Default)]
pub struct MockStore {
    tables: Arc<Mutex<HashMap<String, MockTable>>>,
    others: Arc<Mutex<HashMap<String, String>>>,
    pub calls: Arc<AtomicUsize>,
    pub creates: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, name: &str, columns: &[&str]) -> Self {
        let defs = columns
            .iter()
            .map(|c| ColumnDef {
                name: c.to_string(),
                ty: csv_pg_etl::domain::model::ColumnType::Text,
            })
            .collect();
        self.tables.lock().unwrap().insert(
            name.to_string(),
            MockTable {
                columns: defs,
                rows: Vec::new(),
            },
        );
        self
    }

    pub fn with_other_object(self, name: &str, kind: &str) -> Self {
        self.others
            .lock()
            .unwrap()
            .insert(name.to_string(), kind.to_string());
        self
    }

    pub fn table(&self, name: &str) -> Option<MockTable> {
        self.tables.lock().unwrap().get(name).cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TableStore for MockStore {
    async fn table_kind(&self, table: &str) -> Result<Option<TableKind>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.tables.lock().unwrap().contains_key(table) {
            return Ok(Some(TableKind::BaseTable));
        }
        Ok(self
            .others
            .lock()
            .unwrap()
            .get(table)
            .map(|kind| TableKind::Other(kind.clone())))
    }

    async fn create_table(&self, table: &str, columns: &[ColumnDef]) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.tables.lock().unwrap().insert(
            table.to_string(),
            MockTable {
                columns: columns.to_vec(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    async fn table_columns(&self, table: &str) -> Result<Vec<TableColumn>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| {
                t.columns
                    .iter()
                    .map(|c| TableColumn {
                        name: c.name.clone(),
                        type_name: c.ty.sql_name().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_rows(&self, table: &str, _columns: &[TableColumn], rows: &[Row]) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        let target = tables.get_mut(table).expect("insert into missing table");
        target.rows.extend(rows.iter().cloned());
        Ok(rows.len() as u64)
    }
}

pub struct MockConfig {
    pub csv_path: String,
    pub table_name: String,
    pub type_policy: TypePolicy,
}

impl MockConfig {
    pub fn new(csv_path: &str, table_name: &str) -> Self {
        Self {
            csv_path: csv_path.to_string(),
            table_name: table_name.to_string(),
            type_policy: TypePolicy::Text,
        }
    }
}

impl ConfigProvider for MockConfig {
    fn csv_path(&self) -> &str {
        &self.csv_path
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn type_policy(&self) -> TypePolicy {
        self.type_policy
    }
}

pub fn cell(v: &str) -> Option<String> {
    Some(v.to_string())
}
