pub mod database;

pub use database::DbConfig;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::TypePolicy;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_identifier, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_CSV_PATH: &str = "./data/input.csv";
pub const DEFAULT_TABLE: &str = "csv_data";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "csv-pg-etl")]
#[command(about = "CSV -> PostgreSQL simple pipeline")]
pub struct CliConfig {
    /// Path to the CSV file
    #[arg(long = "csv", env = "CSV_PATH", default_value = DEFAULT_CSV_PATH)]
    pub csv_path: String,

    /// Target table name in PostgreSQL
    #[arg(long = "table", default_value = DEFAULT_TABLE)]
    pub table_name: String,

    /// Column typing used when the table has to be created
    #[arg(long, value_enum, default_value_t = TypePolicy::Text)]
    pub column_types: TypePolicy,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn csv_path(&self) -> &str {
        &self.csv_path
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn type_policy(&self) -> TypePolicy {
        self.column_types
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("csv", &self.csv_path)?;
        validate_identifier("table", &self.table_name)?;
        Ok(())
    }
}
