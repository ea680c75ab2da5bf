pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::postgres::PgTableStore;
pub use crate::config::DbConfig;
pub use crate::core::{etl::EtlEngine, pipeline::CsvPgPipeline};
pub use crate::domain::model::{Dataset, LoadReport, TypePolicy};
pub use crate::utils::error::{EtlError, Result};
