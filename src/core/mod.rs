pub mod etl;
pub mod ingest;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod schema;

pub use crate::domain::model::{Dataset, LoadReport, TypePolicy};
pub use crate::domain::ports::{ConfigProvider, Pipeline, TableStore};
pub use crate::utils::error::Result;
