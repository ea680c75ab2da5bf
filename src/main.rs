use anyhow::Context;
use clap::Parser;
use csv_pg_etl::utils::{logger, validation::Validate};
use csv_pg_etl::{CliConfig, CsvPgPipeline, DbConfig, EtlEngine, EtlError, PgTableStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file only fills in variables the environment does not already set.
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    let db_config = DbConfig::from_env()?;
    tracing::debug!("Database config: {:?}", db_config);

    let table_name = config.table_name.clone();
    let result = run(config, db_config).await;

    match result {
        Ok(rows) => {
            println!("Inserted {} rows into table '{}'.", rows, table_name);
            Ok(())
        }
        Err(e) => {
            tracing::error!("ETL process failed: {}", e.user_friendly_message());
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            Err(e).context("csv-pg-etl run failed")
        }
    }
}

async fn run(config: CliConfig, db_config: DbConfig) -> Result<u64, EtlError> {
    config.validate()?;
    db_config.validate()?;

    let store = PgTableStore::connect(&db_config).await?;
    let engine = EtlEngine::new(CsvPgPipeline::new(store, config));
    let report = engine.run().await?;
    Ok(report.rows_inserted)
}
