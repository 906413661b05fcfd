//! Sync MGNREGA statistics for one state or the current financial year.

use std::io;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

use mgnrega_backend::domain::ports::{SyncCommand, SyncOutcome, SyncRunRepository};
use mgnrega_backend::domain::sync::DataSyncService;
use mgnrega_backend::outbound::datagov::DataGovHttpSource;
use mgnrega_backend::outbound::persistence::{
    DbPool, DieselEmploymentIngestRepository, DieselSyncRunRepository, PoolConfig,
};
use mgnrega_backend::server::config::SyncCliConfig;

/// `sync-data` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sync-data",
    about = "Sync MGNREGA employment statistics into backend storage",
    version
)]
struct CliArgs {
    /// State to sync, e.g. "MAHARASHTRA". Required unless --latest is set.
    #[arg(value_name = "STATE_NAME")]
    state_name: Option<String>,
    /// Financial year filter, e.g. "2025-2026".
    #[arg(value_name = "FINANCIAL_YEAR")]
    fin_year: Option<String>,
    /// Sync the current financial year across all states.
    #[arg(long)]
    latest: bool,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    if !args.latest && args.state_name.is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: sync-data <STATE_NAME> [FINANCIAL_YEAR], or sync-data --latest",
        ));
    }

    let config = SyncCliConfig::from_env().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url, &config)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let source = DataGovHttpSource::new(
        config.datagov_endpoint.clone(),
        config.datagov_api_key.clone(),
    )
    .map_err(|error| io::Error::other(format!("build statistics client: {error}")))?;
    let runs = Arc::new(DieselSyncRunRepository::new(pool.clone()));
    let service = DataSyncService::new(
        Arc::new(source),
        Arc::new(DieselEmploymentIngestRepository::new(pool)),
        Arc::clone(&runs),
        Arc::new(DefaultClock),
    );

    let outcome = if args.latest {
        service.sync_latest().await
    } else {
        let state_name = args.state_name.unwrap_or_default();
        service.sync_state(&state_name, args.fin_year).await
    }
    .map_err(|error| io::Error::other(format!("sync run failed: {error}")))?;

    print_outcome(&outcome);
    print_status(runs.as_ref()).await?;

    Ok(())
}

fn print_outcome(outcome: &SyncOutcome) {
    println!("run_id={}", outcome.run_id);
    println!("record_count={}", outcome.record_count);
    if let Some(fin_year) = &outcome.fin_year {
        println!("fin_year={fin_year}");
    }
}

async fn print_status(runs: &DieselSyncRunRepository) -> io::Result<()> {
    let counts = runs
        .dataset_counts()
        .await
        .map_err(|error| io::Error::other(format!("read dataset counts: {error}")))?;
    println!("total_states={}", counts.states);
    println!("total_districts={}", counts.districts);
    println!("total_records={}", counts.records);

    let last = runs
        .last_successful()
        .await
        .map_err(|error| io::Error::other(format!("read last successful run: {error}")))?;
    if let Some(run) = last {
        println!("last_successful_type={}", run.run_type);
        if let Some(count) = run.record_count {
            println!("last_successful_records={count}");
        }
        if let Some(completed_at) = run.completed_at {
            println!("last_successful_completed_at={}", completed_at.to_rfc3339());
        }
    }
    Ok(())
}

fn resolve_database_url(explicit: Option<String>, config: &SyncCliConfig) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }
    config.database_url.clone().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing.

    use super::CliArgs;
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    fn parses_state_and_year_positionals() {
        let args = CliArgs::try_parse_from(["sync-data", "MAHARASHTRA", "2025-2026"])
            .expect("args should parse");
        assert_eq!(args.state_name.as_deref(), Some("MAHARASHTRA"));
        assert_eq!(args.fin_year.as_deref(), Some("2025-2026"));
        assert!(!args.latest);
    }

    #[rstest]
    fn parses_latest_flag_without_positionals() {
        let args = CliArgs::try_parse_from(["sync-data", "--latest"]).expect("args should parse");
        assert!(args.latest);
        assert_eq!(args.state_name, None);
    }

    #[rstest]
    fn parses_database_url_override() {
        let args = CliArgs::try_parse_from([
            "sync-data",
            "--latest",
            "--database-url",
            "postgres://localhost/mgnrega",
        ])
        .expect("args should parse");
        assert_eq!(
            args.database_url.as_deref(),
            Some("postgres://localhost/mgnrega")
        );
    }
}
