//! Quilombo CLI - offline-first record keeping from the terminal
//!
//! Capture program records in the field, then reconcile them with the
//! remote store once connectivity returns.

mod cli;
mod commands;
mod error;

use clap::Parser;

use cli::{Cli, Commands};
use commands::add::run_add;
use commands::backup::{run_export, run_import};
use commands::clear::run_clear;
use commands::common::resolve_db_path;
use commands::completions::run_completions;
use commands::conflicts::{run_conflicts, run_resolve};
use commands::list::run_list;
use commands::status::run_status;
use commands::sync::run_sync;
use commands::watch::run_watch;
use error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quilombo=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Add { entity } => run_add(entity, &db_path).await?,
        Commands::List { collection, json } => run_list(&collection, json, &db_path).await?,
        Commands::Status { json } => run_status(json, &db_path).await?,
        Commands::Sync => run_sync(&db_path).await?,
        Commands::Conflicts { json } => run_conflicts(json, &db_path).await?,
        Commands::Resolve {
            table,
            local_id,
            keep,
        } => run_resolve(&table, local_id, keep, &db_path).await?,
        Commands::Export { output } => run_export(output.as_deref(), &db_path).await?,
        Commands::Import { path } => run_import(&path, &db_path).await?,
        Commands::Clear { yes } => run_clear(yes, &db_path).await?,
        Commands::Watch { interval } => run_watch(interval, &db_path).await?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
