//! This is a command-line tool to manage a database of named locations via
//! [libwaypoint] and to measure the way to them
use crate::cli::*;
use anyhow::{Context, Result};
use clap::Parser;
use libwaypoint::{
    Database,
    geo::Coordinates,
    tracker::Reading,
};
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("WAYPOINT_LOG"))
        .init();
    let args = Cli::parse();
    debug!(?args.database, "opening database");
    let db = Database::open(&args.database)
        .await
        .with_context(|| format!("Unable to open database {}", args.database.display()))?;

    let out = match args.command {
        Commands::Init => commands::init(&db).await?,
        Commands::Locations { command } => {
            commands::locations::handle_command(command, &db).await?
        }
        Commands::Track {
            latitude,
            longitude,
            heading,
            id,
            output,
        } => {
            let reading = Reading {
                position: Coordinates::new(latitude, longitude),
                heading,
            };
            commands::tracking::track(&db, reading, id, output.format).await?
        }
        Commands::Distance { from, to, output } => {
            commands::tracking::distance(&db, from, to, output.format).await?
        }
    };
    println!("{out}");
    Ok(())
}
