mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use commands::query::Query;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Results go to stdout, diagnostics to stderr
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("arcparse=warn,arcparse_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let (file, query) = match args.command {
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
        Command::Json { file } => {
            let table = cli_utils::load_encounters(args.encounters.as_deref())?;
            return commands::json::run(&file, &table);
        }
        Command::Header { file } => (file, Query::Header),
        Command::Revision { file } => (file, Query::Revision),
        Command::Players { file } => (file, Query::Players),
        Command::Success { file } => (file, Query::Success),
        Command::StartTime { file } => (file, Query::StartTime),
        Command::EndTime { file } => (file, Query::EndTime),
        Command::LocalStartTime { file } => (file, Query::LocalStartTime),
        Command::LocalEndTime { file } => (file, Query::LocalEndTime),
        Command::BossMaxhealth { file } => (file, Query::BossMaxHealth),
        Command::IsCm { file } => (file, Query::IsCm),
        Command::Duration { file } => (file, Query::Duration),
        Command::Location { file } => (file, Query::Location),
    };

    let table = cli_utils::load_encounters(args.encounters.as_deref())?;
    commands::query::run(&file, query, &table)
}
