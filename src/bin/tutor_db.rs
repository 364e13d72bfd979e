//! Database maintenance tool: migrations, seed data and schema checks.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tutor_platform::config::Settings;
use tutor_platform::infrastructure::database;
use tutor_platform::shared::snowflake::SnowflakeGenerator;

#[derive(Parser)]
#[command(name = "tutor-db")]
#[command(about = "Database maintenance for the tutor platform")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations
    Migrate,
    /// Insert default departments and the nucleus admin (idempotent)
    Seed,
    /// Check that every expected table and column exists
    Verify,
}

#[tokio::main]
async fn main() -> ExitCode {
    tutor_platform::telemetry::init_tracing();
    let args = Args::parse();

    match run(args.command).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("tutor-db: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<ExitCode> {
    let settings = Settings::load().context("loading configuration")?;
    let pool = database::create_pool(&settings.database)
        .await
        .context("connecting to database")?;

    match command {
        Command::Migrate => {
            database::run_migrations(&pool)
                .await
                .context("applying migrations")?;
            println!("Migrations applied");
        }
        Command::Seed => {
            let ids = SnowflakeGenerator::new(
                settings.snowflake.machine_id as u64,
                settings.snowflake.epoch,
            );
            let summary = database::seed_all(&pool, &ids, &settings.seed)
                .await
                .context("seeding")?;
            println!(
                "Seeded {} department(s); nucleus admin {}",
                summary.departments_inserted,
                if summary.nucleus_admin_inserted {
                    "created"
                } else {
                    "unchanged"
                }
            );
        }
        Command::Verify => {
            let report = database::verify_schema(&pool)
                .await
                .context("reading information_schema")?;
            print!("{}", report);
            if !report.is_ok() {
                eprintln!("Schema verification failed");
                return Ok(ExitCode::FAILURE);
            }
            println!("Schema OK");
        }
    }

    Ok(ExitCode::SUCCESS)
}
