//! Scalebreakers CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (tables and session store)
//! sb-cli migrate
//!
//! # Upsert workshops or portfolio items from YAML
//! sb-cli seed workshops crates/cli/seed/workshops.yaml
//! sb-cli seed portfolio crates/cli/seed/portfolio.yaml
//! ```
//!
//! # Environment Variables
//!
//! - `SCALEBREAKERS_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(author, version, about = "Scalebreakers CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Upsert records the API exposes read-only
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed workshops from a YAML file
    Workshops {
        /// Path to the YAML file
        file: String,
    },
    /// Seed portfolio items from a YAML file
    Portfolio {
        /// Path to the YAML file
        file: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Workshops { file } => commands::seed::workshops(&file).await?,
            SeedTarget::Portfolio { file } => commands::seed::portfolio(&file).await?,
        },
    }
    Ok(())
}
