mod commands;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use aprilaire_hub_rs::logging::{
    LogConfig, LogGuard, RotationPeriod, setup_console_logging, setup_file_logging,
};
use clap::Parser;
use clap_derive::{Parser, Subcommand};

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print every entity with its current state
    List {
        /// Also dump the raw attribute values
        #[arg(long)]
        raw: bool,
    },
    /// Set the target humidity of the humidifier or dehumidifier
    Humidity {
        #[arg(long, default_value = "humidifier")]
        entity: String,
        #[arg(long)]
        value: u8,
    },
    /// Set a numeric entity
    Number {
        #[arg(long, default_value = "written_outdoor_temperature_value")]
        entity: String,
        #[arg(long, allow_hyphen_values = true)]
        value: f64,
    },
    /// Pick an option of a select entity
    Select {
        #[arg(long)]
        entity: String,
        #[arg(long)]
        option: String,
    },
    /// Print state changes while the wall unit reports new readings
    Listen {
        #[arg(long, default_value = "10")]
        seconds: u64,
    },
}

#[derive(Parser, Debug)]
pub struct Params {
    /// Settings file path (if not set, it will use default settings)
    #[clap(long)]
    settings: Option<PathBuf>,
    /// Directory for rotated log files (if not set, logs to stdout)
    #[clap(long)]
    log_dir: Option<PathBuf>,
    #[clap(long, default_value = "daily")]
    log_rotation: RotationPeriod,
    /// Simulated round trip to the thermostat, in milliseconds
    #[clap(long, default_value = "50")]
    latency_ms: u64,
    /// Make the simulated thermostat refuse every write
    #[clap(long)]
    fail_writes: bool,

    #[command(subcommand)]
    command: Commands,
}

fn setup_logging(params: &Params) -> Result<LogGuard> {
    match &params.log_dir {
        Some(log_dir) => Ok(setup_file_logging(&LogConfig {
            log_dir: log_dir.clone(),
            rotation: params.log_rotation,
            console: true,
            ..LogConfig::default()
        })?),
        None => Ok(setup_console_logging()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let params = Params::parse();
    let _guard = setup_logging(&params)?;

    match params.command.clone() {
        Commands::List { raw } => commands::list_entities(&params, raw).await?,
        Commands::Humidity { entity, value } => {
            commands::set_humidity(&params, &entity, value).await?
        }
        Commands::Number { entity, value } => commands::set_number(&params, &entity, value).await?,
        Commands::Select { entity, option } => {
            commands::select_option(&params, &entity, &option).await?
        }
        Commands::Listen { seconds } => commands::listen(&params, seconds).await?,
    }

    Ok(())
}
