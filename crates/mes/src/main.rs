//! MES Adapter Runtime - Entry Point
//!
//! Loads configuration, initializes logging, wires the runtime and prints
//! the provider catalog with the active selections as JSON.

// Force-link mes-providers to ensure linkme catalog registrations are included
extern crate mes_providers;

use clap::Parser;
use mes::infrastructure::logging::init_logging;

/// Command line interface for the MES adapter runtime
#[derive(Parser, Debug)]
#[command(name = "mes")]
#[command(about = "MES adapter runtime - provider catalog and wiring check")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = mes::load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging)?;

    let runtime = mes::AdapterRuntime::from_config(&config)?;
    println!("{}", serde_json::to_string_pretty(&runtime.summary())?);
    Ok(())
}
