mod config;
mod plugins_cmd;
mod providers_cmd;
mod slot_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

// Linked for the plugin registrations it carries.
use pacer_extensions as _;

#[derive(Parser)]
#[command(name = "pacer")]
#[command(about = "Pacer: inspect and manage fitness app plugins")]
#[command(version)]
struct Cli {
    /// Path to config.yaml (defaults to the Pacer config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Overwrite an existing config (the old one is kept as a backup)
        #[arg(long)]
        force: bool,
    },
    /// List extension plugins and the slots they fill
    Plugins {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List data and storage providers
    Providers,
    /// Show a provider's setup form, or check settings against it
    Setup {
        id: String,
        /// A setting as key=value; repeatable
        #[arg(long = "set", value_parser = providers_cmd::parse_key_val)]
        settings: Vec<(String, String)>,
    },
    /// Resolve a slot and print its components as JSON
    Slot {
        name: String,
        /// Print every factory outcome, failures included
        #[arg(long)]
        all: bool,
    },
    /// Print routes contributed by plugins
    Routes,
    /// Print settings tabs contributed by plugins
    Tabs,
    /// Enable an extension plugin
    Enable { id: String },
    /// Disable an extension plugin
    Disable { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Commands::Init { force } = cli.command {
        let path = config::init(cli.config.as_deref(), force).await?;
        terminal_output::note_success(&format!("Wrote {}", path.display()));
        return Ok(());
    }
    let config = config::load(cli.config.as_deref()).await?;

    pacer_logging::init_logger(config.log_dir(), config.log_level());
    pacer_plugins::init_registries();
    let store = config::build_store(&config);
    debug!(store = store.name(), "Starting command");

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Plugins { json } => plugins_cmd::list(store.as_ref(), json).await?,
        Commands::Providers => providers_cmd::list()?,
        Commands::Setup { id, settings } => providers_cmd::setup(&id, settings).await?,
        Commands::Slot { name, all } => slot_cmd::run(name, all, store).await?,
        Commands::Routes => plugins_cmd::routes()?,
        Commands::Tabs => plugins_cmd::tabs()?,
        Commands::Enable { id } => plugins_cmd::set_enabled(store.as_ref(), &id, true).await?,
        Commands::Disable { id } => plugins_cmd::set_enabled(store.as_ref(), &id, false).await?,
    }

    Ok(())
}
