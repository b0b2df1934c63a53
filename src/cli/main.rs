//! marketplace-cli: command line client for the geodata marketplace

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, prelude::*};
use uuid::Uuid;

use geodata_marketplace_client::{ClientConfig, MarketplaceClient};

#[derive(Parser, Debug)]
#[command(name = "marketplace-cli", author, version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Marketplace server URL, overrides the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Sign in with this user before running the command
    #[arg(long, global = true, env = "MARKETPLACE_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print raw JSON envelopes
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the server configuration
    Config {
        #[arg(long)]
        locale: Option<String>,
    },
    /// Search the catalogue
    Search {
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Page size, defaults to the configured page size
        #[arg(long)]
        size: Option<u32>,
    },
    /// Show a catalogue item
    Item { id: Uuid },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List ratings
    Ratings {
        #[command(subcommand)]
        target: RatingTarget,
    },
    /// Show where navigating to a path ends up for the current session
    Route { path: String },
}

#[derive(Subcommand, Debug)]
enum CartAction {
    Show,
    Add { product: Uuid, pricing_model: Uuid },
    Remove { id: Uuid },
    Clear,
}

#[derive(Subcommand, Debug)]
enum RatingTarget {
    Asset { id: Uuid },
    Provider { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let client = MarketplaceClient::new(config).context("Failed to create client")?;

    if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
        let response = client.sign_in(username, password).await?;
        if !response.success {
            output::print_messages(&response.messages);
            anyhow::bail!("Sign in failed for {}", username);
        }
    }

    let json = cli.json;
    match cli.command {
        Commands::Config { locale } => commands::handle_config(&client, locale.as_deref(), json).await,
        Commands::Search { query, page, size } => {
            commands::handle_search(&client, query, page, size, json).await
        }
        Commands::Item { id } => commands::handle_item(&client, id, json).await,
        Commands::Cart { action } => {
            let action = match action {
                CartAction::Show => commands::CartCommand::Show,
                CartAction::Add {
                    product,
                    pricing_model,
                } => commands::CartCommand::Add {
                    product,
                    pricing_model,
                },
                CartAction::Remove { id } => commands::CartCommand::Remove(id),
                CartAction::Clear => commands::CartCommand::Clear,
            };
            commands::handle_cart(&client, action, json).await
        }
        Commands::Ratings { target } => match target {
            RatingTarget::Asset { id } => commands::handle_ratings(&client, id, false, json).await,
            RatingTarget::Provider { id } => {
                commands::handle_ratings(&client, id, true, json).await
            }
        },
        Commands::Route { path } => commands::handle_route(&client, &path),
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ClientConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}
