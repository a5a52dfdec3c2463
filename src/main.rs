//! CLI for poking at the plugins without a host runtime
//!
//! Lets an operator verify configuration, inspect the exposed action
//! set, and run the read-only market query end to end.

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use onchain_agent_plugins::polymarket::{
    self, select_market_tool, GammaToolset, PolymarketBundle, PolymarketConfig, POLYGON_CHAIN_ID,
};
use onchain_agent_plugins::wallet::Wallet;
use onchain_agent_plugins::zora::{
    self, CoinDeployment, CoinSdk, CreateCoinRequest, TradeReceipt, TradeRequest, ZoraBundle,
    ZoraConfig,
};
use onchain_agent_plugins::{Error, Result};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "onchain-agent")]
#[command(about = "Polymarket and Zora agent plugins")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PluginName {
    Polymarket,
    Zora,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the wallet address a plugin would use
    Wallet {
        #[arg(value_enum)]
        plugin: PluginName,
    },

    /// List the actions a plugin exposes with the current configuration
    Actions {
        #[arg(value_enum)]
        plugin: PluginName,
    },

    /// Fetch prediction market events through the market tool
    Events {
        /// Maximum number of events
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Restrict to active events
        #[arg(long)]
        active: bool,
    },

    /// Show which plugins are configured
    Config,
}

/// The coin SDK is host-supplied; the CLI has no binding and reports
/// that if an action handler ever reaches it.
struct UnboundCoinSdk;

#[async_trait]
impl CoinSdk for UnboundCoinSdk {
    async fn create_coin(
        &self,
        _request: &CreateCoinRequest,
        _bundle: &ZoraBundle,
    ) -> Result<CoinDeployment> {
        Err(Error::Sdk("no coin SDK is bound in the CLI".to_string()))
    }

    async fn trade_coin(
        &self,
        _request: &TradeRequest,
        _bundle: &ZoraBundle,
    ) -> Result<TradeReceipt> {
        Err(Error::Sdk("no coin SDK is bound in the CLI".to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Wallet { plugin } => show_wallet(plugin)?,
        Commands::Actions { plugin } => list_actions(plugin),
        Commands::Events { limit, active } => run_events(limit, active).await?,
        Commands::Config => show_config(),
    }

    Ok(())
}

fn show_wallet(plugin: PluginName) -> Result<()> {
    match plugin {
        PluginName::Polymarket => {
            let config = PolymarketConfig::from_env()?;
            let wallet = Wallet::from_key(&config.private_key)?;
            println!("Polymarket wallet address: {}", wallet.address());
        }
        PluginName::Zora => {
            let config = ZoraConfig::from_env()?;
            let wallet = Wallet::from_key(&config.private_key)?;
            println!(
                "Zora wallet address: {} ({})",
                wallet.address(),
                config.chain.name()
            );
        }
    }
    Ok(())
}

fn list_actions(plugin: PluginName) {
    let plugin = match plugin {
        PluginName::Polymarket => polymarket::plugin(),
        PluginName::Zora => zora::plugin(Arc::new(UnboundCoinSdk)),
    };

    if plugin.actions.is_empty() {
        println!("{}: no actions (configuration missing)", plugin.name);
        return;
    }

    for action in &plugin.actions {
        println!("{}", action.name());
        println!("  {}", action.description());
        println!("  similes: {}", action.similes().join(", "));
    }
}

async fn run_events(limit: u32, active: bool) -> Result<()> {
    let config = PolymarketConfig::from_env()?;
    let aggregator = GammaToolset::new();
    let bundle = PolymarketBundle::connect(&config, &aggregator).await?;

    let tool = select_market_tool(&bundle.tools)?;
    tracing::info!(tool = tool.name(), limit, "querying market tool");

    let mut args = json!({ "limit": limit });
    if active {
        args["active"] = json!(true);
    }
    let result = tool.call(args).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn show_config() {
    match PolymarketConfig::from_env() {
        Ok(config) => println!(
            "polymarket: configured (rpc: {}, chain id: {})",
            config.rpc_url, POLYGON_CHAIN_ID
        ),
        Err(error) => println!("polymarket: {}", error),
    }

    match ZoraConfig::from_env() {
        Ok(config) => println!(
            "zora: configured (rpc: {}, chain: {}, pinning: {})",
            config.rpc_url,
            config.chain.name(),
            if config.pinata_jwt.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        ),
        Err(error) => println!("zora: {}", error),
    }
}
