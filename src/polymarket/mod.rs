//! Polymarket prediction-market plugin
//!
//! Wires `POLYMARKET_*` API credentials and a Polygon wallet into a
//! per-invocation client bundle, and exposes a single event-query action
//! plus a wallet-address provider.

pub mod actions;
pub mod client;
pub mod config;
pub mod provider;
pub mod tools;

use crate::plugin::{Plugin, PluginAction, Provider};
use std::sync::Arc;

pub use actions::{ListEventsAction, ListEventsParams, LIST_EVENTS_NAME};
pub use client::{PolymarketBundle, POLYGON_CHAIN_ID};
pub use config::{ApiCredentials, PolymarketConfig};
pub use provider::PolymarketWalletProvider;
pub use tools::{select_market_tool, GammaToolset, MarketTool, ToolAggregator};

/// Build the plugin against the process environment and the default
/// Gamma toolset.
pub fn plugin() -> Plugin {
    plugin_with(Arc::new(GammaToolset::new()), |key| std::env::var(key).ok())
}

/// Build the plugin with an explicit aggregator and configuration lookup.
///
/// Missing configuration disables the action set rather than failing the
/// plugin load; the provider stays available either way.
pub fn plugin_with(
    aggregator: Arc<dyn ToolAggregator>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Plugin {
    let actions: Vec<Arc<dyn PluginAction>> = match PolymarketConfig::from_lookup(lookup) {
        Ok(_) => vec![Arc::new(ListEventsAction::new(aggregator))],
        Err(error) => {
            tracing::warn!(%error, "Polymarket actions disabled");
            vec![]
        }
    };

    Plugin {
        name: "polymarket",
        description: "Prediction market data access for Polymarket",
        actions,
        providers: vec![Arc::new(PolymarketWalletProvider) as Arc<dyn Provider>],
    }
}
