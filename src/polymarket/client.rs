//! Polymarket client bundle bootstrap
//!
//! One-shot setup invoked per action call. Bundles are never cached or
//! shared across invocations, so handlers running concurrently for
//! distinct messages never touch shared mutable state.

use crate::polymarket::config::PolymarketConfig;
use crate::polymarket::tools::{MarketTool, ToolAggregator};
use crate::wallet::Wallet;
use crate::{Error, Result};
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::sync::Arc;

/// Polymarket settles on Polygon mainnet.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Connected account, chain clients, and the aggregated tool list.
pub struct PolymarketBundle {
    pub address: Address,
    pub chain_id: u64,
    pub wallet_client: DynProvider,
    pub public_client: DynProvider,
    pub tools: Vec<Arc<dyn MarketTool>>,
}

impl std::fmt::Debug for PolymarketBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolymarketBundle")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl PolymarketBundle {
    pub async fn connect(
        config: &PolymarketConfig,
        aggregator: &dyn ToolAggregator,
    ) -> Result<Self> {
        let wallet = Wallet::from_key(&config.private_key)
            .map_err(|e| Error::Bootstrap(format!("Polymarket wallet setup failed: {}", e)))?;

        let wallet_client = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet().clone())
            .connect_http(config.rpc_url.clone())
            .erased();
        let public_client = ProviderBuilder::new()
            .connect_http(config.rpc_url.clone())
            .erased();

        let tools = aggregator
            .tools(wallet.address(), &config.credentials)
            .await
            .map_err(|e| Error::Bootstrap(format!("Polymarket tool aggregation failed: {}", e)))?;

        tracing::debug!(
            address = %wallet.address(),
            chain_id = POLYGON_CHAIN_ID,
            tool_count = tools.len(),
            "connected Polymarket client bundle"
        );

        Ok(Self {
            address: wallet.address(),
            chain_id: POLYGON_CHAIN_ID,
            wallet_client,
            public_client,
            tools,
        })
    }
}
