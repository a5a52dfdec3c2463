//! Wallet address provider for the host runtime.

use crate::plugin::Provider;
use crate::polymarket::config::PolymarketConfig;
use crate::runtime::{AgentRuntime, Memory};
use crate::wallet::Wallet;
use async_trait::async_trait;

/// One-line wallet context. Never fails; configuration problems are
/// rendered into the returned string.
pub struct PolymarketWalletProvider;

#[async_trait]
impl Provider for PolymarketWalletProvider {
    async fn get(&self, runtime: &dyn AgentRuntime, _message: &Memory) -> String {
        let wallet = PolymarketConfig::from_runtime(runtime)
            .and_then(|config| Wallet::from_key(&config.private_key));

        match wallet {
            Ok(wallet) => format!("Polymarket wallet address: {}", wallet.address()),
            Err(error) => format!("Polymarket wallet is unavailable: {}", error),
        }
    }
}
