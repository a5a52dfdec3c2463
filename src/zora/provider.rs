//! Wallet address provider for the host runtime.

use crate::plugin::Provider;
use crate::runtime::{AgentRuntime, Memory};
use crate::wallet::Wallet;
use crate::zora::config::ZoraConfig;
use async_trait::async_trait;

/// One-line wallet context naming the resolved chain. Never fails.
pub struct ZoraWalletProvider;

#[async_trait]
impl Provider for ZoraWalletProvider {
    async fn get(&self, runtime: &dyn AgentRuntime, _message: &Memory) -> String {
        let loaded = ZoraConfig::from_runtime(runtime).and_then(|config| {
            Wallet::from_key(&config.private_key).map(|wallet| (config, wallet))
        });

        match loaded {
            Ok((config, wallet)) => format!(
                "Zora wallet address: {} ({})",
                wallet.address(),
                config.chain.name()
            ),
            Err(error) => format!("Zora wallet is unavailable: {}", error),
        }
    }
}
