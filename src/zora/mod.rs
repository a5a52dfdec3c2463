//! Zora creator-coin plugin
//!
//! Wires `ZORA_*` wallet configuration into a per-invocation Base client
//! bundle and exposes coin creation and trading actions on top of an
//! injected coin SDK, plus a wallet-address provider.

pub mod actions;
pub mod client;
pub mod config;
pub mod metadata;
pub mod provider;
pub mod sdk;

use crate::plugin::{Plugin, PluginAction, Provider};
use std::sync::Arc;

pub use actions::{
    CreateCoinAction, CreateCoinParams, TradeCoinAction, TradeCoinParams, CREATE_COIN_NAME,
    DEFAULT_SLIPPAGE, TRADE_COIN_NAME,
};
pub use client::ZoraBundle;
pub use config::{ZoraChain, ZoraConfig};
pub use metadata::{resolve_metadata_uri, MetadataPinner, PinataClient};
pub use provider::ZoraWalletProvider;
pub use sdk::{
    CoinDeployment, CoinSdk, CreateCoinRequest, DeployCurrency, TradeLeg, TradeReceipt,
    TradeRequest,
};

/// Build the plugin against the process environment.
///
/// The coin SDK is an external collaborator; the host supplies its
/// binding.
pub fn plugin(sdk: Arc<dyn CoinSdk>) -> Plugin {
    plugin_with(sdk, |key| std::env::var(key).ok())
}

/// Build the plugin with an explicit configuration lookup. Missing
/// configuration disables the action set rather than failing the plugin
/// load.
pub fn plugin_with(sdk: Arc<dyn CoinSdk>, lookup: impl Fn(&str) -> Option<String>) -> Plugin {
    let actions: Vec<Arc<dyn PluginAction>> = match ZoraConfig::from_lookup(lookup) {
        Ok(_) => vec![
            Arc::new(CreateCoinAction::new(Arc::clone(&sdk))),
            Arc::new(TradeCoinAction::new(sdk)),
        ],
        Err(error) => {
            tracing::warn!(%error, "Zora actions disabled");
            vec![]
        }
    };

    Plugin {
        name: "zora",
        description: "Creator coin deployment and trading on Zora",
        actions,
        providers: vec![Arc::new(ZoraWalletProvider) as Arc<dyn Provider>],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct UnusedSdk;

    #[async_trait]
    impl CoinSdk for UnusedSdk {
        async fn create_coin(
            &self,
            _request: &CreateCoinRequest,
            _bundle: &ZoraBundle,
        ) -> Result<CoinDeployment> {
            unreachable!("plugin construction never calls the SDK")
        }

        async fn trade_coin(
            &self,
            _request: &TradeRequest,
            _bundle: &ZoraBundle,
        ) -> Result<TradeReceipt> {
            unreachable!("plugin construction never calls the SDK")
        }
    }

    #[test]
    fn missing_configuration_disables_actions() {
        let plugin = plugin_with(Arc::new(UnusedSdk), |_| None);
        assert!(plugin.actions.is_empty());
        assert_eq!(plugin.providers.len(), 1);
    }

    #[test]
    fn full_configuration_offers_both_actions() {
        let vars = HashMap::from([
            (config::RPC_URL_ENV, "https://mainnet.base.org"),
            (
                config::PRIVATE_KEY_ENV,
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            ),
        ]);

        let plugin = plugin_with(Arc::new(UnusedSdk), |key| {
            vars.get(key).map(|v| v.to_string())
        });
        let names: Vec<_> = plugin.actions.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec![CREATE_COIN_NAME, TRADE_COIN_NAME]);
    }
}
