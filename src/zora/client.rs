//! Zora client bundle bootstrap
//!
//! Per-invocation construction, mirroring the Polymarket side: derive the
//! account, bind a wallet-capable and a read-only client to the resolved
//! chain's endpoint, and hand the bundle to the SDK boundary.

use crate::wallet::Wallet;
use crate::zora::config::{ZoraChain, ZoraConfig};
use crate::{Error, Result};
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};

pub struct ZoraBundle {
    pub address: Address,
    pub chain: ZoraChain,
    pub wallet_client: DynProvider,
    pub public_client: DynProvider,
}

impl std::fmt::Debug for ZoraBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoraBundle")
            .field("address", &self.address)
            .field("chain", &self.chain)
            .finish()
    }
}

impl ZoraBundle {
    pub fn connect(config: &ZoraConfig) -> Result<Self> {
        let wallet = Wallet::from_key(&config.private_key)
            .map_err(|e| Error::Bootstrap(format!("Zora wallet setup failed: {}", e)))?;

        let wallet_client = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet().clone())
            .connect_http(config.rpc_url.clone())
            .erased();
        let public_client = ProviderBuilder::new()
            .connect_http(config.rpc_url.clone())
            .erased();

        if config.debug {
            tracing::info!(
                address = %wallet.address(),
                chain = config.chain.name(),
                chain_id = config.chain.chain_id(),
                "connected Zora client bundle"
            );
        } else {
            tracing::debug!(
                address = %wallet.address(),
                chain = config.chain.name(),
                "connected Zora client bundle"
            );
        }

        Ok(Self {
            address: wallet.address(),
            chain: config.chain,
            wallet_client,
            public_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zora::config::{PRIVATE_KEY_ENV, RPC_URL_ENV};
    use std::collections::HashMap;

    fn test_config(vars: HashMap<&str, &str>) -> ZoraConfig {
        ZoraConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
    }

    #[test]
    fn connect_derives_account_on_resolved_chain() {
        let config = test_config(HashMap::from([
            (RPC_URL_ENV, "https://sepolia.base.org"),
            (
                PRIVATE_KEY_ENV,
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            ),
        ]));

        let bundle = ZoraBundle::connect(&config).unwrap();
        assert_eq!(
            format!("{:?}", bundle.address).to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(bundle.chain, ZoraChain::BaseSepolia);
    }

    #[test]
    fn bad_private_key_is_wrapped_as_bootstrap() {
        let mut config = test_config(HashMap::from([
            (RPC_URL_ENV, "https://mainnet.base.org"),
            (
                PRIVATE_KEY_ENV,
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            ),
        ]));
        config.private_key = secrecy::SecretString::from("nope".to_string());

        let err = ZoraBundle::connect(&config).unwrap_err();
        assert!(matches!(err, Error::Bootstrap(_)));
        assert!(err.to_string().contains("Zora wallet setup failed"));
    }
}
