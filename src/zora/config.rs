//! Zora plugin configuration and chain resolution

use crate::runtime::AgentRuntime;
use crate::{Error, Result};
use secrecy::SecretString;
use url::Url;

pub const RPC_URL_ENV: &str = "ZORA_RPC_URL";
pub const PRIVATE_KEY_ENV: &str = "ZORA_PRIVATE_KEY";
pub const CHAIN_ENV: &str = "ZORA_CHAIN";
pub const DEBUG_ENV: &str = "DEBUG_ZORA";
pub const PINATA_JWT_ENV: &str = "PINATA_JWT";
pub const PINATA_DEFAULT_IMAGE_CID_ENV: &str = "PINATA_DEFAULT_IMAGE_CID";

/// Chains the Zora plugin can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoraChain {
    Base,
    BaseSepolia,
}

impl ZoraChain {
    pub fn chain_id(&self) -> u64 {
        match self {
            ZoraChain::Base => 8453,
            ZoraChain::BaseSepolia => 84532,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZoraChain::Base => "base",
            ZoraChain::BaseSepolia => "base-sepolia",
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, ZoraChain::BaseSepolia)
    }

    /// Resolve the target chain. An explicit override wins over anything
    /// the RPC URL suggests; an unrecognized override value is warned
    /// about and the URL inference runs instead. Default is Base mainnet.
    pub fn resolve(override_value: Option<&str>, rpc_url: &str) -> Self {
        if let Some(value) = override_value {
            match Self::from_override(value) {
                Some(chain) => return chain,
                None => {
                    tracing::warn!(value, "unrecognized {} value, inferring from RPC URL", CHAIN_ENV)
                }
            }
        }

        let url = rpc_url.to_lowercase();
        if url.contains("sepolia") || url.contains("84532") {
            ZoraChain::BaseSepolia
        } else {
            ZoraChain::Base
        }
    }

    fn from_override(value: &str) -> Option<Self> {
        match value.to_lowercase().replace('_', "-").as_str() {
            "base" | "base-mainnet" | "mainnet" => Some(ZoraChain::Base),
            "base-sepolia" | "basesepolia" | "sepolia" | "testnet" => Some(ZoraChain::BaseSepolia),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ZoraConfig {
    pub rpc_url: Url,
    pub private_key: SecretString,
    pub chain: ZoraChain,
    pub debug: bool,
    pub pinata_jwt: Option<SecretString>,
    pub pinata_default_image_cid: Option<String>,
}

impl ZoraConfig {
    /// Load from an arbitrary variable lookup. Empty values count as
    /// missing; both wallet variables are reported together.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (Some(raw_rpc_url), Some(private_key)) = (read(RPC_URL_ENV), read(PRIVATE_KEY_ENV))
        else {
            return Err(Error::Config(format!(
                "Zora wallet configuration is missing: {} and {} are required",
                RPC_URL_ENV, PRIVATE_KEY_ENV
            )));
        };

        let chain = ZoraChain::resolve(read(CHAIN_ENV).as_deref(), &raw_rpc_url);

        let rpc_url: Url = raw_rpc_url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid {}: {}", RPC_URL_ENV, e)))?;

        let debug = read(DEBUG_ENV)
            .map(|value| !matches!(value.to_lowercase().as_str(), "false" | "0" | "off"))
            .unwrap_or(false);

        Ok(Self {
            rpc_url,
            private_key: SecretString::from(private_key),
            chain,
            debug,
            pinata_jwt: read(PINATA_JWT_ENV).map(SecretString::from),
            pinata_default_image_cid: read(PINATA_DEFAULT_IMAGE_CID_ENV),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_runtime(runtime: &dyn AgentRuntime) -> Result<Self> {
        Self::from_lookup(|key| runtime.setting(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn load(vars: HashMap<&str, &str>) -> Result<ZoraConfig> {
        ZoraConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn missing_wallet_group_names_both_variables() {
        for vars in [
            HashMap::new(),
            HashMap::from([(RPC_URL_ENV, "https://mainnet.base.org")]),
            HashMap::from([(PRIVATE_KEY_ENV, TEST_KEY)]),
        ] {
            let message = load(vars).unwrap_err().to_string();
            assert!(message.contains(RPC_URL_ENV), "{}", message);
            assert!(message.contains(PRIVATE_KEY_ENV), "{}", message);
        }
    }

    #[test]
    fn defaults_to_base_mainnet() {
        let config = load(HashMap::from([
            (RPC_URL_ENV, "https://mainnet.base.org"),
            (PRIVATE_KEY_ENV, TEST_KEY),
        ]))
        .unwrap();
        assert_eq!(config.chain, ZoraChain::Base);
        assert!(!config.debug);
        assert!(config.pinata_jwt.is_none());
    }

    #[test]
    fn explicit_override_selects_testnet() {
        let config = load(HashMap::from([
            (RPC_URL_ENV, "https://mainnet.base.org"),
            (PRIVATE_KEY_ENV, TEST_KEY),
            (CHAIN_ENV, "base-sepolia"),
        ]))
        .unwrap();
        assert_eq!(config.chain, ZoraChain::BaseSepolia);
    }

    #[test]
    fn rpc_url_substring_infers_testnet() {
        for url in ["https://sepolia.base.org", "https://rpc.example.com/84532"] {
            let config = load(HashMap::from([
                (RPC_URL_ENV, url),
                (PRIVATE_KEY_ENV, TEST_KEY),
            ]))
            .unwrap();
            assert_eq!(config.chain, ZoraChain::BaseSepolia, "{}", url);
        }
    }

    #[test]
    fn override_wins_over_contradicting_url() {
        // Mainnet override against a testnet-looking URL.
        assert_eq!(
            ZoraChain::resolve(Some("base"), "https://sepolia.base.org"),
            ZoraChain::Base
        );
        // Testnet override against a mainnet URL.
        assert_eq!(
            ZoraChain::resolve(Some("base-sepolia"), "https://mainnet.base.org"),
            ZoraChain::BaseSepolia
        );
    }

    #[test]
    fn unrecognized_override_falls_back_to_url_inference() {
        assert_eq!(
            ZoraChain::resolve(Some("optimism"), "https://sepolia.base.org"),
            ZoraChain::BaseSepolia
        );
        assert_eq!(
            ZoraChain::resolve(Some("optimism"), "https://mainnet.base.org"),
            ZoraChain::Base
        );
    }

    #[test]
    fn debug_flag_parses_truthy_values() {
        for (value, expected) in [("true", true), ("1", true), ("false", false), ("0", false)] {
            let config = load(HashMap::from([
                (RPC_URL_ENV, "https://mainnet.base.org"),
                (PRIVATE_KEY_ENV, TEST_KEY),
                (DEBUG_ENV, value),
            ]))
            .unwrap();
            assert_eq!(config.debug, expected, "{}", value);
        }
    }

    #[test]
    fn chain_ids_match_base_networks() {
        assert_eq!(ZoraChain::Base.chain_id(), 8453);
        assert_eq!(ZoraChain::BaseSepolia.chain_id(), 84532);
        assert!(ZoraChain::BaseSepolia.is_testnet());
    }
}
