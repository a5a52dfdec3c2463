//! Polymarket plugin configuration
//!
//! Values are presence-validated only. The API credential group is
//! checked before the wallet group, and each group reports as a unit so
//! the operator sees every variable the group needs.

use crate::runtime::AgentRuntime;
use crate::{Error, Result};
use secrecy::SecretString;
use url::Url;

pub const API_KEY_ENV: &str = "POLYMARKET_API_KEY";
pub const API_SECRET_ENV: &str = "POLYMARKET_SECRET";
pub const API_PASSPHRASE_ENV: &str = "POLYMARKET_PASSPHRASE";
pub const WALLET_PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";
pub const RPC_PROVIDER_URL_ENV: &str = "RPC_PROVIDER_URL";

/// The three-way CLOB API credential set.
#[derive(Debug)]
pub struct ApiCredentials {
    pub api_key: SecretString,
    pub secret: SecretString,
    pub passphrase: SecretString,
}

#[derive(Debug)]
pub struct PolymarketConfig {
    pub credentials: ApiCredentials,
    pub private_key: SecretString,
    pub rpc_url: Url,
}

impl PolymarketConfig {
    /// Load from an arbitrary variable lookup. Empty values count as
    /// missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (Some(api_key), Some(secret), Some(passphrase)) = (
            read(API_KEY_ENV),
            read(API_SECRET_ENV),
            read(API_PASSPHRASE_ENV),
        ) else {
            return Err(Error::Config(format!(
                "Polymarket API credentials are not configured: {}, {}, and {} are required",
                API_KEY_ENV, API_SECRET_ENV, API_PASSPHRASE_ENV
            )));
        };

        let (Some(private_key), Some(rpc_url)) =
            (read(WALLET_PRIVATE_KEY_ENV), read(RPC_PROVIDER_URL_ENV))
        else {
            return Err(Error::Config(format!(
                "Polymarket wallet configuration is missing: {} and {} are required",
                WALLET_PRIVATE_KEY_ENV, RPC_PROVIDER_URL_ENV
            )));
        };

        let rpc_url: Url = rpc_url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid {}: {}", RPC_PROVIDER_URL_ENV, e)))?;

        Ok(Self {
            credentials: ApiCredentials {
                api_key: SecretString::from(api_key),
                secret: SecretString::from(secret),
                passphrase: SecretString::from(passphrase),
            },
            private_key: SecretString::from(private_key),
            rpc_url,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_runtime(runtime: &dyn AgentRuntime) -> Result<Self> {
        Self::from_lookup(|key| runtime.setting(key))
    }
}
