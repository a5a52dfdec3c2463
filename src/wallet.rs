//! Private-key wallet shared by both plugins
//!
//! The only place private keys are handled. Keys arrive as
//! [`SecretString`], are parsed into alloy's signer, and are never
//! serialized or logged.

use crate::{Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use secrecy::{ExposeSecret, SecretString};

/// Account derived from a configured private key.
pub struct Wallet {
    address: Address,
    ethereum: EthereumWallet,
}

impl Wallet {
    /// Derive the account from a hex-encoded private key. A `0x` prefix
    /// is accepted and stripped.
    pub fn from_key(key: &SecretString) -> Result<Self> {
        let key_hex = key.expose_secret();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| Error::Wallet(format!("Invalid private key: {}", e)))?;

        let address = signer.address();
        let ethereum = EthereumWallet::from(signer);

        Ok(Self { address, ethereum })
    }

    /// Public account address (safe to share).
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signing wallet for alloy provider construction.
    pub fn ethereum_wallet(&self) -> &EthereumWallet {
        &self.ethereum
    }
}

// Manual Debug so key material never reaches logs.
impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("signer", &"[REDACTED]")
            .finish()
    }
}
