//! Coin SDK boundary
//!
//! Coin deployment and trading are owned by an external SDK the host
//! wires in. This module fixes the interface: explicit request and result
//! structs with named optional fields, mapped once at the boundary
//! instead of duck-typed payloads. Amount fields serialize as decimal
//! strings so they stay representable in text.

use crate::bigint::{u256_opt_string, u256_string};
use crate::zora::client::ZoraBundle;
use crate::Result;
use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency a new coin is backed by. ZORA is the platform default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployCurrency {
    #[default]
    Zora,
    Eth,
}

impl DeployCurrency {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "zora" => Some(DeployCurrency::Zora),
            "eth" => Some(DeployCurrency::Eth),
            _ => None,
        }
    }
}

/// Fully resolved coin creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCoinRequest {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub payout_recipient: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_referrer: Option<Address>,
    #[serde(default)]
    pub currency: DeployCurrency,
}

/// Deployment outcome reported by the SDK.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDeployment {
    pub hash: B256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<Value>,
}

/// One side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeLeg {
    Eth,
    Erc20(Address),
}

/// Fully resolved trade call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub sell: TradeLeg,
    pub buy: TradeLeg,
    #[serde(with = "u256_string")]
    pub amount_in: U256,
    pub slippage: f64,
    pub sender: Address,
}

/// Trade outcome reported by the SDK.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub hash: B256,
    #[serde(default, with = "u256_opt_string", skip_serializing_if = "Option::is_none")]
    pub amount_out: Option<U256>,
}

/// External coin SDK operations, invoked with a freshly connected bundle.
#[async_trait]
pub trait CoinSdk: Send + Sync {
    async fn create_coin(
        &self,
        request: &CreateCoinRequest,
        bundle: &ZoraBundle,
    ) -> Result<CoinDeployment>;

    async fn trade_coin(&self, request: &TradeRequest, bundle: &ZoraBundle)
        -> Result<TradeReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_currency_parses_known_names() {
        assert_eq!(DeployCurrency::from_name("ZORA"), Some(DeployCurrency::Zora));
        assert_eq!(DeployCurrency::from_name("eth"), Some(DeployCurrency::Eth));
        assert_eq!(DeployCurrency::from_name("usdc"), None);
        assert_eq!(DeployCurrency::default(), DeployCurrency::Zora);
    }

    #[test]
    fn trade_request_amounts_serialize_as_decimal_strings() {
        let request = TradeRequest {
            sell: TradeLeg::Eth,
            buy: TradeLeg::Erc20(Address::repeat_byte(0x42)),
            amount_in: U256::from(1_000_000_000_000_000u64),
            slippage: 0.05,
            sender: Address::repeat_byte(0x01),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["amount_in"], "1000000000000000");
        assert_eq!(value["sell"], "eth");
    }

    #[test]
    fn trade_receipt_large_amount_round_trips() {
        let receipt = TradeReceipt {
            hash: B256::repeat_byte(0xaa),
            amount_out: Some(U256::MAX),
        };

        let text = serde_json::to_string(&receipt).unwrap();
        let back: TradeReceipt = serde_json::from_str(&text).unwrap();
        assert_eq!(back.amount_out, Some(U256::MAX));
    }
}
