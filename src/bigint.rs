//! Decimal-string serde for large integer fields.
//!
//! On-chain amounts routinely exceed what fits in a JSON number, so result
//! structs serialize them as decimal strings. Deserialization accepts both
//! a string and a plain number for convenience.

use alloy::primitives::U256;
use serde::{de, Deserialize, Deserializer, Serializer};

pub mod u256_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        super::parse_u256(&raw).map_err(de::Error::custom)
    }
}

pub mod u256_opt_string {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<U256>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<U256>, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        match raw {
            Some(v) => super::parse_u256(&v).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

fn parse_u256(value: &serde_json::Value) -> Result<U256, String> {
    match value {
        serde_json::Value::String(s) => s
            .parse::<U256>()
            .map_err(|e| format!("invalid integer string {:?}: {}", s, e)),
        serde_json::Value::Number(n) => {
            let as_u64 = n
                .as_u64()
                .ok_or_else(|| format!("integer out of range: {}", n))?;
            Ok(U256::from(as_u64))
        }
        other => Err(format!("expected integer string, got {}", other)),
    }
}
