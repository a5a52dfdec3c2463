//! Market tool discovery and the Gamma API toolset
//!
//! The tool list comes from an external aggregator the host wires in.
//! This module defines the aggregation interface, the heuristic that
//! picks the market-data tool out of the list, and an in-crate default
//! aggregator backed by Polymarket's public Gamma HTTP API.

use crate::polymarket::config::ApiCredentials;
use crate::{Error, Result};
use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Public Gamma API endpoint (market and event metadata, no auth).
pub const GAMMA_API_BASE: &str = "https://gamma-api.polymarket.com";

/// A callable capability exposed by the tool aggregator.
#[async_trait]
pub trait MarketTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn call(&self, args: Value) -> Result<Value>;
}

impl std::fmt::Debug for dyn MarketTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketTool").field("name", &self.name()).finish()
    }
}

/// External aggregator producing the tool list for a credentialed wallet.
#[async_trait]
pub trait ToolAggregator: Send + Sync {
    async fn tools(
        &self,
        wallet: Address,
        credentials: &ApiCredentials,
    ) -> Result<Vec<Arc<dyn MarketTool>>>;
}

/// Pick the market-data tool: first tool whose name contains "event" or
/// "market", case-insensitive. There is no tie-break between multiple
/// matches; the aggregator's ordering decides.
pub fn select_market_tool(tools: &[Arc<dyn MarketTool>]) -> Result<Arc<dyn MarketTool>> {
    tools
        .iter()
        .find(|tool| {
            let name = tool.name().to_lowercase();
            name.contains("event") || name.contains("market")
        })
        .cloned()
        .ok_or_else(|| {
            Error::ToolNotFound("no event or market tool in the aggregated tool list".to_string())
        })
}

/// Default aggregator: read-only tools over the public Gamma API.
pub struct GammaToolset {
    http: Client,
    base_url: Url,
}

impl GammaToolset {
    pub fn new() -> Self {
        Self::with_base_url(Url::parse(GAMMA_API_BASE).expect("static Gamma API URL"))
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

impl Default for GammaToolset {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolAggregator for GammaToolset {
    async fn tools(
        &self,
        wallet: Address,
        _credentials: &ApiCredentials,
    ) -> Result<Vec<Arc<dyn MarketTool>>> {
        tracing::debug!(wallet = %wallet, "building Polymarket tool list");
        Ok(vec![
            Arc::new(GammaQueryTool {
                http: self.http.clone(),
                base_url: self.base_url.clone(),
                endpoint: "events",
                tool_name: "get_polymarket_events",
                tool_description: "Fetches prediction market events from Polymarket",
            }),
            Arc::new(GammaQueryTool {
                http: self.http.clone(),
                base_url: self.base_url.clone(),
                endpoint: "markets",
                tool_name: "get_polymarket_markets",
                tool_description: "Fetches individual prediction markets from Polymarket",
            }),
        ])
    }
}

/// Read-only query against one Gamma collection endpoint.
struct GammaQueryTool {
    http: Client,
    base_url: Url,
    endpoint: &'static str,
    tool_name: &'static str,
    tool_description: &'static str,
}

#[async_trait]
impl MarketTool for GammaQueryTool {
    fn name(&self) -> &str {
        self.tool_name
    }

    fn description(&self) -> &str {
        self.tool_description
    }

    async fn call(&self, args: Value) -> Result<Value> {
        let limit = args.get("limit").and_then(|v| v.as_u64()).unwrap_or(10);

        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(active) = args.get("active").and_then(|v| v.as_bool()) {
            query.push(("active", active.to_string()));
            query.push(("closed", (!active).to_string()));
        }

        let url = self
            .base_url
            .join(self.endpoint)
            .map_err(|e| Error::InvalidArgument(format!("Invalid endpoint path: {}", e)))?;

        let response = self.http.get(url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Sdk(format!(
                "Gamma API request for {} failed with status {}",
                self.endpoint, status
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NamedTool(&'static str);

    #[async_trait]
    impl MarketTool for NamedTool {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        async fn call(&self, _args: Value) -> Result<Value> {
            Ok(json!({"tool": self.0}))
        }
    }

    fn tools(names: &[&'static str]) -> Vec<Arc<dyn MarketTool>> {
        names
            .iter()
            .map(|n| Arc::new(NamedTool(n)) as Arc<dyn MarketTool>)
            .collect()
    }

    #[test]
    fn selects_first_matching_tool() {
        let list = tools(&["place_order", "get_polymarket_events", "get_polymarket_markets"]);
        let tool = select_market_tool(&list).unwrap();
        assert_eq!(tool.name(), "get_polymarket_events");
    }

    #[test]
    fn match_is_case_insensitive() {
        let list = tools(&["GET_MARKET_DATA"]);
        let tool = select_market_tool(&list).unwrap();
        assert_eq!(tool.name(), "GET_MARKET_DATA");
    }

    #[test]
    fn no_match_is_tool_not_found() {
        let list = tools(&["place_order", "cancel_order"]);
        let err = select_market_tool(&list).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
        assert!(err.to_string().contains("Tool not found"));
    }

    #[test]
    fn empty_list_is_tool_not_found() {
        let err = select_market_tool(&[]).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }
}
