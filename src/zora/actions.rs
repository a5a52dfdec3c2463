//! Zora coin actions
//!
//! Two actions: deploy a new coin and trade an existing one. Both follow
//! the crate's uniform handler shape and treat the coin SDK as an
//! injected collaborator. On-chain submissions are single irreversible
//! calls; there is no retry and no rollback, failures surface the SDK's
//! own error through the callback.

use crate::plugin::{deliver, ActionExample, PluginAction};
use crate::runtime::{
    compose_context, current_state, response_template, AgentRuntime, HandlerCallback, Memory,
    State,
};
use crate::zora::client::ZoraBundle;
use crate::zora::config::ZoraConfig;
use crate::zora::metadata::{resolve_metadata_uri, MetadataPinner, PinataClient};
use crate::zora::sdk::{
    CoinSdk, CreateCoinRequest, DeployCurrency, TradeLeg, TradeRequest,
};
use crate::{Error, Result};
use alloy::primitives::utils::parse_ether;
use alloy::primitives::Address;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const CREATE_COIN_NAME: &str = "CREATE_ZORA_COIN";
pub const TRADE_COIN_NAME: &str = "TRADE_ZORA_COIN";

/// Maximum adverse price movement tolerated when none is requested.
pub const DEFAULT_SLIPPAGE: f64 = 0.05;

const CREATE_COIN_SIMILES: &[&str] = &[
    "DEPLOY_ZORA_COIN",
    "LAUNCH_COIN",
    "MINT_CREATOR_COIN",
    "CREATE_COIN",
];

const TRADE_COIN_SIMILES: &[&str] = &["BUY_ZORA_COIN", "SWAP_FOR_COIN", "TRADE_COIN"];

const CREATE_COIN_TEMPLATE: &str = "\
Extract the parameters for creating a new Zora coin from the recent conversation.

{{recentMessages}}

Fields:
- \"name\": display name of the coin
- \"symbol\": ticker symbol
- \"description\": short description (optional)
- \"uri\": metadata URI if the user supplied one (optional)
- \"payout_recipient\": address that receives creator payouts
- \"platform_referrer\": referrer address (optional)
- \"currency\": backing currency, \"zora\" or \"eth\" (optional)
";

const TRADE_COIN_TEMPLATE: &str = "\
Extract the parameters for buying a Zora coin with ETH from the recent conversation.

{{recentMessages}}

Fields:
- \"coin_address\": address of the coin to buy
- \"amount_in\": ETH amount to spend, as a decimal string like \"0.001\"
- \"slippage\": tolerated price movement as a fraction (optional)
";

/// Parameters extracted from the conversation for a coin creation.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateCoinParams {
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub payout_recipient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Parameters extracted from the conversation for a coin trade.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TradeCoinParams {
    pub coin_address: String,
    pub amount_in: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slippage: Option<f64>,
}

fn parse_address(value: &str, field: &str) -> Result<Address> {
    value
        .parse()
        .map_err(|e| Error::InvalidArgument(format!("Invalid {} address: {}", field, e)))
}

/// Deploy a new creator coin.
pub struct CreateCoinAction {
    sdk: Arc<dyn CoinSdk>,
}

impl CreateCoinAction {
    pub fn new(sdk: Arc<dyn CoinSdk>) -> Self {
        Self { sdk }
    }

    async fn execute(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
    ) -> Result<(String, Value)> {
        let config = ZoraConfig::from_runtime(runtime)?;
        let bundle = ZoraBundle::connect(&config)?;

        let state = current_state(runtime, message, state).await?;

        let schema = serde_json::to_value(schemars::schema_for!(CreateCoinParams))?;
        let prompt = compose_context(&state, CREATE_COIN_TEMPLATE);
        let raw = runtime.generate_object(&prompt, &schema).await?;
        let params: CreateCoinParams =
            serde_json::from_value(raw).map_err(|e| Error::Extraction(e.to_string()))?;

        let payout_recipient = parse_address(&params.payout_recipient, "payout recipient")?;
        let platform_referrer = params
            .platform_referrer
            .as_deref()
            .map(|value| parse_address(value, "platform referrer"))
            .transpose()?;
        let currency = match params.currency.as_deref() {
            None => DeployCurrency::default(),
            Some(raw) => DeployCurrency::from_name(raw).ok_or_else(|| {
                Error::InvalidArgument(format!("Unknown deploy currency: {}", raw))
            })?,
        };

        let pinata = PinataClient::from_config(&config);
        let uri = resolve_metadata_uri(
            &params.name,
            params.description.as_deref(),
            params.uri.as_deref(),
            config.pinata_default_image_cid.as_deref(),
            pinata.as_ref().map(|p| p as &dyn MetadataPinner),
        )
        .await?;

        let request = CreateCoinRequest {
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            uri: uri.clone(),
            payout_recipient,
            platform_referrer,
            currency,
        };
        let deployment = self.sdk.create_coin(&request, &bundle).await?;

        let serialized = serde_json::to_string_pretty(&deployment)?;
        let summary = format!(
            "The coin {} ({}) was deployed on {}.",
            params.name,
            params.symbol,
            bundle.chain.name()
        );
        let template = response_template(CREATE_COIN_NAME, &summary, &serialized);
        let reply = runtime
            .generate_text(&compose_context(&state, &template))
            .await?;

        let content = json!({
            "hash": deployment.hash,
            "address": deployment.address,
            "name": params.name,
            "symbol": params.symbol,
            "uri": uri,
            "chain": bundle.chain.name(),
        });
        Ok((reply, content))
    }
}

#[async_trait]
impl PluginAction for CreateCoinAction {
    fn name(&self) -> &'static str {
        CREATE_COIN_NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        CREATE_COIN_SIMILES
    }

    fn description(&self) -> &'static str {
        "Creates a new Zora coin with pinned metadata and reports the deployment"
    }

    fn examples(&self) -> Vec<[ActionExample; 2]> {
        vec![[
            ActionExample {
                user: "{{user1}}",
                text: "create a coin called Moon Coin with symbol MOON",
            },
            ActionExample {
                user: "{{agentName}}",
                text: "Moon Coin (MOON) is deployed. Here is the transaction hash.",
            },
        ]]
    }

    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
        _options: Option<Value>,
        callback: Option<HandlerCallback>,
    ) -> bool {
        let outcome = self.execute(runtime, message, state).await;
        deliver(self.name(), "Error creating Zora coin", outcome, callback)
    }
}

/// Buy a coin with ETH.
pub struct TradeCoinAction {
    sdk: Arc<dyn CoinSdk>,
}

impl TradeCoinAction {
    pub fn new(sdk: Arc<dyn CoinSdk>) -> Self {
        Self { sdk }
    }

    async fn execute(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
    ) -> Result<(String, Value)> {
        let config = ZoraConfig::from_runtime(runtime)?;
        let bundle = ZoraBundle::connect(&config)?;

        let state = current_state(runtime, message, state).await?;

        let schema = serde_json::to_value(schemars::schema_for!(TradeCoinParams))?;
        let prompt = compose_context(&state, TRADE_COIN_TEMPLATE);
        let raw = runtime.generate_object(&prompt, &schema).await?;
        let params: TradeCoinParams =
            serde_json::from_value(raw).map_err(|e| Error::Extraction(e.to_string()))?;

        let coin = parse_address(&params.coin_address, "coin")?;
        let amount_in = parse_ether(&params.amount_in)
            .map_err(|e| Error::InvalidArgument(format!("Invalid amount_in: {}", e)))?;
        let slippage = params.slippage.unwrap_or(DEFAULT_SLIPPAGE);

        let request = TradeRequest {
            sell: TradeLeg::Eth,
            buy: TradeLeg::Erc20(coin),
            amount_in,
            slippage,
            sender: bundle.address,
        };
        let receipt = self.sdk.trade_coin(&request, &bundle).await?;

        let serialized = serde_json::to_string_pretty(&receipt)?;
        let summary = format!(
            "Spent {} ETH buying the coin at {}.",
            params.amount_in, params.coin_address
        );
        let template = response_template(TRADE_COIN_NAME, &summary, &serialized);
        let reply = runtime
            .generate_text(&compose_context(&state, &template))
            .await?;

        let content = json!({
            "hash": receipt.hash,
            "coin": params.coin_address,
            "amountIn": params.amount_in,
            "amountOut": receipt.amount_out.map(|v| v.to_string()),
            "slippage": slippage,
        });
        Ok((reply, content))
    }
}

#[async_trait]
impl PluginAction for TradeCoinAction {
    fn name(&self) -> &'static str {
        TRADE_COIN_NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        TRADE_COIN_SIMILES
    }

    fn description(&self) -> &'static str {
        "Buys a Zora coin with ETH at a bounded slippage"
    }

    fn examples(&self) -> Vec<[ActionExample; 2]> {
        vec![[
            ActionExample {
                user: "{{user1}}",
                text: "buy 0.001 ETH of the coin at 0x4242...4242",
            },
            ActionExample {
                user: "{{agentName}}",
                text: "Bought the coin for 0.001 ETH. Here is the transaction hash.",
            },
        ]]
    }

    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
        _options: Option<Value>,
        callback: Option<HandlerCallback>,
    ) -> bool {
        let outcome = self.execute(runtime, message, state).await;
        deliver(self.name(), "Error trading Zora coin", outcome, callback)
    }
}
