//! Polymarket actions
//!
//! One action: fetch prediction-market events. The handler follows the
//! uniform shape every action in this crate uses: bootstrap the client
//! bundle, refresh conversation state, extract parameters through the
//! runtime's structured generator, run the external operation, generate a
//! reply, and deliver through the callback.

use crate::plugin::{deliver, ActionExample, PluginAction};
use crate::polymarket::client::PolymarketBundle;
use crate::polymarket::config::PolymarketConfig;
use crate::polymarket::tools::{select_market_tool, ToolAggregator};
use crate::runtime::{
    compose_context, current_state, response_template, AgentRuntime, HandlerCallback, Memory,
    State,
};
use crate::{Error, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const LIST_EVENTS_NAME: &str = "LIST_POLYMARKET_EVENTS";

const LIST_EVENTS_SIMILES: &[&str] = &[
    "GET_POLYMARKET_EVENTS",
    "SHOW_PREDICTION_MARKETS",
    "LIST_PREDICTION_MARKETS",
    "POLYMARKET_EVENTS",
];

const LIST_EVENTS_TEMPLATE: &str = "\
Extract the parameters for a Polymarket event query from the recent conversation.

{{recentMessages}}

Fields:
- \"limit\": maximum number of events to return (optional)
- \"active\": restrict to currently active events (optional)
";

/// Parameters extracted from the conversation for an event query.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListEventsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Fetch prediction-market events through the aggregated market tool.
pub struct ListEventsAction {
    aggregator: Arc<dyn ToolAggregator>,
}

impl ListEventsAction {
    pub fn new(aggregator: Arc<dyn ToolAggregator>) -> Self {
        Self { aggregator }
    }

    async fn execute(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
    ) -> Result<(String, Value)> {
        let config = PolymarketConfig::from_runtime(runtime)?;
        let bundle = PolymarketBundle::connect(&config, self.aggregator.as_ref()).await?;

        let state = current_state(runtime, message, state).await?;

        let schema = serde_json::to_value(schemars::schema_for!(ListEventsParams))?;
        let prompt = compose_context(&state, LIST_EVENTS_TEMPLATE);
        let raw = runtime.generate_object(&prompt, &schema).await?;
        let params: ListEventsParams =
            serde_json::from_value(raw).map_err(|e| Error::Extraction(e.to_string()))?;

        let tool = select_market_tool(&bundle.tools)?;
        tracing::debug!(tool = tool.name(), "calling market tool");
        let result = tool.call(serde_json::to_value(&params)?).await?;

        let serialized = serde_json::to_string_pretty(&result)?;
        let template = response_template(
            LIST_EVENTS_NAME,
            "The prediction market events were fetched.",
            &serialized,
        );
        let reply = runtime
            .generate_text(&compose_context(&state, &template))
            .await?;

        Ok((reply, result))
    }
}

#[async_trait]
impl PluginAction for ListEventsAction {
    fn name(&self) -> &'static str {
        LIST_EVENTS_NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        LIST_EVENTS_SIMILES
    }

    fn description(&self) -> &'static str {
        "Fetches prediction market events from Polymarket and summarizes them"
    }

    fn examples(&self) -> Vec<[ActionExample; 2]> {
        vec![[
            ActionExample {
                user: "{{user1}}",
                text: "show active events on polymarket",
            },
            ActionExample {
                user: "{{agentName}}",
                text: "Here are the currently active Polymarket events I found.",
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
        deliver(
            self.name(),
            "Error fetching Polymarket events",
            outcome,
            callback,
        )
    }
}
