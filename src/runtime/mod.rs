//! Host agent runtime interface
//!
//! The plugins never talk to a model directly. Structured parameter
//! extraction, response generation, and conversation state all go through
//! the [`AgentRuntime`] trait, which the host wires to its own model
//! invocation APIs. Tests substitute a mock.

#[cfg(test)]
pub mod testing;

use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// A message flowing through the host runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Memory {
    /// Build a user message with a fresh id.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: None,
            content: MessageContent {
                text: text.into(),
                source: None,
            },
            created_at: Utc::now(),
        }
    }
}

/// Conversation state as a flat placeholder map.
///
/// Values are substituted into prompt templates via [`compose_context`].
#[derive(Debug, Clone, Default)]
pub struct State {
    values: BTreeMap<String, String>,
}

/// Placeholder carrying the recent conversation transcript.
pub const RECENT_MESSAGES_KEY: &str = "recentMessages";

impl State {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }
}

/// Replace `{{key}}` placeholders in a template with state values.
///
/// Unknown placeholders are left in place; the host's generator treats
/// them as literal text.
pub fn compose_context(state: &State, template: &str) -> String {
    let mut out = template.to_string();
    for (key, value) in &state.values {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}

/// Build the response-generation template for a completed action.
///
/// Embeds the action name, a success statement, and the serialized result
/// alongside the recent-messages placeholder. The returned string is still
/// a template; callers run it through [`compose_context`].
pub fn response_template(action_name: &str, summary: &str, result_json: &str) -> String {
    format!(
        "{{{{{key}}}}}\n\n\
         The {action} action completed successfully. {summary}\n\
         Operation result:\n{result}\n\n\
         Write a short reply describing the outcome for the user. \
         Mention the key figures from the result. Respond with plain text only.",
        key = RECENT_MESSAGES_KEY,
        action = action_name,
        summary = summary,
        result = result_json,
    )
}

/// Payload delivered to the host's completion callback.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub text: String,
    pub content: Value,
}

/// Completion callback supplied by the host per invocation.
pub type HandlerCallback = Arc<dyn Fn(ActionResponse) + Send + Sync>;

/// Capabilities the host agent runtime provides to the plugins.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Configuration lookup. Hosts typically back this with the process
    /// environment.
    fn setting(&self, key: &str) -> Option<String>;

    /// Build conversation state for a triggering message.
    async fn compose_state(&self, message: &Memory) -> Result<State>;

    /// Refresh an already-composed state with the latest messages.
    async fn update_recent_state(&self, message: &Memory, state: State) -> Result<State>;

    /// Structured extraction: prompt + JSON schema to a typed object.
    async fn generate_object(&self, prompt: &str, schema: &Value) -> Result<Value>;

    /// Free-text generation for user-facing replies.
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Obtain state for a handler invocation: refresh the one passed in, or
/// compose a fresh one from the message.
pub async fn current_state(
    runtime: &dyn AgentRuntime,
    message: &Memory,
    state: Option<State>,
) -> Result<State> {
    match state {
        Some(existing) => runtime.update_recent_state(message, existing).await,
        None => runtime.compose_state(message).await,
    }
}
