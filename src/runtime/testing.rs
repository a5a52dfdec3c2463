//! Mock runtime and callback helpers shared by handler tests.

use super::{ActionResponse, AgentRuntime, HandlerCallback, Memory, State, RECENT_MESSAGES_KEY};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted [`AgentRuntime`] for tests.
///
/// Settings come from an in-memory map, `generate_object` and
/// `generate_text` return preconfigured values, and every prompt sent to
/// the generators is recorded for assertions.
#[derive(Default)]
pub struct MockRuntime {
    settings: HashMap<String, String>,
    object: Option<Value>,
    text: Option<String>,
    pub object_prompts: Mutex<Vec<String>>,
    pub text_prompts: Mutex<Vec<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }

    /// Value returned by `generate_object`. Leaving it unset makes the
    /// extraction step fail, which tests use to exercise containment.
    pub fn with_object(mut self, value: Value) -> Self {
        self.object = Some(value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

#[async_trait]
impl AgentRuntime for MockRuntime {
    fn setting(&self, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }

    async fn compose_state(&self, message: &Memory) -> Result<State> {
        Ok(State::default().with(RECENT_MESSAGES_KEY, message.content.text.clone()))
    }

    async fn update_recent_state(&self, _message: &Memory, state: State) -> Result<State> {
        Ok(state)
    }

    async fn generate_object(&self, prompt: &str, _schema: &Value) -> Result<Value> {
        self.object_prompts.lock().unwrap().push(prompt.to_string());
        self.object
            .clone()
            .ok_or_else(|| Error::Extraction("mock runtime has no object configured".to_string()))
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.text_prompts.lock().unwrap().push(prompt.to_string());
        self.text
            .clone()
            .ok_or_else(|| Error::Generation("mock runtime has no text configured".to_string()))
    }
}

/// Callback that records every delivered response.
pub fn recording_callback() -> (HandlerCallback, Arc<Mutex<Vec<ActionResponse>>>) {
    let delivered: Arc<Mutex<Vec<ActionResponse>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    let callback: HandlerCallback = Arc::new(move |response| {
        sink.lock().unwrap().push(response);
    });
    (callback, delivered)
}
