//! Plugin surface consumed by the host agent runtime
//!
//! A plugin is a static bundle of action descriptors and context
//! providers. Actions own their error containment: nothing a handler does
//! may escape as an error to the dispatcher, only the boolean return and
//! the callback payload signal the outcome.

use crate::runtime::{ActionResponse, AgentRuntime, HandlerCallback, Memory, State};
use crate::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// A sample dialogue turn attached to an action descriptor.
#[derive(Debug, Clone)]
pub struct ActionExample {
    pub user: &'static str,
    pub text: &'static str,
}

/// An independently invocable operation exposed to the host runtime.
#[async_trait]
pub trait PluginAction: Send + Sync {
    fn name(&self) -> &'static str;

    /// Trigger phrases the dispatcher matches against incoming messages.
    fn similes(&self) -> &'static [&'static str];

    fn description(&self) -> &'static str;

    /// Example dialogue pairs (user message, agent reply).
    fn examples(&self) -> Vec<[ActionExample; 2]>;

    /// Gate for offering the action. Real gating happens in the
    /// credential bootstrap, so this accepts everything.
    async fn validate(&self, _runtime: &dyn AgentRuntime, _message: &Memory) -> bool {
        true
    }

    /// Perform the operation and report through the callback.
    async fn handle(
        &self,
        runtime: &dyn AgentRuntime,
        message: &Memory,
        state: Option<State>,
        options: Option<Value>,
        callback: Option<HandlerCallback>,
    ) -> bool;
}

/// Read-only context source exposed to the host. Never fails; errors are
/// rendered into the returned string.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn get(&self, runtime: &dyn AgentRuntime, message: &Memory) -> String;
}

/// Static plugin descriptor handed to the host at load time.
pub struct Plugin {
    pub name: &'static str,
    pub description: &'static str,
    pub actions: Vec<Arc<dyn PluginAction>>,
    pub providers: Vec<Arc<dyn Provider>>,
}

/// Deliver a handler outcome through the callback convention.
///
/// Success invokes the callback with the reply text and structured
/// content and returns true. Any error is logged, converted into an
/// error-prefixed text with an `{"error": ...}` payload, and returns
/// false. This is the only exit path handlers use.
pub fn deliver(
    action_name: &str,
    error_prefix: &str,
    outcome: Result<(String, Value)>,
    callback: Option<HandlerCallback>,
) -> bool {
    match outcome {
        Ok((text, content)) => {
            if let Some(callback) = callback {
                callback(ActionResponse { text, content });
            }
            true
        }
        Err(error) => {
            tracing::error!(action = action_name, error = %error, "action failed");
            if let Some(callback) = callback {
                callback(ActionResponse {
                    text: format!("{}: {}", error_prefix, error),
                    content: json!({ "error": error.to_string() }),
                });
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::recording_callback;
    use crate::Error;

    #[test]
    fn deliver_success_invokes_callback_once() {
        let (callback, delivered) = recording_callback();

        let ok = deliver(
            "TEST_ACTION",
            "Error running test action",
            Ok(("done".to_string(), json!({"hash": "0x1"}))),
            Some(callback),
        );

        assert!(ok);
        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].text, "done");
        assert_eq!(delivered[0].content["hash"], "0x1");
    }

    #[test]
    fn deliver_error_reports_through_callback() {
        let (callback, delivered) = recording_callback();

        let ok = deliver(
            "TEST_ACTION",
            "Error running test action",
            Err(Error::Config("missing FOO".to_string())),
            Some(callback),
        );

        assert!(!ok);
        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].text.starts_with("Error running test action:"));
        assert!(!delivered[0].text.is_empty());
        assert!(delivered[0].content["error"]
            .as_str()
            .unwrap()
            .contains("missing FOO"));
    }

    #[test]
    fn deliver_without_callback_still_returns_outcome() {
        assert!(deliver("A", "E", Ok((String::new(), Value::Null)), None));
        assert!(!deliver(
            "A",
            "E",
            Err(Error::Sdk("boom".to_string())),
            None
        ));
    }
}
