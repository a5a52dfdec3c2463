//! On-chain agent plugins
//!
//! Integration plugins (Polymarket, Zora) for a host agent runtime:
//! - Wire environment-provided credentials into chain-connected client
//!   bundles, rebuilt per invocation so handlers never share mutable state
//! - Expose a small set of actions with structured parameter extraction
//!   and templated response generation through the host runtime
//! - Contain every handler error behind the callback/boolean convention
//!
//! On-chain SDK operations and model invocations are external
//! collaborators, consumed through traits.

pub mod bigint;
pub mod plugin;
pub mod polymarket;
pub mod runtime;
pub mod wallet;
pub mod zora;

mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use plugin::{ActionExample, Plugin, PluginAction, Provider};
pub use runtime::{ActionResponse, AgentRuntime, HandlerCallback, Memory, State};
pub use wallet::Wallet;
