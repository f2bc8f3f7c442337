//! Agent execution reliability layer
//!
//! Callers wrap LLM provider invocations in [`AgentCore::execute_with_retry`]
//! to get bounded retries with backoff, and translate whatever error comes
//! out with [`generate_user_friendly_error`] before showing it to end users.

pub mod agent_core;
pub mod errors;
pub mod validity;

pub use agent_core::{AgentCallbacks, AgentCore, DEFAULT_CONTEXT, OnErrorCallback, RetryConfig};
pub use errors::{ErrorClass, classify_error, generate_user_friendly_error};
pub use validity::{ResultValidity, is_valid_result};
