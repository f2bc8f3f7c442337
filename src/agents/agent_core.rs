//! Bounded retry engine for agent operations.
//!
//! Each call to [`AgentCore::execute_with_retry`] is independent: the core
//! only holds immutable configuration, so one instance can be shared across
//! concurrent requests behind an `Arc`.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::classify_error;
use super::validity::ResultValidity;
use crate::config::{AgentConfig, DEFAULT_BACKOFF_MS, DEFAULT_MAX_RETRIES};
use crate::error::{Error, Result};

/// Label used when the caller does not name the operation
pub const DEFAULT_CONTEXT: &str = "unknown";

/// Retry bound and backoff schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts allowed, including the first one
    pub max_retries: u32,
    /// Base delay unit in milliseconds
    pub backoff_ms: u64,
    /// `backoff_ms * 2^attempt` when true, constant `backoff_ms` otherwise
    pub exponential_backoff: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_ms: DEFAULT_BACKOFF_MS,
            exponential_backoff: true,
        }
    }
}

impl From<&AgentConfig> for RetryConfig {
    fn from(config: &AgentConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_ms: config.backoff_ms,
            exponential_backoff: config.exponential_backoff,
        }
    }
}

/// Observer invoked with every caught error and a `"<context> - attempt <n>"` label
pub type OnErrorCallback = Arc<dyn Fn(&Error, &str) + Send + Sync>;

/// Optional observability hooks
#[derive(Clone, Default)]
pub struct AgentCallbacks {
    pub on_error: Option<OnErrorCallback>,
}

impl AgentCallbacks {
    pub fn with_on_error<F>(callback: F) -> Self
    where
        F: Fn(&Error, &str) + Send + Sync + 'static,
    {
        Self {
            on_error: Some(Arc::new(callback)),
        }
    }
}

// Closures have no Debug, so only report whether a hook is set
impl fmt::Debug for AgentCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentCallbacks")
            .field("on_error", &self.on_error.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

/// Executes agent operations with bounded retries and backoff
#[derive(Debug, Clone, Default)]
pub struct AgentCore {
    retry_config: RetryConfig,
    callbacks: AgentCallbacks,
}

impl AgentCore {
    pub fn new(retry_config: RetryConfig, callbacks: AgentCallbacks) -> Self {
        Self {
            retry_config,
            callbacks,
        }
    }

    /// Builds a core from the `agent` configuration section, without callbacks.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(RetryConfig::from(config), AgentCallbacks::default())
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Runs `operation` until it yields a valid result or attempts run out.
    ///
    /// Empty results (see [`ResultValidity`]) are retried like failures. On
    /// the last attempt an empty result becomes [`Error::EmptyResponse`] and
    /// an error is returned unchanged. Every error, not only transient ones,
    /// is retried; [`AgentCore::should_retry`] is advisory.
    pub async fn execute_with_retry<T, F, Fut>(
        &self,
        operation: F,
        context: Option<&str>,
    ) -> Result<T>
    where
        T: ResultValidity,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.execute_with_retry_if(operation, context, |value: &T| value.is_valid_result())
            .await
    }

    /// Same loop as [`AgentCore::execute_with_retry`] with a caller-supplied
    /// validity predicate.
    pub async fn execute_with_retry_if<T, F, Fut, P>(
        &self,
        mut operation: F,
        context: Option<&str>,
        is_valid: P,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&T) -> bool,
    {
        let context = context.unwrap_or(DEFAULT_CONTEXT);
        let max_retries = self.retry_config.max_retries;

        for attempt in 0..max_retries {
            let is_last = attempt + 1 >= max_retries;

            match operation().await {
                Ok(value) if is_valid(&value) => {
                    if attempt > 0 {
                        tracing::info!(
                            context = %context,
                            attempt = attempt + 1,
                            "[AgentCore] Operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Ok(_) => {
                    if is_last {
                        tracing::error!(
                            context = %context,
                            attempts = max_retries,
                            "[AgentCore] Empty response on final attempt"
                        );
                        return Err(Error::EmptyResponse {
                            context: context.to_string(),
                            attempts: max_retries,
                        });
                    }

                    let delay_ms = self.calculate_backoff_ms(attempt);
                    tracing::warn!(
                        context = %context,
                        attempt = attempt + 1,
                        max_retries,
                        delay_ms,
                        "[AgentCore] Empty response, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(error) => {
                    if let Some(on_error) = &self.callbacks.on_error {
                        on_error(&error, &format!("{} - attempt {}", context, attempt + 1));
                    }

                    if is_last {
                        tracing::error!(
                            context = %context,
                            attempts = max_retries,
                            error = %error,
                            "[AgentCore] Operation failed on final attempt"
                        );
                        return Err(error);
                    }

                    let delay_ms = self.calculate_backoff_ms(attempt);
                    tracing::warn!(
                        context = %context,
                        attempt = attempt + 1,
                        max_retries,
                        delay_ms,
                        error = %error,
                        "[AgentCore] Operation failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }

        // Only reachable with max_retries == 0
        Err(Error::RetriesExhausted {
            context: context.to_string(),
            attempts: max_retries,
        })
    }

    /// Delay to wait after a failed attempt (0-indexed), in milliseconds.
    pub fn calculate_backoff_ms(&self, attempt: u32) -> u64 {
        let base = self.retry_config.backoff_ms;
        if !self.retry_config.exponential_backoff {
            return base;
        }

        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        base.saturating_mul(factor)
    }

    /// Advisory check for callers deciding whether to retry at a higher level.
    ///
    /// False once no attempts remain or when the message names an auth or
    /// quota failure; true otherwise.
    pub fn should_retry(&self, error: &Error, attempt: u32) -> bool {
        if attempt.saturating_add(1) >= self.retry_config.max_retries {
            return false;
        }

        classify_error(&error.to_string()).is_retryable()
    }
}
