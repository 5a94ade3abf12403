//! Fixed-delay bounded retry

use crate::RetryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Retry configuration for a single load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub retries: u32,
    /// Fixed delay between attempts in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 5,
            delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay_ms: u64) -> Self {
        Self { retries, delay_ms }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Fresh budget for one request
    pub fn budget(&self) -> RetryBudget {
        RetryBudget {
            remaining: self.retries,
            delay: self.delay(),
            attempts: 0,
        }
    }
}

/// Retries left for one in-flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryBudget {
    remaining: u32,
    delay: Duration,
    attempts: u32,
}

impl RetryBudget {
    /// Record a failed attempt and return the delay before the next one,
    /// or `None` once the budget is spent
    pub fn next_delay(&mut self) -> Option<Duration> {
        self.attempts += 1;
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.delay)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Failed attempts recorded so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Run `attempt` until it yields a value, sleeping a fixed delay between
/// tries, at most `policy.retries` extra times.
pub async fn retry_fixed<T, F>(policy: RetryPolicy, mut attempt: F) -> Result<T, RetryError>
where
    F: FnMut() -> Option<T>,
{
    let mut budget = policy.budget();

    loop {
        if let Some(value) = attempt() {
            debug!("Attempt succeeded after {} failures", budget.attempts());
            return Ok(value);
        }

        match budget.next_delay() {
            Some(delay) => {
                info!(
                    "Not ready, retrying in {}ms ({} retries left)",
                    delay.as_millis(),
                    budget.remaining()
                );
                tokio::time::sleep(delay).await;
            }
            None => {
                return Err(RetryError::Exhausted {
                    attempts: budget.attempts(),
                })
            }
        }
    }
}
