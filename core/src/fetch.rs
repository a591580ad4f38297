//! Retry and poll loops for outbound requests. Delays run only between attempts.

use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Upper bound on items returned by a successful poll.
pub const MAX_POLLED_ITEMS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total requests allowed, including the first. Zero behaves as one.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Hotel details: 3 attempts, 1s apart.
    pub const fn details() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }

    /// Room prices: 5 polls, 1s apart.
    pub const fn polling() -> Self {
        Self::new(5, Duration::from_millis(1000))
    }

    fn budget(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::details()
    }
}

/// States of [`fetch_with_retry`]. `Attempting(n)` means `n` attempts have
/// already failed.
#[derive(Debug)]
pub enum RetryState<T> {
    Attempting(u32),
    Succeeded(T),
    Failed(FetchError),
}

/// Issue `request` until it succeeds, at most `policy.max_attempts` times.
pub async fn fetch_with_retry<T, F, Fut>(policy: RetryPolicy, mut request: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let budget = policy.budget();
    let mut state = RetryState::Attempting(0);
    loop {
        state = match state {
            RetryState::Attempting(failed) => match request().await {
                Ok(value) => RetryState::Succeeded(value),
                Err(error) => {
                    let failed = failed + 1;
                    if failed < budget {
                        warn!(attempt = failed, max_attempts = budget, %error, "request failed, retrying");
                        sleep(policy.delay).await;
                        RetryState::Attempting(failed)
                    } else {
                        warn!(attempts = failed, %error, "request failed, giving up");
                        RetryState::Failed(error)
                    }
                }
            },
            RetryState::Succeeded(value) => return Ok(value),
            RetryState::Failed(error) => return Err(error),
        };
    }
}

/// Body of a poll response. A missing `completed` counts as still running;
/// a missing or null `rooms` counts as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollPayload<T> {
    #[serde(default)]
    pub completed: bool,
    pub rooms: Option<Vec<T>>,
}

/// Terminal, non-error results of [`poll_until_ready`]. `Empty` is a
/// definitive "nothing available"; `TimedOut` means the upstream never
/// finished within the attempt budget.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    Ready(Vec<T>),
    Empty,
    TimedOut,
}

impl<T> PollOutcome<T> {
    /// Collapse to a plain list; `Empty` and `TimedOut` both become `[]`.
    pub fn into_items(self) -> Vec<T> {
        match self {
            PollOutcome::Ready(items) => items,
            PollOutcome::Empty | PollOutcome::TimedOut => Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PollOutcome::Ready(_) => "ready",
            PollOutcome::Empty => "empty",
            PollOutcome::TimedOut => "timed_out",
        }
    }
}

/// States of [`poll_until_ready`]. `Polling(n)` is the 1-based attempt about
/// to be made.
#[derive(Debug)]
pub enum PollState<T> {
    Polling(u32),
    Ready(Vec<T>),
    Empty,
    TimedOut,
    Failed(FetchError),
}

/// Poll `request` until the payload reports `completed`, at most
/// `policy.max_attempts` times. Errors are retried the same way as in
/// [`fetch_with_retry`]; the last one is returned once the budget is spent.
pub async fn poll_until_ready<T, F, Fut>(
    policy: RetryPolicy,
    mut request: F,
) -> Result<PollOutcome<T>, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollPayload<T>, FetchError>>,
{
    let budget = policy.budget();
    let mut state = PollState::Polling(1);
    loop {
        state = match state {
            PollState::Polling(attempt) => match request().await {
                Ok(payload) if payload.completed => {
                    let mut items = payload.rooms.unwrap_or_default();
                    if items.is_empty() {
                        PollState::Empty
                    } else {
                        items.truncate(MAX_POLLED_ITEMS);
                        PollState::Ready(items)
                    }
                }
                Ok(_) if attempt < budget => {
                    debug!(attempt, max_attempts = budget, "upstream still processing");
                    sleep(policy.delay).await;
                    PollState::Polling(attempt + 1)
                }
                Ok(_) => {
                    warn!(attempts = attempt, "upstream did not complete, giving up");
                    PollState::TimedOut
                }
                Err(error) if attempt < budget => {
                    warn!(attempt, max_attempts = budget, %error, "poll failed, retrying");
                    sleep(policy.delay).await;
                    PollState::Polling(attempt + 1)
                }
                Err(error) => PollState::Failed(error),
            },
            PollState::Ready(items) => return Ok(PollOutcome::Ready(items)),
            PollState::Empty => return Ok(PollOutcome::Empty),
            PollState::TimedOut => return Ok(PollOutcome::TimedOut),
            PollState::Failed(error) => return Err(error),
        };
    }
}
