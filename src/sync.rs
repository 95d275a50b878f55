//! Store Synchronization
//!
//! Every local mutation yields a `SyncOp`. Ops are applied to the document
//! store in the background with a bounded retry; ops that still fail are
//! kept as `FailedSync` so the UI can offer a manual retry.

use std::future::Future;

use doc_store::{StoreError, StoreResult};

use crate::models::{Category, Task};

/// A pending write to the document store
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOp {
    CreateCategory(Category),
    /// Cascades to every task of the category
    DeleteCategory { name: String },
    CreateTask(Task),
    UpdateTask { id: String, description: String },
    DeleteTask { id: String },
}

impl SyncOp {
    /// Short human-readable label
    pub fn describe(&self) -> String {
        match self {
            SyncOp::CreateCategory(c) => format!("add category \"{}\"", c.name),
            SyncOp::DeleteCategory { name } => format!("delete category \"{}\"", name),
            SyncOp::CreateTask(t) => format!("add task \"{}\"", t.description),
            SyncOp::UpdateTask { description, .. } => format!("edit task \"{}\"", description),
            SyncOp::DeleteTask { id } => format!("delete task {}", id),
        }
    }

    /// Transient errors, plus `NotFound` on an edit: the task's create
    /// may still be in flight.
    pub fn is_retryable(&self, error: &StoreError) -> bool {
        error.is_transient()
            || (matches!(self, SyncOp::UpdateTask { .. }) && matches!(error, StoreError::NotFound(_)))
    }
}

/// An op that exhausted its retries
#[derive(Debug, Clone, PartialEq)]
pub struct FailedSync {
    pub op: SyncOp,
    pub error: String,
}

/// Bounded exponential back-off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
        }
    }
}

impl RetryPolicy {
    /// Delay after the `attempt`-th failure (1-based)
    pub fn delay_ms(&self, attempt: u32) -> u32 {
        let shift = attempt.saturating_sub(1).min(16);
        self.base_delay_ms.saturating_mul(1 << shift)
    }
}

/// Run `op` until it succeeds, fails permanently, or runs out of attempts.
/// Only errors accepted by `retryable` are retried.
pub async fn run_with_retry<T, Retryable, Op, OpFut, Sleep, SleepFut>(
    policy: &RetryPolicy,
    retryable: Retryable,
    mut op: Op,
    mut sleep: Sleep,
) -> StoreResult<T>
where
    Retryable: Fn(&StoreError) -> bool,
    Op: FnMut() -> OpFut,
    OpFut: Future<Output = StoreResult<T>>,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if retryable(&e) && attempt < policy.max_attempts => {
                let delay = policy.delay_ms(attempt);
                tracing::warn!(attempt, delay_ms = delay, error = %e, "store call failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Browser sleep for `run_with_retry`
pub async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}
