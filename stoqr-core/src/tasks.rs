//! Keyed async tasks and request sequencing
//!
//! Every API call runs as a task registered under a [`TaskKey`]:
//! - spawning under a key that is still running aborts the previous task
//! - debounced tasks wait before running and restart on every call
//! - view-owned tasks are cancelled as a group when the user navigates away
//!
//! Cancellation alone cannot stop a response that was already sent back, so
//! list results also carry a sequence number from [`RequestSeq`] and the
//! reducer drops anything that is not the latest.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic request counter.
///
/// The first issued number is 1, so 0 never matches a real request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// The most recently issued number (0 if none yet)
    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.0
    }
}

/// Runs keyed tasks and sends their result actions to the main loop.
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> TaskManager<A>
where
    A: Send + 'static,
{
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any running task with the same key.
    ///
    /// The action the future resolves to is sent to the action channel.
    /// An aborted task sends nothing.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.spawn_after(key.into(), None, future)
    }

    /// Spawn a task that waits `delay` first.
    ///
    /// Calling again with the same key before the delay expires restarts the
    /// wait with the new future.
    pub fn debounce<F>(&mut self, key: impl Into<TaskKey>, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.spawn_after(key.into(), Some(delay), future)
    }

    fn spawn_after<F>(&mut self, key: TaskKey, delay: Option<Duration>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        self.cancel(&key);
        self.tasks.retain(|_, handle| !handle.is_finished());

        tracing::trace!(task = %key, "spawning task");
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Cancel a task by key. Unknown keys are a no-op.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            if !handle.is_finished() {
                tracing::debug!(task = %key, "cancelling task");
            }
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task with this key is registered and has not finished
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks
            .get(key)
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Number of registered tasks (finished ones are pruned on the next spawn)
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
