//! Wall-clock budget shared across search operators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A wall-clock budget with an optional external cancellation flag.
///
/// Operators check `expired()` between move evaluations, not just at pass
/// boundaries, so the search returns within a bounded latency margin of
/// its budget.
///
/// # Examples
///
/// ```
/// use cvrp_core::local_search::Deadline;
///
/// let deadline = Deadline::new(Some(5_000));
/// assert!(!deadline.expired());
///
/// let unbounded = Deadline::unbounded();
/// assert!(!unbounded.expired());
/// ```
#[derive(Debug, Clone)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Deadline {
    /// Starts a deadline now, expiring after `limit_ms` milliseconds.
    ///
    /// `None` never expires on time (cancellation still applies).
    pub fn new(limit_ms: Option<u64>) -> Self {
        Self {
            start: Instant::now(),
            limit: limit_ms.map(Duration::from_millis),
            cancel: None,
        }
    }

    /// A deadline with no time limit.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Attaches an external cancellation flag.
    ///
    /// Setting the flag to `true` expires the deadline at the next check.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns `true` once the time budget is spent or cancellation was
    /// requested.
    pub fn expired(&self) -> bool {
        self.time_expired() || self.is_cancelled()
    }

    /// Returns `true` once the time budget is spent.
    pub fn time_expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() >= limit)
    }

    /// Returns `true` if the cancellation flag was set.
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Time elapsed since the deadline started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_expires() {
        let deadline = Deadline::unbounded();
        assert!(!deadline.time_expired());
        assert!(!deadline.expired());
    }

    #[test]
    fn test_zero_budget_expires_immediately() {
        let deadline = Deadline::new(Some(0));
        assert!(deadline.time_expired());
        assert!(deadline.expired());
    }

    #[test]
    fn test_generous_budget_not_expired() {
        let deadline = Deadline::new(Some(60_000));
        assert!(!deadline.expired());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let deadline = Deadline::unbounded().with_cancel(Arc::clone(&flag));
        assert!(!deadline.expired());
        flag.store(true, Ordering::Relaxed);
        assert!(deadline.is_cancelled());
        assert!(deadline.expired());
        assert!(!deadline.time_expired());
    }

    #[test]
    fn test_elapsed_advances() {
        let deadline = Deadline::unbounded();
        std::thread::sleep(Duration::from_millis(2));
        assert!(deadline.elapsed() >= Duration::from_millis(1));
    }
}
