//! Stopping conditions for a search run.
//!
//! The search loop itself only ends when a rollout finds a winning state.
//! Every call to [`MctsSearch::run`](crate::MctsSearch::run) therefore takes
//! a [`SearchLimit`]; limits are checked between iterations, never inside one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag a caller can flip to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a search stopped without finding a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    IterationLimit,
    Deadline,
    Cancelled,
}

/// Conditions under which a search gives up.
///
/// All configured conditions apply together; whichever trips first wins.
#[derive(Debug, Clone, Default)]
pub struct SearchLimit {
    pub max_iterations: Option<u64>,
    pub deadline: Option<Instant>,
    pub cancel: Option<CancelToken>,
}

impl SearchLimit {
    /// No limit at all: the search returns only when it finds a win.
    /// If no winning state is reachable, the call never returns.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stop after `n` iterations.
    pub fn iterations(n: u64) -> Self {
        Self::default().with_iterations(n)
    }

    /// Stop once `timeout` has elapsed from now.
    pub fn timeout(timeout: Duration) -> Self {
        Self::default().with_timeout(timeout)
    }

    /// Stop when `token` is cancelled.
    pub fn cancel(token: CancelToken) -> Self {
        Self::default().with_cancel(token)
    }

    /// Builder pattern: cap the iteration count.
    pub fn with_iterations(mut self, n: u64) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Builder pattern: set an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builder pattern: set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Builder pattern: attach a cancellation token.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// True if no condition is configured.
    pub fn is_unbounded(&self) -> bool {
        self.max_iterations.is_none() && self.deadline.is_none() && self.cancel.is_none()
    }

    /// Check the limit after `iterations` completed iterations.
    pub fn check(&self, iterations: u64) -> Option<StopReason> {
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                return Some(StopReason::Cancelled);
            }
        }
        if let Some(max) = self.max_iterations {
            if iterations >= max {
                return Some(StopReason::IterationLimit);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(StopReason::Deadline);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_stops() {
        let limit = SearchLimit::unbounded();
        assert!(limit.is_unbounded());
        assert_eq!(limit.check(u64::MAX), None);
    }

    #[test]
    fn test_iteration_limit() {
        let limit = SearchLimit::iterations(10);
        assert!(!limit.is_unbounded());
        assert_eq!(limit.check(9), None);
        assert_eq!(limit.check(10), Some(StopReason::IterationLimit));
    }

    #[test]
    fn test_deadline() {
        let limit = SearchLimit::default().with_deadline(Instant::now());
        assert_eq!(limit.check(0), Some(StopReason::Deadline));

        let limit = SearchLimit::timeout(Duration::from_secs(3600));
        assert_eq!(limit.check(0), None);
    }

    #[test]
    fn test_cancel_takes_priority() {
        let token = CancelToken::new();
        let limit = SearchLimit::iterations(5).with_cancel(token.clone());
        assert_eq!(limit.check(0), None);

        token.cancel();
        assert_eq!(limit.check(5), Some(StopReason::Cancelled));
    }
}
