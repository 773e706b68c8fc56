//! Timeout guard for time-limited checks.

use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use wayguard_core::{BoxError, Guard, GuardResult, NavigationContext};

/// Error returned when a guard does not decide in time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("guard did not decide within {0:?}")]
pub struct GuardTimeout(pub Duration);

/// A guard that wraps another guard with a timeout.
///
/// An expired timer is reported as an error, so the navigation is blocked as
/// a guard fault rather than silently allowed or denied.
pub struct TimeoutGuard<G> {
    inner: G,
    duration: Duration,
}

impl<G> TimeoutGuard<G> {
    /// Create a new timeout guard.
    pub fn new(inner: G, duration: Duration) -> Self {
        Self { inner, duration }
    }
}

impl<G: Guard> Guard for TimeoutGuard<G> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        match timeout(self.duration, self.inner.check(ctx)).await {
            Ok(result) => result,
            Err(_) => Err(Box::new(GuardTimeout(self.duration))),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingGuard, GatedGuard};
    use std::sync::Arc;
    use wayguard_core::{GuardPhase, NavigationRequest};

    fn ctx() -> NavigationContext {
        NavigationContext::new(Arc::new(NavigationRequest::parse("/admin")), GuardPhase::Activate)
    }

    #[tokio::test]
    async fn test_fast_guard_passes_through() {
        let guard = TimeoutGuard::new(CountingGuard::deny(), Duration::from_secs(5));
        assert_eq!(guard.check(&ctx()).await.unwrap(), GuardResult::Deny);
    }

    #[tokio::test]
    async fn test_slow_guard_times_out() {
        let (gated, _gate) = GatedGuard::new(GuardResult::Allow);
        let guard = TimeoutGuard::new(gated, Duration::from_millis(10));

        let err = guard.check(&ctx()).await.unwrap_err();
        let timeout = err.downcast_ref::<GuardTimeout>().unwrap();
        assert_eq!(timeout.0, Duration::from_millis(10));
    }
}
