//! Logging wrappers for guard observation.
//!
//! Both wrappers are transparent unless the `tracing` feature is enabled.

use wayguard_core::{BoxError, Guard, GuardResult, NavigationContext};

/// A guard wrapper that logs every decision of the inner guard.
pub struct LoggingGuard<G> {
    inner: G,
}

impl<G: Guard> LoggingGuard<G> {
    /// Log the decisions of `inner`.
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: Guard> Guard for LoggingGuard<G> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        let result = self.inner.check(ctx).await;
        #[cfg(feature = "tracing")]
        {
            let guard = self.inner.name();
            match &result {
                Ok(decision) => tracing::debug!(
                    guard,
                    phase = %ctx.phase(),
                    route = ctx.route(),
                    ?decision,
                    "guard decided"
                ),
                Err(error) => tracing::warn!(
                    guard,
                    phase = %ctx.phase(),
                    route = ctx.route(),
                    %error,
                    "guard failed"
                ),
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = ctx; // Suppress unused warning
        }
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// A guard wrapper that runs the inner guard inside its own span.
pub struct TracingGuard<G> {
    inner: G,
}

impl<G: Guard> TracingGuard<G> {
    /// Trace the evaluation of `inner`.
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: Guard> Guard for TracingGuard<G> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        #[cfg(feature = "tracing")]
        {
            use tracing::Instrument;
            let span = tracing::debug_span!(
                "guard",
                guard = self.inner.name(),
                phase = %ctx.phase(),
                url = ctx.url()
            );
            self.inner.check(ctx).instrument(span).await
        }
        #[cfg(not(feature = "tracing"))]
        {
            self.inner.check(ctx).await
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
