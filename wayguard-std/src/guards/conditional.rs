//! Guard combinators.

use wayguard_core::{BoxError, Guard, GuardResult, NavigationContext};

/// Inverts a guard: allows what it denies and denies what it allows.
///
/// A denial of the inverted guard never carries a redirect target. Errors
/// from the inner guard pass through unchanged.
pub struct NotGuard<G> {
    inner: G,
}

impl<G: Guard> NotGuard<G> {
    /// Invert `inner`.
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: Guard> Guard for NotGuard<G> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        let result = self.inner.check(ctx).await?;
        Ok((!result.is_allowed()).into())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Runs the inner guard only when the predicate holds; allows otherwise.
///
/// # Example
///
/// ```rust,ignore
/// // Only the edit view of a crisis requires a second check.
/// let guard = ConditionalGuard::new(
///     |ctx: &NavigationContext| ctx.url().ends_with("/edit"),
///     EditorGuard,
/// );
/// ```
pub struct ConditionalGuard<C, G> {
    condition: C,
    inner: G,
}

impl<C, G> ConditionalGuard<C, G>
where
    C: Fn(&NavigationContext) -> bool + Send + Sync + 'static,
    G: Guard,
{
    /// Apply `inner` only to navigations matching `condition`.
    pub fn new(condition: C, inner: G) -> Self {
        Self { condition, inner }
    }
}

impl<C, G> Guard for ConditionalGuard<C, G>
where
    C: Fn(&NavigationContext) -> bool + Send + Sync + 'static,
    G: Guard,
{
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        if (self.condition)(ctx) {
            self.inner.check(ctx).await
        } else {
            Ok(GuardResult::Allow)
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
