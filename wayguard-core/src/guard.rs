//! # Guards
//!
//! The lowest-level extension point of the pipeline.
//!
//! A guard is analogous to a middleware predicate: it receives the navigation
//! context and decides whether the transition may proceed. Every access rule,
//! whether it checks a session flag in memory or asks a remote service, is a
//! `Guard`.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Guard`] uses native `async fn` for zero-cost static dispatch, which is
//! what combinators such as timeouts and chains build on. Route nodes hold a
//! heterogeneous list of guards, so they store the object-safe [`DynGuard`]
//! behind [`GuardRef`].

use crate::{context::NavigationContext, error::BoxError, result::GuardResult};
use std::{future::Future, pin::Pin, sync::Arc};

/// A shared, type-erased guard as stored on route nodes.
pub type GuardRef = Arc<dyn DynGuard>;

/// A predicate evaluated before permitting a navigation transition.
///
/// Implementations may resolve immediately or after awaiting I/O. The
/// pipeline awaits each guard to completion before invoking the next one, so
/// a guard may carry side effects that depend on its position in the list.
///
/// Returning `Err` is a *fault*, not a denial: the pipeline blocks the
/// navigation and surfaces the error to the caller for diagnostics.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Guard`",
    label = "missing `Guard` implementation",
    note = "Guards must implement `check` returning a `GuardResult`."
)]
pub trait Guard: Send + Sync + 'static {
    /// Decide whether the navigation described by `ctx` may proceed.
    fn check(
        &self,
        ctx: &NavigationContext,
    ) -> impl Future<Output = Result<GuardResult, BoxError>> + Send;

    /// Name used in diagnostics and logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Dynamic object-safe version of [`Guard`].
pub trait DynGuard: Send + Sync + 'static {
    /// Decide whether the navigation may proceed (dynamic dispatch version).
    fn check_dyn<'a>(
        &'a self,
        ctx: &'a NavigationContext,
    ) -> Pin<Box<dyn Future<Output = Result<GuardResult, BoxError>> + Send + 'a>>;

    /// Name used in diagnostics and logs.
    fn name_dyn(&self) -> &str;
}

// Blanket implementation: Any type implementing Guard implements DynGuard automatically.
impl<T: Guard> DynGuard for T {
    fn check_dyn<'a>(
        &'a self,
        ctx: &'a NavigationContext,
    ) -> Pin<Box<dyn Future<Output = Result<GuardResult, BoxError>> + Send + 'a>> {
        Box::pin(self.check(ctx))
    }

    fn name_dyn(&self) -> &str {
        self.name()
    }
}

// Allow GuardRef to be used where Guard is expected.
impl Guard for Arc<dyn DynGuard> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        self.check_dyn(ctx).await
    }

    fn name(&self) -> &str {
        self.name_dyn()
    }
}

// One guard instance shared between several nodes.
impl<T: Guard> Guard for Arc<T> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        T::check(self, ctx).await
    }

    fn name(&self) -> &str {
        T::name(self)
    }
}
