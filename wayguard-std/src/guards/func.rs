//! Guards built from closures.

use std::future::Future;
use wayguard_core::{BoxError, Guard, GuardResult, IntoGuardResult, NavigationContext};

/// A guard backed by a synchronous closure.
///
/// Created by [`guard_fn`].
pub struct FnGuard<F> {
    name: &'static str,
    func: F,
}

/// Wrap a synchronous closure as a guard.
///
/// The closure may return `bool`, [`GuardResult`] or a `Result` of either.
///
/// # Example
///
/// ```rust,ignore
/// let only_numeric = guard_fn("numeric-id", |ctx: &NavigationContext| {
///     ctx.param("id").is_some_and(|id| id.parse::<u32>().is_ok())
/// });
/// ```
pub fn guard_fn<F, R>(name: &'static str, func: F) -> FnGuard<F>
where
    F: Fn(&NavigationContext) -> R + Send + Sync + 'static,
    R: IntoGuardResult,
{
    FnGuard { name, func }
}

impl<F, R> Guard for FnGuard<F>
where
    F: Fn(&NavigationContext) -> R + Send + Sync + 'static,
    R: IntoGuardResult,
{
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        (self.func)(ctx).into_guard_result()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// A guard backed by an asynchronous closure.
///
/// Created by [`async_guard_fn`].
pub struct AsyncFnGuard<F> {
    name: &'static str,
    func: F,
}

/// Wrap an asynchronous closure as a guard.
///
/// The closure receives its own copy of the context so the returned future
/// does not borrow from the navigator.
///
/// # Example
///
/// ```rust,ignore
/// let remote = async_guard_fn("acl", move |ctx: NavigationContext| {
///     let acl = acl.clone();
///     async move { acl.permits(ctx.url()).await }
/// });
/// ```
pub fn async_guard_fn<F, Fut, R>(name: &'static str, func: F) -> AsyncFnGuard<F>
where
    F: Fn(NavigationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoGuardResult,
{
    AsyncFnGuard { name, func }
}

impl<F, Fut, R> Guard for AsyncFnGuard<F>
where
    F: Fn(NavigationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send,
    R: IntoGuardResult,
{
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        (self.func)(ctx.clone()).await.into_guard_result()
    }

    fn name(&self) -> &str {
        self.name
    }
}
