//! Standard guards.
//!
//! - [`AuthGuard`]: allows authenticated users, sends the rest to a login page
//! - [`guard_fn`] / [`async_guard_fn`]: guards from closures
//! - [`NotGuard`], [`ConditionalGuard`]: combinators over other guards
//! - [`LoggingGuard`], [`TracingGuard`]: observation wrappers
//! - `TimeoutGuard` (feature `timeout`): bounds a guard's running time

pub mod auth;
pub mod conditional;
pub mod func;
pub mod logging;
#[cfg(feature = "timeout")]
pub mod timeout;

pub use auth::{AuthGuard, AuthState};
pub use conditional::{ConditionalGuard, NotGuard};
pub use func::{AsyncFnGuard, FnGuard, async_guard_fn, guard_fn};
pub use logging::{LoggingGuard, TracingGuard};
#[cfg(feature = "timeout")]
pub use timeout::{GuardTimeout, TimeoutGuard};
