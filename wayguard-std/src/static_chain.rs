//! Static guard chains.
//!
//! [`GuardChain`] attaches a fixed list of guards to a route node as one
//! guard. The list is an HList of concrete guard types, so evaluating it
//! boxes no future.
//!
//! Evaluation follows the same rules as [`evaluate`](crate::evaluate()):
//! sequential, first non-`Allow` decision wins, errors propagate. The chain
//! is named after its members (`[AuthGuard, audit]`), so a fault raised by
//! any of them is attributed to the chain as a whole.

use std::future::Future;
use wayguard_core::{BoxError, Guard, GuardResult, NavigationContext};

/// End of a guard list.
pub struct HNil;

/// A guard followed by the rest of the list.
pub struct HCons<H, T> {
    /// The guard evaluated first.
    pub head: H,
    /// The guards evaluated after it.
    pub tail: T,
}

/// A compile-time list of guards evaluated in order.
pub trait GuardList: Send + Sync + 'static {
    /// Evaluate every guard in order until one does not allow.
    fn check_all(
        &self,
        ctx: &NavigationContext,
    ) -> impl Future<Output = Result<GuardResult, BoxError>> + Send;

    /// Append the member names, in evaluation order.
    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>);
}

impl GuardList for HNil {
    async fn check_all(&self, _ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        Ok(GuardResult::Allow)
    }

    fn collect_names<'a>(&'a self, _names: &mut Vec<&'a str>) {}
}

impl<H: Guard, T: GuardList> GuardList for HCons<H, T> {
    async fn check_all(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        match self.head.check(ctx).await? {
            GuardResult::Allow => self.tail.check_all(ctx).await,
            denied => Ok(denied),
        }
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        names.push(self.head.name());
        self.tail.collect_names(names);
    }
}

/// A fixed guard list acting as a single [`Guard`].
///
/// Usually built with [`guard_chain!`](crate::guard_chain).
pub struct GuardChain<L> {
    guards: L,
    name: String,
}

impl<L: GuardList> GuardChain<L> {
    /// Wrap `guards`, naming the chain after its members.
    pub fn new(guards: L) -> Self {
        let mut names = Vec::new();
        guards.collect_names(&mut names);
        let name = format!("[{}]", names.join(", "));
        Self { guards, name }
    }

    /// The wrapped list.
    pub fn guards(&self) -> &L {
        &self.guards
    }
}

impl<L: GuardList> Guard for GuardChain<L> {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        self.guards.check_all(ctx).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build a [`GuardChain`] from a list of guards.
///
/// # Example
/// ```ignore
/// let node = RouteNode::path("admin").activate_guard(guard_chain![auth, audit]);
/// ```
#[macro_export]
macro_rules! guard_chain {
    (@list) => { $crate::static_chain::HNil };
    (@list $guard:expr $(, $rest:expr)*) => {
        $crate::static_chain::HCons {
            head: $guard,
            tail: $crate::guard_chain!(@list $($rest),*),
        }
    };
    ($($guard:expr),* $(,)?) => {
        $crate::static_chain::GuardChain::new($crate::guard_chain!(@list $($guard),*))
    };
}
