//! Lazy subtree providers.

use crate::{error::BoxError, route::RouteNode};
use std::{future::Future, pin::Pin};

/// Fetches the children of a lazy route node.
///
/// `source` is the opaque reference the node was declared with (a module
/// name, a chunk id, ...). The returned routes become the children of
/// exactly that node.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot load subtrees of `RouteNode<{P}>`",
    label = "missing `SubtreeLoader` implementation",
    note = "Implement `SubtreeLoader<{P}>` to resolve lazy routes."
)]
pub trait SubtreeLoader<P>: Send + Sync + 'static {
    /// Fetch the children for `source`.
    fn load(
        &self,
        source: &str,
    ) -> impl Future<Output = Result<Vec<RouteNode<P>>, BoxError>> + Send;
}

/// Object-safe version of [`SubtreeLoader`].
pub trait DynSubtreeLoader<P>: Send + Sync + 'static {
    /// Fetch the children for `source` (dynamic dispatch version).
    fn load_dyn<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RouteNode<P>>, BoxError>> + Send + 'a>>;
}

impl<P, T> DynSubtreeLoader<P> for T
where
    P: 'static,
    T: SubtreeLoader<P>,
{
    fn load_dyn<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RouteNode<P>>, BoxError>> + Send + 'a>> {
        Box::pin(self.load(source))
    }
}
