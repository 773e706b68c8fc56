//! Depth-first, leftmost-first route matcher with backtracking.

use std::sync::Arc;
use wayguard_core::{MatchedChain, MatchedRoute, RouteNode, RouteTree};

/// A lazy node the matcher has to descend into but cannot yet.
pub struct LoadPoint<P> {
    /// The unresolved lazy node.
    pub node: Arc<RouteNode<P>>,
    /// The partial chain from the top of the tree down to and including `node`.
    pub chain: MatchedChain<P>,
}

/// The result of one matching attempt.
pub enum MatchStep<P> {
    /// The whole request was consumed.
    Matched(MatchedChain<P>),
    /// No route consumes the whole request.
    NotFound,
    /// Matching reached an unresolved lazy node; resolve it and step again.
    NeedsLoad(LoadPoint<P>),
}

impl<P> std::fmt::Debug for MatchStep<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched(chain) => f.debug_tuple("Matched").field(chain).finish(),
            Self::NotFound => f.write_str("NotFound"),
            Self::NeedsLoad(point) => f
                .debug_struct("NeedsLoad")
                .field("source", &point.node.lazy_source())
                .field("chain", &point.chain)
                .finish(),
        }
    }
}

/// Outcome of descending into one list of siblings.
enum Descent<P> {
    Found,
    Miss,
    Pending(Arc<RouteNode<P>>),
}

/// Matches request segments against a route tree.
///
/// Children are tried in declaration order. When a child's subtree cannot
/// consume the rest of the request the matcher backtracks and tries the next
/// sibling. A partial match is never returned.
///
/// # Example
///
/// ```rust,ignore
/// let chain = PathMatcher::new(&tree).match_path(&["admin", "crises"]);
/// assert_eq!(chain.patterns(), ["admin", "crises"]);
/// ```
pub struct PathMatcher<'t, P> {
    tree: &'t RouteTree<P>,
}

impl<'t, P> PathMatcher<'t, P> {
    /// Create a matcher over `tree`.
    pub fn new(tree: &'t RouteTree<P>) -> Self {
        Self { tree }
    }

    /// Match `segments` against the routes resolved so far.
    ///
    /// An unresolved lazy node has no children yet, so a request that needs
    /// to descend into one does not match. Returns an empty chain when
    /// nothing matches.
    pub fn match_path<S: AsRef<str>>(&self, segments: &[S]) -> MatchedChain<P> {
        let mut trail = Vec::new();
        match descend(self.tree.routes(), segments, &mut trail, false) {
            Descent::Found => MatchedChain::new(trail),
            Descent::Miss | Descent::Pending(_) => MatchedChain::empty(),
        }
    }

    /// Match `segments`, stopping at the first lazy node that must be
    /// resolved before matching can continue.
    pub fn step<S: AsRef<str>>(&self, segments: &[S]) -> MatchStep<P> {
        let mut trail = Vec::new();
        match descend(self.tree.routes(), segments, &mut trail, true) {
            Descent::Found => MatchStep::Matched(MatchedChain::new(trail)),
            Descent::Miss => MatchStep::NotFound,
            Descent::Pending(node) => MatchStep::NeedsLoad(LoadPoint {
                node,
                chain: MatchedChain::new(trail),
            }),
        }
    }
}

fn descend<P, S: AsRef<str>>(
    routes: &[Arc<RouteNode<P>>],
    segments: &[S],
    trail: &mut Vec<MatchedRoute<P>>,
    stop_at_lazy: bool,
) -> Descent<P> {
    for route in routes {
        let Some((consumed, params)) = route.segment().consume(segments) else {
            continue;
        };
        let rest = &segments[consumed..];
        trail.push(MatchedRoute::new(Arc::clone(route), params));

        if stop_at_lazy && route.needs_load() {
            return Descent::Pending(Arc::clone(route));
        }

        let children = route.child_routes();
        let result = if children.is_empty() {
            if rest.is_empty() {
                Descent::Found
            } else {
                Descent::Miss
            }
        } else {
            descend(children, rest, trail, stop_at_lazy)
        };

        match result {
            Descent::Miss => {
                trail.pop();
            }
            found_or_pending => return found_or_pending,
        }
    }
    Descent::Miss
}
