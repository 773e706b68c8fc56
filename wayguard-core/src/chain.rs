//! Matched route chains.

use crate::{
    context::{NavigationContext, NavigationRequest, Params},
    phase::GuardPhase,
    route::{RouteNode, Segment},
};
use std::{fmt, sync::Arc};

/// One level of a match: the node and the parameters it bound.
pub struct MatchedRoute<P> {
    node: Arc<RouteNode<P>>,
    params: Params,
}

impl<P> MatchedRoute<P> {
    /// Pair a node with the parameters its segment bound.
    pub fn new(node: Arc<RouteNode<P>>, params: Params) -> Self {
        Self { node, params }
    }

    /// The matched node.
    pub fn node(&self) -> &Arc<RouteNode<P>> {
        &self.node
    }

    /// Parameters bound by this node's own segment.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl<P> Clone for MatchedRoute<P> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
            params: self.params.clone(),
        }
    }
}

impl<P> PartialEq for MatchedRoute<P> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node) && self.params == other.params
    }
}

impl<P> fmt::Debug for MatchedRoute<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchedRoute")
            .field("segment", self.node.segment())
            .field("params", &self.params)
            .finish()
    }
}

/// The root-to-leaf routes a request resolved to.
///
/// Every entry is a child of the entry before it. An empty chain means
/// nothing matched.
pub struct MatchedChain<P> {
    routes: Vec<MatchedRoute<P>>,
}

impl<P> MatchedChain<P> {
    /// Wrap an ordered root-to-leaf list of matches.
    pub fn new(routes: Vec<MatchedRoute<P>>) -> Self {
        Self { routes }
    }

    /// The chain of a request that matched nothing.
    pub fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of matched levels.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// All matched levels, root first.
    pub fn routes(&self) -> &[MatchedRoute<P>] {
        &self.routes
    }

    /// Iterate over the matched levels, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchedRoute<P>> {
        self.routes.iter()
    }

    /// The deepest match.
    pub fn terminal(&self) -> Option<&MatchedRoute<P>> {
        self.routes.last()
    }

    /// Every level above the terminal match.
    pub fn ancestors(&self) -> &[MatchedRoute<P>] {
        match self.routes.split_last() {
            Some((_, ancestors)) => ancestors,
            None => &[],
        }
    }

    /// The terminal node's payload.
    pub fn payload(&self) -> Option<&P> {
        self.terminal().and_then(|route| route.node.payload_ref())
    }

    /// All bound parameters; deeper bindings shadow shallower ones.
    pub fn params(&self) -> Params {
        merged_params(&self.routes)
    }

    /// Segment patterns of every level, e.g. `["admin", "", "crises"]`.
    pub fn patterns(&self) -> Vec<String> {
        self.routes
            .iter()
            .map(|route| route.node.segment().to_string())
            .collect()
    }

    /// Pattern path of the whole chain, e.g. `/admin/crises`.
    pub fn route_path(&self) -> String {
        route_path(&self.routes)
    }

    /// Number of leading levels `other` keeps active: the same node bound
    /// to the same parameters.
    pub fn shared_prefix(&self, other: &MatchedChain<P>) -> usize {
        self.routes
            .iter()
            .zip(&other.routes)
            .take_while(|(ours, theirs)| ours == theirs)
            .count()
    }

    /// Build the context for the guards of the level at `index`.
    ///
    /// The context's route and parameters cover levels `0..=index`.
    pub fn context_at(
        &self,
        request: &Arc<NavigationRequest>,
        phase: GuardPhase,
        index: usize,
    ) -> NavigationContext {
        let prefix = &self.routes[..(index + 1).min(self.routes.len())];
        NavigationContext::new(Arc::clone(request), phase).at_route(
            route_path(prefix),
            prefix.len(),
            merged_params(prefix),
        )
    }
}

fn merged_params<P>(routes: &[MatchedRoute<P>]) -> Params {
    let mut params = Params::new();
    for route in routes {
        params.extend(&route.params);
    }
    params
}

fn route_path<P>(routes: &[MatchedRoute<P>]) -> String {
    let parts: Vec<String> = routes
        .iter()
        .map(|route| route.node.segment())
        .filter(|segment| **segment != Segment::Empty)
        .map(ToString::to_string)
        .collect();
    format!("/{}", parts.join("/"))
}

impl<P> Clone for MatchedChain<P> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
        }
    }
}

impl<P> PartialEq for MatchedChain<P> {
    fn eq(&self, other: &Self) -> bool {
        self.routes == other.routes
    }
}

impl<P> fmt::Debug for MatchedChain<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}

impl<'a, P> IntoIterator for &'a MatchedChain<P> {
    type Item = &'a MatchedRoute<P>;
    type IntoIter = std::slice::Iter<'a, MatchedRoute<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
