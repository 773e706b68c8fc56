//! # Route Declarations
//!
//! The static tree the matcher walks.
//!
//! Nodes own their children and never point back at their parents; the
//! ancestors of a match are recovered from the [`MatchedChain`] the matcher
//! produces instead.
//!
//! A lazy node names a subtree source rather than declaring children. Its
//! children are fetched on first use through a [`DynSubtreeLoader`] and
//! memoized in the node, so every later navigation (and every navigation
//! waiting concurrently on the first fetch) sees the same subtree.
//!
//! [`MatchedChain`]: crate::MatchedChain

use crate::{
    context::Params,
    error::{LoadError, RouteBuildError},
    guard::{Guard, GuardRef},
    loader::DynSubtreeLoader,
};
use std::{fmt, sync::Arc};
use tokio::sync::OnceCell;

/// The pattern a route node matches against one request segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches a segment equal to the string.
    Literal(String),
    /// Matches any one segment and binds it to the name.
    Param(String),
    /// Matches every remaining segment, including none.
    Wildcard,
    /// Matches without consuming a segment (index and grouping routes).
    Empty,
}

impl Segment {
    /// Parse a route pattern: `""`, `"**"`, `":name"` or a literal.
    pub fn parse(pattern: &str) -> Self {
        match pattern {
            "" => Self::Empty,
            "**" => Self::Wildcard,
            _ => match pattern.strip_prefix(':') {
                Some(name) => Self::Param(name.to_owned()),
                None => Self::Literal(pattern.to_owned()),
            },
        }
    }

    /// Try to match the head of `segments`.
    ///
    /// Returns how many segments were consumed and what was bound.
    pub fn consume<S: AsRef<str>>(&self, segments: &[S]) -> Option<(usize, Params)> {
        match self {
            Self::Literal(literal) => {
                let first: &str = segments.first()?.as_ref();
                (first == literal.as_str()).then(|| (1, Params::new()))
            }
            Self::Param(name) => {
                let first: &str = segments.first()?.as_ref();
                let mut params = Params::new();
                params.insert(name.as_str(), first);
                Some((1, params))
            }
            Self::Wildcard => {
                let rest: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
                let mut params = Params::new();
                params.insert("**", rest.join("/"));
                Some((segments.len(), params))
            }
            Self::Empty => Some((0, Params::new())),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Param(name) => write!(f, ":{name}"),
            Self::Wildcard => f.write_str("**"),
            Self::Empty => Ok(()),
        }
    }
}

/// Children fetched on first use.
struct LazyChildren<P> {
    source: String,
    resolved: OnceCell<Vec<Arc<RouteNode<P>>>>,
}

/// A node of the route tree.
///
/// Built fluently:
///
/// ```rust,ignore
/// let admin = RouteNode::path("admin")
///     .child_guard(auth.clone())
///     .child(RouteNode::index().payload(View::Dashboard))
///     .child(RouteNode::path("crises").payload(View::ManageCrises));
/// ```
pub struct RouteNode<P> {
    segment: Segment,
    payload: Option<P>,
    children: Vec<Arc<RouteNode<P>>>,
    load_guards: Vec<GuardRef>,
    child_guards: Vec<GuardRef>,
    activate_guards: Vec<GuardRef>,
    deactivate_guards: Vec<GuardRef>,
    lazy: Option<LazyChildren<P>>,
}

impl<P> RouteNode<P> {
    /// A node matching `pattern` (see [`Segment::parse`]).
    pub fn path(pattern: &str) -> Self {
        Self::with_segment(Segment::parse(pattern))
    }

    /// An empty-pattern node: an index route when it is a leaf, a grouping
    /// route when it has children.
    pub fn index() -> Self {
        Self::with_segment(Segment::Empty)
    }

    /// A `**` catch-all leaf.
    pub fn wildcard() -> Self {
        Self::with_segment(Segment::Wildcard)
    }

    /// A node matching `segment`.
    pub fn with_segment(segment: Segment) -> Self {
        Self {
            segment,
            payload: None,
            children: Vec::new(),
            load_guards: Vec::new(),
            child_guards: Vec::new(),
            activate_guards: Vec::new(),
            deactivate_guards: Vec::new(),
            lazy: None,
        }
    }

    /// Attach the value handed back when this node is the terminal match.
    pub fn payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Append a child route.
    pub fn child(mut self, child: RouteNode<P>) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Append several child routes, keeping their order.
    pub fn children(mut self, children: impl IntoIterator<Item = RouteNode<P>>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    /// Fetch this node's children from `source` on first use.
    pub fn lazy(mut self, source: impl Into<String>) -> Self {
        self.lazy = Some(LazyChildren {
            source: source.into(),
            resolved: OnceCell::new(),
        });
        self
    }

    /// Guard checked before the lazy subtree is fetched (`canLoad`).
    pub fn load_guard<G: Guard>(mut self, guard: G) -> Self {
        self.load_guards.push(Arc::new(guard));
        self
    }

    /// Guard checked when entering any descendant (`canActivateChild`).
    pub fn child_guard<G: Guard>(mut self, guard: G) -> Self {
        self.child_guards.push(Arc::new(guard));
        self
    }

    /// Guard checked when this node is the terminal match (`canActivate`).
    pub fn activate_guard<G: Guard>(mut self, guard: G) -> Self {
        self.activate_guards.push(Arc::new(guard));
        self
    }

    /// Guard checked when leaving this node (`canDeactivate`).
    pub fn deactivate_guard<G: Guard>(mut self, guard: G) -> Self {
        self.deactivate_guards.push(Arc::new(guard));
        self
    }

    /// The segment pattern.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// The attached payload, if any.
    pub fn payload_ref(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// The node's children.
    ///
    /// For a lazy node this is empty until the subtree has been resolved.
    pub fn child_routes(&self) -> &[Arc<RouteNode<P>>] {
        match &self.lazy {
            Some(lazy) => lazy.resolved.get().map(Vec::as_slice).unwrap_or(&[]),
            None => &self.children,
        }
    }

    /// `canLoad` guards, in declaration order.
    pub fn load_guards(&self) -> &[GuardRef] {
        &self.load_guards
    }

    /// `canActivateChild` guards, in declaration order.
    pub fn child_guards(&self) -> &[GuardRef] {
        &self.child_guards
    }

    /// `canActivate` guards, in declaration order.
    pub fn activate_guards(&self) -> &[GuardRef] {
        &self.activate_guards
    }

    /// `canDeactivate` guards, in declaration order.
    pub fn deactivate_guards(&self) -> &[GuardRef] {
        &self.deactivate_guards
    }

    /// The lazy subtree source, if this node is lazy.
    pub fn lazy_source(&self) -> Option<&str> {
        self.lazy.as_ref().map(|lazy| lazy.source.as_str())
    }

    /// Whether matching must fetch this node's subtree before descending.
    pub fn needs_load(&self) -> bool {
        self.lazy
            .as_ref()
            .is_some_and(|lazy| !lazy.resolved.initialized())
    }

    /// Check this node and its static descendants for malformed declarations.
    pub fn validate(&self) -> Result<(), RouteBuildError> {
        match &self.segment {
            Segment::Param(name) if name.is_empty() => return Err(RouteBuildError::EmptyParam),
            Segment::Literal(text) | Segment::Param(text) if text.contains('/') => {
                return Err(RouteBuildError::MultiSegment(self.segment.to_string()));
            }
            _ => {}
        }
        if self.segment == Segment::Wildcard && (!self.children.is_empty() || self.lazy.is_some())
        {
            return Err(RouteBuildError::WildcardNotLeaf);
        }
        if let Some(lazy) = &self.lazy {
            if !self.children.is_empty() {
                return Err(RouteBuildError::LazyWithChildren(lazy.source.clone()));
            }
        }
        self.children.iter().try_for_each(|child| child.validate())
    }
}

impl<P: Send + Sync + 'static> RouteNode<P> {
    /// Resolve the children of a lazy node, fetching them at most once.
    ///
    /// Concurrent callers wait on a single fetch and all observe its
    /// result. A failed fetch is not memoized; the next caller retries.
    /// Non-lazy nodes return their static children immediately.
    pub async fn resolve_children(
        &self,
        loader: &dyn DynSubtreeLoader<P>,
    ) -> Result<&[Arc<RouteNode<P>>], LoadError> {
        let Some(lazy) = &self.lazy else {
            return Ok(self.children.as_slice());
        };
        let children = lazy
            .resolved
            .get_or_try_init(|| async {
                let nodes =
                    loader
                        .load_dyn(&lazy.source)
                        .await
                        .map_err(|source| LoadError::Fetch {
                            source_ref: lazy.source.clone(),
                            source,
                        })?;
                for node in &nodes {
                    node.validate().map_err(|source| LoadError::Invalid {
                        source_ref: lazy.source.clone(),
                        source,
                    })?;
                }
                Ok::<_, LoadError>(nodes.into_iter().map(Arc::new).collect())
            })
            .await?;
        Ok(children.as_slice())
    }
}

impl<P> fmt::Debug for RouteNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("segment", &self.segment)
            .field("has_payload", &self.payload.is_some())
            .field("children", &self.child_routes().len())
            .field("load_guards", &self.load_guards.len())
            .field("child_guards", &self.child_guards.len())
            .field("activate_guards", &self.activate_guards.len())
            .field("deactivate_guards", &self.deactivate_guards.len())
            .field("lazy", &self.lazy_source())
            .finish()
    }
}

/// The top-level list of routes.
pub struct RouteTree<P> {
    routes: Vec<Arc<RouteNode<P>>>,
}

impl<P> RouteTree<P> {
    /// Build a tree from top-level routes, validating every declaration.
    pub fn new(routes: impl IntoIterator<Item = RouteNode<P>>) -> Result<Self, RouteBuildError> {
        let routes: Vec<_> = routes.into_iter().map(Arc::new).collect();
        routes.iter().try_for_each(|route| route.validate())?;
        Ok(Self { routes })
    }

    /// The top-level routes, in declaration order.
    pub fn routes(&self) -> &[Arc<RouteNode<P>>] {
        &self.routes
    }

    /// Whether the tree declares no routes at all.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<P> fmt::Debug for RouteTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}
