//! # Navigation Context
//!
//! The read-only snapshot handed to every guard.
//!
//! A [`NavigationRequest`] is parsed once per navigation attempt and shared
//! by reference count. Each guard evaluation point then gets a
//! [`NavigationContext`] that pairs the request with the phase being checked,
//! the route the guard is attached to, and the parameters bound up to and
//! including that route.

use crate::phase::GuardPhase;
use std::{collections::BTreeMap, sync::Arc};

/// Parameters bound by `:name` and `**` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a bound parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Merge `other` into `self`; bindings in `other` win.
    pub fn extend(&mut self, other: &Params) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A requested URL, tokenized once per navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    url: String,
    path: String,
    segments: Vec<String>,
}

impl NavigationRequest {
    /// Tokenize `url` into path segments.
    ///
    /// Any `?query` or `#fragment` is dropped from the path, and empty
    /// segments produced by leading, repeated or trailing slashes are skipped.
    /// The full URL is kept as given so it can be remembered for a later
    /// redirect back.
    pub fn parse(url: impl Into<String>) -> Self {
        let url = url.into();
        let end = url.find(['?', '#']).unwrap_or(url.len());
        let path = url[..end].to_owned();
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self {
            url,
            path,
            segments,
        }
    }

    /// The URL exactly as requested.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The path portion of the URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The non-empty path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// What a guard sees when it is invoked.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    request: Arc<NavigationRequest>,
    phase: GuardPhase,
    route: String,
    depth: usize,
    params: Params,
}

impl NavigationContext {
    /// Create a context for the top of the route tree.
    pub fn new(request: Arc<NavigationRequest>, phase: GuardPhase) -> Self {
        Self {
            request,
            phase,
            route: String::from("/"),
            depth: 0,
            params: Params::new(),
        }
    }

    /// Point the context at the route `route`, `depth` levels below the top.
    pub fn at_route(mut self, route: impl Into<String>, depth: usize, params: Params) -> Self {
        self.route = route.into();
        self.depth = depth;
        self.params = params;
        self
    }

    /// The request being navigated to.
    pub fn request(&self) -> &NavigationRequest {
        &self.request
    }

    /// Shorthand for `request().url()`.
    pub fn url(&self) -> &str {
        self.request.url()
    }

    /// The phase being checked.
    pub fn phase(&self) -> GuardPhase {
        self.phase
    }

    /// Pattern path of the route the evaluated guard list belongs to,
    /// e.g. `/crisis-center/:id`.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Number of matched routes above and including the evaluated one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Parameters bound from the top of the tree down to the evaluated route.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Shorthand for `params().get(name)`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}
