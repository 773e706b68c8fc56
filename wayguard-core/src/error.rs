//! Error types for wayguard.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`NavigationError`] - Top-level error for a navigation that did not activate
//! - [`GuardFault`] - A guard failed instead of deciding
//! - [`LoadError`] - A lazy subtree could not be fetched
//! - [`RouteBuildError`] - A route declaration is malformed

use crate::phase::GuardPhase;
use std::sync::Arc;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error for a navigation that did not end in activation.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// No route matches the requested path.
    #[error("no route matches `{0}`")]
    NotFound(String),

    /// A guard denied the navigation.
    #[error("navigation to `{url}` was blocked")]
    Blocked {
        /// The URL that was denied.
        url: String,
        /// Where the user was sent instead, if anywhere.
        redirect_to: Option<String>,
    },

    /// A guard failed while deciding.
    #[error(transparent)]
    GuardFault(#[from] GuardFault),

    /// A lazy subtree could not be loaded.
    #[error(transparent)]
    LoadFailure(#[from] Arc<LoadError>),

    /// A newer navigation superseded this one.
    #[error("navigation was cancelled")]
    Cancelled,
}

/// A guard returned an error instead of a decision.
#[derive(Error, Debug)]
#[error("guard `{guard}` failed during {phase} check of `{route}`")]
pub struct GuardFault {
    /// Name of the failing guard.
    pub guard: String,
    /// Phase in which it was evaluated.
    pub phase: GuardPhase,
    /// Pattern path of the route the guard belongs to.
    pub route: String,
    /// The underlying error.
    #[source]
    pub source: BoxError,
}

/// Errors raised while resolving a lazy subtree.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The subtree provider failed.
    #[error("failed to load subtree `{source_ref}`")]
    Fetch {
        /// The provider reference of the lazy node.
        source_ref: String,
        /// The provider's error.
        #[source]
        source: BoxError,
    },

    /// The provider returned routes that fail validation.
    #[error("subtree `{source_ref}` is malformed")]
    Invalid {
        /// The provider reference of the lazy node.
        source_ref: String,
        /// What is wrong with the returned routes.
        #[source]
        source: RouteBuildError,
    },

    /// A lazy node was reached but no provider is configured.
    #[error("no subtree loader configured for `{0}`")]
    NoLoader(String),
}

/// Errors in route declarations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteBuildError {
    /// A lazy route also declares static children.
    #[error("lazy route `{0}` must not declare children")]
    LazyWithChildren(String),

    /// A `**` route has children or a lazy subtree.
    #[error("wildcard route must be a leaf")]
    WildcardNotLeaf,

    /// A `:` segment without a parameter name.
    #[error("parameter segment without a name")]
    EmptyParam,

    /// A pattern spans several segments; nest a child route instead.
    #[error("route pattern `{0}` must not contain `/`")]
    MultiSegment(String),
}
