//! # wayguard - Guarded Hierarchical Navigation
//!
//! `wayguard` resolves URLs against a tree of routes and decides, through
//! ordered asynchronous guards, whether each navigation may proceed.
//!
//! - Depth-first matching with backtracking over literal, `:param`, empty and
//!   `**` segments
//! - `canLoad`, `canActivateChild`, `canActivate` and `canDeactivate` guards,
//!   evaluated strictly in order with short-circuit on the first denial
//! - Lazy subtrees fetched once, on first use, behind their load guards
//! - A redirect intent store to send users back after they sign in
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wayguard::prelude::*;
//!
//! let signed_in = Arc::new(AtomicBool::new(false));
//! let auth = Arc::new(AuthGuard::new(signed_in.clone(), "/login"));
//!
//! let tree = RouteTree::new([
//!     RouteNode::path("login").payload(View::Login),
//!     RouteNode::path("admin").load_guard(auth.clone()).lazy("admin"),
//!     RouteNode::wildcard().payload(View::NotFound),
//! ])?;
//!
//! let navigator = Navigator::builder(tree).loader(chunks).build();
//! let outcome = navigator.navigate("/admin").await;
//! assert_eq!(outcome.redirect_to(), Some("/login"));
//! ```

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use wayguard_core::{
    // Errors
    BoxError,
    // Guards
    DynGuard,
    // Loading
    DynSubtreeLoader,
    Guard,
    GuardFault,
    // Phases
    GuardPhase,
    GuardPhases,
    GuardRef,
    GuardResult,
    IntoGuardResult,
    LoadError,
    // Matching
    MatchedChain,
    MatchedRoute,
    // Context
    NavigationContext,
    NavigationError,
    NavigationRequest,
    Params,
    // Side effects
    Redirector,
    RouteBuildError,
    // Route model
    RouteNode,
    RouteTree,
    Segment,
    SubtreeLoader,
};

// Static guard chains
pub use wayguard_std::{
    guard_chain,
    static_chain::{GuardChain, GuardList, HCons, HNil},
};

// Matching, evaluation and redirect intent
pub use wayguard_std::{
    evaluate,
    routing::{LoadPoint, MatchStep, PathMatcher},
    store::RedirectIntentStore,
};

mod orchestrator;

pub use orchestrator::{
    Denial, NavigationOutcome, Navigator, NavigatorBuilder, NavigatorConfig, Session,
};

/// Standard guard implementations.
pub mod guards {
    #![allow(clippy::wildcard_imports)]
    pub use wayguard_std::guards::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use wayguard_std::testing::*;
}

/// Prelude module - common imports for wayguard.
///
/// # Usage
///
/// ```rust,ignore
/// use wayguard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Outcomes
        Denial,
        // Core traits
        Guard,
        GuardPhase,
        GuardResult,
        NavigationContext,
        NavigationError,
        NavigationOutcome,
        // Orchestration
        Navigator,
        RedirectIntentStore,
        Redirector,
        // Route model
        RouteNode,
        RouteTree,
        Session,
        SubtreeLoader,
        guards::{AuthGuard, AuthState, async_guard_fn, guard_fn},
    };
}
