//! # wayguard-core
//!
//! Core traits and route model for the wayguard navigation pipeline.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! authorization collaborators and subtree providers that don't need the
//! matcher, evaluator or orchestrator from `wayguard-std` and `wayguard`.
//!
//! # Building Blocks
//!
//! ## Guards ([`Guard`])
//!
//! A guard is a predicate evaluated before a navigation transition. It receives
//! a read-only [`NavigationContext`] and resolves to a [`GuardResult`]:
//! `Allow`, `Deny` or `DenyWithRedirect(target)`.
//!
//! - **Opaque**: the pipeline never looks inside a guard, it only awaits it
//! - **Async-first**: a synchronous guard is simply one whose future is ready
//!   on first poll
//! - **Type-erased**: nodes store guards as [`GuardRef`] (`Arc<dyn DynGuard>`)
//!
//! ## Routes ([`RouteNode`], [`RouteTree`])
//!
//! A static tree of route declarations. Each node carries a [`Segment`]
//! pattern, an opaque payload, ordered children and four guard lists
//! (load, child, activate, deactivate). A node may instead name a lazy
//! subtree that is fetched once through a [`SubtreeLoader`].
//!
//! ## Matches ([`MatchedChain`])
//!
//! The root-to-leaf list of nodes a request resolved to, with the parameters
//! each node bound.
//!
//! # Error Types
//!
//! - [`NavigationError`] - Top-level error for a failed navigation
//! - [`GuardFault`] - A guard failed instead of deciding
//! - [`LoadError`] - A lazy subtree could not be fetched
//! - [`RouteBuildError`] - A route declaration is malformed

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod chain;
mod context;
mod error;
mod guard;
mod loader;
mod phase;
mod redirect;
mod result;
mod route;

// Re-exports
pub use chain::{MatchedChain, MatchedRoute};
pub use context::{NavigationContext, NavigationRequest, Params};
pub use error::{BoxError, GuardFault, LoadError, NavigationError, RouteBuildError};
pub use guard::{DynGuard, Guard, GuardRef};
pub use loader::{DynSubtreeLoader, SubtreeLoader};
pub use phase::{GuardPhase, GuardPhases};
pub use redirect::Redirector;
pub use result::{GuardResult, IntoGuardResult};
pub use route::{RouteNode, RouteTree, Segment};
