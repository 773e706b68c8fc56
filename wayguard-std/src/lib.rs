//! # wayguard-std
//!
//! Standard implementations for the wayguard navigation pipeline.
//!
//! This crate provides:
//! - **Path matching**: [`PathMatcher`] with [`MatchStep`] for lazy descent
//! - **Guard evaluation**: [`evaluate()`], sequential and short-circuiting
//! - **Static chains**: [`GuardChain`] over [`HCons`]/[`HNil`], [`guard_chain!`] macro
//! - **Standard guards**: Auth, closures, Not, Conditional, Logging, Timeout
//! - **Redirect intent**: [`RedirectIntentStore`]
//! - **Testing utilities**: [`testing`]
//!
//! [`PathMatcher`]: routing::PathMatcher
//! [`MatchStep`]: routing::MatchStep
//! [`GuardChain`]: static_chain::GuardChain
//! [`HCons`]: static_chain::HCons
//! [`HNil`]: static_chain::HNil
//! [`RedirectIntentStore`]: store::RedirectIntentStore

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use wayguard_core;

// Modules
pub mod evaluate;
pub mod guards;
pub mod routing;
pub mod static_chain;
pub mod store;
pub mod testing;

pub use evaluate::evaluate;
