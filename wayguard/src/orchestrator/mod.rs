//! # Navigation Orchestrator
//!
//! Ties matching, lazy loading and guard evaluation into one attempt per
//! navigation, and applies the redirect side effects of its outcome.
//!
//! - [`Navigator`]: the pipeline over one route tree
//! - [`Session`]: one user's navigations, newest wins
//! - [`NavigationOutcome`]: what an attempt ended in

pub(crate) mod config;
pub(crate) mod navigator;
pub(crate) mod outcome;
pub(crate) mod session;

pub use config::NavigatorConfig;
pub use navigator::{Navigator, NavigatorBuilder};
pub use outcome::{Denial, NavigationOutcome};
pub use session::Session;
