//! # Path Matching
//!
//! This module resolves tokenized request paths against a [`RouteTree`]:
//!
//! - [`PathMatcher::match_path`]: pure matching over the routes resolved so far
//! - [`PathMatcher::step`]: the same descent, but it stops at the first lazy
//!   node whose subtree must be fetched before matching can continue
//!
//! # Matching Rules
//!
//! | Pattern | Consumes | Binds |
//! |---------|----------|-------|
//! | `"heroes"` | one equal segment | nothing |
//! | `":id"` | any one segment | `id` |
//! | `""` | nothing | nothing |
//! | `"**"` | all remaining segments | `**` |
//!
//! [`RouteTree`]: wayguard_core::RouteTree

pub mod matcher;

pub use matcher::{LoadPoint, MatchStep, PathMatcher};
