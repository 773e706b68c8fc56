//! Testing utilities for wayguard.
//!
//! This module provides guards, loaders and redirectors that make the
//! navigation pipeline observable in tests.
//!
//! # Features
//!
//! - [`CountingGuard`]: A guard with a fixed decision that counts its calls
//! - [`RecordingGuard`]: A guard that records every context it sees into a [`GuardLog`]
//! - [`FailingGuard`]: A guard that always errors
//! - [`GatedGuard`]: A guard that waits until its [`Gate`] is released
//! - [`StaticLoader`] / [`FailingLoader`]: Subtree providers that count fetches
//! - [`RecordingRedirector`]: A redirector that records every target

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::sync::Notify;
use wayguard_core::{
    BoxError, Guard, GuardPhase, GuardResult, NavigationContext, Redirector, RouteNode,
    SubtreeLoader,
};

// ============================================================================
// Counting Guard
// ============================================================================

/// A guard that returns a fixed decision and counts invocations.
///
/// Clones share the counter, so keep one clone for assertions and hand the
/// other to the route tree.
///
/// # Example
///
/// ```rust,ignore
/// let guard = CountingGuard::deny();
/// let node = RouteNode::path("admin").activate_guard(guard.clone());
///
/// // navigate...
///
/// assert_eq!(guard.count(), 1);
/// ```
#[derive(Clone)]
pub struct CountingGuard {
    result: GuardResult,
    count: Arc<AtomicUsize>,
}

impl CountingGuard {
    /// A counting guard that always allows.
    pub fn allow() -> Self {
        Self::with_result(GuardResult::Allow)
    }

    /// A counting guard that always denies without a redirect target.
    pub fn deny() -> Self {
        Self::with_result(GuardResult::Deny)
    }

    /// A counting guard that always returns `result`.
    pub fn with_result(result: GuardResult) -> Self {
        Self {
            result,
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Guard for CountingGuard {
    async fn check(&self, _ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

// ============================================================================
// Recording Guard
// ============================================================================

/// One guard invocation as seen by a [`RecordingGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardCall {
    /// The label of the guard that was invoked.
    pub label: String,
    /// The phase it was evaluated in.
    pub phase: GuardPhase,
    /// The pattern path of the route it belongs to.
    pub route: String,
    /// The requested URL.
    pub url: String,
}

/// A shared, ordered log of guard invocations.
#[derive(Clone, Default)]
pub struct GuardLog {
    calls: Arc<Mutex<Vec<GuardCall>>>,
}

impl GuardLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<GuardCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The labels of the recorded calls, in invocation order.
    pub fn labels(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.label.clone())
            .collect()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: GuardCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// A guard that records every invocation into a shared [`GuardLog`].
///
/// Several recording guards writing to one log capture the exact order in
/// which the pipeline evaluated them.
///
/// # Example
///
/// ```rust,ignore
/// let log = GuardLog::new();
/// let admin = RouteNode::path("admin")
///     .child_guard(RecordingGuard::allow("admin:child", &log))
///     .child(RouteNode::path("crises").activate_guard(RecordingGuard::allow("crises", &log)));
///
/// // navigate to /admin/crises...
///
/// assert_eq!(log.labels(), ["admin:child", "crises"]);
/// ```
pub struct RecordingGuard {
    label: String,
    log: GuardLog,
    result: GuardResult,
}

impl RecordingGuard {
    /// A recording guard that returns `result`.
    pub fn new(label: impl Into<String>, log: &GuardLog, result: GuardResult) -> Self {
        Self {
            label: label.into(),
            log: log.clone(),
            result,
        }
    }

    /// A recording guard that always allows.
    pub fn allow(label: impl Into<String>, log: &GuardLog) -> Self {
        Self::new(label, log, GuardResult::Allow)
    }
}

impl Guard for RecordingGuard {
    async fn check(&self, ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        self.log.push(GuardCall {
            label: self.label.clone(),
            phase: ctx.phase(),
            route: ctx.route().to_owned(),
            url: ctx.url().to_owned(),
        });
        Ok(self.result.clone())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

// ============================================================================
// Failing Guard
// ============================================================================

/// A guard that always returns an error.
pub struct FailingGuard {
    message: String,
}

impl FailingGuard {
    /// A guard failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Guard for FailingGuard {
    async fn check(&self, _ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Lets a test hold a guard or loader mid-flight and release it later.
#[derive(Clone, Default)]
pub struct Gate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    /// Create a closed gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until something reaches the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let one waiter through (or the next one to arrive).
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// A guard that waits at a [`Gate`] before deciding.
///
/// Used to keep a navigation in flight while a test starts another one.
pub struct GatedGuard {
    gate: Gate,
    result: GuardResult,
    count: Arc<AtomicUsize>,
}

impl GatedGuard {
    /// Create a gated guard and the gate controlling it.
    pub fn new(result: GuardResult) -> (Self, Gate) {
        let gate = Gate::new();
        let guard = Self {
            gate: gate.clone(),
            result,
            count: Arc::new(AtomicUsize::new(0)),
        };
        (guard, gate)
    }

    /// How many checks have completed.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Guard for GatedGuard {
    async fn check(&self, _ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        self.gate.pass().await;
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

// ============================================================================
// Loaders
// ============================================================================

type SubtreeFactory<P> = Arc<dyn Fn() -> Vec<RouteNode<P>> + Send + Sync>;

/// A subtree provider serving fixed subtrees by source reference.
///
/// Route nodes are not `Clone`, so each subtree is registered as a factory
/// that builds a fresh copy per fetch.
///
/// # Example
///
/// ```rust,ignore
/// let loader = StaticLoader::new().with_subtree("admin", || {
///     vec![RouteNode::index().payload(View::Dashboard)]
/// });
/// ```
pub struct StaticLoader<P> {
    subtrees: HashMap<String, SubtreeFactory<P>>,
    fetches: Arc<AtomicUsize>,
    gate: Option<Gate>,
}

impl<P> StaticLoader<P> {
    /// Create a loader serving no subtrees.
    pub fn new() -> Self {
        Self {
            subtrees: HashMap::new(),
            fetches: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    /// Serve `factory()` for `source`.
    pub fn with_subtree<F>(mut self, source: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Vec<RouteNode<P>> + Send + Sync + 'static,
    {
        self.subtrees.insert(source.into(), Arc::new(factory));
        self
    }

    /// Make every fetch wait at a gate, returned alongside the loader.
    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::new();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    /// A handle on the fetch counter that stays valid after the loader is
    /// moved into a navigator.
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }

    /// Get the number of fetches started so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<P> Default for StaticLoader<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Send + Sync + 'static> SubtreeLoader<P> for StaticLoader<P> {
    async fn load(&self, source: &str) -> Result<Vec<RouteNode<P>>, BoxError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        match self.subtrees.get(source) {
            Some(factory) => Ok(factory()),
            None => Err(format!("unknown subtree `{source}`").into()),
        }
    }
}

/// A subtree provider whose fetches always fail.
#[derive(Clone)]
pub struct FailingLoader {
    message: String,
    fetches: Arc<AtomicUsize>,
}

impl FailingLoader {
    /// A loader failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of fetches attempted so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<P: Send + Sync + 'static> SubtreeLoader<P> for FailingLoader {
    async fn load(&self, _source: &str) -> Result<Vec<RouteNode<P>>, BoxError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Recording Redirector
// ============================================================================

/// A redirector that records every target instead of navigating.
#[derive(Clone, Default)]
pub struct RecordingRedirector {
    targets: Arc<Mutex<Vec<String>>>,
}

impl RecordingRedirector {
    /// Create a redirector with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded targets.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }

    /// The most recent target.
    pub fn last(&self) -> Option<String> {
        self.targets.lock().unwrap().last().cloned()
    }

    /// Get the number of recorded redirects.
    pub fn count(&self) -> usize {
        self.targets.lock().unwrap().len()
    }
}

impl Redirector for RecordingRedirector {
    fn redirect(&self, url: &str) {
        self.targets.lock().unwrap().push(url.to_owned());
    }
}
