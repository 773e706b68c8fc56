//! The navigation pipeline.
//!
//! One attempt runs these steps strictly in order, awaiting every guard
//! before starting the next:
//!
//! 1. matching; at each unresolved lazy node its `canLoad` guards run and,
//!    on approval, its subtree is fetched before matching continues
//! 2. `canDeactivate` guards of the levels being left, leaf to root; levels
//!    the new chain keeps (same node, same parameters) are not left
//! 3. `canActivateChild` guards of every ancestor, root to leaf
//! 4. `canActivate` guards of the terminal route
//!
//! The first denial ends the attempt. Side effects (remembering the denied
//! URL and redirecting) are applied separately from the pipeline so a
//! superseded attempt can be discarded without leaving any trace.

use crate::orchestrator::{
    config::NavigatorConfig,
    outcome::{Denial, NavigationOutcome},
};
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};
use wayguard_core::{
    DynSubtreeLoader, GuardFault, GuardPhase, GuardPhases, GuardRef, GuardResult, LoadError,
    MatchedChain, NavigationContext, NavigationRequest, Redirector, RouteNode, RouteTree,
    SubtreeLoader,
};
use wayguard_std::{
    evaluate,
    routing::{MatchStep, PathMatcher},
    store::RedirectIntentStore,
};

/// Resolves URLs against a route tree and enforces its guards.
///
/// A navigator is stateless between attempts apart from the memoized lazy
/// subtrees and the shared [`RedirectIntentStore`]. Use a
/// [`Session`](crate::Session) to get cancellation of superseded attempts
/// and `canDeactivate` checks against the active route.
///
/// # Example
///
/// ```rust,ignore
/// let navigator = Navigator::builder(tree)
///     .loader(chunks)
///     .redirector(|url: &str| router_events.push(url))
///     .build();
///
/// match navigator.navigate("/admin/crises").await {
///     NavigationOutcome::Activated(chain) => render(chain.payload()),
///     NavigationOutcome::NotFound(_) => render_404(),
///     other => tracing::debug!(?other, "navigation did not activate"),
/// }
/// ```
pub struct Navigator<P> {
    tree: RouteTree<P>,
    loader: Option<Arc<dyn DynSubtreeLoader<P>>>,
    store: Arc<RedirectIntentStore>,
    redirector: Option<Arc<dyn Redirector>>,
    config: NavigatorConfig,
}

impl<P> Navigator<P> {
    /// Start building a navigator over `tree`.
    pub fn builder(tree: RouteTree<P>) -> NavigatorBuilder<P> {
        NavigatorBuilder::new(tree)
    }

    /// The route tree.
    pub fn tree(&self) -> &RouteTree<P> {
        &self.tree
    }

    /// The redirect intent store shared with the post-login flow.
    pub fn store(&self) -> &Arc<RedirectIntentStore> {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Match `url` against the routes resolved so far, without running any
    /// guard or fetching any subtree.
    pub fn match_url(&self, url: &str) -> MatchedChain<P> {
        let request = NavigationRequest::parse(url);
        PathMatcher::new(&self.tree).match_path(request.segments())
    }

    /// Send the user back to the remembered URL, or to `fallback`.
    ///
    /// Consumes the remembered URL and hands the target to the redirector.
    /// Returns the target.
    pub fn redirect_back(&self, fallback: &str) -> String {
        let target = self
            .store
            .consume()
            .unwrap_or_else(|| fallback.to_owned());
        debug!(url = %target, "redirecting back");
        if let Some(redirector) = &self.redirector {
            redirector.redirect(&target);
        }
        target
    }

    /// Apply the side effects of a finished attempt.
    ///
    /// Only a [`NavigationOutcome::Blocked`] has any: the denied URL is
    /// remembered and the user is redirected, each as the denial dictates.
    pub(crate) fn apply(&self, outcome: &NavigationOutcome<P>) {
        let NavigationOutcome::Blocked(denial) = outcome else {
            return;
        };
        if denial.remembers_intent() {
            self.store.remember(denial.url());
        }
        if let (Some(target), Some(redirector)) = (denial.redirect_to(), &self.redirector) {
            redirector.redirect(target);
        }
    }

    fn deny(&self, ctx: &NavigationContext, result: GuardResult) -> Denial {
        let phase = ctx.phase();
        let requested = match result {
            GuardResult::DenyWithRedirect(target) => Some(target),
            GuardResult::Allow | GuardResult::Deny => None,
        };
        let explicit = requested.is_some();
        let redirect_to = requested.or_else(|| {
            self.config
                .redirect_on
                .includes(phase)
                .then(|| self.config.default_redirect.clone())
        });
        Denial {
            url: ctx.url().to_owned(),
            phase,
            route: ctx.route().to_owned(),
            redirect_to,
            remember: explicit || self.config.remember_on.includes(phase),
            fault: None,
        }
    }

    fn fault(&self, ctx: &NavigationContext, fault: GuardFault) -> Denial {
        Denial {
            fault: Some(fault),
            ..self.deny(ctx, GuardResult::Deny)
        }
    }
}

impl<P: Send + Sync + 'static> Navigator<P> {
    /// Navigate to `url` and apply the side effects of the outcome.
    pub async fn navigate(&self, url: &str) -> NavigationOutcome<P> {
        let outcome = self.resolve(url, None).await;
        self.apply(&outcome);
        outcome
    }

    /// Run the pipeline for `url` without applying any side effect.
    ///
    /// `leaving` is the chain currently active. Once the request has matched,
    /// the `canDeactivate` guards of the levels it leaves run before any
    /// `canActivateChild` guard; a request that matches nothing never
    /// reaches them. Lazy subtrees reached on the way are still fetched and
    /// memoized.
    pub async fn resolve(
        &self,
        url: &str,
        leaving: Option<&MatchedChain<P>>,
    ) -> NavigationOutcome<P> {
        let request = Arc::new(NavigationRequest::parse(url));
        let span = info_span!("navigate", url = %request.url());
        async {
            let outcome = match self.run(&request, leaving).await {
                Ok(chain) => NavigationOutcome::Activated(chain),
                Err(stop) => stop,
            };
            log_outcome(&outcome);
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        request: &Arc<NavigationRequest>,
        leaving: Option<&MatchedChain<P>>,
    ) -> Result<MatchedChain<P>, NavigationOutcome<P>> {
        let chain = loop {
            match PathMatcher::new(&self.tree).step(request.segments()) {
                MatchStep::Matched(chain) => break chain,
                MatchStep::NotFound => {
                    return Err(NavigationOutcome::NotFound(request.url().to_owned()));
                }
                MatchStep::NeedsLoad(point) => {
                    let index = point.chain.len().saturating_sub(1);
                    let ctx = point.chain.context_at(request, GuardPhase::Load, index);
                    self.check(point.node.load_guards(), &ctx).await?;
                    self.load(&point.node).await?;
                }
            }
        };

        if let Some(leaving) = leaving {
            let kept = leaving.shared_prefix(&chain);
            for index in (kept..leaving.len()).rev() {
                let guards = leaving.routes()[index].node().deactivate_guards();
                let ctx = leaving.context_at(request, GuardPhase::Deactivate, index);
                self.check(guards, &ctx).await?;
            }
        }

        for index in 0..chain.ancestors().len() {
            let guards = chain.routes()[index].node().child_guards();
            let ctx = chain.context_at(request, GuardPhase::Child, index);
            self.check(guards, &ctx).await?;
        }

        if let Some(terminal) = chain.terminal() {
            let ctx = chain.context_at(request, GuardPhase::Activate, chain.len() - 1);
            self.check(terminal.node().activate_guards(), &ctx).await?;
        }

        Ok(chain)
    }

    async fn check(
        &self,
        guards: &[GuardRef],
        ctx: &NavigationContext,
    ) -> Result<(), NavigationOutcome<P>> {
        if guards.is_empty() {
            return Ok(());
        }
        debug!(
            phase = %ctx.phase(),
            route = ctx.route(),
            guards = guards.len(),
            "evaluating guards"
        );
        match evaluate(guards, ctx).await {
            Ok(GuardResult::Allow) => Ok(()),
            Ok(denied) => Err(NavigationOutcome::Blocked(self.deny(ctx, denied))),
            Err(fault) => Err(NavigationOutcome::Blocked(self.fault(ctx, fault))),
        }
    }

    async fn load(&self, node: &RouteNode<P>) -> Result<(), NavigationOutcome<P>> {
        let source = node.lazy_source().unwrap_or_default();
        let Some(loader) = &self.loader else {
            let error = LoadError::NoLoader(source.to_owned());
            return Err(NavigationOutcome::LoadFailed(Arc::new(error)));
        };
        debug!(source, "resolving lazy subtree");
        node.resolve_children(loader.as_ref())
            .await
            .map(|children| debug!(source, children = children.len(), "subtree resolved"))
            .map_err(|error| NavigationOutcome::LoadFailed(Arc::new(error)))
    }
}

fn log_outcome<P>(outcome: &NavigationOutcome<P>) {
    match outcome {
        NavigationOutcome::Activated(chain) => {
            debug!(route = %chain.route_path(), "navigation activated");
        }
        NavigationOutcome::Blocked(denial) => match denial.fault() {
            Some(fault) => warn!(
                error = %fault,
                cause = %fault.source,
                redirect_to = denial.redirect_to(),
                "guard failed, navigation blocked"
            ),
            None => info!(
                phase = %denial.phase(),
                route = denial.route(),
                redirect_to = denial.redirect_to(),
                "navigation blocked"
            ),
        },
        NavigationOutcome::NotFound(_) => debug!("no route matched"),
        NavigationOutcome::LoadFailed(error) => warn!(%error, "lazy subtree failed to load"),
        NavigationOutcome::Cancelled => debug!("navigation cancelled"),
    }
}

/// Builder for constructing a [`Navigator`].
pub struct NavigatorBuilder<P> {
    tree: RouteTree<P>,
    loader: Option<Arc<dyn DynSubtreeLoader<P>>>,
    store: Option<Arc<RedirectIntentStore>>,
    redirector: Option<Arc<dyn Redirector>>,
    config: NavigatorConfig,
}

impl<P> NavigatorBuilder<P> {
    /// Create a builder over `tree` with the default configuration.
    pub fn new(tree: RouteTree<P>) -> Self {
        Self {
            tree,
            loader: None,
            store: None,
            redirector: None,
            config: NavigatorConfig::default(),
        }
    }

    /// Fetch lazy subtrees with `loader`.
    pub fn loader<L: SubtreeLoader<P>>(mut self, loader: L) -> Self
    where
        P: 'static,
    {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Share `store` with the post-login flow instead of a private store.
    pub fn store(mut self, store: Arc<RedirectIntentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Perform redirects with `redirector`.
    pub fn redirector<R: Redirector>(mut self, redirector: R) -> Self {
        self.redirector = Some(Arc::new(redirector));
        self
    }

    /// Landing destination for denials without their own target.
    pub fn default_redirect(mut self, url: impl Into<String>) -> Self {
        self.config.default_redirect = url.into();
        self
    }

    /// Phases whose denials remember the denied URL.
    pub fn remember_on(mut self, phases: GuardPhases) -> Self {
        self.config.remember_on = phases;
        self
    }

    /// Phases whose denials redirect to the default destination.
    pub fn redirect_on(mut self, phases: GuardPhases) -> Self {
        self.config.redirect_on = phases;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the navigator.
    pub fn build(self) -> Navigator<P> {
        Navigator {
            tree: self.tree,
            loader: self.loader,
            store: self.store.unwrap_or_default(),
            redirector: self.redirector,
            config: self.config,
        }
    }
}
