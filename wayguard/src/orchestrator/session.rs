//! Per-user navigation sessions.

use crate::orchestrator::{navigator::Navigator, outcome::NavigationOutcome};
use futures::future::{AbortHandle, Abortable};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use wayguard_core::MatchedChain;

struct SessionState<P> {
    generation: u64,
    in_flight: Option<AbortHandle>,
    current: Option<MatchedChain<P>>,
}

/// One logical user of a [`Navigator`].
///
/// A session remembers the chain it last activated and allows only one
/// navigation in flight: starting a new one cancels the previous attempt,
/// which then resolves to [`NavigationOutcome::Cancelled`] without
/// remembering its URL, redirecting or becoming the active chain.
///
/// # Example
///
/// ```rust,ignore
/// let session = Session::new(Arc::new(navigator));
///
/// session.navigate("/admin").await;          // blocked, remembered
/// auth.sign_in();
/// session.resume("/crisis-center").await;    // back to /admin
/// ```
pub struct Session<P> {
    navigator: Arc<Navigator<P>>,
    state: Mutex<SessionState<P>>,
}

impl<P> Session<P> {
    /// Create a session with no active route.
    pub fn new(navigator: Arc<Navigator<P>>) -> Self {
        Self {
            navigator,
            state: Mutex::new(SessionState {
                generation: 0,
                in_flight: None,
                current: None,
            }),
        }
    }

    /// The navigator this session drives.
    pub fn navigator(&self) -> &Arc<Navigator<P>> {
        &self.navigator
    }

    /// The chain activated by the last successful navigation.
    pub fn current(&self) -> Option<MatchedChain<P>> {
        self.lock().current.clone()
    }

    /// Cancel the navigation in flight, if any.
    pub fn cancel(&self) {
        let mut state = self.lock();
        state.generation += 1;
        if let Some(previous) = state.in_flight.take() {
            previous.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Send + Sync + 'static> Session<P> {
    /// Navigate to `url`, superseding any navigation still in flight.
    ///
    /// Once `url` has matched, the `canDeactivate` guards of the current
    /// levels it leaves run before the entering guards. Side effects
    /// are applied only if no newer navigation started in the meantime.
    pub async fn navigate(&self, url: &str) -> NavigationOutcome<P> {
        let (handle, registration) = AbortHandle::new_pair();
        let (generation, leaving) = {
            let mut state = self.lock();
            if let Some(previous) = state.in_flight.replace(handle) {
                previous.abort();
            }
            state.generation += 1;
            (state.generation, state.current.clone())
        };

        let attempt = Abortable::new(self.navigator.resolve(url, leaving.as_ref()), registration);
        let Ok(outcome) = attempt.await else {
            debug!(url, "navigation superseded");
            return NavigationOutcome::Cancelled;
        };

        {
            let mut state = self.lock();
            if state.generation != generation {
                debug!(url, "navigation superseded before commit");
                return NavigationOutcome::Cancelled;
            }
            state.in_flight = None;
            if let NavigationOutcome::Activated(chain) = &outcome {
                state.current = Some(chain.clone());
            }
        }

        self.navigator.apply(&outcome);
        outcome
    }

    /// Navigate to the URL a guard denied earlier, or to `fallback` when
    /// nothing is remembered.
    ///
    /// The remembered URL is consumed, so it is resumed at most once.
    pub async fn resume(&self, fallback: &str) -> NavigationOutcome<P> {
        let target = self
            .navigator
            .store()
            .consume()
            .unwrap_or_else(|| fallback.to_owned());
        debug!(url = %target, "resuming navigation");
        self.navigate(&target).await
    }
}
