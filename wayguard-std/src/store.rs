//! Redirect intent store.

use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Remembers the last denied destination so the user can be sent back to it
/// after satisfying the guard that denied them.
///
/// Holds at most one URL. Writes are last-write-wins and
/// [`consume`](Self::consume) returns and clears the value in one atomic
/// step, so two concurrent consumers never both receive the same URL.
///
/// Share it between the navigator and the post-login flow with an `Arc`.
#[derive(Default)]
pub struct RedirectIntentStore {
    pending: ArcSwapOption<String>,
}

impl RedirectIntentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `url`, replacing anything remembered before.
    pub fn remember(&self, url: impl Into<String>) {
        self.pending.store(Some(Arc::new(url.into())));
    }

    /// Take the remembered URL, leaving the store empty.
    pub fn consume(&self) -> Option<String> {
        self.pending.swap(None).map(Arc::unwrap_or_clone)
    }

    /// The remembered URL, without clearing it.
    pub fn peek(&self) -> Option<String> {
        self.pending.load_full().map(|url| url.as_ref().clone())
    }

    /// Forget the remembered URL.
    pub fn clear(&self) {
        self.pending.store(None);
    }

    /// Whether a URL is remembered.
    pub fn is_pending(&self) -> bool {
        self.pending.load().is_some()
    }
}

impl std::fmt::Debug for RedirectIntentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectIntentStore")
            .field("pending", &self.peek())
            .finish()
    }
}
