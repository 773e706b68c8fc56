//! Authentication guard.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use wayguard_core::{BoxError, Guard, GuardResult, NavigationContext};

/// Answers "is the current user authenticated?".
///
/// Implemented by the host application's session service.
pub trait AuthState: Send + Sync + 'static {
    /// Whether the current user is authenticated.
    fn is_authenticated(&self) -> bool;
}

impl AuthState for AtomicBool {
    fn is_authenticated(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<A: AuthState + ?Sized> AuthState for Arc<A> {
    fn is_authenticated(&self) -> bool {
        A::is_authenticated(self)
    }
}

/// Allows authenticated users and redirects everyone else to a login page.
///
/// The same instance can be attached as a load, child and activate guard.
///
/// # Example
///
/// ```rust,ignore
/// let signed_in = Arc::new(AtomicBool::new(false));
/// let auth = Arc::new(AuthGuard::new(signed_in.clone(), "/login"));
///
/// let admin = RouteNode::path("admin")
///     .load_guard(auth.clone())
///     .lazy("admin");
/// ```
pub struct AuthGuard<A> {
    state: A,
    login_url: Option<String>,
}

impl<A: AuthState> AuthGuard<A> {
    /// Deny unauthenticated users with a redirect to `login_url`.
    pub fn new(state: A, login_url: impl Into<String>) -> Self {
        Self {
            state,
            login_url: Some(login_url.into()),
        }
    }

    /// Deny unauthenticated users and let the navigator pick the target.
    pub fn without_redirect(state: A) -> Self {
        Self {
            state,
            login_url: None,
        }
    }

    /// The login page unauthenticated users are sent to, if set.
    pub fn login_url(&self) -> Option<&str> {
        self.login_url.as_deref()
    }
}

impl<A: AuthState> Guard for AuthGuard<A> {
    async fn check(&self, _ctx: &NavigationContext) -> Result<GuardResult, BoxError> {
        if self.state.is_authenticated() {
            return Ok(GuardResult::Allow);
        }
        Ok(match &self.login_url {
            Some(url) => GuardResult::redirect(url.as_str()),
            None => GuardResult::Deny,
        })
    }

    fn name(&self) -> &str {
        "AuthGuard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayguard_core::{GuardPhase, NavigationRequest};

    fn ctx() -> NavigationContext {
        NavigationContext::new(Arc::new(NavigationRequest::parse("/admin")), GuardPhase::Load)
    }

    #[tokio::test]
    async fn test_follows_auth_state() {
        let signed_in = Arc::new(AtomicBool::new(false));
        let guard = AuthGuard::new(signed_in.clone(), "/login");

        assert_eq!(guard.check(&ctx()).await.unwrap(), GuardResult::redirect("/login"));

        signed_in.store(true, Ordering::SeqCst);
        assert_eq!(guard.check(&ctx()).await.unwrap(), GuardResult::Allow);
    }

    #[tokio::test]
    async fn test_without_redirect_plainly_denies() {
        let guard = AuthGuard::without_redirect(AtomicBool::new(false));
        assert_eq!(guard.login_url(), None);
        assert_eq!(guard.check(&ctx()).await.unwrap(), GuardResult::Deny);
    }
}
