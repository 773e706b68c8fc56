//! Navigation outcomes.

use std::{fmt, sync::Arc};
use wayguard_core::{GuardFault, GuardPhase, LoadError, MatchedChain, NavigationError};

/// Why and where a navigation was blocked.
#[derive(Debug)]
pub struct Denial {
    pub(crate) url: String,
    pub(crate) phase: GuardPhase,
    pub(crate) route: String,
    pub(crate) redirect_to: Option<String>,
    pub(crate) remember: bool,
    pub(crate) fault: Option<GuardFault>,
}

impl Denial {
    /// The URL that was denied, exactly as requested.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The phase in which the denying guard ran.
    pub fn phase(&self) -> GuardPhase {
        self.phase
    }

    /// Pattern path of the route the denying guard belongs to.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Where the user is sent, if anywhere.
    ///
    /// The guard's own target when it supplied one, otherwise the configured
    /// default landing destination.
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }

    /// Whether the denied URL is recorded for a later redirect back.
    pub fn remembers_intent(&self) -> bool {
        self.remember
    }

    /// The error of a guard that failed instead of deciding.
    pub fn fault(&self) -> Option<&GuardFault> {
        self.fault.as_ref()
    }

    /// Whether the denial comes from a failing guard.
    pub fn is_fault(&self) -> bool {
        self.fault.is_some()
    }
}

/// The result of one navigation attempt.
pub enum NavigationOutcome<P> {
    /// Every guard allowed; the chain is now active.
    Activated(MatchedChain<P>),
    /// A guard denied or failed.
    Blocked(Denial),
    /// No route matches the URL. No guard ran.
    NotFound(String),
    /// A lazy subtree could not be fetched.
    LoadFailed(Arc<LoadError>),
    /// A newer navigation of the same session superseded this one.
    Cancelled,
}

impl<P> NavigationOutcome<P> {
    /// Returns `true` if the navigation activated a route.
    pub fn is_activated(&self) -> bool {
        matches!(self, Self::Activated(_))
    }

    /// Returns `true` if a guard blocked the navigation.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    /// Returns `true` if no route matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` if the attempt was superseded.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The activated chain.
    pub fn chain(&self) -> Option<&MatchedChain<P>> {
        match self {
            Self::Activated(chain) => Some(chain),
            _ => None,
        }
    }

    /// The terminal route's payload, on activation.
    pub fn payload(&self) -> Option<&P> {
        self.chain().and_then(MatchedChain::payload)
    }

    /// The denial, if blocked.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Blocked(denial) => Some(denial),
            _ => None,
        }
    }

    /// Where a blocked navigation sends the user.
    pub fn redirect_to(&self) -> Option<&str> {
        self.denial().and_then(Denial::redirect_to)
    }

    /// Convert into a `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<MatchedChain<P>, NavigationError> {
        match self {
            Self::Activated(chain) => Ok(chain),
            Self::Blocked(Denial {
                fault: Some(fault), ..
            }) => Err(NavigationError::GuardFault(fault)),
            Self::Blocked(denial) => Err(NavigationError::Blocked {
                url: denial.url,
                redirect_to: denial.redirect_to,
            }),
            Self::NotFound(url) => Err(NavigationError::NotFound(url)),
            Self::LoadFailed(error) => Err(NavigationError::LoadFailure(error)),
            Self::Cancelled => Err(NavigationError::Cancelled),
        }
    }
}

impl<P> fmt::Debug for NavigationOutcome<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activated(chain) => f.debug_tuple("Activated").field(chain).finish(),
            Self::Blocked(denial) => f.debug_tuple("Blocked").field(denial).finish(),
            Self::NotFound(url) => f.debug_tuple("NotFound").field(url).finish(),
            Self::LoadFailed(error) => f.debug_tuple("LoadFailed").field(error).finish(),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denial(fault: Option<GuardFault>) -> Denial {
        Denial {
            url: "/admin".into(),
            phase: GuardPhase::Load,
            route: "/admin".into(),
            redirect_to: Some("/login".into()),
            remember: true,
            fault,
        }
    }

    #[test]
    fn test_into_result() {
        let blocked = NavigationOutcome::<()>::Blocked(denial(None));
        assert_eq!(blocked.redirect_to(), Some("/login"));
        match blocked.into_result() {
            Err(NavigationError::Blocked { url, redirect_to }) => {
                assert_eq!(url, "/admin");
                assert_eq!(redirect_to.as_deref(), Some("/login"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let fault = GuardFault {
            guard: "Session".into(),
            phase: GuardPhase::Load,
            route: "/admin".into(),
            source: "backend down".into(),
        };
        let faulted = NavigationOutcome::<()>::Blocked(denial(Some(fault)));
        assert!(faulted.denial().unwrap().is_fault());
        assert!(matches!(
            faulted.into_result(),
            Err(NavigationError::GuardFault(_))
        ));

        let missing = NavigationOutcome::<()>::NotFound("/nope".into());
        assert!(matches!(
            missing.into_result(),
            Err(NavigationError::NotFound(url)) if url == "/nope"
        ));
        assert!(matches!(
            NavigationOutcome::<()>::Cancelled.into_result(),
            Err(NavigationError::Cancelled)
        ));
    }
}
