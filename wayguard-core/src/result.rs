//! Guard decisions and conversions into them.

use crate::error::BoxError;

/// The three-way outcome of a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardResult {
    /// The transition may proceed.
    Allow,
    /// The transition is refused; the navigator picks the redirect target.
    Deny,
    /// The transition is refused and the user should be sent to the target.
    DenyWithRedirect(String),
}

impl GuardResult {
    /// Deny and ask for a redirect to `target`.
    pub fn redirect(target: impl Into<String>) -> Self {
        Self::DenyWithRedirect(target.into())
    }

    /// Returns `true` for [`GuardResult::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns `true` for both denial variants.
    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    /// The redirect target requested by the guard, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::DenyWithRedirect(target) => Some(target),
            _ => None,
        }
    }
}

impl From<bool> for GuardResult {
    fn from(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }
}

/// Trait for converting a closure's output into a guard decision.
///
/// # Default Implementations
///
/// - `bool` → `true` = Allow, `false` = Deny
/// - `GuardResult` → As is
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be converted into a `GuardResult`",
    label = "missing `IntoGuardResult` implementation",
    note = "Guard closures must return `bool`, `GuardResult` or a `Result` of either."
)]
pub trait IntoGuardResult {
    /// Convert the output into a decision or a fault.
    fn into_guard_result(self) -> Result<GuardResult, BoxError>;
}

impl IntoGuardResult for bool {
    fn into_guard_result(self) -> Result<GuardResult, BoxError> {
        Ok(self.into())
    }
}

impl IntoGuardResult for GuardResult {
    fn into_guard_result(self) -> Result<GuardResult, BoxError> {
        Ok(self)
    }
}

impl<T, E> IntoGuardResult for Result<T, E>
where
    T: IntoGuardResult,
    E: Into<BoxError>,
{
    fn into_guard_result(self) -> Result<GuardResult, BoxError> {
        match self {
            Ok(t) => t.into_guard_result(),
            Err(e) => Err(e.into()),
        }
    }
}
