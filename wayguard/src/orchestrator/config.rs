//! Navigator configuration.

use wayguard_core::GuardPhases;

/// Policy applied when a guard denies.
///
/// A guard that returns [`DenyWithRedirect`] always gets its target, and the
/// denied URL is always remembered in that case. A plain [`Deny`] (or a
/// guard fault) falls back to this configuration:
///
/// - the denied URL is remembered only if the phase is in `remember_on`
/// - the user is sent to `default_redirect` only if the phase is in
///   `redirect_on`
///
/// The defaults remember and redirect denials of the load, child and
/// activate phases. A denied deactivation keeps the user where they are.
///
/// [`DenyWithRedirect`]: wayguard_core::GuardResult::DenyWithRedirect
/// [`Deny`]: wayguard_core::GuardResult::Deny
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Landing destination for denials without their own target.
    pub default_redirect: String,
    /// Phases whose denials record the denied URL for a later redirect back.
    pub remember_on: GuardPhases,
    /// Phases whose denials send the user to `default_redirect`.
    pub redirect_on: GuardPhases,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            default_redirect: String::from("/login"),
            remember_on: GuardPhases::ENTER,
            redirect_on: GuardPhases::ENTER,
        }
    }
}
