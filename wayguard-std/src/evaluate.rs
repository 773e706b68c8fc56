//! Sequential guard evaluation.

use wayguard_core::{GuardFault, GuardRef, GuardResult, NavigationContext};

/// Run `guards` one after another against `ctx`.
///
/// Each guard is awaited to completion before the next one starts. The first
/// guard that does not allow wins and the remaining guards are never invoked.
/// An empty list allows.
///
/// A guard returning `Err` stops the evaluation with a [`GuardFault`] naming
/// the guard, the phase and the route of `ctx`.
pub async fn evaluate(
    guards: &[GuardRef],
    ctx: &NavigationContext,
) -> Result<GuardResult, GuardFault> {
    for guard in guards {
        let result = guard.check_dyn(ctx).await.map_err(|source| GuardFault {
            guard: guard.name_dyn().to_owned(),
            phase: ctx.phase(),
            route: ctx.route().to_owned(),
            source,
        })?;
        if !result.is_allowed() {
            return Ok(result);
        }
    }
    Ok(GuardResult::Allow)
}
