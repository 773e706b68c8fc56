//! Guard phases of a navigation.

use bitflags::bitflags;
use std::fmt;

/// The point of the pipeline at which a guard list is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardPhase {
    /// Leaving the currently active route (`canDeactivate`).
    Deactivate,
    /// Fetching a lazy subtree (`canLoad`).
    Load,
    /// Entering any descendant of a route (`canActivateChild`).
    Child,
    /// Activating the terminal route (`canActivate`).
    Activate,
}

impl GuardPhase {
    /// The single-phase flag set for this phase.
    pub const fn as_flag(self) -> GuardPhases {
        match self {
            Self::Deactivate => GuardPhases::DEACTIVATE,
            Self::Load => GuardPhases::LOAD,
            Self::Child => GuardPhases::CHILD,
            Self::Activate => GuardPhases::ACTIVATE,
        }
    }

    /// Lowercase name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deactivate => "deactivate",
            Self::Load => "load",
            Self::Child => "child",
            Self::Activate => "activate",
        }
    }
}

impl fmt::Display for GuardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of [`GuardPhase`]s, used to configure per-phase policies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GuardPhases: u8 {
        /// Lazy subtree loading.
        const LOAD = 1;
        /// Entering a descendant.
        const CHILD = 1 << 1;
        /// Activating the terminal route.
        const ACTIVATE = 1 << 2;
        /// Leaving the active route.
        const DEACTIVATE = 1 << 3;
        /// Every phase that moves the user towards a new route.
        const ENTER = Self::LOAD.bits() | Self::CHILD.bits() | Self::ACTIVATE.bits();
    }
}

impl GuardPhases {
    /// Whether `phase` is part of this set.
    pub fn includes(self, phase: GuardPhase) -> bool {
        self.contains(phase.as_flag())
    }
}

impl From<GuardPhase> for GuardPhases {
    fn from(phase: GuardPhase) -> Self {
        phase.as_flag()
    }
}
