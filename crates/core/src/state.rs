//! Lifecycle of a single bridged invocation.

use std::fmt::{self, Display, Formatter};

/// Indicates where a bridged unit of work is in its lifecycle.
///
/// ```text
/// Idle -> Running -> Completed
///                 -> Faulted -> Reported -> Propagated
///                                        -> Absorbed
/// ```
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeState {
    /// The work has not been started.
    Idle = 0,

    /// The work is executing on the caller's stack.
    Running = 1,

    /// The work finished without a fault.
    Completed = 2,

    /// The work raised a fault.
    Faulted = 3,

    /// The fault was handed to the observer or handler.
    Reported = 4,

    /// The fault was passed on to the caller.
    Propagated = 5,

    /// The fault was returned as data or dropped.
    Absorbed = 6,
}

impl BridgeState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BridgeState::Completed | BridgeState::Propagated | BridgeState::Absorbed
        )
    }

    #[inline]
    pub fn is_fault_path(self) -> bool {
        matches!(
            self,
            BridgeState::Faulted
                | BridgeState::Reported
                | BridgeState::Propagated
                | BridgeState::Absorbed
        )
    }

    /// Returns `true` when moving from `self` to `next` is a legal step.
    pub fn can_transition_to(self, next: BridgeState) -> bool {
        use BridgeState::*;
        matches!(
            (self, next),
            (Idle, Running)
                | (Running, Completed)
                | (Running, Faulted)
                | (Faulted, Reported)
                | (Reported, Propagated)
                | (Reported, Absorbed)
        )
    }
}

impl Display for BridgeState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            BridgeState::Idle => "idle",
            BridgeState::Running => "running",
            BridgeState::Completed => "completed",
            BridgeState::Faulted => "faulted",
            BridgeState::Reported => "reported",
            BridgeState::Propagated => "propagated",
            BridgeState::Absorbed => "absorbed",
        };
        f.write_str(name)
    }
}

/// Records the path a single invocation takes through [`BridgeState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTrail {
    states: Vec<BridgeState>,
}

impl StateTrail {
    pub fn new() -> Self {
        Self {
            states: vec![BridgeState::Idle],
        }
    }

    /// Current state.
    pub fn current(&self) -> BridgeState {
        self.states
            .last()
            .copied()
            .unwrap_or(BridgeState::Idle)
    }

    /// Advances to `next`.
    ///
    /// Illegal steps indicate a bug in the bridge itself and trip a debug
    /// assertion; release builds record the step anyway.
    pub fn advance(&mut self, next: BridgeState) {
        let current = self.current();
        debug_assert!(
            current.can_transition_to(next),
            "illegal bridge transition {} -> {}",
            current,
            next
        );
        tracing::trace!(from = %current, to = %next, "bridge transition");
        self.states.push(next);
    }

    /// Every state visited so far, starting with [`BridgeState::Idle`].
    pub fn states(&self) -> &[BridgeState] {
        &self.states
    }
}

impl Default for StateTrail {
    fn default() -> Self {
        Self::new()
    }
}
