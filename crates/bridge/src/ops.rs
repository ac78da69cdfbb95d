//! The three boundary operations.
//!
//! Each operation runs a unit of work on the caller's stack and decides what
//! happens to a fault it returns:
//!
//! | operation              | fault is...                         |
//! |------------------------|-------------------------------------|
//! | [`observe_and_rethrow`]  | observed, then returned as `Err`    |
//! | [`observe_and_suppress`] | handled, then dropped               |
//! | [`capture_if_kind`]      | returned as data if it matches, else `Err` |
//!
//! These functions never log at more than `TRACE` and never report. Use
//! [`crate::ExceptionBridge`] for panic capture, logging and reporting.

use crate::report::{Disposition, Operation};
use rethrow_core::{BridgeState, Fault, FaultResult, KindMatcher};

/// Tracks one invocation through the bridge lifecycle.
pub(crate) struct Invocation {
    operation: Operation,
    state: BridgeState,
}

impl Invocation {
    pub(crate) fn start(operation: Operation) -> Self {
        let mut invocation = Self {
            operation,
            state: BridgeState::Idle,
        };
        invocation.advance(BridgeState::Running);
        invocation
    }

    pub(crate) fn completed(mut self) {
        self.advance(BridgeState::Completed);
    }

    pub(crate) fn faulted(&mut self, fault: &Fault) {
        tracing::trace!(
            operation = %self.operation,
            kind = %fault.kind(),
            "unit of work faulted"
        );
        self.advance(BridgeState::Faulted);
    }

    pub(crate) fn reported(&mut self) {
        self.advance(BridgeState::Reported);
    }

    pub(crate) fn finish(mut self, disposition: Disposition) {
        self.advance(disposition.state());
    }

    fn advance(&mut self, next: BridgeState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal bridge transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!(
            operation = %self.operation,
            from = %self.state,
            to = %next,
            "bridge transition"
        );
        self.state = next;
    }
}

/// Runs `work`; if it faults, passes the fault to `observer` and then returns
/// the identical fault to the caller.
///
/// `observer` runs at most once, and always before the fault leaves this
/// function.
pub fn observe_and_rethrow<T, W, O>(work: W, observer: O) -> FaultResult<T>
where
    W: FnOnce() -> FaultResult<T>,
    O: FnOnce(&Fault),
{
    let mut invocation = Invocation::start(Operation::ObserveAndRethrow);
    match work() {
        Ok(value) => {
            invocation.completed();
            Ok(value)
        }
        Err(fault) => {
            invocation.faulted(&fault);
            observer(&fault);
            invocation.reported();
            invocation.finish(Disposition::Propagated);
            Err(fault)
        }
    }
}

/// Runs `work`; if it faults, passes the fault to `handler` and returns
/// normally.
///
/// Returns `Some(value)` when the work succeeded and `None` when a fault was
/// handled. The fault never reaches the caller.
pub fn observe_and_suppress<T, W, H>(work: W, handler: H) -> Option<T>
where
    W: FnOnce() -> FaultResult<T>,
    H: FnOnce(&Fault),
{
    let mut invocation = Invocation::start(Operation::ObserveAndSuppress);
    match work() {
        Ok(value) => {
            invocation.completed();
            Some(value)
        }
        Err(fault) => {
            invocation.faulted(&fault);
            handler(&fault);
            invocation.reported();
            invocation.finish(Disposition::Absorbed);
            None
        }
    }
}

/// Runs `work` and captures a fault only if `expected` matches it.
///
/// * no fault: `Ok(None)`
/// * matching fault (including subkinds): `Ok(Some(fault))`
/// * any other fault: `Err(fault)`, unmodified
///
/// `Ok(None)` always means the work completed; a non-matching fault is never
/// reported as absent.
pub fn capture_if_kind<M, W>(expected: M, work: W) -> FaultResult<Option<Fault>>
where
    M: KindMatcher,
    W: FnOnce() -> FaultResult<()>,
{
    capture_if_kind_with(expected, work, |_, _| {})
}

/// [`capture_if_kind`] with a hook that sees the fault and its disposition
/// before the invocation reaches its terminal state.
pub(crate) fn capture_if_kind_with<M, W, R>(
    expected: M,
    work: W,
    on_fault: R,
) -> FaultResult<Option<Fault>>
where
    M: KindMatcher,
    W: FnOnce() -> FaultResult<()>,
    R: FnOnce(&Fault, Disposition),
{
    let mut invocation = Invocation::start(Operation::CaptureIfKind);
    match work() {
        Ok(()) => {
            invocation.completed();
            Ok(None)
        }
        Err(fault) => {
            invocation.faulted(&fault);
            let disposition = if expected.matches(&fault) {
                Disposition::Absorbed
            } else {
                Disposition::Propagated
            };
            on_fault(&fault, disposition);
            invocation.reported();
            invocation.finish(disposition);
            match disposition {
                Disposition::Absorbed => Ok(Some(fault)),
                Disposition::Propagated => Err(fault),
            }
        }
    }
}
