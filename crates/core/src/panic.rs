//! Bridging between unwinding panics and [`Fault`] values.
//!
//! [`Fault::raise`] unwinds with the fault as the panic payload, and
//! [`catch_panic`] turns an unwinding panic back into a `Result`. Both require
//! `panic = "unwind"`; with `panic = "abort"` nothing can be caught.
//!
//! [`catch_unwinding`] keeps a payload that is not a `Fault` next to its fault
//! view, so a caller that decides not to handle the panic can resume it
//! exactly as it was thrown.

use crate::fault::{Fault, FaultResult};
use crate::kind::PANIC;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Message used when a panic payload is neither a [`Fault`] nor a string.
pub const UNKNOWN_PANIC_PAYLOAD: &str = "unknown panic payload";

impl Fault {
    /// Raises this fault by unwinding the current thread.
    ///
    /// The fault is recovered unchanged by [`catch_panic`] or any
    /// `catch_unwind` that downcasts the payload to `Fault`.
    ///
    /// This goes through the installed panic hook like any panic. The default
    /// hook cannot print a `Fault` payload and writes `Box<dyn Any>` to
    /// stderr, even when the fault is caught later. Call
    /// [`install_fault_panic_hook`] to log raised faults through `tracing`
    /// instead.
    pub fn raise(self) -> ! {
        panic::panic_any(self)
    }

    /// Converts a payload obtained from `catch_unwind` into a fault.
    ///
    /// `Fault` payloads are returned as-is; `&str` and `String` payloads
    /// become [`PANIC`] faults carrying the panic message.
    pub fn from_panic_payload(payload: Box<dyn Any + Send>) -> Self {
        CaughtPanic::from_payload(payload).into_fault()
    }

    fn describe_payload(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<String>() {
            Fault::new(PANIC, message.as_str())
        } else if let Some(message) = payload.downcast_ref::<&'static str>() {
            Fault::new(PANIC, *message)
        } else {
            Fault::new(PANIC, UNKNOWN_PANIC_PAYLOAD)
        }
    }
}

/// A panic caught by [`catch_unwinding`].
///
/// Always carries a [`Fault`] describing the panic. When the payload was
/// something other than a `Fault`, the payload itself is kept as well.
pub struct CaughtPanic {
    fault: Fault,
    foreign: Option<Box<dyn Any + Send>>,
}

impl CaughtPanic {
    /// Wraps a payload obtained from `catch_unwind`.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        match payload.downcast::<Fault>() {
            Ok(fault) => Self {
                fault: *fault,
                foreign: None,
            },
            Err(payload) => Self {
                fault: Fault::describe_payload(payload.as_ref()),
                foreign: Some(payload),
            },
        }
    }

    /// The fault view of the panic.
    pub fn fault(&self) -> &Fault {
        &self.fault
    }

    /// Returns `true` when the payload was not a [`Fault`].
    pub fn is_foreign(&self) -> bool {
        self.foreign.is_some()
    }

    /// Drops any foreign payload and keeps the fault view.
    pub fn into_fault(self) -> Fault {
        self.fault
    }

    /// Splits into the fault view and the foreign payload, if any.
    pub fn into_parts(self) -> (Fault, Option<Box<dyn Any + Send>>) {
        (self.fault, self.foreign)
    }

    /// Continues unwinding with the payload that was caught.
    ///
    /// Foreign payloads resume untouched. The panic hook is not run again.
    pub fn resume(self) -> ! {
        match self.foreign {
            Some(payload) => panic::resume_unwind(payload),
            None => panic::resume_unwind(Box::new(self.fault)),
        }
    }
}

impl fmt::Debug for CaughtPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaughtPanic")
            .field("fault", &self.fault)
            .field("foreign", &self.is_foreign())
            .finish()
    }
}

/// Runs `work`, keeping an unwinding panic as a [`CaughtPanic`].
pub fn catch_unwinding<T, F>(work: F) -> Result<T, CaughtPanic>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(work)).map_err(|payload| {
        let caught = CaughtPanic::from_payload(payload);
        tracing::trace!(
            kind = %caught.fault.kind(),
            reason = %caught.fault.message(),
            foreign = caught.is_foreign(),
            "caught unwinding fault"
        );
        caught
    })
}

/// Runs `work`, converting an unwinding panic into `Err(Fault)`.
///
/// Any state `work` touches may be left half-updated by the unwind; callers
/// that share state with `work` must tolerate that.
pub fn catch_panic<T, F>(work: F) -> FaultResult<T>
where
    F: FnOnce() -> T,
{
    catch_unwinding(work).map_err(CaughtPanic::into_fault)
}

/// Runs a fallible unit of work, folding panics into the same `Err` channel
/// as returned faults.
pub fn catch_fault<T, F>(work: F) -> FaultResult<T>
where
    F: FnOnce() -> FaultResult<T>,
{
    catch_panic(work).and_then(|result| result)
}

/// Installs a panic hook that logs raised faults through `tracing`.
///
/// A panic whose payload is a [`Fault`] produces a DEBUG `fault raised` event
/// instead of the default stderr line. Every other panic goes to the hook that
/// was installed before this call.
pub fn install_fault_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        match info.payload().downcast_ref::<Fault>() {
            Some(fault) => {
                let location = info
                    .location()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                tracing::debug!(
                    kind = %fault.kind(),
                    reason = %fault.message(),
                    %location,
                    "fault raised"
                );
            }
            None => previous(info),
        }
    }));
}
