//! Method-call syntax for the boundary operations.
//!
//! ```
//! use rethrow_bridge::extensions::FaultBridgeExt;
//! use rethrow_core::{kind::RANGE_ERROR, Fault, FaultResult};
//!
//! let mut seen = 0;
//! let outcome = (|| -> FaultResult<u32> { Err(Fault::new(RANGE_ERROR, "row 9")) })
//!     .suppress_with(|_| seen += 1);
//! assert_eq!(outcome, None);
//! assert_eq!(seen, 1);
//! ```

use crate::ops;
use rethrow_core::{Fault, FaultResult, KindMatcher};

/// Try-catch style extensions for any fallible unit of work.
pub trait FaultBridgeExt<T>: FnOnce() -> FaultResult<T> + Sized {
    /// Runs the work, observing and then re-raising any fault.
    fn rethrow_after<O>(self, observer: O) -> FaultResult<T>
    where
        O: FnOnce(&Fault),
    {
        ops::observe_and_rethrow(self, observer)
    }

    /// Runs the work, handing any fault to `handler` and dropping it.
    fn suppress_with<H>(self, handler: H) -> Option<T>
    where
        H: FnOnce(&Fault),
    {
        ops::observe_and_suppress(self, handler)
    }
}

impl<T, F> FaultBridgeExt<T> for F where F: FnOnce() -> FaultResult<T> {}

/// Capture extension for units of work that produce no value.
pub trait CaptureKindExt: FnOnce() -> FaultResult<()> + Sized {
    /// Runs the work, returning a matching fault as data.
    fn capture_kind<M>(self, expected: M) -> FaultResult<Option<Fault>>
    where
        M: KindMatcher,
    {
        ops::capture_if_kind(expected, self)
    }
}

impl<F> CaptureKindExt for F where F: FnOnce() -> FaultResult<()> {}
