//! Rethrow Bridge
//!
//! Converts a fault raised inside a caller-supplied unit of work into a value
//! the caller can branch on. Three operations decide what happens to the
//! fault:
//!
//! - [`observe_and_rethrow`]: observe it, then hand it back as `Err`
//! - [`observe_and_suppress`]: handle it, then drop it
//! - [`capture_if_kind`]: return it as data when it matches, `Err` otherwise
//!
//! The free functions are the bare contracts. [`ExceptionBridge`] adds panic
//! capture, logging and reporting driven by a
//! [`rethrow_config::BridgeConfig`].

pub mod bridge;
pub mod extensions;
pub mod ops;
pub mod report;

// Re-export commonly used types
pub use bridge::ExceptionBridge;
pub use extensions::{CaptureKindExt, FaultBridgeExt};
pub use ops::{capture_if_kind, observe_and_rethrow, observe_and_suppress};
pub use report::{
    clear_fault_reporter, fault_reporter, set_fault_reporter, Disposition, FaultReport,
    FaultReporter, Operation, TracingReporter,
};
