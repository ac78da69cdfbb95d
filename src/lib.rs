//! # Rethrow: explicit fault bridging
//!
//! Converts a fault raised inside a caller-supplied unit of work into an
//! explicit, inspectable value instead of letting it unwind past the boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use rethrow::prelude::*;
//!
//! let bridge = ExceptionBridge::default();
//!
//! // A panicking unit of work is observed, then handed back as `Err`.
//! let result: FaultResult<()> = bridge.observe_and_rethrow(
//!     || Fault::new(RANGE_ERROR, "index out of bounds").raise(),
//!     |fault| eprintln!("cell update failed: {fault}"),
//! );
//! assert_eq!(result.unwrap_err().name(), "RangeError");
//!
//! // Only faults of the expected kind are captured as data.
//! let captured = capture_if_kind(RANGE_ERROR, || Err(Fault::new(IO_ERROR, "reset")));
//! assert!(captured.is_err());
//! ```
//!
//! ## Architecture
//!
//! - [`core`] - faults, the kind hierarchy, lifecycle states and the panic bridge
//! - [`config`] - bridge configuration loaded from TOML
//! - [`bridge`] - the boundary operations, `ExceptionBridge` and reporting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use rethrow_bridge as bridge;
pub use rethrow_config as config;
pub use rethrow_core as core;

pub use rethrow_core::{VERSION_NUMBER, VERSION_STRING};

/// Common imports for rethrow users
pub mod prelude {
    pub use crate::bridge::{
        capture_if_kind, observe_and_rethrow, observe_and_suppress, CaptureKindExt,
        ExceptionBridge, FaultBridgeExt, FaultReport, FaultReporter,
    };
    pub use crate::config::{BridgeConfig, LogLevel};
    pub use crate::core::kind::{
        FaultKind, EXCEPTION, GENERIC_EXCEPTION, INDEX_OUT_OF_BOUNDS, INTERNAL_INCONSISTENCY,
        INVALID_ARGUMENT, IO_ERROR, PANIC, RANGE_ERROR,
    };
    pub use crate::core::{
        catch_panic, install_fault_panic_hook, matching, Fault, FaultResult, KindMatcher,
    };
}

/// Installs a `tracing` subscriber that writes bridge events to stderr.
///
/// Intended for binaries and tests; libraries should leave subscriber
/// installation to the application. Fails if a global subscriber is already
/// set. Pair it with [`core::install_fault_panic_hook`] to log raised faults
/// here instead of on stderr.
pub fn init_tracing(
    level: config::LogLevel,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let max_level = match level {
        config::LogLevel::Debug => tracing::Level::DEBUG,
        config::LogLevel::Info => tracing::Level::INFO,
        config::LogLevel::Warning => tracing::Level::WARN,
        config::LogLevel::Error | config::LogLevel::Fatal => tracing::Level::ERROR,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .try_init()
}
