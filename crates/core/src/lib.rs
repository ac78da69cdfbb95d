//! Rethrow Core
//!
//! The fault model shared by every rethrow crate: [`Fault`] values, the
//! [`FaultKind`] hierarchy used for polymorphic matching, the [`BridgeState`]
//! lifecycle, and the bridge between unwinding panics and `Result`.

pub mod fault;
pub mod kind;
pub mod panic;
pub mod state;
pub mod version;

// Re-export commonly used types
pub use fault::{Fault, FaultResult};
pub use kind::{matching, FaultKind, KindMatcher, KindPredicate};
pub use panic::{
    catch_fault, catch_panic, catch_unwinding, install_fault_panic_hook, CaughtPanic,
};
pub use state::{BridgeState, StateTrail};
pub use version::{VERSION_NUMBER, VERSION_STRING};
