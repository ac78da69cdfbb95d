//! Fault reporting.
//!
//! A [`FaultReporter`] receives a [`FaultReport`] for every fault an
//! [`crate::ExceptionBridge`] is configured to report. One reporter can be
//! installed process-wide; a bridge may carry its own reporter instead.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rethrow_core::{BridgeState, Fault};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Which boundary operation observed a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ObserveAndRethrow,
    ObserveAndSuppress,
    CaptureIfKind,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ObserveAndRethrow => write!(f, "observe_and_rethrow"),
            Operation::ObserveAndSuppress => write!(f, "observe_and_suppress"),
            Operation::CaptureIfKind => write!(f, "capture_if_kind"),
        }
    }
}

/// What happened to a fault once it had been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Passed on to the caller.
    Propagated,
    /// Returned as data or dropped.
    Absorbed,
}

impl Disposition {
    /// Terminal lifecycle state matching this disposition.
    pub fn state(self) -> BridgeState {
        match self {
            Disposition::Propagated => BridgeState::Propagated,
            Disposition::Absorbed => BridgeState::Absorbed,
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Propagated => write!(f, "propagated"),
            Disposition::Absorbed => write!(f, "absorbed"),
        }
    }
}

/// Diagnostic snapshot of a fault handed to a [`FaultReporter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultReport {
    pub name: String,
    pub kind_path: String,
    pub reason: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub user_info: BTreeMap<String, Value>,
    pub operation: Operation,
    pub disposition: Disposition,
}

impl FaultReport {
    pub fn new(fault: &Fault, operation: Operation, disposition: Disposition) -> Self {
        Self {
            name: fault.name().to_string(),
            kind_path: fault.kind().path(),
            reason: fault.message().to_string(),
            user_info: fault.user_info().clone(),
            operation,
            disposition,
        }
    }

    /// Serialises the report as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receives reports for faults selected by the bridge configuration.
pub trait FaultReporter: Send + Sync {
    fn report(&self, report: &FaultReport);
}

impl<F> FaultReporter for F
where
    F: Fn(&FaultReport) + Send + Sync,
{
    fn report(&self, report: &FaultReport) {
        self(report)
    }
}

/// Emits every report as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl FaultReporter for TracingReporter {
    fn report(&self, report: &FaultReport) {
        tracing::error!(
            name = %report.name,
            reason = %report.reason,
            operation = %report.operation,
            disposition = %report.disposition,
            user_info = ?report.user_info,
            "fault reported"
        );
    }
}

static FAULT_REPORTER: Lazy<RwLock<Option<Arc<dyn FaultReporter>>>> =
    Lazy::new(|| RwLock::new(None));

/// Installs the process-wide reporter, returning the one it replaces.
pub fn set_fault_reporter(reporter: Arc<dyn FaultReporter>) -> Option<Arc<dyn FaultReporter>> {
    FAULT_REPORTER.write().replace(reporter)
}

/// Removes the process-wide reporter, returning it.
pub fn clear_fault_reporter() -> Option<Arc<dyn FaultReporter>> {
    FAULT_REPORTER.write().take()
}

/// Returns the process-wide reporter, if one is installed.
pub fn fault_reporter() -> Option<Arc<dyn FaultReporter>> {
    FAULT_REPORTER.read().clone()
}
