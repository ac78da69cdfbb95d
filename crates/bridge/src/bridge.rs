//! Configured exception bridge.

use crate::ops;
use crate::report::{fault_reporter, Disposition, FaultReport, FaultReporter, Operation};
use rethrow_config::{BridgeConfig, LogLevel};
use rethrow_core::{catch_unwinding, Fault, FaultKind, FaultResult, KindMatcher};
use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Runs the boundary operations with panic capture, logging and reporting
/// applied according to a [`BridgeConfig`].
///
/// With `capture_panics` on, a unit of work that panics is treated as if it
/// had returned the resulting [`Fault`] (see [`rethrow_core::catch_panic`]).
/// A panic whose payload is not a `Fault` is observed and reported through
/// its `Panic` fault view. If the operation propagates it, the original
/// payload is resumed unchanged instead of being returned as `Err`.
#[derive(Clone, Default)]
pub struct ExceptionBridge {
    config: BridgeConfig,
    reporter: Option<Arc<dyn FaultReporter>>,
}

impl ExceptionBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            reporter: None,
        }
    }

    /// Builds a bridge from the process-wide configuration snapshot.
    pub fn from_current_config() -> Self {
        Self::new(BridgeConfig::current())
    }

    /// Uses `reporter` instead of the process-wide one.
    pub fn with_reporter(mut self, reporter: Arc<dyn FaultReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// See [`ops::observe_and_rethrow`].
    pub fn observe_and_rethrow<T, W, O>(&self, work: W, observer: O) -> FaultResult<T>
    where
        W: FnOnce() -> FaultResult<T>,
        O: FnOnce(&Fault),
    {
        let foreign = Cell::new(None);
        let result = ops::observe_and_rethrow(
            || self.run(work, &foreign),
            |fault| {
                self.notice(fault, Operation::ObserveAndRethrow, Disposition::Propagated);
                observer(fault);
            },
        );
        resume_foreign(&foreign);
        result
    }

    /// See [`ops::observe_and_suppress`].
    pub fn observe_and_suppress<T, W, H>(&self, work: W, handler: H) -> Option<T>
    where
        W: FnOnce() -> FaultResult<T>,
        H: FnOnce(&Fault),
    {
        // Absorbed foreign payloads are dropped with the cell.
        let foreign = Cell::new(None);
        ops::observe_and_suppress(
            || self.run(work, &foreign),
            |fault| {
                self.notice(fault, Operation::ObserveAndSuppress, Disposition::Absorbed);
                handler(fault);
            },
        )
    }

    /// See [`ops::capture_if_kind`].
    pub fn capture_if_kind<M, W>(&self, expected: M, work: W) -> FaultResult<Option<Fault>>
    where
        M: KindMatcher,
        W: FnOnce() -> FaultResult<()>,
    {
        let foreign = Cell::new(None);
        let outcome = ops::capture_if_kind_with(
            expected,
            || self.run(work, &foreign),
            |fault, disposition| self.notice(fault, Operation::CaptureIfKind, disposition),
        );
        if outcome.is_err() {
            resume_foreign(&foreign);
        }
        outcome
    }

    /// Returns `true` when `fault` is a kind of one of the configured
    /// `reported_kinds` and reporting is enabled.
    pub fn should_report(&self, fault: &Fault) -> bool {
        self.config.reports_any(fault.kind().ancestors().map(FaultKind::name))
    }

    /// Runs `work`, folding panics into `Err` when capture is on. A payload
    /// that is not a `Fault` is parked in `foreign`.
    fn run<T, W>(&self, work: W, foreign: &Cell<Option<Box<dyn Any + Send>>>) -> FaultResult<T>
    where
        W: FnOnce() -> FaultResult<T>,
    {
        if !self.config.capture_panics {
            return work();
        }
        match catch_unwinding(work) {
            Ok(result) => result,
            Err(caught) => {
                let (fault, payload) = caught.into_parts();
                foreign.set(payload);
                Err(fault)
            }
        }
    }

    fn notice(&self, fault: &Fault, operation: Operation, disposition: Disposition) {
        log_fault(self.config.log_level, fault, operation, disposition);

        if !self.should_report(fault) {
            return;
        }
        // Clone the reporter out so no lock is held while it runs.
        let reporter = self.reporter.clone().or_else(fault_reporter);
        match reporter {
            Some(reporter) => reporter.report(&FaultReport::new(fault, operation, disposition)),
            None => debug!(kind = %fault.kind(), "no fault reporter installed"),
        }
    }
}

fn resume_foreign(foreign: &Cell<Option<Box<dyn Any + Send>>>) {
    if let Some(payload) = foreign.take() {
        panic::resume_unwind(payload);
    }
}

impl fmt::Debug for ExceptionBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionBridge")
            .field("config", &self.config)
            .field("has_reporter", &self.reporter.is_some())
            .finish()
    }
}

macro_rules! log_at {
    ($macro:ident, $fault:expr, $operation:expr, $disposition:expr) => {
        $macro!(
            operation = %$operation,
            disposition = %$disposition,
            kind = %$fault.kind(),
            reason = %$fault.message(),
            "fault observed"
        )
    };
}

fn log_fault(level: LogLevel, fault: &Fault, operation: Operation, disposition: Disposition) {
    match level {
        LogLevel::Debug => log_at!(debug, fault, operation, disposition),
        LogLevel::Info => log_at!(info, fault, operation, disposition),
        LogLevel::Warning => log_at!(warn, fault, operation, disposition),
        LogLevel::Error | LogLevel::Fatal => log_at!(error, fault, operation, disposition),
    }
}
