//! The fault value carried across bridge boundaries.

use crate::kind::{FaultKind, GENERIC_EXCEPTION};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type alias for units of work that may fault.
pub type FaultResult<T> = Result<T, Fault>;

/// An abnormal-termination signal raised by a unit of work.
///
/// A fault carries its [`FaultKind`], a human-readable message and an optional
/// map of diagnostic values. Faults are plain values: they can be cloned,
/// compared, serialised and returned through `Result`, or raised as a panic
/// with [`Fault::raise`].
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind}: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    user_info: BTreeMap<String, Value>,
}

impl Fault {
    /// Creates a fault of the given kind.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            user_info: BTreeMap::new(),
        }
    }

    /// Helper for creating an unclassified fault.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(GENERIC_EXCEPTION, message)
    }

    /// Attaches a diagnostic value under `key`, replacing any previous value.
    pub fn with_user_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_info.insert(key.into(), value.into());
        self
    }

    /// Returns the fault's kind.
    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }

    /// Returns the kind name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the diagnostic values attached to this fault.
    pub fn user_info(&self) -> &BTreeMap<String, Value> {
        &self.user_info
    }

    /// Looks up a single diagnostic value.
    pub fn user_info_value(&self, key: &str) -> Option<&Value> {
        self.user_info.get(key)
    }

    /// Returns `true` when this fault's kind is `kind` or a subkind of it.
    pub fn is_kind_of(&self, kind: &FaultKind) -> bool {
        self.kind.is_kind_of(kind)
    }

    /// Returns the same fault re-categorised under `kind`, keeping message and
    /// diagnostic values.
    pub fn rekind(mut self, kind: FaultKind) -> Self {
        self.kind = kind;
        self
    }
}
