//! Error types
//!
//! Nothing here ever reaches the visitor. Storage and capability errors are
//! logged and degraded at the call site; these types exist so the pure core
//! can say what went wrong.

use thiserror::Error;

use crate::anim::AnimPhase;

/// Errors from driving a count-up run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimError {
    /// `start` was called on a display that is not idle.
    #[error("count-up already started (phase: {phase:?})")]
    AlreadyStarted { phase: AnimPhase },
}

/// Errors from the client-local key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Storage is disabled or missing (private browsing, native build).
    #[error("storage unavailable")]
    Unavailable,

    /// The store refused the operation (quota exceeded, security error).
    #[error("storage rejected {op} of {key:?}: {reason}")]
    Rejected {
        op: &'static str,
        key: String,
        reason: String,
    },
}

/// Errors from loading landing page settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors from reading counter props off markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropsError {
    #[error("missing count-up value")]
    MissingValue,

    #[error("invalid count-up value {0:?}")]
    InvalidValue(String),
}
