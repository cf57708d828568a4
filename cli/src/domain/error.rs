//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Invocation errors ─────────────────────────────────────────────────────────

/// Errors raised while interpreting the arguments a packaging tool passes to a hook.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error(
        "Unknown transaction phase '{0}'. \
         Expected one of: pre-install, post-install, pre-removal, post-removal (or pre, post, preun, postun)"
    )]
    UnknownPhase(String),

    #[error("Invalid remaining-count argument '{0}': must be a non-negative integer")]
    InvalidCount(String),
}

// ── Account provisioning errors ───────────────────────────────────────────────

/// Errors from the account database (group creation, membership changes).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProvisioningError {
    /// The group already exists. Tolerated by the pre-install handler.
    #[error("group '{0}' already exists")]
    GroupAlreadyExists(String),

    #[error("{command} exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("{command} could not be run: {reason}")]
    Unavailable { command: String, reason: String },
}

// ── Unit errors ───────────────────────────────────────────────────────────────

/// Errors from the service manager when acting on a unit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    /// `command` is the full command line, e.g. `systemctl daemon-reload`.
    #[error("{command} exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}
