//! Domain layer: pure lifecycle decisions and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod action;
pub mod config;
pub mod decision;
pub mod error;
pub mod phase;
pub mod report;

pub use action::{AccountAction, Action, UnitAction};
pub use config::{LifecycleConfig, validate_config_key, validate_config_value};
pub use decision::{Capability, HookStrategy, ManualFallback, NativeHooks, plan, strategy_for};
pub use error::{ConfigError, PhaseError, ProvisioningError, UnitError};
pub use phase::{RemainingCount, TransactionPhase};
pub use report::{ActionOutcome, ActionStatus, Severity, TransactionReport};
