//! Command implementations

pub mod config;
pub mod hook;
pub mod plan;
pub mod status;
pub mod version;

use clap::Args;

use crate::domain::{RemainingCount, TransactionPhase};

/// Arguments shared by `hook` and `plan`.
#[derive(Args)]
pub struct PhaseArgs {
    /// Transaction phase (pre-install, post-install, pre-removal, post-removal)
    pub phase: TransactionPhase,

    /// Versions installed after this transaction
    #[arg(allow_hyphen_values = true)]
    pub remaining: RemainingCount,
}
