//! Infrastructure layer: concrete implementations of application port traits.
//!
//! All I/O-performing code lives here.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod accounts;
pub mod command_runner;
pub mod config;
pub mod probe;
pub mod systemctl;


pub use accounts::ShadowAccounts;
pub use command_runner::TokioCommandRunner;
pub use config::YamlConfigStore;
pub use probe::{FixedCapability, MacroFileProbe};
pub use systemctl::SystemctlManager;
