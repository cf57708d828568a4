//! Transaction phases and the remaining-count argument.
//!
//! Pure types only. The remaining count always means "versions of the package
//! that will be installed once this transaction completes", never "before".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::PhaseError;

/// The point in a package transaction at which a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionPhase {
    PreInstall,
    PostInstall,
    PreRemoval,
    PostRemoval,
}

impl TransactionPhase {
    /// All phases in the order a fresh install followed by a removal visits them.
    pub const ALL: [TransactionPhase; 4] = [
        TransactionPhase::PreInstall,
        TransactionPhase::PostInstall,
        TransactionPhase::PreRemoval,
        TransactionPhase::PostRemoval,
    ];

    /// Canonical kebab-case name, as accepted on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreInstall => "pre-install",
            Self::PostInstall => "post-install",
            Self::PreRemoval => "pre-removal",
            Self::PostRemoval => "post-removal",
        }
    }

    /// Name of the matching RPM scriptlet section.
    #[must_use]
    pub fn scriptlet(self) -> &'static str {
        match self {
            Self::PreInstall => "%pre",
            Self::PostInstall => "%post",
            Self::PreRemoval => "%preun",
            Self::PostRemoval => "%postun",
        }
    }
}

impl fmt::Display for TransactionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionPhase {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre-install" | "preinstall" | "pre" => Ok(Self::PreInstall),
            "post-install" | "postinstall" | "post" => Ok(Self::PostInstall),
            "pre-removal" | "preremoval" | "preun" => Ok(Self::PreRemoval),
            "post-removal" | "postremoval" | "postun" => Ok(Self::PostRemoval),
            _ => Err(PhaseError::UnknownPhase(s.to_string())),
        }
    }
}

/// Number of package versions that will remain installed after the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemainingCount(u32);

impl RemainingCount {
    #[must_use]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// `N == 0` on the removal side: nothing of this package survives.
    #[must_use]
    pub const fn is_final_removal(self) -> bool {
        self.0 == 0
    }

    /// `N == 1` on the install side: this is the only version, so a fresh install.
    #[must_use]
    pub const fn is_first_install(self) -> bool {
        self.0 == 1
    }

    /// `N >= 1` on the removal side: another version remains, so an upgrade.
    #[must_use]
    pub const fn is_upgrade(self) -> bool {
        self.0 >= 1
    }
}

impl fmt::Display for RemainingCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RemainingCount {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

impl FromStr for RemainingCount {
    type Err = PhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| PhaseError::InvalidCount(s.to_string()))
    }
}
