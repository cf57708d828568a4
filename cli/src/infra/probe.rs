//! Infrastructure implementation of the `CapabilityProbe` port.

use std::path::PathBuf;

use crate::application::ports::CapabilityProbe;
use crate::domain::Capability;

/// Directory systemd creates at boot; its presence means systemd is PID 1.
pub const SYSTEMD_RUNTIME_DIR: &str = "/run/systemd/system";

/// Native integration requires both the packaging macro file and a running systemd.
pub struct MacroFileProbe {
    macros_path: PathBuf,
    runtime_dir: PathBuf,
}

impl MacroFileProbe {
    pub fn new(macros_path: impl Into<PathBuf>) -> Self {
        Self::with_runtime_dir(macros_path, SYSTEMD_RUNTIME_DIR)
    }

    /// Probe with an explicit runtime directory (used in tests).
    pub fn with_runtime_dir(macros_path: impl Into<PathBuf>, runtime_dir: impl Into<PathBuf>) -> Self {
        Self {
            macros_path: macros_path.into(),
            runtime_dir: runtime_dir.into(),
        }
    }

    fn macros_present(&self) -> bool {
        self.macros_path.is_file()
    }

    fn systemd_booted(&self) -> bool {
        self.runtime_dir.is_dir()
    }
}

impl CapabilityProbe for MacroFileProbe {
    fn detect(&self) -> Capability {
        let macros = self.macros_present();
        let booted = self.systemd_booted();
        tracing::debug!(
            macros_path = %self.macros_path.display(),
            macros,
            booted,
            "probed service-manager capability"
        );
        if macros && booted {
            Capability::Native
        } else {
            Capability::Fallback
        }
    }
}

/// Probe that always returns the same answer; backs `--integration native|fallback`.
pub struct FixedCapability(pub Capability);

impl CapabilityProbe for FixedCapability {
    fn detect(&self) -> Capability {
        self.0
    }
}
