// ============================================================
// Layer 3 — Compute Device
// ============================================================
// The device is decided once at start-up and never changes.
// Asking for the accelerator when none can be reached is fatal.

use crate::domain::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeDevice {
    /// GPU through the wgpu backend
    Accelerator,
    /// ndarray backend on the host CPU
    Cpu,
}

impl ComputeDevice {
    /// Resolve the `--cuda` flag. `available` is only consulted when the
    /// accelerator is requested.
    pub fn select(cuda: bool, available: impl FnOnce() -> bool) -> Result<Self, ConfigError> {
        if !cuda {
            return Ok(ComputeDevice::Cpu);
        }
        if available() {
            Ok(ComputeDevice::Accelerator)
        } else {
            Err(ConfigError::AcceleratorUnavailable)
        }
    }
}
