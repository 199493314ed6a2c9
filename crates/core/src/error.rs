//! Error types for cadmouse-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No device with the CadMouse VID/PID was enumerated.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// A matching device was found but could not be opened.
    #[error("failed to open device: {0}")]
    OpenFailed(String),

    /// The USB interface could not be claimed.
    #[error("failed to claim interface: {0}")]
    InterfaceClaimFailed(String),

    /// A report could not be delivered to the device.
    #[error("{operation}: {reason}")]
    TransmitFailed {
        operation: &'static str,
        reason: String,
    },

    /// A command-line value was malformed, out of range, or conflicting.
    #[error("-{flag}: {reason}")]
    InvalidArgument { flag: char, reason: String },

    /// The requested backend was not compiled into this build.
    #[error("backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),
}

impl Error {
    pub(crate) fn invalid(flag: char, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            flag,
            reason: reason.into(),
        }
    }

    /// Whether the error only affects the flag that produced it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
