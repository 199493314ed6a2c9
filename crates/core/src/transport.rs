//! Transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that the hidraw, hidapi and USB
//! backends, the dry-run recorder, and mock devices share one interface.

use crate::command::{report_hex, Command, Report};
use crate::error::{Error, Result};
use std::sync::Mutex;
use tracing::{trace, warn};

/// Abstraction over a feature-report channel to the device.
///
/// Closing the channel is the implementation's `Drop`.
pub trait HidTransport: Send {
    /// Deliver one 8-byte feature report.
    fn send_report(&self, report: &Report) -> Result<()>;
}

impl<T: HidTransport + ?Sized> HidTransport for Box<T> {
    fn send_report(&self, report: &Report) -> Result<()> {
        (**self).send_report(report)
    }
}

/// Encode a command and send it, naming `operation` on failure.
pub fn send_command(
    transport: &dyn HidTransport,
    operation: &'static str,
    command: Command,
) -> Result<()> {
    let report = command.encode();
    trace!(
        operation,
        opcode = format_args!("0x{:02X}", command.opcode()),
        report_hex = %report_hex(&report),
        "TX"
    );

    transport.send_report(&report).map_err(|e| {
        warn!(operation, error = %e, "Report transmission failed");
        Error::TransmitFailed {
            operation,
            reason: e.to_string(),
        }
    })
}

/// Transport that records reports instead of sending them.
///
/// Backs `--dry-run`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Report>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports recorded so far, in send order.
    pub fn reports(&self) -> Vec<Report> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl HidTransport for RecordingTransport {
    fn send_report(&self, report: &Report) -> Result<()> {
        let mut sent = self.sent.lock().map_err(|_| Error::TransmitFailed {
            operation: "record",
            reason: "recorder lock poisoned".to_string(),
        })?;
        sent.push(*report);
        Ok(())
    }
}
