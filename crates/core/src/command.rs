//! CadMouse command encoding.
//!
//! Every setting is written with the same 8-byte feature report:
//!
//! ```text
//! [0x0C, opcode, val1, val2, 0x00, 0x00, 0x00, 0x00]
//! ```
//!
//! Byte 0 is the report ID. The opcode selects the setting; `val1` and `val2`
//! are opcode-specific operands.

use serde::Serialize;

/// Feature report ID carrying configuration commands.
pub const REPORT_ID: u8 = 0x0C;

/// Report length (including report ID).
pub const REPORT_LEN: usize = 8;

/// A fully encoded feature report.
pub type Report = [u8; REPORT_LEN];

/// Device opcodes.
///
/// Button remap opcodes are the hardware button IDs in
/// [`crate::buttons::HARDWARE_BUTTONS`] (0x0A..=0x10).
pub mod opcodes {
    /// Pointer speed.
    pub const SPEED: u8 = 0x01;
    /// Smart-scroll sub-settings, always written in this order.
    pub const SMART_SCROLL: [u8; 3] = [0x03, 0x04, 0x05];
    /// Polling rate.
    pub const POLL_RATE: u8 = 0x06;
    /// Lift-off detection.
    pub const LIFTOFF: u8 = 0x07;
}

/// A single device command.
///
/// Commands are only built by the setting translators in this crate, so every
/// command that reaches a transport carries a documented opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Command {
    opcode: u8,
    val1: u8,
    val2: u8,
}

impl Command {
    pub(crate) const fn new(opcode: u8, val1: u8, val2: u8) -> Self {
        Self { opcode, val1, val2 }
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn val1(&self) -> u8 {
        self.val1
    }

    pub fn val2(&self) -> u8 {
        self.val2
    }

    /// Encode into the 8-byte feature report.
    pub fn encode(&self) -> Report {
        [REPORT_ID, self.opcode, self.val1, self.val2, 0, 0, 0, 0]
    }

    /// Decode a report previously produced by [`Command::encode`].
    ///
    /// Returns `None` for a foreign report ID or non-zero padding.
    pub fn decode(report: &Report) -> Option<Self> {
        if report[0] != REPORT_ID || report[4..].iter().any(|&b| b != 0) {
            return None;
        }
        Some(Self::new(report[1], report[2], report[3]))
    }
}

/// Format a report as space-separated hex bytes.
pub fn report_hex(report: &Report) -> String {
    report
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
