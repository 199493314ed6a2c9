//! Smart-scroll wheel behaviour (opcodes 0x03, 0x04, 0x05).
//!
//! Every mode is written as three commands in opcode order. If one fails the
//! remaining ones are not sent.

use crate::command::{opcodes, Command};
use crate::device::Profile;
use crate::error::Result;
use crate::safety;
use crate::transport::{send_command, HidTransport};
use tracing::info;

/// Smart-scroll mode, selected on the command line by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmartScroll {
    /// Ratcheted wheel, smart-scroll disabled.
    Off = 0,
    /// Smart-scroll enabled.
    On = 1,
    /// Free-spinning wheel.
    FreeSpin = 2,
    /// Smart-scroll with free spin.
    SmartFreeSpin = 3,
}

impl SmartScroll {
    pub const ALL: &'static [SmartScroll] = &[
        SmartScroll::Off,
        SmartScroll::On,
        SmartScroll::FreeSpin,
        SmartScroll::SmartFreeSpin,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// The three commands for this mode, in transmission order.
    pub fn commands(&self) -> [Command; 3] {
        let [state, ratchet, spin] = opcodes::SMART_SCROLL;
        let state_val = match self {
            Self::On | Self::SmartFreeSpin => 0x00,
            Self::Off | Self::FreeSpin => 0x01,
        };
        let ratchet_val = match self {
            Self::Off | Self::SmartFreeSpin => 0xFF,
            Self::On | Self::FreeSpin => 0x00,
        };
        let spin_val = match self {
            Self::Off => 0x00,
            _ => 0x01,
        };
        [
            Command::new(state, 0x00, state_val),
            Command::new(ratchet, ratchet_val, 0x00),
            Command::new(spin, 0x00, spin_val),
        ]
    }
}

/// Validate a mode index against the profile and write it to the device.
pub fn write_smart_scroll(
    transport: &dyn HidTransport,
    profile: &Profile,
    mode: i64,
) -> Result<SmartScroll> {
    let mode = safety::validate_smart_scroll(profile, mode)?;
    for command in mode.commands() {
        send_command(transport, "set_smartscroll", command)?;
    }
    info!(mode = ?mode, "Smart-scroll set");
    Ok(mode)
}
