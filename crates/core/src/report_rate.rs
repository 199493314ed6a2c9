//! Polling rate write (opcode 0x06).
//!
//! Rate encoding is a one-hot interval mask:
//! 0x01 = 1ms (1000Hz), 0x02 = 2ms (500Hz), 0x04 = 4ms (250Hz), 0x08 = 8ms (125Hz)

use crate::command::{opcodes, Command};
use crate::device::PollingRate;
use crate::error::Result;
use crate::transport::{send_command, HidTransport};
use tracing::info;

/// Convert a PollingRate to the device's interval mask.
pub fn rate_to_mask(rate: PollingRate) -> u8 {
    match rate {
        PollingRate::Hz1000 => 0x01,
        PollingRate::Hz500 => 0x02,
        PollingRate::Hz250 => 0x04,
        PollingRate::Hz125 => 0x08,
    }
}

/// Write a polling rate to the device.
pub fn write_report_rate(transport: &dyn HidTransport, rate: PollingRate) -> Result<()> {
    let command = Command::new(opcodes::POLL_RATE, 0x00, rate_to_mask(rate));
    send_command(transport, "set_pollrate", command)?;
    info!(rate = %rate, "Polling rate set");
    Ok(())
}
