//! Lift-off detection (opcode 0x07).
//!
//! `val2` is 0x00 to report movement only while the sensor is on the surface,
//! 0x1F to keep tracking when the mouse is lifted.

use crate::command::{opcodes, Command};
use crate::error::Result;
use crate::transport::{send_command, HidTransport};
use tracing::info;

const ENABLED: u8 = 0x00;
const DISABLED: u8 = 0x1F;

fn liftoff_command(enabled: bool) -> Command {
    Command::new(opcodes::LIFTOFF, 0x00, if enabled { ENABLED } else { DISABLED })
}

/// Enable or disable lift-off detection.
pub fn write_liftoff_detection(transport: &dyn HidTransport, enabled: bool) -> Result<()> {
    send_command(transport, "set_liftoff_detection", liftoff_command(enabled))?;
    info!(enabled, "Lift-off detection set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    #[test]
    fn enabled_sends_zero() {
        let mock = MockTransport::new();
        write_liftoff_detection(&mock, true).unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x07, 0x00, 0x00, 0, 0, 0, 0]]);
    }

    #[test]
    fn disabled_sends_1f() {
        let mock = MockTransport::new();
        write_liftoff_detection(&mock, false).unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x07, 0x00, 0x1F, 0, 0, 0, 0]]);
    }
}
