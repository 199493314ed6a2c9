//! Pointer speed (opcode 0x01) and DPI-to-speed conversion.
//!
//! The sensor exposes 164 speed steps spanning 50..=8200 DPI; a DPI value is
//! mapped to `dpi * 164 / 8200` (truncating) and written as a speed.

use crate::command::{opcodes, Command};
use crate::device::Profile;
use crate::error::Result;
use crate::safety;
use crate::transport::{send_command, HidTransport};
use tracing::info;

/// DPI constraints.
pub const DPI_MIN: u16 = 50;
pub const DPI_MAX: u16 = 8200;

/// Number of speed steps across the DPI range.
pub const SPEED_STEPS: u16 = 164;

/// Convert a DPI value to a speed step.
pub fn dpi_to_speed(dpi: u16) -> u8 {
    // 8200 * 164 fits comfortably in u32; the quotient is at most 164.
    (u32::from(dpi) * u32::from(SPEED_STEPS) / u32::from(DPI_MAX)) as u8
}

/// Write a pointer speed to the device.
///
/// The value is validated against the profile before sending and the
/// profile's wire bias is added.
pub fn write_speed(transport: &dyn HidTransport, profile: &Profile, speed: i64) -> Result<u8> {
    let validated = safety::validate_speed(profile, speed)?;
    let wire = validated + profile.speed_bias;
    send_command(transport, "set_speed", Command::new(opcodes::SPEED, 0x00, wire))?;
    info!(speed = validated, wire, "Pointer speed set");
    Ok(validated)
}

/// Write a DPI value as the equivalent pointer speed.
///
/// Returns the speed step that was written.
pub fn write_dpi(transport: &dyn HidTransport, profile: &Profile, dpi: i64) -> Result<u8> {
    let validated = safety::validate_dpi(dpi)?;
    let speed = dpi_to_speed(validated);
    let wire = speed + profile.speed_bias;
    send_command(transport, "set_speed", Command::new(opcodes::SPEED, 0x00, wire))?;
    info!(dpi = validated, speed, "Pointer speed set from DPI");
    Ok(speed)
}
