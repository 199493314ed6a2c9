//! cadmouse-core: command protocol, setting translators, and transports.
//!
//! This crate provides the logic for configuring a 3Dconnexion CadMouse by
//! sending vendor-defined 8-byte feature reports over hidraw, hidapi, or raw
//! USB control transfers.

pub mod backend;
pub mod buttons;
pub mod command;
pub mod device;
pub mod driver;
pub mod error;
#[cfg(test)]
mod integration_tests;
pub mod liftoff;
pub mod report_rate;
pub mod safety;
pub mod smart_scroll;
pub mod speed;
pub mod transport;

/// 3Dconnexion USB Vendor ID.
pub const CADMOUSE_VID: u16 = 0x256F;

/// CadMouse USB Product ID.
pub const CADMOUSE_PID: u16 = 0xC650;
