//! Safety layer: validates every user-supplied value against the active
//! profile before anything is sent to the device.
//!
//! ## Bounds
//! - **Speed**: profile range (1..=164 on current firmware, 0..=100 with a
//!   0x40 wire bias over libusb)
//! - **DPI**: 50..=8200, converted to a speed step
//! - **Polling rate**: 125, 250, 500 or 1000 Hz only
//! - **Smart-scroll**: mode index below the profile's mode count
//!
//! All validation happens BEFORE any transport call; a rejected value never
//! produces a report.

use crate::device::{PollingRate, Profile};
use crate::error::{Error, Result};
use crate::smart_scroll::SmartScroll;
use crate::speed::{DPI_MAX, DPI_MIN};

const OUT_OF_RANGE: &str = "Option value out of range";

/// Parse a decimal option value.
pub fn parse_number(flag: char, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid(flag, "Option value is not a number"))
}

/// Lift-off detection flag: zero disables, anything else enables.
pub fn validate_liftoff(value: i64) -> bool {
    value != 0
}

/// Validate a polling rate in Hz.
pub fn validate_polling_rate(hz: i64) -> Result<PollingRate> {
    u16::try_from(hz)
        .ok()
        .and_then(PollingRate::from_hz)
        .ok_or_else(|| Error::invalid('p', "Unsupported polling rate"))
}

/// Validate a raw speed value against the profile's range.
pub fn validate_speed(profile: &Profile, speed: i64) -> Result<u8> {
    u8::try_from(speed)
        .ok()
        .filter(|s| (profile.speed_min..=profile.speed_max).contains(s))
        .ok_or_else(|| Error::invalid('s', OUT_OF_RANGE))
}

/// Validate a DPI value.
pub fn validate_dpi(dpi: i64) -> Result<u16> {
    u16::try_from(dpi)
        .ok()
        .filter(|d| (DPI_MIN..=DPI_MAX).contains(d))
        .ok_or_else(|| Error::invalid('d', OUT_OF_RANGE))
}

/// Validate a smart-scroll mode index against the profile's mode count.
pub fn validate_smart_scroll(profile: &Profile, mode: i64) -> Result<SmartScroll> {
    u8::try_from(mode)
        .ok()
        .filter(|m| *m < profile.smart_scroll_modes)
        .and_then(SmartScroll::from_index)
        .ok_or_else(|| Error::invalid('S', OUT_OF_RANGE))
}
