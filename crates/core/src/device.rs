//! Device model: backends, per-backend profiles, and setting value types.

use crate::buttons::{Button, FUNCTIONS, FUNCTIONS_WITHOUT_EXTRA};

/// Transport backend used to reach the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// hidapi library.
    Hidapi,
    /// Linux `/dev/hidrawN` node with `HIDIOCSFEATURE`.
    Hidraw,
    /// libusb control transfers.
    Usb,
}

impl Backend {
    /// All backends, in default-selection order.
    pub const ALL: &'static [Backend] = &[Backend::Hidapi, Backend::Hidraw, Backend::Usb];

    /// Short name used on the command line and in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hidapi => "hidapi",
            Self::Hidraw => "hidraw",
            Self::Usb => "usb",
        }
    }

    /// Whether this backend was compiled into the build.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Hidapi => cfg!(feature = "hidapi"),
            Self::Hidraw => cfg!(all(feature = "hidraw", target_os = "linux")),
            Self::Usb => cfg!(feature = "usb"),
        }
    }

    /// First compiled-in backend.
    pub fn default_available() -> Option<Backend> {
        Self::ALL.iter().copied().find(Backend::is_available)
    }

    /// Firmware/transport-dependent setting limits.
    pub fn profile(&self) -> &'static Profile {
        match self {
            Self::Hidapi => &HIDAPI_PROFILE,
            Self::Hidraw => &HIDRAW_PROFILE,
            Self::Usb => &USB_PROFILE,
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Setting limits for one backend.
#[derive(Debug)]
pub struct Profile {
    /// Lowest accepted `-s` value.
    pub speed_min: u8,
    /// Highest accepted `-s` value.
    pub speed_max: u8,
    /// Added to the speed value before it is put on the wire.
    pub speed_bias: u8,
    /// Whether `-d` is offered.
    pub supports_dpi: bool,
    /// Number of smart-scroll modes, starting at 0.
    pub smart_scroll_modes: u8,
    /// Logical functions assignable to hardware buttons.
    pub functions: &'static [Button],
}

pub static HIDRAW_PROFILE: Profile = Profile {
    speed_min: 1,
    speed_max: 164,
    speed_bias: 0,
    supports_dpi: true,
    smart_scroll_modes: 4,
    functions: FUNCTIONS,
};

pub static HIDAPI_PROFILE: Profile = Profile {
    speed_min: 1,
    speed_max: 164,
    speed_bias: 0,
    supports_dpi: true,
    smart_scroll_modes: 4,
    functions: FUNCTIONS,
};

// Older firmware reached over libusb: speed is offset by 0x40 and only the
// plain on/off smart-scroll modes exist.
pub static USB_PROFILE: Profile = Profile {
    speed_min: 0,
    speed_max: 100,
    speed_bias: 0x40,
    supports_dpi: false,
    smart_scroll_modes: 2,
    functions: FUNCTIONS_WITHOUT_EXTRA,
};

/// Polling rate options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PollingRate {
    Hz125 = 125,
    Hz250 = 250,
    Hz500 = 500,
    Hz1000 = 1000,
}

impl PollingRate {
    /// Convert from raw Hz value.
    pub fn from_hz(hz: u16) -> Option<Self> {
        match hz {
            125 => Some(Self::Hz125),
            250 => Some(Self::Hz250),
            500 => Some(Self::Hz500),
            1000 => Some(Self::Hz1000),
            _ => None,
        }
    }

    /// Get the Hz value.
    pub fn as_hz(&self) -> u16 {
        *self as u16
    }

    /// All supported rates.
    pub const ALL: &'static [PollingRate] = &[
        PollingRate::Hz125,
        PollingRate::Hz250,
        PollingRate::Hz500,
        PollingRate::Hz1000,
    ];
}

impl std::fmt::Display for PollingRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.as_hz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_rate_roundtrip() {
        for rate in PollingRate::ALL {
            assert_eq!(PollingRate::from_hz(rate.as_hz()), Some(*rate));
        }
    }

    #[test]
    fn polling_rate_rejects_invalid() {
        assert_eq!(PollingRate::from_hz(200), None);
        assert_eq!(PollingRate::from_hz(0), None);
    }

    #[test]
    fn biased_speed_fits_in_a_byte() {
        for backend in Backend::ALL {
            let p = backend.profile();
            assert!(p.speed_min <= p.speed_max);
            assert!(u16::from(p.speed_max) + u16::from(p.speed_bias) <= 0xFF);
        }
    }

    #[test]
    fn usb_profile_has_no_dpi_and_two_modes() {
        let p = Backend::Usb.profile();
        assert!(!p.supports_dpi);
        assert_eq!(p.smart_scroll_modes, 2);
        assert_eq!(p.speed_bias, 0x40);
    }

    #[test]
    fn default_backend_is_compiled_in() {
        if let Some(b) = Backend::default_available() {
            assert!(b.is_available());
        }
    }

    #[test]
    fn backend_names() {
        let names: Vec<_> = Backend::ALL.iter().map(|b| b.to_string()).collect();
        assert_eq!(names, ["hidapi", "hidraw", "usb"]);
    }
}
