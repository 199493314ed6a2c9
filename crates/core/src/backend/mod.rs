//! Device discovery and the three transport backends.
//!
//! Each backend is compiled in by its cargo feature. The one used for a run is
//! picked at runtime from the compiled-in set.

pub mod claim;
#[cfg(feature = "hidapi")]
pub mod hid;
#[cfg(all(feature = "hidraw", target_os = "linux"))]
pub mod hidraw;
pub mod uevent;
#[cfg(feature = "usb")]
pub mod usb;

use crate::device::Backend;
use crate::error::{Error, Result};
use crate::transport::HidTransport;

/// Backend-specific open parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    /// USB interface claimed by the usb backend.
    pub usb_interface: u8,
}

/// A matching device seen during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub backend: Backend,
    /// Device node, hidapi path, or USB bus/address.
    pub path: String,
}

/// List every connected CadMouse visible to `backend`.
pub fn discover_devices(backend: Backend) -> Result<Vec<DeviceInfo>> {
    match backend {
        #[cfg(feature = "hidapi")]
        Backend::Hidapi => hid::discover_devices(),
        #[cfg(all(feature = "hidraw", target_os = "linux"))]
        Backend::Hidraw => hidraw::discover_devices(),
        #[cfg(feature = "usb")]
        Backend::Usb => usb::discover_devices(),
        #[allow(unreachable_patterns)]
        other => Err(Error::BackendUnavailable(other.name())),
    }
}

/// Open the first CadMouse visible to `backend`.
#[cfg_attr(not(feature = "usb"), allow(unused_variables))]
pub fn open(backend: Backend, options: OpenOptions) -> Result<Box<dyn HidTransport>> {
    match backend {
        #[cfg(feature = "hidapi")]
        Backend::Hidapi => Ok(Box::new(hid::HidapiTransport::open()?)),
        #[cfg(all(feature = "hidraw", target_os = "linux"))]
        Backend::Hidraw => Ok(Box::new(hidraw::HidrawTransport::open()?)),
        #[cfg(feature = "usb")]
        Backend::Usb => Ok(Box::new(usb::UsbTransport::open(options.usb_interface)?)),
        #[allow(unreachable_patterns)]
        other => Err(Error::BackendUnavailable(other.name())),
    }
}
