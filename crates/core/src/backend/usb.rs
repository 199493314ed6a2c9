//! usb backend: HID class SET_REPORT control transfers through libusb.

use super::claim::{ClaimedInterface, InterfaceOps};
use super::DeviceInfo;
use crate::command::{Report, REPORT_ID, REPORT_LEN};
use crate::device::Backend;
use crate::error::{Error, Result};
use crate::transport::HidTransport;
use crate::{CADMOUSE_PID, CADMOUSE_VID};
use rusb::{Device, DeviceHandle, GlobalContext, UsbContext};
use std::time::Duration;
use tracing::{debug, info};

/// Control transfer timeout.
pub const USB_TIMEOUT: Duration = Duration::from_millis(1000);

/// bmRequestType: host-to-device | class | interface.
const REQUEST_TYPE_CLASS_INTERFACE_OUT: u8 = 0x21;
/// HID class SET_REPORT request.
const HID_SET_REPORT: u8 = 0x09;
/// wValue high byte for a feature report.
const FEATURE_REPORT_TYPE: u16 = 0x03;

impl<T: UsbContext> InterfaceOps for DeviceHandle<T> {
    type Error = rusb::Error;

    fn kernel_driver_active(&mut self, iface: u8) -> rusb::Result<bool> {
        DeviceHandle::kernel_driver_active(self, iface)
    }

    fn detach_kernel_driver(&mut self, iface: u8) -> rusb::Result<()> {
        DeviceHandle::detach_kernel_driver(self, iface)
    }

    fn attach_kernel_driver(&mut self, iface: u8) -> rusb::Result<()> {
        DeviceHandle::attach_kernel_driver(self, iface)
    }

    fn claim_interface(&mut self, iface: u8) -> rusb::Result<()> {
        DeviceHandle::claim_interface(self, iface)
    }

    fn release_interface(&mut self, iface: u8) -> rusb::Result<()> {
        DeviceHandle::release_interface(self, iface)
    }
}

fn is_cadmouse(device: &Device<GlobalContext>) -> bool {
    device
        .device_descriptor()
        .map(|d| d.vendor_id() == CADMOUSE_VID && d.product_id() == CADMOUSE_PID)
        .unwrap_or(false)
}

fn bus_path(device: &Device<GlobalContext>) -> String {
    format!("bus {:03} address {:03}", device.bus_number(), device.address())
}

fn cadmice() -> Result<Vec<Device<GlobalContext>>> {
    let list = rusb::devices().map_err(|e| Error::OpenFailed(format!("libusb enumerate: {e}")))?;
    Ok(list.iter().filter(is_cadmouse).collect())
}

/// Enumerate CadMouse USB devices.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("Starting USB device enumeration");
    let devices: Vec<DeviceInfo> = cadmice()?
        .iter()
        .map(|device| DeviceInfo {
            backend: Backend::Usb,
            path: bus_path(device),
        })
        .collect();
    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// An open device with its configuration interface claimed.
///
/// Dropping it releases the interface, reattaches the kernel driver if one
/// was detached, and closes the handle, in that order.
pub struct UsbTransport {
    claimed: ClaimedInterface<DeviceHandle<GlobalContext>>,
}

impl UsbTransport {
    /// Open the first CadMouse and claim `interface`.
    pub fn open(interface: u8) -> Result<Self> {
        let device = cadmice()?.into_iter().next().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "no USB device with VID=0x{CADMOUSE_VID:04X} PID=0x{CADMOUSE_PID:04X}"
            ))
        })?;

        let path = bus_path(&device);
        let handle = device
            .open()
            .map_err(|e| Error::OpenFailed(format!("{path}: {e}")))?;
        let claimed = ClaimedInterface::claim(handle, interface)?;

        info!(path = %path, interface, "Opened CadMouse via libusb");
        Ok(Self { claimed })
    }
}

impl HidTransport for UsbTransport {
    fn send_report(&self, report: &Report) -> Result<()> {
        let interface = self.claimed.interface();
        let written = self
            .claimed
            .handle()
            .write_control(
                REQUEST_TYPE_CLASS_INTERFACE_OUT,
                HID_SET_REPORT,
                (FEATURE_REPORT_TYPE << 8) | u16::from(REPORT_ID),
                u16::from(interface),
                report,
                USB_TIMEOUT,
            )
            .map_err(|e| Error::TransmitFailed {
                operation: "libusb_control_transfer",
                reason: e.to_string(),
            })?;

        if written != REPORT_LEN {
            return Err(Error::TransmitFailed {
                operation: "libusb_control_transfer",
                reason: format!("short write: {written} of {REPORT_LEN} bytes"),
            });
        }
        Ok(())
    }
}
