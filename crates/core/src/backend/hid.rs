//! hidapi backend: feature reports through the hidapi library.

use super::DeviceInfo;
use crate::command::Report;
use crate::device::Backend;
use crate::error::{Error, Result};
use crate::transport::HidTransport;
use crate::{CADMOUSE_PID, CADMOUSE_VID};
use tracing::{debug, info};

fn is_cadmouse(info: &hidapi::DeviceInfo) -> bool {
    info.vendor_id() == CADMOUSE_VID && info.product_id() == CADMOUSE_PID
}

/// Enumerate CadMouse HID interfaces.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("Starting HID device enumeration");
    let api = hidapi::HidApi::new().map_err(|e| Error::OpenFailed(format!("hidapi init: {e}")))?;

    let devices: Vec<DeviceInfo> = api
        .device_list()
        .filter(|info| is_cadmouse(info))
        .map(|info| DeviceInfo {
            backend: Backend::Hidapi,
            path: info.path().to_string_lossy().into_owned(),
        })
        .collect();

    debug!(count = devices.len(), "Device enumeration complete");
    Ok(devices)
}

/// An open hidapi device.
pub struct HidapiTransport {
    device: hidapi::HidDevice,
}

impl HidapiTransport {
    /// Open the first enumerated CadMouse.
    pub fn open() -> Result<Self> {
        let api =
            hidapi::HidApi::new().map_err(|e| Error::OpenFailed(format!("hidapi init: {e}")))?;

        let info = api
            .device_list()
            .find(|info| is_cadmouse(info))
            .ok_or_else(|| {
                Error::DeviceNotFound(format!(
                    "no HID device with VID=0x{CADMOUSE_VID:04X} PID=0x{CADMOUSE_PID:04X}"
                ))
            })?;

        let path = info.path().to_string_lossy().into_owned();
        let device = info
            .open_device(&api)
            .map_err(|e| Error::OpenFailed(format!("{path}: {e}")))?;

        info!(path = %path, "Opened CadMouse via hidapi");
        Ok(Self { device })
    }
}

impl HidTransport for HidapiTransport {
    fn send_report(&self, report: &Report) -> Result<()> {
        self.device
            .send_feature_report(report)
            .map_err(|e| Error::TransmitFailed {
                operation: "hid_send_feature_report",
                reason: e.to_string(),
            })
    }
}
