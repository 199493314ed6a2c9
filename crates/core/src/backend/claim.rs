//! Scoped USB interface ownership.
//!
//! [`ClaimedInterface`] detaches the kernel driver (if one is bound), claims
//! the interface, and undoes both on drop: release the interface, then
//! reattach the driver if it was detached. The handle itself is closed after
//! that, when the guard's fields drop.

use crate::error::{Error, Result};
use std::fmt::Display;
use tracing::{debug, warn};

/// The interface-ownership operations of a USB device handle.
pub trait InterfaceOps {
    type Error: Display;

    fn kernel_driver_active(&mut self, iface: u8) -> std::result::Result<bool, Self::Error>;
    fn detach_kernel_driver(&mut self, iface: u8) -> std::result::Result<(), Self::Error>;
    fn attach_kernel_driver(&mut self, iface: u8) -> std::result::Result<(), Self::Error>;
    fn claim_interface(&mut self, iface: u8) -> std::result::Result<(), Self::Error>;
    fn release_interface(&mut self, iface: u8) -> std::result::Result<(), Self::Error>;
}

/// A claimed interface on an open handle.
pub struct ClaimedInterface<H: InterfaceOps> {
    handle: H,
    interface: u8,
    reattach_driver: bool,
}

impl<H: InterfaceOps> ClaimedInterface<H> {
    /// Detach any bound kernel driver and claim `interface`.
    ///
    /// On a claim failure the driver is reattached before returning.
    pub fn claim(mut handle: H, interface: u8) -> Result<Self> {
        let reattach_driver = match handle.kernel_driver_active(interface) {
            Ok(true) => {
                handle.detach_kernel_driver(interface).map_err(|e| {
                    Error::InterfaceClaimFailed(format!(
                        "detach kernel driver from interface {interface}: {e}"
                    ))
                })?;
                debug!(interface, "Kernel driver detached");
                true
            }
            Ok(false) => false,
            Err(e) => {
                // Not supported on every platform; carry on without detaching.
                debug!(interface, error = %e, "Kernel driver query failed");
                false
            }
        };

        if let Err(e) = handle.claim_interface(interface) {
            if reattach_driver {
                if let Err(e) = handle.attach_kernel_driver(interface) {
                    warn!(interface, error = %e, "Failed to reattach kernel driver");
                }
            }
            return Err(Error::InterfaceClaimFailed(format!(
                "claim interface {interface}: {e}"
            )));
        }

        debug!(interface, reattach_driver, "Interface claimed");
        Ok(Self {
            handle,
            interface,
            reattach_driver,
        })
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn interface(&self) -> u8 {
        self.interface
    }
}

impl<H: InterfaceOps> Drop for ClaimedInterface<H> {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.interface) {
            warn!(interface = self.interface, error = %e, "Failed to release interface");
        }
        if self.reattach_driver {
            if let Err(e) = self.handle.attach_kernel_driver(self.interface) {
                warn!(interface = self.interface, error = %e, "Failed to reattach kernel driver");
            } else {
                debug!(interface = self.interface, "Kernel driver reattached");
            }
        }
    }
}
