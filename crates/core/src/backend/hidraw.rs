//! hidraw backend: `/dev/hidrawN` plus the `HIDIOCSFEATURE` ioctl.

use super::{uevent, DeviceInfo};
use crate::command::{Report, REPORT_LEN};
use crate::device::Backend;
use crate::error::{Error, Result};
use crate::transport::HidTransport;
use crate::{CADMOUSE_PID, CADMOUSE_VID};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SYSFS_HIDRAW: &str = "/sys/class/hidraw";

/// Direction bits of an ioctl number and where they sit.
struct IocLayout {
    read: u32,
    write: u32,
    dir_shift: u32,
}

// powerpc, mips and sparc: three direction bits above a 13-bit size field.
#[cfg(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "mips32r6",
    target_arch = "mips64r6",
    target_arch = "sparc",
    target_arch = "sparc64"
))]
const IOC_LAYOUT: IocLayout = IocLayout {
    read: 2,
    write: 4,
    dir_shift: 29,
};

// asm-generic: x86, arm, aarch64, riscv, loongarch, s390x.
#[cfg(not(any(
    target_arch = "powerpc",
    target_arch = "powerpc64",
    target_arch = "mips",
    target_arch = "mips64",
    target_arch = "mips32r6",
    target_arch = "mips64r6",
    target_arch = "sparc",
    target_arch = "sparc64"
)))]
const IOC_LAYOUT: IocLayout = IocLayout {
    read: 2,
    write: 1,
    dir_shift: 30,
};

/// `_IOWR(ty, nr, size)` under `layout`.
const fn iowr(layout: &IocLayout, ty: u8, nr: u8, size: usize) -> u32 {
    ((layout.read | layout.write) << layout.dir_shift)
        | ((size as u32) << 16)
        | ((ty as u32) << 8)
        | nr as u32
}

/// `HIDIOCSFEATURE(8)` from `linux/hidraw.h`.
const HIDIOCSFEATURE: u32 = iowr(&IOC_LAYOUT, b'H', 0x06, REPORT_LEN);

/// Device nodes of every hidraw interface belonging to a CadMouse, in sysfs
/// name order.
fn find_nodes(sysfs: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(sysfs).map_err(|e| {
        Error::DeviceNotFound(format!("cannot read {}: {e}", sysfs.display()))
    })?;

    let mut names: Vec<_> = entries.flatten().map(|entry| entry.file_name()).collect();
    names.sort();

    let mut nodes = Vec::new();
    for name in names {
        let uevent_path = sysfs.join(&name).join("device/uevent");
        let Ok(contents) = std::fs::read_to_string(&uevent_path) else {
            debug!(path = %uevent_path.display(), "No uevent file");
            continue;
        };
        if uevent::matches(&contents, CADMOUSE_VID, CADMOUSE_PID) {
            let node = PathBuf::from("/dev").join(&name);
            debug!(node = %node.display(), "Found CadMouse hidraw node");
            nodes.push(node);
        }
    }
    Ok(nodes)
}

/// Enumerate CadMouse hidraw nodes.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    Ok(find_nodes(Path::new(SYSFS_HIDRAW))?
        .into_iter()
        .map(|node| DeviceInfo {
            backend: Backend::Hidraw,
            path: node.display().to_string(),
        })
        .collect())
}

/// An open hidraw node.
pub struct HidrawTransport {
    file: File,
}

impl HidrawTransport {
    /// Open the first CadMouse hidraw node.
    pub fn open() -> Result<Self> {
        let node = find_nodes(Path::new(SYSFS_HIDRAW))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::DeviceNotFound(format!(
                    "no hidraw node with VID=0x{CADMOUSE_VID:04X} PID=0x{CADMOUSE_PID:04X}"
                ))
            })?;

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&node)
            .map_err(|e| match e.kind() {
                io::ErrorKind::PermissionDenied => Error::OpenFailed(format!(
                    "{}: permission denied (check udev rules)",
                    node.display()
                )),
                _ => Error::OpenFailed(format!("{}: {e}", node.display())),
            })?;

        info!(node = %node.display(), "Opened CadMouse via hidraw");
        Ok(Self { file })
    }
}

impl HidTransport for HidrawTransport {
    fn send_report(&self, report: &Report) -> Result<()> {
        let mut buf = *report;
        // SAFETY: the fd is open for the lifetime of `self` and `buf` is
        // exactly the size encoded in the request.
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                HIDIOCSFEATURE as _,
                buf.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(Error::TransmitFailed {
                operation: "HIDIOCSFEATURE",
                reason: io::Error::last_os_error().to_string(),
            });
        }
        Ok(())
    }
}
