//! Parsing of sysfs `uevent` files for hidraw discovery.

/// Extract `(vendor_id, product_id)` from the `HID_ID=bus:vendor:product`
/// line of a HID device's uevent file.
pub fn parse_hid_id(uevent: &str) -> Option<(u16, u16)> {
    let value = uevent
        .lines()
        .find_map(|line| line.trim().strip_prefix("HID_ID="))?;
    let mut parts = value.split(':');
    let _bus = parts.next()?;
    let vid = u32::from_str_radix(parts.next()?, 16).ok()?;
    let pid = u32::from_str_radix(parts.next()?, 16).ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((u16::try_from(vid).ok()?, u16::try_from(pid).ok()?))
}

/// Whether the uevent file describes the given VID/PID.
pub fn matches(uevent: &str, vid: u16, pid: u16) -> bool {
    parse_hid_id(uevent) == Some((vid, pid))
}
