//! Button remapping.
//!
//! A remap is written as a single command whose opcode is the hardware
//! button's ID and whose `val2` is the ID of the logical function assigned to
//! it. Both sides are looked up by case-insensitive name.

use crate::command::Command;
use crate::device::Profile;
use crate::error::{Error, Result};
use crate::transport::{send_command, HidTransport};
use tracing::info;

/// A named table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub name: &'static str,
    pub id: u8,
}

const fn button(name: &'static str, id: u8) -> Button {
    Button { name, id }
}

/// Physical buttons available for remapping. The ID doubles as the opcode.
pub const HARDWARE_BUTTONS: &[Button] = &[
    button("left", 0x0A),
    button("right", 0x0B),
    button("middle", 0x0C),
    button("wheel", 0x0D),
    button("forward", 0x0E),
    button("backward", 0x0F),
    button("rm", 0x10),
];

/// Logical functions assignable to a hardware button. `extra` stays last.
pub const FUNCTIONS: &[Button] = &[
    button("left", 0x0A),
    button("right", 0x0B),
    button("middle", 0x0C),
    button("backward", 0x0D),
    button("forward", 0x0E),
    button("rm", 0x2E),
    button("extra", 0x2F),
];

/// Function table for firmware without the `extra` function.
pub const FUNCTIONS_WITHOUT_EXTRA: &[Button] = FUNCTIONS.split_at(FUNCTIONS.len() - 1).0;

/// Find a table entry by case-insensitive name.
pub fn lookup(name: &str, table: &'static [Button]) -> Option<&'static Button> {
    table.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// A resolved `hardware:function` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMapping {
    pub button: &'static Button,
    pub function: &'static Button,
}

impl ButtonMapping {
    /// Parse `<hardware>:<function>` against the profile's tables.
    ///
    /// Either side failing to resolve rejects the whole mapping.
    pub fn parse(spec: &str, profile: &Profile) -> Result<Self> {
        let invalid = || Error::invalid('r', "invalid button mapping");
        let (hw, sw) = spec.split_once(':').ok_or_else(invalid)?;
        let button = lookup(hw, HARDWARE_BUTTONS).ok_or_else(invalid)?;
        let function = lookup(sw, profile.functions).ok_or_else(invalid)?;
        Ok(Self { button, function })
    }

    fn command(&self) -> Command {
        Command::new(self.button.id, 0x00, self.function.id)
    }
}

/// Write a button remap to the device.
pub fn write_button_mapping(transport: &dyn HidTransport, mapping: ButtonMapping) -> Result<()> {
    send_command(transport, "set_hwbutton", mapping.command())?;
    info!(
        button = mapping.button.name,
        function = mapping.function.name,
        "Button remapped"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{HIDAPI_PROFILE, USB_PROFILE};
    use crate::transport::mock::MockTransport;

    #[test]
    fn lookup_is_case_insensitive() {
        let lower = lookup("left", HARDWARE_BUTTONS).unwrap();
        let mixed = lookup("Left", HARDWARE_BUTTONS).unwrap();
        let upper = lookup("LEFT", HARDWARE_BUTTONS).unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(lower, upper);
        assert_eq!(lower.id, 0x0A);
    }

    #[test]
    fn lookup_rejects_unknown() {
        assert!(lookup("thumb", HARDWARE_BUTTONS).is_none());
        assert!(lookup("", FUNCTIONS).is_none());
        // "wheel" is a physical button, not a function.
        assert!(lookup("wheel", FUNCTIONS).is_none());
    }

    #[test]
    fn functions_without_extra_is_the_shared_prefix() {
        let (shared, last) = FUNCTIONS.split_at(FUNCTIONS.len() - 1);
        assert_eq!(FUNCTIONS_WITHOUT_EXTRA, shared);
        assert_eq!(last, [button("extra", 0x2F)]);
        assert!(lookup("extra", FUNCTIONS_WITHOUT_EXTRA).is_none());
        assert_eq!(lookup("rm", FUNCTIONS_WITHOUT_EXTRA).map(|b| b.id), Some(0x2E));
    }

    #[test]
    fn parse_mapping() {
        let m = ButtonMapping::parse("Backward:RM", &HIDAPI_PROFILE).unwrap();
        assert_eq!(m.button.id, 0x0F);
        assert_eq!(m.function.id, 0x2E);
    }

    #[test]
    fn parse_rejects_missing_separator_or_side() {
        for spec in ["left", "left:", ":left", "left:bogus", "bogus:left", ""] {
            let err = ButtonMapping::parse(spec, &HIDAPI_PROFILE).unwrap_err();
            assert_eq!(err.to_string(), "-r: invalid button mapping", "spec {spec:?}");
        }
    }

    #[test]
    fn extra_depends_on_profile() {
        assert!(ButtonMapping::parse("left:extra", &HIDAPI_PROFILE).is_ok());
        assert!(ButtonMapping::parse("left:extra", &USB_PROFILE).is_err());
    }

    #[test]
    fn remap_opcodes_are_hardware_ids() {
        for hw in HARDWARE_BUTTONS {
            assert!((0x0A..=0x10).contains(&hw.id));
        }
    }

    #[test]
    fn write_mapping_sends_one_command() {
        let mock = MockTransport::new();
        let m = ButtonMapping::parse("left:extra", &HIDAPI_PROFILE).unwrap();
        write_button_mapping(&mock, m).unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x0A, 0x00, 0x2F, 0, 0, 0, 0]]);
    }
}
