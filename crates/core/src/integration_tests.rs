//! Integration tests: exercise the full flag -> translator -> encoder path
//! against a recording mock device.

#[cfg(test)]
mod tests {
    use crate::command::{opcodes, Command};
    use crate::device::{Backend, PollingRate};
    use crate::driver::{Driver, Flag};
    use crate::error::Error;
    use crate::report_rate::rate_to_mask;
    use crate::speed::{dpi_to_speed, DPI_MAX, DPI_MIN};
    use crate::transport::mock::MockTransport;

    fn flags(list: &[(char, &str)]) -> Vec<Flag> {
        list.iter()
            .map(|(l, v)| Flag::from_letter(*l, *v).unwrap())
            .collect()
    }

    /// Every opcode the device documents.
    fn is_documented_opcode(op: u8) -> bool {
        op == opcodes::SPEED
            || opcodes::SMART_SCROLL.contains(&op)
            || op == opcodes::POLL_RATE
            || op == opcodes::LIFTOFF
            || (0x0A..=0x10).contains(&op)
    }

    #[test]
    fn poll_rate_250_sends_one_report() {
        let mock = MockTransport::new();
        Driver::new(&mock, Backend::Hidraw)
            .run(&flags(&[('p', "250")]), |_| {})
            .unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x06, 0x00, 0x04, 0, 0, 0, 0]]);
    }

    #[test]
    fn every_valid_poll_rate_encodes_its_mask() {
        for rate in PollingRate::ALL {
            let mock = MockTransport::new();
            let hz = rate.as_hz().to_string();
            Driver::new(&mock, Backend::Hidapi)
                .run(&flags(&[('p', hz.as_str())]), |_| {})
                .unwrap();
            let sent = mock.sent_commands();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].val2(), rate_to_mask(*rate));
        }
    }

    #[test]
    fn invalid_poll_rates_send_nothing() {
        for hz in ["0", "100", "124", "126", "2000", "-250", "fast"] {
            let mock = MockTransport::new();
            let summary = Driver::new(&mock, Backend::Hidapi)
                .run(&flags(&[('p', hz)]), |_| {})
                .unwrap();
            assert_eq!(summary.rejected.len(), 1, "{hz}");
            assert!(mock.sent().is_empty(), "{hz}");
        }
    }

    #[test]
    fn remap_left_to_extra_on_hidapi() {
        let mock = MockTransport::new();
        Driver::new(&mock, Backend::Hidapi)
            .run(&flags(&[('r', "left:extra")]), |_| {})
            .unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x0A, 0x00, 0x2F, 0, 0, 0, 0]]);
    }

    #[test]
    fn remap_is_case_insensitive() {
        let lower = MockTransport::new();
        let mixed = MockTransport::new();
        Driver::new(&lower, Backend::Hidapi)
            .run(&flags(&[('r', "left:right")]), |_| {})
            .unwrap();
        Driver::new(&mixed, Backend::Hidapi)
            .run(&flags(&[('r', "Left:RIGHT")]), |_| {})
            .unwrap();
        assert_eq!(lower.sent(), mixed.sent());
        assert_eq!(lower.sent().len(), 1);
    }

    #[test]
    fn dpi_8200_sends_speed_164() {
        let mock = MockTransport::new();
        Driver::new(&mock, Backend::Hidraw)
            .run(&flags(&[('d', "8200")]), |_| {})
            .unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x01, 0x00, 164, 0, 0, 0, 0]]);
    }

    #[test]
    fn dpi_forwards_to_speed_encoding() {
        for dpi in (DPI_MIN..=DPI_MAX).step_by(37) {
            let via_dpi = MockTransport::new();
            let via_speed = MockTransport::new();
            let speed = dpi_to_speed(dpi).to_string();
            let dpi_arg = dpi.to_string();
            Driver::new(&via_dpi, Backend::Hidraw)
                .run(&flags(&[('d', dpi_arg.as_str())]), |_| {})
                .unwrap();
            Driver::new(&via_speed, Backend::Hidraw)
                .run(&flags(&[('s', speed.as_str())]), |_| {})
                .unwrap();
            assert_eq!(via_dpi.sent(), via_speed.sent(), "dpi {dpi}");
        }
    }

    #[test]
    fn out_of_range_values_never_reach_transport() {
        let cases: &[(Backend, char, &str)] = &[
            (Backend::Hidraw, 'd', "49"),
            (Backend::Hidraw, 'd', "8201"),
            (Backend::Hidraw, 's', "0"),
            (Backend::Hidraw, 's', "165"),
            (Backend::Usb, 's', "101"),
            (Backend::Usb, 's', "-1"),
            (Backend::Hidraw, 'S', "4"),
            (Backend::Usb, 'S', "2"),
        ];
        for (backend, letter, value) in cases {
            let mock = MockTransport::new();
            let summary = Driver::new(&mock, *backend)
                .run(&flags(&[(*letter, *value)]), |_| {})
                .unwrap();
            assert_eq!(summary.rejected.len(), 1, "{backend} -{letter} {value}");
            assert!(mock.sent().is_empty(), "{backend} -{letter} {value}");
        }
    }

    #[test]
    fn usb_speed_carries_bias() {
        let mock = MockTransport::new();
        Driver::new(&mock, Backend::Usb)
            .run(&flags(&[('s', "50")]), |_| {})
            .unwrap();
        assert_eq!(mock.sent(), vec![[0x0C, 0x01, 0x00, 50 + 0x40, 0, 0, 0, 0]]);
    }

    #[test]
    fn smart_scroll_is_three_ordered_commands() {
        for mode in 0..4 {
            let mock = MockTransport::new();
            let arg = mode.to_string();
            Driver::new(&mock, Backend::Hidraw)
                .run(&flags(&[('S', arg.as_str())]), |_| {})
                .unwrap();
            let ops: Vec<u8> = mock.sent_commands().iter().map(Command::opcode).collect();
            assert_eq!(ops, [0x03, 0x04, 0x05], "mode {mode}");
        }
    }

    #[test]
    fn smart_scroll_values_depend_only_on_mode() {
        for backend in [Backend::Hidraw, Backend::Hidapi, Backend::Usb] {
            let a = MockTransport::new();
            let b = MockTransport::new();
            Driver::new(&a, backend).run(&flags(&[('S', "1")]), |_| {}).unwrap();
            Driver::new(&b, Backend::Hidraw).run(&flags(&[('S', "1")]), |_| {}).unwrap();
            assert_eq!(a.sent(), b.sent());
        }
    }

    #[test]
    fn flags_apply_in_command_line_order() {
        let mock = MockTransport::new();
        Driver::new(&mock, Backend::Hidraw)
            .run(
                &flags(&[('S', "0"), ('p', "1000"), ('l', "1"), ('s', "80"), ('r', "rm:middle")]),
                |_| {},
            )
            .unwrap();
        let ops: Vec<u8> = mock.sent_commands().iter().map(Command::opcode).collect();
        assert_eq!(ops, [0x03, 0x04, 0x05, 0x06, 0x07, 0x01, 0x10]);
    }

    #[test]
    fn transmit_failure_aborts_remaining_flags() {
        // Second smart-scroll command fails.
        let mock = MockTransport::failing_on(2);
        let err = Driver::new(&mock, Backend::Hidraw)
            .run(&flags(&[('p', "500"), ('S', "3"), ('l', "0")]), |_| {})
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TransmitFailed {
                operation: "set_smartscroll",
                ..
            }
        ));
        let ops: Vec<u8> = mock.sent_commands().iter().map(Command::opcode).collect();
        assert_eq!(ops, [0x06, 0x03]);
    }

    #[test]
    fn only_documented_opcodes_are_sent() {
        let mock = MockTransport::new();
        let mut all = vec![('l', "1"), ('p', "125"), ('s', "10"), ('S', "2")];
        let remaps: Vec<String> = crate::buttons::HARDWARE_BUTTONS
            .iter()
            .flat_map(|hw| {
                crate::buttons::FUNCTIONS
                    .iter()
                    .map(move |f| format!("{}:{}", hw.name, f.name))
            })
            .collect();
        all.extend(remaps.iter().map(|r| ('r', r.as_str())));
        let summary = Driver::new(&mock, Backend::Hidapi)
            .run(&flags(&all), |_| {})
            .unwrap();
        assert!(summary.rejected.is_empty());
        for cmd in mock.sent_commands() {
            assert!(is_documented_opcode(cmd.opcode()), "opcode 0x{:02X}", cmd.opcode());
        }
    }
}
