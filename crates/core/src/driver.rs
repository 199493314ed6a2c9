//! Flag sequencing: validates each command-line setting and dispatches it to
//! its translator, in command-line order.
//!
//! Invalid values are reported and skipped. The first transport failure stops
//! the run; the caller's handle is released by its own `Drop`.

use crate::buttons::{self, ButtonMapping};
use crate::device::Backend;
use crate::error::{Error, Result};
use crate::transport::HidTransport;
use crate::{liftoff, report_rate, safety, smart_scroll, speed};
use tracing::{debug, warn};

/// One setting flag as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// `-l`
    LiftOff(String),
    /// `-p`
    PollRate(String),
    /// `-r`
    Remap(String),
    /// `-s`
    Speed(String),
    /// `-d`
    Dpi(String),
    /// `-S`
    SmartScroll(String),
}

impl Flag {
    /// Build a flag from its option letter.
    pub fn from_letter(letter: char, value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        Some(match letter {
            'l' => Self::LiftOff(value),
            'p' => Self::PollRate(value),
            'r' => Self::Remap(value),
            's' => Self::Speed(value),
            'd' => Self::Dpi(value),
            'S' => Self::SmartScroll(value),
            _ => return None,
        })
    }

    pub fn letter(&self) -> char {
        match self {
            Self::LiftOff(_) => 'l',
            Self::PollRate(_) => 'p',
            Self::Remap(_) => 'r',
            Self::Speed(_) => 's',
            Self::Dpi(_) => 'd',
            Self::SmartScroll(_) => 'S',
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::LiftOff(v)
            | Self::PollRate(v)
            | Self::Remap(v)
            | Self::Speed(v)
            | Self::Dpi(v)
            | Self::SmartScroll(v) => v.as_str(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct Summary {
    /// Flags whose setting reached the device.
    pub applied: usize,
    /// Flags rejected before transmission.
    pub rejected: Vec<Error>,
}

/// Applies flags to one open device.
pub struct Driver<'a> {
    transport: &'a dyn HidTransport,
    backend: Backend,
    speed_set: bool,
}

impl<'a> Driver<'a> {
    pub fn new(transport: &'a dyn HidTransport, backend: Backend) -> Self {
        Self {
            transport,
            backend,
            speed_set: false,
        }
    }

    /// Apply `flags` in order.
    ///
    /// `on_rejected` sees each per-flag diagnostic as it happens. A transmit
    /// failure aborts the remaining flags and is returned.
    pub fn run(&mut self, flags: &[Flag], mut on_rejected: impl FnMut(&Error)) -> Result<Summary> {
        let mut summary = Summary::default();
        for flag in flags {
            debug!(flag = %flag.letter(), value = flag.value(), "Applying flag");
            match self.apply(flag) {
                Ok(()) => summary.applied += 1,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "Flag rejected");
                    on_rejected(&e);
                    summary.rejected.push(e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(summary)
    }

    /// Validate and apply a single flag.
    pub fn apply(&mut self, flag: &Flag) -> Result<()> {
        let profile = self.backend.profile();
        match flag {
            Flag::LiftOff(v) => {
                let enabled = safety::validate_liftoff(safety::parse_number('l', v)?);
                liftoff::write_liftoff_detection(self.transport, enabled)
            }
            Flag::PollRate(v) => {
                let rate = safety::validate_polling_rate(safety::parse_number('p', v)?)?;
                report_rate::write_report_rate(self.transport, rate)
            }
            Flag::Remap(v) => {
                let mapping = ButtonMapping::parse(v, profile)?;
                buttons::write_button_mapping(self.transport, mapping)
            }
            Flag::Speed(v) => {
                self.check_speed_conflict('s', 'd')?;
                let value = safety::parse_number('s', v)?;
                speed::write_speed(self.transport, profile, value)?;
                self.speed_set = true;
                Ok(())
            }
            Flag::Dpi(v) => {
                if !profile.supports_dpi {
                    return Err(Error::invalid(
                        'd',
                        format!("not supported by the {} backend", self.backend),
                    ));
                }
                self.check_speed_conflict('d', 's')?;
                let value = safety::parse_number('d', v)?;
                speed::write_dpi(self.transport, profile, value)?;
                self.speed_set = true;
                Ok(())
            }
            Flag::SmartScroll(v) => {
                let mode = safety::parse_number('S', v)?;
                smart_scroll::write_smart_scroll(self.transport, profile, mode).map(drop)
            }
        }
    }

    fn check_speed_conflict(&self, flag: char, other: char) -> Result<()> {
        if self.speed_set {
            return Err(Error::invalid(
                flag,
                format!("-{flag} cannot be used with -{other} or used more than once"),
            ));
        }
        Ok(())
    }
}
