//! [`Module::Power`](crate::Module::Power) payloads.
//!
//! The supply-state layout is not understood. Replies are shown as a voltage
//! next to the raw bytes they were read from.

use core::fmt;

use crate::{Decode, RawBytes, cmds::PowerCmd, fixed};

#[derive(Debug, Clone, PartialEq)]
pub struct PowerReading {
    pub command: PowerCmd,
    /// `None` when fewer than two bytes were sent.
    pub volts: Option<f64>,
    pub raw: RawBytes,
}

impl PowerReading {
    fn label(&self) -> &'static str {
        match self.command {
            PowerCmd::GetSupplyState => "Supply State",
            PowerCmd::EnDisSupply => "Display Supply",
            PowerCmd::Unknown(_) => "power?",
        }
    }
}

impl fmt::Display for PowerReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.volts {
            Some(volts) => write!(f, "{}: '{volts:.3} V' ({}).", self.label(), self.raw),
            None => write!(f, "{}: '{}'.", self.label(), self.raw),
        }
    }
}

pub(super) fn dissect(command: PowerCmd, payload: &[u8]) -> PowerReading {
    PowerReading {
        command,
        volts: voltage(payload),
        raw: RawBytes::from(payload),
    }
}

/// Leading big-endian decimal fixed-point word, if there is one.
pub(super) fn voltage(mut payload: &[u8]) -> Option<f64> {
    u16::decode(&mut payload).ok().map(fixed::decimal)
}
