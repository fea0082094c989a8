//! [`Module::Airbag`](crate::Module::Airbag) payloads.

use core::fmt;

use crate::{Decode, RawBytes, cmds::AirbagCmd, fixed};

/// Inflation type byte of a single-chamber airbag.
pub const INFLATION_SINGLE: u8 = 0x44;

/// Largest calibrated squib resistance magnitude the controller reports as valid.
pub const SQUIB_RES_LIMIT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InflationType {
    Single,
    Unknown(RawBytes),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AirbagReading {
    InflationType(InflationType),
    ResetIgnition(RawBytes),
    /// Calibrated resistances of both squibs, `None` when out of range.
    CalibSquibRes {
        r0: Option<f64>,
        r1: Option<f64>,
        raw: RawBytes,
    },
    Other { command: AirbagCmd, raw: RawBytes },
}

impl fmt::Display for AirbagReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InflationType(InflationType::Single) => f.write_str("Inflation Type: 'Single'."),
            Self::InflationType(InflationType::Unknown(raw)) => {
                write!(f, "Inflation Type: '{raw}'.")
            }
            Self::ResetIgnition(raw) => write!(f, "reset ignition? '{raw}'."),
            Self::CalibSquibRes { r0, r1, raw } => {
                f.write_str("Squib calibration: ")?;
                write_resistance(f, *r0)?;
                f.write_str(", ")?;
                write_resistance(f, *r1)?;
                write!(f, " : {raw}")
            }
            Self::Other { raw, .. } => write!(f, "airbag? '{raw}'."),
        }
    }
}

fn write_resistance(f: &mut fmt::Formatter<'_>, res: Option<f64>) -> fmt::Result {
    match res {
        Some(ohms) => write!(f, "'{ohms:.3} Ohm'"),
        None => f.write_str("'invalid'"),
    }
}

/// Two big-endian decimal fixed-point resistances.
fn calib_squib_res(mut data: &[u8]) -> Option<(Option<f64>, Option<f64>)> {
    let mut next = || {
        let ohms = fixed::decimal(u16::decode(&mut data).ok()?);
        Some((-SQUIB_RES_LIMIT..=SQUIB_RES_LIMIT).contains(&ohms).then_some(ohms))
    };
    Some((next()?, next()?))
}

/// Interprets a non-empty airbag payload.
pub(super) fn dissect(command: AirbagCmd, payload: &[u8]) -> AirbagReading {
    match command {
        AirbagCmd::GetInflationType => AirbagReading::InflationType(match payload {
            [INFLATION_SINGLE, ..] => InflationType::Single,
            _ => InflationType::Unknown(RawBytes::from(payload)),
        }),
        AirbagCmd::ResetIgnitionCtrl => AirbagReading::ResetIgnition(RawBytes::from(payload)),
        AirbagCmd::GetCalibSquibRes => match calib_squib_res(payload) {
            Some((r0, r1)) => AirbagReading::CalibSquibRes {
                r0,
                r1,
                raw: RawBytes::from(payload),
            },
            None => other(command, payload),
        },
        AirbagCmd::GetIgnitionCtrlMode
        | AirbagCmd::GetIgnitionCtrlStatus
        | AirbagCmd::InitIgnitionCtrl
        | AirbagCmd::DiagIgnitionCtrl
        | AirbagCmd::ArmIgnitionCtrl
        | AirbagCmd::FireAirbag
        | AirbagCmd::DiagGetSquibRes
        | AirbagCmd::SetCalibSquibRes
        | AirbagCmd::SetInflationType => other(command, payload),
        AirbagCmd::Unknown(_) => other(command, payload),
    }
}

fn other(command: AirbagCmd, payload: &[u8]) -> AirbagReading {
    AirbagReading::Other {
        command,
        raw: RawBytes::from(payload),
    }
}
