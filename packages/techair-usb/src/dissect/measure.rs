//! [`Module::Measure`](crate::Module::Measure) payloads.

use core::fmt;

use super::power::voltage;
use crate::{RawBytes, cmds::MeasureCmd};

/// Position of the jacket's zip switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipState {
    Open,
    Closed,
    Unknown(u8),
}

impl From<u8> for ZipState {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Open,
            1 => Self::Closed,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ZipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("OPEN"),
            Self::Closed => f.write_str("CLOSED"),
            Self::Unknown(raw) => write!(f, "UNKNOWN (0x{raw:02X})"),
        }
    }
}

/// Battery charger status byte.
///
/// Bit 0 flags a supply fault and bit 1 a good USB supply. The bits above
/// them hold the charge phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargerStatus(pub u8);

impl ChargerStatus {
    pub const fn supply_fault(self) -> bool {
        self.0 & 0x01 != 0
    }

    pub const fn usb_power_ok(self) -> bool {
        self.0 & 0x02 != 0
    }

    pub const fn phase(self) -> &'static str {
        match self.0 >> 2 {
            0 => "charge suspend",
            1 => "fast charge",
            2 => "charge done",
            3 => "pre charge",
            _ => "error in charge information",
        }
    }
}

impl fmt::Display for ChargerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.supply_fault() {
            f.write_str("over or undervoltage present, ")?;
        } else if self.usb_power_ok() {
            f.write_str("USB power OK, ")?;
        }
        f.write_str(self.phase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeasureReading {
    Voltage {
        command: MeasureCmd,
        volts: f64,
    },
    ZipSwitch(ZipState),
    Charging {
        volts: Option<f64>,
        status: ChargerStatus,
    },
    /// Too short to hold a voltage.
    Raw {
        command: MeasureCmd,
        raw: RawBytes,
    },
}

fn label(command: MeasureCmd) -> &'static str {
    use MeasureCmd as C;

    match command {
        C::GetLogicVoltage => "Logic Voltage",
        C::GetPeripheralVoltage => "Peripheral Voltage",
        C::GetRightHandVoltage => "Right Hand Voltage",
        C::GetLeftHandVoltage => "Left Hand Voltage",
        C::GetRightFootVoltage => "Right Foot Voltage",
        C::GetLeftFootVoltage => "Left Foot Voltage",
        C::GetSquibVoltage => "Squib Voltage",
        C::GetBatteryVoltage => "Battery Voltage",
        C::GetChargingState => "GET_CHARGING_STATE",
        C::GetZipSwitchState => "GET_ZIP_SWITCH_STATE",
        C::SetExtDisplay => "SET_EXT_DISPLAY",
        C::Unknown(_) => "measure?",
    }
}

impl fmt::Display for MeasureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voltage { command, volts } => {
                write!(f, "{}: '{volts:.3} V'.", label(*command))
            }
            Self::ZipSwitch(state) => {
                write!(f, "{}: '{state}'.", label(MeasureCmd::GetZipSwitchState))
            }
            Self::Charging { volts, status } => {
                let label = label(MeasureCmd::GetChargingState);
                if let Some(volts) = volts {
                    write!(f, "{label}: '{volts:.3} V'. ")?;
                }
                write!(f, "Charger: '{status}'.")
            }
            Self::Raw { command, raw } => write!(f, "{}: '{raw}'.", label(*command)),
        }
    }
}

/// Interprets a non-empty measurement payload.
pub(super) fn dissect(command: MeasureCmd, payload: &[u8]) -> MeasureReading {
    match (command, payload) {
        (MeasureCmd::GetZipSwitchState, [state]) => MeasureReading::ZipSwitch(ZipState::from(*state)),
        (MeasureCmd::GetChargingState, [status, ..]) => MeasureReading::Charging {
            volts: voltage(payload),
            status: ChargerStatus(*status),
        },
        _ => match voltage(payload) {
            Some(volts) => MeasureReading::Voltage { command, volts },
            None => MeasureReading::Raw {
                command,
                raw: RawBytes::from(payload),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::dissect::{Reading, dissect};

    fn measure(bytes: &[u8]) -> MeasureReading {
        match dissect(bytes).unwrap().reading {
            Ok(Reading::Measure(reading)) => reading,
            other => panic!("not a measure reading: {other:?}"),
        }
    }

    #[test]
    fn logic_voltage() {
        let reading = measure(&[0x03, 0x00, 0x0c, 0xe4, 0x05, 0x2b]);
        assert_eq!(
            reading,
            MeasureReading::Voltage {
                command: MeasureCmd::GetLogicVoltage,
                volts: 3.3,
            }
        );
        assert_eq!(reading.to_string(), "Logic Voltage: '3.300 V'.");
    }

    #[test]
    fn zip_switch() {
        let reading = measure(&[0x03, 0x09, 0x01, 0x46, 0x50]);
        assert_eq!(reading, MeasureReading::ZipSwitch(ZipState::Closed));
        assert_eq!(reading.to_string(), "GET_ZIP_SWITCH_STATE: 'CLOSED'.");

        let reading = measure(&[0x03, 0x09, 0x07, 0xc6, 0x52]);
        assert_eq!(reading.to_string(), "GET_ZIP_SWITCH_STATE: 'UNKNOWN (0x07)'.");
    }

    #[test]
    fn zip_switch_open() {
        let reading = super::dissect(MeasureCmd::GetZipSwitchState, &[0x00]);
        assert_eq!(reading, MeasureReading::ZipSwitch(ZipState::Open));
        assert_eq!(reading.to_string(), "GET_ZIP_SWITCH_STATE: 'OPEN'.");
    }

    #[test]
    fn zip_switch_with_a_word_reads_as_voltage() {
        let reading = super::dissect(MeasureCmd::GetZipSwitchState, &[0x03, 0xe8]);
        assert_eq!(reading.to_string(), "GET_ZIP_SWITCH_STATE: '1.000 V'.");
    }

    #[test]
    fn charging_state() {
        let reading = measure(&[0x03, 0x08, 0x06, 0x40, 0x83, 0xf2]);
        assert_eq!(
            reading.to_string(),
            "GET_CHARGING_STATE: '1.600 V'. Charger: 'USB power OK, fast charge'."
        );
    }

    #[test]
    fn charger_status_bits() {
        assert_eq!(ChargerStatus(0x01).to_string(), "over or undervoltage present, charge suspend");
        assert_eq!(ChargerStatus(0x0b).to_string(), "over or undervoltage present, charge done");
        assert_eq!(ChargerStatus(0x0c).to_string(), "pre charge");
        assert_eq!(ChargerStatus(0x10).phase(), "error in charge information");
    }

    #[test]
    fn short_voltage_is_dumped() {
        let reading = super::dissect(MeasureCmd::GetSquibVoltage, &[0x12]);
        assert_eq!(reading.to_string(), "Squib Voltage: '0x12'.");
    }
}
