//! [`Module::General`](crate::Module::General) payloads.

use alloc::string::String;
use core::fmt;

use bitflags::bitflags;

use super::{expect_len, latin1};
use crate::{Decode, DecodeError, DecodeErrorKind, RawBytes, cmds::GeneralCmd, fixed};

/// Customer info text is wrapped after this many payload positions.
pub const CUSTOMER_INFO_WRAP: usize = 25;

/// Riding mode reported by `GET_OPERATING_MODUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Street,
    Race3S,
    Race,
    RaceVestStreet,
    Unknown(u8),
}

impl OpMode {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0xaa => Self::Street,
            0xbb => Self::Race3S,
            0xdd => Self::Race,
            0xcc => Self::RaceVestStreet,
            other => Self::Unknown(other),
        }
    }

    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::Street => Some("STREET"),
            Self::Race3S => Some("RACE_3S"),
            Self::Race => Some("RACE"),
            Self::RaceVestStreet => Some("RACE.VEST.STREET"),
            Self::Unknown(_) => None,
        }
    }
}

bitflags! {
    /// Optional hardware reported alongside the [`OpMode`].
    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    pub struct OpAddons: u8 {
        const SD_CARD = 1 << 2;
        const GPS = 1 << 3;
        /// Open-loop detection of the squib circuits is switched off.
        const OPEN_LOOP_DISABLED = 1 << 4;
    }
}

impl fmt::Display for OpAddons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, label) in [
            (Self::SD_CARD, "SD card"),
            (Self::GPS, "GPS"),
            (Self::OPEN_LOOP_DISABLED, "open-loop detection disabled"),
        ] {
            if self.contains(flag) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(label)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Decoded `GET_OPERATING_MODUS` reply.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingModus {
    pub mode: OpMode,
    pub addons: OpAddons,
    pub raw: RawBytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneralReading {
    CtrlMode {
        ready: bool,
        raw: RawBytes,
    },
    CustomerInfo {
        len: u8,
        /// Printable characters of the text, with the wrap points kept as `'\n'`.
        text: String,
    },
    /// `None` when the reply is too short to carry both mode bytes.
    OperatingModus(Option<OperatingModus>),
    SoftwareVersion(f64),
    HardwareVersion(RawBytes),
    SerialNumber(String),
    ServiceDate {
        day: u8,
        month: u8,
        year: u8,
    },
    Unknown(RawBytes),
}

impl fmt::Display for GeneralReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CtrlMode { ready, raw } => {
                f.write_str("CTRL_MODE: '")?;
                if *ready {
                    f.write_str("Ready ")?;
                }
                write!(f, "{raw}'.")
            }
            Self::CustomerInfo { len, text } => {
                writeln!(f, "CUSTOMERINFO: {len} byte(s)")?;
                writeln!(f, "-----")?;
                writeln!(f, "{text}")?;
                f.write_str("-----.")
            }
            Self::OperatingModus(None) => f.write_str("OPERATING MODUS: ''."),
            Self::OperatingModus(Some(modus)) => {
                f.write_str("OPERATING MODUS: '")?;
                match modus.mode.name() {
                    Some(name) => f.write_str(name)?,
                    None => write!(f, "{}", modus.raw)?,
                }
                f.write_str("'.")?;
                if !modus.addons.is_empty() {
                    write!(f, " Add-ons: '{}'.", modus.addons)?;
                }
                Ok(())
            }
            Self::SoftwareVersion(version) => write!(f, "SW Version: '{version:.2}'."),
            Self::HardwareVersion(raw) => write!(f, "HW Version: '{raw}'."),
            Self::SerialNumber(serial) => write!(f, "SERIAL: '{serial}'."),
            Self::ServiceDate { day, month, year } => {
                write!(f, "SERVICEDATE: '{day:02}/{month:02}/20{year:02}'.")
            }
            Self::Unknown(raw) => write!(f, "general? '{raw}'."),
        }
    }
}

/// Interprets a non-empty general payload.
pub(super) fn dissect(cmd: GeneralCmd, payload: &[u8]) -> Result<GeneralReading, DecodeError> {
    use GeneralCmd as C;

    let mut data = payload;

    Ok(match cmd {
        C::GetCtrlMode | C::SetCtrlMode => GeneralReading::CtrlMode {
            ready: matches!(payload, [_, 0x71]),
            raw: RawBytes::from(payload),
        },
        C::GetCustomerInfo | C::SetCustomerInfo => customer_info(payload)?,
        C::GetOperatingModus => GeneralReading::OperatingModus(match payload {
            [mode, addons, ..] => Some(OperatingModus {
                mode: OpMode::from_raw(*mode),
                addons: OpAddons::from_bits_truncate(*addons),
                raw: RawBytes::from(payload),
            }),
            _ => None,
        }),
        C::GetSoftwareVersion => {
            expect_len::<GeneralReading>("software version", payload, 2)?;
            GeneralReading::SoftwareVersion(10.0 * fixed::decimal(u16::decode(&mut data)?))
        }
        C::GetHardwareVersion | C::SetHardwareVersion => {
            GeneralReading::HardwareVersion(RawBytes::from(payload))
        }
        C::GetSerialNr | C::SetSerialNr => GeneralReading::SerialNumber(latin1(payload)),
        C::GetServiceDate | C::SetServiceDate => {
            expect_len::<GeneralReading>("service date", payload, 3)?;
            let [day, month, year] = <[u8; 3]>::decode(&mut data)?;
            GeneralReading::ServiceDate { day, month, year }
        }
        C::Unknown(_) => GeneralReading::Unknown(RawBytes::from(payload)),
    })
}

/// Length-prefixed text: one length byte, then exactly that many text bytes.
fn customer_info(payload: &[u8]) -> Result<GeneralReading, DecodeError> {
    let Some((&len, text)) = payload.split_first() else {
        return Err(DecodeError::new::<GeneralReading>(
            DecodeErrorKind::UnexpectedEnd,
        ));
    };
    expect_len::<GeneralReading>("customer info", text, len as usize)?;

    let mut rendered = String::with_capacity(text.len() * 2);
    for (i, &byte) in text.iter().enumerate() {
        if !(byte.is_ascii_graphic() || byte == b' ') {
            continue;
        }
        if i > 0 && i % CUSTOMER_INFO_WRAP == 0 {
            rendered.push('\n');
        } else if !rendered.is_empty() {
            rendered.push(' ');
        }
        rendered.push(char::from(byte));
    }

    Ok(GeneralReading::CustomerInfo { len, text: rendered })
}
