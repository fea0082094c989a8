//! [`Module::SwUpdate`](crate::Module::SwUpdate) payloads, i.e. bootloader replies.

use core::fmt;

use crate::{RawBytes, cmds::SwUpdateCmd};

/// Page count the bootloader answers with when a firmware chunk was rejected.
pub const PAGE_COUNT_FAILED: u16 = 0xFFFF;

/// Progress of a firmware update as reported by the bootloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootloaderState {
    WaitFw,
    CheckReadFw,
    EraseFlash,
    FlashFw,
    CalcFlashedCrc,
    WaitVerifyFlashedCrc,
    VerifyFlashedCrcMemory,
    Unknown(u8),
}

impl BootloaderState {
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::WaitFw => Some("WAITFW"),
            Self::CheckReadFw => Some("CHECKREADFW"),
            Self::EraseFlash => Some("ERASEFLASH"),
            Self::FlashFw => Some("FLASHFW"),
            Self::CalcFlashedCrc => Some("CALCFLASHEDCRC"),
            Self::WaitVerifyFlashedCrc => Some("WAITVERIFYFLASHEDCRC"),
            Self::VerifyFlashedCrcMemory => Some("VERIFYFLASHEDCRCMEMORY"),
            Self::Unknown(_) => None,
        }
    }
}

impl From<u8> for BootloaderState {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => Self::WaitFw,
            0x01 => Self::CheckReadFw,
            0x02 => Self::EraseFlash,
            0x03 => Self::FlashFw,
            0x04 => Self::CalcFlashedCrc,
            0x05 => Self::WaitVerifyFlashedCrc,
            0x06 => Self::VerifyFlashedCrcMemory,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for BootloaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(raw) => write!(f, "UNKNOWN (0x{raw:02X})"),
            state => f.write_str(state.name().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwUpdateReading {
    BootloaderVersion(u8),
    BootloaderState(BootloaderState),
    /// Pages still expected after a firmware chunk, `None` when the chunk was rejected.
    FwData(Option<u16>),
    /// Zero when the flashed image matched its checksum.
    CrcCheck(u8),
    Other { command: SwUpdateCmd, raw: RawBytes },
}

impl fmt::Display for SwUpdateReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BootloaderVersion(version) => write!(f, "Bootloader Version: '{version}'."),
            Self::BootloaderState(state) => write!(f, "Bootloader State: '{state}'."),
            Self::FwData(Some(pages)) => write!(f, "FW Data: '{pages}' page(s) left."),
            Self::FwData(None) => f.write_str("FW Data: 'transfer failed'."),
            Self::CrcCheck(0) => f.write_str("CRC Check: 'OK'."),
            Self::CrcCheck(code) => write!(f, "CRC Check: 'FAILED (0x{code:02X})'."),
            Self::Other { raw, .. } => write!(f, "sw-update? '{raw}'."),
        }
    }
}

/// Interprets a non-empty bootloader payload.
///
/// Requests that carry data (firmware chunks, the expected checksum) do not
/// match the reply layouts and are dumped.
pub(super) fn dissect(command: SwUpdateCmd, payload: &[u8]) -> SwUpdateReading {
    use SwUpdateCmd as C;

    match (command, payload) {
        (C::GetBootloaderVersion, [version, ..]) => SwUpdateReading::BootloaderVersion(*version),
        (C::GetBootloaderState, [state, ..]) => {
            SwUpdateReading::BootloaderState(BootloaderState::from(*state))
        }
        (C::WriteFwData, [hi, lo]) => match u16::from_be_bytes([*hi, *lo]) {
            PAGE_COUNT_FAILED => SwUpdateReading::FwData(None),
            pages => SwUpdateReading::FwData(Some(pages)),
        },
        (C::CrcCheck, [code]) => SwUpdateReading::CrcCheck(*code),
        (
            C::StartBootloader
            | C::GetBootloaderVersion
            | C::GetBootloaderState
            | C::WriteFwData
            | C::QuitBootloader
            | C::CrcCheck,
            _,
        ) => other(command, payload),
        (C::Unknown(_), _) => other(command, payload),
    }
}

fn other(command: SwUpdateCmd, payload: &[u8]) -> SwUpdateReading {
    SwUpdateReading::Other {
        command,
        raw: RawBytes::from(payload),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::{
        Command, Encode, RequestFrame,
        dissect::{Reading, dissect},
    };

    fn sw_update(bytes: &[u8]) -> SwUpdateReading {
        match dissect(bytes).unwrap().reading {
            Ok(Reading::SwUpdate(reading)) => reading,
            other => panic!("not a sw-update reading: {other:?}"),
        }
    }

    #[test]
    fn bootloader_version() {
        let reading = sw_update(&[0x20, 0x01, 0x03, 0x31, 0x9b]);
        assert_eq!(reading, SwUpdateReading::BootloaderVersion(3));
        assert_eq!(reading.to_string(), "Bootloader Version: '3'.");
    }

    #[test]
    fn bootloader_state() {
        let reading = sw_update(&[0x20, 0x02, 0x03, 0x31, 0x6b]);
        assert_eq!(reading, SwUpdateReading::BootloaderState(BootloaderState::FlashFw));
        assert_eq!(reading.to_string(), "Bootloader State: 'FLASHFW'.");
    }

    #[test]
    fn bootloader_states() {
        assert_eq!(BootloaderState::from(0x00), BootloaderState::WaitFw);
        assert_eq!(
            BootloaderState::from(0x06).to_string(),
            "VERIFYFLASHEDCRCMEMORY"
        );
        assert_eq!(BootloaderState::from(0x07), BootloaderState::Unknown(0x07));
        assert_eq!(BootloaderState::from(0x07).to_string(), "UNKNOWN (0x07)");
    }

    #[test]
    fn firmware_chunk_replies() {
        let reading = super::dissect(SwUpdateCmd::WriteFwData, &[0x00, 0x10]);
        assert_eq!(reading.to_string(), "FW Data: '16' page(s) left.");

        let reading = super::dissect(SwUpdateCmd::WriteFwData, &[0xff, 0xff]);
        assert_eq!(reading, SwUpdateReading::FwData(None));
        assert_eq!(reading.to_string(), "FW Data: 'transfer failed'.");
    }

    #[test]
    fn crc_check_result() {
        assert_eq!(
            super::dissect(SwUpdateCmd::CrcCheck, &[0x00]).to_string(),
            "CRC Check: 'OK'."
        );
        assert_eq!(
            super::dissect(SwUpdateCmd::CrcCheck, &[0x01]).to_string(),
            "CRC Check: 'FAILED (0x01)'."
        );
    }

    #[test]
    fn crc_check_request_is_dumped() {
        let bytes =
            RequestFrame::with_payload(Command::SwUpdate(SwUpdateCmd::CrcCheck), 0xAABBu16).to_vec();
        let reading = sw_update(&bytes);
        assert_eq!(
            reading,
            SwUpdateReading::Other {
                command: SwUpdateCmd::CrcCheck,
                raw: RawBytes::new([0xaa_u8, 0xbb]),
            }
        );
        assert_eq!(reading.to_string(), "sw-update? '0xAA 0xBB'.");
    }

    #[test]
    fn unknown_commands_are_dumped() {
        let reading = super::dissect(SwUpdateCmd::from_tag(0x09), &[0x01]);
        assert_eq!(
            reading,
            SwUpdateReading::Other {
                command: SwUpdateCmd::Unknown(0x09),
                raw: RawBytes::new([0x01_u8]),
            }
        );
    }
}
