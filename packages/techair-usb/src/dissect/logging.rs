//! [`Module::Logging`](crate::Module::Logging) payloads.
//!
//! Most log layouts are unknown, so every reply keeps its raw bytes. A few
//! replies also carry a value that is decoded next to the dump.

use core::fmt;

use crate::{RawBytes, cmds::LoggingCmd};

/// A decoded value carried by a logging reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDetail {
    OpHours { hours: u16, minutes: u8, seconds: u8 },
    Count(u16),
}

impl fmt::Display for LogDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpHours {
                hours,
                minutes,
                seconds,
            } => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingReading {
    pub command: LoggingCmd,
    pub detail: Option<LogDetail>,
    pub raw: RawBytes,
}

impl LoggingReading {
    /// Whether the command is one whose replies have been seen and labelled.
    pub fn is_recognized(&self) -> bool {
        use LoggingCmd as C;

        matches!(
            self.command,
            C::GetOpHours
                | C::ClearOpHours
                | C::GetNumOfErrors
                | C::GetErrorEntry
                | C::GetNumOfPrecrashLogs
                | C::GetNumOfPostcrashLogs
                | C::GetPrecrashBulk
                | C::GetErrorHistory
                | C::GetBatCount
        )
    }
}

impl fmt::Display for LoggingReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.command.name() {
            Some(name) if self.is_recognized() => f.write_str(name)?,
            _ => write!(f, "unhandled logging command 0x{:02x}", self.command.tag())?,
        }
        if let Some(detail) = self.detail {
            write!(f, " '{detail}'")?;
        }
        if !self.raw.is_empty() {
            write!(f, " : {}", self.raw)?;
        }
        Ok(())
    }
}

/// Interprets a logging payload, which may be empty.
pub(super) fn dissect(command: LoggingCmd, payload: &[u8]) -> LoggingReading {
    use LoggingCmd as C;

    let detail = match (command, payload) {
        (C::GetOpHours, [h0, h1, minutes, seconds, ..]) => Some(LogDetail::OpHours {
            hours: u16::from_be_bytes([*h0, *h1]),
            minutes: *minutes,
            seconds: *seconds,
        }),
        (C::GetNumOfErrors, [count, ..]) => Some(LogDetail::Count(u16::from(*count))),
        (C::GetNumOfPrecrashLogs | C::GetNumOfPostcrashLogs | C::GetBatCount, [hi, lo, ..]) => {
            Some(LogDetail::Count(u16::from_be_bytes([*hi, *lo])))
        }
        _ => None,
    };

    LoggingReading {
        command,
        detail,
        raw: RawBytes::from(payload),
    }
}
