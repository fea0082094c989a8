//! Frame dissection.
//!
//! A [`Dissector`] takes one captured frame, validates it as a [`Frame`] and
//! interprets its payload according to the module and command tags. The
//! result is a [`Dissection`]: a structured record that also renders as the
//! human-readable text of the capture tool through [`Display`](fmt::Display).
//!
//! Dissection is stateless. The same bytes always produce the same
//! [`Dissection`].

use alloc::string::String;
use core::fmt;

use crate::{
    DecodeError, DecodeErrorKind, RawBytes,
    cmds::{Command, Module},
    fixed::AxisDecoding,
    frame::{Checksum, Frame},
    tokenize::{TokenMode, tokenize_with},
};

pub mod airbag;
pub mod general;
pub mod logging;
pub mod measure;
pub mod power;
pub mod sensor;
pub mod swupdate;

pub use airbag::AirbagReading;
pub use general::GeneralReading;
pub use logging::LoggingReading;
pub use measure::MeasureReading;
pub use power::PowerReading;
pub use sensor::SensorReading;
pub use swupdate::SwUpdateReading;

/// Knobs for decodings whose correct form is not settled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DissectOptions {
    /// How capture lines are tokenized by [`Dissector::dissect_line`].
    pub tokens: TokenMode,
    /// How sensor axis words are read.
    pub axis: AxisDecoding,
}

/// Interpretation of a frame's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// The frame is too short to carry a command.
    Short,
    /// A command with no payload, typically a request.
    Request,
    General(GeneralReading),
    Logging(LoggingReading),
    Power(PowerReading),
    Measure(MeasureReading),
    Sensor(SensorReading),
    Airbag(AirbagReading),
    SwUpdate(SwUpdateReading),
    /// Payload of a module whose layouts are not known.
    Dump(RawBytes),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Short | Reading::Request => Ok(()),
            Reading::General(reading) => write!(f, "{reading}"),
            Reading::Logging(reading) => write!(f, "{reading}"),
            Reading::Power(reading) => write!(f, "{reading}"),
            Reading::Measure(reading) => write!(f, "{reading}"),
            Reading::Sensor(reading) => write!(f, "{reading}"),
            Reading::Airbag(reading) => write!(f, "{reading}"),
            Reading::SwUpdate(reading) => write!(f, "{reading}"),
            Reading::Dump(raw) => {
                writeln!(f, " ---- unknown -----")?;
                writeln!(f, " ---- dumping -----")?;
                if !raw.is_empty() {
                    writeln!(f, "{raw}")?;
                }
                write!(f, " ---- dumping -----")
            }
        }
    }
}

/// Everything known about one checksum-valid frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Dissection {
    pub module: Module,
    /// `None` when the frame is too short to carry a command.
    pub command: Option<Command>,
    /// Total frame length, including tags and checksum.
    pub len: usize,
    pub checksum: Checksum,
    pub payload: RawBytes,
    /// The payload interpretation, or why it could not be interpreted.
    pub reading: Result<Reading, DecodeError>,
}

impl Dissection {
    /// `0` when the payload was interpreted, `-1` otherwise.
    pub fn status(&self) -> i32 {
        match self.reading {
            Ok(_) => 0,
            Err(_) => -1,
        }
    }
}

impl fmt::Display for Dissection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found '{}' [0x{:02x}] with <n={}>",
            self.module,
            self.module.tag(),
            self.len
        )?;

        if let Some(command) = self.command {
            write!(
                f,
                " subtype: '{}' [0x{:02x}] with word len={}",
                command,
                command.tag(),
                self.payload.len()
            )?;
        }

        match &self.reading {
            Ok(Reading::Short | Reading::Request) => Ok(()),
            Ok(reading) => write!(f, "\n{reading}"),
            Err(err) => write!(f, "\ndecode failed: {}", err.kind()),
        }
    }
}

/// Decodes captured frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dissector {
    options: DissectOptions,
}

impl Dissector {
    pub fn new(options: DissectOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> DissectOptions {
        self.options
    }

    /// Tokenizes a capture line (prefix already stripped) and dissects it.
    ///
    /// # Errors
    ///
    /// Fails when the line is rejected by a strict tokenizer, or for the same
    /// reasons as [`Dissector::dissect`].
    pub fn dissect_line(&self, line: &str) -> Result<Dissection, DecodeError> {
        let bytes = tokenize_with(line, self.options.tokens)?;
        self.dissect(&bytes)
    }

    /// Dissects one frame.
    ///
    /// # Errors
    ///
    /// Fails with [`DecodeErrorKind::EmptyFrame`] or
    /// [`DecodeErrorKind::Checksum`] when the frame as a whole is unusable.
    /// Problems interpreting the payload are reported in
    /// [`Dissection::reading`] instead.
    pub fn dissect(&self, bytes: &[u8]) -> Result<Dissection, DecodeError> {
        let frame = Frame::new(bytes)?;
        let command = frame.command();
        let payload = frame.payload();

        let reading = match command {
            Some(command) => self.interpret(command, payload),
            None => Ok(Reading::Short),
        };

        Ok(Dissection {
            module: frame.module(),
            command,
            len: frame.len(),
            checksum: frame.checksum(),
            payload: RawBytes::from(payload),
            reading,
        })
    }

    fn interpret(&self, command: Command, payload: &[u8]) -> Result<Reading, DecodeError> {
        match command {
            // Logging replies are labelled even when they carry nothing.
            Command::Logging(cmd) => Ok(Reading::Logging(logging::dissect(cmd, payload))),
            Command::Algorithm(_) | Command::SdCard(_) | Command::Other { .. } => {
                Ok(Reading::Dump(RawBytes::from(payload)))
            }
            _ if payload.is_empty() => Ok(Reading::Request),
            Command::General(cmd) => general::dissect(cmd, payload).map(Reading::General),
            Command::Power(cmd) => Ok(Reading::Power(power::dissect(cmd, payload))),
            Command::Measure(cmd) => Ok(Reading::Measure(measure::dissect(cmd, payload))),
            Command::Sensor(cmd) => Ok(Reading::Sensor(sensor::dissect(
                cmd,
                payload,
                self.options.axis,
            ))),
            Command::Airbag(cmd) => Ok(Reading::Airbag(airbag::dissect(cmd, payload))),
            Command::SwUpdate(cmd) => Ok(Reading::SwUpdate(swupdate::dissect(cmd, payload))),
        }
    }
}

/// Dissects one frame with the default options.
pub fn dissect(bytes: &[u8]) -> Result<Dissection, DecodeError> {
    Dissector::default().dissect(bytes)
}

/// Fails with [`DecodeErrorKind::BadFieldLength`] unless `payload` is exactly `expected` bytes.
pub(crate) fn expect_len<T>(
    field: &'static str,
    payload: &[u8],
    expected: usize,
) -> Result<(), DecodeError> {
    if payload.len() != expected {
        return Err(DecodeError::new::<T>(DecodeErrorKind::BadFieldLength {
            field,
            expected,
            found: payload.len(),
        }));
    }
    Ok(())
}

/// Renders bytes as Latin-1 characters.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;

    #[test]
    fn empty_frame_is_rejected() {
        let err = dissect(&[0x00]).unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::EmptyFrame { len: 1 });
    }

    #[test]
    fn checksum_mismatch_stops_decoding() {
        let err = dissect(&[0x00, 0x02, 0x00, 0x64, 0x0f, 0xa0]).unwrap_err();
        assert_eq!(
            err.kind(),
            DecodeErrorKind::Checksum {
                value: 0x0fa0,
                expected: 0xa00f,
            }
        );
    }

    #[test]
    fn short_frames_only_name_the_module() {
        let d = dissect(&[0x04, 0xbe, 0x83]).unwrap();
        assert_eq!(d.module, Module::Sensor);
        assert_eq!(d.command, None);
        assert_eq!(d.reading, Ok(Reading::Short));
        assert_eq!(d.to_string(), "Found 'sensor' [0x04] with <n=3>");
    }

    #[test]
    fn requests_carry_no_reading() {
        let d = dissect(&[0x00, 0x02, 0x80, 0x71]).unwrap();
        assert_eq!(d.reading, Ok(Reading::Request));
        assert_eq!(d.status(), 0);
        assert_eq!(
            d.to_string(),
            "Found 'general' [0x00] with <n=4> subtype: 'GET_SOFTWARE_VERSION' [0x02] with word len=0"
        );
    }

    #[test]
    fn software_version_end_to_end() {
        let d = dissect(&[0x00, 0x02, 0x00, 0x64, 0xa0, 0x0f]).unwrap();
        assert_eq!(d.status(), 0);
        assert!(d.to_string().ends_with("\nSW Version: '1.00'."));
    }

    #[test]
    fn unknown_modules_are_dumped() {
        let d = dissect(&[0x42, 0x01, 0xde, 0xad, 0xdd, 0x81]).unwrap();
        assert_eq!(d.module, Module::Unknown(0x42));
        assert_eq!(d.reading, Ok(Reading::Dump(RawBytes::new([0xde_u8, 0xad]))));

        let text = d.to_string();
        assert!(text.starts_with("Found 'unknown' [0x42]"));
        assert!(text.contains(" ---- unknown -----\n ---- dumping -----\n0xDE 0xAD\n"));
    }

    #[test]
    fn modules_without_layouts_are_dumped_under_their_command_name() {
        let d = dissect(&[0x05, 0x04, 0x01, 0x02, 0xc1, 0x78]).unwrap();
        assert!(d.to_string().contains("subtype: 'GET_ALOGRITHM_THRESHOLDS'"));
        assert_eq!(d.reading, Ok(Reading::Dump(RawBytes::new([0x01_u8, 0x02]))));
    }

    #[test]
    fn bootloader_replies_are_interpreted() {
        let d = dissect(&[0x20, 0x02, 0x03, 0x31, 0x6b]).unwrap();
        assert!(matches!(d.reading, Ok(Reading::SwUpdate(_))));
        assert_eq!(
            d.to_string(),
            "Found 'sw-update' [0x20] with <n=5> subtype: 'GET_BOOTLOADERSTATE' [0x02] with word len=1\nBootloader State: 'FLASHFW'."
        );

        let request = dissect(&[0x20, 0x02, 0x99, 0xb1]).unwrap();
        assert_eq!(request.reading, Ok(Reading::Request));
    }

    #[test]
    fn bad_field_length_is_scoped_to_the_frame() {
        let d = dissect(&[0x00, 0x02, 0x01, 0xb1, 0x60]).unwrap();
        assert_eq!(d.status(), -1);
        assert!(d.to_string().ends_with(
            "decode failed: Bad software version length. Expected 2 byte(s), found 1."
        ));
    }

    #[test]
    fn dissection_is_idempotent() {
        let bytes = [0x04, 0x02, 0x00, 0x00, 0x7f, 0xff, 0x80, 0x00, 0x2a, 0x1c];
        let dissector = Dissector::default();

        let first = dissector.dissect(&bytes).unwrap();
        let second = dissector.dissect(&bytes).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn strict_lines() {
        let strict = Dissector::new(DissectOptions {
            tokens: TokenMode::Strict,
            ..Default::default()
        });

        assert!(strict.dissect_line("00 02 80 71").is_ok());
        assert_eq!(
            strict.dissect_line("00 02 80 7g").unwrap_err().kind(),
            DecodeErrorKind::InvalidToken { index: 3 }
        );

        // permissive parsing reads "7g" as 0x07 and trips the checksum instead
        let err = Dissector::default().dissect_line("00 02 80 7g").unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorKind::Checksum { .. }));
    }

    #[test]
    fn payload_is_kept_verbatim() {
        let d = dissect(&[0x00, 0x0a, 0x0f, 0x06, 0x15, 0xd5, 0xb4]).unwrap();
        assert_eq!(d.payload.iter().copied().collect::<Vec<_>>(), [0x0f, 0x06, 0x15]);
        assert_eq!(d.checksum, Checksum::Valid);
    }
}
