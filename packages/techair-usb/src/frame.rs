use crate::{
    DecodeError, DecodeErrorKind, Encode,
    cmds::{Command, Module},
    crc::{crc16, verify_crc16},
};

/// Whether a frame's trailing checksum was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checksum {
    /// The trailing two bytes matched the CRC16 of the bytes before them.
    Valid,
    /// The frame is too short (two bytes) to carry a checksum.
    Unchecked,
}

/// A single frame as captured on the bus.
///
/// # Encoding
///
/// | Field     | Size   | Description |
/// |-----------|--------|-------------|
/// | `module`  | 1      | A [module tag](crate::cmds::tags). |
/// | `command` | 1      | A command tag, scoped to the module. |
/// | `payload` | n      | Command-specific payload; empty for most requests. |
/// | `crc16`   | 2      | [`TECHAIR_CRC16`](crate::TECHAIR_CRC16) of all preceding bytes, low byte first. |
///
/// Frames of one byte or less carry nothing and are rejected. The checksum is
/// only verified when there are more than two bytes, and a command is only
/// present when there are more than three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    bytes: &'a [u8],
    checksum: Checksum,
}

impl<'a> Frame<'a> {
    /// Validates the length and trailing checksum of `bytes`.
    ///
    /// # Errors
    ///
    /// - [`DecodeErrorKind::EmptyFrame`] if there is at most one byte.
    /// - [`DecodeErrorKind::Checksum`] if the checksum does not match.
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if bytes.len() <= 1 {
            return Err(DecodeError::new::<Self>(DecodeErrorKind::EmptyFrame {
                len: bytes.len(),
            }));
        }

        let checksum = if bytes.len() > 2 {
            verify_crc16::<Self>(bytes)?;
            Checksum::Valid
        } else {
            Checksum::Unchecked
        };

        Ok(Self { bytes, checksum })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn checksum(&self) -> Checksum {
        self.checksum
    }

    pub fn module(&self) -> Module {
        Module::from_tag(self.bytes[0])
    }

    /// The command, if the frame is long enough to carry one alongside its checksum.
    pub fn command(&self) -> Option<Command> {
        (self.bytes.len() > 3).then(|| Command::new(self.module(), self.bytes[1]))
    }

    /// Bytes between the command tag and the checksum.
    pub fn payload(&self) -> &'a [u8] {
        if self.bytes.len() > 3 {
            &self.bytes[2..self.bytes.len() - 2]
        } else {
            &[]
        }
    }
}

/// A host-to-controller frame.
///
/// The payload type `P` must implement [`Encode`]; most requests carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFrame<P: Encode = ()> {
    pub command: Command,
    pub payload: P,
}

impl RequestFrame<()> {
    /// Creates a request with no payload.
    pub fn new(command: Command) -> Self {
        Self {
            command,
            payload: (),
        }
    }
}

impl<P: Encode> RequestFrame<P> {
    pub fn with_payload(command: Command, payload: P) -> Self {
        Self { command, payload }
    }
}

impl<P: Encode> Encode for RequestFrame<P> {
    fn size(&self) -> usize {
        4 + self.payload.size()
    }

    fn encode(&self, data: &mut [u8]) {
        let size = self.size();

        data[0] = self.command.module().tag();
        data[1] = self.command.tag();
        self.payload.encode(&mut data[2..size - 2]);

        // The controller expects the checksum low byte first.
        let crc = crc16(&data[..size - 2]);
        data[size - 2..size].copy_from_slice(&crc.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmds::{AirbagCmd, GeneralCmd, LoggingCmd, MeasureCmd, SensorCmd, SwUpdateCmd};

    #[test]
    fn get_sw_version() {
        let frame = RequestFrame::new(Command::General(GeneralCmd::GetSoftwareVersion));
        assert_eq!(frame.to_vec(), [0x00, 0x02, 0x80, 0x71]);
    }

    #[test]
    fn get_operating_modus() {
        let frame = RequestFrame::new(Command::General(GeneralCmd::GetOperatingModus));
        assert_eq!(frame.to_vec(), [0x00, 0x03, 0x41, 0xb1]);
    }

    #[test]
    fn get_op_hours() {
        let frame = RequestFrame::new(Command::Logging(LoggingCmd::GetOpHours));
        assert_eq!(frame.to_vec(), [0x01, 0x00, 0x00, 0x20]);
    }

    #[test]
    fn get_logic_voltage() {
        let frame = RequestFrame::new(Command::Measure(MeasureCmd::GetLogicVoltage));
        assert_eq!(frame.to_vec(), [0x03, 0x00, 0x01, 0x40]);
    }

    #[test]
    fn set_led_state() {
        let frame = RequestFrame::with_payload(Command::Measure(MeasureCmd::SetExtDisplay), 0xffu8);
        assert_eq!(frame.to_vec(), [0x03, 0x0a, 0xff, 0xc7, 0x20]);
    }

    #[test]
    fn enable_sensor_readings() {
        let frame =
            RequestFrame::with_payload(Command::Sensor(SensorCmd::EnableSensorReading), 0x35u8);
        assert_eq!(frame.to_vec(), [0x04, 0x00, 0x35, 0xf0, 0x16]);
    }

    #[test]
    fn set_inflation_type() {
        let frame =
            RequestFrame::with_payload(Command::Airbag(AirbagCmd::SetInflationType), 0xffu8);
        assert_eq!(frame.to_vec(), [0x06, 0x0b, 0xff, 0xd6, 0xb1]);
    }

    #[test]
    fn crc_check_payload_is_big_endian() {
        let frame = RequestFrame::with_payload(Command::SwUpdate(SwUpdateCmd::CrcCheck), 0xAABBu16);
        assert_eq!(frame.to_vec(), [0x20, 0x05, 0xaa, 0xbb, 0x25, 0x36]);
    }

    #[test]
    fn encoded_requests_parse_back() {
        let command = Command::Measure(MeasureCmd::GetBatteryVoltage);
        let bytes = RequestFrame::new(command).to_vec();
        let frame = Frame::new(&bytes).unwrap();

        assert_eq!(frame.checksum(), Checksum::Valid);
        assert_eq!(frame.command(), Some(command));
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn empty_frames() {
        for bytes in [&[][..], &[0x00][..]] {
            let err = Frame::new(bytes).unwrap_err();
            assert_eq!(err.kind(), DecodeErrorKind::EmptyFrame { len: bytes.len() });
        }
    }

    #[test]
    fn two_byte_frames_skip_the_checksum() {
        let frame = Frame::new(&[0x04, 0x99]).unwrap();
        assert_eq!(frame.checksum(), Checksum::Unchecked);
        assert_eq!(frame.module(), Module::Sensor);
        assert_eq!(frame.command(), None);
    }

    #[test]
    fn three_byte_frames_are_checked() {
        let frame = Frame::new(&[0x04, 0xbe, 0x83]).unwrap();
        assert_eq!(frame.checksum(), Checksum::Valid);
        assert_eq!(frame.command(), None);

        assert!(Frame::new(&[0x04, 0xbe, 0x84]).is_err());
    }

    #[test]
    fn payload_sits_between_command_and_crc() {
        let bytes = [0x00, 0x0a, 0x0f, 0x06, 0x15, 0xd5, 0xb4];
        let frame = Frame::new(&bytes).unwrap();
        assert_eq!(frame.payload(), &[0x0f, 0x06, 0x15]);
        assert_eq!(frame.command(), Some(Command::General(GeneralCmd::GetServiceDate)));
    }
}
