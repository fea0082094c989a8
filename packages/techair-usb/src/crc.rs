use crc::Crc;

use crate::{DecodeError, DecodeErrorKind};

/// [CRC16 error-detecting algorithm](https://en.wikipedia.org/wiki/Cyclic_redundancy_check)
/// used to close every frame.
///
/// This is the MODBUS variant: reflected polynomial `0xA001`, initial register `0xFFFF`
/// and no final XOR.
pub const TECHAIR_CRC16: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_MODBUS);

/// Computes the frame checksum over `data`.
#[inline]
pub fn crc16(data: &[u8]) -> u16 {
    TECHAIR_CRC16.checksum(data)
}

/// Checks the two trailing checksum bytes of `frame` against the bytes before them.
///
/// The checksum travels low byte first, so the value read big-endian from the
/// trailer is compared with the byte-swapped CRC.
pub(crate) fn verify_crc16<T>(frame: &[u8]) -> Result<(), DecodeError> {
    let Some((body, [hi, lo])) = frame.split_last_chunk::<2>() else {
        return Err(DecodeError::new::<T>(DecodeErrorKind::UnexpectedEnd));
    };

    let expected = crc16(body).swap_bytes();
    let value = u16::from_be_bytes([*hi, *lo]);

    if value != expected {
        return Err(DecodeError::new::<T>(DecodeErrorKind::Checksum { value, expected }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{crc16, verify_crc16};
    use crate::DecodeErrorKind;

    #[test]
    fn check_value() {
        assert_eq!(crc16(b"123456789"), 0x4B37);
        assert_eq!(crc16(&[0xff; 5]), 32817);
    }

    #[test]
    fn empty_input_leaves_register_untouched() {
        assert_eq!(crc16(&[]), 0xFFFF);
    }

    #[test]
    fn captured_frame_verifies() {
        const FRAME: [u8; 6] = [0x00, 0x02, 0x01, 0x20, 0xa1, 0xac];
        assert_eq!(verify_crc16::<()>(&FRAME), Ok(()));
    }

    #[test]
    fn any_flipped_byte_fails() {
        const FRAME: [u8; 6] = [0x00, 0x02, 0x01, 0x20, 0xa1, 0xac];

        for i in 0..4 {
            let mut frame = FRAME;
            frame[i] ^= 0x01;

            let err = verify_crc16::<()>(&frame).unwrap_err();
            assert!(matches!(err.kind(), DecodeErrorKind::Checksum { value: 0xa1ac, .. }));
        }
    }

    #[test]
    fn mismatch_reports_both_values() {
        let err = verify_crc16::<()>(&[0x00, 0x02, 0x00, 0x64, 0x12, 0x34]).unwrap_err();
        assert_eq!(
            err.kind(),
            DecodeErrorKind::Checksum {
                value: 0x1234,
                expected: 0xa00f,
            }
        );
    }
}
