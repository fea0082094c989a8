use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    type_name: &'static str,
}

impl DecodeError {
    pub fn new<T>(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            type_name: core::any::type_name::<T>(),
        }
    }

    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Failed to decode {}: {}", self.type_name, self.kind)
    }
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("Frame was too short.")]
    UnexpectedEnd,

    #[error("Frame of {len} byte(s) carries nothing to decode.")]
    EmptyFrame { len: usize },

    #[error("CRC16 checksum mismatch. Found {value:#06X}, expected {expected:#06X}.")]
    Checksum { value: u16, expected: u16 },

    #[error("Bad {field} length. Expected {expected} byte(s), found {found}.")]
    BadFieldLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Token {index} is not a hex byte.")]
    InvalidToken { index: usize },
}

/// A type that can be reconstructed (decoded) from a raw sequence of bytes.
///
/// The input slice is advanced by the number of bytes consumed. Multi-byte
/// integers on this bus are big-endian.
pub trait Decode {
    /// Attempts to decode `Self` from the beginning of the provided byte slice.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is malformed or insufficient
    /// to decode a complete value of this type.
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let (bytes, rest) = data
            .split_first_chunk::<N>()
            .ok_or_else(|| DecodeError::new::<Self>(DecodeErrorKind::UnexpectedEnd))?;
        *data = rest;
        Ok(*bytes)
    }
}

macro_rules! impl_decode_for_primitive {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
                    let (bytes, rest) = data
                        .split_first_chunk::<{ size_of::<$t>() }>()
                        .ok_or_else(|| DecodeError::new::<Self>(DecodeErrorKind::UnexpectedEnd))?;
                    *data = rest;
                    Ok(Self::from_be_bytes(*bytes))
                }
            }
        )*
    };
}

impl_decode_for_primitive!(u8, u16, u32);
