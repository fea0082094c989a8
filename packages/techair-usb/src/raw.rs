use alloc::vec::Vec;
use core::{fmt, ops::Deref};

/// Payload bytes kept verbatim, rendered as a `0xNN` dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawBytes(Vec<u8>);

impl RawBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<&[u8]> for RawBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Deref for RawBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RawBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "0x{byte:02X}")?;
        }
        Ok(())
    }
}
