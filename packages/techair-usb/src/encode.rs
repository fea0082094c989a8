//! Request payload encoding.
//!
//! The controller stores its multi-byte fields (versions, voltages, counters,
//! page counts) most significant byte first, so integers encode big-endian.
//! The frame checksum is the one field sent low byte first; [`RequestFrame`]
//! appends it separately.
//!
//! [`RequestFrame`]: crate::RequestFrame

use alloc::{vec, vec::Vec};

/// A type that can be encoded into a sequence of bytes.
pub trait Encode {
    /// Returns the number of bytes this value will take when encoded.
    fn size(&self) -> usize;

    /// Encodes this instance into the provided byte slice.
    fn encode(&self, data: &mut [u8]);

    /// Encodes this instance into a freshly allocated buffer.
    fn to_vec(&self) -> Vec<u8> {
        let mut data = vec![0; self.size()];
        self.encode(&mut data);
        data
    }
}

macro_rules! impl_encode_for_primitive {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn size(&self) -> usize {
                    size_of::<Self>()
                }

                fn encode(&self, data: &mut [u8]) {
                    data[..size_of::<Self>()].copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_encode_for_primitive!(u8, u16, u32);

impl Encode for () {
    fn size(&self) -> usize {
        0
    }
    fn encode(&self, _data: &mut [u8]) {}
}

impl Encode for &[u8] {
    fn size(&self) -> usize {
        self.len()
    }

    fn encode(&self, data: &mut [u8]) {
        data[..self.len()].copy_from_slice(self);
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn size(&self) -> usize {
        N
    }

    fn encode(&self, data: &mut [u8]) {
        data[..N].copy_from_slice(self);
    }
}
