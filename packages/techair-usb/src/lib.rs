//! Implementation of the Tech-Air controller USB protocol in Rust.
//!
//! Every frame on the wire is laid out as `[module, command, payload.., crc_lo, crc_hi]`.
//! This crate turns captured frames back into something a human can read:
//!
//! - [`tokenize`] turns a line of hex tokens into frame bytes.
//! - [`Frame`] validates the trailing [CRC16/MODBUS](TECHAIR_CRC16) checksum.
//! - [`Dissector`] dispatches on the module and command tags and interprets the
//!   payload, producing a [`Dissection`] that renders through [`Display`](core::fmt::Display).
//!
//! Requests can be built with [`RequestFrame`], which implements [`Encode`].

#![no_std]

extern crate alloc;

pub mod cmds;
pub mod dissect;
pub mod fixed;
pub mod tokenize;

mod crc;
mod decode;
mod encode;
mod frame;
mod raw;

pub use cmds::{Command, Module};
pub use crc::{TECHAIR_CRC16, crc16};
pub use decode::{Decode, DecodeError, DecodeErrorKind};
pub use dissect::{DissectOptions, Dissection, Dissector, Reading, dissect};
pub use encode::Encode;
pub use frame::{Checksum, Frame, RequestFrame};
pub use raw::RawBytes;
