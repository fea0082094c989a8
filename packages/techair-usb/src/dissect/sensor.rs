//! [`Module::Sensor`](crate::Module::Sensor) payloads.
//!
//! Accelerometer and gyroscope replies carry three big-endian axis words
//! (X, Y, Z) read with the configured [`AxisDecoding`]. Revision replies carry
//! a software and a hardware revision as decimal fixed point.

use core::fmt;

use crate::{RawBytes, cmds::SensorCmd, fixed::{self, AxisDecoding}};

#[derive(Debug, Clone, PartialEq)]
pub enum SensorReading {
    EnableMask {
        command: SensorCmd,
        mask: u8,
    },
    Axes {
        command: SensorCmd,
        x: f64,
        y: f64,
        z: f64,
        raw: RawBytes,
    },
    Revision {
        command: SensorCmd,
        software: f64,
        hardware: f64,
    },
    /// Unknown command, or a reply too short for its layout.
    Raw {
        command: SensorCmd,
        raw: RawBytes,
    },
}

fn label(command: SensorCmd) -> &'static str {
    use SensorCmd as C;

    match command {
        C::EnableSensorReading => "ENABLE_SENSOR_READING",
        C::GetSensorReadingEnables => "GET_SENSOR_READING_ENABLES",
        C::GetRightHandAccel => "Right hand accelerometer",
        C::GetLeftHandAccel => "Left hand accelerometer",
        C::GetRightFootAccel => "Right foot accelerometer",
        C::GetLeftFootAccel => "Left foot accelerometer",
        C::GetBodyAccel => "Body accelerometer",
        C::GetGyroscope => "Gyroscope",
        C::GetSwvRh => "(RH)",
        C::GetSwvLh => "(LH)",
        C::GetSwvRf => "(RF)",
        C::GetSwvLf => "(LF)",
        C::Unknown(_) => "sensor?",
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnableMask { command, mask } => {
                write!(f, "{} (mask): '0x{mask:02X}'.", label(*command))
            }
            Self::Axes { command, x, y, z, raw } => write!(
                f,
                "{} (X={x:.3}, Y={y:.3}, Z={z:.3}) : {raw}",
                label(*command)
            ),
            Self::Revision {
                command,
                software,
                hardware,
            } => write!(
                f,
                "{} - (sw,hw) rev=({software:.3}, {hardware:.3})",
                label(*command)
            ),
            Self::Raw { command, raw } => write!(f, "{}: '{raw}'.", label(*command)),
        }
    }
}

/// Interprets a non-empty sensor payload.
pub(super) fn dissect(command: SensorCmd, payload: &[u8], axis: AxisDecoding) -> SensorReading {
    use SensorCmd as C;

    let raw = || RawBytes::from(payload);

    match (command, payload) {
        (C::EnableSensorReading | C::GetSensorReadingEnables, [mask, ..]) => {
            SensorReading::EnableMask {
                command,
                mask: *mask,
            }
        }
        (
            C::GetRightHandAccel
            | C::GetLeftHandAccel
            | C::GetRightFootAccel
            | C::GetLeftFootAccel
            | C::GetBodyAccel
            | C::GetGyroscope,
            [x0, x1, y0, y1, z0, z1, ..],
        ) => {
            let scale = match command {
                C::GetGyroscope => fixed::GYRO_SCALE,
                _ => fixed::ACCEL_SCALE,
            };
            let word = |hi: &u8, lo: &u8| axis.decode(u16::from_be_bytes([*hi, *lo])) * scale;

            SensorReading::Axes {
                command,
                x: word(x0, x1),
                y: word(y0, y1),
                z: word(z0, z1),
                raw: raw(),
            }
        }
        (C::GetSwvRh | C::GetSwvLh | C::GetSwvRf | C::GetSwvLf, [s0, s1, h0, h1, ..]) => {
            SensorReading::Revision {
                command,
                software: 10.0 * fixed::decimal(u16::from_be_bytes([*s0, *s1])),
                hardware: 10.0 * fixed::decimal(u16::from_be_bytes([*h0, *h1])),
            }
        }
        // known commands whose payload is shorter than their layout
        (
            C::EnableSensorReading
            | C::GetSensorReadingEnables
            | C::GetRightHandAccel
            | C::GetLeftHandAccel
            | C::GetRightFootAccel
            | C::GetLeftFootAccel
            | C::GetBodyAccel
            | C::GetGyroscope
            | C::GetSwvRh
            | C::GetSwvLh
            | C::GetSwvRf
            | C::GetSwvLf,
            _,
        ) => SensorReading::Raw {
            command,
            raw: raw(),
        },
        (C::Unknown(_), _) => SensorReading::Raw {
            command,
            raw: raw(),
        },
    }
}
