//! Fixed-point conversions used by the controller firmware.
//!
//! Two incompatible 16-bit encodings are in use. Version numbers, voltages and
//! similar scalars are unsigned with three implied decimal digits. Sensor axes
//! carry an explicit sign bit and a binary fraction, and are then scaled to
//! physical units by empirically determined calibration constants.

/// Accelerometer calibration factor applied to a decoded axis.
pub const ACCEL_SCALE: f64 = 9984.0 / 625.0;

/// Gyroscope calibration factor applied to a decoded axis.
pub const GYRO_SCALE: f64 = 2279.513043;

/// Unsigned decimal fixed point with three implied digits: `raw / 1000`.
pub fn decimal(raw: u16) -> f64 {
    raw as f64 / 1000.0
}

/// Sign-magnitude binary fixed point in the range (-1.0, 1.0).
///
/// Bit 15 is the sign. Negative magnitudes are stored inverted, so the low
/// fifteen bits are XORed with `0x7FFF` before scaling.
pub fn sign_magnitude(raw: u16) -> f64 {
    if raw & 0x8000 != 0 {
        -(((raw & 0x7FFF) ^ 0x7FFF) as f64) / 32768.0
    } else {
        raw as f64 / 32768.0
    }
}

/// Binary fixed point with no sign handling: `raw / 32768`.
pub fn unsigned(raw: u16) -> f64 {
    raw as f64 / 32768.0
}

/// Which binary fixed-point reading to apply to sensor axes.
///
/// Captures have been interpreted both ways and it is not known which one a
/// given firmware revision uses, so the choice is left to the caller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AxisDecoding {
    /// [`sign_magnitude`]
    #[default]
    SignMagnitude,
    /// [`unsigned`]
    Unsigned,
}

impl AxisDecoding {
    /// Decodes one raw axis word to the unitless range before calibration.
    pub fn decode(self, raw: u16) -> f64 {
        match self {
            AxisDecoding::SignMagnitude => sign_magnitude(raw),
            AxisDecoding::Unsigned => unsigned(raw),
        }
    }

    pub fn accel(self, raw: u16) -> f64 {
        self.decode(raw) * ACCEL_SCALE
    }

    pub fn gyro(self, raw: u16) -> f64 {
        self.decode(raw) * GYRO_SCALE
    }
}
