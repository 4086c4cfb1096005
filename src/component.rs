//! Per-axis format detection and decimal conversion.
//!
//! An axis arrives as one to three numbers. Separate numbers are read as
//! degrees, minutes and seconds at face value. A single number may instead be
//! a packed encoding, recognised by its magnitude:
//!
//! | degrees      | reading                          |
//! |--------------|----------------------------------|
//! | `> 909090`   | milliseconds of arc              |
//! | `> 9090`     | `DDMMSS` (fractional seconds dropped) |
//! | `> 360`      | `DDMM.mmm`                       |
//! | otherwise    | decimal degrees                  |

use std::fmt;
use tracing::debug;

const MILLISECONDS_THRESHOLD: f64 = 909_090.0;
const DMS_THRESHOLD: f64 = 9_090.0;
const DM_THRESHOLD: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Plain,
    PackedDegreesMinutes,
    PackedDegreesMinutesSeconds,
    PackedMilliseconds,
}

impl Format {
    /// Picks the reading for an axis. Packed readings are only considered
    /// when minutes and seconds are both zero.
    pub fn classify(degrees: f64, minutes: f64, seconds: f64) -> Self {
        if minutes != 0.0 || seconds != 0.0 {
            return Format::Plain;
        }

        if degrees > MILLISECONDS_THRESHOLD {
            Format::PackedMilliseconds
        } else if degrees > DMS_THRESHOLD {
            Format::PackedDegreesMinutesSeconds
        } else if degrees > DM_THRESHOLD {
            Format::PackedDegreesMinutes
        } else {
            Format::Plain
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Format::Plain => "plain",
            Format::PackedDegreesMinutes => "dm",
            Format::PackedDegreesMinutesSeconds => "dms",
            Format::PackedMilliseconds => "ms",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// One axis (latitude or longitude) after format detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateComponent {
    sign: f64,
    degrees: f64,
    minutes: f64,
    seconds: f64,
    milliseconds: f64,
    format: Format,
}

impl CoordinateComponent {
    /// Builds a component from the numbers of one axis. Only the first four
    /// numbers are used; missing slots are zero. The sign comes from the
    /// first number.
    pub fn from_numbers(numbers: &[f64]) -> Self {
        let mut slots = [0.0_f64; 4];
        for (slot, value) in slots.iter_mut().zip(numbers) {
            *slot = *value;
        }

        let sign = if slots[0] >= 0.0 { 1.0 } else { -1.0 };
        let [degrees, minutes, seconds, milliseconds] = slots.map(f64::abs);
        let format = Format::classify(degrees, minutes, seconds);

        let component = Self {
            sign,
            degrees,
            minutes,
            seconds,
            milliseconds,
            format,
        }
        .unpack();

        debug!(
            ?numbers,
            format = %component.format,
            degrees = component.degrees,
            minutes = component.minutes,
            seconds = component.seconds,
            milliseconds = component.milliseconds,
            "classified axis"
        );

        component
    }

    fn unpack(mut self) -> Self {
        match self.format {
            Format::Plain => {}
            Format::PackedMilliseconds => {
                self.milliseconds = self.degrees;
                self.degrees = 0.0;
            }
            Format::PackedDegreesMinutesSeconds => {
                let packed = self.degrees;
                let degrees = (packed / 10_000.0).floor();
                let minutes = ((packed - degrees * 10_000.0) / 100.0).floor();
                self.seconds = (packed - degrees * 10_000.0 - minutes * 100.0).floor();
                self.minutes = minutes;
                self.degrees = degrees;
            }
            Format::PackedDegreesMinutes => {
                let packed = self.degrees;
                let degrees = (packed / 100.0).floor();
                self.minutes = packed - degrees * 100.0;
                self.degrees = degrees;
            }
        }
        self
    }

    pub fn to_decimal_degrees(&self) -> f64 {
        self.sign
            * (self.degrees
                + self.minutes / 60.0
                + self.seconds / 3_600.0
                + self.milliseconds / 3_600_000.0)
    }

    pub fn is_negative(&self) -> bool {
        self.sign < 0.0
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn milliseconds(&self) -> f64 {
        self.milliseconds
    }

    pub fn format(&self) -> Format {
        self.format
    }
}
