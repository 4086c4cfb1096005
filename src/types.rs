use crate::component::CoordinateComponent;
use crate::validator::ValidationError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid coordinate: {0}")]
    Invalid(#[from] ValidationError),
}

impl ParseError {
    pub fn reason(&self) -> ValidationError {
        match self {
            ParseError::Invalid(reason) => *reason,
        }
    }
}

/// Latitude and longitude in decimal degrees. Values are not range checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A parsed coordinate along with the per-axis readings that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateReading {
    pub coordinate: ParsedCoordinate,
    pub latitude: CoordinateComponent,
    pub longitude: CoordinateComponent,
    pub south: bool,
    pub west: bool,
}

impl fmt::Display for ParsedCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
