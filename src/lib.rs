//! Parser for free-form geographic coordinate strings.
//!
//! Accepts decimal degrees, degrees/minutes, degrees/minutes/seconds and
//! packed numeric encodings, with or without hemisphere letters, and returns
//! latitude and longitude in decimal degrees.
//!
//! ```
//! let parsed = coordparse::parse("59.3346 S, 18.0632 W").unwrap();
//! assert_eq!(parsed.latitude, -59.3346);
//! assert_eq!(parsed.longitude, -18.0632);
//! ```

pub mod component;
pub mod coordinate_parser;
pub mod types;
pub mod validator;

pub use component::{CoordinateComponent, Format};
pub use coordinate_parser::{parse, parse_detailed};
pub use types::{CoordinateReading, ParseError, ParsedCoordinate};
pub use validator::{ValidationError, is_valid, validate};
