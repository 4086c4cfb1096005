use crate::component::CoordinateComponent;
use crate::types::{CoordinateReading, ParseError, ParsedCoordinate};
use crate::validator;
use std::str::FromStr;
use tracing::debug;

pub fn parse(input: &str) -> Result<ParsedCoordinate, ParseError> {
    parse_detailed(input).map(|reading| reading.coordinate)
}

/// Parses `input` and keeps the per-axis components alongside the result.
pub fn parse_detailed(input: &str) -> Result<CoordinateReading, ParseError> {
    let numbers = validator::validated_tokens(input)?;
    let (latitude_numbers, longitude_numbers) = split_axes(&numbers);

    let latitude = CoordinateComponent::from_numbers(latitude_numbers);
    let longitude = CoordinateComponent::from_numbers(longitude_numbers);

    // Hemisphere letters flip the sign even when the number already carries one
    let south = contains_letter(input, 's');
    let west = contains_letter(input, 'w');

    let mut lat_value = latitude.to_decimal_degrees();
    if south {
        lat_value = -lat_value;
    }
    let mut lon_value = longitude.to_decimal_degrees();
    if west {
        lon_value = -lon_value;
    }

    debug!(input, lat_value, lon_value, south, west, "parsed coordinate");

    Ok(CoordinateReading {
        coordinate: ParsedCoordinate {
            latitude: lat_value,
            longitude: lon_value,
        },
        latitude,
        longitude,
        south,
        west,
    })
}

fn split_axes(numbers: &[f64]) -> (&[f64], &[f64]) {
    let per_axis = numbers.len() / 2;
    (
        &numbers[..per_axis],
        &numbers[numbers.len() - per_axis..],
    )
}

fn contains_letter(input: &str, letter: char) -> bool {
    input.chars().any(|c| c.eq_ignore_ascii_case(&letter))
}

impl FromStr for ParsedCoordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Format;
    use crate::validator::ValidationError;

    fn assert_pair(input: &str, lat: f64, lon: f64) {
        let parsed = parse(input).unwrap();
        assert!(
            (parsed.latitude - lat).abs() < 1e-6,
            "{}: latitude {} != {}",
            input,
            parsed.latitude,
            lat
        );
        assert!(
            (parsed.longitude - lon).abs() < 1e-6,
            "{}: longitude {} != {}",
            input,
            parsed.longitude,
            lon
        );
    }

    #[test]
    fn test_plain_decimal_is_exact() {
        assert_eq!(
            parse("59.33 18.06").unwrap(),
            ParsedCoordinate {
                latitude: 59.33,
                longitude: 18.06
            }
        );
        assert_eq!(
            parse("-89.99, -179.99").unwrap(),
            ParsedCoordinate {
                latitude: -89.99,
                longitude: -179.99
            }
        );
    }

    #[test]
    fn test_cardinal_letters() {
        assert_pair("59.3346 N, 18.0632 E", 59.3346, 18.0632);
        assert_pair("59.3346 S, 18.0632 W", -59.3346, -18.0632);
        assert_pair("s59.3346 e18.0632", -59.3346, 18.0632);
        assert_pair("59.3346, 18.0632w", 59.3346, -18.0632);
    }

    #[test]
    fn test_degrees_minutes_seconds() {
        assert_pair(
            "N 59° 20' 4.56\" E 18° 3' 47.52\"",
            59.0 + 20.0 / 60.0 + 4.56 / 3600.0,
            18.0 + 3.0 / 60.0 + 47.52 / 3600.0,
        );
        assert_pair(
            "59d 20.076 N 18d 3.792 E",
            59.0 + 20.076 / 60.0,
            18.0 + 3.792 / 60.0,
        );
    }

    #[test]
    fn test_packed_formats() {
        assert_pair("N591234E181234", 59.209444, 18.209444);
        assert_pair("5920.076N 01803.792E", 59.3346, 18.0632);
        assert_pair("213604560 65027520", 59.3346, 18.0632);
    }

    #[test]
    fn test_hemisphere_letter_overrides_explicit_sign() {
        // A minus sign and an S letter cancel out
        assert_pair("-33.8688 S, 151.2093 E", 33.8688, 151.2093);
        assert_pair("33.8688, -151.2093 W", 33.8688, 151.2093);
    }

    #[test]
    fn test_groups_split_in_half() {
        let reading = parse_detailed("59 20 4.56 18 3 47.52").unwrap();
        assert_eq!(reading.latitude.degrees(), 59.0);
        assert_eq!(reading.latitude.seconds(), 4.56);
        assert_eq!(reading.longitude.degrees(), 18.0);
        assert_eq!(reading.longitude.minutes(), 3.0);
    }

    #[test]
    fn test_detailed_reports_formats_and_letters() {
        let reading = parse_detailed("5920.076 S 181234 W").unwrap();
        assert_eq!(reading.latitude.format(), Format::PackedDegreesMinutes);
        assert_eq!(
            reading.longitude.format(),
            Format::PackedDegreesMinutesSeconds
        );
        assert!(reading.south);
        assert!(reading.west);
        assert!(reading.coordinate.latitude < 0.0);
        assert!(reading.coordinate.longitude < 0.0);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        assert_pair("95 200", 95.0, 200.0);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            parse("abc"),
            Err(ParseError::Invalid(ValidationError::InvalidCharacters))
        );
        assert_eq!(
            parse("59.1 18.2 5"),
            Err(ParseError::Invalid(ValidationError::UnevenNumberCount))
        );
        assert_eq!(
            parse("59S18S"),
            Err(ParseError::Invalid(ValidationError::InvalidOrientation))
        );
        assert_eq!(
            parse("1 2 3 4 5 6 7 8").unwrap_err().reason(),
            ValidationError::TooManyNumbers
        );
    }

    #[test]
    fn test_from_str_and_display() {
        let parsed: ParsedCoordinate = "59.3346 N 18.0632 E".parse().unwrap();
        assert_eq!(parsed.to_string(), "59.334600, 18.063200");
        assert!("hello".parse::<ParsedCoordinate>().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = parse("59 18 7").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid coordinate: Uneven count of latitude/longitude numbers"
        );
    }

    #[test]
    fn test_long_s_is_not_a_hemisphere_letter() {
        assert_eq!(
            parse("59\u{17f} 18\u{17f}").unwrap(),
            ParsedCoordinate {
                latitude: 59.0,
                longitude: 18.0
            }
        );
    }
}
