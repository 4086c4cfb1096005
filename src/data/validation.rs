use coordparse::ParsedCoordinate;

fn ensure_within(value: f64, min: f64, max: f64, label: &str) -> Result<f64, String> {
    if value < min || value > max {
        Err(format!(
            "{} must be between {} and {} degrees, got {}",
            label, min, max, value
        ))
    } else {
        Ok(value)
    }
}

pub fn validate_latitude(value: f64) -> Result<f64, String> {
    ensure_within(value, -90.0, 90.0, "Latitude")
}

pub fn validate_longitude(value: f64) -> Result<f64, String> {
    ensure_within(value, -180.0, 180.0, "Longitude")
}

/// Range check used by `--strict`; the parser itself passes any value through.
pub fn validate_bounds(coordinate: &ParsedCoordinate) -> Result<(), String> {
    validate_latitude(coordinate.latitude)?;
    validate_longitude(coordinate.longitude)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_bounds() {
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.5).is_err());
    }

    #[test]
    fn test_longitude_bounds() {
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.0).is_ok());
        assert_eq!(
            validate_longitude(-181.0).unwrap_err(),
            "Longitude must be between -180 and 180 degrees, got -181"
        );
    }

    #[test]
    fn test_bounds_checks_latitude_first() {
        let coordinate = ParsedCoordinate {
            latitude: 91.5,
            longitude: 200.0,
        };
        assert!(validate_bounds(&coordinate).unwrap_err().starts_with("Latitude"));
    }
}
