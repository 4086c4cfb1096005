//! Structural validation of raw coordinate strings.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Most numbers a coordinate string may carry (three per axis).
pub const MAX_NUMBERS: usize = 6;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid"));

// ASCII letters only, no Unicode case folding
static ORIENTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^nNsSeEwW]*[nNsS]?[^nNsSeEwW]*[eEwW]?[^nNsSeEwW]*$")
        .expect("orientation pattern is valid")
});

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Coordinate contains invalid alphanumeric characters")]
    InvalidCharacters,
    #[error("Invalid cardinal direction")]
    InvalidOrientation,
    #[error("Could not find any coordinate number")]
    NoNumbers,
    #[error("Uneven count of latitude/longitude numbers")]
    UnevenNumberCount,
    #[error("Too many coordinate numbers")]
    TooManyNumbers,
}

/// Checks `raw` without interpreting its numbers. The first violated rule wins.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    validated_tokens(raw).map(|_| ())
}

pub fn is_valid(raw: &str) -> bool {
    validate(raw).is_ok()
}

/// Signed numbers in `raw`, in source order.
pub fn numeric_tokens(raw: &str) -> Vec<f64> {
    NUMBER
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

pub(crate) fn validated_tokens(raw: &str) -> Result<Vec<f64>, ValidationError> {
    check_letters(raw)?;
    check_orientation(raw)?;
    let tokens = numeric_tokens(raw);
    check_token_count(tokens.len())?;
    Ok(tokens)
}

fn check_letters(raw: &str) -> Result<(), ValidationError> {
    let invalid = raw.chars().any(|c| {
        c.is_ascii_alphabetic() && !matches!(c.to_ascii_lowercase(), 'n' | 'e' | 's' | 'w' | 'd')
    });
    if invalid {
        Err(ValidationError::InvalidCharacters)
    } else {
        Ok(())
    }
}

fn check_orientation(raw: &str) -> Result<(), ValidationError> {
    if ORIENTATION.is_match(raw) {
        Ok(())
    } else {
        Err(ValidationError::InvalidOrientation)
    }
}

fn check_token_count(count: usize) -> Result<(), ValidationError> {
    match count {
        0 => Err(ValidationError::NoNumbers),
        n if n % 2 != 0 => Err(ValidationError::UnevenNumberCount),
        n if n > MAX_NUMBERS => Err(ValidationError::TooManyNumbers),
        _ => Ok(()),
    }
}
