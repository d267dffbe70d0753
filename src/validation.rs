//! Input validation for the log forms.
//!
//! Predicates take the raw text the user typed. Numeric checks read the
//! leading number after any whitespace and ignore what follows, so
//! `"105 mg/dL"` reads as 105 and `"30.5"` as age 30. Input with no leading
//! digits is rejected, as is any value that is not finite.

use thiserror::Error;

use crate::config::MESSAGE_MAX_CHARS;

/// Exclusive bounds for a blood-sugar reading, mg/dL.
pub const BLOOD_SUGAR_MIN_EXCLUSIVE: f64 = 0.0;
pub const BLOOD_SUGAR_MAX_EXCLUSIVE: f64 = 1000.0;

/// Exclusive bounds for a body weight, in either unit.
pub const WEIGHT_MIN_EXCLUSIVE: f64 = 0.0;
pub const WEIGHT_MAX_EXCLUSIVE: f64 = 2000.0;

/// Inclusive age bounds, years.
pub const AGE_MIN: u8 = 18;
pub const AGE_MAX: u8 = 65;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a valid blood sugar value (above 0 and below 1000 mg/dL), got {0:?}")]
    InvalidBloodSugar(String),

    #[error("Please enter a valid weight value (above 0 and below 2000), got {0:?}")]
    InvalidWeight(String),

    #[error("Age must be between 18 and 65 years, got {0:?}")]
    InvalidAge(String),

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("Please enter at least one meal or snack")]
    NoMealEntered,

    #[error("Message is {len} characters, maximum is {max}")]
    MessageTooLong { len: usize, max: usize },

    #[error("Invalid value for {field}: {value}")]
    InvalidChoice { field: String, value: String },
}

fn is_digit_at(bytes: &[u8], i: usize) -> bool {
    bytes.get(i).is_some_and(u8::is_ascii_digit)
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while is_digit_at(bytes, i) {
        i += 1;
    }
    i
}

/// Longest numeric prefix of `raw` after leading whitespace.
///
/// Integer mode takes an optional sign and digits. Fractional mode also
/// takes a decimal part and an exponent; the exponent only counts when
/// digits follow it. `None` when the prefix holds no digits.
fn leading_number(raw: &str, fractional: bool) -> Option<&str> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut end = skip_digits(bytes, sign);
    let mut digits = end - sign;

    if fractional {
        if bytes.get(end) == Some(&b'.') {
            let fraction_end = skip_digits(bytes, end + 1);
            digits += fraction_end - (end + 1);
            if digits > 0 {
                end = fraction_end;
            }
        }
        if digits > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let exp_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
            let exp_digits = end + 1 + exp_sign;
            let exp_end = skip_digits(bytes, exp_digits);
            if exp_end > exp_digits {
                end = exp_end;
            }
        }
    }

    (digits > 0).then(|| &s[..end])
}

fn parse_finite(raw: &str) -> Option<f64> {
    leading_number(raw, true)?
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn in_open_range(n: f64, min: f64, max: f64) -> bool {
    n > min && n < max
}

pub fn is_valid_blood_sugar(raw: &str) -> bool {
    parse_blood_sugar(raw).is_ok()
}

pub fn is_valid_weight(raw: &str) -> bool {
    parse_weight(raw).is_ok()
}

pub fn is_valid_age(raw: &str) -> bool {
    parse_age(raw).is_ok()
}

/// Parse a blood-sugar reading in (0, 1000) mg/dL.
pub fn parse_blood_sugar(raw: &str) -> Result<f64, ValidationError> {
    parse_finite(raw)
        .filter(|&n| in_open_range(n, BLOOD_SUGAR_MIN_EXCLUSIVE, BLOOD_SUGAR_MAX_EXCLUSIVE))
        .ok_or_else(|| ValidationError::InvalidBloodSugar(raw.into()))
}

/// Parse a weight in (0, 2000).
pub fn parse_weight(raw: &str) -> Result<f64, ValidationError> {
    parse_finite(raw)
        .filter(|&n| in_open_range(n, WEIGHT_MIN_EXCLUSIVE, WEIGHT_MAX_EXCLUSIVE))
        .ok_or_else(|| ValidationError::InvalidWeight(raw.into()))
}

/// Parse an age in [18, 65]. A fractional part is dropped.
pub fn parse_age(raw: &str) -> Result<u8, ValidationError> {
    leading_number(raw, false)
        .and_then(|digits| digits.parse::<i64>().ok())
        .filter(|n| (i64::from(AGE_MIN)..=i64::from(AGE_MAX)).contains(n))
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| ValidationError::InvalidAge(raw.into()))
}

/// Trimmed text, or `Required` if nothing but whitespace was entered.
pub fn require_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(trimmed.to_string())
}

/// Message bodies are capped at `MESSAGE_MAX_CHARS` characters.
pub fn check_message_length(body: &str) -> Result<(), ValidationError> {
    let len = body.chars().count();
    if len > MESSAGE_MAX_CHARS {
        return Err(ValidationError::MessageTooLong {
            len,
            max: MESSAGE_MAX_CHARS,
        });
    }
    Ok(())
}
