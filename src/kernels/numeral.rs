//! This module contains the pure, stateless kernels for parsing and
//! serializing base-10 numerals in fixed-width fields.
//!
//! Parsing accepts the two sign conventions found in legacy feeds: a leading
//! `+`/`-`, or a trailing zone-sign byte where `A`-`I` and `{` mark the value
//! positive and `J`-`R` and `}` mark it negative while the preceding digits
//! carry the whole magnitude. Serialization is the exact inverse, so every
//! emitted field parses back to the same value. All kernels are panic-free;
//! errors are returned as plain reasons and the engines attach row/field
//! context.

use num_traits::{PrimInt, Unsigned};

use crate::config::SignStyle;

//==================================================================================
// 1. Digit-Capacity Helper
//==================================================================================

/// The largest value representable with `digits` base-10 digit positions,
/// saturating at `T::max_value()` for capacities beyond the type's range.
pub(crate) fn max_for_digits<T: PrimInt + Unsigned>(digits: usize) -> T {
    let (ten, nine) = match (T::from(10u8), T::from(9u8)) {
        (Some(ten), Some(nine)) => (ten, nine),
        _ => return T::max_value(),
    };
    let mut value = T::zero();
    for _ in 0..digits {
        value = match value.checked_mul(&ten).and_then(|v| v.checked_add(&nine)) {
            Some(v) => v,
            None => return T::max_value(),
        };
    }
    value
}

//==================================================================================
// 2. Parsing Kernels
//==================================================================================

/// The sign carried by a trailing zone character, if `c` is one.
fn zone_sign(c: char) -> Option<bool> {
    match c {
        'A'..='I' | '{' => Some(false),
        'J'..='R' | '}' => Some(true),
        _ => None,
    }
}

/// Parses an unsigned field span. No sign character is permitted.
pub(crate) fn parse_unsigned(text: &str, blanks_as_zero: bool) -> Result<u64, String> {
    let digits = if blanks_as_zero {
        let trimmed = text.trim_matches(' ');
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
    } else {
        text
    };

    if digits.is_empty() {
        return Err("empty field".to_string());
    }
    if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(format!("invalid character {:?} in unsigned numeral", c));
    }
    digits
        .parse::<u64>()
        .map_err(|_| format!("value {:?} does not fit in 64 bits", digits))
}

/// Parses a signed field span: optional leading `+`/`-`, or a trailing
/// zone-sign byte, around a run of digits.
pub(crate) fn parse_signed(text: &str, blanks_as_zero: bool) -> Result<i64, String> {
    let body = if blanks_as_zero {
        let trimmed = text.trim_matches(' ');
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed
    } else {
        text
    };

    let mut chars: Vec<char> = body.chars().collect();
    let first = chars.first().copied();
    let last = chars.last().copied();
    let negative = if let Some(negative) = last.and_then(zone_sign) {
        chars.pop();
        negative
    } else if first == Some('-') {
        chars.remove(0);
        true
    } else if first == Some('+') {
        chars.remove(0);
        false
    } else {
        false
    };

    if chars.is_empty() {
        return Err("missing digits in signed numeral".to_string());
    }
    if let Some(c) = chars.iter().find(|c| !c.is_ascii_digit()) {
        return Err(format!("invalid character {:?} in signed numeral", c));
    }

    let digits: String = chars.into_iter().collect();
    let magnitude = digits
        .parse::<u64>()
        .map_err(|_| format!("value {:?} does not fit in 64 bits", digits))?;
    let signed = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };
    i64::try_from(signed).map_err(|_| format!("value {} does not fit in 64 bits", signed))
}

//==================================================================================
// 3. Serialization Kernels
//==================================================================================

/// Serializes an unsigned value as zero-padded digits of exactly `width`
/// characters.
pub(crate) fn format_unsigned(value: u64, width: usize) -> Result<String, String> {
    let digits = value.to_string();
    if digits.len() > width {
        return Err(format!("value {} does not fit in {} byte(s)", value, width));
    }
    Ok(format!("{:0>width$}", digits))
}

/// Serializes a signed value into exactly `width` characters under the given
/// sign convention. Both conventions parse back losslessly.
pub(crate) fn format_signed(value: i64, width: usize, style: SignStyle) -> Result<String, String> {
    let magnitude = value.unsigned_abs().to_string();
    match style {
        SignStyle::Leading => {
            if value < 0 {
                if magnitude.len() >= width {
                    return Err(format!("value {} does not fit in {} byte(s)", value, width));
                }
                Ok(format!("-{:0>w$}", magnitude, w = width - 1))
            } else {
                if magnitude.len() > width {
                    return Err(format!("value {} does not fit in {} byte(s)", value, width));
                }
                Ok(format!("{:0>width$}", magnitude))
            }
        }
        SignStyle::TrailingZone => {
            if width < 2 || magnitude.len() > width - 1 {
                return Err(format!(
                    "value {} does not fit in {} byte(s) with a trailing zone sign",
                    value, width
                ));
            }
            let zone = if value < 0 { 'J' } else { 'A' };
            Ok(format!("{:0>w$}{}", magnitude, zone, w = width - 1))
        }
    }
}
