//! Readable formatting of big decimal values in diagnostics.
//!
//! Model values and type bounds routinely reach 2^256; raw digit strings
//! are unreadable. Values that are a power of two (or one off) print in
//! exponent form, everything else gets decimal group separators.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Threshold below which plain decimal is used (no exponent form).
const EXPONENT_THRESHOLD_BITS: u64 = 16;

/// Format a big integer for humans.
pub fn format_number_readable(value: &BigInt) -> String {
    let abs = value.abs();
    let sign = if value.is_negative() { "-" } else { "" };

    if abs.bits() > EXPONENT_THRESHOLD_BITS {
        if let Some(text) = power_of_two_form(&abs) {
            return format!("{sign}{text}");
        }
    }
    format!("{sign}{}", group_digits(&abs.to_string()))
}

/// Reformat a model value string if it parses as a big integer; leave
/// anything else untouched.
pub fn humanize_model_value(value: &str) -> String {
    match value.trim().parse::<BigInt>() {
        Ok(number) => format_number_readable(&number),
        Err(_) => value.to_string(),
    }
}

/// Parse a string produced by [`format_number_readable`] back into a big
/// integer. Accepts exponent forms, group separators and plain decimals.
pub fn parse_readable(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let magnitude = if let Some(rest) = text.strip_prefix("2**") {
        if let Some((exp, offset)) = rest.split_once(" - ") {
            let exp: u32 = exp.trim().parse().ok()?;
            let offset: BigInt = offset.trim().parse().ok()?;
            (BigInt::from(1) << exp) - offset
        } else if let Some((exp, offset)) = rest.split_once(" + ") {
            let exp: u32 = exp.trim().parse().ok()?;
            let offset: BigInt = offset.trim().parse().ok()?;
            (BigInt::from(1) << exp) + offset
        } else {
            let exp: u32 = rest.trim().parse().ok()?;
            BigInt::from(1) << exp
        }
    } else {
        let digits: String = text.chars().filter(|c| *c != ',').collect();
        digits.parse().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// `2**n`, `2**n - 1` or `2**n + 1` when the magnitude is that close to a
/// power of two.
fn power_of_two_form(abs: &BigInt) -> Option<String> {
    if is_power_of_two(abs) {
        return Some(format!("2**{}", abs.bits() - 1));
    }
    let plus_one = abs + BigInt::one();
    if is_power_of_two(&plus_one) {
        return Some(format!("2**{} - 1", plus_one.bits() - 1));
    }
    let minus_one = abs - BigInt::one();
    if is_power_of_two(&minus_one) {
        return Some(format!("2**{} + 1", minus_one.bits() - 1));
    }
    None
}

fn is_power_of_two(value: &BigInt) -> bool {
    if value.is_zero() || value.is_negative() {
        return false;
    }
    (value & &(value - BigInt::one())).is_zero()
}

/// Insert a comma every three digits, from the right.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
