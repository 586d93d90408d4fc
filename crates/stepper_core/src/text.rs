//! Text utilities for the stepper's numeric field.
//!
//! The stepper stores its value as the text shown in the field, so every
//! conversion between numbers and text goes through this module. Byte
//! offsets handed in by hosts are clamped to UTF-8 character boundaries
//! before any slicing happens.

/// Upper bound on fractional digits in the canonical text form. Values that
/// need more are stored by the stepper in their exact form.
const MAX_FRACTION_DIGITS: usize = 10;

/// Significant digits kept when rendering a value; anything past this is
/// floating-point noise from repeated step arithmetic.
const SIGNIFICANT_DIGITS: usize = 15;

/// Snap a byte offset to a UTF-8 character boundary of `s`.
///
/// Offsets past the end snap to `s.len()`. Offsets inside a multi-byte
/// character snap back to the first byte of that character. Hosts hand in
/// offsets from their own text model, so nothing here trusts them.
///
/// # Examples
///
/// ```
/// use stepper_core::clamp_to_char_boundary;
///
/// let s = "5\u{2009}0"; // thin space, 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 3), 1);
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 9), 5);
/// ```
pub fn clamp_to_char_boundary(s: &str, offset: usize) -> usize {
    (0..=offset.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

/// Offset of the character before `offset`, or 0 at the start.
pub fn prev_cursor_boundary(s: &str, offset: usize) -> usize {
    let offset = clamp_to_char_boundary(s, offset);
    s[..offset].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Offset just past the character at `offset`, or `s.len()` at the end.
pub fn next_cursor_boundary(s: &str, offset: usize) -> usize {
    let offset = clamp_to_char_boundary(s, offset);
    s[offset..]
        .chars()
        .next()
        .map_or(s.len(), |c| offset + c.len_utf8())
}

/// Returns `true` if `s` is made of decimal digits once at most one leading
/// `-` and at most one `.` are removed.
///
/// This is the character-set rule applied to text while it is being typed;
/// it does not require any digits to be present, so `""`, `"-"` and `"."`
/// all pass.
///
/// # Examples
///
/// ```
/// use stepper_core::has_numeric_shape;
///
/// assert!(has_numeric_shape("-12.5"));
/// assert!(has_numeric_shape("-"));
/// assert!(!has_numeric_shape("1.2.3"));
/// assert!(!has_numeric_shape("--1"));
/// assert!(!has_numeric_shape("1e5"));
/// ```
pub fn has_numeric_shape(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let mut seen_dot = false;
    unsigned.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

/// Parse the field text as a finite number.
///
/// Only plain decimal notation is accepted: an optional leading `-`, digits,
/// and at most one `.`, with at least one digit. Exponents, `inf`, `NaN`,
/// whitespace and a leading `+` are all rejected, as is any text whose value
/// overflows to infinity.
///
/// # Examples
///
/// ```
/// use stepper_core::parse_number;
///
/// assert_eq!(parse_number("190"), Some(190.0));
/// assert_eq!(parse_number("-.5"), Some(-0.5));
/// assert_eq!(parse_number("5."), Some(5.0));
/// assert_eq!(parse_number("-"), None);
/// assert_eq!(parse_number("1e3"), None);
/// ```
pub fn parse_number(s: &str) -> Option<f64> {
    if !has_numeric_shape(s) || !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a value in the canonical text form stored by the stepper.
///
/// Trailing zeros are dropped, negative zero renders as `0`, and digits past
/// the precision an `f64` can carry are rounded away so that step arithmetic
/// like `0.1 + 0.2` renders as `0.3`. Exponent notation is never produced.
///
/// # Examples
///
/// ```
/// use stepper_core::format_value;
///
/// assert_eq!(format_value(200.0), "200");
/// assert_eq!(format_value(0.1 + 0.2), "0.3");
/// assert_eq!(format_value(-0.0), "0");
/// assert_eq!(format_value(-2.5), "-2.5");
/// ```
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let int_digits = if magnitude < 1.0 {
        1
    } else {
        magnitude.log10().floor() as usize + 1
    };
    let fraction = SIGNIFICANT_DIGITS
        .saturating_sub(int_digits)
        .min(MAX_FRACTION_DIGITS);

    let mut out = format!("{value:.fraction$}");
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out.remove(0);
    }
    out
}

/// Render a value as the shortest text that parses back to exactly `value`.
///
/// Used for bounds: a value clamped to a limit must compare equal to that
/// limit on the next check, so no digits may be rounded away.
///
/// # Examples
///
/// ```
/// use stepper_core::{format_exact, parse_number};
///
/// let max = 123.456_789_012_345_67;
/// assert_eq!(parse_number(&format_exact(max)), Some(max));
/// assert_eq!(format_exact(-0.0), "0");
/// ```
pub fn format_exact(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
