//! CSS value matching.
//!
//! Browsers report computed colours as `rgba(...)` no matter how the
//! stylesheet spelled them, so expected values written as hex are
//! converted before they are searched for.

use crate::result::{LayoutError, LayoutResult};
use std::borrow::Cow;

/// Convert `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` to the
/// `rgba(r, g, b, a)` form a browser reports for computed colours.
pub fn hex_to_rgba(value: &str) -> LayoutResult<String> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| LayoutError::invalid_color(value, "missing leading '#'"))?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LayoutError::invalid_color(value, "non-hex digit"));
    }

    let bytes = hex.as_bytes();
    let (r, g, b, a) = match bytes.len() {
        3 => (nibble(bytes[0]), nibble(bytes[1]), nibble(bytes[2]), 0xFF),
        4 => (
            nibble(bytes[0]),
            nibble(bytes[1]),
            nibble(bytes[2]),
            nibble(bytes[3]),
        ),
        6 => (pair(bytes, 0), pair(bytes, 2), pair(bytes, 4), 0xFF),
        8 => (pair(bytes, 0), pair(bytes, 2), pair(bytes, 4), pair(bytes, 6)),
        _ => {
            return Err(LayoutError::invalid_color(
                value,
                "expected 3, 4, 6 or 8 hex digits",
            ))
        }
    };
    Ok(format!("rgba({r}, {g}, {b}, {})", alpha(a)))
}

/// The text to search the computed value for: hex colours converted,
/// everything else unchanged.
pub fn expected_text(value: &str) -> LayoutResult<Cow<'_, str>> {
    if value.starts_with('#') {
        hex_to_rgba(value).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(value))
    }
}

/// Case-sensitive substring match of an expected value in a computed one
#[must_use]
pub fn text_is_found(expected: &str, actual: &str) -> bool {
    actual.contains(expected)
}

/// Alpha as browsers print it: `1`, `0`, or a short fraction
fn alpha(a: u8) -> String {
    match a {
        0xFF => "1".to_string(),
        0 => "0".to_string(),
        _ => {
            let text = format!("{:.2}", f64::from(a) / 255.0);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

/// `f` -> 0xFF
fn nibble(ch: u8) -> u8 {
    let n = hex_value(ch);
    (n << 4) | n
}

fn pair(bytes: &[u8], at: usize) -> u8 {
    (hex_value(bytes[at]) << 4) | hex_value(bytes[at + 1])
}

/// Callers have already checked the digit
fn hex_value(ch: u8) -> u8 {
    match ch {
        b'0'..=b'9' => ch - b'0',
        b'a'..=b'f' => ch - b'a' + 10,
        b'A'..=b'F' => ch - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod hex {
        use super::*;

        #[test]
        fn test_six_digits() {
            assert_eq!(hex_to_rgba("#ff0000").unwrap(), "rgba(255, 0, 0, 1)");
            assert_eq!(hex_to_rgba("#1A2b3C").unwrap(), "rgba(26, 43, 60, 1)");
        }

        #[test]
        fn test_three_digits_expand() {
            assert_eq!(hex_to_rgba("#fff").unwrap(), "rgba(255, 255, 255, 1)");
            assert_eq!(hex_to_rgba("#0a0").unwrap(), "rgba(0, 170, 0, 1)");
        }

        #[test]
        fn test_alpha_digits() {
            assert_eq!(hex_to_rgba("#00000080").unwrap(), "rgba(0, 0, 0, 0.5)");
            assert_eq!(hex_to_rgba("#0000").unwrap(), "rgba(0, 0, 0, 0)");
        }

        #[test]
        fn test_malformed() {
            assert!(matches!(
                hex_to_rgba("#12"),
                Err(LayoutError::InvalidColor { .. })
            ));
            assert!(hex_to_rgba("#gg0000").is_err());
            assert!(hex_to_rgba("ff0000").is_err());
        }
    }

    mod matching {
        use super::*;

        #[test]
        fn test_plain_values_pass_through() {
            assert_eq!(expected_text("bold").unwrap(), "bold");
        }

        #[test]
        fn test_hex_values_are_converted() {
            assert_eq!(expected_text("#000").unwrap(), "rgba(0, 0, 0, 1)");
        }

        #[test]
        fn test_substring_is_case_sensitive() {
            assert!(text_is_found("14px", "font: 14px Arial"));
            assert!(!text_is_found("arial", "font: 14px Arial"));
        }
    }
}
