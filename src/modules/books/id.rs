//! Book identifier extraction from the request path.

use readinglist_http::AppError;
use thiserror::Error;

/// Path prefix in front of the identifier segment
pub const BOOK_PATH_PREFIX: &str = "/v1/books/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid book id {0:?}")]
pub struct InvalidId(String);

/// Parse a signed 64-bit integer, detecting the radix from its prefix.
///
/// Accepts an optional sign, then `0x`/`0X` (hex), `0o`/`0O` (octal),
/// `0b`/`0B` (binary), a bare leading `0` (octal) or plain decimal.
/// Underscores may separate digits or follow a prefix.
pub fn parse_id(raw: &str) -> Result<i64, InvalidId> {
    let invalid = || InvalidId(raw.to_string());

    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'+') => (false, &raw[1..]),
        Some(b'-') => (true, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits, prefixed) = match unsigned.as_bytes() {
        [b'0', b'x' | b'X', ..] => (16, &unsigned[2..], true),
        [b'0', b'o' | b'O', ..] => (8, &unsigned[2..], true),
        [b'0', b'b' | b'B', ..] => (2, &unsigned[2..], true),
        [b'0', _, ..] => (8, &unsigned[1..], true),
        _ => (10, unsigned, false),
    };

    if !underscores_ok(digits, prefixed) {
        return Err(invalid());
    }

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|_| invalid())?;

    if negative {
        0i64.checked_sub_unsigned(magnitude).ok_or_else(invalid)
    } else {
        i64::try_from(magnitude).map_err(|_| invalid())
    }
}

// Every '_' must follow a digit or the radix prefix and precede a digit.
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    let mut after_digit = prefixed;
    let mut trailing_underscore = false;

    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
            trailing_underscore = true;
        } else {
            after_digit = true;
            trailing_underscore = false;
        }
    }

    !trailing_underscore
}

/// Take the segment after [`BOOK_PATH_PREFIX`] and parse it as an id.
pub fn extract_id(path: &str) -> Result<i64, AppError> {
    let segment = path.strip_prefix(BOOK_PATH_PREFIX).unwrap_or_default();

    parse_id(segment).map_err(|e| AppError::bad_request(e.to_string()))
}
