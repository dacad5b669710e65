use crate::error::DecodeError;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Percent-decode a cookie value.
///
/// Unlike `percent_encoding`, which leaves stray `%` signs alone, a `%` that
/// is not followed by two hex digits is an error here. `+` is not a space.
pub fn decode_value(raw: &str) -> Result<Cow<'_, str>, DecodeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return Err(DecodeError::MalformedEscape { index: i }),
            }
        } else {
            i += 1;
        }
    }

    percent_decode_str(raw).decode_utf8().map_err(|_| DecodeError::InvalidUtf8)
}

/// Lenient base 10 integer parse: leading whitespace and an optional sign,
/// then the longest run of digits. Whatever follows the digits is ignored.
/// Returns `None` when there are no digits or the number does not fit.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &unsigned[..digits_len];
    if negative {
        format!("-{}", digits).parse().ok()
    } else {
        digits.parse().ok()
    }
}
