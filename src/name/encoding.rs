//! Strict percent-decoding and deterministic percent-encoding for name parts.

use super::error::{NameError, NameErrorCode, NameResult};

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decodes `%XX` escapes. A truncated or non-hex escape, or a result that is not
/// UTF-8, is an `invalid_encoding` error rather than being passed through.
pub(crate) fn percent_decode(value: &str) -> NameResult<String> {
    if !value.contains('%') {
        return Ok(value.to_string());
    }

    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes
                .get(i + 1)
                .copied()
                .and_then(hex_value)
                .zip(bytes.get(i + 2).copied().and_then(hex_value));
            let Some((hi, lo)) = escape else {
                return Err(NameError::new(
                    NameErrorCode::InvalidEncoding,
                    format!("Invalid percent-encoding at offset {i} in '{value}'"),
                ));
            };
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).map_err(|_| {
        NameError::new(
            NameErrorCode::InvalidEncoding,
            format!("Percent-encoded bytes in '{value}' are not valid UTF-8"),
        )
    })
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

fn is_sub_delim(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

fn encode_with(value: &str, keep: impl Fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(value.len());
    for &b in value.as_bytes() {
        if keep(b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Encodes one decoded path segment; `/` is always escaped.
pub(crate) fn encode_segment(segment: &str) -> String {
    encode_with(segment, |b| {
        is_unreserved(b) || is_sub_delim(b) || b == b':' || b == b'@'
    })
}

/// Encodes a username or password; `:` and `@` are escaped.
pub(crate) fn encode_userinfo(value: &str) -> String {
    encode_with(value, |b| is_unreserved(b) || is_sub_delim(b))
}
