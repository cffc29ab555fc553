//! Selective percent-decoding.

use std::borrow::Cow;

use crate::codec::matcher::{CodepointSet, DECODE_ALL, DECODE_UNRESERVED};

/// Decode the `%XX` triplets of `text` whose byte value is in `decode_set`.
///
/// Triplets whose value is outside the set are copied verbatim, as are
/// malformed ones (non-hex digits, or a `%` within two characters of the
/// end). Decoded byte runs that are not valid UTF-8 are replaced with
/// U+FFFD.
///
/// When nothing in `text` is decodable under the set, the input is
/// returned borrowed and unchanged.
///
/// # Examples
///
/// ```
/// use canonurl::codec::{decode, matcher::DECODE_UNRESERVED};
///
/// assert_eq!(decode("a%2Fb%7E", &DECODE_UNRESERVED), "a%2Fb~");
/// ```
pub fn decode<'a>(text: &'a str, decode_set: &CodepointSet) -> Cow<'a, str> {
    if !requires_decoding(text, decode_set) {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(decoded) = decode_hex_pair(bytes[i + 1], bytes[i + 2]) {
                if decode_set.contains_byte(decoded) {
                    out.push(decoded);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    match String::from_utf8(out) {
        Ok(decoded) => Cow::Owned(decoded),
        Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
    }
}

/// Decode every valid `%XX` triplet.
pub fn decode_all(text: &str) -> Cow<'_, str> {
    decode(text, &DECODE_ALL)
}

/// Decode only triplets that stand for unreserved characters.
///
/// Delimiters such as `%2F` stay escaped, so the result never gains
/// structure the input did not have.
pub fn decode_unreserved(text: &str) -> Cow<'_, str> {
    decode(text, &DECODE_UNRESERVED)
}

fn requires_decoding(text: &str, decode_set: &CodepointSet) -> bool {
    let bytes = text.as_bytes();
    bytes.windows(3).any(|w| {
        w[0] == b'%'
            && decode_hex_pair(w[1], w[2]).is_some_and(|decoded| decode_set.contains_byte(decoded))
    })
}

/// Value of a single ASCII hex digit.
pub(crate) fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn decode_hex_pair(high: u8, low: u8) -> Option<u8> {
    Some((hex_value(high)? << 4) | hex_value(low)?)
}
