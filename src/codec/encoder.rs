//! Codepoint-aware percent-encoding.
//!
//! This module provides the encoder used to serialize every URL component.
//! The encoder walks Unicode scalar values, not bytes, so a multi-byte
//! character is either kept whole or escaped as its complete UTF-8 sequence.

use std::borrow::Cow;

use crate::codec::matcher::{
    CodepointSet, FRAGMENT, PATH, QUERY, RE_ENCODE_PATH, RE_ENCODE_QUERY, UNSAFE,
};

const UPPER_HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode `text`, keeping the codepoints of `safe` verbatim.
///
/// # Arguments
///
/// * `text` - Decoded text to encode
/// * `safe` - Codepoints copied verbatim; members of the unsafe set are
///   escaped even if listed here
/// * `space_to_plus` - Emit `+` for a space instead of `%20`
/// * `re_encode` - Treat `%` followed by two hex digits as an existing
///   triplet and keep it; any other `%` becomes `%25`
///
/// # Returns
///
/// The encoded text. Input that is already entirely safe is returned
/// borrowed.
///
/// # Examples
///
/// ```
/// use canonurl::codec::{encode, matcher::PATH};
///
/// assert_eq!(encode("a b", &PATH, false, false), "a%20b");
/// assert_eq!(encode("a b", &PATH, true, false), "a+b");
/// assert_eq!(encode("❤", &PATH, false, false), "%E2%9D%A4");
/// assert_eq!(encode("%41%zz", &PATH, false, true), "%41%25zz");
/// ```
pub fn encode<'a>(
    text: &'a str,
    safe: &CodepointSet,
    space_to_plus: bool,
    re_encode: bool,
) -> Cow<'a, str> {
    let safe = safe.difference(UNSAFE);
    if text.chars().all(|c| safe.contains(c)) {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(encoded_len(text, &safe));
    for (i, c) in text.char_indices() {
        if re_encode && c == '%' {
            let is_triplet = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            out.push_str(if is_triplet { "%" } else { "%25" });
        } else if space_to_plus && c == ' ' {
            out.push('+');
        } else if safe.contains(c) {
            out.push(c);
        } else {
            push_escaped(&mut out, c);
        }
    }
    Cow::Owned(out)
}

/// Encode one path segment. `/` is escaped since it would split the segment.
pub fn encode_path_segment(segment: &str) -> Cow<'_, str> {
    encode(segment, &PATH, false, false)
}

/// Encode a query key or value. Spaces become `%20`, never `+`.
pub fn encode_query_component(component: &str) -> Cow<'_, str> {
    encode(component, &QUERY, false, false)
}

/// Encode a decoded fragment.
pub fn encode_fragment(fragment: &str) -> Cow<'_, str> {
    encode(fragment, &FRAGMENT, false, false)
}

/// Re-encode a raw path, keeping valid triplets and turning `\` into `/`.
pub fn re_encode_path(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        let slashed = path.replace('\\', "/");
        Cow::Owned(encode(&slashed, &RE_ENCODE_PATH, false, true).into_owned())
    } else {
        encode(path, &RE_ENCODE_PATH, false, true)
    }
}

/// Re-encode a raw query, keeping valid triplets and the pair delimiters.
pub fn re_encode_query(query: &str) -> Cow<'_, str> {
    encode(query, &RE_ENCODE_QUERY, false, true)
}

/// Re-encode a raw fragment, keeping valid triplets.
pub fn re_encode_fragment(fragment: &str) -> Cow<'_, str> {
    encode(fragment, &FRAGMENT, false, true)
}

fn push_escaped(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    for &b in c.encode_utf8(&mut buf).as_bytes() {
        out.push('%');
        out.push(UPPER_HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(UPPER_HEX_DIGITS[(b & 0x0F) as usize] as char);
    }
}

fn encoded_len(text: &str, safe: &CodepointSet) -> usize {
    text.chars()
        .map(|c| if safe.contains(c) { 1 } else { 3 * c.len_utf8() })
        .sum()
}
