//! IP literal parsing and RFC 5952 formatting.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::codec::decoder::hex_value;

/// Parse a dotted-decimal IPv4 address.
///
/// Exactly four decimal segments in `[0, 255]` are required. A segment
/// longer than one digit may not start with `0`, since some resolvers
/// read such segments as octal.
///
/// # Examples
///
/// ```
/// use canonurl::components::ip::parse_ipv4;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(parse_ipv4("192.168.0.1"), Some(Ipv4Addr::new(192, 168, 0, 1)));
/// assert_eq!(parse_ipv4("01.1.1.1"), None);
/// assert_eq!(parse_ipv4("1.1.1.1.1"), None);
/// ```
pub fn parse_ipv4(text: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut count = 0;

    for segment in text.split('.') {
        if count == octets.len() {
            return None;
        }
        if segment.is_empty()
            || !segment.bytes().all(|b| b.is_ascii_digit())
            || (segment.len() > 1 && segment.starts_with('0'))
        {
            return None;
        }
        octets[count] = segment.parse().ok()?;
        count += 1;
    }

    (count == octets.len()).then(|| Ipv4Addr::from(octets))
}

/// Parse an IPv6 literal, with or without surrounding brackets.
///
/// Groups are one to four hex digits. At most one `::` may appear, and
/// without one exactly eight groups are required. Embedded IPv4 suffixes
/// are not accepted.
///
/// # Examples
///
/// ```
/// use canonurl::components::ip::parse_ipv6;
///
/// assert_eq!(parse_ipv6("[::1]"), Some([0, 0, 0, 0, 0, 0, 0, 1]));
/// assert_eq!(parse_ipv6("a::b"), Some([0xa, 0, 0, 0, 0, 0, 0, 0xb]));
/// assert_eq!(parse_ipv6("[1:::1]"), None);
/// ```
pub fn parse_ipv6(text: &str) -> Option<[u16; 8]> {
    let inner = if text.starts_with('[') {
        text.strip_prefix('[')?.strip_suffix(']')?
    } else {
        text
    };

    let bytes = inner.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    if inner == "::" {
        return Some([0; 8]);
    }

    let mut groups = [0u16; 8];
    let mut count = 0;
    let mut compress_at = None;
    let mut i = 0;

    if bytes[0] == b':' {
        if bytes[1] != b':' || bytes.get(2) == Some(&b':') {
            return None;
        }
        compress_at = Some(0);
        i = 2;
    }

    while i < bytes.len() {
        if count == groups.len() {
            return None;
        }

        let start = i;
        let mut value = 0u16;
        while i < bytes.len() && i - start < 4 {
            match hex_value(bytes[i]) {
                Some(digit) => value = (value << 4) | u16::from(digit),
                None => break,
            }
            i += 1;
        }
        if i == start {
            return None;
        }
        groups[count] = value;
        count += 1;

        if i == bytes.len() {
            break;
        }
        if bytes[i] != b':' {
            return None;
        }
        i += 1;
        if i == bytes.len() {
            return None;
        }
        if bytes[i] == b':' {
            if compress_at.is_some() {
                return None;
            }
            compress_at = Some(count);
            i += 1;
        }
    }

    match compress_at {
        None if count == groups.len() => Some(groups),
        None => None,
        Some(_) if count == groups.len() => None,
        Some(at) => {
            let mut expanded = [0u16; 8];
            let tail = count - at;
            expanded[..at].copy_from_slice(&groups[..at]);
            expanded[8 - tail..].copy_from_slice(&groups[at..count]);
            Some(expanded)
        }
    }
}

/// Format IPv6 groups in the RFC 5952 canonical form, without brackets.
///
/// The longest run of two or more zero groups is replaced by `::`. When
/// two runs tie, the leftmost one is compressed. Groups are lowercase hex
/// without leading zeroes.
///
/// # Examples
///
/// ```
/// use canonurl::components::ip::format_ipv6;
///
/// assert_eq!(format_ipv6(&[0xa, 0, 0, 0, 0xb, 0, 0, 0]), "a::b:0:0:0");
/// assert_eq!(format_ipv6(&[0xa, 0xb, 0, 0, 0, 0xc, 0, 0]), "a:b::c:0:0");
/// assert_eq!(format_ipv6(&[0; 8]), "::");
/// ```
pub fn format_ipv6(groups: &[u16; 8]) -> String {
    let mut run = [0usize; 8];
    run[7] = usize::from(groups[7] == 0);
    let mut best_start = 0;
    let mut best_len = 0;
    for i in (0..7).rev() {
        if groups[i] == 0 {
            run[i] = run[i + 1] + 1;
        }
        if run[i] > 1 && run[i] >= best_len {
            best_start = i;
            best_len = run[i];
        }
    }

    let mut out = String::with_capacity(39);
    if best_len > 1 && best_start == 0 {
        out.push(':');
    }
    let mut i = 0;
    while i < groups.len() {
        if best_len > 1 && i == best_start {
            out.push(':');
            i += best_len;
            continue;
        }
        out.push_str(&format!("{:x}", groups[i]));
        if i < 7 {
            out.push(':');
        }
        i += 1;
    }
    out
}

/// Convert parsed groups into the standard library address type.
pub fn to_ipv6_addr(groups: &[u16; 8]) -> Ipv6Addr {
    Ipv6Addr::from(*groups)
}
