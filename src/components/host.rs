//! Host classification and canonicalization.
//!
//! A raw host string is validated, unreserved-decoded and run through IDNA
//! ToASCII before being classified as an IPv6 literal, an IPv4 address or a
//! DNS name. Each variant stores only canonical forms.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::codec::decode_unreserved;
use crate::components::ip::{format_ipv6, parse_ipv4, parse_ipv6, to_ipv6_addr};
use crate::error::UrlError;

/// A parsed, canonical host.
///
/// Variants can only be built by [`Host::parse`]. Equality and hashing use
/// [`Host::name`] alone, so `bücher` and `xn--bcher-kva` are the same host.
#[derive(Debug, Clone)]
pub enum Host {
    /// A DNS name.
    #[non_exhaustive]
    Dns {
        /// Lowercase ASCII form, with punycode labels.
        name: String,
        /// Unicode form for display.
        display: String,
    },
    /// An IPv4 address.
    #[non_exhaustive]
    Ipv4 {
        /// The address.
        address: Ipv4Addr,
        /// Dotted-decimal form.
        name: String,
    },
    /// An IPv6 address.
    #[non_exhaustive]
    Ipv6 {
        /// The address.
        address: Ipv6Addr,
        /// RFC 5952 form inside brackets, e.g. `[a::b]`.
        bracketed: String,
        /// RFC 5952 form without brackets, e.g. `a::b`.
        unbracketed: String,
    },
}

impl Host {
    /// Parse and canonicalize a host.
    ///
    /// # Arguments
    ///
    /// * `host` - Host as found in an authority, without userinfo or port
    ///
    /// # Returns
    ///
    /// The canonical host, or an error naming what was wrong with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Host;
    ///
    /// assert_eq!(Host::parse("BÜCHER.de")?.name(), "xn--bcher-kva.de");
    /// assert_eq!(Host::parse("BÜCHER.de")?.display(), "bücher.de");
    /// assert_eq!(Host::parse("FA::0:dd")?.name(), "[fa::dd]");
    /// assert_eq!(Host::parse("10.0.0.1.")?.name(), "10.0.0.1");
    /// assert!(Host::parse("01.1.1.1").is_err());
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn parse(host: &str) -> Result<Host, UrlError> {
        check_dots(host)?;

        if let Some(index) = host.chars().position(|c| c.is_ascii() && !is_host_char(c)) {
            tracing::debug!(host, index, "rejected illegal host character");
            return Err(UrlError::IllegalHostCharacter { host: host.to_string(), index });
        }

        let decoded = decode_unreserved(host);
        let ascii = idna::domain_to_ascii(&decoded).map_err(|_| {
            tracing::debug!(host, "idna conversion failed");
            UrlError::InvalidHost(host.to_string())
        })?;
        if ascii.is_empty() || ascii == "." {
            return Err(UrlError::InvalidHost(host.to_string()));
        }

        if looks_like_ipv6(&ascii) {
            return Self::ipv6(host, &ascii);
        }

        let ascii = ascii.strip_suffix('.').unwrap_or(&ascii);
        let last_label = ascii.rfind('.').map_or(ascii, |dot| &ascii[dot + 1..]);
        if last_label.starts_with(|c: char| c.is_ascii_digit()) {
            Self::ipv4(host, ascii)
        } else {
            Self::dns(host, ascii)
        }
    }

    fn ipv6(host: &str, ascii: &str) -> Result<Host, UrlError> {
        let groups = parse_ipv6(ascii).ok_or_else(|| {
            tracing::debug!(host, "rejected ipv6 literal");
            UrlError::InvalidIpv6(host.to_string())
        })?;
        let unbracketed = format_ipv6(&groups);
        Ok(Host::Ipv6 {
            address: to_ipv6_addr(&groups),
            bracketed: format!("[{}]", unbracketed),
            unbracketed,
        })
    }

    fn ipv4(host: &str, ascii: &str) -> Result<Host, UrlError> {
        let address = parse_ipv4(ascii).ok_or_else(|| {
            tracing::debug!(host, "rejected ipv4 address");
            UrlError::InvalidIpv4(host.to_string())
        })?;
        Ok(Host::Ipv4 { address, name: address.to_string() })
    }

    fn dns(host: &str, ascii: &str) -> Result<Host, UrlError> {
        if !ascii.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') {
            tracing::debug!(host, "rejected dns name");
            return Err(UrlError::InvalidHost(host.to_string()));
        }
        // Decoded `%2E` can reintroduce dots the raw check never saw.
        if ascii.split('.').any(str::is_empty) {
            tracing::debug!(host, "rejected empty host label");
            return Err(UrlError::InvalidHost(host.to_string()));
        }

        let name = ascii.to_ascii_lowercase();
        let (unicode, result) = idna::domain_to_unicode(&name);
        let display = if result.is_ok() { unicode } else { name.clone() };
        Ok(Host::Dns { name, display })
    }

    /// Canonical ASCII form, used for equality, hashing and serialization.
    ///
    /// Lowercase punycode for DNS names, dotted decimal for IPv4 and the
    /// bracketed RFC 5952 form for IPv6.
    pub fn name(&self) -> &str {
        match self {
            Host::Dns { name, .. } => name,
            Host::Ipv4 { name, .. } => name,
            Host::Ipv6 { bracketed, .. } => bracketed,
        }
    }

    /// Human-readable form. DNS names are shown in Unicode.
    pub fn display(&self) -> &str {
        match self {
            Host::Dns { display, .. } => display,
            Host::Ipv4 { name, .. } => name,
            Host::Ipv6 { bracketed, .. } => bracketed,
        }
    }

    /// The address, for IP hosts.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self {
            Host::Dns { .. } => None,
            Host::Ipv4 { address, .. } => Some(IpAddr::V4(*address)),
            Host::Ipv6 { address, .. } => Some(IpAddr::V6(*address)),
        }
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_dot(c: char) -> bool {
    matches!(c, '.' | '\u{3002}' | '\u{FF0E}' | '\u{FF61}')
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '[' | ']' | ':' | '%')
}

/// Reject empty hosts, a leading dot and empty labels.
fn check_dots(host: &str) -> Result<(), UrlError> {
    if host.is_empty() {
        return Err(UrlError::MissingHost(host.to_string()));
    }

    let mut previous_dot = true;
    for c in host.chars() {
        let dot = is_dot(c);
        if dot && previous_dot {
            tracing::debug!(host, "rejected empty host label");
            return Err(UrlError::InvalidHost(host.to_string()));
        }
        previous_dot = dot;
    }
    Ok(())
}

/// IPv6 if `[` or `:` appears before any `.`.
fn looks_like_ipv6(ascii: &str) -> bool {
    ascii.bytes().find(|&b| matches!(b, b'[' | b':' | b'.')).is_some_and(|b| b != b'.')
}
