//! Authority splitting: userinfo, host and port.

use std::fmt;

use crate::components::host::Host;
use crate::error::UrlError;
use crate::types::Port;

/// A validated host with an optional explicit port.
///
/// Userinfo never survives splitting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    port: Option<Port>,
    host: Host,
}

impl Authority {
    /// Split a raw authority into host and port.
    ///
    /// Everything up to and including the rightmost `@` is discarded. A
    /// trailing `:port` is split off when the authority has exactly one
    /// colon, or when the last colon directly follows a closing `]`. A bare
    /// trailing colon means no port.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Authority;
    ///
    /// let authority = Authority::split("user@domain.com:password@HOST.com:0080")?;
    /// assert_eq!(authority.host().name(), "host.com");
    /// assert_eq!(authority.port().map(|p| p.get()), Some(80));
    ///
    /// let authority = Authority::split("[::1]:8080")?;
    /// assert_eq!(authority.to_string(), "[::1]:8080");
    ///
    /// assert!(Authority::split("user@").is_err());
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn split(authority: &str) -> Result<Authority, UrlError> {
        let bytes = authority.as_bytes();
        let end = bytes.len();
        let mut start = 0;
        let mut last_colon = None;
        let mut colons = 0;

        for i in (0..end).rev() {
            match bytes[i] {
                b'@' => {
                    start = i + 1;
                    break;
                }
                b':' => {
                    colons += 1;
                    last_colon.get_or_insert(i);
                }
                _ => {}
            }
        }

        if start == end || last_colon == Some(start) {
            tracing::debug!(authority, "authority has no host");
            return Err(UrlError::MissingHost(authority.to_string()));
        }

        let (host_end, port) = match last_colon {
            Some(colon) if colons == 1 || bytes[colon - 1] == b']' => {
                let port = &authority[colon + 1..];
                let port = if port.is_empty() { None } else { Some(port.parse::<Port>()?) };
                (colon, port)
            }
            _ => (end, None),
        };

        let host = Host::parse(&authority[start..host_end])?;
        Ok(Authority { port, host })
    }

    /// Explicit port, if the authority had one.
    pub fn port(&self) -> Option<Port> {
        self.port
    }

    /// The host.
    pub fn host(&self) -> &Host {
        &self.host
    }

    pub(crate) fn into_parts(self) -> (Host, Option<Port>) {
        (self.host, self.port)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host.name())?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(authority: &str) -> (String, Option<u16>) {
        let authority = Authority::split(authority).unwrap();
        (authority.host().name().to_string(), authority.port().map(Port::get))
    }

    #[test]
    fn test_userinfo_dropped() {
        let test_cases = vec![
            ("host.com", ("host.com", None)),
            ("user@host.com", ("host.com", None)),
            ("user:pass@host.com:90", ("host.com", Some(90))),
            ("user@host@host.com", ("host.com", None)),
            ("user@domain.com:password@host.com", ("host.com", None)),
            ("a:b:c@host.com:1", ("host.com", Some(1))),
        ];

        for (input, (host, port)) in test_cases {
            assert_eq!(split(input), (host.to_string(), port), "Failed for: {}", input);
        }
    }

    #[test]
    fn test_ports() {
        assert_eq!(split("host:80").1, Some(80));
        assert_eq!(split("host:00443").1, Some(443));
        assert_eq!(split("host:65535").1, Some(65535));
        assert_eq!(split("host:").1, None);
        assert_eq!(split("host").1, None);
    }

    #[test]
    fn test_invalid_ports() {
        for input in ["host:0", "host:65536", "host:-1", "host:+80", "host:8a", "host:99999999999"] {
            assert!(matches!(Authority::split(input), Err(UrlError::InvalidPort(_))), "Should reject: {}", input);
        }
    }

    #[test]
    fn test_ipv6_authorities() {
        assert_eq!(split("[::1]"), ("[::1]".to_string(), None));
        assert_eq!(split("[::1]:8080"), ("[::1]".to_string(), Some(8080)));
        assert_eq!(split("[::1]:"), ("[::1]".to_string(), None));
        assert_eq!(split("FA::0:dd"), ("[fa::dd]".to_string(), None));
        assert_eq!(split("user@[a:0:0:0:b:0:0:0]:1"), ("[a::b:0:0:0]".to_string(), Some(1)));
    }

    #[test]
    fn test_missing_host() {
        for input in ["", "@", "user@", ":80", "user@:80", ":"] {
            assert!(matches!(Authority::split(input), Err(UrlError::MissingHost(_))), "Should reject: {:?}", input);
        }
    }

    #[test]
    fn test_display_drops_userinfo() {
        let authority = Authority::split("user:pass@Host.com:90").unwrap();
        assert_eq!(authority.to_string(), "host.com:90");
        let authority = Authority::split("host.com").unwrap();
        assert_eq!(authority.to_string(), "host.com");
    }
}
