//! Fluent construction of URLs from parts.

use crate::components::{Authority, Host, KeyValue, Path, Query};
use crate::error::UrlError;
use crate::types::{Port, Scheme, Url};

/// Builds a [`Url`] from a host and optional parts.
///
/// Created by [`Url::http`] or [`Url::https`]. Parts are given decoded and
/// are encoded when the URL is serialized. The first invalid part is
/// remembered and returned by [`UrlBuilder::build`].
///
/// # Examples
///
/// ```
/// use canonurl::Url;
///
/// let url = Url::http("user@example.com:8080")
///     .path(["docs", "a b.html"])
///     .query([("q", "rust"), ("page", "2")])
///     .fragment("intro")
///     .build()?;
/// assert_eq!(url.to_string(), "http://example.com:8080/docs/a%20b.html?q=rust&page=2#intro");
///
/// assert!(Url::https("example.com").port(0).build().is_err());
/// # Ok::<(), canonurl::UrlError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct UrlBuilder {
    scheme: Scheme,
    parts: Result<Parts, UrlError>,
}

#[derive(Debug, Clone)]
struct Parts {
    host: Host,
    port: Option<Port>,
    path: Path,
    query: Query,
    fragment: String,
}

impl UrlBuilder {
    pub(crate) fn new(scheme: Scheme, host: &str) -> Self {
        let parts = Authority::split(host).map(|authority| {
            let (host, port) = authority.into_parts();
            Parts {
                host,
                port,
                path: Path::empty(),
                query: Query::empty(),
                fragment: String::new(),
            }
        });
        Self { scheme, parts }
    }

    /// Set the port, replacing any port given with the host.
    pub fn port(mut self, port: u32) -> Self {
        self.parts = self.parts.and_then(|mut parts| {
            parts.port = Some(Port::new(port)?);
            Ok(parts)
        });
        self
    }

    /// Set the path from literal segments.
    ///
    /// Segments are split on slashes and dot segments are removed, but
    /// nothing is percent-decoded. See [`Path::of`].
    pub fn path<I, S>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(|parts| parts.path = Path::of(segments))
    }

    /// Replace the query with `params`, in order.
    pub fn query<I, P>(self, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyValue>,
    {
        self.update(|parts| parts.query = Query::of(params))
    }

    /// Append one query parameter.
    pub fn query_param(self, key: &str, value: &str) -> Self {
        self.update(|parts| parts.query.push(KeyValue::new(key, value)))
    }

    /// Set the decoded fragment.
    pub fn fragment(self, fragment: &str) -> Self {
        self.update(|parts| parts.fragment = fragment.to_string())
    }

    /// Finish the URL, applying the scheme's default port if none was set.
    ///
    /// # Errors
    ///
    /// Returns the first error met while building: an invalid host or port.
    pub fn build(self) -> Result<Url, UrlError> {
        let scheme = self.scheme;
        let parts = self.parts?;
        Ok(Url::from_parts(
            scheme,
            parts.host,
            parts.port.unwrap_or_else(|| scheme.default_port()),
            parts.path,
            parts.query,
            parts.fragment,
        ))
    }

    fn update(mut self, f: impl FnOnce(&mut Parts)) -> Self {
        if let Ok(parts) = &mut self.parts {
            f(parts);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(Url::http("host.com").build().unwrap().port(), 80);
        assert_eq!(Url::https("host.com").build().unwrap().port(), 443);
        assert_eq!(Url::https("host.com:80").build().unwrap().port(), 80);
        assert_eq!(Url::http("host.com").port(443).build().unwrap().port(), 443);
        assert_eq!(Url::http("host.com:1").port(2).build().unwrap().port(), 2);
    }

    #[test]
    fn test_userinfo_dropped() {
        let url = Url::http("user:pass@host.com").build().unwrap();
        assert_eq!(url.to_string(), "http://host.com/");
    }

    #[test]
    fn test_errors_surface_at_build() {
        assert!(matches!(Url::http("").build(), Err(UrlError::MissingHost(_))));
        assert!(matches!(Url::http("host.com:0").build(), Err(UrlError::InvalidPort(_))));
        assert!(matches!(Url::http("host.com").port(70000).build(), Err(UrlError::InvalidPort(_))));
        assert!(matches!(Url::http("bad host").path(["a"]).build(), Err(UrlError::IllegalHostCharacter { .. })));

        // The first error wins.
        assert!(matches!(Url::http("01.1.1.1").port(0).build(), Err(UrlError::InvalidIpv4(_))));
    }

    #[test]
    fn test_path_segments_are_literal() {
        let url = Url::http("host.com").path(["a%2Fb", "c?d"]).build().unwrap();
        assert_eq!(url.path().segments(), ["a%2Fb", "c?d"]);
        assert_eq!(url.to_string(), "http://host.com/a%252Fb/c%3Fd");
    }

    #[test]
    fn test_query_replace_and_append() {
        let url = Url::http("host.com")
            .query_param("a", "1")
            .query([("b", "2")])
            .query_param("b", "3")
            .build()
            .unwrap();
        assert_eq!(url.query().encoded(), "b=2&b=3");
    }

    #[test]
    fn test_fragment_encoded_on_output() {
        let url = Url::https("host.com").fragment("a b#c").build().unwrap();
        assert_eq!(url.fragment(), "a b#c");
        assert_eq!(url.to_string(), "https://host.com/#a%20b%23c");
    }

    #[test]
    fn test_built_equals_parsed() {
        let built = Url::http("bücher.de").path(["wiki", "Molière"]).query_param("q", "x y").build().unwrap();
        let parsed = Url::parse("http://xn--bcher-kva.de/wiki/Moli%C3%A8re?q=x+y").unwrap();
        assert_eq!(built, parsed);
    }
}
