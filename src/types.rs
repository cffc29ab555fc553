//! Core data structures for parsed URLs.

use std::fmt;
use std::str::FromStr;

use crate::builder::UrlBuilder;
use crate::codec::{decode_all, encode_fragment};
use crate::components::{sanitize_whitespace, split, Authority, Host, Path, Query};
use crate::error::UrlError;

/// The shape of a raw URL string, decided once when it is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlShape {
    /// Scheme and authority, e.g. `http://host/path`.
    Full,
    /// Authority without a scheme, e.g. `//host/path`.
    ProtocolRelative,
    /// Path with a leading separator, e.g. `/path`.
    PathAbsolute,
    /// Path without a leading separator, e.g. `path/file.pdf` or `?q=1`.
    PathRelative,
    /// Only a fragment, e.g. `#top`.
    FragmentOnly,
}

/// Supported URL schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `http`, default port 80.
    Http,
    /// `https`, default port 443.
    Https,
}

impl Scheme {
    /// Lowercase scheme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Port used when a URL does not name one.
    pub fn default_port(&self) -> Port {
        match self {
            Scheme::Http => Port(80),
            Scheme::Https => Port(443),
        }
    }
}

impl FromStr for Scheme {
    type Err = UrlError;

    /// Parse a scheme name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Scheme::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Ok(Scheme::Https)
        } else {
            tracing::debug!(scheme = s, "rejected unsupported scheme");
            Err(UrlError::UnsupportedScheme(s.to_string()))
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A TCP port in `[1, 65535]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port(u16);

impl Port {
    /// Validate a port number.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Port;
    ///
    /// assert_eq!(Port::new(8080)?.get(), 8080);
    /// assert!(Port::new(0).is_err());
    /// assert!(Port::new(65536).is_err());
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn new(port: u32) -> Result<Port, UrlError> {
        match u16::try_from(port) {
            Ok(port) if port != 0 => Ok(Port(port)),
            _ => {
                tracing::debug!(port, "rejected port");
                Err(UrlError::InvalidPort(port.to_string()))
            }
        }
    }

    /// The port number.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl FromStr for Port {
    type Err = UrlError;

    /// Parse ASCII digits. Leading zeroes are allowed; signs are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            tracing::debug!(port = s, "rejected port");
            return Err(UrlError::InvalidPort(s.to_string()));
        }
        let value: u32 = s.parse().map_err(|_| UrlError::InvalidPort(s.to_string()))?;
        Port::new(value).map_err(|_| UrlError::InvalidPort(s.to_string()))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> u16 {
        port.0
    }
}

/// A parsed, canonical http or https URL.
///
/// The port is always resolved: a URL without an explicit port carries its
/// scheme's default. Userinfo is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    scheme: Scheme,
    host: Host,
    port: Port,
    path: Path,
    query: Query,
    fragment: String,
}

impl Url {
    /// Parse a full http or https URL.
    ///
    /// Surrounding whitespace and embedded line breaks are removed first.
    /// Slashes and backslashes are interchangeable.
    ///
    /// # Arguments
    ///
    /// * `url` - Raw URL, possibly copied from a document
    ///
    /// # Returns
    ///
    /// The canonical URL, or the first problem found.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Url;
    ///
    /// let url = Url::parse(" HTTPS:\\\\user@Bücher.de:443\\a\\.\\b\\..\\c?q=1+2#Frag ment ")?;
    /// assert_eq!(url.host().display(), "bücher.de");
    /// assert_eq!(url.port(), 443);
    /// assert_eq!(url.query().get("q"), Some("1 2"));
    /// assert_eq!(url.to_string(), "https://xn--bcher-kva.de/a/c?q=1%202#Frag%20ment");
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn parse(url: &str) -> Result<Url, UrlError> {
        let sanitized = sanitize_whitespace(url);
        let parts = split(&sanitized)?;
        if parts.shape() != UrlShape::Full {
            tracing::debug!(shape = ?parts.shape(), "rejected url without scheme and host");
            return Err(UrlError::NotFullUrl(url.to_string()));
        }

        let scheme: Scheme = parts.scheme().unwrap_or_default().parse()?;
        let (host, port) = Authority::split(parts.authority().unwrap_or_default())?.into_parts();
        let path = parts.path().map_or_else(Path::empty, Path::parse);
        let query = parts.query().map_or_else(Query::empty, Query::parse);
        let fragment = parts.fragment().map(|f| decode_all(f).into_owned()).unwrap_or_default();

        Ok(Url {
            port: port.unwrap_or_else(|| scheme.default_port()),
            scheme,
            host,
            path,
            query,
            fragment,
        })
    }

    /// Start building an `http` URL.
    ///
    /// `host` may carry userinfo and a port, e.g. `"user@host:8080"`.
    pub fn http(host: &str) -> UrlBuilder {
        UrlBuilder::new(Scheme::Http, host)
    }

    /// Start building an `https` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Url;
    ///
    /// let url = Url::https("www.wolframalpha.com")
    ///     .path(["input/"])
    ///     .query_param("i", "π²")
    ///     .build()?;
    /// assert_eq!(url.to_string(), "https://www.wolframalpha.com/input/?i=%CF%80%C2%B2");
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn https(host: &str) -> UrlBuilder {
        UrlBuilder::new(Scheme::Https, host)
    }

    pub(crate) fn from_parts(
        scheme: Scheme,
        host: Host,
        port: Port,
        path: Path,
        query: Query,
        fragment: String,
    ) -> Url {
        Url { scheme, host, port, path, query, fragment }
    }

    /// The scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The host.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The port, explicit or defaulted.
    pub fn port(&self) -> u16 {
        self.port.get()
    }

    /// The normalized path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The query parameters.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The fragment, decoded. Empty when the URL has none.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Convert to a strict [`url::Url`].
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Url;
    ///
    /// let uri = Url::http("wikipedia.org").path(["wiki", "Molière"]).build()?.to_uri()?;
    /// assert_eq!(uri.as_str(), "http://wikipedia.org/wiki/Moli%C3%A8re");
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn to_uri(&self) -> Result<url::Url, UrlError> {
        Ok(url::Url::parse(&self.to_string())?)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host.name())?;
        if self.port != self.scheme.default_port() {
            write!(f, ":{}", self.port)?;
        }
        f.write_str(self.path.encoded())?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", encode_fragment(&self.fragment))?;
        }
        Ok(())
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Url::parse(&raw).map_err(serde::de::Error::custom)
    }
}
