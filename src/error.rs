//! Error types for URL parsing, building and escaping.

use thiserror::Error;

/// Errors that can occur while parsing, building or escaping a URL.
///
/// Every variant describes invalid caller input. Nothing here is transient
/// or retryable, and no partially built value is ever returned alongside
/// an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The authority has no host, e.g. `http://:80` or `http://user@`.
    #[error("URL missing host: {0:?}")]
    MissingHost(String),

    /// The host could not be converted to ASCII or is otherwise malformed.
    #[error("Invalid hostname: {0:?}")]
    InvalidHost(String),

    /// The host contains an ASCII character that no host form allows.
    #[error("Invalid hostname: illegal character at index {index} in {host:?}")]
    IllegalHostCharacter {
        /// Host as given by the caller.
        host: String,
        /// Character (not byte) index of the offending character.
        index: usize,
    },

    /// The host looks like an IPv4 address but isn't a valid one.
    #[error("Invalid hostname: malformed IPv4 address {0:?}")]
    InvalidIpv4(String),

    /// The host looks like an IPv6 address but isn't a valid one.
    #[error("Invalid hostname: malformed IPv6 address {0:?}")]
    InvalidIpv6(String),

    /// The port is not a decimal number in `[1, 65535]`.
    #[error("Invalid port in authority. Valid values are [1-65535] inclusive. Found: {0:?}")]
    InvalidPort(String),

    /// A scheme was found but nothing follows it.
    #[error("URL missing authority: {0:?}")]
    MissingAuthority(String),

    /// The input lacks a scheme or a host.
    #[error("URL must have a scheme and host, e.g. http://host.com/: {0:?}")]
    NotFullUrl(String),

    /// Only `http` and `https` are supported.
    #[error("Only http and https schemes are supported: {0:?}")]
    UnsupportedScheme(String),

    /// A full URL was passed where a path reference was expected.
    #[error("Paths can only be resolved against a relative or absolute path, not a full URL: {0:?}")]
    ResolveFullUrl(String),

    /// The strict URI parser rejected the escaped form.
    #[error("URI conversion failed: {0}")]
    Uri(String),
}

impl UrlError {
    /// Whether the error is caused by the caller's input.
    ///
    /// Always `true`; this crate has a single error category. Exists so
    /// callers can match on the category without naming every cause.
    pub fn is_invalid_input(&self) -> bool {
        true
    }

    /// Whether the error concerns the host part of the authority.
    pub fn is_host_error(&self) -> bool {
        matches!(
            self,
            UrlError::MissingHost(_)
                | UrlError::InvalidHost(_)
                | UrlError::IllegalHostCharacter { .. }
                | UrlError::InvalidIpv4(_)
                | UrlError::InvalidIpv6(_)
        )
    }
}

impl From<url::ParseError> for UrlError {
    fn from(err: url::ParseError) -> Self {
        UrlError::Uri(err.to_string())
    }
}
