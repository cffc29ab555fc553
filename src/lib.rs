//! canonurl - Canonical, comparable http/https URLs
//!
//! This crate parses the URLs found in real documents, validates them and
//! turns them into canonical values that compare, hash and serialize
//! consistently, following RFC 3986.
//!
//! # Features
//!
//! - **Tolerant**: Accepts mixed slash directions, stray userinfo, surrounding whitespace and line breaks
//! - **Canonical hosts**: IDNA hostnames, IPv4 without leading zeroes, RFC 5952 IPv6
//! - **Normalized paths**: Dot segments removed, relative references resolved
//! - **Ordered queries**: Duplicate keys and parameter order preserved
//! - **Codepoint-aware codec**: Percent-encoding never splits a UTF-8 sequence
//! - **Interop**: Minimal escaping into the strict [`url::Url`] type
//!
//! # Quick Start
//!
//! ```
//! use canonurl::{escape, Path, Url};
//!
//! // Parse a wild URL
//! let url = Url::parse("HTTP://user@Bücher.example:80\\docs\\..\\api/?q=a+b#Top")?;
//! assert_eq!(url.host().name(), "xn--bcher-kva.example");
//! assert_eq!(url.host().display(), "bücher.example");
//! assert_eq!(url.port(), 80);
//! assert_eq!(url.to_string(), "http://xn--bcher-kva.example/api/?q=a%20b#Top");
//!
//! // Parsing the output gives back the same value
//! assert_eq!(Url::parse(&url.to_string())?, url);
//!
//! // Build one from parts
//! let built = Url::https("example.com").path(["a", "b/"]).query_param("k", "v").build()?;
//! assert_eq!(built.to_string(), "https://example.com/a/b/?k=v");
//!
//! // Resolve a relative reference
//! assert_eq!(built.path().resolve("../c")?, Path::parse("/a/c"));
//!
//! // Escape without normalizing
//! assert_eq!(escape("http://host/%zz ok")?, "http://host/%25zz%20ok");
//! # Ok::<(), canonurl::UrlError>(())
//! ```
//!
//! # Supported URL Schemes
//!
//! - `http` (default port 80)
//! - `https` (default port 443)
//!
//! Other schemes are still recognized by [`split`], which classifies any
//! string, but full parsing rejects them.
//!
//! # Error Handling
//!
//! All fallible functions return `Result<T, UrlError>`. Common error cases:
//!
//! - Missing or malformed hosts, including invalid IPv4 and IPv6 literals
//! - Ports outside `[1, 65535]`
//! - Input without a scheme and host where a full URL is required
//! - Schemes other than http and https
//!
//! # Logging
//!
//! Rejections and the shape of split inputs are reported through
//! [`tracing`] at `debug` and `trace` level. No subscriber is installed.

// Re-export the URL value and its parts
pub use types::{Port, Scheme, Url, UrlShape};
pub use builder::UrlBuilder;
pub use components::{Authority, Host, KeyValue, Path, Query};

// Re-export splitting and escaping
pub use components::{sanitize_whitespace, split, SplitUrl};
pub use normalizer::{create_uri, escape};

// Re-export public types
pub use error::UrlError;

// Module declarations
pub mod builder;
pub mod codec;
pub mod components;
pub mod error;
pub mod normalizer;
pub mod types;
