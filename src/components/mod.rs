//! URL components.
//!
//! This module contains the parsers for each part of a URL:
//! - Splitting a raw string into components and classifying its shape
//! - Authority splitting and host parsing (DNS, IPv4, IPv6)
//! - Path normalization and reference resolution
//! - Query tokenizing

pub mod authority;
pub mod host;
pub mod ip;
pub mod path;
pub mod query;
pub mod splitter;

// Re-export main functionality
pub use authority::Authority;
pub use host::Host;
pub use path::Path;
pub use query::{KeyValue, Query};
pub use splitter::{sanitize_whitespace, split, SplitUrl};
