//! Percent-encoding and percent-decoding.
//!
//! This module contains the codec that every URL component relies on:
//! - Character sets that say which codepoints may appear unescaped
//! - Codepoint-aware percent-encoding with a "re-encode" mode that keeps
//!   existing `%XX` triplets
//! - Selective percent-decoding driven by a decode set

pub mod decoder;
pub mod encoder;
pub mod matcher;

// Re-export main functionality
pub use decoder::{decode, decode_all, decode_unreserved};
pub use encoder::{
    encode, encode_fragment, encode_path_segment, encode_query_component, re_encode_fragment,
    re_encode_path, re_encode_query,
};
pub use matcher::CodepointSet;
