//! Raw URL tokenizer.
//!
//! Splits an arbitrary string into scheme, authority, path, query and
//! fragment slices and classifies its shape. Nothing is decoded or
//! validated here beyond what is needed to find the component boundaries.

use std::borrow::Cow;

use crate::error::UrlError;
use crate::types::UrlShape;

/// Raw components sliced out of an input string.
///
/// Every slice except the scheme borrows from the input and is still
/// percent-encoded. The scheme is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl<'a> {
    scheme: Option<String>,
    authority: Option<&'a str>,
    path: Option<&'a str>,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
    shape: UrlShape,
}

impl<'a> SplitUrl<'a> {
    fn new(shape: UrlShape) -> Self {
        Self {
            scheme: None,
            authority: None,
            path: None,
            query: None,
            fragment: None,
            shape,
        }
    }

    /// Lowercased scheme, present only for [`UrlShape::Full`].
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Raw authority, including any userinfo and port.
    pub fn authority(&self) -> Option<&'a str> {
        self.authority
    }

    /// Raw path, with its leading separator when it has one.
    pub fn path(&self) -> Option<&'a str> {
        self.path
    }

    /// Raw query, without the `?`.
    pub fn query(&self) -> Option<&'a str> {
        self.query
    }

    /// Raw fragment, without the `#`.
    pub fn fragment(&self) -> Option<&'a str> {
        self.fragment
    }

    /// Shape of the input.
    pub fn shape(&self) -> UrlShape {
        self.shape
    }
}

/// Remove surrounding ASCII whitespace and internal line breaks.
///
/// A line break (`\n` or `\r`) is removed together with the run of ASCII
/// whitespace that follows it. Nothing replaces it, so
/// `"http://\nexample.\n  com"` becomes `"http://example.com"`.
///
/// # Examples
///
/// ```
/// use canonurl::components::sanitize_whitespace;
///
/// assert_eq!(sanitize_whitespace("  http://\nexample.\n  com  "), "http://example.com");
/// assert_eq!(sanitize_whitespace("http://host/a b"), "http://host/a b");
/// ```
pub fn sanitize_whitespace(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim_matches(is_ascii_whitespace);
    if !trimmed.contains(is_line_break) {
        return Cow::Borrowed(trimmed);
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        if is_line_break(c) {
            while chars.next_if(|&next| is_ascii_whitespace(next)).is_some() {}
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Split `url` into its raw components.
///
/// Leading and trailing ASCII whitespace is ignored; callers holding input
/// with embedded line breaks should run [`sanitize_whitespace`] first.
/// Slashes and backslashes are interchangeable separators.
///
/// # Errors
///
/// Returns [`UrlError::MissingAuthority`] when a scheme or `//` is followed
/// by nothing but separators.
///
/// # Examples
///
/// ```
/// use canonurl::components::split;
/// use canonurl::UrlShape;
///
/// let parts = split("HTTP:\\\\host\\path\\?q#top")?;
/// assert_eq!(parts.shape(), UrlShape::Full);
/// assert_eq!(parts.scheme(), Some("http"));
/// assert_eq!(parts.authority(), Some("host"));
/// assert_eq!(parts.path(), Some("\\path\\"));
/// assert_eq!(parts.query(), Some("q"));
/// assert_eq!(parts.fragment(), Some("top"));
/// # Ok::<(), canonurl::UrlError>(())
/// ```
pub fn split(url: &str) -> Result<SplitUrl<'_>, UrlError> {
    let url = url.trim_matches(is_ascii_whitespace);
    let bytes = url.as_bytes();

    let Some(&first) = bytes.first() else {
        let mut parts = SplitUrl::new(UrlShape::PathRelative);
        parts.path = Some("");
        return Ok(parts);
    };

    let parts = if first.is_ascii_alphabetic() {
        match scheme_end(bytes) {
            Some(colon) => {
                let mut parts = SplitUrl::new(UrlShape::Full);
                parts.scheme = Some(url[..colon].to_ascii_lowercase());
                split_authority(url, colon + 1, &mut parts)?;
                parts
            }
            None => {
                let mut parts = SplitUrl::new(UrlShape::PathRelative);
                split_path(url, 0, &mut parts);
                parts
            }
        }
    } else if is_slash(first) {
        if bytes.len() > 1 && is_slash(bytes[1]) {
            let mut parts = SplitUrl::new(UrlShape::ProtocolRelative);
            split_authority(url, 0, &mut parts)?;
            parts
        } else {
            let mut parts = SplitUrl::new(UrlShape::PathAbsolute);
            split_path(url, 0, &mut parts);
            parts
        }
    } else if first == b'#' {
        let mut parts = SplitUrl::new(UrlShape::FragmentOnly);
        split_fragment(url, 0, &mut parts);
        parts
    } else {
        let mut parts = SplitUrl::new(UrlShape::PathRelative);
        split_path(url, 0, &mut parts);
        parts
    };

    tracing::trace!(shape = ?parts.shape, "split raw url");
    Ok(parts)
}

/// Index of the `:` ending a scheme, if the input starts with one.
fn scheme_end(bytes: &[u8]) -> Option<usize> {
    for (i, &b) in bytes.iter().enumerate().skip(1) {
        match b {
            b':' => return Some(i),
            b'+' | b'-' | b'.' => continue,
            _ if b.is_ascii_alphanumeric() => continue,
            _ => break,
        }
    }
    None
}

fn split_authority<'a>(url: &'a str, start: usize, parts: &mut SplitUrl<'a>) -> Result<(), UrlError> {
    let bytes = url.as_bytes();
    let mut start = start;
    while start < bytes.len() && is_slash(bytes[start]) {
        start += 1;
    }

    if start >= bytes.len() {
        return Err(UrlError::MissingAuthority(url.to_string()));
    }

    let end = find_from(bytes, start, |b| matches!(b, b'/' | b'\\' | b'?' | b'#'));
    parts.authority = Some(&url[start..end]);

    match bytes.get(end) {
        Some(b'?') => split_query(url, end, parts),
        Some(b'#') => split_fragment(url, end, parts),
        Some(_) => split_path(url, end, parts),
        None => {}
    }
    Ok(())
}

fn split_path<'a>(url: &'a str, start: usize, parts: &mut SplitUrl<'a>) {
    let bytes = url.as_bytes();
    let end = find_from(bytes, start, |b| matches!(b, b'?' | b'#'));
    if end > start {
        parts.path = Some(&url[start..end]);
    }

    match bytes.get(end) {
        Some(b'?') => split_query(url, end, parts),
        Some(b'#') => split_fragment(url, end, parts),
        _ => {}
    }
}

/// `question` is the index of the `?` that opens the query.
fn split_query<'a>(url: &'a str, question: usize, parts: &mut SplitUrl<'a>) {
    let bytes = url.as_bytes();
    let start = question + 1;
    let end = find_from(bytes, start, |b| b == b'#');
    parts.query = Some(&url[start..end]);

    if end < bytes.len() {
        split_fragment(url, end, parts);
    }
}

/// `hash` is the index of the `#` that opens the fragment.
fn split_fragment<'a>(url: &'a str, hash: usize, parts: &mut SplitUrl<'a>) {
    parts.fragment = Some(&url[hash + 1..]);
}

fn find_from(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| pred(b))
        .map_or(bytes.len(), |p| start + p)
}

fn is_slash(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

fn is_ascii_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}
