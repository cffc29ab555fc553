//! Path normalization and reference resolution.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec::{decode_all, encode_path_segment};
use crate::error::UrlError;

/// A normalized absolute path.
///
/// Segments are stored decoded and never contain empty, `.` or `..`
/// entries. Two paths are equal when their encoded forms are equal.
#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<String>,
    directory: bool,
    encoded: String,
}

impl Path {
    /// The root path, `/`.
    pub fn empty() -> Path {
        Path::from_segments(Vec::new(), true)
    }

    /// Build a path from literal segments.
    ///
    /// Each argument is split on `/` and `\`, and dot segments are removed,
    /// but nothing is percent-decoded. The result is always absolute. End
    /// the last argument with a slash, or pass an empty last argument, to
    /// get a directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Path;
    ///
    /// assert_eq!(Path::of(["a/", "/b", "//c//"]).encoded(), "/a/b/c/");
    /// assert_eq!(Path::of(["../a"]).encoded(), "/a");
    /// assert_eq!(Path::of(["a", ""]).encoded(), "/a/");
    /// assert_eq!(Path::of(["100%"]).encoded(), "/100%25");
    /// ```
    pub fn of<I, S>(segments: I) -> Path
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = PathBuilder::new(Vec::new());
        let mut any = false;
        for segment in segments {
            builder.split_and_add(segment.as_ref(), false);
            any = true;
        }
        if !any {
            return Path::empty();
        }
        builder.build()
    }

    /// Parse an encoded path, decoding each segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Path;
    ///
    /// let path = Path::parse("/a/b/c/../..");
    /// assert_eq!(path.segments(), ["a"]);
    /// assert!(path.is_directory());
    ///
    /// let path = Path::parse("/parent/%2e%2E/dir");
    /// assert_eq!(path.segments(), ["dir"]);
    /// assert!(!path.is_directory());
    ///
    /// assert_eq!(Path::parse("\\path\\").encoded(), "/path/");
    /// ```
    pub fn parse(path: &str) -> Path {
        if path.is_empty() {
            return Path::empty();
        }
        let mut builder = PathBuilder::new(Vec::new());
        builder.split_and_add(path, true);
        builder.build()
    }

    /// Resolve a relative or absolute path reference against this path.
    ///
    /// An empty reference yields this path. A reference starting with a
    /// slash replaces this path. Anything else is merged with this path's
    /// directory and normalized, as for RFC 3986 references.
    ///
    /// # Errors
    ///
    /// Returns [`UrlError::ResolveFullUrl`] if a `:` comes before the first
    /// slash, since the reference would then be a full URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Path;
    ///
    /// let base = Path::parse("/b/c/d;p");
    /// assert_eq!(base.resolve("../g")?.encoded(), "/b/g");
    /// assert_eq!(base.resolve("g;x=1/../y")?.encoded(), "/b/c/y");
    /// assert!(base.resolve("http://host/").is_err());
    /// # Ok::<(), canonurl::UrlError>(())
    /// ```
    pub fn resolve(&self, reference: &str) -> Result<Path, UrlError> {
        if reference.is_empty() {
            return Ok(self.clone());
        }

        match reference.find([':', '/', '\\']) {
            Some(i) if reference.as_bytes()[i] == b':' => {
                return Err(UrlError::ResolveFullUrl(reference.to_string()));
            }
            Some(0) => return Ok(Path::parse(reference)),
            _ => {}
        }

        let mut segments = self.segments.clone();
        if !self.directory {
            segments.pop();
        }
        let mut builder = PathBuilder::new(segments);
        builder.split_and_add(reference, true);
        Ok(builder.build())
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Decoded segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path ends with a slash.
    pub fn is_directory(&self) -> bool {
        self.directory
    }

    /// Decoded last segment, or `""` for a directory.
    pub fn filename(&self) -> &str {
        match self.segments.last() {
            Some(last) if !self.directory => last,
            _ => "",
        }
    }

    /// Percent-encoded form, always starting with `/`.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    fn from_segments(segments: Vec<String>, directory: bool) -> Path {
        let mut encoded = String::from("/");
        for (i, segment) in segments.iter().enumerate() {
            encoded.push_str(&encode_path_segment(segment));
            if i + 1 < segments.len() || directory {
                encoded.push('/');
            }
        }
        Path { segments, directory, encoded }
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::empty()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// Accumulates segments while removing dot segments.
struct PathBuilder {
    segments: Vec<String>,
    directory: bool,
}

impl PathBuilder {
    fn new(segments: Vec<String>) -> Self {
        Self { segments, directory: true }
    }

    fn split_and_add(&mut self, text: &str, decode: bool) {
        for segment in text.split(['/', '\\']) {
            self.add(segment, decode);
        }
    }

    fn add(&mut self, segment: &str, decode: bool) {
        match dot_count(segment) {
            Some(0) | Some(1) => self.directory = true,
            Some(_) => {
                // `..` removes the segment added most recently.
                self.segments.pop();
                self.directory = true;
            }
            None => {
                let segment = if decode { decode_all(segment).into_owned() } else { segment.to_string() };
                self.segments.push(segment);
                self.directory = false;
            }
        }
    }

    fn build(self) -> Path {
        Path::from_segments(self.segments, self.directory)
    }
}

/// Number of dot tokens in a segment made only of `.` or `%2e` tokens,
/// capped to segments of at most two tokens. `None` for anything else.
fn dot_count(segment: &str) -> Option<usize> {
    let mut rest = segment;
    let mut count = 0;
    while !rest.is_empty() {
        if count == 2 {
            return None;
        }
        if let Some(tail) = rest.strip_prefix('.') {
            rest = tail;
        } else if rest.len() >= 3 && rest.as_bytes()[..3].eq_ignore_ascii_case(b"%2e") {
            rest = &rest[3..];
        } else {
            return None;
        }
        count += 1;
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_paths() {
        let test_cases = vec![
            Path::empty(),
            Path::of(Vec::<&str>::new()),
            Path::of([""]),
            Path::of(["/"]),
            Path::of(["", ""]),
            Path::parse(""),
        ];

        for path in test_cases {
            assert!(path.is_empty());
            assert!(path.is_directory());
            assert_eq!(path.encoded(), "/");
            assert_eq!(path, Path::empty());
        }
    }

    #[test]
    fn test_always_absolute() {
        let expected = Path::of(["/a"]);
        assert_eq!(Path::of(["a"]), expected);
        assert_eq!(Path::of(["./a"]), expected);
        assert_eq!(Path::of(["../a"]), expected);
    }

    #[test]
    fn test_directory_flag() {
        assert!(Path::of(["/a", ""]).is_directory());
        assert!(Path::of(["/a/"]).is_directory());
        assert!(!Path::of(["/a"]).is_directory());
        assert!(!Path::of(["a"]).is_directory());
    }

    #[test]
    fn test_backslashes() {
        assert_eq!(Path::of(["\\"]), Path::of(["/"]));
        assert_eq!(Path::of(["\\path"]).encoded(), "/path");
        assert_eq!(Path::of(["\\path\\"]).encoded(), "/path/");
    }

    #[test]
    fn test_dot_segments() {
        let test_cases: Vec<(&str, Vec<&str>)> = vec![
            (".", vec![]),
            ("..", vec![]),
            ("/parent/..", vec![]),
            ("/parent/.", vec!["parent"]),
            ("/parent/%2e", vec!["parent"]),
            ("/parent/%2e/", vec!["parent"]),
            ("/parent/%2e/dir", vec!["parent", "dir"]),
            ("/parent/%2e%2E/dir", vec!["dir"]),
            ("/parent/.%2E/dir", vec!["dir"]),
            ("/a/b/c/../..", vec!["a"]),
            ("/a/.../b", vec!["a", "...", "b"]),
            ("/a/%2e%2e%2e", vec!["a", "%2e%2e%2e"]),
        ];

        for (input, expected) in test_cases {
            assert_eq!(Path::of([input]).segments(), expected.as_slice(), "Failed for: {}", input);
        }
    }

    #[test]
    fn test_double_dot_pops_most_recent() {
        let path = Path::parse("/a/b/c/../d");
        assert_eq!(path.segments(), ["a", "b", "d"]);
        let path = Path::parse("/a/b/../../c");
        assert_eq!(path.segments(), ["c"]);
    }

    #[test]
    fn test_parse_decodes_segments() {
        let path = Path::parse("/docs/r%C3%A9sum%C3%A9.html");
        assert_eq!(path.segments(), ["docs", "résumé.html"]);
        assert_eq!(path.filename(), "résumé.html");
        assert_eq!(path.encoded(), "/docs/r%C3%A9sum%C3%A9.html");

        let path = Path::parse("/a%2Fb");
        assert_eq!(path.segments(), ["a/b"]);
        assert_eq!(path.encoded(), "/a%2Fb");

        // `of` keeps segments literally.
        assert_eq!(Path::of(["/a%2Fb"]).segments(), ["a%2Fb"]);
    }

    #[test]
    fn test_filename() {
        assert_eq!(Path::of(["/docs/résumé.html"]).filename(), "résumé.html");
        assert_eq!(Path::of(["/lib/"]).filename(), "");
        assert_eq!(Path::empty().filename(), "");
    }

    #[test]
    fn test_equality() {
        let a1 = Path::of(["a", "b", "c/"]);
        let a2 = Path::of(["/a/", "/b/", "/c/"]);
        let a3 = Path::of(["/a", "b", "c", ""]);
        assert_eq!(a1, a2);
        assert_eq!(a2, a3);
        assert_ne!(a1, Path::of(["a"]));
    }

    #[test]
    fn test_resolve_rfc3986() {
        let base = Path::parse("/b/c/d;p");
        let test_cases = vec![
            ("g", "/b/c/g"),
            ("./g", "/b/c/g"),
            ("g/", "/b/c/g/"),
            ("/g", "/g"),
            ("", "/b/c/d;p"),
            (".", "/b/c/"),
            ("./", "/b/c/"),
            ("..", "/b/"),
            ("../", "/b/"),
            ("../g", "/b/g"),
            ("../..", "/"),
            ("../../", "/"),
            ("../../..", "/"),
            ("../../../g", "/g"),
            ("/./g", "/g"),
            ("/../g", "/g"),
            ("g.", "/b/c/g."),
            (".g", "/b/c/.g"),
            ("..g", "/b/c/..g"),
            ("g..", "/b/c/g.."),
            ("./../g", "/b/g"),
            ("./g/.", "/b/c/g/"),
            ("g/./h", "/b/c/g/h"),
            ("g/../h", "/b/c/h"),
            ("g;x=1/./y", "/b/c/g;x=1/y"),
            ("g;x=1/../y", "/b/c/y"),
        ];

        for (reference, expected) in test_cases {
            assert_eq!(base.resolve(reference).unwrap(), Path::parse(expected), "Failed for: {}", reference);
        }
    }

    #[test]
    fn test_resolve_against_file_and_directory() {
        assert_eq!(Path::parse("/home/dir").resolve("file.pdf").unwrap(), Path::parse("/home/file.pdf"));
        assert_eq!(Path::parse("/home/dir/").resolve("file.pdf").unwrap(), Path::parse("/home/dir/file.pdf"));
    }

    #[test]
    fn test_resolve_rejects_full_urls() {
        let base = Path::parse("/a");
        assert!(matches!(base.resolve("http://host"), Err(UrlError::ResolveFullUrl(_))));
        assert!(matches!(base.resolve("mailto:x"), Err(UrlError::ResolveFullUrl(_))));
        assert!(base.resolve("a/b:c").is_ok());
    }
}
