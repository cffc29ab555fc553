//! Character sets for the percent codec.
//!
//! Membership for ASCII is a single bit test against a 128-bit table. Every
//! codepoint above `0x7F` shares one flag, since none of the URL safe sets
//! contain non-ASCII characters.

/// An immutable set of codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointSet {
    ascii: u128,
    non_ascii: bool,
}

impl CodepointSet {
    /// The set containing nothing.
    pub const EMPTY: CodepointSet = CodepointSet { ascii: 0, non_ascii: false };

    /// The set containing every codepoint.
    pub const ALL: CodepointSet = CodepointSet { ascii: u128::MAX, non_ascii: true };

    /// Build a set from a string of ASCII characters.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if `chars` contains a
    /// non-ASCII character.
    pub const fn from_ascii(chars: &str) -> Self {
        Self::EMPTY.with(chars)
    }

    /// Return a copy of this set with the ASCII characters in `chars` added.
    pub const fn with(self, chars: &str) -> Self {
        let bytes = chars.as_bytes();
        let mut ascii = self.ascii;
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i] < 0x80, "codepoint sets are built from ASCII only");
            ascii |= 1u128 << bytes[i];
            i += 1;
        }
        CodepointSet { ascii, non_ascii: self.non_ascii }
    }

    /// Union of two sets.
    pub const fn union(self, other: CodepointSet) -> Self {
        CodepointSet {
            ascii: self.ascii | other.ascii,
            non_ascii: self.non_ascii || other.non_ascii,
        }
    }

    /// Codepoints in `self` but not in `other`.
    pub const fn difference(self, other: CodepointSet) -> Self {
        CodepointSet {
            ascii: self.ascii & !other.ascii,
            non_ascii: self.non_ascii && !other.non_ascii,
        }
    }

    /// Check whether `c` is a member of the set.
    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        if cp < 0x80 {
            self.ascii & (1u128 << cp) != 0
        } else {
            self.non_ascii
        }
    }

    /// Check whether a decoded byte value is a member of the set.
    ///
    /// Bytes above `0x7F` are UTF-8 fragments and count as non-ASCII.
    pub fn contains_byte(&self, b: u8) -> bool {
        if b < 0x80 {
            self.ascii & (1u128 << b) != 0
        } else {
            self.non_ascii
        }
    }
}

/// ASCII letters and digits.
pub const ALPHANUMERIC: CodepointSet =
    CodepointSet::from_ascii("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789");

/// RFC 3986 unreserved characters: letters, digits and `.-_~`.
pub const UNRESERVED: CodepointSet = ALPHANUMERIC.with(".-_~");

/// Characters allowed unescaped in a path segment.
///
/// `;` is left out because some servers read it as a path-parameter
/// delimiter.
pub const PATH: CodepointSet = UNRESERVED.with("!$&'()*+,:=@");

/// Characters allowed unescaped in a query key or value.
///
/// `+` is left out because most servers read it as a space. `&`, `=` and
/// `;` are left out because they delimit pairs.
pub const QUERY: CodepointSet = UNRESERVED.with("!$'()*,/:?@");

/// Characters allowed unescaped in a fragment.
pub const FRAGMENT: CodepointSet = UNRESERVED.with("!$&'()*+,/:;=?@");

/// Characters that are always escaped, whatever the component.
///
/// RFC 3986 does not reserve them, but transport agents are known to alter
/// them and `"`, `<` and `>` delimit URLs in free text.
pub const UNSAFE: CodepointSet = CodepointSet::from_ascii("\"%<>\\^`{|}");

/// Path characters kept verbatim when re-encoding an existing path.
pub const RE_ENCODE_PATH: CodepointSet = PATH.with("/;");

/// Query characters kept verbatim when re-encoding an existing query.
pub const RE_ENCODE_QUERY: CodepointSet = QUERY.with("=?&+;");

/// Decode set that unescapes every valid triplet.
pub const DECODE_ALL: CodepointSet = CodepointSet::ALL;

/// Decode set that only unescapes triplets of unreserved characters.
pub const DECODE_UNRESERVED: CodepointSet = UNRESERVED;
