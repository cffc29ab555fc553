//! Query tokenizing and encoding.

use std::collections::HashMap;
use std::fmt;

use crate::codec::{decode_all, encode_query_component};

/// One decoded query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    /// Create a parameter from decoded text.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }

    /// Decoded key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Decoded value, `""` when the parameter had none.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for KeyValue {
    fn from((key, value): (K, V)) -> Self {
        KeyValue::new(key, value)
    }
}

/// An ordered list of query parameters.
///
/// Duplicate keys are kept in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query {
    params: Vec<KeyValue>,
}

impl Query {
    /// The query with no parameters.
    pub fn empty() -> Query {
        Query::default()
    }

    /// Build a query from decoded pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Query;
    ///
    /// let query = Query::of([("q", "a b"), ("lang", "")]);
    /// assert_eq!(query.encoded(), "q=a%20b&lang");
    /// ```
    pub fn of<I, P>(params: I) -> Query
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyValue>,
    {
        Query { params: params.into_iter().map(Into::into).collect() }
    }

    /// Parse a raw query string, without its leading `?`.
    ///
    /// `+` means space. Pairs are split on `&` and then on the first `=`;
    /// keys and values are fully percent-decoded afterwards, so `%26` and
    /// `%3D` never act as delimiters. Empty pairs are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use canonurl::Query;
    ///
    /// let query = Query::parse("k=a&k=b&flag&&x=1+2");
    /// assert_eq!(query.get("k"), Some("a"));
    /// assert_eq!(query.get("flag"), Some(""));
    /// assert_eq!(query.get("x"), Some("1 2"));
    /// assert_eq!(query.params().len(), 4);
    /// ```
    pub fn parse(query: &str) -> Query {
        if query.is_empty() {
            return Query::empty();
        }

        let query = query.replace('+', " ");
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => KeyValue::new(decode_all(key), decode_all(value)),
                None => KeyValue::new(decode_all(pair), ""),
            })
            .collect();
        Query { params }
    }

    /// Parameters in order.
    pub fn params(&self) -> &[KeyValue] {
        &self.params
    }

    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|kv| kv.key == key).map(KeyValue::value)
    }

    /// Map view keeping the first value of each key.
    pub fn as_map(&self) -> HashMap<&str, &str> {
        let mut map = HashMap::with_capacity(self.params.len());
        for kv in &self.params {
            map.entry(kv.key()).or_insert(kv.value());
        }
        map
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Percent-encoded form, without a leading `?`.
    ///
    /// A parameter with an empty value is written as its bare key, unless
    /// the key is empty too, which is written as `=`. A bare empty key
    /// would vanish when parsed back, so this one pair gets an `=` even
    /// though its value is empty.
    pub fn encoded(&self) -> String {
        let mut out = String::new();
        for (i, kv) in self.params.iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(&encode_query_component(&kv.key));
            if !kv.value.is_empty() || kv.key.is_empty() {
                out.push('=');
                out.push_str(&encode_query_component(&kv.value));
            }
        }
        out
    }

    pub(crate) fn push(&mut self, param: KeyValue) {
        self.params.push(param);
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &Query) -> Vec<(&str, &str)> {
        query.params().iter().map(|kv| (kv.key(), kv.value())).collect()
    }

    #[test]
    fn test_plus_is_space() {
        for input in ["k1= ", "k1=+", "k1=%20"] {
            assert_eq!(pairs(&Query::parse(input)), vec![("k1", " ")], "Failed for: {}", input);
        }
    }

    #[test]
    fn test_incomplete_pairs() {
        let test_cases = vec!["k1&k2", "k1=&k2", "k1&k2=", "k1=&k2=", "&k1=&k2=", "&k1&k2&", "k1&&k2"];

        for input in test_cases {
            assert_eq!(pairs(&Query::parse(input)), vec![("k1", ""), ("k2", "")], "Failed for: {}", input);
        }
    }

    #[test]
    fn test_decoding_after_splitting() {
        assert_eq!(pairs(&Query::parse("%6b1=a&%6b2=%62")), vec![("k1", "a"), ("k2", "b")]);
        assert_eq!(pairs(&Query::parse("k1=%3d")), vec![("k1", "=")]);
        assert_eq!(pairs(&Query::parse("k1=%26")), vec![("k1", "&")]);
        assert_eq!(pairs(&Query::parse("k=a=b")), vec![("k", "a=b")]);
        assert_eq!(pairs(&Query::parse("=v")), vec![("", "v")]);
    }

    #[test]
    fn test_invalid_escapes_retained() {
        assert_eq!(pairs(&Query::parse("k1=%&k2=%z&k3=%zz")), vec![("k1", "%"), ("k2", "%z"), ("k3", "%zz")]);
    }

    #[test]
    fn test_duplicates_and_map_view() {
        let query = Query::parse("k=a&k=b");
        assert_eq!(pairs(&query), vec![("k", "a"), ("k", "b")]);
        assert_eq!(query.get("k"), Some("a"));
        assert_eq!(query.as_map().get("k"), Some(&"a"));
        assert_eq!(query.as_map().len(), 1);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(Query::parse("").is_empty());
        assert!(Query::parse("&&").is_empty());
        assert_eq!(Query::parse("&"), Query::empty());
        assert_eq!(Query::empty().encoded(), "");
    }

    #[test]
    fn test_encoding() {
        let test_cases = vec![
            (vec![("a", "1"), ("b", "2")], "a=1&b=2"),
            (vec![("a b", "c+d")], "a%20b=c%2Bd"),
            (vec![("k", "&=;")], "k=%26%3D%3B"),
            (vec![("path", "/a?b:c@d")], "path=/a?b:c@d"),
            (vec![("flag", "")], "flag"),
            (vec![("", "v")], "=v"),
            (vec![("", ""), ("a", "")], "=&a"),
            (vec![("q", "❤")], "q=%E2%9D%A4"),
        ];

        for (params, expected) in test_cases {
            assert_eq!(Query::of(params).encoded(), expected);
        }
    }

    #[test]
    fn test_parse_encode_parse() {
        let query = Query::parse("q=a+b%2Bc&x=%26&flag");
        assert_eq!(query.encoded(), "q=a%20b%2Bc&x=%26&flag");
        assert_eq!(Query::parse(&query.encoded()), query);

        let query = Query::parse("=&a");
        assert_eq!(pairs(&query), vec![("", ""), ("a", "")]);
        assert_eq!(Query::parse(&query.encoded()), query);
    }
}
