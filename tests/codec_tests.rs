//! Tests for the public percent-encoding API.

use canonurl::codec::matcher::{CodepointSet, DECODE_UNRESERVED, FRAGMENT, PATH, QUERY, UNRESERVED, UNSAFE};
use canonurl::codec::*;

#[test]
fn test_encode_sets_differ_by_component() {
    let text = "a b;c&d=e+f/g?h#i";
    assert_eq!(encode(text, &PATH, false, false), "a%20b%3Bc&d=e+f%2Fg%3Fh%23i");
    assert_eq!(encode(text, &QUERY, false, false), "a%20b%3Bc%26d%3De%2Bf/g?h%23i");
    assert_eq!(encode(text, &FRAGMENT, false, false), "a%20b;c&d=e+f/g?h%23i");
    assert_eq!(encode(text, &QUERY, true, false), "a+b%3Bc%26d%3De%2Bf/g?h%23i");
}

#[test]
fn test_encode_custom_set() {
    let set = CodepointSet::from_ascii("abc%<");
    assert!(set.contains('%'));
    // Unsafe characters are escaped even when the caller marks them safe.
    assert_eq!(encode("ab%<c", &set, false, false), "ab%25%3Cc");
    assert_eq!(set.difference(UNSAFE), CodepointSet::from_ascii("abc"));
}

#[test]
fn test_encode_utf8_sequences() {
    let test_cases = vec![
        ("\u{0}", "%00"),
        ("\u{7F}", "%7F"),
        ("\u{80}", "%C2%80"),
        ("\u{7FF}", "%DF%BF"),
        ("\u{800}", "%E0%A0%80"),
        ("\u{FFFF}", "%EF%BF%BF"),
        ("\u{10000}", "%F0%90%80%80"),
        ("\u{10FFFF}", "%F4%8F%BF%BF"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(encode(input, &UNRESERVED, false, false), expected, "Encoding failed for: {:?}", input);
    }
}

#[test]
fn test_decode_then_encode() {
    let raw = "r%C3%A9sum%C3%A9%20v2";
    let decoded = decode_all(raw);
    assert_eq!(decoded, "résumé v2");
    assert_eq!(encode_path_segment(&decoded), raw);
}

#[test]
fn test_decode_sets() {
    assert_eq!(decode("%41%2F%20", &DECODE_UNRESERVED), "A%2F%20");
    assert_eq!(decode_unreserved("%41%2F%20"), "A%2F%20");
    assert_eq!(decode_all("%41%2F%20"), "A/ ");
    assert_eq!(decode("%41", &CodepointSet::EMPTY), "%41");
}

#[test]
fn test_over_decoding_is_not_idempotent() {
    let once = decode_all("%2541");
    assert_eq!(once, "%41");
    assert_eq!(decode_all(&once), "A");
}

#[test]
fn test_re_encoding_is_stable() {
    let test_cases = vec![
        ("/a b/%41/%zz", "/a%20b/%41/%25zz"),
        ("\\win\\path", "/win/path"),
        ("/;p=1/", "/;p=1/"),
    ];

    for (input, expected) in test_cases {
        let once = re_encode_path(input);
        assert_eq!(once, expected, "Re-encoding failed for: {:?}", input);
        assert_eq!(re_encode_path(&once), once);
    }

    let query = re_encode_query("a=1&b=%&c=d+e;f");
    assert_eq!(query, "a=1&b=%25&c=d+e;f");
    assert_eq!(re_encode_query(&query), query);

    let fragment = re_encode_fragment("top of page%");
    assert_eq!(fragment, "top%20of%20page%25");
    assert_eq!(re_encode_fragment(&fragment), fragment);
}
