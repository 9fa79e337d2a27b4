//! Route parameters and percent-decoding of captured values.
//!
//! [`RouteParams`] maps parameter names to decoded values. A parameter that
//! is optional (`?`) or zero-or-more (`*`) and matched nothing is *absent*
//! from the map rather than present with an empty string, so
//! [`get`](RouteParams::get) returning `None` is meaningful.
//!
//! # Example
//!
//! ```
//! use route_match::{match_path, RouteParams};
//!
//! let matched = match_path("/users/42/posts/caf%C3%A9", "/users/:id/posts/:slug", None)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(matched.params.get_as::<u32>("id"), Some(42));
//! assert_eq!(matched.params.get("slug").map(String::as_str), Some("café"));
//! ```

use crate::error::{MatchError, Result};
use crate::warn_log;
use std::collections::HashMap;

/// Decoded parameter values of one match, keyed by parameter name.
///
/// Unnamed groups are keyed by their index (`"0"`, `"1"`, ...).
///
/// ```
/// use route_match::RouteParams;
///
/// let params: RouteParams = [("0", "css/site.css"), ("page", "2")].into_iter().collect();
/// assert_eq!(params.get("0").map(String::as_str), Some("css/site.css"));
/// assert_eq!(params.get_as::<u8>("page"), Some(2));
/// assert!(!params.contains("missing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoded value of `key`.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Parse a parameter with [`FromStr`](std::str::FromStr); `None` if it is
    /// absent or does not parse.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Percent-decode one captured value the way `decodeURIComponent` does.
///
/// `+` is left alone. Every `%` must start a two-digit hex escape and the
/// decoded bytes must be UTF-8; otherwise a [`MatchError::Decode`] naming the
/// parameter is returned.
pub fn decode_param(name: &str, raw: &str) -> Result<String> {
    if let Some(offset) = invalid_escape(raw) {
        warn_log!(
            "Parameter '{}' has a malformed escape at {} in '{}'",
            name,
            offset,
            raw
        );
        return Err(MatchError::decode(
            name,
            raw,
            format!("malformed escape at {offset}"),
        ));
    }

    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|err| {
            warn_log!("Parameter '{}' does not decode to UTF-8: '{}'", name, raw);
            MatchError::decode(name, raw, err.to_string())
        })
}

/// Byte offset of the first `%` not followed by two hex digits.
fn invalid_escape(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'%')
        .map(|(i, _)| i)
        .find(|&i| {
            !matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());

        assert_eq!(params.get("id"), Some(&"123".to_string()));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_route_params_get_as() {
        let params: RouteParams = [("id", "123"), ("active", "true")].into_iter().collect();

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<u32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_route_params_empty() {
        let params = RouteParams::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
    }

    #[test]
    fn test_decode_plain_and_escaped() {
        assert_eq!(decode_param("p", "abc").unwrap(), "abc");
        assert_eq!(decode_param("p", "abc%20123").unwrap(), "abc 123");
        assert_eq!(decode_param("p", "a%2Fb").unwrap(), "a/b");
        assert_eq!(decode_param("p", "%E7%94%B0%E4%B8%AD").unwrap(), "田中");
        assert_eq!(decode_param("p", "").unwrap(), "");
    }

    #[test]
    fn test_decode_keeps_plus() {
        assert_eq!(decode_param("p", "a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_decode_rejects_malformed_escapes() {
        assert!(decode_param("p", "%zz").unwrap_err().is_decode());
        assert!(decode_param("p", "abc%").unwrap_err().is_decode());
        assert!(decode_param("p", "abc%4").unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = decode_param("name", "%E0%A4%A").unwrap_err();
        assert!(err.is_decode());
        let err = decode_param("name", "%FF").unwrap_err();
        match err {
            MatchError::Decode { name, value, .. } => {
                assert_eq!(name, "name");
                assert_eq!(value, "%FF");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
