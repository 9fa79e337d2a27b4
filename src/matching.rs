//! Match evaluation.
//!
//! The evaluator is the public entry point of the matcher. Given a pathname,
//! something describing what to match ([`PathPattern`]) and an optional
//! parent match, it:
//!
//! 1. passes the parent through untouched when there is no pattern,
//! 2. otherwise tries each pattern in order, fetching its compiled matcher
//!    from the [`PatternCache`],
//! 3. builds a [`PathMatch`] from the first recognizer that accepts the path,
//!    percent-decoding each captured parameter.
//!
//! Matches are handed out as `Arc<PathMatch>` so a passed-through parent is
//! the very same allocation (`Arc::ptr_eq` holds).

use crate::cache::PatternCache;
use crate::error::Result;
use crate::options::{MatchOptions, PathPattern};
use crate::params::{decode_param, RouteParams};
use crate::pattern::CaptureKind;
use crate::trace_log;
use std::sync::Arc;

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Pattern that produced this match
    pub path: String,
    /// Matched prefix of the pathname
    pub url: String,
    /// `true` when `url` covers the whole pathname
    pub is_exact: bool,
    /// Decoded parameters; unmatched optional parameters are absent
    pub params: RouteParams,
}

impl PathMatch {
    /// Part of `pathname` after this match's `url`.
    ///
    /// Always empty or starting with `/`, so it can be fed to a child
    /// matcher as-is. For the root match this is the whole pathname.
    ///
    /// ```
    /// use route_match::match_path;
    ///
    /// let m = match_path("/users/7/posts", "/users/:id", None).unwrap().unwrap();
    /// assert_eq!(m.remaining("/users/7/posts"), "/posts");
    /// ```
    pub fn remaining<'p>(&self, pathname: &'p str) -> &'p str {
        let consumed = self.url.trim_end_matches('/').len();
        pathname.get(consumed..).unwrap_or_default()
    }
}

impl PatternCache {
    /// Match `pathname` against `pattern`, using this cache for compiled
    /// matchers.
    ///
    /// - No pattern: returns `parent` itself (including `None`).
    /// - Alternatives: tried in order; later ones are not evaluated once one
    ///   matches.
    ///
    /// Errors are pattern syntax errors and malformed percent-encoding in a
    /// captured value; a path that simply doesn't match is `Ok(None)`.
    ///
    /// ```
    /// use route_match::{MatchOptions, PatternCache};
    ///
    /// let cache = PatternCache::new();
    /// let m = cache
    ///     .match_path("/somewhere/else", MatchOptions::new("/somewhere"), None)
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(m.url, "/somewhere");
    /// assert!(!m.is_exact);
    /// ```
    pub fn match_path(
        &self,
        pathname: &str,
        pattern: impl Into<PathPattern>,
        parent: Option<&Arc<PathMatch>>,
    ) -> Result<Option<Arc<PathMatch>>> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            trace_log!("No pattern for '{}', inheriting parent match", pathname);
            return Ok(parent.cloned());
        }

        for options in pattern.iter() {
            let Some(text) = options.pattern() else {
                trace_log!("Alternative without pattern, inheriting parent match");
                return Ok(parent.cloned());
            };
            trace_log!("Trying pattern '{}' against '{}'", text, pathname);
            if let Some(matched) = self.match_one(pathname, text, options)? {
                return Ok(Some(Arc::new(matched)));
            }
        }
        Ok(None)
    }

    fn match_one(
        &self,
        pathname: &str,
        pattern: &str,
        options: &MatchOptions,
    ) -> Result<Option<PathMatch>> {
        let matcher = self.get_or_compile(pattern, options.flags())?;
        let Some(raw) = matcher.exec(pathname)? else {
            return Ok(None);
        };

        let url = if pattern == "/" && raw.matched.is_empty() {
            "/"
        } else {
            raw.matched
        };
        let is_exact = url == pathname;
        if options.exact && !is_exact {
            return Ok(None);
        }

        let mut params = RouteParams::new();
        for (key, value) in matcher.keys().iter().zip(raw.captures) {
            match value {
                None => {}
                Some("") if key.kind != CaptureKind::Required => {}
                Some(value) => params.insert(key.name.clone(), decode_param(&key.name, value)?),
            }
        }

        Ok(Some(PathMatch {
            path: pattern.to_string(),
            url: url.to_string(),
            is_exact,
            params,
        }))
    }
}

/// Match `pathname` against `pattern` using the process-wide cache.
///
/// ```
/// use route_match::{match_path, MatchOptions};
///
/// let m = match_path("/somewhere", "/somewhere", None).unwrap().unwrap();
/// assert!(m.is_exact);
///
/// let strict = MatchOptions::new("/SomeWhere").sensitive(true);
/// assert!(match_path("/somewhere", strict, None).unwrap().is_none());
/// ```
pub fn match_path(
    pathname: &str,
    pattern: impl Into<PathPattern>,
    parent: Option<&Arc<PathMatch>>,
) -> Result<Option<Arc<PathMatch>>> {
    PatternCache::global().match_path(pathname, pattern, parent)
}

// ============================================================================
// Tests
// ============================================================================
