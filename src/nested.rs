//! Hierarchical matching.
//!
//! A route tree matches top-down: each level is matched with the parent's
//! match in hand. Two styles are supported:
//!
//! - **Absolute child patterns** (`/users/:id/posts`) are matched exactly like
//!   [`match_path`](crate::match_path).
//! - **Relative child patterns** (`posts/:postId`) are joined onto the
//!   parent's *pattern*, so the child can only match inside the parent's
//!   prefix and its params include the parent's.
//!
//! A child without a pattern (an index or layout route) inherits the parent
//! match itself.
//!
//! # Path Normalization
//!
//! Pattern joining uses [`normalize_path()`], which returns `Cow<str>` to
//! avoid allocating when a path is already normalized:
//!
//! 1. **Empty paths** are normalized to `"/"` (root)
//! 2. **Leading slashes** are ensured (`"dashboard"` → `"/dashboard"`)
//! 3. **Trailing slashes** are removed (except for root: `"/"`)
//! 4. **Root variations** (`"/"`, `"//"`, `""`) all normalize to `"/"`
//!
//! # Example
//!
//! ```
//! use route_match::{match_nested, match_path};
//!
//! let parent = match_path("/org/7/projects/3", "/org/:orgId", None).unwrap();
//! let child = match_nested("/org/7/projects/3", "projects/:projectId", parent.as_ref())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(child.path, "/org/:orgId/projects/:projectId");
//! assert_eq!(child.params.get("orgId").map(String::as_str), Some("7"));
//! assert_eq!(child.params.get("projectId").map(String::as_str), Some("3"));
//! ```

use crate::cache::PatternCache;
use crate::error::Result;
use crate::matching::PathMatch;
use crate::options::{MatchOptions, PathPattern};
use crate::trace_log;
use std::borrow::Cow;
use std::sync::Arc;

/// Strip leading and trailing slashes.
#[inline]
pub(crate) fn trim_slashes(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Normalize a path for consistent comparison
///
/// Ensures paths have a leading slash and no trailing slash (unless root).
/// Returns `Cow<str>` to avoid allocation when path is already normalized.
///
/// # Examples
///
/// ```
/// use route_match::normalize_path;
///
/// assert_eq!(normalize_path("/dashboard"), "/dashboard");
/// assert_eq!(normalize_path("dashboard"), "/dashboard");
/// assert_eq!(normalize_path("/dashboard/"), "/dashboard");
/// assert_eq!(normalize_path("/"), "/");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &'_ str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    if path == "/" {
        return Cow::Borrowed(path);
    }

    // Already normalized: has leading, no trailing
    if path.starts_with('/') && !path.ends_with('/') {
        return Cow::Borrowed(path);
    }

    let trimmed = trim_slashes(path);
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{trimmed}"))
    }
}

/// Join a child path onto a parent path with exactly one `/` between them.
///
/// ```
/// use route_match::join_paths;
///
/// assert_eq!(join_paths("/users/:id", "posts"), "/users/:id/posts");
/// assert_eq!(join_paths("/users/", "/posts/"), "/users/posts/");
/// assert_eq!(join_paths("/", "about"), "/about");
/// assert_eq!(join_paths("/users", ""), "/users");
/// ```
#[must_use]
pub fn join_paths(parent: &str, child: &str) -> String {
    let child = child.trim_start_matches('/');
    let parent = normalize_path(parent);
    if child.is_empty() {
        return parent.into_owned();
    }
    if parent == "/" {
        format!("/{child}")
    } else {
        format!("{parent}/{child}")
    }
}

/// Return `true` for a non-empty pattern that does not start with `/`.
pub fn is_relative(pattern: &str) -> bool {
    !pattern.is_empty() && !pattern.starts_with('/')
}

/// Resolve relative patterns in `options` against the parent's pattern.
///
/// With no parent, relative patterns are taken relative to the root.
fn resolve_options(options: &MatchOptions, parent: Option<&PathMatch>) -> MatchOptions {
    match options.pattern() {
        Some(pattern) if is_relative(pattern) => {
            let base = parent.map_or("/", |p| p.path.as_str());
            let resolved = join_paths(base, pattern);
            trace_log!("Resolved relative pattern '{}' to '{}'", pattern, resolved);
            options.clone().with_path(resolved)
        }
        _ => options.clone(),
    }
}

impl PatternCache {
    /// Match a child route against `pathname` given its parent's match.
    ///
    /// Same contract as [`PatternCache::match_path`], except relative
    /// patterns are resolved against `parent.path` first. A relative pattern
    /// under a `None` parent is resolved against the root.
    pub fn match_nested(
        &self,
        pathname: &str,
        pattern: impl Into<PathPattern>,
        parent: Option<&Arc<PathMatch>>,
    ) -> Result<Option<Arc<PathMatch>>> {
        let parent_match = parent.map(Arc::as_ref);
        let resolved = match pattern.into() {
            PathPattern::NoPattern => PathPattern::NoPattern,
            PathPattern::Single(options) => {
                PathPattern::Single(resolve_options(&options, parent_match))
            }
            PathPattern::Alternatives(list) => PathPattern::Alternatives(
                list.iter()
                    .map(|options| resolve_options(options, parent_match))
                    .collect(),
            ),
        };
        self.match_path(pathname, resolved, parent)
    }
}

/// Match a child route using the process-wide cache.
///
/// See [`PatternCache::match_nested`].
pub fn match_nested(
    pathname: &str,
    pattern: impl Into<PathPattern>,
    parent: Option<&Arc<PathMatch>>,
) -> Result<Option<Arc<PathMatch>>> {
    PatternCache::global().match_nested(pathname, pattern, parent)
}
