//! Matching options and pattern input normalization.
//!
//! Callers can describe what to match in several shapes: a bare pattern
//! string, a [`MatchOptions`] with flags, a list of alternatives, or nothing
//! at all. All of them convert into [`PathPattern`], which the evaluator
//! resolves once at its entry point:
//!
//! - [`PathPattern::NoPattern`] — inherit the parent match unconditionally
//! - [`PathPattern::Single`] — one pattern with its flags
//! - [`PathPattern::Alternatives`] — patterns tried in order, first match wins
//!
//! # Examples
//!
//! ```
//! use route_match::{MatchOptions, PathPattern};
//!
//! let single: PathPattern = "/users/:id".into();
//! assert!(matches!(single, PathPattern::Single(_)));
//!
//! let none: PathPattern = MatchOptions::default().into();
//! assert_eq!(none, PathPattern::NoPattern);
//!
//! let any_of = MatchOptions::default().exact(true).any_of(["/home", "/"]);
//! assert_eq!(any_of.len(), 2);
//! ```

use crate::compiler::CompileFlags;

/// Options for matching one pattern.
///
/// `Default` has no pattern and every flag off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    /// Pattern text; `None` or empty means "no pattern"
    pub path: Option<String>,
    /// Path must match to its end, not just as a prefix
    pub exact: bool,
    /// A trailing `/` in the pattern must also be present in the path
    pub strict: bool,
    /// Compare case-sensitively
    pub sensitive: bool,
}

impl MatchOptions {
    /// Create options for `path` with all flags off.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Set the `exact` flag.
    pub fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Set the `strict` flag.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the `sensitive` flag.
    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// Replace the pattern, keeping the flags.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Pattern text, or `None` when there is nothing to match against.
    pub fn pattern(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Build alternatives sharing these flags, one per pattern.
    pub fn any_of<I, S>(&self, paths: I) -> PathPattern
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PathPattern::Alternatives(
            paths
                .into_iter()
                .map(|path| self.clone().with_path(path))
                .collect(),
        )
    }

    pub(crate) const fn flags(&self) -> CompileFlags {
        CompileFlags {
            exact: self.exact,
            strict: self.strict,
            sensitive: self.sensitive,
        }
    }
}

impl From<&str> for MatchOptions {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for MatchOptions {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Normalized description of what to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PathPattern {
    /// No pattern: the parent match is passed through as-is
    #[default]
    NoPattern,
    /// A single pattern
    Single(MatchOptions),
    /// Ordered alternatives; the first one that matches wins
    Alternatives(Vec<MatchOptions>),
}

impl PathPattern {
    /// Number of patterns this input will try.
    pub fn len(&self) -> usize {
        match self {
            PathPattern::NoPattern => 0,
            PathPattern::Single(_) => 1,
            PathPattern::Alternatives(list) => list.len(),
        }
    }

    /// Return `true` for [`PathPattern::NoPattern`] and empty alternatives.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the options that will be tried, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchOptions> {
        match self {
            PathPattern::NoPattern => <&[MatchOptions]>::default().iter(),
            PathPattern::Single(options) => std::slice::from_ref(options).iter(),
            PathPattern::Alternatives(list) => list.iter(),
        }
    }
}

impl From<MatchOptions> for PathPattern {
    fn from(options: MatchOptions) -> Self {
        if options.pattern().is_none() {
            PathPattern::NoPattern
        } else {
            PathPattern::Single(options)
        }
    }
}

impl From<&MatchOptions> for PathPattern {
    fn from(options: &MatchOptions) -> Self {
        options.clone().into()
    }
}

impl From<&str> for PathPattern {
    fn from(path: &str) -> Self {
        MatchOptions::new(path).into()
    }
}

impl From<String> for PathPattern {
    fn from(path: String) -> Self {
        MatchOptions::new(path).into()
    }
}

impl From<&String> for PathPattern {
    fn from(path: &String) -> Self {
        path.as_str().into()
    }
}

impl<T: Into<MatchOptions>> From<Vec<T>> for PathPattern {
    fn from(list: Vec<T>) -> Self {
        PathPattern::Alternatives(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MatchOptions>, const N: usize> From<[T; N]> for PathPattern {
    fn from(list: [T; N]) -> Self {
        PathPattern::Alternatives(list.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathPattern>> From<Option<T>> for PathPattern {
    fn from(value: Option<T>) -> Self {
        value.map_or(PathPattern::NoPattern, Into::into)
    }
}
