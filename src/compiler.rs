//! Pattern compiler.
//!
//! Turns a parsed pattern plus its [`CompileFlags`] into a
//! [`CompiledMatcher`]: an anchored regular expression with one capture group
//! per parameter, and the ordered list of parameter keys those groups map to.
//!
//! # Design
//!
//! - Recognizers are always anchored at the start of the path.
//! - Non-strict patterns accept one trailing `/` whatever the pattern ends with.
//! - Exact patterns must consume the whole path; prefix patterns must stop at
//!   a `/` or at the end, so `/api` never matches `/apiextra`.
//! - Case-insensitive unless `sensitive` is set (Unicode-aware folding).
//!
//! ```
//! use route_match::compiler::{CompileFlags, CompiledMatcher};
//!
//! let matcher = CompiledMatcher::compile("/users/:id", CompileFlags::default()).unwrap();
//! let raw = matcher.exec("/Users/42/posts").unwrap().unwrap();
//! assert_eq!(raw.matched, "/Users/42");
//! assert_eq!(raw.captures, vec![Some("42")]);
//! ```

use crate::error::{MatchError, Result};
use crate::warn_log;
use crate::pattern::{self, escape_literal, CaptureKind, Token};
use fancy_regex::Regex;

/// Flags a matcher is compiled with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompileFlags {
    /// Path must be consumed to its end
    pub exact: bool,
    /// Trailing `/` of the pattern is significant
    pub strict: bool,
    /// Case-sensitive comparison
    pub sensitive: bool,
}

/// Name and capture kind of one parameter, in capture-group order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamKey {
    pub name: String,
    pub kind: CaptureKind,
}

/// Result of running a recognizer: the matched prefix and raw captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'t> {
    /// Prefix of the input consumed by the recognizer
    pub matched: &'t str,
    /// One entry per [`ParamKey`]; `None` when the group did not participate
    pub captures: Vec<Option<&'t str>>,
}

/// Executable recognizer for one `(pattern, flags)` combination.
#[derive(Debug)]
pub struct CompiledMatcher {
    pattern: String,
    flags: CompileFlags,
    regex: Regex,
    keys: Vec<ParamKey>,
}

impl CompiledMatcher {
    /// Compile `pattern` with the given flags.
    ///
    /// Fails with [`MatchError::PatternSyntax`] if the pattern is malformed,
    /// including custom groups the regex engine rejects.
    pub fn compile(pattern: &str, flags: CompileFlags) -> Result<Self> {
        let tokens = pattern::parse(pattern)?;
        let mut route = String::new();
        let mut keys = Vec::new();

        for token in tokens {
            match token {
                Token::Literal(text) => route.push_str(&escape_literal(&text)),
                Token::Param(param) => {
                    let prefix = param
                        .prefix
                        .map(|c| escape_literal(&c.to_string()))
                        .unwrap_or_default();
                    let mut capture = format!("(?:{})", param.pattern);
                    if param.kind.is_repeating() {
                        capture = format!("{capture}(?:{prefix}{capture})*");
                    }
                    let segment = match (param.kind.is_optional(), param.partial) {
                        (false, _) => format!("{prefix}({capture})"),
                        (true, true) => format!("{prefix}({capture})?"),
                        (true, false) => format!("(?:{prefix}({capture}))?"),
                    };
                    route.push_str(&segment);
                    keys.push(ParamKey {
                        name: param.name,
                        kind: param.kind,
                    });
                }
            }
        }

        // No lookaround here: without it fancy-regex hands the whole
        // expression to the linear-time `regex` engine. The `/`-or-end
        // boundary is consumed outside group 1, which holds the url.
        let ends_with_delimiter = route.ends_with('/');
        if !flags.strict {
            if ends_with_delimiter {
                route.pop();
            }
            route.push_str("(?:/$)?");
        }
        let boundary = if flags.exact {
            "$"
        } else if flags.strict && ends_with_delimiter {
            ""
        } else {
            "(?:/|$)"
        };

        let case = if flags.sensitive { "" } else { "(?i)" };
        let source = format!("{case}^({route}){boundary}");
        let regex = Regex::new(&source)
            .map_err(|err| MatchError::syntax(pattern, 0, format!("invalid recognizer: {err}")))?;

        // Custom patterns may hide capturing groups the parser can't see,
        // e.g. `(?<x>...)`; they would shift every capture after them.
        if regex.captures_len() != keys.len() + 2 {
            return Err(MatchError::syntax(
                pattern,
                0,
                "capturing groups are not allowed",
            ));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            flags,
            regex,
            keys,
        })
    }

    /// Run the recognizer against `path`.
    ///
    /// Returns `Ok(None)` when the path does not match.
    pub fn exec<'t>(&self, path: &'t str) -> Result<Option<RawMatch<'t>>> {
        let caps = match self.regex.captures(path) {
            Ok(Some(caps)) => caps,
            Ok(None) => return Ok(None),
            Err(err) => return self.exhausted(path, err).map(|_| None),
        };
        let matched = caps.get(1).map_or("", |m| m.as_str());
        let captures = (2..self.keys.len() + 2)
            .map(|i| caps.get(i).map(|m| m.as_str()))
            .collect();
        Ok(Some(RawMatch { matched, captures }))
    }

    /// Test whether `path` matches, without extracting captures.
    pub fn is_match(&self, path: &str) -> Result<bool> {
        match self.regex.is_match(path) {
            Ok(found) => Ok(found),
            Err(err) => self.exhausted(path, err).map(|_| false),
        }
    }

    /// Custom groups using lookaround or backreferences run on the
    /// backtracking VM; running out of budget there is a no-match.
    fn exhausted(&self, path: &str, err: fancy_regex::Error) -> Result<()> {
        match err {
            fancy_regex::Error::RuntimeError(reason) => {
                warn_log!("pattern '{}' gave up on '{}': {}", self.pattern, path, reason);
                Ok(())
            }
            other => Err(other.into()),
        }
    }

    /// Pattern text this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub const fn flags(&self) -> CompileFlags {
        self.flags
    }

    /// Parameter keys, in capture order.
    pub fn keys(&self) -> &[ParamKey] {
        &self.keys
    }

    /// Generated regular expression source.
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str, exact: bool, strict: bool) -> CompiledMatcher {
        CompiledMatcher::compile(
            pattern,
            CompileFlags {
                exact,
                strict,
                sensitive: false,
            },
        )
        .unwrap()
    }

    fn matched<'t>(matcher: &CompiledMatcher, path: &'t str) -> Option<&'t str> {
        matcher.exec(path).unwrap().map(|raw| raw.matched)
    }

    #[test]
    fn test_prefix_match_stops_at_separator() {
        let matcher = compile("/api", false, false);
        assert_eq!(matched(&matcher, "/api"), Some("/api"));
        assert_eq!(matched(&matcher, "/api/users"), Some("/api"));
        assert_eq!(matched(&matcher, "/api/"), Some("/api/"));
        assert_eq!(matched(&matcher, "/apiextra"), None);
    }

    #[test]
    fn test_exact_match() {
        let matcher = compile("/api", true, false);
        assert_eq!(matched(&matcher, "/api"), Some("/api"));
        assert_eq!(matched(&matcher, "/api/"), Some("/api/"));
        assert_eq!(matched(&matcher, "/api/users"), None);
    }

    #[test]
    fn test_strict_trailing_slash() {
        let strict = compile("/api/", true, true);
        assert_eq!(matched(&strict, "/api/"), Some("/api/"));
        assert_eq!(matched(&strict, "/api"), None);

        let loose = compile("/api/", true, false);
        assert_eq!(matched(&loose, "/api"), Some("/api"));
        assert_eq!(matched(&loose, "/api/"), Some("/api/"));

        let strict_no_slash = compile("/api", true, true);
        assert_eq!(matched(&strict_no_slash, "/api/"), None);
    }

    #[test]
    fn test_root_pattern() {
        let matcher = compile("/", false, false);
        assert_eq!(matched(&matcher, "/"), Some("/"));
        assert_eq!(matched(&matcher, "/somewhere/else"), Some(""));
    }

    #[test]
    fn test_case_folding() {
        let insensitive = compile("/SomeWhere", false, false);
        assert_eq!(matched(&insensitive, "/somewhere"), Some("/somewhere"));

        let sensitive = CompiledMatcher::compile(
            "/SomeWhere",
            CompileFlags {
                sensitive: true,
                ..CompileFlags::default()
            },
        )
        .unwrap();
        assert!(!sensitive.is_match("/somewhere").unwrap());
        assert!(sensitive.is_match("/SomeWhere").unwrap());
    }

    #[test]
    fn test_unicode_case_folding() {
        let matcher = compile("/ÅSA", true, false);
        assert!(matcher.is_match("/åsa").unwrap());
    }

    #[test]
    fn test_repeating_capture_keeps_separators() {
        let matcher = compile("/a/:first/b/:second+/c", false, false);
        let raw = matcher.exec("/a/x/b/y/z/c").unwrap().unwrap();
        assert_eq!(raw.matched, "/a/x/b/y/z/c");
        assert_eq!(raw.captures, vec![Some("x"), Some("y/z")]);
    }

    #[test]
    fn test_optional_captures_absent() {
        let optional = compile("/a/:first?", false, false);
        let raw = optional.exec("/a").unwrap().unwrap();
        assert_eq!(raw.captures, vec![None]);

        let zero_or_more = compile("/a/:first*", false, false);
        let raw = zero_or_more.exec("/a").unwrap().unwrap();
        assert_eq!(raw.captures, vec![None]);
        let raw = zero_or_more.exec("/a/b/c").unwrap().unwrap();
        assert_eq!(raw.captures, vec![Some("b/c")]);
    }

    #[test]
    fn test_custom_and_unnamed_patterns() {
        let matcher = compile("/users/:id(\\d+)", true, false);
        assert!(matcher.is_match("/users/42").unwrap());
        assert!(!matcher.is_match("/users/abc").unwrap());

        let matcher = compile("/files/*", false, false);
        let raw = matcher.exec("/files/a/b.txt").unwrap().unwrap();
        assert_eq!(raw.captures, vec![Some("a/b.txt")]);
        assert_eq!(matcher.keys()[0].name, "0");
    }

    #[test]
    fn test_partial_tokens() {
        let matcher = compile("/:from-:to", true, false);
        let raw = matcher.exec("/a-b").unwrap().unwrap();
        assert_eq!(raw.captures, vec![Some("a"), Some("b")]);

        let matcher = compile("/file.:ext?", true, false);
        assert_eq!(
            matcher.exec("/file.json").unwrap().unwrap().captures,
            vec![Some("json")]
        );
        assert_eq!(matcher.exec("/file").unwrap().unwrap().captures, vec![None]);
    }

    #[test]
    fn test_keys_in_capture_order() {
        let matcher = compile("/:a/:b?/:c*", false, false);
        let keys: Vec<(&str, CaptureKind)> = matcher
            .keys()
            .iter()
            .map(|k| (k.name.as_str(), k.kind))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a", CaptureKind::Required),
                ("b", CaptureKind::Optional),
                ("c", CaptureKind::ZeroOrMore),
            ]
        );
    }

    #[test]
    fn test_generated_recognizer_has_no_lookaround() {
        for (exact, strict) in [(false, false), (true, false), (false, true), (true, true)] {
            let matcher = compile("/a/:b*/c/", exact, strict);
            assert!(!matcher.source().contains("(?="), "{}", matcher.source());
        }
    }

    #[test]
    fn test_long_miss_with_repeating_params() {
        let matcher = compile("/:a*/:b*/:c*/:d*/end", false, false);
        let segments: Vec<String> = (0..60).map(|i| format!("s{i}")).collect();
        let path = format!("/{}/nope", segments.join("/"));
        assert_eq!(matcher.exec(&path).unwrap(), None);
        assert!(!matcher.is_match(&path).unwrap());
    }

    #[test]
    fn test_syntax_errors_surface() {
        let err = CompiledMatcher::compile("/users/:", CompileFlags::default()).unwrap_err();
        assert!(err.is_syntax());

        let err = CompiledMatcher::compile("/:id(?<n>\\d+)", CompileFlags::default());
        assert!(err.is_err());

        let err = CompiledMatcher::compile("/:id([a-)", CompileFlags::default()).unwrap_err();
        assert!(err.is_syntax());
    }
}
