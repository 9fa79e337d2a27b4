//! # route-match
//!
//! Path-pattern matching for nested routers.
//!
//! Given a URL path and a declarative route pattern such as
//! `/users/:id/files/:path*`, decide whether the path matches and, if it
//! does, extract decoded parameters plus the matched prefix. Patterns are
//! compiled to anchored recognizers once per distinct
//! `(pattern, exact, strict, sensitive)` combination and kept in a shared
//! cache for the life of the process.
//!
//! ## Quick start
//!
//! ```
//! use route_match::{match_path, MatchOptions};
//!
//! // Prefix match: `/users/:id` matches the start of a longer path
//! let m = match_path("/users/42/settings", "/users/:id", None).unwrap().unwrap();
//! assert_eq!(m.url, "/users/42");
//! assert!(!m.is_exact);
//! assert_eq!(m.params.get_as::<u32>("id"), Some(42));
//!
//! // Exact match required
//! let exact = MatchOptions::new("/users/:id").exact(true);
//! assert!(match_path("/users/42/settings", exact, None).unwrap().is_none());
//!
//! // Alternatives, first match wins
//! let m = match_path("/about", vec!["/home", "/about"], None).unwrap().unwrap();
//! assert_eq!(m.path, "/about");
//! ```
//!
//! ## Pattern syntax
//!
//! | Token      | Matches                                     |
//! |------------|---------------------------------------------|
//! | `/:id`     | one segment                                 |
//! | `/:id?`    | zero or one segment (absent param when not) |
//! | `/:path+`  | one or more segments, kept joined with `/`  |
//! | `/:path*`  | zero or more segments                       |
//! | `/:id(\d+)`| one segment matching a custom expression    |
//! | `/*`       | anything, captured as param `"0"`           |
//!
//! See [`pattern`] for the full grammar.
//!
//! ## Modules
//!
//! - [`pattern`] — token grammar parser
//! - [`compiler`] — pattern + flags → [`CompiledMatcher`]
//! - [`cache`] — shared [`PatternCache`]
//! - [`options`] — [`MatchOptions`] and the normalized [`PathPattern`] input
//! - [`matching`] — the evaluator and the [`PathMatch`] record
//! - [`nested`] — hierarchical (parent/child) matching helpers
//! - [`params`] — [`RouteParams`] and percent-decoding
//! - [`error`] — [`MatchError`]
//!
//! ## Feature flags
//!
//! | Feature   | Default | Description                   |
//! |-----------|---------|-------------------------------|
//! | `log`     | yes     | Log through the `log` crate   |
//! | `tracing` | no      | Log through the `tracing` crate |

pub mod cache;
pub mod compiler;
pub mod error;
pub mod logging;
pub mod matching;
pub mod nested;
pub mod options;
pub mod params;
pub mod pattern;

pub use cache::{CacheKey, CacheStats, PatternCache};
pub use compiler::{CompileFlags, CompiledMatcher, ParamKey};
pub use error::{MatchError, Result};
pub use matching::{match_path, PathMatch};
pub use nested::{is_relative, join_paths, match_nested, normalize_path};
pub use options::{MatchOptions, PathPattern};
pub use params::{decode_param, RouteParams};
pub use pattern::CaptureKind;
