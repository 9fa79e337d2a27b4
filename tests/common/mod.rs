//! Test utilities for matcher tests
//!
//! Provides fixtures and assertion helpers shared by the integration tests.

#![allow(dead_code)]

use route_match::*;
use std::sync::Arc;

/// Route test logs through `env_logger`; honours `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Match against a fresh cache and unwrap the `Result`.
pub fn match_fresh(pathname: &str, pattern: impl Into<PathPattern>) -> Option<Arc<PathMatch>> {
    PatternCache::new()
        .match_path(pathname, pattern, None)
        .expect("matching should not fail")
}

/// `encodeURIComponent`-style encoding for building test paths.
pub fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build a parent match by hand.
pub fn parent_match(path: &str, url: &str, pairs: &[(&str, &str)]) -> Arc<PathMatch> {
    Arc::new(PathMatch {
        path: path.to_string(),
        url: url.to_string(),
        is_exact: true,
        params: pairs.iter().copied().collect(),
    })
}

/// Assert that route parameters contain expected key-value pair
pub fn assert_param_equals(params: &RouteParams, key: &str, expected: &str) {
    let value = params.get(key);
    assert!(
        value.is_some(),
        "Parameter '{}' not found in RouteParams",
        key
    );
    assert_eq!(
        value.unwrap(),
        expected,
        "Parameter '{}' has wrong value",
        key
    );
}

/// Assert that route parameters do NOT contain a key
pub fn assert_param_not_present(params: &RouteParams, key: &str) {
    assert!(
        params.get(key).is_none(),
        "Parameter '{}' should not be present",
        key
    );
}
