//! Compilation cache: identity, key distinctness and concurrent access.

mod common;

use route_match::*;
use std::sync::Arc;
use std::thread;

fn flags(exact: bool, strict: bool, sensitive: bool) -> CompileFlags {
    CompileFlags {
        exact,
        strict,
        sensitive,
    }
}

#[test]
fn test_same_inputs_same_instance() {
    let cache = PatternCache::new();
    let a = cache.get_or_compile("/users/:id", flags(true, false, false)).unwrap();
    let b = cache.get_or_compile("/users/:id", flags(true, false, false)).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_all_flag_combinations_are_distinct() {
    let cache = PatternCache::new();
    let mut matchers = Vec::new();
    for exact in [false, true] {
        for strict in [false, true] {
            for sensitive in [false, true] {
                let m = cache
                    .get_or_compile("/one/two/", flags(exact, strict, sensitive))
                    .unwrap();
                assert_eq!(m.flags(), flags(exact, strict, sensitive));
                matchers.push(m);
            }
        }
    }
    assert_eq!(cache.len(), 8);
    for (i, a) in matchers.iter().enumerate() {
        for b in &matchers[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn test_exact_strict_pairs_behave_differently() {
    let cache = PatternCache::new();
    let true_false = cache.get_or_compile("/one/two/", flags(true, false, false)).unwrap();
    let false_true = cache.get_or_compile("/one/two/", flags(false, true, false)).unwrap();

    assert!(true_false.is_match("/one/two").unwrap());
    assert!(!false_true.is_match("/one/two").unwrap());
}

#[test]
fn test_cache_key_fields() {
    let a = CacheKey::from(flags(true, false, true));
    let b = CacheKey::from(flags(false, true, true));
    assert_ne!(a, b);
    assert_eq!(a, CacheKey::from(flags(true, false, false)));
}

#[test]
fn test_syntax_error_surfaces_through_cache() {
    let cache = PatternCache::new();
    let err = cache.get_or_compile("/a/:", CompileFlags::default()).unwrap_err();
    assert!(err.is_syntax());
    // A corrected pattern is a different key and compiles fine
    assert!(cache.get_or_compile("/a/:b", CompileFlags::default()).is_ok());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_stats_track_evaluator_calls() {
    let cache = PatternCache::new();
    for _ in 0..5 {
        cache.match_path("/a/1", "/a/:id", None).unwrap();
    }
    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 4);
    assert_eq!(stats.compilations, 1);
    assert!((stats.hit_rate() - 0.8).abs() < 0.001);
}

#[test]
fn test_concurrent_lookups_converge() {
    common::init_logging();
    let cache = Arc::new(PatternCache::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                (0..50)
                    .map(|_| {
                        cache
                            .get_or_compile("/shared/:id/:rest*", CompileFlags::default())
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Arc<CompiledMatcher>> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.stats().compilations, 1);
    let retained = cache
        .get_or_compile("/shared/:id/:rest*", CompileFlags::default())
        .unwrap();
    // Losers of a compile race hand back the published instance
    assert!(results.iter().all(|m| Arc::ptr_eq(m, &retained)));
}

#[test]
fn test_concurrent_matching_through_global_cache() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let pathname = format!("/thread/{i}/item");
                match_path(&pathname, "/thread/:n", None)
                    .unwrap()
                    .map(|m| m.params.get_as::<usize>("n"))
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(Some(i)));
    }
}
