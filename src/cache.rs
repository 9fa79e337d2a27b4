//! Compilation cache.
//!
//! This module provides [`PatternCache`] — a shared, append-only store of
//! [`CompiledMatcher`]s so that matching the same route pattern on every
//! render pass compiles it only once.
//!
//! Entries are stored in two levels:
//!
//! - **Flag level** — a [`CacheKey`] holding the `exact` and `strict` flags as
//!   two separate fields, so `(true, false)` and `(false, true)` can never
//!   alias.
//! - **Pattern level** — the literal pattern text, mapping to a short list of
//!   `(sensitive, matcher)` pairs scanned linearly (at most two in practice).
//!
//! Lookups for the same pattern and flags return the *same* `Arc`, so
//! callers can use [`Arc::ptr_eq`] as a cheap "nothing changed" check. There
//! is no eviction and no clear: patterns come from route declarations, not
//! from request data.
//!
//! [`CacheStats`] tracks hits, misses and compilations.
//!
//! # Examples
//!
//! ```
//! use route_match::cache::PatternCache;
//! use route_match::compiler::CompileFlags;
//! use std::sync::Arc;
//!
//! let cache = PatternCache::new();
//! let first = cache.get_or_compile("/users/:id", CompileFlags::default()).unwrap();
//! let second = cache.get_or_compile("/users/:id", CompileFlags::default()).unwrap();
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().compilations, 1);
//! ```

use crate::compiler::{CompileFlags, CompiledMatcher};
use crate::error::Result;
use crate::{debug_log, trace_log};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Outer cache dimension: the flags that change the recognizer's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub exact: bool,
    pub strict: bool,
}

impl From<CompileFlags> for CacheKey {
    fn from(flags: CompileFlags) -> Self {
        Self {
            exact: flags.exact,
            strict: flags.strict,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    sensitive: bool,
    matcher: Arc<CompiledMatcher>,
}

type PatternTable = HashMap<String, Vec<CacheEntry>>;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that found no entry.
    pub misses: usize,
    /// Matchers compiled and retained.
    pub compilations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicUsize,
    misses: AtomicUsize,
    compilations: AtomicUsize,
}

/// Thread-safe store of compiled matchers.
///
/// Reads take a shared lock; a miss compiles outside any lock and then
/// takes the write lock to publish. If another thread published the same
/// entry in the meantime, its matcher wins and the fresh one is dropped, so
/// each key converges on a single retained instance.
#[derive(Debug, Default)]
pub struct PatternCache {
    entries: RwLock<HashMap<CacheKey, PatternTable>>,
    counters: Counters,
}

static GLOBAL: OnceLock<PatternCache> = OnceLock::new();

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by [`match_path`](crate::match_path).
    pub fn global() -> &'static PatternCache {
        GLOBAL.get_or_init(PatternCache::new)
    }

    /// Return the matcher for `pattern` compiled with `flags`, compiling it
    /// on first use.
    ///
    /// Compile errors are returned to the caller and never cached.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        flags: CompileFlags,
    ) -> Result<Arc<CompiledMatcher>> {
        let key = CacheKey::from(flags);

        if let Some(matcher) = self.lookup(key, pattern, flags.sensitive) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            trace_log!("Pattern cache hit for '{}' ({:?})", pattern, flags);
            return Ok(matcher);
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        let compiled = Arc::new(CompiledMatcher::compile(pattern, flags)?);

        // Data is append-only, so a poisoned lock still holds valid entries
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let slot = entries
            .entry(key)
            .or_default()
            .entry(pattern.to_string())
            .or_default();

        if let Some(existing) = slot.iter().find(|e| e.sensitive == flags.sensitive) {
            trace_log!("Pattern '{}' was compiled concurrently, keeping first", pattern);
            return Ok(Arc::clone(&existing.matcher));
        }

        debug_log!(
            "Compiled pattern '{}' ({:?}) as {}",
            pattern,
            flags,
            compiled.source()
        );
        slot.push(CacheEntry {
            sensitive: flags.sensitive,
            matcher: Arc::clone(&compiled),
        });
        self.counters.compilations.fetch_add(1, Ordering::Relaxed);
        Ok(compiled)
    }

    fn lookup(
        &self,
        key: CacheKey,
        pattern: &str,
        sensitive: bool,
    ) -> Option<Arc<CompiledMatcher>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&key)?
            .get(pattern)?
            .iter()
            .find(|e| e.sensitive == sensitive)
            .map(|e| Arc::clone(&e.matcher))
    }

    /// Return a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            compilations: self.counters.compilations.load(Ordering::Relaxed),
        }
    }

    /// Return the number of retained matchers.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .values()
            .flat_map(|table| table.values())
            .map(Vec::len)
            .sum()
    }

    /// Return `true` if nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
