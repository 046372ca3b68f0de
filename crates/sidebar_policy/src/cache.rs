//! Explicit cache of compiled allow-lists.
//!
//! Entries are keyed by the literal, sorted allow-list contents, so two
//! snapshots share an entry only when their allow-lists are identical. The
//! cache is populated on demand and only emptied by [`PermissionCache::clear`].

use crate::matcher::CompiledAllowList;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock, RwLock};
use tracing::debug;

/// Default number of distinct allow-lists retained.
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 1024;

/// Separator between allow entries in a cache key. Slugs never contain it.
const KEY_SEPARATOR: char = '\u{1f}';

static GLOBAL_CACHE: OnceLock<PermissionCache> = OnceLock::new();

/// Memoization table from allow-list contents to [`CompiledAllowList`].
pub struct PermissionCache {
    entries: RwLock<HashMap<String, Arc<CompiledAllowList>>>,
    max_entries: usize,
}

impl PermissionCache {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_CACHE_ENTRIES)
    }

    /// Once `max_entries` allow-lists are held, further ones are compiled but
    /// not retained.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// The process-wide instance.
    pub fn global() -> &'static PermissionCache {
        GLOBAL_CACHE.get_or_init(PermissionCache::new)
    }

    /// Compiled form of `allow`, from the cache when present.
    pub fn compiled(&self, allow: &BTreeSet<String>) -> Arc<CompiledAllowList> {
        let key = cache_key(allow);

        if let Ok(entries) = self.entries.read() {
            if let Some(hit) = entries.get(&key) {
                return Arc::clone(hit);
            }
        }

        let compiled = Arc::new(CompiledAllowList::compile(allow.iter().map(String::as_str)));

        // A poisoned lock only costs us the memoization.
        if let Ok(mut entries) = self.entries.write() {
            if let Some(existing) = entries.get(&key) {
                return Arc::clone(existing);
            }
            if entries.len() < self.max_entries {
                entries.insert(key, Arc::clone(&compiled));
            } else {
                debug!(
                    max_entries = self.max_entries,
                    "permission cache full; allow-list compiled without caching"
                );
            }
        }

        compiled
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            let dropped = entries.len();
            entries.clear();
            debug!(dropped, "permission cache cleared");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for PermissionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PermissionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionCache")
            .field("len", &self.len())
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

/// Clear the process-wide cache. Tests call this between cases.
pub fn clear_permission_cache() {
    PermissionCache::global().clear();
}

fn cache_key(allow: &BTreeSet<String>) -> String {
    let mut key = String::with_capacity(allow.iter().map(|s| s.len() + 1).sum());
    for entry in allow {
        key.push_str(entry);
        key.push(KEY_SEPARATOR);
    }
    key
}
