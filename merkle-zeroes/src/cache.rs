//! Memoized level-default tables
//!
//! Tables are pure functions of `(primitive, empty leaf, depth)` and a
//! shallower table is a prefix of a deeper one, so only the deepest table per
//! `(primitive, empty leaf)` is kept.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use crate::{
    defaults::{LevelDefaults, compute_empty_tree_defaults_from, validate_depth},
    digest::Digest,
    error::Result,
    hasher::HashPrimitive,
};

type CacheKey = (HashPrimitive, Digest);

/// Thread-safe cache of level-default tables
#[derive(Debug, Default)]
pub struct DefaultsCache {
    tables: RwLock<HashMap<CacheKey, Arc<LevelDefaults>>>,
}

impl DefaultsCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache
    pub fn global() -> &'static DefaultsCache {
        static GLOBAL: OnceLock<DefaultsCache> = OnceLock::new();
        GLOBAL.get_or_init(DefaultsCache::new)
    }

    /// Defaults for `depth`, computing and caching them on a miss
    pub fn get(
        &self,
        primitive: HashPrimitive,
        empty_leaf: Digest,
        depth: usize,
    ) -> Result<LevelDefaults> {
        validate_depth(depth)?;
        let key = (primitive, empty_leaf);

        // Entries are never mutated in place, so a poisoned lock still holds
        // consistent tables
        let cached = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(table) = cached
            && table.depth() >= depth
        {
            log::trace!("defaults cache hit: {primitive}, depth {depth}");
            return table.truncated(depth);
        }

        let computed = Arc::new(compute_empty_tree_defaults_from(
            &primitive, depth, empty_leaf,
        )?);

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let entry = tables.entry(key).or_insert_with(|| Arc::clone(&computed));
        if entry.depth() < computed.depth() {
            *entry = Arc::clone(&computed);
        }
        Ok(computed.as_ref().clone())
    }

    /// Number of `(primitive, empty leaf)` pairs cached
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached table
    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        defaults::{MAX_DEPTH, compute_empty_tree_defaults},
        digest::ZERO_DIGEST,
        error::Error,
    };

    #[test]
    fn cached_tables_equal_direct_computation() {
        let cache = DefaultsCache::new();
        for depth in [6, 2, 9, 9, 1] {
            let cached = cache
                .get(HashPrimitive::Poseidon2, ZERO_DIGEST, depth)
                .expect("cached");
            let direct =
                compute_empty_tree_defaults(&HashPrimitive::Poseidon2, depth).expect("direct");
            assert_eq!(cached, direct);
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_separate_primitives_and_leaves() {
        let cache = DefaultsCache::new();
        assert!(cache.is_empty());

        let p2 = cache
            .get(HashPrimitive::Poseidon2, ZERO_DIGEST, 3)
            .expect("poseidon2");
        let circom = cache
            .get(HashPrimitive::CircomPoseidon, ZERO_DIGEST, 3)
            .expect("circom");
        let leaf = cache
            .get(HashPrimitive::Poseidon2, Digest::from_u64(1), 3)
            .expect("custom leaf");

        assert_ne!(p2.root(), circom.root());
        assert_ne!(p2.root(), leaf.root());
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn invalid_depths_are_not_cached() {
        let cache = DefaultsCache::new();
        assert!(matches!(
            cache.get(HashPrimitive::Poseidon2, ZERO_DIGEST, 0),
            Err(Error::InvalidDepth { .. })
        ));
        assert!(matches!(
            cache.get(HashPrimitive::Poseidon2, ZERO_DIGEST, MAX_DEPTH + 1),
            Err(Error::InvalidDepth { .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(DefaultsCache::new());
        let handles: Vec<_> = (1..=4)
            .map(|depth| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache
                        .get(HashPrimitive::Poseidon2, ZERO_DIGEST, depth)
                        .expect("defaults")
                })
            })
            .collect();

        let deepest = cache
            .get(HashPrimitive::Poseidon2, ZERO_DIGEST, 4)
            .expect("defaults");
        for handle in handles {
            let table = handle.join().expect("thread");
            assert_eq!(
                deepest.truncated(table.depth()).expect("prefix"),
                table
            );
        }
    }
}
