//! Cache of repacked textures keyed by source image identity.

use super::repack::{repack, RepackKind};
use super::TextureData;
use crate::error::Result;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

struct CacheEntry {
    // Weak so the cache never keeps a dropped image table alive. The weak
    // reference also keeps the allocation, and so the key address, reserved.
    source: Weak<TextureData>,
    output: Rc<TextureData>,
}

impl CacheEntry {
    fn is_live(&self) -> bool {
        self.source.strong_count() > 0
    }
}

/// Memoizes repacks across materials that share a source image.
///
/// Identity is the `Rc` allocation of the source, not its contents: two
/// separately decoded copies of the same file are repacked separately.
/// Entries whose source has been dropped are pruned on the next insert.
#[derive(Default)]
pub struct RepackCache {
    entries: HashMap<(usize, RepackKind), CacheEntry>,
    hits: usize,
    misses: usize,
}

impl RepackCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached repack of `source`, computing it on first use.
    pub fn get_or_repack(&mut self, source: &Rc<TextureData>, kind: RepackKind) -> Result<Rc<TextureData>> {
        let key = (Rc::as_ptr(source) as usize, kind);

        if let Some(entry) = self.entries.get(&key) {
            if entry.is_live() {
                self.hits += 1;
                log::debug!("Reusing {} repack of texture '{}'", kind.name_suffix(), source.name);
                return Ok(Rc::clone(&entry.output));
            }
        }

        let output = Rc::new(repack(source, kind)?);
        self.misses += 1;
        self.prune();
        self.entries.insert(
            key,
            CacheEntry {
                source: Rc::downgrade(source),
                output: Rc::clone(&output),
            },
        );
        Ok(output)
    }

    /// Drop entries whose source image no longer exists. Returns how many
    /// were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live());
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("Pruned {} stale repacks", removed);
        }
        removed
    }

    /// Number of cached repacks, including ones not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drop all cached repacks.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for RepackCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepackCache")
            .field("entries", &self.entries.len())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_source_and_kind_hits() {
        let mut cache = RepackCache::new();
        let source = Rc::new(TextureData::new(1, 1, vec![10, 200, 50, 255]));

        let first = cache.get_or_repack(&source, RepackKind::MetallicRoughness).unwrap();
        let second = cache.get_or_repack(&source, RepackKind::MetallicRoughness).unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_kinds_are_cached_separately() {
        let mut cache = RepackCache::new();
        let source = Rc::new(TextureData::new(1, 1, vec![10, 200, 50, 255]));

        let metal = cache.get_or_repack(&source, RepackKind::MetallicRoughness).unwrap();
        let occlusion = cache.get_or_repack(&source, RepackKind::Occlusion).unwrap();

        assert!(!Rc::ptr_eq(&metal, &occlusion));
        assert_eq!(occlusion.pixels().unwrap(), &[10, 10, 10, 255]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_equal_contents_different_identity_miss() {
        let mut cache = RepackCache::new();
        let a = Rc::new(TextureData::new(1, 1, vec![1, 2, 3, 4]));
        let b = Rc::new(TextureData::new(1, 1, vec![1, 2, 3, 4]));

        cache.get_or_repack(&a, RepackKind::Occlusion).unwrap();
        cache.get_or_repack(&b, RepackKind::Occlusion).unwrap();

        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_failed_repack_is_not_cached() {
        let mut cache = RepackCache::new();
        let gpu = Rc::new(TextureData::gpu_only("gpu", 2, 2));

        assert!(cache.get_or_repack(&gpu, RepackKind::Occlusion).is_err());
        assert!(cache.is_empty());

        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_dropped_source_is_released_and_pruned() {
        let mut cache = RepackCache::new();
        let source = Rc::new(TextureData::new(1, 1, vec![1, 2, 3, 4]));
        let weak_source = Rc::downgrade(&source);

        let output = cache.get_or_repack(&source, RepackKind::Occlusion).unwrap();
        let weak_output = Rc::downgrade(&output);
        drop(output);
        drop(source);

        assert!(weak_source.upgrade().is_none());
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.prune(), 1);
        assert!(cache.is_empty());
        assert!(weak_output.upgrade().is_none());
    }

    #[test]
    fn test_insert_prunes_stale_entries() {
        let mut cache = RepackCache::new();
        for value in 0..3u8 {
            let source = Rc::new(TextureData::new(1, 1, vec![value; 4]));
            cache.get_or_repack(&source, RepackKind::Occlusion).unwrap();
        }

        // Each insert drops the entries left behind by earlier sources.
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.misses(), 3);
    }
}
