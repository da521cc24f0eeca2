// Per-site directive instance cache
//
// Provides:
// - One instance per live binding site, keyed by site identity
// - Atomic miss-then-insert, safe under nested renders
// - Weak site references with opportunistic sweeping
// - Explicit eviction for engines that signal site teardown

use crate::directive::Directive;
use dovetail_core::{translate, BindError, BindingSite, BoundPart, SiteHandle, SiteKey};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Tuning knobs for the per-thread instance cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Sweep dead entries after this many insertions; `0` disables sweeping.
    pub sweep_every: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { sweep_every: 64 }
    }
}

struct CacheEntry {
    site: Weak<dyn BindingSite>,
    part: Rc<BoundPart>,
    instance: Rc<dyn Any>,
}

struct InstanceCache {
    entries: HashMap<SiteKey, CacheEntry>,
    config: CacheConfig,
    inserts: usize,
}

impl InstanceCache {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            config: CacheConfig::default(),
            inserts: 0,
        }
    }

    fn fetch_or_insert<D: Directive>(
        &mut self,
        site: &SiteHandle,
    ) -> Result<(Rc<BoundPart>, Rc<RefCell<D>>), BindError> {
        let key = SiteKey::of(site);
        if let Some(entry) = self.entries.get(&key) {
            // A live entry at this key is necessarily this site: the weak
            // reference pins the allocation, so the address cannot be reused
            // while the entry exists.
            if entry.site.upgrade().is_some() {
                if let Ok(instance) = Rc::clone(&entry.instance).downcast::<RefCell<D>>() {
                    return Ok((Rc::clone(&entry.part), instance));
                }
                trace!(?key, "directive type changed at site, rebuilding entry");
            }
        }

        // Translation and construction happen before the insert; a failure
        // leaves no entry behind.
        let part = Rc::new(translate(site)?);
        let instance = Rc::new(RefCell::new(D::bind(&part.info())?));
        trace!(?key, kind = %part.kind(), "bound new directive instance");
        self.entries.insert(
            key,
            CacheEntry {
                site: Rc::downgrade(site),
                part: Rc::clone(&part),
                instance: Rc::clone(&instance) as Rc<dyn Any>,
            },
        );
        self.inserts += 1;
        if self.config.sweep_every > 0 && self.inserts % self.config.sweep_every == 0 {
            self.sweep();
        }
        Ok((part, instance))
    }

    fn sweep(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.site.strong_count() > 0);
        let swept = before - self.entries.len();
        if swept > 0 {
            debug!(swept, retained = self.entries.len(), "swept entries for dropped sites");
        }
    }
}

thread_local! {
    static CACHE: RefCell<InstanceCache> = RefCell::new(InstanceCache::new());
}

// The whole lookup runs inside one borrow of the cache, so a nested render
// reaching the same site afterwards sees the entry already in place and
// cannot construct a second instance.
pub(crate) fn fetch_or_insert<D: Directive>(
    site: &SiteHandle,
) -> Result<(Rc<BoundPart>, Rc<RefCell<D>>), BindError> {
    CACHE.with(|cache| cache.borrow_mut().fetch_or_insert::<D>(site))
}

/// Replace the cache configuration for this thread.
pub fn configure(config: CacheConfig) {
    CACHE.with(|cache| cache.borrow_mut().config = config);
}

/// Drop the entry for one site. Returns whether an entry existed.
pub fn evict(key: SiteKey) -> bool {
    CACHE.with(|cache| cache.borrow_mut().entries.remove(&key).is_some())
}

/// Drop every entry on this thread.
pub fn clear() {
    CACHE.with(|cache| cache.borrow_mut().entries.clear());
}

/// Number of entries on this thread, dead ones included until swept.
#[must_use]
pub fn len() -> usize {
    CACHE.with(|cache| cache.borrow().entries.len())
}

/// Whether an entry exists for the given site key.
#[must_use]
pub fn contains(key: SiteKey) -> bool {
    CACHE.with(|cache| cache.borrow().entries.contains_key(&key))
}
