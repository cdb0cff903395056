//! Element Cache
//!
//! A `PerformanceCache` of selector lookups. The owner forwards structural
//! and per-element change notifications, and the cache drops the affected
//! entries.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheStats, Clock, PerformanceCache, SetOptions, SizeEstimate, NUMBER_SIZE};
use crate::config::CacheConfig;
use crate::dom::Document;

// == Element Ref ==
/// Cached element handle. Charged as a single reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef<E>(pub E);

impl<E> SizeEstimate for ElementRef<E> {
    fn estimated_size(&self) -> usize {
        NUMBER_SIZE
    }
}

// == Element Cache ==
/// Selector to element cache that stays valid as the document changes.
///
/// `on_nodes_removed` is the structural listener and `on_element_mutated`
/// the per-element one. Every cached element is watched; after `teardown`
/// nothing is watched and lookups go straight to the document.
pub struct ElementCache<D: Document> {
    document: D,
    cache: PerformanceCache<ElementRef<D::Element>>,
    /// Watched elements and the selectors cached for each
    watched: HashMap<D::Element, HashSet<String>>,
    observing: bool,
}

impl<D: Document> fmt::Debug for ElementCache<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCache")
            .field("cache", &self.cache)
            .field("watched", &self.watched.len())
            .field("observing", &self.observing)
            .finish()
    }
}

impl<D: Document> ElementCache<D> {
    pub fn new(document: D, config: CacheConfig) -> Self {
        Self::from_cache(document, PerformanceCache::new(config))
    }

    pub fn with_clock(document: D, config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self::from_cache(document, PerformanceCache::with_clock(config, clock))
    }

    fn from_cache(document: D, cache: PerformanceCache<ElementRef<D::Element>>) -> Self {
        Self {
            document,
            cache,
            watched: HashMap::new(),
            observing: true,
        }
    }

    // == Get Element ==
    /// Returns the element for `selector`, from cache when it is still
    /// attached, otherwise from a fresh lookup that is then cached.
    pub fn get_element(&mut self, selector: &str) -> Option<D::Element> {
        if !self.observing {
            return self.document.query_selector(selector);
        }

        let cached = self.cache.entry(selector).map(|entry| entry.value.0.clone());
        match cached {
            Some(element) if !self.document.is_attached(&element) => {
                self.forget(selector, &element);
            }
            _ => {
                let len_before = self.cache.len();
                if let Some(element) = self.cache.get(selector).map(|r| r.0.clone()) {
                    return Some(element);
                }
                // An expired entry was dropped by the lookup
                if self.cache.len() < len_before {
                    self.prune_watches();
                }
            }
        }

        let element = self.document.query_selector(selector)?;
        let len_before = self.cache.len();
        self.cache
            .set(selector, ElementRef(element.clone()), SetOptions::default());
        self.watched
            .entry(element.clone())
            .or_default()
            .insert(selector.to_string());
        // Capacity or memory eviction made room for this entry
        if self.cache.len() <= len_before {
            self.prune_watches();
        }
        Some(element)
    }

    // == Structural Change ==
    /// Drops every entry whose element is one of `removed` or inside one.
    ///
    /// Returns the number of entries removed.
    pub fn on_nodes_removed(&mut self, removed: &[D::Element]) -> usize {
        if !self.observing || removed.is_empty() {
            return 0;
        }

        let document = &self.document;
        let inside_removed =
            |element: &D::Element| removed.iter().any(|root| document.contains(root, element));

        let count = self
            .cache
            .invalidate_where(|_, entry| inside_removed(&entry.value.0));
        self.watched.retain(|element, _| !inside_removed(element));

        if count > 0 {
            debug!(count, "invalidated elements under removed nodes");
        }
        count
    }

    // == Element Mutation ==
    /// Drops only the entries cached for `element`.
    pub fn on_element_mutated(&mut self, element: &D::Element) -> usize {
        if !self.observing {
            return 0;
        }
        let Some(selectors) = self.watched.remove(element) else {
            return 0;
        };

        let mut count = 0;
        for selector in selectors {
            // The selector may have been evicted and re-cached to another element
            let points_here = self
                .cache
                .entry(&selector)
                .is_some_and(|entry| entry.value.0 == *element);
            if points_here && self.cache.delete(&selector) {
                count += 1;
            }
        }
        count
    }

    // == Cleanup ==
    /// Sweeps expired entries and stops watching elements nothing refers to.
    pub fn cleanup(&mut self) -> usize {
        let removed = self.cache.cleanup();
        self.prune_watches();
        removed
    }

    /// Drops watches whose selector no longer maps to the watched element.
    fn prune_watches(&mut self) {
        let cache = &self.cache;
        self.watched.retain(|element, selectors| {
            selectors.retain(|s| cache.entry(s).is_some_and(|e| e.value.0 == *element));
            !selectors.is_empty()
        });
    }

    // == Teardown ==
    /// Stops watching and clears the cache. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.observing {
            debug!(entries = self.cache.len(), "tearing down element cache");
        }
        self.observing = false;
        self.watched.clear();
        self.cache.clear();
    }

    fn forget(&mut self, selector: &str, element: &D::Element) {
        self.cache.delete(selector);
        if let Some(selectors) = self.watched.get_mut(element) {
            selectors.remove(selector);
            if selectors.is_empty() {
                self.watched.remove(element);
            }
        }
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn is_watching(&self, element: &D::Element) -> bool {
        self.watched.contains_key(element)
    }

    /// Number of elements currently watched.
    pub fn watched_len(&self) -> usize {
        self.watched.len()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn document(&self) -> &D {
        &self.document
    }
}
