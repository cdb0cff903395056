//! Element Cache Module
//!
//! Caches selector lookups against a live document tree and drops entries
//! whose elements are detached or mutated.

mod document;
mod element_cache;

pub use document::Document;
pub use element_cache::{ElementCache, ElementRef};
