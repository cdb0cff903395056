//! Document tree abstraction used by the element cache.

use std::fmt::Debug;
use std::hash::Hash;

// == Document Trait ==
/// A live tree of elements that can be queried by selector.
///
/// `Element` is a cheap handle (an id or a reference-counted node) compared
/// by identity.
pub trait Document {
    type Element: Clone + Eq + Hash + Debug;

    /// First element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Whether `element` is still part of the tree.
    fn is_attached(&self, element: &Self::Element) -> bool;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;
}
