//! An ordered set with unique elements, implemented with an AVL tree.

use std::fmt;

use crate::alloc::{Allocator, Global};
use crate::element::Element;
use crate::error::Result;
use crate::tree::{IntoIter, Iter, RawTree, TieBreak};

/// An ordered set with unique elements, implemented with an AVL tree.
///
/// No two stored elements compare equal under [`Element::order`]; inserting
/// an equal element replaces the stored one and hands it back, which makes
/// the set usable as a map over key/value element types.
///
/// ```
/// use avl_alloc::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// set.insert(0).unwrap();
/// set.insert(1).unwrap();
/// set.insert(2).unwrap();
/// assert_eq!(set.get(&1), Some(&1));
/// assert_eq!(set.remove(&1), Some(1));
/// assert!(set.get(&1).is_none());
/// ```
pub struct AvlTreeSet<T: Element, A: Allocator = Global> {
    tree: RawTree<T, A>,
}

impl<T: Element> AvlTreeSet<T> {
    /// Creates an empty set on the global heap.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T: Element, A: Allocator> AvlTreeSet<T, A> {
    /// Creates an empty set allocating its nodes from `alloc`.
    /// No memory is allocated until the first item is inserted.
    pub fn new_in(alloc: A) -> Self {
        Self {
            tree: RawTree::new_in(alloc),
        }
    }

    /// Returns the allocator the set was created with.
    pub fn allocator(&self) -> &A {
        self.tree.allocator()
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the height of the tree, 0 when empty.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Inserts a value into the set.
    ///
    /// Returns the previously stored equal value, if any. Fails only if a new
    /// node cannot be allocated, in which case the set is unchanged.
    pub fn insert(&mut self, value: T) -> Result<Option<T>> {
        self.tree.insert(value, TieBreak::ReplaceOnEqual)
    }

    /// Returns a reference to the value in the set that is equal to the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.get(value)
    }

    /// Returns true if the set contains a value equal to the given one.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.get(value).is_some()
    }

    /// Returns the smallest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the largest value in the set.
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes a value from the set and returns it.
    /// The value's destroy hook is not run; that is up to the caller.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value)
    }

    /// Removes a value from the set and runs its destroy hook.
    /// Returns whether the value was previously in the set.
    pub fn delete(&mut self, value: &T) -> bool {
        self.tree.delete(value)
    }

    /// Clears the set, destroying all values and deallocating all nodes.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Removes the smallest value and returns it, without running its destroy hook.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes the largest value and returns it, without running its destroy hook.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Gets an iterator over the values of the set in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Asserts the AVL invariants, cached heights and strict ordering.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency(TieBreak::ReplaceOnEqual)
    }

    #[cfg(test)]
    pub(crate) fn shape(&self) -> String
    where
        T: fmt::Debug,
    {
        self.tree.shape()
    }
}

impl<T: Element> Default for AvlTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Element, A: Allocator> IntoIterator for &'a AvlTreeSet<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element, A: Allocator> IntoIterator for AvlTreeSet<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<T: Element + fmt::Debug, A: Allocator> fmt::Debug for AvlTreeSet<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
