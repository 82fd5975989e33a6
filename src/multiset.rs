//! An ordered multiset implemented with an AVL tree.

use std::fmt;

use crate::alloc::{Allocator, Global};
use crate::element::Element;
use crate::error::Result;
use crate::tree::{IntoIter, Iter, RawTree, TieBreak};

/// An ordered multiset implemented with an AVL tree.
///
/// Equal elements are all kept. A new element always descends left past an
/// equal one, so equal elements iterate newest first. Lookups and removals
/// act on whichever equal element the search meets first.
///
/// ```
/// use avl_alloc::AvlTreeMultiset;
/// let mut bag = AvlTreeMultiset::new();
/// bag.insert(6).unwrap();
/// bag.insert(6).unwrap();
/// assert_eq!(bag.len(), 2);
/// assert!(bag.delete(&6));
/// assert_eq!(bag.get(&6), Some(&6));
/// ```
pub struct AvlTreeMultiset<T: Element, A: Allocator = Global> {
    tree: RawTree<T, A>,
}

impl<T: Element> AvlTreeMultiset<T> {
    /// Creates an empty multiset on the global heap.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<T: Element, A: Allocator> AvlTreeMultiset<T, A> {
    /// Creates an empty multiset allocating its nodes from `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            tree: RawTree::new_in(alloc),
        }
    }

    /// Returns the allocator the multiset was created with.
    pub fn allocator(&self) -> &A {
        self.tree.allocator()
    }

    /// Returns true if the multiset contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements, counting duplicates.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns the height of the tree, 0 when empty.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Adds a value, always as a new element.
    /// Fails only if the node cannot be allocated, leaving the multiset unchanged.
    pub fn insert(&mut self, value: T) -> Result<()> {
        let replaced = self.tree.insert(value, TieBreak::RouteEqualLeft)?;
        debug_assert!(replaced.is_none());
        Ok(())
    }

    /// Returns a reference to one of the values equal to the given one.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.get(value)
    }

    /// Returns true if the multiset contains a value equal to the given one.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.get(value).is_some()
    }

    /// Returns the number of values equal to the given one.
    pub fn count(&self, value: &T) -> usize {
        self.tree.count(value)
    }

    /// Returns the smallest value in the multiset.
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the largest value in the multiset.
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes one value equal to the given one and returns it, without
    /// running its destroy hook. Which of several equal values is removed is
    /// unspecified.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value)
    }

    /// Removes one value equal to the given one and runs its destroy hook.
    /// Returns whether such a value was present.
    pub fn delete(&mut self, value: &T) -> bool {
        self.tree.delete(value)
    }

    /// Clears the multiset, destroying all values and deallocating all nodes.
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

    /// Gets an iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// Asserts the AVL invariants, cached heights and non-decreasing order.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency(TieBreak::RouteEqualLeft)
    }

    #[cfg(test)]
    pub(crate) fn shape(&self) -> String
    where
        T: fmt::Debug,
    {
        self.tree.shape()
    }
}

impl<T: Element> Default for AvlTreeMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Element, A: Allocator> IntoIterator for &'a AvlTreeMultiset<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Element, A: Allocator> IntoIterator for AvlTreeMultiset<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<T: Element + fmt::Debug, A: Allocator> fmt::Debug for AvlTreeMultiset<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
