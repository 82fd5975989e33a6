use std::cmp::Ordering;
use std::marker::PhantomData;
use std::mem;

use crate::alloc::Allocator;
use crate::element::Element;
use crate::error::Result;
use crate::node::{height, Link, Node, NodePtr};
use crate::rotate::rebalance;

/// What an insert does when it meets an element comparing equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TieBreak {
    /// Swap in the new element and hand back the old one.
    ReplaceOnEqual,
    /// Keep both; the new one descends into the left subtree.
    RouteEqualLeft,
}

/// AVL tree engine shared by the set and multiset containers.
/// Nodes are owned top-down through their edges; there are no parent links.
pub(crate) struct RawTree<T: Element, A: Allocator> {
    root: Link<T>,
    num_nodes: usize,
    alloc: A,
    marker: PhantomData<Box<Node<T>>>,
}

impl<T: Element, A: Allocator> RawTree<T, A> {
    pub(crate) fn new_in(alloc: A) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            alloc,
            marker: PhantomData,
        }
    }

    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn len(&self) -> usize {
        self.num_nodes
    }

    pub(crate) fn height(&self) -> usize {
        height(self.root)
    }

    /// Destroys every element (post-order) and frees all nodes.
    pub(crate) fn clear(&mut self) {
        if self.root.is_some() {
            log::debug!("RawTree::clear: tearing down {} nodes", self.num_nodes);
        }
        let root = self.root.take();
        unsafe { Self::destroy_subtree(&self.alloc, root) };
        self.num_nodes = 0;
    }

    pub(crate) fn get(&self, key: &T) -> Option<&T> {
        self.find(key)
            .map(|node_ptr| &unsafe { &*node_ptr.as_ptr() }.data)
    }

    pub(crate) fn first(&self) -> Option<&T> {
        let mut node_ptr = self.root?;
        while let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
            node_ptr = left_ptr;
        }
        Some(&unsafe { &*node_ptr.as_ptr() }.data)
    }

    pub(crate) fn last(&self) -> Option<&T> {
        let mut node_ptr = self.root?;
        while let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
            node_ptr = right_ptr;
        }
        Some(&unsafe { &*node_ptr.as_ptr() }.data)
    }

    /// Inserts `data`. Returns the displaced element when `tie` is
    /// `ReplaceOnEqual` and an equal element was present.
    /// On allocation failure nothing in the tree has changed.
    pub(crate) fn insert(&mut self, data: T, tie: TieBreak) -> Result<Option<T>> {
        let (replaced, linked) = Self::insert_at(&mut self.root, data, tie, &self.alloc)?;
        if linked {
            self.num_nodes += 1;
        }
        Ok(replaced)
    }

    /// Unlinks one element comparing equal to `key` and returns it.
    pub(crate) fn remove(&mut self, key: &T) -> Option<T> {
        let node_ptr = Self::remove_at(&mut self.root, key)?;
        debug_assert!(self.num_nodes >= 1);
        self.num_nodes -= 1;
        Some(unsafe { Node::destroy(&self.alloc, node_ptr) })
    }

    /// Unlinks one element comparing equal to `key` and destroys it.
    pub(crate) fn delete(&mut self, key: &T) -> bool {
        match self.remove(key) {
            Some(mut data) => {
                data.destroy();
                true
            }
            None => false,
        }
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root, self.num_nodes)
    }

    pub(crate) fn into_iter(self) -> IntoIter<T, A> {
        IntoIter { tree: self }
    }

    /// Unlinks the smallest element and returns it.
    pub(crate) fn pop_first(&mut self) -> Option<T> {
        let node_ptr = Self::unlink_min(&mut self.root)?;
        self.num_nodes -= 1;
        Some(unsafe { Node::destroy(&self.alloc, node_ptr) })
    }

    /// Unlinks the largest element and returns it.
    pub(crate) fn pop_last(&mut self) -> Option<T> {
        let node_ptr = Self::unlink_max(&mut self.root)?;
        self.num_nodes -= 1;
        Some(unsafe { Node::destroy(&self.alloc, node_ptr) })
    }

    /// Number of elements comparing equal to `key`.
    /// Only subtrees that can hold an equal element are entered.
    pub(crate) fn count(&self, key: &T) -> usize {
        fn count_at<T: Element>(link: Link<T>, key: &T) -> usize {
            let Some(node_ptr) = link else {
                return 0;
            };
            let node = unsafe { node_ptr.as_ref() };
            match key.order(&node.data) {
                Ordering::Less => count_at(node.left, key),
                Ordering::Greater => count_at(node.right, key),
                Ordering::Equal => 1 + count_at(node.left, key) + count_at(node.right, key),
            }
        }

        count_at(self.root, key)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self, tie: TieBreak) {
        // Check tree nodes: cached heights and AVL condition (nearly balance)
        fn check_node<T>(link: Link<T>, num_nodes: &mut usize) -> usize {
            let Some(node_ptr) = link else {
                return 0;
            };
            let node = unsafe { node_ptr.as_ref() };
            let left_height = check_node(node.left, num_nodes);
            let right_height = check_node(node.right, num_nodes);
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);
            let height = 1 + left_height.max(right_height);
            assert_eq!(node.height, height);
            *num_nodes += 1;
            height
        }

        let mut num_nodes = 0;
        check_node(self.root, &mut num_nodes);
        assert_eq!(num_nodes, self.num_nodes);

        // Check in-order sequence
        let mut iter = self.iter();
        if let Some(mut prev) = iter.next() {
            for data in iter {
                match (prev.order(data), tie) {
                    (Ordering::Less, _) => {}
                    (Ordering::Equal, TieBreak::RouteEqualLeft) => {}
                    (ordering, _) => panic!("tree out of order: {ordering:?}"),
                }
                prev = data;
            }
        }
    }

    /// Renders the tree shape as `data(left,right)`, leaves bare, `-` for
    /// an empty edge.
    #[cfg(test)]
    pub(crate) fn shape(&self) -> String
    where
        T: std::fmt::Debug,
    {
        fn render<T: std::fmt::Debug>(link: Link<T>, out: &mut String) {
            let Some(node_ptr) = link else {
                out.push('-');
                return;
            };
            let node = unsafe { node_ptr.as_ref() };
            out.push_str(&format!("{:?}", node.data));
            if node.left.is_some() || node.right.is_some() {
                out.push('(');
                render(node.left, out);
                out.push(',');
                render(node.right, out);
                out.push(')');
            }
        }

        let mut out = String::new();
        render(self.root, &mut out);
        out
    }

    fn find(&self, key: &T) -> Link<T> {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match key.order(&node_ptr.as_ref().data) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    // Returns the displaced element and whether a node was linked in below
    // `edge`. Nothing is rebalanced when allocation fails.
    fn insert_at(
        edge: &mut Link<T>,
        data: T,
        tie: TieBreak,
        alloc: &A,
    ) -> Result<(Option<T>, bool)> {
        let Some(mut node_ptr) = *edge else {
            *edge = Some(Node::create(alloc, data)?);
            return Ok((None, true));
        };
        let node = unsafe { node_ptr.as_mut() };
        let (replaced, linked) = match (data.order(&node.data), tie) {
            (Ordering::Equal, TieBreak::ReplaceOnEqual) => {
                return Ok((Some(mem::replace(&mut node.data, data)), false));
            }
            (Ordering::Greater, _) => Self::insert_at(&mut node.right, data, tie, alloc)?,
            // Ties always go left
            _ => Self::insert_at(&mut node.left, data, tie, alloc)?,
        };
        if linked {
            rebalance(edge);
        }
        Ok((replaced, linked))
    }

    // Detaches one node comparing equal to `key` from below `edge`,
    // rebalancing every edge on the way back up.
    fn remove_at(edge: &mut Link<T>, key: &T) -> Link<T> {
        let mut node_ptr = (*edge)?;
        let node = unsafe { node_ptr.as_mut() };
        let removed = match key.order(&node.data) {
            Ordering::Equal => {
                Self::splice(edge);
                return Some(node_ptr);
            }
            Ordering::Less => Self::remove_at(&mut node.left, key),
            Ordering::Greater => Self::remove_at(&mut node.right, key),
        };
        if removed.is_some() {
            rebalance(edge);
        }
        removed
    }

    // Replaces the node at `edge` by its subtree(s). The detached node keeps
    // stale child links and must not be followed.
    fn splice(edge: &mut Link<T>) {
        let Some(mut node_ptr) = *edge else {
            return;
        };
        let node = unsafe { node_ptr.as_mut() };
        match (node.left, node.right) {
            (None, right) => *edge = right,
            (left, None) => *edge = left,
            (Some(left_ptr), Some(right_ptr)) => {
                // Take the replacement from the taller side
                let replacement = if height(Some(left_ptr)) > height(Some(right_ptr)) {
                    log::trace!("splice: replacing by maximum of left subtree");
                    Self::unlink_max(&mut node.left)
                } else {
                    log::trace!("splice: replacing by minimum of right subtree");
                    Self::unlink_min(&mut node.right)
                };
                if let Some(mut replacement_ptr) = replacement {
                    unsafe {
                        replacement_ptr.as_mut().left = node.left;
                        replacement_ptr.as_mut().right = node.right;
                    }
                    *edge = Some(replacement_ptr);
                }
            }
        }
        rebalance(edge);
    }

    fn unlink_min(edge: &mut Link<T>) -> Link<T> {
        let mut node_ptr = (*edge)?;
        let node = unsafe { node_ptr.as_mut() };
        if node.left.is_some() {
            let min = Self::unlink_min(&mut node.left);
            rebalance(edge);
            min
        } else {
            *edge = node.right.take();
            Some(node_ptr)
        }
    }

    fn unlink_max(edge: &mut Link<T>) -> Link<T> {
        let mut node_ptr = (*edge)?;
        let node = unsafe { node_ptr.as_mut() };
        if node.right.is_some() {
            let max = Self::unlink_max(&mut node.right);
            rebalance(edge);
            max
        } else {
            *edge = node.left.take();
            Some(node_ptr)
        }
    }

    // Post-order: children first, then the element's destroy hook, then the
    // element itself is dropped and its node freed.
    unsafe fn destroy_subtree(alloc: &A, link: Link<T>) {
        if let Some(node_ptr) = link {
            let (left, right) = (node_ptr.as_ref().left, node_ptr.as_ref().right);
            Self::destroy_subtree(alloc, left);
            Self::destroy_subtree(alloc, right);
            let mut data = Node::destroy(alloc, node_ptr);
            data.destroy();
        }
    }
}

impl<T: Element, A: Allocator> Drop for RawTree<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// An in-order iterator over the elements of a tree.
pub struct Iter<'a, T> {
    front: Vec<NodePtr<T>>,
    back: Vec<NodePtr<T>>,
    remaining: usize,
    marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = Self {
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
            marker: PhantomData,
        };
        iter.push_left_spine(root);
        iter.push_right_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(node_ptr) = link {
            self.front.push(node_ptr);
            link = unsafe { node_ptr.as_ref().left };
        }
    }

    fn push_right_spine(&mut self, mut link: Link<T>) {
        while let Some(node_ptr) = link {
            self.back.push(node_ptr);
            link = unsafe { node_ptr.as_ref().right };
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // Both ends walk the same tree; the count keeps them from crossing
        if self.remaining == 0 {
            return None;
        }
        let node_ptr = self.front.pop()?;
        let node: &'a Node<T> = unsafe { &*node_ptr.as_ptr() };
        self.push_left_spine(node.right);
        self.remaining -= 1;
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node_ptr = self.back.pop()?;
        let node: &'a Node<T> = unsafe { &*node_ptr.as_ptr() };
        self.push_right_spine(node.left);
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

/// An owning in-order iterator over the elements of a tree.
/// Elements are handed out without running their destroy hook; those not
/// yet taken are destroyed when the iterator is dropped.
pub struct IntoIter<T: Element, A: Allocator> {
    tree: RawTree<T, A>,
}

impl<T: Element, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T: Element, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        self.tree.pop_last()
    }
}

impl<T: Element, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
