use std::alloc::Layout;
use std::ptr::{self, NonNull};

use crate::alloc::Allocator;
use crate::error::{Error, Result};

pub(crate) type NodePtr<T> = NonNull<Node<T>>;

/// An edge: the tree's root slot or a node's child slot.
/// `None` is an empty edge; `Some` exclusively owns the node it points to.
pub(crate) type Link<T> = Option<NodePtr<T>>;

pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    // 1 for a leaf, cached from the children
    pub(crate) height: usize,
}

impl<T> Node<T> {
    const LAYOUT: Layout = Layout::new::<Self>();

    /// Allocates a detached leaf holding `data`.
    pub(crate) fn create<A: Allocator>(alloc: &A, data: T) -> Result<NodePtr<T>> {
        let node_ptr = match alloc.allocate(Self::LAYOUT) {
            Ok(ptr) => ptr.cast::<Self>(),
            Err(_) => {
                log::debug!(
                    "Node::create: allocation of {} bytes failed",
                    Self::LAYOUT.size()
                );
                return Err(Error::AllocationFailure {
                    layout: Self::LAYOUT,
                });
            }
        };
        unsafe {
            node_ptr.as_ptr().write(Node {
                data,
                left: None,
                right: None,
                height: 1,
            });
        }
        Ok(node_ptr)
    }

    /// Frees a node that is no longer linked into any tree and hands its data
    /// back. Children are not touched.
    ///
    /// # Safety
    ///
    /// `node_ptr` must come from `create` with the same allocator and must not
    /// be used afterwards.
    pub(crate) unsafe fn destroy<A: Allocator>(alloc: &A, node_ptr: NodePtr<T>) -> T {
        let node = ptr::read(node_ptr.as_ptr());
        alloc.deallocate(node_ptr.cast(), Self::LAYOUT);
        node.data
    }
}

/// Height of the subtree behind an edge, 0 when empty.
pub(crate) fn height<T>(link: Link<T>) -> usize {
    match link {
        None => 0,
        Some(node_ptr) => unsafe { node_ptr.as_ref().height },
    }
}

/// Recomputes the cached height of a node from its children.
pub(crate) fn adjust_height<T>(mut node_ptr: NodePtr<T>) {
    unsafe {
        let node = node_ptr.as_mut();
        node.height = 1 + height(node.left).max(height(node.right));
    }
}
