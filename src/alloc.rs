//! Node allocators.
//!
//! Every container takes its allocator at construction and uses it for all of
//! its nodes until it is dropped.

use std::alloc::{self as sys, Layout};
use std::cell::Cell;
use std::ptr::NonNull;

/// The allocator could not satisfy a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("memory allocation failed")]
pub struct AllocError;

/// Source of memory for tree nodes.
///
/// Requests are always single-node sized; no batching or over-alignment is
/// ever asked for.
pub trait Allocator {
    /// Allocates a block fitting `layout`, or fails.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Returns a block to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator with the
    /// same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }
}

/// The process-wide heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() > 0);
        NonNull::new(unsafe { sys::alloc(layout) }).ok_or(AllocError)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        sys::dealloc(ptr.as_ptr(), layout)
    }
}

/// Wraps another allocator and keeps count of what passes through it.
///
/// Optionally refuses to hand out more than a fixed number of live blocks,
/// which makes allocation failure reproducible.
///
/// ```
/// use avl_alloc::{AvlTreeSet, CountingAllocator};
/// let alloc = CountingAllocator::with_limit(1);
/// let mut set = AvlTreeSet::new_in(&alloc);
/// assert!(set.insert(1u32).is_ok());
/// assert!(set.insert(2u32).is_err());
/// assert_eq!(alloc.live(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CountingAllocator<A = Global> {
    inner: A,
    limit: Option<usize>,
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
}

impl CountingAllocator<Global> {
    pub fn new() -> Self {
        Self::wrap(Global)
    }

    /// Fails every request made while `limit` blocks are live.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new()
        }
    }
}

impl<A: Allocator> CountingAllocator<A> {
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            limit: None,
            allocations: Cell::new(0),
            deallocations: Cell::new(0),
        }
    }

    /// Number of successful allocations so far.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Number of deallocations so far.
    pub fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    /// Number of blocks currently handed out.
    pub fn live(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// Changes the live-block limit; `None` lifts it.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }
}

impl<A: Allocator> Allocator for CountingAllocator<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if let Some(limit) = self.limit {
            if self.live() >= limit {
                return Err(AllocError);
            }
        }
        let ptr = self.inner.allocate(layout)?;
        self.allocations.set(self.allocations.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.deallocations.set(self.deallocations.get() + 1);
        self.inner.deallocate(ptr, layout)
    }
}
