use std::alloc::Layout;

/// Errors reported by the tree containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The allocator could not provide a block for a new tree node.
    /// The tree is left exactly as it was before the failed insert.
    #[error("failed to allocate tree node ({} bytes, align {})", .layout.size(), .layout.align())]
    AllocationFailure { layout: Layout },
}

pub type Result<T> = std::result::Result<T, Error>;
