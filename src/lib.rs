//! AVL tree containers with an explicit node allocator.
//!
//! [`AvlTreeSet`] keeps unique elements, [`AvlTreeMultiset`] keeps duplicates.
//! Both are generic over an [`Element`] type, which decides how values are
//! ordered and torn down, and over an [`Allocator`] handed in at construction.
//!
//! ```
//! use avl_alloc::{AvlTreeSet, CountingAllocator};
//!
//! let alloc = CountingAllocator::new();
//! let mut set = AvlTreeSet::new_in(&alloc);
//! for value in [8u8, 4, 12, 6, 5] {
//!     set.insert(value)?;
//! }
//! assert_eq!(set.height(), 3);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [4, 5, 6, 8, 12]);
//! assert_eq!(alloc.live(), 5);
//! # Ok::<(), avl_alloc::Error>(())
//! ```

pub mod alloc;
mod element;
mod error;
mod multiset;
mod node;
mod rotate;
mod set;
mod tree;

pub use crate::alloc::{AllocError, Allocator, CountingAllocator, Global};
pub use element::{byte_order, Element, PlainData};
pub use error::{Error, Result};
pub use multiset::AvlTreeMultiset;
pub use set::AvlTreeSet;
pub use tree::{IntoIter, Iter};
