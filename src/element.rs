//! Element capabilities: how stored values are ordered and torn down.

use std::cmp::Ordering;
use std::mem;
use std::slice;

/// Behavior a type must provide to be stored in a tree.
///
/// Implement `order` for a meaningful ordering and override `destroy` for
/// container-driven teardown. Plain data can skip this trait altogether by
/// implementing [`PlainData`], which falls back to byte-wise ordering.
///
/// ```
/// use std::cmp::Ordering;
/// use avl_alloc::Element;
///
/// struct Entry {
///     key: u32,
///     value: &'static str,
/// }
///
/// impl Element for Entry {
///     fn order(&self, other: &Self) -> Ordering {
///         self.key.cmp(&other.key)
///     }
/// }
/// ```
///
/// A type with neither an `order` nor the [`PlainData`] marker is rejected:
///
/// ```compile_fail
/// struct Padded {
///     a: u8,
///     b: u32,
/// }
///
/// impl avl_alloc::Element for Padded {}
/// ```
pub trait Element: Sized {
    /// Three-way comparison. Must be a consistent total order.
    fn order(&self, other: &Self) -> Ordering;

    /// Teardown hook run by `delete` and by clearing or dropping a tree,
    /// right before the value is dropped. `remove` hands the value back
    /// without running it. Defaults to doing nothing.
    fn destroy(&mut self) {}
}

/// Marker for plain data whose raw bytes may be compared directly.
///
/// Every `PlainData` type is an [`Element`] ordered by [`byte_order`], with a
/// no-op `destroy`. That order is only meaningful when equal values have
/// equal bytes.
///
/// ```
/// #[derive(Clone, Copy)]
/// #[repr(C)]
/// struct Cell {
///     row: u8,
///     col: u8,
/// }
///
/// // Two bytes, no padding
/// unsafe impl avl_alloc::PlainData for Cell {}
///
/// let mut set = avl_alloc::AvlTreeSet::new();
/// set.insert(Cell { row: 1, col: 2 }).unwrap();
/// assert!(set.contains(&Cell { row: 1, col: 2 }));
/// ```
///
/// # Safety
///
/// Every byte of the type's representation must be initialized for every
/// value: no padding, no `MaybeUninit` fields, no unions with uninitialized
/// parts.
pub unsafe trait PlainData: Copy {}

impl<T: PlainData> Element for T {
    fn order(&self, other: &Self) -> Ordering {
        byte_order(self, other)
    }
}

/// Compares the raw in-memory representation of two values lexicographically.
pub fn byte_order<T: PlainData>(lhs: &T, rhs: &T) -> Ordering {
    bytes_of(lhs).cmp(bytes_of(rhs))
}

fn bytes_of<T: PlainData>(value: &T) -> &[u8] {
    // Sound by the `PlainData` contract: all bytes are initialized
    unsafe { slice::from_raw_parts(value as *const T as *const u8, mem::size_of::<T>()) }
}

/// Implements [`Element`] for types that already implement [`Ord`],
/// ordering them by `Ord::cmp` and keeping the no-op `destroy`.
/// Such types must not also implement [`PlainData`].
///
/// ```
/// #[derive(PartialEq, Eq, PartialOrd, Ord)]
/// struct Version(u16, u16);
/// avl_alloc::impl_element_by_ord!(Version);
/// ```
#[macro_export]
macro_rules! impl_element_by_ord {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::Element for $t {
                fn order(&self, other: &Self) -> ::std::cmp::Ordering {
                    ::std::cmp::Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_element_by_ord!(u8, u16, u32, u64, u128, usize);
impl_element_by_ord!(i8, i16, i32, i64, i128, isize);
impl_element_by_ord!(bool, char, String);

impl<'a> Element for &'a str {
    fn order(&self, other: &Self) -> Ordering {
        (*self).cmp(*other)
    }
}
