//! Rebalancing of a single edge.
//!
//! All functions work on an edge (`&mut Link<T>`) so that the root slot and
//! child slots are handled alike. Rotations only relink nodes; element data
//! never moves.

use crate::node::{adjust_height, height, Link};

/// Restores the AVL condition at `edge` if necessary and adjusts its height.
/// Resulting balance will be +1, 0 or -1 height difference between left and
/// right subtree. Initial balance must not exceed +2 or -2, which always holds
/// after a single insert or unlink below this edge.
/// Returns whether a rotation had been necessary.
pub(crate) fn rebalance<T>(edge: &mut Link<T>) -> bool {
    let Some(mut node_ptr) = *edge else {
        return false;
    };
    let node = unsafe { node_ptr.as_mut() };
    let left_height = height(node.left);
    let right_height = height(node.right);
    debug_assert!(left_height <= right_height + 2);
    debug_assert!(right_height <= left_height + 2);

    if left_height > right_height + 1 {
        if let Some(left_ptr) = node.left {
            let left = unsafe { left_ptr.as_ref() };
            if height(left.right) > height(left.left) {
                // Left-right case
                log::trace!("rebalance: double rotation, left-right");
                rotate_left(&mut node.left);
            } else {
                log::trace!("rebalance: single rotation, left-left");
            }
        }
        rotate_right(edge);
        true
    } else if right_height > left_height + 1 {
        if let Some(right_ptr) = node.right {
            let right = unsafe { right_ptr.as_ref() };
            if height(right.left) > height(right.right) {
                // Right-left case
                log::trace!("rebalance: double rotation, right-left");
                rotate_right(&mut node.right);
            } else {
                log::trace!("rebalance: single rotation, right-right");
            }
        }
        rotate_left(edge);
        true
    } else {
        adjust_height(node_ptr);
        false
    }
}

//     X          Y
//    / \        / \
//   Y   c  ->  a   X
//  / \            / \
// a   b          b   c
pub(crate) fn rotate_right<T>(edge: &mut Link<T>) {
    let Some(mut node_ptr) = *edge else {
        return;
    };
    unsafe {
        if let Some(mut left_ptr) = node_ptr.as_ref().left {
            node_ptr.as_mut().left = left_ptr.as_ref().right;
            left_ptr.as_mut().right = Some(node_ptr);
            *edge = Some(left_ptr);

            adjust_height(node_ptr);
            adjust_height(left_ptr);
        }
    }
}

//   X              Y
//  / \            / \
// a   Y    ->    X   c
//    / \        / \
//   b   c      a   b
pub(crate) fn rotate_left<T>(edge: &mut Link<T>) {
    let Some(mut node_ptr) = *edge else {
        return;
    };
    unsafe {
        if let Some(mut right_ptr) = node_ptr.as_ref().right {
            node_ptr.as_mut().right = right_ptr.as_ref().left;
            right_ptr.as_mut().left = Some(node_ptr);
            *edge = Some(right_ptr);

            adjust_height(node_ptr);
            adjust_height(right_ptr);
        }
    }
}
