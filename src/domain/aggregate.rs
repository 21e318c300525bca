//! Upward-sum / downward-broadcast traversal.
//!
//! Leaves send their count to their parent, every internal node sums what its
//! children sent plus its own count, and the root broadcasts the grand total
//! back down. Internal non-root nodes relay the total they receive to their own
//! children. Sending and receiving are plain calls and return values.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::FamilyTree;
use crate::domain::error::{DomainError, DomainResult};

/// Aggregates the whole tree starting at its root and returns the grand total.
#[instrument(level = "debug", skip(tree))]
pub fn aggregate(tree: &mut FamilyTree) -> DomainResult<i64> {
    let root = tree.root().ok_or(DomainError::EmptyTree)?;
    count_children(tree, root)
}

/// Returns the subtree sum of `idx`.
///
/// When this returns, every node in the tree holds the grand total in its
/// `message`. Called on a non-root node, the node sends its subtotal up and the
/// total is computed from the root and broadcast back to everyone.
#[instrument(level = "debug", skip(tree))]
pub fn count_children(tree: &mut FamilyTree, idx: Index) -> DomainResult<i64> {
    let subtotal = gather(tree, idx)?;

    if tree.node(idx)?.is_root() {
        broadcast_message(tree, idx, subtotal)?;
    } else {
        let total = receive_from_parent(tree, idx)?;
        debug!(subtotal, total, "non-root node received grand total");
    }

    Ok(subtotal)
}

/// Upward pass: leaves report their count, internal nodes their subtree sum.
fn gather(tree: &mut FamilyTree, idx: Index) -> DomainResult<i64> {
    let node = tree.node(idx)?;
    let count = node.person.count;
    let children = node.children.clone();

    if children.is_empty() {
        let node = tree.node_mut(idx)?;
        node.message = count;
        trace!(name = %node.person, count, "leaf sends count");
        return Ok(count);
    }

    let mut sum: i64 = 0;
    for child in children {
        let message = receive_message(tree, child)?;
        sum = checked_sum(tree, idx, sum, message)?;
    }
    sum = checked_sum(tree, idx, sum, count)?;

    let node = tree.node_mut(idx)?;
    node.message = sum;
    trace!(name = %node.person, subtotal = sum, "internal node summed children");
    Ok(sum)
}

/// What `child` sends to its parent during the upward pass.
fn receive_message(tree: &mut FamilyTree, child: Index) -> DomainResult<i64> {
    gather(tree, child)
}

/// Downward pass: assign `total` to each direct child. Internal children relay it.
fn broadcast_message(tree: &mut FamilyTree, idx: Index, total: i64) -> DomainResult<()> {
    let children = tree.node(idx)?.children.clone();
    for child in children {
        let node = tree.node_mut(child)?;
        node.message = total;
        if !node.is_leaf() {
            broadcast_message(tree, child, total)?;
        }
    }
    Ok(())
}

/// Sends the subtotal of `idx` up to the root and returns the grand total the
/// root broadcasts back.
fn receive_from_parent(tree: &mut FamilyTree, idx: Index) -> DomainResult<i64> {
    let mut current = idx;
    while let Some(parent) = tree.node(current)?.parent {
        current = parent;
    }
    let total = gather(tree, current)?;
    broadcast_message(tree, current, total)?;
    Ok(total)
}

fn checked_sum(tree: &FamilyTree, idx: Index, acc: i64, value: i64) -> DomainResult<i64> {
    acc.checked_add(value)
        .ok_or_else(|| DomainError::CountOverflow {
            name: tree
                .get_node(idx)
                .map(|n| n.person.name.clone())
                .unwrap_or_default(),
        })
}
