//! Structural audit of a [`Tree`]. Walks every node; keep it off hot paths.

use log::debug;
use thiserror::Error;

use crate::{NodeId, Tree, alloc::Nodes};

/// The first broken red-black or search-tree property found by
/// [`Tree::validate`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("the root is red")]
    RedRoot,

    #[error("a red node has a red child")]
    RedChildOfRed,

    #[error("black height differs between subtrees: {left} on the left, {right} on the right")]
    BlackHeightMismatch { left: usize, right: usize },

    #[error("in-order values are not sorted")]
    OutOfOrder,

    #[error("a child does not point back at its parent")]
    BrokenParentLink,

    #[error("tree holds {found} nodes but reports a length of {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

impl<T: Ord> Tree<T> {
    /// Returns `true` when every red-black property holds.
    pub fn check(&self) -> bool {
        self.validate().is_ok()
    }

    /// Like [`Tree::check`], naming the property that does not hold.
    pub fn validate(&self) -> Result<(), Violation> {
        let result = self.audit();
        if let Err(violation) = &result {
            debug!("tree failed validation: {violation}");
        }
        result
    }

    fn audit(&self) -> Result<(), Violation> {
        let nodes = self.root.nodes();
        let Some(root) = self.root.root() else {
            return match nodes.live() {
                0 if self.len == 0 => Ok(()),
                found => Err(Violation::LengthMismatch {
                    expected: self.len,
                    found,
                }),
            };
        };
        if nodes[root].is_red() {
            return Err(Violation::RedRoot);
        }
        if nodes[root].parent.is_some() {
            return Err(Violation::BrokenParentLink);
        }

        let found = count_and_black_height(nodes, root)?.0;
        if found != self.len || found != nodes.live() {
            return Err(Violation::LengthMismatch {
                expected: self.len,
                found,
            });
        }

        let mut current = nodes.leftmost_descendant(root).unwrap_or(root);
        while let Some(next) = nodes.next(current) {
            if nodes[next].value < nodes[current].value {
                return Err(Violation::OutOfOrder);
            }
            current = next;
        }
        Ok(())
    }
}

/// Returns the node count and black height (absent leaves count as zero)
/// of the subtree at `id`.
fn count_and_black_height<T>(nodes: &Nodes<T>, id: NodeId) -> Result<(usize, usize), Violation> {
    let node = &nodes[id];
    let mut heights = [0; 2];
    let mut count = 1;
    for (height, child) in heights.iter_mut().zip([node.left, node.right]) {
        let Some(child) = child else {
            continue;
        };
        if nodes[child].parent != Some(id) {
            return Err(Violation::BrokenParentLink);
        }
        if node.is_red() && nodes[child].is_red() {
            return Err(Violation::RedChildOfRed);
        }
        let (below, black_height) = count_and_black_height(nodes, child)?;
        count += below;
        *height = black_height;
    }
    let [left, right] = heights;
    if left != right {
        return Err(Violation::BlackHeightMismatch { left, right });
    }
    Ok((count, left + usize::from(node.is_black())))
}
