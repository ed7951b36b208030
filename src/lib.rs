//! A red-black tree multiset.
//!
//! Nodes live in an arena and link to each other by slot index, so parent
//! back-references never own anything and removing a node never tears down
//! the subtree it used to hold.
//!
//! Node colors are an implementation detail and are not exported:
//!
//! ```compile_fail
//! use redblack::Color;
//! ```
mod alloc;
mod iter;
mod node;
mod root;
mod tree;
mod validate;

pub use iter::{Cursor, IntoIter, Iter};
pub use validate::Violation;

use crate::alloc::Nodes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of its parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline(always)]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Stable address of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

pub(crate) type NodePtr = Option<NodeId>;

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) color: Color,
    pub(crate) parent: NodePtr,
    pub(crate) left: NodePtr,
    pub(crate) right: NodePtr,
    pub(crate) value: T,
}

/// The balancing core: the root link plus the arena it points into.
///
/// Everything in here works on node ids only; value comparisons happen in
/// [`Tree`].
#[derive(Clone)]
pub(crate) struct Root<T> {
    root: NodePtr,
    nodes: Nodes<T>,
}

/// An ordered multiset backed by a red-black tree.
///
/// Equal values are kept side by side; iteration yields every copy.
///
/// ```
/// use redblack::Tree;
///
/// let mut tree = Tree::new();
/// for v in [2, 5, 3, 9, 15, 6] {
///     tree.insert(v);
/// }
/// assert!(tree.check());
/// assert!(!tree.find(&5).is_end());
///
/// tree.erase(&15);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [2, 3, 5, 6, 9]);
/// ```
#[derive(Clone)]
pub struct Tree<T> {
    root: Root<T>,
    len: usize,
}
