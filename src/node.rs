use std::fmt::Debug;

use log::trace;

use crate::{Color, Node, NodeId, NodePtr, Side, alloc::Nodes};

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
            value,
        }
    }

    #[inline(always)]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline(always)]
    pub fn child(&self, side: Side) -> NodePtr {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub fn set_child(&mut self, side: Side, child: NodePtr) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

// Link accessors. An absent node reads as a black leaf.
impl<T> Nodes<T> {
    #[inline(always)]
    pub fn is_red(&self, ptr: NodePtr) -> bool {
        ptr.is_some_and(|id| self[id].is_red())
    }

    #[inline(always)]
    pub fn set_color(&mut self, ptr: NodePtr, color: Color) {
        if let Some(id) = ptr {
            self[id].color = color;
        }
    }

    #[inline(always)]
    pub fn set_parent(&mut self, ptr: NodePtr, parent: NodePtr) {
        if let Some(id) = ptr {
            self[id].parent = parent;
        }
    }

    /// Which side of its parent `id` hangs from, or `None` for the root.
    #[inline]
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self[id].parent?;
        if self[parent].left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Hangs the detached `node` under `parent` on the given side.
    pub fn link(&mut self, node: NodeId, parent: NodeId, side: Side) {
        let n = &mut self[node];
        n.parent = Some(parent);
        n.left = None;
        n.right = None;
        self[parent].set_child(side, Some(node));
    }

    /// Points whichever slot held `old` at `new`: the child slot of
    /// `parent`, or the root when there is no parent.
    pub fn change_child(&mut self, old: NodeId, new: NodePtr, parent: NodePtr, root: &mut NodePtr) {
        match parent {
            Some(parent) => {
                let parent = &mut self[parent];
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
            None => *root = new,
        }
    }
}

// Rotations.
impl<T> Nodes<T> {
    /// Rotates the subtree at `pivot` so that the child on `side.opposite()`
    /// takes its place and `pivot` moves down to `side`.
    ///
    /// Leaves the tree untouched when that child is missing.
    ///
    /// ```text
    ///     P                 C          (side = Left)
    ///    / \               / \
    ///   a   C     -->     P   c
    ///      / \           / \
    ///     b   c         a   b
    /// ```
    pub fn rotate(&mut self, pivot: NodeId, side: Side, root: &mut NodePtr) {
        let Some(child) = self[pivot].child(side.opposite()) else {
            return;
        };
        trace!("rotate {side:?} at {pivot:?}, promoting {child:?}");

        let moved = self[child].child(side);
        self[pivot].set_child(side.opposite(), moved);
        self.set_parent(moved, Some(pivot));

        let parent = self[pivot].parent;
        self[child].parent = parent;
        self.change_child(pivot, Some(child), parent, root);

        self[child].set_child(side, Some(pivot));
        self[pivot].parent = Some(child);
    }
}

// Navigation.
impl<T> Nodes<T> {
    /// Walks left children from `id`. `None` when `id` has no left child,
    /// which is not the same as `id` being the leftmost node.
    pub fn leftmost_descendant(&self, id: NodeId) -> NodePtr {
        let mut leftmost = None;
        let mut current = id;
        while let Some(left) = self[current].left {
            leftmost = Some(left);
            current = left;
        }
        leftmost
    }

    pub fn rightmost_descendant(&self, id: NodeId) -> NodePtr {
        let mut rightmost = None;
        let mut current = id;
        while let Some(right) = self[current].right {
            rightmost = Some(right);
            current = right;
        }
        rightmost
    }

    /// The in-order successor among `id`'s own descendants: the leftmost
    /// node of the right subtree, or the right child itself.
    pub fn successor_in_subtree(&self, id: NodeId) -> NodePtr {
        let right = self[id].right?;
        self.leftmost_descendant(right).or(Some(right))
    }

    pub fn predecessor_in_subtree(&self, id: NodeId) -> NodePtr {
        let left = self[id].left?;
        self.rightmost_descendant(left).or(Some(left))
    }

    /// The in-order successor of `id` anywhere in the tree.
    pub fn next(&self, id: NodeId) -> NodePtr {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if self[id].right.is_some() {
            return self.successor_in_subtree(id);
        }
        // Otherwise climb while we are a right-hand child; the first parent
        // we reach from its left side is next.
        let mut current = id;
        let mut parent = self[id].parent;
        while let Some(p) = parent {
            if self[p].right != Some(current) {
                break;
            }
            current = p;
            parent = self[p].parent;
        }
        parent
    }

    /// The in-order predecessor of `id` anywhere in the tree.
    pub fn prev(&self, id: NodeId) -> NodePtr {
        if self[id].left.is_some() {
            return self.predecessor_in_subtree(id);
        }
        let mut current = id;
        let mut parent = self[id].parent;
        while let Some(p) = parent {
            if self[p].left != Some(current) {
                break;
            }
            current = p;
            parent = self[p].parent;
        }
        parent
    }

    /// Smallest node under `root`, `root` included.
    #[inline]
    pub fn first(&self, root: NodePtr) -> NodePtr {
        let root = root?;
        self.leftmost_descendant(root).or(Some(root))
    }

    /// Largest node under `root`, `root` included.
    #[inline]
    pub fn last(&self, root: NodePtr) -> NodePtr {
        let root = root?;
        self.rightmost_descendant(root).or(Some(root))
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color, self.value))
    }
}
