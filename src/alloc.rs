use std::ops::{Index, IndexMut};

use crate::{Node, NodeId};

/// Slot arena owning every node of a tree.
///
/// Released slots go on a free list and are handed out again by the next
/// [`Nodes::alloc`]. Releasing a slot has no effect on any other slot.
#[derive(Clone)]
pub(crate) struct Nodes<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Nodes<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Nodes {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Stores `value` in a detached red node.
    pub fn alloc(&mut self, value: T) -> NodeId {
        let node = Node::new(value);
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Gives the slot back and returns the stored value.
    ///
    /// The node must already be unlinked from the tree.
    pub fn release(&mut self, id: NodeId) -> T {
        let node = self.slots[id.0]
            .take()
            .expect("released a node that was not allocated");
        debug_assert!(
            node.parent.is_none() && node.left.is_none() && node.right.is_none(),
            "released a node that is still linked"
        );
        self.free.push(id);
        node.value
    }

    /// Exchanges the values stored in two live nodes, leaving links and
    /// colors untouched.
    pub fn swap_values(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let mut other = self.slots[b.0]
            .take()
            .expect("node id refers to a released slot");
        std::mem::swap(&mut self[a].value, &mut other.value);
        self.slots[b.0] = Some(other);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        // Free slots are reused before the vector grows.
        self.slots.reserve(additional.saturating_sub(self.free.len()));
    }

    /// Number of live nodes.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<T> Index<NodeId> for Nodes<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        self.slots[id.0]
            .as_ref()
            .expect("node id refers to a released slot")
    }
}

impl<T> IndexMut<NodeId> for Nodes<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id.0]
            .as_mut()
            .expect("node id refers to a released slot")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Color;

    use pretty_assertions::assert_eq;

    #[test]
    fn alloc_hands_out_red_detached_nodes() {
        let mut nodes = Nodes::with_capacity(4);
        let id = nodes.alloc("a");
        assert_eq!(Color::Red, nodes[id].color);
        assert_eq!(None, nodes[id].parent);
        assert_eq!(None, nodes[id].left);
        assert_eq!(None, nodes[id].right);
        assert_eq!(1, nodes.live());
    }

    #[test]
    fn release_recycles_slots() {
        let mut nodes = Nodes::with_capacity(0);
        let a = nodes.alloc(1);
        let b = nodes.alloc(2);
        assert_eq!(1, nodes.release(a));
        assert_eq!(1, nodes.live());

        let c = nodes.alloc(3);
        assert_eq!(a, c);
        assert_eq!(3, nodes[c].value);
        assert_eq!(2, nodes[b].value);
        assert_eq!(2, nodes.live());
    }

    #[test]
    fn release_leaves_former_children_alive() {
        let mut nodes = Nodes::with_capacity(0);
        let parent = nodes.alloc(10);
        let child = nodes.alloc(5);
        nodes[parent].left = Some(child);
        nodes[child].parent = Some(parent);

        // Detach, then release: the child must survive.
        nodes[parent].left = None;
        nodes[child].parent = None;
        assert_eq!(10, nodes.release(parent));
        assert_eq!(5, nodes[child].value);
    }

    #[test]
    fn swap_values_keeps_links() {
        let mut nodes = Nodes::with_capacity(0);
        let a = nodes.alloc("a");
        let b = nodes.alloc("b");
        nodes[a].right = Some(b);
        nodes[b].parent = Some(a);
        nodes[a].color = Color::Black;

        nodes.swap_values(a, b);
        assert_eq!("b", nodes[a].value);
        assert_eq!("a", nodes[b].value);
        assert_eq!(Some(b), nodes[a].right);
        assert_eq!(Color::Black, nodes[a].color);
        assert_eq!(Color::Red, nodes[b].color);
    }

    #[test]
    #[should_panic]
    fn index_after_release_panics() {
        let mut nodes = Nodes::with_capacity(0);
        let a = nodes.alloc(1);
        nodes.release(a);
        let _ = nodes[a].value;
    }

    #[test]
    fn reserve_accounts_for_free_slots() {
        let mut nodes = Nodes::with_capacity(0);
        let ids: Vec<_> = (0..8).map(|v| nodes.alloc(v)).collect();
        for &id in &ids[..4] {
            nodes.release(id);
        }
        let before = nodes.capacity();
        nodes.reserve(4);
        assert_eq!(before, nodes.capacity());
        nodes.reserve(16);
        assert!(nodes.capacity() >= 4 + 16);
    }
}
