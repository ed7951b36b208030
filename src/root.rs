use log::trace;

use crate::{Color, NodeId, NodePtr, Root, Side, alloc::Nodes};

impl<T> Root<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Root {
            root: None,
            nodes: Nodes::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn root(&self) -> NodePtr {
        self.root
    }

    #[inline]
    pub fn nodes(&self) -> &Nodes<T> {
        &self.nodes
    }

    pub fn first(&self) -> NodePtr {
        self.nodes.first(self.root)
    }

    pub fn last(&self) -> NodePtr {
        self.nodes.last(self.root)
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Allocates `value` as a red leaf under `parent` (or as the root) and
    /// rebalances.
    pub fn insert(&mut self, value: T, parent: NodePtr, side: Side) -> NodeId {
        let node = self.nodes.alloc(value);
        match parent {
            Some(parent) => self.nodes.link(node, parent, side),
            None => self.root = Some(node),
        }
        self.insert_color(node);
        node
    }

    /// Unlinks `node`, rebalances and hands back the value it held.
    ///
    /// With two children the in-order successor is the node actually
    /// unlinked; its value moves into `node` first.
    pub fn erase(&mut self, node: NodeId) -> T {
        let (victim, replacement) = match (self.nodes[node].left, self.nodes[node].right) {
            (Some(_), Some(_)) => {
                let successor = self
                    .nodes
                    .successor_in_subtree(node)
                    .expect("a node with a right child has a successor below it");
                // `node` keeps its identity and color; the value to return
                // travels down to the slot being released.
                self.nodes.swap_values(node, successor);
                (successor, self.nodes[successor].right)
            }
            (left, right) => (node, left.or(right)),
        };

        let parent = self.nodes[victim].parent;
        let color = self.nodes[victim].color;
        self.nodes
            .change_child(victim, replacement, parent, &mut self.root);
        self.nodes.set_parent(replacement, parent);

        // Detach before anything else can observe the victim.
        {
            let victim = &mut self.nodes[victim];
            victim.parent = None;
            victim.left = None;
            victim.right = None;
        }

        if color == Color::Black {
            self.erase_color(parent, replacement);
        }
        self.nodes.set_color(self.root, Color::Black);
        self.nodes.release(victim)
    }
}

// Private
impl<T> Root<T> {
    fn insert_color(&mut self, mut node: NodeId) {
        /*
         * Loop invariant: node is red.
         */
        while let Some(parent) = self.nodes[node].parent {
            if self.nodes[parent].is_black() {
                break;
            }
            // A red parent is never the root, so there is a grandparent.
            let Some(gparent) = self.nodes[parent].parent else {
                break;
            };
            let parent_side = self.nodes.side_of(parent).unwrap_or(Side::Left);
            let uncle = self.nodes[gparent].child(parent_side.opposite());

            if self.nodes.is_red(uncle) {
                /*
                 * Case 1 - uncle is red (color flips).
                 *
                 *       G            g
                 *      / \          / \
                 *     p   u  -->   P   U
                 *    /            /
                 *   n            n
                 *
                 * g's parent might be red, so recurse at g.
                 */
                trace!("insert: color flip at {gparent:?}");
                self.nodes[gparent].color = Color::Red;
                self.nodes[parent].color = Color::Black;
                self.nodes.set_color(uncle, Color::Black);
                node = gparent;
                continue;
            }

            let node_side = self.nodes.side_of(node).unwrap_or(Side::Left);
            if node_side == parent_side {
                /*
                 * Case 3 - uncle is black, n and p in a line
                 * (rotate gparent away from p).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 *
                 * g now hangs under the black P, which ends the loop.
                 */
                trace!("insert: line at {gparent:?}");
                self.nodes[parent].color = Color::Black;
                self.nodes[gparent].color = Color::Red;
                self.nodes
                    .rotate(gparent, parent_side.opposite(), &mut self.root);
                node = gparent;
            } else {
                /*
                 * Case 2 - uncle is black, n and p form a triangle
                 * (rotate parent toward its own side).
                 *
                 *      G             G
                 *     / \           / \
                 *    p   U  -->    n   U
                 *     \           /
                 *      n         p
                 *
                 * p is now a line below n; case 3 follows.
                 */
                trace!("insert: triangle at {parent:?}");
                self.nodes.rotate(parent, parent_side, &mut self.root);
                node = parent;
            }
        }
        self.nodes.set_color(self.root, Color::Black);
    }

    /// Repays the black deficit on the path through `node`, a child slot of
    /// `parent` (the slot may be empty).
    fn erase_color(&mut self, mut parent: NodePtr, mut node: NodePtr) {
        /*
         * Loop invariants:
         * - node is black (or empty)
         * - every leaf path through node has one black node fewer than
         *   the other leaf paths through parent.
         */
        while let Some(p) = parent {
            if self.nodes.is_red(node) {
                break;
            }
            let side = if self.nodes[p].left == node {
                Side::Left
            } else {
                Side::Right
            };
            let Some(sibling) = self.nodes[p].child(side.opposite()) else {
                node = parent;
                parent = self.nodes[p].parent;
                continue;
            };

            if self.nodes[sibling].is_red() {
                /*
                 * Case 1 - red sibling (rotate parent toward n).
                 *
                 *     P               S
                 *    / \             / \
                 *   N   s    -->    p   Sr
                 *      / \         / \
                 *     Sl  Sr      N   Sl
                 *
                 * N now has a black sibling.
                 */
                trace!("erase: red sibling {sibling:?}");
                self.nodes[sibling].color = Color::Black;
                self.nodes[p].color = Color::Red;
                self.nodes.rotate(p, side, &mut self.root);
                continue;
            }

            let near = self.nodes[sibling].child(side);
            let far = self.nodes[sibling].child(side.opposite());

            if self.nodes.is_red(far) {
                /*
                 * Case 4 - far nephew red (rotate parent toward n).
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     N   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      N  (sl)
                 */
                trace!("erase: far nephew {far:?}");
                self.nodes[sibling].color = self.nodes[p].color;
                self.nodes[p].color = Color::Black;
                self.nodes.set_color(far, Color::Black);
                self.nodes.rotate(p, side, &mut self.root);
                return;
            }

            if self.nodes.is_red(near) {
                /*
                 * Case 3 - near nephew red (rotate sibling away from n).
                 *
                 *   (p)           (p)
                 *   / \           / \
                 *  N   S    -->  N   Sl
                 *     / \             \
                 *    sl  Sr            s
                 *                       \
                 *                        Sr
                 *
                 * Case 4 follows.
                 */
                trace!("erase: near nephew {near:?}");
                self.nodes[sibling].color = Color::Red;
                self.nodes.set_color(near, Color::Black);
                self.nodes.rotate(sibling, side.opposite(), &mut self.root);
                continue;
            }

            /*
             * Case 2 - sibling color flip.
             *
             *    (p)           (p)
             *    / \           / \
             *   N   S    -->  N   s
             *      / \           / \
             *     Sl  Sr        Sl  Sr
             *
             * The deficit moves up to p; a red p is blackened on exit.
             */
            trace!("erase: push deficit up to {p:?}");
            self.nodes[sibling].color = Color::Red;
            node = parent;
            parent = self.nodes[p].parent;
        }
        self.nodes.set_color(node, Color::Black);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    fn values(root: &Root<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut current = root.first();
        while let Some(id) = current {
            out.push(root.nodes[id].value);
            current = root.nodes.next(id);
        }
        out
    }

    // Descends like Tree::insert, without the public wrapper.
    fn push(root: &mut Root<i32>, value: i32) -> NodeId {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = root.root;
        while let Some(id) = current {
            parent = Some(id);
            side = if value < root.nodes[id].value {
                Side::Left
            } else {
                Side::Right
            };
            current = root.nodes[id].child(side);
        }
        root.insert(value, parent, side)
    }

    #[test]
    fn lone_root_is_black() {
        let mut root = Root::with_capacity(1);
        let id = push(&mut root, 1);
        assert_eq!(Some(id), root.root());
        assert_eq!(Color::Black, root.nodes[id].color);
    }

    #[test]
    fn ascending_inserts_rotate_into_balance() {
        let mut root = Root::with_capacity(3);
        let a = push(&mut root, 1);
        let b = push(&mut root, 2);
        let c = push(&mut root, 3);

        assert_eq!(Some(b), root.root());
        assert_eq!(Color::Black, root.nodes[b].color);
        assert_eq!(Some(a), root.nodes[b].left);
        assert_eq!(Some(c), root.nodes[b].right);
        assert_eq!(Color::Red, root.nodes[a].color);
        assert_eq!(Color::Red, root.nodes[c].color);
    }

    #[test]
    fn triangle_becomes_line() {
        let mut root = Root::with_capacity(3);
        let a = push(&mut root, 10);
        let b = push(&mut root, 5);
        let c = push(&mut root, 7);

        assert_eq!(Some(c), root.root());
        assert_eq!(Some(b), root.nodes[c].left);
        assert_eq!(Some(a), root.nodes[c].right);
        assert_eq!(vec![5, 7, 10], values(&root));
    }

    #[test]
    fn uncle_flip_recolors() {
        let mut root = Root::with_capacity(4);
        let a = push(&mut root, 2);
        let b = push(&mut root, 1);
        let c = push(&mut root, 3);
        let d = push(&mut root, 4);

        assert_eq!(Some(a), root.root());
        assert_eq!(Color::Black, root.nodes[a].color);
        assert_eq!(Color::Black, root.nodes[b].color);
        assert_eq!(Color::Black, root.nodes[c].color);
        assert_eq!(Color::Red, root.nodes[d].color);
    }

    #[test]
    fn erase_two_children_moves_successor_value() {
        let mut root = Root::with_capacity(3);
        push(&mut root, 1);
        let b = push(&mut root, 2);
        push(&mut root, 3);

        assert_eq!(2, root.erase(b));
        // The root slot survives and now carries the successor's value.
        assert_eq!(Some(b), root.root());
        assert_eq!(3, root.nodes[b].value);
        assert_eq!(Color::Black, root.nodes[b].color);
        assert_eq!(vec![1, 3], values(&root));
    }

    #[test]
    fn erase_keeps_replacement_subtree_alive() {
        let mut root = Root::with_capacity(4);
        let a = push(&mut root, 2);
        push(&mut root, 1);
        let c = push(&mut root, 3);
        let d = push(&mut root, 4);

        // 3 has a single child, 4, which must take its place intact.
        assert_eq!(3, root.erase(c));
        assert_eq!(Some(d), root.nodes[a].right);
        assert_eq!(Some(a), root.nodes[d].parent);
        assert_eq!(Color::Black, root.nodes[d].color);
        assert_eq!(vec![1, 2, 4], values(&root));
    }

    #[test]
    fn erase_last_node_empties() {
        let mut root = Root::with_capacity(1);
        let a = push(&mut root, 1);
        assert_eq!(1, root.erase(a));
        assert_eq!(None, root.root());
        assert_eq!(0, root.nodes.live());
    }
}
