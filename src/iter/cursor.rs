use std::fmt::Debug;

use crate::{NodePtr, alloc::Nodes};

/// A position in a [`Tree`](crate::Tree): either on a value or on the end
/// marker past the largest one.
///
/// A cursor borrows its tree, so the tree cannot change while the cursor is
/// alive. Stepping follows parent and child links only, so it keeps no state
/// besides the current position.
pub struct Cursor<'a, T> {
    nodes: &'a Nodes<T>,
    current: NodePtr,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(nodes: &'a Nodes<T>, current: NodePtr) -> Self {
        Cursor { nodes, current }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The value under the cursor, `None` at the end marker.
    #[inline]
    pub fn value(&self) -> Option<&'a T> {
        let nodes = self.nodes;
        self.current.map(|id| &nodes[id].value)
    }

    /// Steps to the next larger value. Does nothing at the end marker.
    pub fn move_next(&mut self) {
        if let Some(id) = self.current {
            self.current = self.nodes.next(id);
        }
    }

    /// Steps to the next smaller value; stepping back from the smallest
    /// value lands on the end marker. Does nothing at the end marker.
    pub fn move_prev(&mut self) {
        if let Some(id) = self.current {
            self.current = self.nodes.prev(id);
        }
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.nodes, other.nodes) && self.current == other.current
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: Debug> Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}
