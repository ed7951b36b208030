use std::{borrow::Borrow, cmp::Ordering::*, fmt::Debug};

use log::debug;

use crate::{Cursor, NodePtr, Root, Side, Tree};

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree with room for `capacity` values before the
    /// node arena has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            root: Root::with_capacity(capacity),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.root.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.root.reserve(additional);
        debug!("reserved room for {additional} more values");
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        debug!("clearing {} values", self.len);
        self.root.clear();
        self.len = 0;
    }

    pub fn first(&self) -> Option<&T> {
        self.root.first().map(|id| &self.root.nodes()[id].value)
    }

    pub fn last(&self) -> Option<&T> {
        self.root.last().map(|id| &self.root.nodes()[id].value)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.root.first()?;
        self.len -= 1;
        Some(self.root.erase(first))
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.root.last()?;
        self.len -= 1;
        Some(self.root.erase(last))
    }

    /// A cursor on the smallest value, or the end cursor when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::Tree;
    ///
    /// let tree: Tree<i32> = [5, 2].into_iter().collect();
    /// let mut cursor = tree.begin();
    /// assert_eq!(cursor.value(), Some(&2));
    /// cursor.move_next();
    /// assert_eq!(cursor.value(), Some(&5));
    /// cursor.move_next();
    /// assert!(cursor.is_end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.root.nodes(), self.root.first())
    }

    /// The end marker: a cursor past the largest value.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.root.nodes(), None)
    }
}

impl<T: Ord> Tree<T> {
    /// Adds `value`. Equal values are allowed and land to the right of the
    /// ones already present.
    pub fn insert(&mut self, value: T) {
        let mut parent = None;
        let mut side = Side::Left;
        let mut link = self.root.root();
        while let Some(candidate) = link {
            parent = Some(candidate);
            let candidate = &self.root.nodes()[candidate];
            side = match value.cmp(&candidate.value) {
                Less => Side::Left,
                Equal | Greater => Side::Right,
            };
            link = candidate.child(side);
        }
        self.root.insert(value, parent, side);
        self.len += 1;
    }

    /// A cursor on a value equal to `value`, or the end cursor when there
    /// is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self.root.nodes(), self.find_node(value))
    }

    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).map(|id| &self.root.nodes()[id].value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).is_some()
    }

    /// Removes one value equal to `value`. Returns `false`, leaving the
    /// tree as it was, when there is none.
    pub fn erase<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(value).is_some()
    }

    /// Like [`Tree::erase`], but hands back the removed value.
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find_node(value)?;
        self.len -= 1;
        Some(self.root.erase(node))
    }

    fn find_node<Q>(&self, value: &Q) -> NodePtr
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let nodes = self.root.nodes();
        let mut node = self.root.root();
        while let Some(candidate) = node {
            let candidate_ref = &nodes[candidate];
            match value.cmp(candidate_ref.value.borrow()) {
                Equal => break,
                Less => node = candidate_ref.left,
                Greater => node = candidate_ref.right,
            }
        }
        node
    }
}

impl<T: Debug> Debug for Tree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Tree<T> {}
