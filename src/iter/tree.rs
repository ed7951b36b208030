use std::iter::FusedIterator;

use crate::{NodePtr, Tree, alloc::Nodes};

impl<T> Tree<T> {
    /// Gets an iterator over the values of the tree, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack::Tree;
    ///
    /// let tree: Tree<i32> = [3, 1, 2, 1].into_iter().collect();
    /// let values: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(values, [1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: self.root.nodes(),
            front: self.root.first(),
            back: self.root.last(),
            len: self.len,
        }
    }
}

/// An iterator over shared references to the values of a [`Tree`], in
/// ascending order.
pub struct Iter<'a, T> {
    nodes: &'a Nodes<T>,
    front: NodePtr,
    back: NodePtr,
    len: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let current = self.front?;
        self.len -= 1;
        self.front = self.nodes.next(current);
        Some(&self.nodes[current].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn min(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next()
    }

    fn max(mut self) -> Option<&'a T>
    where
        &'a T: Ord,
    {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let current = self.back?;
        self.len -= 1;
        self.back = self.nodes.prev(current);
        Some(&self.nodes[current].value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An owning iterator over the values of a [`Tree`], in ascending order.
pub struct IntoIter<T>(Tree<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Tree<T> {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Ord + Copy + 'a> Extend<&'a T> for Tree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod test {
    use crate::Tree;

    use pretty_assertions::assert_eq;

    #[test]
    fn iter_empty() {
        let tree = Tree::<i32>::new();
        let mut iter = tree.iter();
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next_back());
        assert_eq!(0, iter.len());
    }

    #[test]
    fn iter_both_ends_meet() {
        let tree: Tree<i32> = (1..=5).collect();
        let mut iter = tree.iter();
        assert_eq!(5, iter.len());
        assert_eq!(Some(&1), iter.next());
        assert_eq!(Some(&5), iter.next_back());
        assert_eq!(Some(&2), iter.next());
        assert_eq!(Some(&4), iter.next_back());
        assert_eq!(1, iter.len());
        assert_eq!(Some(&3), iter.next());
        assert_eq!(None, iter.next_back());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn iter_rev() {
        let tree: Tree<i32> = [2, 5, 3, 9, 15, 6].into_iter().collect();
        let values: Vec<i32> = tree.iter().rev().copied().collect();
        assert_eq!(vec![15, 9, 6, 5, 3, 2], values);
        assert_eq!(Some(&2), tree.iter().min());
        assert_eq!(Some(&15), tree.iter().max());
    }

    #[test]
    fn into_iter_drains_in_order() {
        let tree: Tree<String> = ["b", "c", "a"].into_iter().map(String::from).collect();
        let values: Vec<String> = tree.into_iter().collect();
        assert_eq!(vec!["a", "b", "c"], values);

        let tree: Tree<i32> = (0..4).collect();
        let mut iter = tree.into_iter();
        assert_eq!(4, iter.len());
        assert_eq!(Some(3), iter.next_back());
        assert_eq!(Some(0), iter.next());
        assert_eq!(vec![1, 2], iter.collect::<Vec<_>>());
    }

    #[test]
    fn for_loop_over_reference() {
        let tree: Tree<i32> = (0..10).rev().collect();
        let mut expected = 0;
        for value in &tree {
            assert_eq!(expected, *value);
            expected += 1;
        }
        assert_eq!(10, expected);
    }

    #[test]
    fn extend_by_reference() {
        let mut tree: Tree<i32> = Tree::new();
        tree.extend(&[3, 1, 2]);
        tree.extend(vec![0]);
        assert_eq!(vec![0, 1, 2, 3], tree.iter().copied().collect::<Vec<_>>());
        assert!(tree.check());
    }
}
