/// Disjoint-set forest over the cells of a grid, addressed by row-major cell index.
///
/// `union` always hangs the second set's root under the first set's root, so which node ends up
/// as a root depends on argument order even though the resulting sets do not. `find` halves the
/// paths it walks; this never changes which elements are in the same set.
///
/// Indices must be below the `len` the sets were created with.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parents: Vec<usize>,
}

impl DisjointSets {
    /// Every element starts in a set of its own.
    pub fn new(len: usize) -> DisjointSets {
        DisjointSets { parents: (0..len).collect() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn find(&mut self, element: usize) -> usize {
        let mut node = element;
        while self.parents[node] != node {
            let grandparent = self.parents[self.parents[node]];
            self.parents[node] = grandparent;
            node = grandparent;
        }
        node
    }

    /// Merge the set of `b` into the set of `a`.
    /// Returns false if they were already the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            false
        } else {
            self.parents[root_b] = root_a;
            true
        }
    }

    #[inline]
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// The number of distinct sets.
    pub fn sets_count(&self) -> usize {
        self.parents.iter().enumerate().filter(|&(i, &parent)| i == parent).count()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn starts_disconnected() {
        let mut sets = DisjointSets::new(4);
        assert_eq!(sets.len(), 4);
        assert_eq!(sets.sets_count(), 4);
        for i in 0..4 {
            assert_eq!(sets.find(i), i);
        }
        assert!(!sets.connected(0, 1));
        assert!(sets.connected(2, 2));
    }

    #[test]
    fn union_hangs_second_root_under_first() {
        let mut sets = DisjointSets::new(5);
        assert!(sets.union(0, 1));
        assert_eq!(sets.find(1), 0);
        assert!(sets.union(3, 1));
        assert_eq!(sets.find(0), 3);
        assert_eq!(sets.find(1), 3);
        assert!(!sets.union(0, 3));
        assert_eq!(sets.sets_count(), 3);
        assert!(sets.connected(1, 3));
        assert!(!sets.connected(1, 4));
    }

    #[test]
    fn union_is_transitive() {
        let mut sets = DisjointSets::new(100);
        for i in 1..100 {
            sets.union(i - 1, i);
        }
        assert_eq!(sets.sets_count(), 1);
        assert!(sets.connected(0, 99));
        assert!(sets.connected(99, 42));
    }
}
