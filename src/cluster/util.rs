use crate::error::{Error, Result};

/// Disjoint-set forest with path compression and union by rank.
///
/// `find(i)` always returns a root `r` with `parent[r] == r`; after
/// `union(a, b)`, `find(a) == find(b)`.
#[derive(Clone, Debug)]
pub(crate) struct UnionFind {
    pub(crate) parent: Vec<usize>,
    pub(crate) rank: Vec<u32>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    /// Merge the sets containing `a` and `b`; returns the surviving root.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }

        let (mut big, mut small) = (ra, rb);
        if self.rank[big] < self.rank[small] {
            std::mem::swap(&mut big, &mut small);
        }

        self.parent[small] = big;
        if self.rank[big] == self.rank[small] {
            self.rank[big] += 1;
        }
        big
    }

    /// Dense labels `0..k`, numbered by the first point of each set in index order.
    pub(crate) fn into_labels(mut self) -> Vec<usize> {
        let n = self.parent.len();
        let mut root_label = vec![usize::MAX; n];
        let mut next = 0;
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let r = self.find(i);
            if root_label[r] == usize::MAX {
                root_label[r] = next;
                next += 1;
            }
            labels.push(root_label[r]);
        }
        labels
    }
}

/// Strategies accept any finite, non-negative radius; zero merges only
/// coincident points.
pub(crate) fn check_radius(radius_km: f64) -> Result<()> {
    if radius_km.is_finite() && radius_km >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "radius_km",
            message: "must be finite and non-negative",
        })
    }
}

/// Canonical form of a labelling: each label replaced by the index of the
/// first point carrying it. Two labellings describe the same partition iff
/// their canonical forms are equal.
pub fn canonical_partition(labels: &[usize]) -> Vec<usize> {
    let mut first_seen: std::collections::HashMap<usize, usize> =
        std::collections::HashMap::new();
    labels
        .iter()
        .enumerate()
        .map(|(i, l)| *first_seen.entry(*l).or_insert(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_find_merges_and_relabels_densely() {
        let mut uf = UnionFind::new(6);
        uf.union(4, 1);
        uf.union(5, 3);
        uf.union(3, 1);
        assert_eq!(uf.find(5), uf.find(4));
        assert_ne!(uf.find(0), uf.find(1));

        let labels = uf.into_labels();
        assert_eq!(labels, vec![0, 1, 2, 1, 1, 1]);
    }

    #[test]
    fn find_returns_root() {
        let mut uf = UnionFind::new(8);
        for i in 1..8 {
            uf.union(i - 1, i);
        }
        let r = uf.find(7);
        assert_eq!(uf.parent[r], r);
        for i in 0..8 {
            assert_eq!(uf.find(i), r);
        }
        assert!(uf.rank[r] <= 3);
    }

    #[test]
    fn canonical_partition_ignores_numbering() {
        assert_eq!(
            canonical_partition(&[7, 3, 7, 9]),
            canonical_partition(&[0, 1, 0, 2])
        );
        assert_ne!(
            canonical_partition(&[0, 0, 1]),
            canonical_partition(&[0, 1, 1])
        );
    }
}
