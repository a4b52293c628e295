use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition groups elements of type `I` into disjoint blocks. Throughout refinement
/// the blocks stay pairwise disjoint and their union stays fixed, so a partition is a
/// faithful snapshot of which elements are currently considered equivalent.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators
    /// which yield elements of type `I`.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .collect(),
        )
    }

    /// Returns the index of the block containing `elem`, if any.
    pub fn block_of(&self, elem: &I) -> Option<usize> {
        self.0.iter().position(|block| block.contains(elem))
    }

    /// Computes the union of all blocks.
    pub fn union_all(&self) -> BTreeSet<I>
    where
        I: Clone,
    {
        self.0.iter().flatten().cloned().collect()
    }

    /// Verifies that the blocks are pairwise disjoint, i.e. that no element
    /// appears in more than one block.
    pub fn is_disjoint(&self) -> bool {
        let total: usize = self.0.iter().map(|block| block.len()).sum();
        self.0
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
            .eq(&total)
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn partition_equality_ignores_block_order() {
        let left = Partition::new([vec![1, 2], vec![3]]);
        let right = Partition::new([vec![3], vec![2, 1]]);
        assert_eq!(left, right);
        assert_ne!(left, Partition::new([vec![1, 2, 3]]));
    }

    #[test]
    fn partition_block_queries() {
        let partition = Partition::new([vec!["a", "b"], vec!["c"]]);
        assert_eq!(partition.block_of(&"c"), Some(1));
        assert_eq!(partition.block_of(&"d"), None);
        assert!(partition.is_disjoint());
        assert_eq!(partition.union_all().len(), 3);

        let overlapping = Partition::new([vec!["a", "b"], vec!["b"]]);
        assert!(!overlapping.is_disjoint());
    }
}
