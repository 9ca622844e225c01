use itertools::Itertools;
use std::collections::BTreeSet;

/// Lazily yields every subset of `set`, from the empty set up to `set` itself.
///
/// Subsets are produced on demand, so the 2^n of them never need to be held
/// in memory at once.
pub fn powerset<T>(set: BTreeSet<T>) -> impl Iterator<Item = BTreeSet<T>>
where
    T: Ord + Clone,
{
    set.into_iter().powerset().map(|subset| subset.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powerset_of_three() {
        let set: BTreeSet<u8> = vec![1, 2, 3].into_iter().collect();
        let subsets: Vec<BTreeSet<u8>> = powerset(set.clone()).collect();
        assert_eq!(subsets.len(), 8);

        let distinct: BTreeSet<BTreeSet<u8>> = subsets.iter().cloned().collect();
        assert_eq!(distinct.len(), 8);
        assert!(distinct.contains(&BTreeSet::new()));
        assert!(distinct.contains(&set));
        assert!(subsets.iter().all(|s| s.is_subset(&set)));
    }

    #[test]
    fn test_powerset_of_empty_set() {
        let set: BTreeSet<u8> = BTreeSet::new();
        let subsets: Vec<BTreeSet<u8>> = powerset(set).collect();
        assert_eq!(subsets, vec![BTreeSet::new()]);
    }

    #[test]
    fn test_powerset_sizes_follow_binomials() {
        let set: BTreeSet<usize> = (0..5).collect();
        let counts = powerset(set).map(|s| s.len()).counts();
        assert_eq!(counts[&0], 1);
        assert_eq!(counts[&1], 5);
        assert_eq!(counts[&2], 10);
        assert_eq!(counts[&3], 10);
        assert_eq!(counts[&4], 5);
        assert_eq!(counts[&5], 1);
    }
}
