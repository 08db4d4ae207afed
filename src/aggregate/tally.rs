use itertools::Itertools;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Per-key running totals that remember the order in which keys first appeared
/// and the largest total reached so far.
#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    slots: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
    max: u64,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            entries: Vec::new(),
            max: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    /// Adds `amount` to the bucket for `key`, creating it if needed, and raises the
    /// maximum when the bucket's new total exceeds it.
    pub(crate) fn add<Q>(&mut self, key: &Q, amount: u64)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let slot = match self.slots.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                let key = key.to_owned();
                self.slots.insert(key.clone(), slot);
                self.entries.push((key, 0));
                slot
            }
        };

        let total = &mut self.entries[slot].1;
        *total = total.saturating_add(amount);
        if *total > self.max {
            self.max = *total;
        }
    }

    pub(crate) fn max(&self) -> u64 {
        self.max
    }

    /// Buckets in first-appearance order.
    pub(crate) fn into_entries(self) -> Vec<(K, u64)> {
        self.entries
    }

    /// The `n` largest buckets, smallest first.
    ///
    /// Buckets are ranked by total, then by first appearance, before the ranking is
    /// reversed; so among equal totals the later-seen key comes first in the output.
    pub(crate) fn top_ascending(self, n: usize) -> Vec<(K, u64)> {
        let mut top: Vec<_> = self
            .entries
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .take(n)
            .collect();
        top.reverse();
        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_appearance_order() {
        let mut tally: Tally<String> = Tally::default();
        tally.add("b", 1);
        tally.add("a", 1);
        tally.add("b", 1);

        assert_eq!(
            tally.into_entries(),
            vec![("b".to_string(), 2), ("a".to_string(), 1)]
        );
    }

    #[test]
    fn test_running_max() {
        let mut tally: Tally<&str> = Tally::default();
        assert_eq!(tally.max(), 0);
        tally.add(&"x", 0);
        assert_eq!(tally.max(), 0);
        tally.add(&"x", 4);
        tally.add(&"y", 3);
        assert_eq!(tally.max(), 4);
        tally.add(&"y", 2);
        assert_eq!(tally.max(), 5);
    }

    #[test]
    fn test_top_ascending_ties_by_first_appearance() {
        let mut tally: Tally<&str> = Tally::default();
        for (key, amount) in [("a", 1), ("b", 3), ("c", 3), ("d", 2)] {
            tally.add(&key, amount);
        }

        assert_eq!(tally.top_ascending(3), vec![("d", 2), ("c", 3), ("b", 3)]);
    }

    #[test]
    fn test_top_ascending_fewer_than_n() {
        let mut tally: Tally<u8> = Tally::default();
        tally.add(&1u8, 5);
        assert_eq!(tally.top_ascending(10), vec![(1, 5)]);
    }
}
