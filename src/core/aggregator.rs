use std::collections::btree_map::{self, BTreeMap};

/// Two-level counter: outer key → inner key → accumulated count.
///
/// Inserting an existing `(outer, inner)` pair adds to its bucket; an outer key
/// is created on first use and never replaced. Iteration follows key order so
/// the same facts always produce the same output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCounts<O: Ord, I: Ord> {
    groups: BTreeMap<O, BTreeMap<I, u64>>,
}

impl<O: Ord, I: Ord> Default for GroupedCounts<O, I> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<O: Ord, I: Ord> GroupedCounts<O, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, outer: O, inner: I, count: u64) {
        *self
            .groups
            .entry(outer)
            .or_default()
            .entry(inner)
            .or_insert(0) += count;
    }

    pub fn increment(&mut self, outer: O, inner: I) {
        self.accumulate(outer, inner, 1);
    }

    pub fn get(&self, outer: &O) -> Option<&BTreeMap<I, u64>> {
        self.groups.get(outer)
    }

    pub fn count(&self, outer: &O, inner: &I) -> u64 {
        self.groups
            .get(outer)
            .and_then(|inner_map| inner_map.get(inner))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self, outer: &O) -> u64 {
        self.groups
            .get(outer)
            .map(|inner_map| inner_map.values().sum())
            .unwrap_or(0)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, O, BTreeMap<I, u64>> {
        self.groups.iter()
    }

    /// Flattened `(outer, inner, count)` triples in key order.
    pub fn triples(&self) -> impl Iterator<Item = (&O, &I, u64)> + '_ {
        self.groups.iter().flat_map(|(outer, inner_map)| {
            inner_map
                .iter()
                .map(move |(inner, count)| (outer, inner, *count))
        })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<O: Ord, I: Ord> FromIterator<(O, I, u64)> for GroupedCounts<O, I> {
    fn from_iter<T: IntoIterator<Item = (O, I, u64)>>(iter: T) -> Self {
        let mut grouped = Self::new();
        for (outer, inner, count) in iter {
            grouped.accumulate(outer, inner, count);
        }
        grouped
    }
}

impl<O: Ord, I: Ord> FromIterator<(O, I)> for GroupedCounts<O, I> {
    fn from_iter<T: IntoIterator<Item = (O, I)>>(iter: T) -> Self {
        let mut grouped = Self::new();
        for (outer, inner) in iter {
            grouped.increment(outer, inner);
        }
        grouped
    }
}

impl<'a, O: Ord, I: Ord> IntoIterator for &'a GroupedCounts<O, I> {
    type Item = (&'a O, &'a BTreeMap<I, u64>);
    type IntoIter = btree_map::Iter<'a, O, BTreeMap<I, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
