use alloc::vec::Vec;
use core::mem;

use crate::key::{GroupKey, KeyIndexMap};
use crate::{Coordinate, SectionedEdit};

/// An ordered collection grouped by key.
///
/// Invariants:
/// - `keys` is sorted ascending and has no duplicates.
/// - Every key has a non-empty group (an empty group is indistinguishable from an absent one).
/// - Each element remembers its position in the flat input it was grouped from, so diffs can
///   still be computed against the original order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupedSnapshot<T, K> {
    keys: Vec<K>,
    groups: Vec<Vec<T>>,
    origins: Vec<Vec<usize>>,
    len: usize,
}

impl<T, K> Default for GroupedSnapshot<T, K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, K> GroupedSnapshot<T, K> {
    pub fn empty() -> Self {
        Self {
            keys: Vec::new(),
            groups: Vec::new(),
            origins: Vec::new(),
            len: 0,
        }
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of elements across all groups.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether any group holds an element.
    pub fn has_data(&self) -> bool {
        !self.is_empty()
    }

    pub fn group(&self, index: usize) -> Option<&[T]> {
        self.groups.get(index).map(Vec::as_slice)
    }

    pub fn get(&self, at: Coordinate) -> Option<&T> {
        self.groups.get(at.group)?.get(at.item)
    }

    /// Position of the element at `at` in the flat input the snapshot was built from.
    pub fn origin(&self, at: Coordinate) -> Option<usize> {
        self.origins.get(at.group)?.get(at.item).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> + '_ {
        self.keys.iter().zip(self.groups.iter().map(Vec::as_slice))
    }

    /// Maps every original flat position to the element's coordinate in this snapshot.
    pub fn locations(&self) -> Vec<Coordinate> {
        let mut table = alloc::vec![Coordinate::default(); self.len];
        for (group, origins) in self.origins.iter().enumerate() {
            for (item, &origin) in origins.iter().enumerate() {
                table[origin] = Coordinate::new(group, item);
            }
        }
        table
    }

    /// Elements in the order of the flat input the snapshot was built from.
    pub fn flat(&self) -> Vec<&T> {
        self.locations()
            .into_iter()
            .map(|at| &self.groups[at.group][at.item])
            .collect()
    }

    /// Replays `edit` against this snapshot to rebuild `to`.
    ///
    /// The replay order matches what a host view does inside one batch: element deletions,
    /// group deletions, group insertions (filled from `to`), then element insertions. For an
    /// edit computed from `self` to `to`, the result equals `to`'s keys and groups.
    ///
    /// # Panics
    ///
    /// Panics if `edit` does not fit the two snapshots.
    pub fn reconstruct(&self, edit: &SectionedEdit, to: &Self) -> (Vec<K>, Vec<Vec<T>>)
    where
        T: Clone,
        K: Clone,
    {
        let mut keys = self.keys.clone();
        let mut groups = self.groups.clone();

        for at in edit.deletions.iter().rev() {
            groups[at.group].remove(at.item);
        }
        for &group in edit.deleted_groups.iter().rev() {
            keys.remove(group);
            groups.remove(group);
        }
        for &group in &edit.inserted_groups {
            keys.insert(group, to.keys[group].clone());
            groups.insert(group, to.groups[group].clone());
        }
        for at in &edit.insertions {
            groups[at.group].insert(at.item, to.groups[at.group][at.item].clone());
        }
        (keys, groups)
    }

    fn from_buckets(buckets: Vec<Run<K, T>>, len: usize) -> Self {
        let mut keys = Vec::with_capacity(buckets.len());
        let mut groups = Vec::with_capacity(buckets.len());
        let mut origins = Vec::with_capacity(buckets.len());
        for (key, group, origin) in buckets {
            debug_assert!(!group.is_empty());
            keys.push(key);
            groups.push(group);
            origins.push(origin);
        }
        Self {
            keys,
            groups,
            origins,
            len,
        }
    }
}

impl<T, K: GroupKey> GroupedSnapshot<T, K> {
    /// Groups `items` that are already contiguous by key, in ascending key order.
    ///
    /// This is a linear run split with no hashing. The precondition is the caller's: when it
    /// does not hold, debug builds panic, and release builds merge repeated runs of one key
    /// after sorting the run keys.
    pub fn from_sorted(
        items: impl IntoIterator<Item = T>,
        mut key_of: impl FnMut(&T) -> K,
    ) -> Self {
        let mut runs: Vec<Run<K, T>> = Vec::new();
        let mut len = 0usize;
        for item in items {
            let key = key_of(&item);
            match runs.last_mut() {
                Some((last, group, origins)) if *last == key => {
                    group.push(item);
                    origins.push(len);
                }
                _ => runs.push((key, alloc::vec![item], alloc::vec![len])),
            }
            len += 1;
        }

        let ascending = runs.windows(2).all(|w| w[0].0 < w[1].0);
        if !ascending {
            swarn!(
                runs = runs.len(),
                "GroupedSnapshot::from_sorted: input is not sorted by key"
            );
            debug_assert!(
                ascending,
                "GroupedSnapshot::from_sorted: items must be grouped contiguously in ascending key order"
            );
            runs = merge_runs(runs);
        }

        strace!(len, groups = runs.len(), "GroupedSnapshot::from_sorted");
        Self::from_buckets(runs, len)
    }

    /// Groups `items` in any order.
    ///
    /// Elements keep their encounter order inside each group, and groups are emitted in
    /// ascending key order.
    pub fn from_unsorted(
        items: impl IntoIterator<Item = T>,
        mut key_of: impl FnMut(&T) -> K,
    ) -> Self {
        let mut index = KeyIndexMap::<K>::new();
        let mut buckets: Vec<(Vec<T>, Vec<usize>)> = Vec::new();
        let mut len = 0usize;
        for item in items {
            let key = key_of(&item);
            let bucket = match index.get(&key) {
                Some(&bucket) => bucket,
                None => {
                    let bucket = buckets.len();
                    index.insert(key, bucket);
                    buckets.push((Vec::new(), Vec::new()));
                    bucket
                }
            };
            buckets[bucket].0.push(item);
            buckets[bucket].1.push(len);
            len += 1;
        }

        let mut order: Vec<(K, usize)> = index.into_iter().collect();
        order.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let sorted = order
            .into_iter()
            .map(|(key, bucket)| {
                let (group, origins) = mem::take(&mut buckets[bucket]);
                (key, group, origins)
            })
            .collect();

        strace!(len, groups = buckets.len(), "GroupedSnapshot::from_unsorted");
        Self::from_buckets(sorted, len)
    }

    /// Returns the group stored under `key`.
    pub fn group_for_key(&self, key: &K) -> Option<&[T]> {
        let index = self.keys.binary_search(key).ok()?;
        self.group(index)
    }

    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.keys.binary_search(key).ok()
    }
}

/// Sorts runs by key and concatenates runs that share one, keeping encounter order.
type Run<K, T> = (K, Vec<T>, Vec<usize>);

fn merge_runs<T, K: Ord>(mut runs: Vec<Run<K, T>>) -> Vec<Run<K, T>> {
    runs.sort_by(|a, b| a.0.cmp(&b.0));
    let mut merged: Vec<Run<K, T>> = Vec::with_capacity(runs.len());
    for (key, group, origins) in runs {
        match merged.last_mut() {
            Some((last, g, o)) if *last == key => {
                g.extend(group);
                o.extend(origins);
            }
            _ => merged.push((key, group, origins)),
        }
    }
    merged
}
