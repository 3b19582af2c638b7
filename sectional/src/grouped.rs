use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::sequence;
use crate::{Change, Coordinate, GroupedSnapshot};

/// Which element order the element-level diff aligns on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Diff each surviving group against its counterpart, in encounter order.
    ///
    /// Reordering the input across groups produces no element edits as long as every group keeps
    /// its contents.
    #[default]
    Grouped,
    /// Diff the flat input sequences in their original order, then remap every position to its
    /// `(group, item)` coordinate.
    Original,
}

/// The structural edits between two grouped snapshots.
///
/// Group indices in `deleted_groups` and coordinates in `deletions` refer to the old snapshot;
/// `inserted_groups` and `insertions` refer to the new one. All four lists are sorted ascending.
/// Element edits inside a deleted or inserted group are never reported: the group edit covers
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionedEdit {
    pub inserted_groups: Vec<usize>,
    pub deleted_groups: Vec<usize>,
    pub insertions: Vec<Coordinate>,
    pub deletions: Vec<Coordinate>,
    /// Whether the old snapshot held any element.
    pub had_data: bool,
    /// Whether the new snapshot holds any element.
    pub has_data: bool,
}

impl SectionedEdit {
    /// Diffs two flat collections as a single group (`group = 0`).
    pub fn flat<T>(from: &[T], to: &[T], is_equal: impl FnMut(&T, &T) -> bool) -> Self {
        let changes = sequence::diff(from, to, is_equal);
        let (insertions, deletions) = sequence::split(&changes, Coordinate::flat, Coordinate::flat);
        Self {
            inserted_groups: Vec::new(),
            deleted_groups: Vec::new(),
            insertions,
            deletions,
            had_data: !from.is_empty(),
            has_data: !to.is_empty(),
        }
    }

    pub fn has_changes(&self) -> bool {
        !(self.insertions.is_empty()
            && self.deletions.is_empty()
            && self.inserted_groups.is_empty()
            && self.deleted_groups.is_empty())
    }

    /// Whether the edit crosses an empty/non-empty boundary.
    ///
    /// Most host views cannot batch-animate out of an uninitialized empty state (or into one), so
    /// such transitions should be applied as a full reload.
    pub fn needs_reload(&self) -> bool {
        self.had_data != self.has_data
    }

    /// Shifts every group index by `base`, e.g. from a component's local numbering into a
    /// composite's global one.
    pub fn offset_groups(mut self, base: usize) -> Self {
        if base == 0 {
            return self;
        }
        for group in self
            .inserted_groups
            .iter_mut()
            .chain(self.deleted_groups.iter_mut())
        {
            *group += base;
        }
        for at in self.insertions.iter_mut().chain(self.deletions.iter_mut()) {
            at.group += base;
        }
        self
    }
}

impl fmt::Display for SectionedEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "inserted groups: {:?}", self.inserted_groups)?;
        writeln!(f, "insertions: {:?}", self.insertions)?;
        writeln!(f, "deleted groups: {:?}", self.deleted_groups)?;
        write!(f, "deletions: {:?}", self.deletions)
    }
}

/// Diffs two grouped snapshots.
///
/// ```
/// use sectional::{Coordinate, GroupedDiff, GroupedSnapshot};
///
/// let old = GroupedSnapshot::from_unsorted([(1, "a"), (2, "b")], |e| e.0);
/// let new = GroupedSnapshot::from_unsorted([(2, "b"), (2, "c")], |e| e.0);
/// let edit = GroupedDiff::new(&old, &new).diff(|a, b| a == b);
/// assert_eq!(edit.deleted_groups, [0]);
/// assert_eq!(edit.insertions, [Coordinate::new(0, 1)]);
/// ```
#[derive(Debug)]
pub struct GroupedDiff<'a, T, K> {
    from: &'a GroupedSnapshot<T, K>,
    to: &'a GroupedSnapshot<T, K>,
    alignment: Alignment,
}

impl<T, K> Clone for GroupedDiff<'_, T, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, K> Copy for GroupedDiff<'_, T, K> {}

impl<'a, T, K> GroupedDiff<'a, T, K> {
    pub fn new(from: &'a GroupedSnapshot<T, K>, to: &'a GroupedSnapshot<T, K>) -> Self {
        Self {
            from,
            to,
            alignment: Alignment::default(),
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Diffs with `==` on group keys.
    pub fn diff(self, is_equal: impl FnMut(&T, &T) -> bool) -> SectionedEdit
    where
        K: PartialEq,
    {
        self.diff_with(is_equal, |a, b| a == b)
    }

    pub fn diff_with(
        self,
        mut is_equal: impl FnMut(&T, &T) -> bool,
        is_equal_key: impl FnMut(&K, &K) -> bool,
    ) -> SectionedEdit {
        let from = self.from;
        let to = self.to;

        let key_changes = sequence::diff(from.keys(), to.keys(), is_equal_key);
        let (inserted_groups, deleted_groups) = sequence::split(&key_changes, |i| i, |i| i);

        // Surviving groups, in both directions.
        let pairs = sequence::matches(from.group_count(), to.group_count(), &key_changes);
        let mut to_group = vec![None; from.group_count()];
        let mut from_group = vec![None; to.group_count()];
        for &(f, t) in &pairs {
            to_group[f] = Some(t);
            from_group[t] = Some(f);
        }

        let mut insertions = Vec::new();
        let mut deletions = Vec::new();
        match self.alignment {
            Alignment::Grouped => {
                for &(f, t) in &pairs {
                    let (Some(a), Some(b)) = (from.group(f), to.group(t)) else {
                        continue;
                    };
                    for change in sequence::diff(a, b, &mut is_equal) {
                        match change {
                            Change::Insert(i) => insertions.push(Coordinate::new(t, i)),
                            Change::Delete(i) => deletions.push(Coordinate::new(f, i)),
                        }
                    }
                }
            }
            Alignment::Original => {
                let from_at = from.locations();
                let to_at = to.locations();
                let a = from.flat();
                let b = to.flat();
                let changes = sequence::diff(&a, &b, |x, y| is_equal(*x, *y));

                for change in &changes {
                    match *change {
                        Change::Delete(i) if to_group[from_at[i].group].is_some() => {
                            deletions.push(from_at[i]);
                        }
                        Change::Insert(j) if from_group[to_at[j].group].is_some() => {
                            insertions.push(to_at[j]);
                        }
                        _ => {}
                    }
                }

                // An element that matched across groups moved between them: report it as a
                // deletion from its old group and an insertion into its new one.
                for (i, j) in sequence::matches(a.len(), b.len(), &changes) {
                    let (old, new) = (from_at[i], to_at[j]);
                    if to_group[old.group] == Some(new.group) {
                        continue;
                    }
                    if to_group[old.group].is_some() {
                        deletions.push(old);
                    }
                    if from_group[new.group].is_some() {
                        insertions.push(new);
                    }
                }

                deletions.sort_unstable();
                insertions.sort_unstable();
            }
        }

        debug_assert!(deletions.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(insertions.windows(2).all(|w| w[0] < w[1]));

        sdebug!(
            alignment = ?self.alignment,
            inserted_groups = inserted_groups.len(),
            deleted_groups = deleted_groups.len(),
            insertions = insertions.len(),
            deletions = deletions.len(),
            "GroupedDiff::diff"
        );

        SectionedEdit {
            inserted_groups,
            deleted_groups,
            insertions,
            deletions,
            had_data: from.has_data(),
            has_data: to.has_data(),
        }
    }
}
