use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use sectional::{Coordinate, GroupKey, GroupedDiff, GroupedSnapshot};

use crate::{GroupingOptions, InputOrder, Section, ViewUpdate};

/// A section that groups its data by key, one group per distinct key in ascending key order.
///
/// Its extent (group count) changes with the data; inside a [`crate::Composite`] that triggers a
/// rebase of the sections after it.
#[derive(Clone, Debug)]
pub struct GroupingSection<T, K, V> {
    snapshot: GroupedSnapshot<T, K>,
    options: GroupingOptions<T, K, V>,
    exclusive: bool,
}

impl<T, K: GroupKey, V> GroupingSection<T, K, V> {
    pub fn new(data: impl IntoIterator<Item = T>, options: GroupingOptions<T, K, V>) -> Self {
        let snapshot = group(&options, data);
        Self {
            snapshot,
            options,
            exclusive: true,
        }
    }

    pub fn snapshot(&self) -> &GroupedSnapshot<T, K> {
        &self.snapshot
    }

    pub fn options(&self) -> &GroupingOptions<T, K, V> {
        &self.options
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Regroups the new data, diffs it against the current snapshot, and returns the view update
    /// in local coordinates.
    pub fn set_data(&mut self, data: impl IntoIterator<Item = T>) -> ViewUpdate {
        let next = group(&self.options, data);
        let is_equal = &self.options.is_equal;
        let edit = GroupedDiff::new(&self.snapshot, &next)
            .with_alignment(self.options.alignment)
            .diff(|a, b| is_equal(a, b));
        if self.snapshot.group_count() != next.group_count() {
            strace!(
                before = self.snapshot.group_count(),
                after = next.group_count(),
                "GroupingSection::set_data: group count changed"
            );
        }
        self.snapshot = next;
        sdebug!(
            groups = self.snapshot.group_count(),
            len = self.snapshot.len(),
            "GroupingSection::set_data"
        );
        ViewUpdate::plan(edit, self.options.strategy, self.exclusive)
    }
}

fn group<T, K: GroupKey, V>(
    options: &GroupingOptions<T, K, V>,
    data: impl IntoIterator<Item = T>,
) -> GroupedSnapshot<T, K> {
    let key_of = &options.key_of;
    match options.input_order {
        InputOrder::Sorted => GroupedSnapshot::from_sorted(data, |e| key_of(e)),
        InputOrder::Unsorted => GroupedSnapshot::from_unsorted(data, |e| key_of(e)),
    }
}

impl<T: 'static, K: GroupKey + 'static, V: 'static> Section<V> for GroupingSection<T, K, V> {
    fn group_count(&self) -> usize {
        self.snapshot.group_count()
    }

    fn item_count(&self, group: usize) -> usize {
        self.snapshot.group(group).map_or(0, <[T]>::len)
    }

    fn build_item(&self, at: Coordinate) -> Option<V> {
        let element = self.snapshot.get(at)?;
        Some((self.options.build)(at, element))
    }

    fn build_header(&self, group: usize) -> Option<V> {
        let header = self.options.header.as_ref()?;
        let key = self.snapshot.keys().get(group)?;
        Some(header(group, key))
    }

    fn index_titles(&self) -> Vec<String> {
        match &self.options.index_title {
            Some(title) => self.snapshot.keys().iter().map(|k| title(k)).collect(),
            None => Vec::new(),
        }
    }

    /// Each index title points at the first item of its group.
    fn index_title_target(&self, index: usize) -> Option<Coordinate> {
        self.options.index_title.as_ref()?;
        (index < self.snapshot.group_count()).then(|| Coordinate::new(index, 0))
    }

    fn set_exclusive(&mut self, exclusive: bool) {
        self.exclusive = exclusive;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
