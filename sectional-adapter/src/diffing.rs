use alloc::vec::Vec;
use core::any::Any;

use sectional::{Coordinate, SectionedEdit};

use crate::{Section, SectionOptions, ViewUpdate};

/// A section over flat data: exactly one group, diffed as a single sequence.
#[derive(Clone, Debug)]
pub struct DiffingSection<T, V> {
    data: Vec<T>,
    options: SectionOptions<T, V>,
    exclusive: bool,
}

impl<T, V> DiffingSection<T, V> {
    pub fn new(data: Vec<T>, options: SectionOptions<T, V>) -> Self {
        Self {
            data,
            options,
            exclusive: true,
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn options(&self) -> &SectionOptions<T, V> {
        &self.options
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Replaces the data and returns the view update in local coordinates (group 0).
    pub fn set_data(&mut self, data: Vec<T>) -> ViewUpdate {
        let is_equal = &self.options.is_equal;
        let edit = SectionedEdit::flat(&self.data, &data, |a, b| is_equal(a, b));
        self.data = data;
        sdebug!(
            len = self.data.len(),
            insertions = edit.insertions.len(),
            deletions = edit.deletions.len(),
            "DiffingSection::set_data"
        );
        ViewUpdate::plan(edit, self.options.strategy, self.exclusive)
    }
}

impl<T: 'static, V: 'static> Section<V> for DiffingSection<T, V> {
    fn group_count(&self) -> usize {
        1
    }

    fn item_count(&self, group: usize) -> usize {
        if group == 0 { self.data.len() } else { 0 }
    }

    fn build_item(&self, at: Coordinate) -> Option<V> {
        if at.group != 0 {
            return None;
        }
        let element = self.data.get(at.item)?;
        Some((self.options.build)(at, element))
    }

    fn build_header(&self, group: usize) -> Option<V> {
        let header = self.options.header.as_ref()?;
        (group == 0).then(|| header())
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
