use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use sectional::{Coordinate, Extent};

/// A region of a composite view that owns one or more consecutive groups.
///
/// All coordinates are local: group 0 is the section's first group. Optional capabilities
/// (headers, index titles) default to "not provided".
pub trait Section<V>: Any {
    /// Current number of groups.
    fn group_count(&self) -> usize;

    /// Number of items in a local group, or 0 if the group does not exist.
    fn item_count(&self, group: usize) -> usize;

    fn build_item(&self, at: Coordinate) -> Option<V>;

    fn build_header(&self, _group: usize) -> Option<V> {
        None
    }

    fn index_titles(&self) -> Vec<String> {
        Vec::new()
    }

    /// Where the `index`-th index title of this section points.
    fn index_title_target(&self, _index: usize) -> Option<Coordinate> {
        None
    }

    /// Tells the section whether it is the only one in its view.
    ///
    /// Standalone sections are exclusive. [`crate::Composite`] updates the flag whenever its
    /// membership changes.
    fn set_exclusive(&mut self, exclusive: bool);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<V: 'static> Extent for dyn Section<V> {
    fn extent(&self) -> usize {
        self.group_count()
    }
}
