use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use sectional::{ComponentId, ComponentOffset, Coordinate, Registry};

use crate::{Section, ViewUpdate};

/// A view made of several sections stacked in one global group numbering.
///
/// The composite owns its sections through a [`Registry`], which is the only place offsets are
/// written. Every query routes a global coordinate to its owning section and translates it to
/// that section's local numbering.
///
/// Membership changes (`push`, `insert`, `remove`) rebase immediately; the host should reload
/// its view after one.
pub struct Composite<V> {
    registry: Registry<Box<dyn Section<V>>>,
}

impl<V: 'static> Default for Composite<V> {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
        }
    }
}

impl<V: 'static> Composite<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: Section<V>>(&mut self, section: S) -> ComponentId {
        let id = self.registry.push(Box::new(section));
        self.refresh_exclusive();
        id
    }

    /// Inserts a section before the one currently at `position`.
    pub fn insert<S: Section<V>>(&mut self, position: usize, section: S) -> ComponentId {
        let id = self.registry.insert(position, Box::new(section));
        self.refresh_exclusive();
        id
    }

    pub fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Section<V>>> {
        let section = self.registry.remove(id)?;
        self.refresh_exclusive();
        Some(section)
    }

    /// Runs a data update on the section `id`, which must be of type `S`.
    ///
    /// If the section's group count changed, the composite rebases before translating. A batch
    /// edit comes back in global coordinates. Returns `None` if `id` is unknown or the section
    /// is not an `S`.
    pub fn update<S: Section<V>>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut S) -> ViewUpdate,
    ) -> Option<ViewUpdate> {
        let local = self
            .registry
            .update(id, |section| section.as_any_mut().downcast_mut::<S>().map(f))
            .flatten();
        let Some(local) = local else {
            swarn!(id = id.raw(), "Composite::update: unknown section or wrong type");
            return None;
        };
        let global = match local {
            ViewUpdate::Batch(edit) => ViewUpdate::Batch(self.registry.edit_to_global(id, edit)),
            other => other,
        };
        sdebug!(id = id.raw(), update = ?global, "Composite::update");
        Some(global)
    }

    pub fn section<S: Section<V>>(&self, id: ComponentId) -> Option<&S> {
        self.registry.get(id)?.as_any().downcast_ref::<S>()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.registry.contains(id)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Section ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.registry.iter().map(|(id, _)| id)
    }

    pub fn offset(&self, id: ComponentId) -> Option<ComponentOffset> {
        self.registry.offset(id)
    }

    /// Total number of groups across all sections.
    pub fn group_count(&self) -> usize {
        self.registry.total_groups()
    }

    pub fn item_count(&self, global_group: usize) -> usize {
        self.registry
            .locate_component(Coordinate::new(global_group, 0))
            .map_or(0, |(section, local)| section.item_count(local.group))
    }

    pub fn build_item(&self, global: Coordinate) -> Option<V> {
        let (section, local) = self.registry.locate_component(global)?;
        section.build_item(local)
    }

    pub fn build_header(&self, global_group: usize) -> Option<V> {
        let (section, local) = self
            .registry
            .locate_component(Coordinate::new(global_group, 0))?;
        section.build_header(local.group)
    }

    /// The owning section and local coordinate of a global coordinate.
    pub fn locate(&self, global: Coordinate) -> Option<(ComponentId, Coordinate)> {
        self.registry.locate(global)
    }

    pub fn to_global(&self, id: ComponentId, local: Coordinate) -> Coordinate {
        self.registry.to_global(id, local)
    }

    /// Index titles of every section, in display order.
    pub fn index_titles(&self) -> Vec<String> {
        self.registry
            .iter()
            .flat_map(|(_, section)| section.index_titles())
            .collect()
    }

    /// Resolves the `index`-th title of [`Composite::index_titles`] to a global coordinate.
    pub fn index_title_target(&self, mut index: usize) -> Option<Coordinate> {
        for (id, section) in self.registry.iter() {
            let count = section.index_titles().len();
            if index < count {
                let local = section.index_title_target(index)?;
                return Some(self.registry.to_global(id, local));
            }
            index -= count;
        }
        None
    }

    fn refresh_exclusive(&mut self) {
        let exclusive = self.registry.len() == 1;
        let ids: Vec<ComponentId> = self.ids().collect();
        for id in ids {
            self.registry
                .update(id, |section| section.set_exclusive(exclusive));
        }
        strace!(
            sections = self.registry.len(),
            groups = self.registry.total_groups(),
            "Composite::refresh_exclusive"
        );
    }
}

impl<V: 'static> core::fmt::Debug for Composite<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Composite")
            .field("sections", &self.registry.len())
            .field("groups", &self.registry.total_groups())
            .finish()
    }
}
