use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::key::KeyIndexMap;
use crate::{Coordinate, SectionedEdit};

/// Anything that occupies a contiguous run of groups in a composite view.
pub trait Extent {
    /// The current number of groups.
    fn extent(&self) -> usize;
}

impl<E: Extent + ?Sized> Extent for alloc::boxed::Box<E> {
    fn extent(&self) -> usize {
        (**self).extent()
    }
}

/// Where a component sits in the composite's global numbering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentOffset {
    /// The component's first global group (`base.item` is always 0).
    pub base: Coordinate,
    /// The component's group count as of the last rebase.
    pub extent: usize,
}

impl ComponentOffset {
    /// Whether `global_group` falls within this component.
    pub fn contains(&self, global_group: usize) -> bool {
        global_group >= self.base.group && global_group - self.base.group < self.extent
    }
}

/// Offsets of an ordered list of components, addressed by position.
///
/// The table is rebuilt wholesale on every [`OffsetTable::rebase`]; there is no incremental
/// patching.
#[derive(Clone, Debug, Default)]
pub struct OffsetTable {
    offsets: Vec<ComponentOffset>,
    sums: Fenwick,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_extents(extents: impl IntoIterator<Item = usize>) -> Self {
        let mut table = Self::new();
        table.rebase(extents);
        table
    }

    /// Recomputes every base: in order, `base = running total`, then `running += extent`.
    pub fn rebase(&mut self, extents: impl IntoIterator<Item = usize>) {
        let extents: Vec<usize> = extents.into_iter().collect();
        self.offsets.clear();
        self.offsets.reserve(extents.len());
        let mut running = 0usize;
        for &extent in &extents {
            self.offsets.push(ComponentOffset {
                base: Coordinate::new(running, 0),
                extent,
            });
            running += extent;
        }
        self.sums = Fenwick::from_values(&extents);
        debug_assert_eq!(self.sums.total(), running);
        strace!(components = extents.len(), total = running, "OffsetTable::rebase");
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Sum of all extents.
    pub fn total_groups(&self) -> usize {
        self.sums.total()
    }

    pub fn offset(&self, position: usize) -> Option<ComponentOffset> {
        self.offsets.get(position).copied()
    }

    pub fn offsets(&self) -> &[ComponentOffset] {
        &self.offsets
    }

    /// Translates a local coordinate of the component at `position` into global numbering.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    pub fn to_global(&self, position: usize, local: Coordinate) -> Coordinate {
        let offset = self.offsets[position];
        debug_assert!(
            local.group < offset.extent,
            "OffsetTable::to_global: local group out of range (group={}, extent={})",
            local.group,
            offset.extent
        );
        local.with_group(local.group + offset.base.group)
    }

    /// Translates a global coordinate into the local numbering of the component at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `global.group` is not owned by that component. That means the offset table is
    /// stale (a rebase was missed), and continuing would corrupt the view.
    pub fn to_local(&self, position: usize, global: Coordinate) -> Coordinate {
        match self.try_to_local(position, global) {
            Some(local) => local,
            None => {
                swarn!(position, group = global.group, "OffsetTable::to_local: stale offset");
                panic!(
                    "OffsetTable::to_local: global group {} is outside component {position} ({:?})",
                    global.group,
                    self.offsets.get(position)
                );
            }
        }
    }

    pub fn try_to_local(&self, position: usize, global: Coordinate) -> Option<Coordinate> {
        let offset = self.offsets.get(position)?;
        offset
            .contains(global.group)
            .then(|| global.with_group(global.group - offset.base.group))
    }

    /// Finds the component owning `global_group`.
    ///
    /// Returns the owner's position and the group in its local numbering. Components with a
    /// zero extent never own a group. Runs in `O(log n)`.
    pub fn locate(&self, global_group: usize) -> Option<(usize, usize)> {
        if global_group >= self.sums.total() {
            return None;
        }
        let position = self.sums.lower_bound(global_group);
        debug_assert!(position < self.sums.len());
        let base = self.sums.prefix_sum(position);
        debug_assert_eq!(base, self.offsets[position].base.group);
        Some((position, global_group - base))
    }
}

/// A stable, non-owning handle to a component in a [`Registry`].
///
/// Ids are never reused, so a handle to a removed component stays invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn raw(self) -> usize {
        self.0
    }
}

/// An ordered set of components sharing one global group numbering.
///
/// The registry owns the components and their offsets. Offsets are written only here, during a
/// rebase, which runs synchronously whenever the member list changes or an update changes a
/// member's extent.
#[derive(Clone, Debug)]
pub struct Registry<C> {
    members: Vec<(ComponentId, C)>,
    // id -> position in `members`, live members only
    slots: KeyIndexMap<ComponentId>,
    next_id: usize,
    table: OffsetTable,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            slots: KeyIndexMap::default(),
            next_id: 0,
            table: OffsetTable::new(),
        }
    }
}

impl<C: Extent> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component and rebases.
    pub fn push(&mut self, component: C) -> ComponentId {
        self.insert(self.members.len(), component)
    }

    /// Inserts a component at `position` (clamped to the member count) and rebases.
    pub fn insert(&mut self, position: usize, component: C) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        let position = position.min(self.members.len());
        self.members.insert(position, (id, component));
        sdebug!(id = id.0, position, "Registry::insert");
        self.rebase();
        id
    }

    /// Removes a component and rebases.
    pub fn remove(&mut self, id: ComponentId) -> Option<C> {
        let position = self.position(id)?;
        let (_, component) = self.members.remove(position);
        self.slots.remove(&id);
        sdebug!(id = id.0, position, "Registry::remove");
        self.rebase();
        Some(component)
    }

    /// Recomputes every member's offset from the current extents.
    pub fn rebase(&mut self) {
        self.slots.clear();
        self.slots.extend(
            self.members
                .iter()
                .enumerate()
                .map(|(position, (id, _))| (*id, position)),
        );
        self.table
            .rebase(self.members.iter().map(|(_, component)| component.extent()));
    }

    /// Runs `f` on a component and rebases if its extent changed.
    ///
    /// Returns `None` if `id` is not a member.
    pub fn update<R>(&mut self, id: ComponentId, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        let position = self.position(id)?;
        let component = &mut self.members[position].1;
        let before = component.extent();
        let out = f(component);
        let after = component.extent();
        if before != after {
            strace!(id = id.0, before, after, "Registry::update: extent changed");
            self.rebase();
        }
        Some(out)
    }

    pub fn get(&self, id: ComponentId) -> Option<&C> {
        self.position(id).map(|p| &self.members[p].1)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &C)> + '_ {
        self.members.iter().map(|(id, c)| (*id, c))
    }

    pub fn total_groups(&self) -> usize {
        self.table.total_groups()
    }

    pub fn offset(&self, id: ComponentId) -> Option<ComponentOffset> {
        self.table.offset(self.position(id)?)
    }

    /// # Panics
    ///
    /// Panics if `id` is not a member.
    pub fn to_global(&self, id: ComponentId, local: Coordinate) -> Coordinate {
        self.table.to_global(self.expect_position(id), local)
    }

    /// # Panics
    ///
    /// Panics if `id` is not a member, or if `global` lies outside the component.
    pub fn to_local(&self, id: ComponentId, global: Coordinate) -> Coordinate {
        self.table.to_local(self.expect_position(id), global)
    }

    pub fn try_to_local(&self, id: ComponentId, global: Coordinate) -> Option<Coordinate> {
        self.table.try_to_local(self.position(id)?, global)
    }

    /// Finds the component owning a global coordinate and returns the coordinate in its local
    /// numbering.
    pub fn locate(&self, global: Coordinate) -> Option<(ComponentId, Coordinate)> {
        let (position, group) = self.table.locate(global.group)?;
        Some((self.members[position].0, global.with_group(group)))
    }

    /// Same as [`Registry::locate`], but also borrows the owning component.
    pub fn locate_component(&self, global: Coordinate) -> Option<(&C, Coordinate)> {
        let (position, group) = self.table.locate(global.group)?;
        Some((&self.members[position].1, global.with_group(group)))
    }

    /// Translates a component's local edit into global numbering.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a member.
    pub fn edit_to_global(&self, id: ComponentId, edit: SectionedEdit) -> SectionedEdit {
        let offset = self.table.offsets[self.expect_position(id)];
        edit.offset_groups(offset.base.group)
    }

    fn position(&self, id: ComponentId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn expect_position(&self, id: ComponentId) -> usize {
        match self.position(id) {
            Some(position) => position,
            None => panic!("Registry: unknown component {id:?}"),
        }
    }
}
