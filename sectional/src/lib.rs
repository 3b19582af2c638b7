//! A headless diff-and-remap engine for sectioned list and grid views.
//!
//! For framework-neutral section components and composite routing, see the `sectional-adapter`
//! crate.
//!
//! Given an old and a new snapshot of ordered data, this crate computes which structural edits
//! (inserted/deleted items, inserted/deleted groups) a view needs to apply to animate from one to
//! the other, and where those edits land:
//! - [`sequence`]: an LCS-style edit script under a caller-supplied equivalence predicate
//! - [`GroupedSnapshot`]: grouping of a flat sequence by an ordered key
//! - [`GroupedDiff`]: group-level plus element-level diffing in `(group, item)` coordinates
//! - [`Registry`] / [`OffsetTable`]: translation between a component's local group numbering and
//!   the global numbering of a composite view
//!
//! It is UI-agnostic and synchronous: all computations are pure functions over their inputs,
//! except for the registry's offset table, which is rebuilt wholesale on every rebase.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod fenwick;
mod group;
mod grouped;
mod key;
mod offset;
pub mod sequence;
mod types;


pub use group::GroupedSnapshot;
pub use grouped::{Alignment, GroupedDiff, SectionedEdit};
pub use key::GroupKey;
pub use offset::{ComponentId, ComponentOffset, Extent, OffsetTable, Registry};
pub use types::{Change, Coordinate, Edit};
