//! Section components and composite routing for the `sectional` crate.
//!
//! The `sectional` crate computes edits and offsets. This crate wires them into the shapes a
//! host view layer usually needs:
//!
//! - Sections that own their data and turn a data swap into a [`ViewUpdate`]
//! - A [`Composite`] that stacks sections into one group numbering and routes lookups
//! - An [`UpdateQueue`] that serializes incoming snapshots
//!
//! This crate is framework-agnostic. It holds no UI objects: hosts implement [`ViewSink`] (or
//! match on [`ViewUpdate`]) and call the builders when the view asks for content.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod composite;
mod diffing;
mod grouping;
mod options;
mod queue;
mod section;
mod update;

#[cfg(test)]
mod tests;

pub use composite::Composite;
pub use diffing::DiffingSection;
pub use grouping::GroupingSection;
pub use options::{
    BuildItem, GroupingOptions, HeaderBuilder, IndexTitle, InputOrder, IsEqual, KeyOf,
    SectionOptions,
};
pub use queue::{QueuePolicy, UpdateQueue};
pub use section::Section;
pub use update::{UpdateStrategy, ViewSink, ViewUpdate};
