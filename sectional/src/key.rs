#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyIndexMap<K> = HashMap<K, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyIndexMap<K> = BTreeMap<K, usize>;

/// Bound for group keys.
///
/// Keys need a total order (it defines group emission order) and, with `std`, hashing for bucket
/// lookup while grouping. Without `std`, buckets are looked up through a `BTreeMap`.
#[cfg(feature = "std")]
pub trait GroupKey: Ord + core::hash::Hash {}
#[cfg(feature = "std")]
impl<K: Ord + core::hash::Hash> GroupKey for K {}

#[cfg(not(feature = "std"))]
pub trait GroupKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> GroupKey for K {}
