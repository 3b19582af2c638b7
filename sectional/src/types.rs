use core::fmt;

/// A two-level `(group, item)` address of an element.
///
/// Flat, single-group collections use `group = 0`. Coordinates order lexicographically: by
/// group first, then by item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub group: usize,
    pub item: usize,
}

impl Coordinate {
    pub const fn new(group: usize, item: usize) -> Self {
        Self { group, item }
    }

    /// A coordinate in group 0, for flat collections.
    pub const fn flat(item: usize) -> Self {
        Self { group: 0, item }
    }

    pub const fn with_group(self, group: usize) -> Self {
        Self {
            group,
            item: self.item,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.group, self.item)
    }
}

/// One positional entry of an edit script.
///
/// `Insert` positions index the destination sequence, `Delete` positions index the source
/// sequence. The two are never mixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    Insert(usize),
    Delete(usize),
}

impl Change {
    pub fn index(self) -> usize {
        match self {
            Self::Insert(i) | Self::Delete(i) => i,
        }
    }

    pub fn is_insert(self) -> bool {
        matches!(self, Self::Insert(_))
    }
}

/// An edit that carries the inserted element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edit<T> {
    Insert { index: usize, element: T },
    Delete { index: usize },
}

impl<T> Edit<T> {
    pub fn index(&self) -> usize {
        match self {
            Self::Insert { index, .. } | Self::Delete { index } => *index,
        }
    }

    /// Shifts the edit by `offset` and maps an inserted element through `transform`.
    ///
    /// Useful when a sub-sequence is diffed on its own but applied inside a larger sequence.
    pub fn map<U>(self, offset: usize, transform: impl FnOnce(T) -> U) -> Edit<U> {
        match self {
            Self::Insert { index, element } => Edit::Insert {
                index: index + offset,
                element: transform(element),
            },
            Self::Delete { index } => Edit::Delete {
                index: index + offset,
            },
        }
    }
}

impl<T> From<&Edit<T>> for Change {
    fn from(edit: &Edit<T>) -> Self {
        match edit {
            Edit::Insert { index, .. } => Self::Insert(*index),
            Edit::Delete { index } => Self::Delete(*index),
        }
    }
}
