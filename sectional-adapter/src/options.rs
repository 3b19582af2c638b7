use alloc::string::String;
use alloc::sync::Arc;

use sectional::{Alignment, Coordinate};

use crate::UpdateStrategy;

/// The element equivalence used for diffing.
pub type IsEqual<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Builds the content for the element at a local coordinate.
pub type BuildItem<T, V> = Arc<dyn Fn(Coordinate, &T) -> V + Send + Sync>;

/// Builds the header for a local group.
pub type HeaderBuilder<K, V> = Arc<dyn Fn(usize, &K) -> V + Send + Sync>;

/// Extracts the group key of an element.
pub type KeyOf<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Renders the index title of a group key.
pub type IndexTitle<K> = Arc<dyn Fn(&K) -> String + Send + Sync>;

/// Which grouping path a [`crate::GroupingSection`] takes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputOrder {
    /// Elements arrive contiguous by key in ascending key order.
    ///
    /// Grouping is a linear run split. Debug builds panic when the input is not sorted.
    Sorted,
    /// Elements arrive in any order.
    #[default]
    Unsorted,
}

/// Configuration for [`crate::DiffingSection`].
///
/// Cheap to clone: every closure is held in an `Arc`.
pub struct SectionOptions<T, V> {
    pub is_equal: IsEqual<T>,
    pub build: BuildItem<T, V>,
    /// Optional header for the section's single group.
    pub header: Option<Arc<dyn Fn() -> V + Send + Sync>>,
    pub strategy: UpdateStrategy,
}

impl<T, V> Clone for SectionOptions<T, V> {
    fn clone(&self) -> Self {
        Self {
            is_equal: Arc::clone(&self.is_equal),
            build: Arc::clone(&self.build),
            header: self.header.clone(),
            strategy: self.strategy,
        }
    }
}

impl<T: PartialEq + 'static, V> SectionOptions<T, V> {
    /// Creates options that compare elements with `==`.
    pub fn new(build: impl Fn(Coordinate, &T) -> V + Send + Sync + 'static) -> Self {
        Self::new_with_eq(|a: &T, b: &T| a == b, build)
    }
}

impl<T, V> SectionOptions<T, V> {
    /// Creates options with a custom element equivalence.
    pub fn new_with_eq(
        is_equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
        build: impl Fn(Coordinate, &T) -> V + Send + Sync + 'static,
    ) -> Self {
        Self {
            is_equal: Arc::new(is_equal),
            build: Arc::new(build),
            header: None,
            strategy: UpdateStrategy::default(),
        }
    }

    pub fn with_is_equal(
        mut self,
        is_equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_equal = Arc::new(is_equal);
        self
    }

    pub fn with_header(
        mut self,
        header: Option<impl Fn() -> V + Send + Sync + 'static>,
    ) -> Self {
        self.header = header.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl<T, V> core::fmt::Debug for SectionOptions<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionOptions")
            .field("header", &self.header.is_some())
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::GroupingSection`].
///
/// Headers and index titles are optional capabilities: a `None` field means the section does not
/// provide them.
pub struct GroupingOptions<T, K, V> {
    pub key_of: KeyOf<T, K>,
    pub is_equal: IsEqual<T>,
    pub build: BuildItem<T, V>,
    pub header: Option<HeaderBuilder<K, V>>,
    pub index_title: Option<IndexTitle<K>>,
    pub input_order: InputOrder,
    pub alignment: Alignment,
    pub strategy: UpdateStrategy,
}

impl<T, K, V> Clone for GroupingOptions<T, K, V> {
    fn clone(&self) -> Self {
        Self {
            key_of: Arc::clone(&self.key_of),
            is_equal: Arc::clone(&self.is_equal),
            build: Arc::clone(&self.build),
            header: self.header.clone(),
            index_title: self.index_title.clone(),
            input_order: self.input_order,
            alignment: self.alignment,
            strategy: self.strategy,
        }
    }
}

impl<T: PartialEq + 'static, K, V> GroupingOptions<T, K, V> {
    /// Creates options that compare elements with `==`.
    pub fn new(
        key_of: impl Fn(&T) -> K + Send + Sync + 'static,
        build: impl Fn(Coordinate, &T) -> V + Send + Sync + 'static,
    ) -> Self {
        Self::new_with_eq(key_of, |a: &T, b: &T| a == b, build)
    }
}

impl<T, K, V> GroupingOptions<T, K, V> {
    /// Creates options with a custom element equivalence.
    pub fn new_with_eq(
        key_of: impl Fn(&T) -> K + Send + Sync + 'static,
        is_equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
        build: impl Fn(Coordinate, &T) -> V + Send + Sync + 'static,
    ) -> Self {
        Self {
            key_of: Arc::new(key_of),
            is_equal: Arc::new(is_equal),
            build: Arc::new(build),
            header: None,
            index_title: None,
            input_order: InputOrder::default(),
            alignment: Alignment::default(),
            strategy: UpdateStrategy::default(),
        }
    }

    pub fn with_is_equal(
        mut self,
        is_equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_equal = Arc::new(is_equal);
        self
    }

    pub fn with_header(
        mut self,
        header: Option<impl Fn(usize, &K) -> V + Send + Sync + 'static>,
    ) -> Self {
        self.header = header.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_index_title(
        mut self,
        index_title: Option<impl Fn(&K) -> String + Send + Sync + 'static>,
    ) -> Self {
        self.index_title = index_title.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_input_order(mut self, input_order: InputOrder) -> Self {
        self.input_order = input_order;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl<T, K, V> core::fmt::Debug for GroupingOptions<T, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupingOptions")
            .field("header", &self.header.is_some())
            .field("index_title", &self.index_title.is_some())
            .field("input_order", &self.input_order)
            .field("alignment", &self.alignment)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
