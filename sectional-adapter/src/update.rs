use alloc::vec::Vec;

use sectional::SectionedEdit;

/// How a section turns a data change into a view update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateStrategy {
    /// Batch-animate the computed edits.
    #[default]
    Animate,
    /// Reload the whole view whenever anything changed.
    Reload,
}

/// What the host view should do after a section's data changed.
///
/// Coordinates in a `Batch` are local when the update comes straight from a section, and global
/// when it comes from [`crate::Composite::update`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewUpdate {
    /// Nothing changed.
    #[default]
    None,
    /// Discard all cached content and query the sections again.
    Reload,
    /// Apply the edit as one animated batch.
    Batch(SectionedEdit),
}

impl ViewUpdate {
    /// Decides how to present `edit`.
    ///
    /// With [`UpdateStrategy::Animate`], an exclusive section (the only one in its view) whose
    /// previous data was empty reloads on its first data instead of animating, and does nothing
    /// if it is still empty.
    pub fn plan(edit: SectionedEdit, strategy: UpdateStrategy, exclusive: bool) -> Self {
        match strategy {
            UpdateStrategy::Reload if edit.has_changes() => Self::Reload,
            UpdateStrategy::Reload => Self::None,
            UpdateStrategy::Animate if exclusive && !edit.had_data => {
                if edit.has_data {
                    Self::Reload
                } else {
                    Self::None
                }
            }
            UpdateStrategy::Animate if edit.has_changes() => Self::Batch(edit),
            UpdateStrategy::Animate => Self::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn edit(&self) -> Option<&SectionedEdit> {
        match self {
            Self::Batch(edit) => Some(edit),
            Self::None | Self::Reload => None,
        }
    }

    /// Shifts a batch's group indices by `base`.
    pub fn offset_groups(self, base: usize) -> Self {
        match self {
            Self::Batch(edit) => Self::Batch(edit.offset_groups(base)),
            other => other,
        }
    }

    pub fn apply_to<S: ViewSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Self::None => {}
            Self::Reload => sink.reload(),
            Self::Batch(edit) => sink.perform_batch(edit),
        }
    }
}

/// The host view, as far as structural updates go.
///
/// `perform_batch` receives coordinates in the view's own numbering. Implementations apply, in
/// order: item deletions, group deletions, item insertions, group insertions, as one batch.
pub trait ViewSink {
    fn reload(&mut self);

    fn perform_batch(&mut self, edit: &SectionedEdit);
}

/// Records every update, which is handy for tests and logging.
impl ViewSink for Vec<ViewUpdate> {
    fn reload(&mut self) {
        self.push(ViewUpdate::Reload);
    }

    fn perform_batch(&mut self, edit: &SectionedEdit) {
        self.push(ViewUpdate::Batch(edit.clone()));
    }
}
