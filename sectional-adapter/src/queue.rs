use alloc::collections::VecDeque;

/// What happens to snapshots that arrive while another one is being applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueuePolicy {
    /// Apply every snapshot, in arrival order.
    #[default]
    Queue,
    /// Keep only the latest pending snapshot; older pending ones are dropped.
    Supersede,
}

/// A serialized update path: at most one snapshot is in flight at a time.
///
/// A producer pushes snapshots. The consumer calls [`UpdateQueue::begin`] to take the next one
/// (only when idle), diffs and applies it, then calls [`UpdateQueue::finish`]. A diff is never
/// computed against a snapshot the view has not applied yet.
#[derive(Clone, Debug)]
pub struct UpdateQueue<T> {
    policy: QueuePolicy,
    pending: VecDeque<T>,
    in_flight: bool,
}

impl<T> Default for UpdateQueue<T> {
    fn default() -> Self {
        Self::new(QueuePolicy::default())
    }
}

impl<T> UpdateQueue<T> {
    pub fn new(policy: QueuePolicy) -> Self {
        Self {
            policy,
            pending: VecDeque::new(),
            in_flight: false,
        }
    }

    pub fn policy(&self) -> QueuePolicy {
        self.policy
    }

    pub fn push(&mut self, snapshot: T) {
        if self.policy == QueuePolicy::Supersede && !self.pending.is_empty() {
            strace!(dropped = self.pending.len(), "UpdateQueue::push: superseded");
            self.pending.clear();
        }
        self.pending.push_back(snapshot);
    }

    /// Pushes a producer's result.
    ///
    /// A failure is handed back untouched and leaves the queue as it was: it never turns into
    /// an empty snapshot.
    pub fn push_result<E>(&mut self, result: Result<T, E>) -> Result<(), E> {
        match result {
            Ok(snapshot) => {
                self.push(snapshot);
                Ok(())
            }
            Err(err) => {
                swarn!(pending = self.pending.len(), "UpdateQueue::push_result: producer failed");
                Err(err)
            }
        }
    }

    /// Takes the next snapshot if nothing is in flight.
    pub fn begin(&mut self) -> Option<T> {
        if self.in_flight {
            return None;
        }
        let snapshot = self.pending.pop_front()?;
        self.in_flight = true;
        Some(snapshot)
    }

    /// Marks the in-flight snapshot as applied.
    pub fn finish(&mut self) {
        debug_assert!(self.in_flight, "UpdateQueue::finish called with nothing in flight");
        self.in_flight = false;
    }

    /// Applies every pending snapshot in turn.
    ///
    /// Does nothing while a snapshot is in flight.
    pub fn drain_with(&mut self, mut apply: impl FnMut(T)) {
        while let Some(snapshot) = self.begin() {
            apply(snapshot);
            self.finish();
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending or in flight.
    pub fn is_idle(&self) -> bool {
        !self.in_flight && self.pending.is_empty()
    }
}
