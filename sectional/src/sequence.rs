//! Sequence diffing under a caller-supplied equivalence predicate.
//!
//! [`diff`] returns an edit script of positions: every deletion (ascending, indexing `from`)
//! followed by every insertion (ascending, indexing `to`). Applying the deletions from the back,
//! then the insertions from the front, turns `from` into `to`. Elements that survive keep their
//! relative order on both sides.
//!
//! The alignment uses the linear-space form of Myers' O((N+M)·D) algorithm after trimming the
//! common prefix and suffix, so the script is a shortest one and memory stays O(N+M) even when
//! nothing matches. Among equally short scripts the choice is deterministic.

use alloc::vec;
use alloc::vec::Vec;

use crate::{Change, Edit};

/// Computes the edit script turning `from` into `to`.
///
/// `is_equal` should be an equivalence relation. If it is not reflexive, the script still
/// round-trips but may report more changes than necessary.
pub fn diff<T>(from: &[T], to: &[T], mut is_equal: impl FnMut(&T, &T) -> bool) -> Vec<Change> {
    let n = from.len();
    let m = to.len();

    let mut prefix = 0usize;
    while prefix < n && prefix < m && is_equal(&from[prefix], &to[prefix]) {
        prefix += 1;
    }
    let mut suffix = 0usize;
    while suffix < n - prefix
        && suffix < m - prefix
        && is_equal(&from[n - 1 - suffix], &to[m - 1 - suffix])
    {
        suffix += 1;
    }

    let a = &from[prefix..n - suffix];
    let b = &to[prefix..m - suffix];

    let mut deletions = Vec::new();
    let mut insertions = Vec::new();
    myers(a, b, &mut is_equal, &mut deletions, &mut insertions);

    strace!(
        from = n,
        to = m,
        prefix,
        suffix,
        deletions = deletions.len(),
        insertions = insertions.len(),
        "sequence::diff"
    );

    let mut out = Vec::with_capacity(deletions.len() + insertions.len());
    out.extend(deletions.into_iter().map(|i| Change::Delete(i + prefix)));
    out.extend(insertions.into_iter().map(|i| Change::Insert(i + prefix)));
    out
}

/// Same as [`diff`], but insertions carry a clone of the inserted element.
pub fn patch<T: Clone>(from: &[T], to: &[T], is_equal: impl FnMut(&T, &T) -> bool) -> Vec<Edit<T>> {
    diff(from, to, is_equal)
        .into_iter()
        .map(|change| match change {
            Change::Insert(index) => Edit::Insert {
                index,
                element: to[index].clone(),
            },
            Change::Delete(index) => Edit::Delete { index },
        })
        .collect()
}

/// Applies an edit script to `from`.
///
/// Deletions are applied in descending order against `from`, then insertions in ascending order
/// against the result, regardless of their order in `edits`.
///
/// # Panics
///
/// Panics if a position is out of bounds for the sequence it indexes.
pub fn apply<T: Clone>(from: &[T], edits: &[Edit<T>]) -> Vec<T> {
    let mut deletions: Vec<usize> = edits
        .iter()
        .filter_map(|e| match e {
            Edit::Delete { index } => Some(*index),
            Edit::Insert { .. } => None,
        })
        .collect();
    deletions.sort_unstable();
    deletions.dedup();

    let mut out = from.to_vec();
    for &index in deletions.iter().rev() {
        out.remove(index);
    }

    let mut insertions: Vec<(usize, &T)> = edits
        .iter()
        .filter_map(|e| match e {
            Edit::Insert { index, element } => Some((*index, element)),
            Edit::Delete { .. } => None,
        })
        .collect();
    insertions.sort_by_key(|(index, _)| *index);
    for (index, element) in insertions {
        out.insert(index, element.clone());
    }
    out
}

/// Splits a script into mapped insertions and deletions, keeping script order within each.
pub fn split<U>(
    changes: &[Change],
    mut on_insert: impl FnMut(usize) -> U,
    mut on_delete: impl FnMut(usize) -> U,
) -> (Vec<U>, Vec<U>) {
    let mut insertions = Vec::new();
    let mut deletions = Vec::new();
    for change in changes {
        match *change {
            Change::Insert(i) => insertions.push(on_insert(i)),
            Change::Delete(i) => deletions.push(on_delete(i)),
        }
    }
    (insertions, deletions)
}

/// Returns the `(from, to)` index pairs left untouched by `changes`, in ascending order.
///
/// `changes` must be a script for sequences of lengths `from_len` and `to_len`.
pub fn matches(from_len: usize, to_len: usize, changes: &[Change]) -> Vec<(usize, usize)> {
    let mut deleted = vec![false; from_len];
    let mut inserted = vec![false; to_len];
    for change in changes {
        match *change {
            Change::Delete(i) => deleted[i] = true,
            Change::Insert(i) => inserted[i] = true,
        }
    }

    let mut pairs = Vec::with_capacity(from_len.min(to_len));
    let mut j = 0usize;
    for (i, _) in deleted.iter().enumerate().filter(|(_, d)| !**d) {
        while j < to_len && inserted[j] {
            j += 1;
        }
        debug_assert!(j < to_len, "matches: script does not fit the given lengths");
        if j >= to_len {
            break;
        }
        pairs.push((i, j));
        j += 1;
    }
    pairs
}

/// Linear-space Myers: find the middle snake of a shortest path, then solve both halves.
///
/// The two frontiers are allocated once for the outermost call and reused by every subproblem.
/// Memory is O(N+M) and the recursion depth is O(log D).
fn myers<T>(
    a: &[T],
    b: &[T],
    is_equal: &mut impl FnMut(&T, &T) -> bool,
    deletions: &mut Vec<usize>,
    insertions: &mut Vec<usize>,
) {
    let bound = (a.len() + b.len()).div_ceil(2) + 1;
    let mut search = Search {
        is_equal,
        forward: Frontier::new(bound),
        backward: Frontier::new(bound),
        deletions,
        insertions,
    };
    search.conquer(a, 0, b, 0);
}

struct Search<'s, F> {
    is_equal: &'s mut F,
    forward: Frontier,
    backward: Frontier,
    deletions: &'s mut Vec<usize>,
    insertions: &'s mut Vec<usize>,
}

impl<F> Search<'_, F> {
    /// Emits the script for `a` against `b`, whose positions start at `a_base` and `b_base`.
    ///
    /// Halves are solved left to right, so both outputs stay ascending.
    fn conquer<T>(&mut self, a: &[T], a_base: usize, b: &[T], b_base: usize)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let mut prefix = 0usize;
        while prefix < a.len() && prefix < b.len() && (self.is_equal)(&a[prefix], &b[prefix]) {
            prefix += 1;
        }
        let (a, b) = (&a[prefix..], &b[prefix..]);
        let mut suffix = 0usize;
        while suffix < a.len()
            && suffix < b.len()
            && (self.is_equal)(&a[a.len() - 1 - suffix], &b[b.len() - 1 - suffix])
        {
            suffix += 1;
        }
        let a = &a[..a.len() - suffix];
        let b = &b[..b.len() - suffix];
        let a_base = a_base + prefix;
        let b_base = b_base + prefix;

        if a.is_empty() {
            self.insertions.extend(b_base..b_base + b.len());
            return;
        }
        if b.is_empty() {
            self.deletions.extend(a_base..a_base + a.len());
            return;
        }

        match self.middle_snake(a, b) {
            Some((x, y)) => {
                self.conquer(&a[..x], a_base, &b[..y], b_base);
                self.conquer(&a[x..], a_base + x, &b[y..], b_base + y);
            }
            None => {
                self.deletions.extend(a_base..a_base + a.len());
                self.insertions.extend(b_base..b_base + b.len());
            }
        }
    }

    /// Runs the forward search from `(0, 0)` and the backward search from `(n, m)` in lockstep
    /// until they overlap on a diagonal. Returns a point on a shortest path to split at.
    ///
    /// `a` and `b` must be non-empty, with no common prefix or suffix.
    fn middle_snake<T>(&mut self, a: &[T], b: &[T]) -> Option<(usize, usize)>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let n = a.len() as isize;
        let m = b.len() as isize;
        let delta = n - m;
        let odd = delta & 1 == 1;
        self.forward[1] = 0;
        self.backward[1] = 0;

        for d in 0..=(n + m + 1) / 2 {
            let mut k = -d;
            while k <= d {
                let mut x = if k == -d || (k != d && self.forward[k - 1] < self.forward[k + 1]) {
                    self.forward[k + 1]
                } else {
                    self.forward[k - 1] + 1
                };
                let (x0, y0) = (x, x - k);
                let mut y = y0;
                while x < n && y < m && (self.is_equal)(&a[x as usize], &b[y as usize]) {
                    x += 1;
                    y += 1;
                }
                self.forward[k] = x;
                if odd && (k - delta).abs() < d && x + self.backward[delta - k] >= n {
                    return split_point(x0, y0, n, m);
                }
                k += 2;
            }

            // Backward frontiers count steps back from `(n, m)`.
            let mut k = -d;
            while k <= d {
                let mut x = if k == -d || (k != d && self.backward[k - 1] < self.backward[k + 1])
                {
                    self.backward[k + 1]
                } else {
                    self.backward[k - 1] + 1
                };
                let mut y = x - k;
                while x < n
                    && y < m
                    && (self.is_equal)(&a[(n - 1 - x) as usize], &b[(m - 1 - y) as usize])
                {
                    x += 1;
                    y += 1;
                }
                self.backward[k] = x;
                if !odd && (k - delta).abs() <= d && x + self.forward[delta - k] >= n {
                    return split_point(n - x, m - y, n, m);
                }
                k += 2;
            }
        }
        None
    }
}

/// Accepts a split inside the grid that leaves less work on each side.
fn split_point(x: isize, y: isize, n: isize, m: isize) -> Option<(usize, usize)> {
    let inside = (0..=n).contains(&x) && (0..=m).contains(&y);
    let progress = (x, y) != (0, 0) && (x, y) != (n, m);
    (inside && progress).then_some((x as usize, y as usize))
}

/// Furthest-reaching `x` per diagonal `k`, for `k` in `-bound..=bound`.
struct Frontier {
    offset: isize,
    x: Vec<isize>,
}

impl Frontier {
    fn new(bound: usize) -> Self {
        Self {
            offset: bound as isize,
            x: vec![0; 2 * bound + 1],
        }
    }
}

impl core::ops::Index<isize> for Frontier {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.x[(k + self.offset) as usize]
    }
}

impl core::ops::IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.x[(k + self.offset) as usize]
    }
}
