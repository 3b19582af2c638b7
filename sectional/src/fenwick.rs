use alloc::vec::Vec;
use core::cmp;

/// Prefix sums over per-component group counts.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<usize>, // 1-indexed
    total: usize,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn from_values(values: &[usize]) -> Self {
        let n = values.len();
        let mut tree = alloc::vec![0usize; n + 1];
        let mut total = 0usize;
        for i in 1..=n {
            let v = values[i - 1];
            total += v;
            tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self {
            tree,
            total,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    /// Sum of the first `count` values.
    pub(crate) fn prefix_sum(&self, count: usize) -> usize {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0usize;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Returns the largest `count` such that `prefix_sum(count) <= target`.
    ///
    /// With `target < total()`, that is the position of the value whose half-open span
    /// `[prefix_sum(i), prefix_sum(i + 1))` contains `target`; zero values are skipped.
    pub(crate) fn lower_bound(&self, mut target: usize) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
