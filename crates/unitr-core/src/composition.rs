//! Weak compositions over restricted per-slot alphabets
//!
//! Enumerates every vector `(a_1, .., a_n)` with `a_i` drawn from slot i's
//! alphabet and `a_1 + .. + a_n == total`. Used to spread a prefix-exponent
//! budget over the terms of a composite unit.

/// Generator over a fixed list of slot alphabets
#[derive(Debug, Clone)]
pub struct CompositionGenerator {
    alphabets: Vec<Vec<u32>>,
    /// Smallest reachable sum of slots `i..`
    min_suffix: Vec<u32>,
    /// Largest reachable sum of slots `i..`
    max_suffix: Vec<u32>,
}

impl CompositionGenerator {
    /// Build a generator; every alphabet is sorted and deduplicated.
    /// A slot with an empty alphabet makes every total unreachable.
    pub fn new(alphabets: Vec<Vec<u32>>) -> Self {
        let alphabets: Vec<Vec<u32>> = alphabets
            .into_iter()
            .map(|mut a| {
                a.sort_unstable();
                a.dedup();
                a
            })
            .collect();

        let n = alphabets.len();
        let mut min_suffix = vec![0u32; n + 1];
        let mut max_suffix = vec![0u32; n + 1];
        for i in (0..n).rev() {
            let (lo, hi) = match (alphabets[i].first(), alphabets[i].last()) {
                (Some(lo), Some(hi)) => (*lo, *hi),
                // Nothing can be placed here; push the bounds out of reach
                _ => (u32::MAX, 0),
            };
            min_suffix[i] = min_suffix[i + 1].saturating_add(lo);
            max_suffix[i] = max_suffix[i + 1].saturating_add(hi);
        }

        Self {
            alphabets,
            min_suffix,
            max_suffix,
        }
    }

    /// Every slot may take any value from 0 up to `total`
    pub fn unrestricted(slots: usize, total: u32) -> Self {
        Self::new(vec![(0..=total).collect(); slots])
    }

    pub fn slots(&self) -> usize {
        self.alphabets.len()
    }

    /// Visit every composition of `total` in lexicographic order
    pub fn for_each(&self, total: u32, mut visit: impl FnMut(&[u32])) {
        let mut current = Vec::with_capacity(self.alphabets.len());
        self.descend(0, total, &mut current, &mut visit);
    }

    /// Collect every composition of `total`
    pub fn compositions(&self, total: u32) -> Vec<Vec<u32>> {
        let mut out = Vec::new();
        self.for_each(total, |c| out.push(c.to_vec()));
        out
    }

    pub fn count(&self, total: u32) -> usize {
        let mut n = 0;
        self.for_each(total, |_| n += 1);
        n
    }

    fn descend(
        &self,
        slot: usize,
        remaining: u32,
        current: &mut Vec<u32>,
        visit: &mut impl FnMut(&[u32]),
    ) {
        if remaining < self.min_suffix[slot] || remaining > self.max_suffix[slot] {
            return;
        }
        if slot == self.alphabets.len() {
            // Bounds above guarantee remaining == 0 here
            visit(current);
            return;
        }
        for &value in &self.alphabets[slot] {
            if value > remaining {
                break;
            }
            current.push(value);
            self.descend(slot + 1, remaining - value, current, visit);
            current.pop();
        }
    }
}
