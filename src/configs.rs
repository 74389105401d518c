//! Cop-configuration enumeration and indexing.
//!
//! A configuration is a sorted multiset of k vertices, stored as k bytes.
//! All C(N+k-1, k) configurations are generated in lexicographic order into
//! one packed byte array; the id of a configuration is its rank in that
//! order, recovered by binary search over the k-byte records.
//!
//! Modeling cops as a sorted multiset collapses the k! ordering redundancy;
//! every operation that produces a configuration re-sorts before lookup.

use crate::error::SolverError;

/// All cop configurations for a given (N, k), packed contiguously.
pub struct ConfigTable {
    n: usize,
    k: usize,
    count: usize,
    bytes: Vec<u8>,
}

/// C(n + k - 1, k): the number of sorted k-multisets over n vertices.
/// Checked arithmetic in u128; the result must fit the platform index type.
pub fn multiset_count(n: usize, k: usize) -> Result<usize, SolverError> {
    if k == 0 {
        return Ok(1);
    }
    let n_val = (n + k - 1) as u128;
    let mut k_val = k as u128;
    if k_val > n_val - k_val {
        k_val = n_val - k_val;
    }
    let mut res: u128 = 1;
    for i in 1..=k_val {
        let factor = n_val - i + 1;
        res = res
            .checked_mul(factor)
            .ok_or(SolverError::StateSpaceOverflow {
                quantity: "C(N+k-1, k)",
                value: u128::MAX,
            })?
            / i;
    }
    usize::try_from(res).map_err(|_| SolverError::StateSpaceOverflow {
        quantity: "C(N+k-1, k)",
        value: res,
    })
}

impl ConfigTable {
    /// Enumerate every sorted k-multiset of {0..n-1} in lexicographic order.
    ///
    /// Starts from (0,…,0); each step bumps the rightmost incrementable
    /// position and levels everything to its right, preserving sorted order.
    /// Exactly `count * k` bytes are allocated up front.
    pub fn generate(n: usize, k: usize) -> Result<Self, SolverError> {
        let count = multiset_count(n, k)?;
        let total_bytes = count
            .checked_mul(k)
            .ok_or(SolverError::StateSpaceOverflow {
                quantity: "M * k (configuration bytes)",
                value: count as u128 * k as u128,
            })?;

        let mut bytes = Vec::with_capacity(total_bytes);
        if k > 0 {
            let mut current = vec![0u8; k];
            loop {
                bytes.extend_from_slice(&current);

                let mut p = k as isize - 1;
                while p >= 0 && current[p as usize] as usize == n - 1 {
                    p -= 1;
                }
                if p < 0 {
                    break;
                }
                let p = p as usize;
                current[p] += 1;
                let v = current[p];
                for slot in current[p + 1..].iter_mut() {
                    *slot = v;
                }
            }
            debug_assert_eq!(bytes.len(), total_bytes);
        }

        Ok(ConfigTable { n, k, count, bytes })
    }

    /// The configuration bytes for `id` (sorted ascending, length k).
    #[inline(always)]
    pub fn config(&self, id: usize) -> &[u8] {
        &self.bytes[id * self.k..id * self.k + self.k]
    }

    /// Binary search a sorted k-tuple back to its id.
    ///
    /// Slice comparison is lexicographic byte order, which coincides with
    /// the generation order, so the search is exact.
    pub fn lookup(&self, tuple: &[u8]) -> Option<usize> {
        debug_assert_eq!(tuple.len(), self.k);
        let mut lo = 0usize;
        let mut hi = self.count;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.config(mid).cmp(tuple) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Some(mid),
            }
        }
        None
    }

    /// Does configuration `id` place a cop on vertex `v`? (Capture test.)
    #[inline(always)]
    pub fn contains(&self, id: usize, v: u8) -> bool {
        self.config(id).contains(&v)
    }

    #[inline(always)]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Size of the packed array in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_closed_form() {
        assert_eq!(multiset_count(3, 1).unwrap(), 3);
        assert_eq!(multiset_count(3, 2).unwrap(), 6);
        assert_eq!(multiset_count(10, 3).unwrap(), 220);
        assert_eq!(multiset_count(255, 1).unwrap(), 255);
        assert_eq!(multiset_count(7, 0).unwrap(), 1);
    }

    #[test]
    fn enumeration_is_sorted_and_complete() {
        let table = ConfigTable::generate(4, 2).unwrap();
        assert_eq!(table.count(), 10);
        for id in 0..table.count() {
            let c = table.config(id);
            assert!(c[0] <= c[1], "config {:?} not sorted", c);
            if id > 0 {
                assert!(table.config(id - 1) < c, "enumeration not strictly increasing");
            }
        }
        assert_eq!(table.config(0), &[0, 0]);
        assert_eq!(table.config(9), &[3, 3]);
    }

    #[test]
    fn lookup_inverts_enumeration() {
        let table = ConfigTable::generate(6, 3).unwrap();
        for id in 0..table.count() {
            let c = table.config(id).to_vec();
            assert_eq!(table.lookup(&c), Some(id));
        }
        assert_eq!(table.lookup(&[0, 0, 6]), None);
    }

    #[test]
    fn empty_configuration_for_zero_cops() {
        let table = ConfigTable::generate(5, 0).unwrap();
        assert_eq!(table.count(), 1);
        assert_eq!(table.config(0), &[] as &[u8]);
        assert_eq!(table.lookup(&[]), Some(0));
    }

    #[test]
    fn contains_detects_capture() {
        let table = ConfigTable::generate(5, 2).unwrap();
        let id = table.lookup(&[1, 3]).unwrap();
        assert!(table.contains(id, 1));
        assert!(table.contains(id, 3));
        assert!(!table.contains(id, 2));
    }
}
