//! Per-state storage for the retrograde fixed point.
//!
//! Each state packs the copWin flag and the robber safe-move counter into a
//! single atomic cell: bit 0 is copWin, the remaining bits count the robber
//! moves not yet known to be cop-winning. One cell per (C, r); the narrow
//! u8 layout holds counters up to 127 and the wide u16 layout covers every
//! admissible degree, selected once at allocation (the graph's maximum
//! closed degree is known by then).
//!
//! Cross-thread coordination is exactly two claim primitives:
//! - claim-by-exchange: `fetch_or` of the copWin bit; the thread that
//!   observes the 0→1 transition owns the follow-up (depth write, enqueue).
//! - claim-by-decrement: `fetch_sub` on the counter; the thread that
//!   observes 1→0 owns setting robberWin and enqueueing.
//!
//! Relaxed ordering suffices: no thread reads data published by another
//! thread within a wave, and the wave barrier orders everything else.
//!
//! robberWin lives in its own bitset rather than being derived from
//! `safeCount == 0`: capture states start at zero and still receive
//! decrements from neighbors that later become cop-winning, so the counter
//! alone cannot stay authoritative. The decrement path skips states whose
//! robberWin bit is already set; for all other states the number of
//! decrements is bounded by the initial counter, so the counter never
//! wraps.

use std::sync::atomic::{AtomicU16, AtomicU64, AtomicU8, Ordering};

use crate::constants::{COP_WIN_BIT, NARROW_SAFE_MAX, SAFE_MOVES_SHIFT};

/// Packed copWin + safeCount cells, one per state.
pub enum StateTable {
    /// 1 byte per state; safe counts up to 127.
    Narrow(Vec<AtomicU8>),
    /// 2 bytes per state; used when some closed degree exceeds 127.
    Wide(Vec<AtomicU16>),
}

impl StateTable {
    /// Allocate zeroed cells, choosing the narrowest layout that can hold
    /// `max_safe`.
    pub fn allocate(num_states: usize, max_safe: u32) -> Self {
        if max_safe <= NARROW_SAFE_MAX {
            let mut cells = Vec::with_capacity(num_states);
            cells.resize_with(num_states, || AtomicU8::new(0));
            StateTable::Narrow(cells)
        } else {
            let mut cells = Vec::with_capacity(num_states);
            cells.resize_with(num_states, || AtomicU16::new(0));
            StateTable::Wide(cells)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            StateTable::Narrow(c) => c.len(),
            StateTable::Wide(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per cell in this layout.
    pub fn cell_bytes(&self) -> usize {
        match self {
            StateTable::Narrow(_) => 1,
            StateTable::Wide(_) => 2,
        }
    }

    /// Initialize a capture state: copWin set, counter zero.
    #[inline(always)]
    pub fn init_capture(&self, sid: usize) {
        match self {
            StateTable::Narrow(c) => c[sid].store(COP_WIN_BIT as u8, Ordering::Relaxed),
            StateTable::Wide(c) => c[sid].store(COP_WIN_BIT, Ordering::Relaxed),
        }
    }

    /// Initialize a free state with its safe-move counter.
    #[inline(always)]
    pub fn init_free(&self, sid: usize, safe: u32) {
        match self {
            StateTable::Narrow(c) => {
                debug_assert!(safe <= NARROW_SAFE_MAX);
                c[sid].store((safe as u8) << SAFE_MOVES_SHIFT, Ordering::Relaxed)
            }
            StateTable::Wide(c) => c[sid].store((safe as u16) << SAFE_MOVES_SHIFT, Ordering::Relaxed),
        }
    }

    #[inline(always)]
    pub fn cop_win(&self, sid: usize) -> bool {
        match self {
            StateTable::Narrow(c) => c[sid].load(Ordering::Relaxed) & COP_WIN_BIT as u8 != 0,
            StateTable::Wide(c) => c[sid].load(Ordering::Relaxed) & COP_WIN_BIT != 0,
        }
    }

    #[inline(always)]
    pub fn safe_count(&self, sid: usize) -> u32 {
        match self {
            StateTable::Narrow(c) => (c[sid].load(Ordering::Relaxed) >> SAFE_MOVES_SHIFT) as u32,
            StateTable::Wide(c) => (c[sid].load(Ordering::Relaxed) >> SAFE_MOVES_SHIFT) as u32,
        }
    }

    /// Overwrite the safe-move counter, preserving the copWin bit.
    /// Not concurrency-safe; used by the sequential scan solver only.
    #[inline]
    pub fn store_safe(&self, sid: usize, safe: u32) {
        match self {
            StateTable::Narrow(c) => {
                let win = c[sid].load(Ordering::Relaxed) & COP_WIN_BIT as u8;
                c[sid].store(((safe as u8) << SAFE_MOVES_SHIFT) | win, Ordering::Relaxed);
            }
            StateTable::Wide(c) => {
                let win = c[sid].load(Ordering::Relaxed) & COP_WIN_BIT;
                c[sid].store(((safe as u16) << SAFE_MOVES_SHIFT) | win, Ordering::Relaxed);
            }
        }
    }

    /// Claim-by-exchange: set the copWin bit, returning true iff this call
    /// performed the 0→1 transition. Only the claiming thread enqueues.
    #[inline(always)]
    pub fn claim_cop_win(&self, sid: usize) -> bool {
        match self {
            StateTable::Narrow(c) => {
                c[sid].fetch_or(COP_WIN_BIT as u8, Ordering::Relaxed) & COP_WIN_BIT as u8 == 0
            }
            StateTable::Wide(c) => c[sid].fetch_or(COP_WIN_BIT, Ordering::Relaxed) & COP_WIN_BIT == 0,
        }
    }

    /// Claim-by-decrement: subtract one safe move, returning true iff this
    /// call performed the 1→0 transition. Only the claiming thread sets
    /// robberWin and enqueues.
    #[inline(always)]
    pub fn decrement_safe(&self, sid: usize) -> bool {
        match self {
            StateTable::Narrow(c) => {
                let prior = c[sid].fetch_sub(1 << SAFE_MOVES_SHIFT, Ordering::Relaxed);
                (prior >> SAFE_MOVES_SHIFT) == 1
            }
            StateTable::Wide(c) => {
                let prior = c[sid].fetch_sub(1 << SAFE_MOVES_SHIFT, Ordering::Relaxed);
                (prior >> SAFE_MOVES_SHIFT) == 1
            }
        }
    }
}

/// One robberWin bit per state, 64 states per word.
pub struct RobberWinBits {
    bits: Vec<AtomicU64>,
}

impl RobberWinBits {
    pub fn allocate(num_states: usize) -> Self {
        let words = num_states.div_ceil(64);
        let mut bits = Vec::with_capacity(words);
        bits.resize_with(words, || AtomicU64::new(0));
        RobberWinBits { bits }
    }

    #[inline(always)]
    pub fn set(&self, sid: usize) {
        self.bits[sid / 64].fetch_or(1 << (sid % 64), Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn get(&self, sid: usize) -> bool {
        self.bits[sid / 64].load(Ordering::Relaxed) & (1 << (sid % 64)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_layout_claim_semantics() {
        let t = StateTable::allocate(4, 5);
        assert_eq!(t.cell_bytes(), 1);
        t.init_free(0, 2);
        assert!(!t.cop_win(0));
        assert_eq!(t.safe_count(0), 2);

        assert!(t.claim_cop_win(0), "first claim wins");
        assert!(!t.claim_cop_win(0), "second claim observes the set bit");
        assert!(t.cop_win(0));
        assert_eq!(t.safe_count(0), 2, "claim leaves the counter alone");

        assert!(!t.decrement_safe(0), "2 -> 1 is not the final decrement");
        assert!(t.decrement_safe(0), "1 -> 0 is");
        assert_eq!(t.safe_count(0), 0);
        assert!(t.cop_win(0), "decrements leave the flag alone");
    }

    #[test]
    fn wide_layout_selected_for_large_degrees() {
        let t = StateTable::allocate(2, 200);
        assert_eq!(t.cell_bytes(), 2);
        t.init_free(1, 200);
        assert_eq!(t.safe_count(1), 200);
        for _ in 0..199 {
            assert!(!t.decrement_safe(1));
        }
        assert!(t.decrement_safe(1));
    }

    #[test]
    fn capture_init() {
        let t = StateTable::allocate(1, 3);
        t.init_capture(0);
        assert!(t.cop_win(0));
        assert_eq!(t.safe_count(0), 0);
    }

    #[test]
    fn robber_bits() {
        let bits = RobberWinBits::allocate(130);
        assert!(!bits.get(0));
        bits.set(0);
        bits.set(64);
        bits.set(129);
        assert!(bits.get(0) && bits.get(64) && bits.get(129));
        assert!(!bits.get(1) && !bits.get(128));
    }
}
