//! Solver-wide constants and state-indexing functions.
//!
//! The flat state layout maps game position (C, r) to `stateId = cId * N + r`
//! ([`state_index`]); the turn phase is not part of the id — it selects which
//! of the two per-state flags (`copWin` / `robberWin`) applies, and on the
//! frontier it rides in the high bit of the packed word.

/// Row terminator / padding value in the adjacency table.
///
/// 255 can never collide with a valid vertex: with at most [`MAX_VERTICES`]
/// vertices, ids run 0..=254.
pub const SENTINEL: u8 = 255;

/// Maximum supported vertex count. Vertices must fit in one byte with the
/// sentinel value reserved.
pub const MAX_VERTICES: usize = 255;

/// Maximum supported cop count (configurations are k bytes).
pub const MAX_COPS: usize = 255;

/// High bit of a packed frontier word: 1 = robber's turn, 0 = cop's turn.
/// The remaining 63 bits hold the state id.
pub const ROBBER_TURN_BIT: u64 = 1 << 63;

/// Mask extracting the state id from a packed frontier word.
pub const STATE_ID_MASK: u64 = !ROBBER_TURN_BIT;

// ── Packed state-cell layout ──────────────────────────────────────────────
//
// Bit 0: copWin flag.
// Bits 1..: robber safe-move counter (7 bits in the narrow u8 layout,
// 15 bits in the wide u16 fallback).

/// copWin flag bit within a packed state cell.
pub const COP_WIN_BIT: u16 = 1;

/// Shift of the safe-move counter within a packed state cell.
pub const SAFE_MOVES_SHIFT: u32 = 1;

/// Largest safe-move count the narrow (u8) layout can hold.
pub const NARROW_SAFE_MAX: u32 = 127;

/// Frontier entries handed to a worker per batch.
pub const FRONTIER_BATCH: usize = 4096;

/// Configurations processed per task during the parallel CSR build.
pub const CSR_BUILD_CHUNK: usize = 1024;

/// Map (configuration id, robber vertex) to the flat state id.
#[inline(always)]
pub fn state_index(config_id: usize, robber: usize, n: usize) -> usize {
    config_id * n + robber
}

/// Convert an internal half-step distance (wave/pass number) to whole
/// rounds: one round is a cop move followed by a robber move.
#[inline(always)]
pub fn half_steps_to_rounds(half: usize) -> i32 {
    ((half + 1) / 2) as i32
}
