//! Engine module: compact 4x4 board, fast shift/merge ops, and
//! precomputed lookup tables. Public API stays small and ergonomic.
//!
//! - `Board` is the packed 4x4 state with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Internals (tables and hot ops) live in submodules to keep things tidy.

mod ops;
pub mod state;
mod tables;

pub use state::{Board, Move, Score};

pub use ops::{count_empty, get_tile_val, is_stuck, shift, shift_scored};

/// Initialize internal precomputed tables eagerly.
/// Safe to call multiple times; tables also initialize lazily on first use.
pub fn new() {
    tables::init();
}
