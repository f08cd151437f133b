//! Mutable solve-session state for crossword puzzles.
//!
//! This crate provides the pure state-machine pieces of the player engine:
//! the per-cell [`PlayGrids`] (user entries, locks, check verdicts), cursor
//! navigation over black and locked cells, the whole-grid answer [`check`],
//! and the persisted [`PuzzleProgress`] snapshot.
//!
//! All operations here are total over valid state: a blocked edit or an
//! out-of-bounds move is a no-op outcome, never an error. The session layer
//! (`wordlace-session`) owns timers and persistence I/O.

pub use self::{
    checker::{CheckOutcome, LockPolicy, check},
    grids::PlayGrids,
    navigation::{advance_target, arrow_target, retreat_target, tab_target},
    progress::{PuzzleProgress, completion_percent, puzzle_is_complete},
};

mod checker;
mod grids;
mod navigation;
mod progress;
