//! Core data model for crossword puzzles.
//!
//! This crate holds the immutable types shared by the player engine: cell
//! [`Position`]s and the typing [`Direction`], the generic rectangular
//! [`Grid`] container, the [`Puzzle`] itself (solution grid, clue lists,
//! display metadata), and the clue locator that resolves which clue occupies
//! a given cell in a given direction.
//!
//! Everything here is pure data and pure functions; mutable solve-session
//! state lives in the `wordlace-game` crate.

pub use self::{
    grid::{Grid, GridSize},
    locator::{ActiveClue, active_clue, find_clue_at},
    position::{Direction, Position},
    puzzle::{Clue, Clues, Metadata, Puzzle, PuzzleError, SolutionGrid},
};

mod grid;
mod locator;
mod position;
mod puzzle;
