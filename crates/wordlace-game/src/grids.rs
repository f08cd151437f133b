use wordlace_core::{Grid, GridSize, Position, SolutionGrid};

use crate::CheckOutcome;

/// The three mutable per-cell layers of one solve session.
///
/// - `user`: the player's entries; `None` is an unfilled cell, `Some` holds
///   a single uppercase ASCII letter.
/// - `locked`: cells confirmed correct and frozen against further edits.
/// - `check`: per-cell verdicts from the last check; `None` means no
///   verdict, and the whole layer clears on every edit so stale marks never
///   survive a change.
///
/// Invariant: black cells always hold `(None, false, None)`. The mutators
/// here refuse to touch black cells, and snapshot restoration scrubs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayGrids {
    user: Grid<Option<char>>,
    locked: Grid<bool>,
    check: Grid<Option<bool>>,
}

impl PlayGrids {
    /// Creates all-empty grids for a puzzle of the given size.
    #[must_use]
    pub fn empty(size: GridSize) -> Self {
        Self {
            user: Grid::filled(size, None),
            locked: Grid::filled(size, false),
            check: Grid::filled(size, None),
        }
    }

    /// Rebuilds grids from restored layers.
    ///
    /// Returns `None` when any layer's dimensions disagree with `solution`.
    /// Black cells are scrubbed back to their invariant state, so a stale or
    /// hand-edited snapshot cannot violate it.
    #[must_use]
    pub fn from_layers(
        solution: &SolutionGrid,
        user: Grid<Option<char>>,
        locked: Grid<bool>,
        check: Grid<Option<bool>>,
    ) -> Option<Self> {
        let size = solution.size();
        if user.size() != size || locked.size() != size || check.size() != size {
            return None;
        }
        let mut grids = Self { user, locked, check };
        for pos in solution.positions() {
            if solution.is_black(pos) {
                grids.user[pos] = None;
                grids.locked[pos] = false;
                grids.check[pos] = None;
            }
        }
        Some(grids)
    }

    /// The user-entry layer.
    #[must_use]
    pub fn user(&self) -> &Grid<Option<char>> {
        &self.user
    }

    /// The lock layer.
    #[must_use]
    pub fn locked(&self) -> &Grid<bool> {
        &self.locked
    }

    /// The check-verdict layer.
    #[must_use]
    pub fn check(&self) -> &Grid<Option<bool>> {
        &self.check
    }

    /// The user's entry at `pos`.
    #[must_use]
    pub fn entry(&self, pos: Position) -> Option<char> {
        self.user.get(pos).copied().flatten()
    }

    /// Whether the cell at `pos` is locked.
    #[must_use]
    pub fn is_locked(&self, pos: Position) -> bool {
        self.locked.get(pos).copied().unwrap_or(false)
    }

    /// Stores `ch` uppercased as the cell's sole letter, overwriting any
    /// prior entry.
    ///
    /// Returns `false` without touching anything when the cell is black or
    /// locked. A successful write counts as an edit even when it re-enters
    /// the same letter, so it clears every check verdict.
    pub fn set_letter(&mut self, solution: &SolutionGrid, pos: Position, ch: char) -> bool {
        if solution.is_black(pos) || self.locked[pos] {
            return false;
        }
        self.user[pos] = Some(ch.to_ascii_uppercase());
        self.reset_check();
        true
    }

    /// Clears the cell's entry, ignoring lock state.
    ///
    /// Ordinary backspace never reaches a locked cell (it turns into
    /// cursor-only navigation first), so the explicit clear path is the only
    /// caller and may clear unconditionally. Returns `true` only when an
    /// entry was actually removed; black cells are never touched.
    pub fn clear_letter(&mut self, solution: &SolutionGrid, pos: Position) -> bool {
        if solution.is_black(pos) {
            return false;
        }
        if self.user[pos].take().is_some() {
            self.reset_check();
            return true;
        }
        false
    }

    /// Clears every check verdict back to "no verdict".
    pub fn reset_check(&mut self) {
        self.check.fill(None);
    }

    /// Adopts the grids produced by a check pass.
    pub fn apply_check(&mut self, outcome: CheckOutcome) {
        self.locked = outcome.locked;
        self.check = outcome.check;
    }
}
