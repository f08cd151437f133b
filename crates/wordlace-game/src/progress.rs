//! Persisted solve progress.

use serde::{Deserialize, Serialize};
use wordlace_core::{Grid, SolutionGrid};

use crate::PlayGrids;

/// One persisted snapshot of a solve session.
///
/// Serialized as JSON with the reference store's camelCase field names.
/// Grids are stored as row-major row vectors; `null` is an unfilled cell or
/// an unverdicted cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleProgress {
    /// User entries.
    pub user_grid: Vec<Vec<Option<char>>>,
    /// Locked (confirmed-correct) cells.
    pub locked_grid: Vec<Vec<bool>>,
    /// Check verdicts from the last check, if any survived.
    pub check_grid: Vec<Vec<Option<bool>>>,
    /// Unix timestamp (seconds) of the last play action.
    pub last_played: u64,
    /// Share of non-black cells holding an entry, 0-100.
    pub percent_complete: u8,
    /// True when every non-black cell is locked correct.
    pub is_completed: bool,
}

impl PuzzleProgress {
    /// Captures a snapshot of live grids.
    #[must_use]
    pub fn capture(grids: &PlayGrids, solution: &SolutionGrid, last_played: u64) -> Self {
        Self {
            user_grid: grids.user().to_rows(),
            locked_grid: grids.locked().to_rows(),
            check_grid: grids.check().to_rows(),
            last_played,
            percent_complete: completion_percent(grids.user(), solution),
            is_completed: puzzle_is_complete(grids.locked(), solution),
        }
    }

    /// Rebuilds live grids from the snapshot.
    ///
    /// Returns `None` when any layer's dimensions disagree with `solution`
    /// (a snapshot saved against a different puzzle revision); callers treat
    /// that as "no saved progress". Black cells are scrubbed back to their
    /// invariant state.
    #[must_use]
    pub fn into_grids(self, solution: &SolutionGrid) -> Option<PlayGrids> {
        let user = Grid::from_rows(self.user_grid)?;
        let locked = Grid::from_rows(self.locked_grid)?;
        let check = Grid::from_rows(self.check_grid)?;
        PlayGrids::from_layers(solution, user, locked, check)
    }
}

/// Percentage of non-black cells holding an entry, rounded to nearest.
///
/// A degenerate puzzle with zero non-black cells reports 0.
#[must_use]
pub fn completion_percent(user: &Grid<Option<char>>, solution: &SolutionGrid) -> u8 {
    let mut total = 0_usize;
    let mut filled = 0_usize;
    for pos in solution.positions() {
        if solution.is_black(pos) {
            continue;
        }
        total += 1;
        if user.get(pos).copied().flatten().is_some() {
            filled += 1;
        }
    }
    if total == 0 {
        return 0;
    }
    #[expect(clippy::cast_possible_truncation)]
    let percent = ((filled * 200 + total) / (total * 2)) as u8;
    percent
}

/// True iff every non-black cell is locked.
#[must_use]
pub fn puzzle_is_complete(locked: &Grid<bool>, solution: &SolutionGrid) -> bool {
    solution
        .positions()
        .filter(|&pos| !solution.is_black(pos))
        .all(|pos| locked.get(pos).copied().unwrap_or(false))
}
