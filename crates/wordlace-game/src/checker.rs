//! Whole-grid answer checking.

use derive_more::IsVariant;
use wordlace_core::{Grid, Puzzle};

/// Locking behavior applied to correct cells by [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum LockPolicy {
    /// Cells confirmed correct are frozen against further edits.
    LockCorrect,
    /// Verdicts only; correct cells stay editable and unprotected.
    CheckOnly,
}

/// The result of one whole-grid check pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// True when every non-black cell matches the solution. An empty cell is
    /// never correct, so a partially filled grid always fails this.
    pub all_correct: bool,
    /// The updated lock layer. Locks only ever accumulate.
    pub locked: Grid<bool>,
    /// Fresh per-cell verdicts: `Some(true)` correct, `Some(false)` wrong,
    /// `None` for empty and black cells.
    pub check: Grid<Option<bool>>,
}

/// Compares user entries against the solution, cell by cell.
///
/// Every non-black cell is reprocessed on every call, so repeated checks
/// with no edits in between are idempotent and locks accumulate
/// monotonically: a cell locked by an earlier pass stays locked regardless
/// of `policy`. Empty cells get no verdict and do not lock, but they still
/// fail `all_correct`.
///
/// Entries are stored uppercase by the mutator, so the comparison here is
/// exact.
#[must_use]
pub fn check(
    puzzle: &Puzzle,
    user: &Grid<Option<char>>,
    locked: &Grid<bool>,
    policy: LockPolicy,
) -> CheckOutcome {
    let mut all_correct = true;
    let mut new_locked = locked.clone();
    let mut new_check = Grid::filled(puzzle.grid.size(), None);

    for pos in puzzle.grid.positions() {
        let Some(solution_letter) = puzzle.grid.letter(pos) else {
            continue;
        };
        match user[pos] {
            None => all_correct = false,
            Some(entry) if entry == solution_letter => {
                new_check[pos] = Some(true);
                if policy.is_lock_correct() {
                    new_locked[pos] = true;
                }
            }
            Some(_) => {
                new_check[pos] = Some(false);
                all_correct = false;
            }
        }
    }

    CheckOutcome {
        all_correct,
        locked: new_locked,
        check: new_check,
    }
}

#[cfg(test)]
mod tests {
    use wordlace_core::{Clue, Clues, GridSize, Metadata, Position, SolutionGrid};

    use super::*;
    use crate::PlayGrids;

    fn cat_puzzle() -> Puzzle {
        let grid = SolutionGrid::try_from(vec![vec![Some('C'), Some('A'), Some('T')]]).unwrap();
        Puzzle {
            id: "cat".to_owned(),
            metadata: Metadata::default(),
            size: GridSize::new(1, 3),
            grid,
            clues: Clues {
                across: vec![Clue {
                    number: 1,
                    text: "Feline".to_owned(),
                    row: 0,
                    col: 0,
                    answer: "CAT".to_owned(),
                }],
                down: vec![],
            },
        }
    }

    fn filled(puzzle: &Puzzle, letters: &str) -> PlayGrids {
        let mut grids = PlayGrids::empty(puzzle.grid.size());
        for (col, ch) in letters.chars().enumerate() {
            if ch != ' ' {
                assert!(grids.set_letter(&puzzle.grid, Position::new(0, col), ch));
            }
        }
        grids
    }

    #[test]
    fn test_fully_correct_grid_locks_every_cell() {
        let puzzle = cat_puzzle();
        let grids = filled(&puzzle, "CAT");
        let outcome = check(
            &puzzle,
            grids.user(),
            grids.locked(),
            LockPolicy::LockCorrect,
        );

        assert!(outcome.all_correct);
        for col in 0..3 {
            assert!(outcome.locked[Position::new(0, col)]);
            assert_eq!(outcome.check[Position::new(0, col)], Some(true));
        }
    }

    #[test]
    fn test_wrong_letter_is_marked_but_never_locked() {
        let puzzle = cat_puzzle();
        let grids = filled(&puzzle, "CAX");
        let outcome = check(
            &puzzle,
            grids.user(),
            grids.locked(),
            LockPolicy::LockCorrect,
        );

        assert!(!outcome.all_correct);
        assert_eq!(outcome.check[Position::new(0, 2)], Some(false));
        assert!(!outcome.locked[Position::new(0, 2)]);
        assert!(outcome.locked[Position::new(0, 0)]);
    }

    #[test]
    fn test_empty_cell_gets_no_verdict_but_fails_all_correct() {
        let puzzle = cat_puzzle();
        let grids = filled(&puzzle, "CA ");
        let outcome = check(
            &puzzle,
            grids.user(),
            grids.locked(),
            LockPolicy::LockCorrect,
        );

        assert!(!outcome.all_correct);
        assert_eq!(outcome.check[Position::new(0, 2)], None);
        assert!(!outcome.locked[Position::new(0, 2)]);
    }

    #[test]
    fn test_check_is_idempotent_without_edits() {
        let puzzle = cat_puzzle();
        let grids = filled(&puzzle, "CAX");
        let first = check(
            &puzzle,
            grids.user(),
            grids.locked(),
            LockPolicy::LockCorrect,
        );
        let second = check(&puzzle, grids.user(), &first.locked, LockPolicy::LockCorrect);

        assert_eq!(first.all_correct, second.all_correct);
        assert_eq!(first.locked, second.locked);
        assert_eq!(first.check, second.check);
    }

    #[test]
    fn test_locks_are_monotonic_across_edit_and_recheck() {
        let puzzle = cat_puzzle();
        let mut grids = filled(&puzzle, "CAT");
        let outcome = check(
            &puzzle,
            grids.user(),
            grids.locked(),
            LockPolicy::LockCorrect,
        );
        grids.apply_check(outcome);

        // Locked cells reject edits, and a later pass keeps them locked
        // even under a policy that would not lock them today.
        assert!(!grids.set_letter(&puzzle.grid, Position::new(0, 0), 'x'));
        let again = check(&puzzle, grids.user(), grids.locked(), LockPolicy::CheckOnly);
        for col in 0..3 {
            assert!(again.locked[Position::new(0, col)]);
        }
    }

    #[test]
    fn test_check_only_policy_never_locks() {
        let puzzle = cat_puzzle();
        let grids = filled(&puzzle, "CAT");
        let outcome = check(&puzzle, grids.user(), grids.locked(), LockPolicy::CheckOnly);

        assert!(outcome.all_correct);
        for col in 0..3 {
            assert!(!outcome.locked[Position::new(0, col)]);
            assert_eq!(outcome.check[Position::new(0, col)], Some(true));
        }
    }

    #[test]
    fn test_black_cells_stay_unverdicted() {
        let grid = SolutionGrid::try_from(vec![vec![Some('A'), None]]).unwrap();
        let puzzle = Puzzle {
            id: "tiny".to_owned(),
            metadata: Metadata::default(),
            size: GridSize::new(1, 2),
            grid,
            clues: Clues {
                across: vec![],
                down: vec![],
            },
        };
        let grids = PlayGrids::empty(puzzle.grid.size());
        let outcome = check(
            &puzzle,
            grids.user(),
            grids.locked(),
            LockPolicy::LockCorrect,
        );
        assert_eq!(outcome.check[Position::new(0, 1)], None);
        assert!(!outcome.locked[Position::new(0, 1)]);
    }
}
