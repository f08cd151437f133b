//! Active-clue resolution: mapping a cell and typing direction to the clue
//! that occupies it.

use crate::{Clue, Direction, Position, Puzzle};

/// A clue resolved against a concrete cell and typing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveClue<'a> {
    /// The matched clue.
    pub clue: &'a Clue,
    /// The direction the clue runs in.
    pub direction: Direction,
}

impl ActiveClue<'_> {
    /// Iterates the cells of the active word in answer order.
    ///
    /// UI layers use this to highlight the whole word around the cursor.
    pub fn cells(&self) -> impl Iterator<Item = Position> + use<'_> {
        self.clue.span(self.direction)
    }
}

/// Returns the first clue in `clues` whose span in `direction` contains `pos`.
///
/// Spans within one direction's list never overlap in a well-formed puzzle,
/// so the first match is the unique match. On malformed data with
/// overlapping spans the earliest clue in list order wins; that is policy,
/// not a failure.
#[must_use]
pub fn find_clue_at(clues: &[Clue], direction: Direction, pos: Position) -> Option<&Clue> {
    clues.iter().find(|clue| clue.span_contains(direction, pos))
}

/// Resolves the active clue for a cell and typing direction.
///
/// Returns `None` when the cell is black or no clue in that direction
/// covers it.
///
/// # Example
///
/// ```
/// use wordlace_core::{Direction, Position, Puzzle, active_clue};
///
/// let puzzle: Puzzle = serde_json::from_str(
///     r#"{
///         "id": "mini",
///         "size": {"rows": 1, "cols": 3},
///         "grid": [["C", "A", "T"]],
///         "clues": {
///             "across": [{"number": 1, "clue": "Feline", "row": 0, "col": 0, "answer": "CAT"}],
///             "down": []
///         }
///     }"#,
/// )
/// .unwrap();
///
/// let active = active_clue(&puzzle, Direction::Across, Position::new(0, 2)).unwrap();
/// assert_eq!(active.clue.number, 1);
/// assert!(active_clue(&puzzle, Direction::Down, Position::new(0, 2)).is_none());
/// ```
#[must_use]
pub fn active_clue(puzzle: &Puzzle, direction: Direction, pos: Position) -> Option<ActiveClue<'_>> {
    let clue = find_clue_at(puzzle.clues.list(direction), direction, pos)?;
    Some(ActiveClue { clue, direction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::tests::{clue, puzzle_from_rows};

    fn cross_puzzle() -> Puzzle {
        // C A T
        // O # O
        // W E D
        puzzle_from_rows(
            &["CAT", "O#O", "WED"],
            vec![clue(1, 0, 0, "CAT"), clue(4, 2, 0, "WED")],
            vec![clue(1, 0, 0, "COW"), clue(3, 0, 2, "TOD")],
        )
    }

    #[test]
    fn test_finds_clue_through_middle_of_span() {
        let puzzle = cross_puzzle();
        let active = active_clue(&puzzle, Direction::Across, Position::new(0, 1)).unwrap();
        assert_eq!(active.clue.number, 1);
        assert_eq!(active.direction, Direction::Across);

        let active = active_clue(&puzzle, Direction::Down, Position::new(1, 2)).unwrap();
        assert_eq!(active.clue.number, 3);
    }

    #[test]
    fn test_black_cell_has_no_active_clue() {
        let puzzle = cross_puzzle();
        for direction in Direction::ALL {
            assert!(active_clue(&puzzle, direction, Position::new(1, 1)).is_none());
        }
    }

    #[test]
    fn test_cell_covered_in_one_direction_only() {
        let puzzle = cross_puzzle();
        // (1, 0) sits inside 1-down but no across clue spans it.
        assert!(active_clue(&puzzle, Direction::Across, Position::new(1, 0)).is_none());
        assert!(active_clue(&puzzle, Direction::Down, Position::new(1, 0)).is_some());
    }

    #[test]
    fn test_overlapping_spans_first_in_list_wins() {
        let list = vec![clue(1, 0, 0, "CAT"), clue(2, 0, 1, "AT")];
        let found = find_clue_at(&list, Direction::Across, Position::new(0, 1)).unwrap();
        assert_eq!(found.number, 1);
    }

    #[test]
    fn test_active_word_cells() {
        let puzzle = cross_puzzle();
        let active = active_clue(&puzzle, Direction::Down, Position::new(2, 0)).unwrap();
        let cells: Vec<_> = active.cells().collect();
        assert_eq!(
            cells,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }
}
