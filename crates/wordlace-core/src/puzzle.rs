use derive_more::{Display, Error};
use serde::Deserialize;

use crate::{Direction, Grid, GridSize, Position};

/// A single clue and its answer.
///
/// `(row, col)` is the clue's starting cell. The answer occupies
/// `(row, col) .. (row, col + len - 1)` for an across clue and
/// `(row, col) .. (row + len - 1, col)` for a down clue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Clue {
    /// The printed clue number.
    pub number: u32,
    /// The clue text shown to the player.
    #[serde(rename = "clue")]
    pub text: String,
    /// Row of the starting cell.
    pub row: usize,
    /// Column of the starting cell.
    pub col: usize,
    /// The solution string for the word, uppercase.
    pub answer: String,
}

impl Clue {
    /// The clue's starting cell.
    #[must_use]
    #[inline]
    pub const fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Number of cells the answer occupies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answer.chars().count()
    }

    /// Whether the answer is empty (malformed data).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answer.is_empty()
    }

    /// Whether the clue's span in `direction` contains `pos`.
    #[must_use]
    pub fn span_contains(&self, direction: Direction, pos: Position) -> bool {
        match direction {
            Direction::Across => {
                pos.row == self.row && pos.col >= self.col && pos.col < self.col + self.len()
            }
            Direction::Down => {
                pos.col == self.col && pos.row >= self.row && pos.row < self.row + self.len()
            }
        }
    }

    /// Iterates the cells of the span in answer order.
    pub fn span(&self, direction: Direction) -> impl Iterator<Item = Position> + use<'_> {
        let start = self.start();
        (0..self.len()).map(move |i| match direction {
            Direction::Across => Position::new(start.row, start.col + i),
            Direction::Down => Position::new(start.row + i, start.col),
        })
    }
}

/// The two ordered clue lists of a puzzle.
///
/// Each list is ordered by clue number ascending; spans within one list
/// never overlap in a well-formed puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Clues {
    /// Across clues, by number ascending.
    pub across: Vec<Clue>,
    /// Down clues, by number ascending.
    pub down: Vec<Clue>,
}

impl Clues {
    /// The clue list for `direction`.
    #[must_use]
    pub fn list(&self, direction: Direction) -> &[Clue] {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }
}

/// Display-only puzzle attributes, opaque to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Publication date.
    pub date: String,
    /// Puzzle title.
    pub title: String,
    /// Constructor credit.
    pub author: String,
    /// Editor credit.
    pub editor: String,
    /// Copyright line.
    pub copyright: String,
    /// Publisher name.
    pub publisher: String,
    /// Day of week.
    pub dow: String,
}

/// The solution grid: each cell is an uppercase solution letter or black.
///
/// Black cells are the non-playable structural voids of the puzzle; they are
/// represented as `None` and deserialize from JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<char>>>")]
pub struct SolutionGrid(Grid<Option<char>>);

impl SolutionGrid {
    /// The grid's dimensions.
    #[must_use]
    #[inline]
    pub fn size(&self) -> GridSize {
        self.0.size()
    }

    /// Whether the cell is black.
    ///
    /// Out-of-bounds positions count as black, which lets navigation treat
    /// the grid edge and structural voids uniformly.
    #[must_use]
    pub fn is_black(&self, pos: Position) -> bool {
        !matches!(self.0.get(pos), Some(Some(_)))
    }

    /// The solution letter at `pos`, or `None` for black or out of bounds.
    #[must_use]
    pub fn letter(&self, pos: Position) -> Option<char> {
        self.0.get(pos).copied().flatten()
    }

    /// The first non-black cell in row-major order, if any.
    #[must_use]
    pub fn first_open_cell(&self) -> Option<Position> {
        self.0.positions().find(|&pos| !self.is_black(pos))
    }

    /// Number of non-black cells.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.0.positions().filter(|&pos| !self.is_black(pos)).count()
    }

    /// Iterates all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        self.0.positions()
    }
}

impl TryFrom<Vec<Vec<Option<char>>>> for SolutionGrid {
    type Error = PuzzleError;

    fn try_from(rows: Vec<Vec<Option<char>>>) -> Result<Self, PuzzleError> {
        Grid::from_rows(rows).map(Self).ok_or(PuzzleError::RaggedGrid)
    }
}

/// A complete, immutable crossword puzzle as loaded from a puzzle file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Puzzle {
    /// Unique puzzle identifier, e.g. `"nyt-1976-01-01"`.
    pub id: String,
    /// Display-only attributes.
    #[serde(default)]
    pub metadata: Metadata,
    /// Declared dimensions.
    pub size: GridSize,
    /// Solution letters and black cells.
    pub grid: SolutionGrid,
    /// Across and down clue lists.
    pub clues: Clues,
}

impl Puzzle {
    /// Checks structural consistency of puzzle data.
    ///
    /// Intended for the data-acquisition boundary; the engine assumes a
    /// validated puzzle and never re-checks.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found: dimension disagreement,
    /// an empty or out-of-bounds clue span, a clue answer that disagrees
    /// with the solution grid, or a clue list that is not ordered by number.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.size.rows == 0 || self.size.cols == 0 || self.grid.size() != self.size {
            return Err(PuzzleError::SizeMismatch {
                declared_rows: self.size.rows,
                declared_cols: self.size.cols,
            });
        }
        for direction in Direction::ALL {
            let list = self.clues.list(direction);
            if list.windows(2).any(|pair| pair[0].number >= pair[1].number) {
                return Err(PuzzleError::UnsortedClues { direction });
            }
            for clue in list {
                if clue.is_empty() {
                    return Err(PuzzleError::EmptyAnswer {
                        number: clue.number,
                        direction,
                    });
                }
                for (pos, expected) in clue.span(direction).zip(clue.answer.chars()) {
                    if self.grid.letter(pos) != Some(expected) {
                        return Err(PuzzleError::AnswerMismatch {
                            number: clue.number,
                            direction,
                            pos,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// A structural problem in puzzle data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// Grid rows are missing or not all the same length.
    #[display("grid rows are empty or ragged")]
    RaggedGrid,
    /// Grid dimensions disagree with the declared size.
    #[display("grid does not match declared size {declared_rows}x{declared_cols}")]
    SizeMismatch {
        /// Declared row count.
        declared_rows: usize,
        /// Declared column count.
        declared_cols: usize,
    },
    /// A clue list is not ordered by clue number ascending.
    #[display("{direction} clues are not ordered by number")]
    UnsortedClues {
        /// The offending list.
        direction: Direction,
    },
    /// A clue has an empty answer.
    #[display("{direction} clue {number} has an empty answer")]
    EmptyAnswer {
        /// Clue number.
        number: u32,
        /// Clue direction.
        direction: Direction,
    },
    /// A clue answer disagrees with the solution grid along its span.
    #[display("{direction} clue {number} disagrees with the grid at {pos}")]
    AnswerMismatch {
        /// Clue number.
        number: u32,
        /// Clue direction.
        direction: Direction,
        /// First disagreeing cell.
        pos: Position,
    },
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn letter_row(letters: &str) -> Vec<Option<char>> {
        letters
            .chars()
            .map(|ch| if ch == '#' { None } else { Some(ch) })
            .collect()
    }

    pub(crate) fn puzzle_from_rows(rows: &[&str], across: Vec<Clue>, down: Vec<Clue>) -> Puzzle {
        let grid: Vec<Vec<Option<char>>> = rows.iter().map(|row| letter_row(row)).collect();
        let size = GridSize::new(grid.len(), grid[0].len());
        Puzzle {
            id: "test".to_owned(),
            metadata: Metadata::default(),
            size,
            grid: SolutionGrid::try_from(grid).unwrap(),
            clues: Clues { across, down },
        }
    }

    pub(crate) fn clue(number: u32, row: usize, col: usize, answer: &str) -> Clue {
        Clue {
            number,
            text: format!("clue {number}"),
            row,
            col,
            answer: answer.to_owned(),
        }
    }

    #[test]
    fn test_deserializes_reference_puzzle_json() {
        let json = r#"{
            "id": "nyt-1976-01-01",
            "metadata": {"date": "1976-01-01", "title": "New Year", "author": "A. Setter"},
            "size": {"rows": 2, "cols": 3},
            "grid": [["C", "A", "T"], [null, null, "O"]],
            "clues": {
                "across": [{"number": 1, "clue": "Feline", "row": 0, "col": 0, "answer": "CAT"}],
                "down": [{"number": 3, "clue": "Also", "row": 0, "col": 2, "answer": "TO"}]
            }
        }"#;
        let puzzle: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.size, GridSize::new(2, 3));
        assert_eq!(puzzle.clues.across[0].text, "Feline");
        assert!(puzzle.grid.is_black(Position::new(1, 0)));
        assert_eq!(puzzle.grid.letter(Position::new(1, 2)), Some('O'));
        puzzle.validate().unwrap();
    }

    #[test]
    fn test_ragged_grid_fails_deserialization() {
        let rows = vec![letter_row("AB"), letter_row("A")];
        assert_eq!(
            SolutionGrid::try_from(rows).unwrap_err(),
            PuzzleError::RaggedGrid
        );
    }

    #[test]
    fn test_validate_rejects_answer_mismatch() {
        let puzzle = puzzle_from_rows(&["CAT"], vec![clue(1, 0, 0, "CAR")], vec![]);
        assert!(matches!(
            puzzle.validate(),
            Err(PuzzleError::AnswerMismatch { number: 1, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_span() {
        let puzzle = puzzle_from_rows(&["CAT"], vec![clue(1, 0, 0, "CATS")], vec![]);
        assert!(matches!(
            puzzle.validate(),
            Err(PuzzleError::AnswerMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unsorted_clues() {
        let puzzle = puzzle_from_rows(
            &["CAT", "ARE"],
            vec![clue(5, 0, 0, "CAT"), clue(1, 1, 0, "ARE")],
            vec![],
        );
        assert_eq!(
            puzzle.validate(),
            Err(PuzzleError::UnsortedClues {
                direction: Direction::Across
            })
        );
    }

    #[test]
    fn test_span_contains() {
        let across = clue(1, 2, 1, "CAT");
        assert!(across.span_contains(Direction::Across, Position::new(2, 1)));
        assert!(across.span_contains(Direction::Across, Position::new(2, 3)));
        assert!(!across.span_contains(Direction::Across, Position::new(2, 4)));
        assert!(!across.span_contains(Direction::Across, Position::new(1, 1)));
        let down = clue(2, 0, 0, "ARC");
        assert!(down.span_contains(Direction::Down, Position::new(2, 0)));
        assert!(!down.span_contains(Direction::Down, Position::new(3, 0)));
        assert!(!down.span_contains(Direction::Down, Position::new(0, 1)));
    }
}
