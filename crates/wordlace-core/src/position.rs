use derive_more::Display;

/// A cell coordinate on the puzzle grid.
///
/// `row` counts down from the top edge and `col` counts right from the left
/// edge, both starting at zero.
///
/// # Example
///
/// ```
/// use wordlace_core::Position;
///
/// let pos = Position::new(2, 3);
/// assert_eq!(pos.offset(0, 1), Some(Position::new(2, 4)));
/// assert_eq!(Position::new(0, 0).offset(-1, 0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index (0-based, top to bottom).
    pub row: usize,
    /// Column index (0-based, left to right).
    pub col: usize,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by the given deltas.
    ///
    /// Returns `None` when the shift would leave the non-negative coordinate
    /// space; bounds against a concrete grid size are the caller's concern.
    #[must_use]
    #[inline]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }
}

/// The typing direction of the cursor.
///
/// The direction is sticky: cursor movement never changes it implicitly.
/// Only explicit toggles, tab moves that wrap between clue lists, and clue
/// selection switch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Direction {
    /// Left-to-right words.
    #[display("across")]
    Across,
    /// Top-to-bottom words.
    #[display("down")]
    Down,
}

impl Direction {
    /// Both directions, across first.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the other direction.
    #[must_use]
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamps_at_origin() {
        assert_eq!(Position::new(0, 5).offset(-1, 0), None);
        assert_eq!(Position::new(5, 0).offset(0, -1), None);
        assert_eq!(Position::new(1, 1).offset(-1, -1), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_direction_toggled_is_involutive() {
        for direction in Direction::ALL {
            assert_eq!(direction.toggled().toggled(), direction);
        }
    }
}
