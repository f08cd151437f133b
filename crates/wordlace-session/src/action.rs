use wordlace_core::{Direction, Position};

/// Input events consumed by the session, as produced by the UI layer.
///
/// Keyboard handling, on-screen keys, and tap hit-testing are UI concerns;
/// by the time an event reaches the session it is already one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A printable letter key, case-insensitive.
    Letter(char),
    /// Delete/backspace.
    Backspace,
    /// Arrow-key movement.
    Move(MoveDirection),
    /// Clue-order movement; `reverse` is the shift modifier.
    Tab {
        /// Move to the previous clue instead of the next.
        reverse: bool,
    },
    /// A tap on a grid cell.
    CellTap(Position),
    /// Selection of a clue from the clue lists.
    ClueSelect {
        /// The list the clue was picked from.
        direction: Direction,
        /// The printed clue number.
        number: u32,
    },
    /// Explicit answer check.
    Check,
    /// Full puzzle reset: fresh grids and deleted stored progress.
    Reset,
}

/// One arrow-key step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// Row/column delta of one step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}
