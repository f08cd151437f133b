//! Cursor movement over the puzzle grid.
//!
//! All movement is computed against the solution grid's black cells and the
//! session's lock layer. A cell that is black or locked is *skippable*: the
//! cursor passes over it without stopping. Every function here is pure and
//! returns the landing cell, with `None` meaning the move is a no-op and
//! the cursor stays put.

use wordlace_core::{Clues, Direction, Grid, GridSize, Position, SolutionGrid};

fn is_skippable(solution: &SolutionGrid, locked: &Grid<bool>, pos: Position) -> bool {
    solution.is_black(pos) || locked[pos]
}

/// Computes the landing cell for an arrow move by `(d_row, d_col)`.
///
/// Steps repeatedly past skippable cells and stops at the first cell that is
/// neither black nor locked. Returns `None` when the walk exits the grid
/// before finding one. Arrow moves never change the typing direction.
#[must_use]
pub fn arrow_target(
    solution: &SolutionGrid,
    locked: &Grid<bool>,
    from: Position,
    d_row: isize,
    d_col: isize,
) -> Option<Position> {
    let mut pos = from;
    loop {
        pos = pos.offset(d_row, d_col)?;
        if !solution.size().contains(pos) {
            return None;
        }
        if !is_skippable(solution, locked, pos) {
            return Some(pos);
        }
    }
}

/// Computes the clue jump for a tab move over the ordered clue lists.
///
/// Forward moves to the next clue of the current direction's list; at the
/// last clue it switches direction and lands on the first clue of the other
/// list. Reverse is symmetric ("previous" and "last of the other list").
/// When the active cell has no clue in the current direction, the move
/// re-enters the list at its first (forward) or last (reverse) clue.
///
/// Returns the landing clue's starting cell and the possibly-switched
/// direction, or `None` when there is no clue to land on (the wrap target
/// list is empty).
#[must_use]
pub fn tab_target(
    clues: &Clues,
    direction: Direction,
    active: Position,
    reverse: bool,
) -> Option<(Position, Direction)> {
    let list = clues.list(direction);
    let other = clues.list(direction.toggled());
    let index = list
        .iter()
        .position(|clue| clue.span_contains(direction, active));

    let (clue, landing) = match (reverse, index) {
        (false, Some(i)) => match list.get(i + 1) {
            Some(next) => (next, direction),
            None => (other.first()?, direction.toggled()),
        },
        (true, Some(0)) => (other.last()?, direction.toggled()),
        (true, Some(i)) => (&list[i - 1], direction),
        (false, None) => list
            .first()
            .map(|clue| (clue, direction))
            .or_else(|| other.first().map(|clue| (clue, direction.toggled())))?,
        (true, None) => list
            .last()
            .map(|clue| (clue, direction))
            .or_else(|| other.last().map(|clue| (clue, direction.toggled())))?,
    };
    Some((clue.start(), landing))
}

fn wrap_step(size: GridSize, pos: Position, direction: Direction) -> Position {
    match direction {
        Direction::Across => {
            let mut row = pos.row;
            let mut col = pos.col + 1;
            if col == size.cols {
                col = 0;
                row += 1;
                if row == size.rows {
                    row = 0;
                }
            }
            Position::new(row, col)
        }
        Direction::Down => {
            let mut row = pos.row + 1;
            let mut col = pos.col;
            if row == size.rows {
                row = 0;
                col += 1;
                if col == size.cols {
                    col = 0;
                }
            }
            Position::new(row, col)
        }
    }
}

/// Computes the landing cell for linear auto-advance after a letter entry.
///
/// Steps one cell in the typing direction, wrapping to the next row (across)
/// or column (down) at the boundary and around the whole grid if necessary,
/// skipping skippable cells. At most `rows × cols` cells are examined; if
/// none is eligible the move is a no-op (`None`).
#[must_use]
pub fn advance_target(
    solution: &SolutionGrid,
    locked: &Grid<bool>,
    from: Position,
    direction: Direction,
) -> Option<Position> {
    let size = solution.size();
    let mut pos = from;
    for _ in 0..size.cell_count() {
        pos = wrap_step(size, pos, direction);
        if !is_skippable(solution, locked, pos) {
            return Some(pos);
        }
    }
    None
}

/// Computes the landing cell for backward (backspace) movement.
///
/// Walks one step at a time against the typing direction (left for across,
/// up for down), skipping skippable cells, without wrapping. Exiting the
/// grid is a no-op (`None`).
#[must_use]
pub fn retreat_target(
    solution: &SolutionGrid,
    locked: &Grid<bool>,
    from: Position,
    direction: Direction,
) -> Option<Position> {
    let (d_row, d_col) = match direction {
        Direction::Across => (0, -1),
        Direction::Down => (-1, 0),
    };
    arrow_target(solution, locked, from, d_row, d_col)
}
