//! The stateful controller owning one puzzle-solving session.
//!
//! A [`Session`] is created per puzzle view and destroyed when the player
//! navigates away. It owns the play grids, cursor, and typing direction,
//! and it drives the two timers of the engine: the debounced auto-save and
//! the check cooldown. Both compare deadlines against the `Instant` passed
//! into [`Session::tick`], so hosts and tests control time explicitly.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use wordlace_core::{ActiveClue, Direction, Grid, Position, Puzzle, active_clue};
use wordlace_game::{
    LockPolicy, PlayGrids, PuzzleProgress, advance_target, arrow_target, check, retreat_target,
    tab_target,
};

use crate::{
    action::{InputEvent, MoveDirection},
    bridge::{decode_progress, encode_progress, progress_key},
    store::{ProgressStore, StoreError},
    worker::{StoreRequest, StoreResponse, StoreWorker},
};

/// Quiet period after the last grid mutation before progress is written out.
pub const AUTO_SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Interval during which repeated check requests are rejected.
pub const CHECK_COOLDOWN: Duration = Duration::from_secs(2);

/// Per-session behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Freeze cells confirmed correct by a check. When off, correct cells
    /// stay editable and are never protected.
    pub lock_on_correct: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lock_on_correct: true,
        }
    }
}

impl Settings {
    fn lock_policy(self) -> LockPolicy {
        if self.lock_on_correct {
            LockPolicy::LockCorrect
        } else {
            LockPolicy::CheckOnly
        }
    }
}

/// Lifecycle notifications produced by [`Session::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The initial progress load finished; the session now accepts input.
    Loaded,
    /// A debounced auto-save failed. Play continues; the snapshot will be
    /// retried on the next mutation.
    SaveFailed(StoreError),
    /// Deleting stored progress during a reset failed; the in-memory state
    /// is already fresh, but the store may resurrect old progress next time.
    ResetFailed(StoreError),
}

/// Result of an explicit check request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CheckRequest {
    /// The grid was checked.
    Completed {
        /// True when every non-black cell matched the solution.
        all_correct: bool,
    },
    /// Rejected: the previous check's cooldown is still running (or the
    /// session has not finished loading).
    Ignored,
}

/// The controller for one puzzle-solving session.
#[derive(Debug)]
pub struct Session {
    puzzle: Puzzle,
    grids: PlayGrids,
    active_cell: Position,
    direction: Direction,
    settings: Settings,
    is_loaded: bool,
    cooldown_until: Option<Instant>,
    save_deadline: Option<Instant>,
    generation: u64,
    worker: StoreWorker,
}

impl Session {
    /// Opens a session for `puzzle`, restoring saved progress from `store`
    /// in the background.
    ///
    /// Until the load resolves (observed via [`Session::tick`] returning
    /// [`SessionEvent::Loaded`]), every input event is a silent no-op.
    #[must_use]
    pub fn new(puzzle: Puzzle, store: Box<dyn ProgressStore>) -> Self {
        let grids = PlayGrids::empty(puzzle.grid.size());
        let active_cell = puzzle.grid.first_open_cell().unwrap_or(Position::new(0, 0));
        let worker = StoreWorker::spawn(store);
        worker.send(StoreRequest::Load {
            key: progress_key(&puzzle.id),
        });
        Self {
            puzzle,
            grids,
            active_cell,
            direction: Direction::Across,
            settings: Settings::default(),
            is_loaded: false,
            cooldown_until: None,
            save_deadline: None,
            generation: 0,
            worker,
        }
    }

    /// Advances the session's timers and drains background store results.
    ///
    /// Call this from the host's update loop (and after a quiet period, so
    /// a due auto-save actually fires). Returns lifecycle events for the UI
    /// to surface.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for response in self.worker.poll() {
            match response {
                StoreResponse::Loaded(result) => self.finish_load(result, &mut events),
                StoreResponse::Saved { generation, result } => {
                    if generation == self.generation
                        && let Err(err) = result
                    {
                        log::warn!("auto-save failed: {err}");
                        events.push(SessionEvent::SaveFailed(err));
                    }
                }
                StoreResponse::Deleted { generation, result } => {
                    if generation == self.generation
                        && let Err(err) = result
                    {
                        events.push(SessionEvent::ResetFailed(err));
                    }
                }
            }
        }
        if let Some(deadline) = self.save_deadline
            && now >= deadline
        {
            self.save_deadline = None;
            self.enqueue_save();
        }
        if let Some(until) = self.cooldown_until
            && now >= until
        {
            self.cooldown_until = None;
        }
        events
    }

    /// Applies one UI input event.
    pub fn handle(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Letter(ch) => self.handle_letter(ch, now),
            InputEvent::Backspace => self.handle_backspace(now),
            InputEvent::Move(direction) => self.handle_move(direction),
            InputEvent::Tab { reverse } => self.handle_tab(reverse),
            InputEvent::CellTap(pos) => self.handle_cell_tap(pos),
            InputEvent::ClueSelect { direction, number } => {
                self.handle_clue_select(direction, number);
            }
            InputEvent::Check => {
                let _ = self.handle_check(now);
            }
            InputEvent::Reset => self.handle_reset(),
        }
    }

    /// Types a letter into the active cell and auto-advances.
    ///
    /// A locked active cell advances without storing anything, which lets
    /// players type straight through already-solved cells. Non-alphabetic
    /// input is ignored.
    pub fn handle_letter(&mut self, ch: char, now: Instant) {
        if !self.is_loaded || !ch.is_ascii_alphabetic() {
            return;
        }
        if self.grids.is_locked(self.active_cell) {
            self.advance_cursor();
            return;
        }
        if self.grids.set_letter(&self.puzzle.grid, self.active_cell, ch) {
            self.mark_dirty(now);
            self.advance_cursor();
        }
    }

    /// Deletes per the backspace rules.
    ///
    /// Locked active cell: cursor-only backward move. Non-empty cell: clear
    /// in place. Empty cell: move backward first, then clear the landing
    /// cell.
    pub fn handle_backspace(&mut self, now: Instant) {
        if !self.is_loaded {
            return;
        }
        if self.grids.is_locked(self.active_cell) {
            self.retreat_cursor();
            return;
        }
        if self.grids.entry(self.active_cell).is_none() {
            self.retreat_cursor();
        }
        if self.grids.clear_letter(&self.puzzle.grid, self.active_cell) {
            self.mark_dirty(now);
        }
    }

    /// Moves the cursor one arrow step, skipping black and locked cells.
    pub fn handle_move(&mut self, direction: MoveDirection) {
        if !self.is_loaded {
            return;
        }
        let (d_row, d_col) = direction.delta();
        if let Some(pos) = arrow_target(
            &self.puzzle.grid,
            self.grids.locked(),
            self.active_cell,
            d_row,
            d_col,
        ) {
            self.active_cell = pos;
        }
    }

    /// Jumps to the next (or previous) clue in clue-list order.
    pub fn handle_tab(&mut self, reverse: bool) {
        if !self.is_loaded {
            return;
        }
        if let Some((pos, direction)) =
            tab_target(&self.puzzle.clues, self.direction, self.active_cell, reverse)
        {
            self.active_cell = pos;
            self.direction = direction;
        }
    }

    /// Handles a tap on a grid cell.
    ///
    /// Tapping the active cell toggles the typing direction in place.
    /// Tapping another open cell moves there and keeps the current
    /// direction when it has a clue at the new cell, otherwise switches to
    /// the direction that does (across preferred). Taps on black cells are
    /// ignored.
    pub fn handle_cell_tap(&mut self, pos: Position) {
        if !self.is_loaded || self.puzzle.grid.is_black(pos) {
            return;
        }
        if pos == self.active_cell {
            self.direction = self.direction.toggled();
            return;
        }
        self.active_cell = pos;
        let across = active_clue(&self.puzzle, Direction::Across, pos).is_some();
        let down = active_clue(&self.puzzle, Direction::Down, pos).is_some();
        self.direction = match self.direction {
            Direction::Across if across => Direction::Across,
            Direction::Down if down => Direction::Down,
            _ if across => Direction::Across,
            _ => Direction::Down,
        };
    }

    /// Jumps to a clue picked from the clue lists.
    pub fn handle_clue_select(&mut self, direction: Direction, number: u32) {
        if !self.is_loaded {
            return;
        }
        if let Some(clue) = self
            .puzzle
            .clues
            .list(direction)
            .iter()
            .find(|clue| clue.number == number)
        {
            self.direction = direction;
            self.active_cell = clue.start();
        }
    }

    /// Runs a whole-grid check, subject to the cooldown.
    pub fn handle_check(&mut self, now: Instant) -> CheckRequest {
        if !self.is_loaded {
            return CheckRequest::Ignored;
        }
        if let Some(until) = self.cooldown_until
            && now < until
        {
            return CheckRequest::Ignored;
        }
        let outcome = check(
            &self.puzzle,
            self.grids.user(),
            self.grids.locked(),
            self.settings.lock_policy(),
        );
        let all_correct = outcome.all_correct;
        self.grids.apply_check(outcome);
        self.cooldown_until = Some(now + CHECK_COOLDOWN);
        self.mark_dirty(now);
        CheckRequest::Completed { all_correct }
    }

    /// Discards all progress: fresh grids in memory, deleted snapshot in
    /// the store.
    ///
    /// The generation bump supersedes any pending debounced save, so a
    /// stale snapshot cannot resurrect the old progress after the reset.
    pub fn handle_reset(&mut self) {
        if !self.is_loaded {
            return;
        }
        log::debug!("resetting puzzle {}", self.puzzle.id);
        self.generation += 1;
        self.save_deadline = None;
        self.grids = PlayGrids::empty(self.puzzle.grid.size());
        self.place_cursor_at_start();
        self.worker.send(StoreRequest::Delete {
            key: progress_key(&self.puzzle.id),
            generation: self.generation,
        });
    }

    /// Writes any pending snapshot immediately, bypassing the debounce.
    ///
    /// Hosts call this on shutdown; tests use it for determinism.
    pub fn flush_save(&mut self) {
        if self.save_deadline.take().is_some() {
            self.enqueue_save();
        }
    }

    /// The puzzle this session plays.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// The user-entry layer.
    #[must_use]
    pub fn user_grid(&self) -> &Grid<Option<char>> {
        self.grids.user()
    }

    /// The lock layer.
    #[must_use]
    pub fn locked_grid(&self) -> &Grid<bool> {
        self.grids.locked()
    }

    /// The check-verdict layer.
    #[must_use]
    pub fn check_grid(&self) -> &Grid<Option<bool>> {
        self.grids.check()
    }

    /// The cursor cell. Always a non-black cell once loaded.
    #[must_use]
    pub fn active_cell(&self) -> Position {
        self.active_cell
    }

    /// The sticky typing direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The clue containing the cursor in the typing direction, if any.
    #[must_use]
    pub fn active_clue(&self) -> Option<ActiveClue<'_>> {
        active_clue(&self.puzzle, self.direction, self.active_cell)
    }

    /// Whether a check cooldown is running.
    #[must_use]
    pub fn is_checking(&self) -> bool {
        self.cooldown_until.is_some()
    }

    /// Whether the initial load has resolved.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Whether a debounced save is scheduled but not yet written.
    #[must_use]
    pub fn has_pending_save(&self) -> bool {
        self.save_deadline.is_some()
    }

    /// The session's behavior switches.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Replaces the behavior switches. Takes effect from the next check.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    fn finish_load(&mut self, result: Result<Option<Vec<u8>>, StoreError>, events: &mut Vec<SessionEvent>) {
        if self.is_loaded {
            return;
        }
        let snapshot = match result {
            Ok(Some(bytes)) => decode_progress(&bytes),
            Ok(None) => None,
            Err(err) => {
                log::warn!("progress load failed, starting fresh: {err}");
                None
            }
        };
        if let Some(grids) = snapshot.and_then(|progress| progress.into_grids(&self.puzzle.grid)) {
            self.grids = grids;
        }
        self.place_cursor_at_start();
        self.is_loaded = true;
        log::debug!("session loaded for puzzle {}", self.puzzle.id);
        events.push(SessionEvent::Loaded);
    }

    fn place_cursor_at_start(&mut self) {
        if let Some(pos) = self.puzzle.grid.first_open_cell() {
            self.active_cell = pos;
        }
        self.direction = Direction::Across;
    }

    fn advance_cursor(&mut self) {
        if let Some(pos) = advance_target(
            &self.puzzle.grid,
            self.grids.locked(),
            self.active_cell,
            self.direction,
        ) {
            self.active_cell = pos;
        }
    }

    fn retreat_cursor(&mut self) {
        if let Some(pos) = retreat_target(
            &self.puzzle.grid,
            self.grids.locked(),
            self.active_cell,
            self.direction,
        ) {
            self.active_cell = pos;
        }
    }

    fn mark_dirty(&mut self, now: Instant) {
        self.save_deadline = Some(now + AUTO_SAVE_DEBOUNCE);
    }

    fn enqueue_save(&mut self) {
        let progress = PuzzleProgress::capture(&self.grids, &self.puzzle.grid, unix_now());
        match encode_progress(&progress) {
            Ok(bytes) => self.worker.send(StoreRequest::Save {
                key: progress_key(&self.puzzle.id),
                bytes,
                generation: self.generation,
            }),
            Err(err) => log::warn!("could not encode progress snapshot: {err}"),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
