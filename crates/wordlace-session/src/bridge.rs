//! Serialization bridge between live session state and the progress store.
//!
//! Reads fail soft: any missing, truncated, or unparseable snapshot behaves
//! as "no saved progress" so a corrupt store entry can never prevent a
//! puzzle from opening. Writes fail loud to the session, which decides
//! whether to log or surface the failure.

use wordlace_game::PuzzleProgress;

use crate::store::StoreError;

/// Store key prefix shared with the reference player.
const STORAGE_KEY_PREFIX: &str = "puzzle_progress_";

/// The namespaced store key for a puzzle's progress.
#[must_use]
pub fn progress_key(puzzle_id: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{puzzle_id}")
}

/// Encodes a snapshot for the store.
pub fn encode_progress(progress: &PuzzleProgress) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(progress).map_err(|err| StoreError::Write {
        message: err.to_string(),
    })
}

/// Decodes stored bytes, failing soft.
#[must_use]
pub fn decode_progress(bytes: &[u8]) -> Option<PuzzleProgress> {
    match serde_json::from_slice(bytes) {
        Ok(progress) => Some(progress),
        Err(err) => {
            log::warn!("discarding unreadable progress snapshot: {err}");
            None
        }
    }
}
