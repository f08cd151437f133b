//! Session layer for the Wordlace player engine.
//!
//! One [`session::Session`] owns the full state of a single puzzle-solving
//! session: the play grids, the cursor and typing direction, the check
//! cooldown, and the debounced auto-save against a [`store::ProgressStore`].
//! UI layers feed it [`action::InputEvent`]s and render from its read-only
//! accessors.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
pub mod bridge;
pub mod session;
pub mod store;
mod worker;

pub use self::{
    action::{InputEvent, MoveDirection},
    session::{CheckRequest, Session, SessionEvent, Settings},
    store::{FsStore, MemoryStore, ProgressStore, StoreError},
};
