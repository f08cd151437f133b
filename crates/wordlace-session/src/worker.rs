//! Background store worker: one thread per session, executing store
//! requests strictly in order.
//!
//! The FIFO discipline is what makes last-write-wins safe: a delete
//! enqueued after an in-flight save is guaranteed to land after it, and
//! responses carry the generation of the request so the session can drop
//! results that a reset has since superseded.

use std::sync::mpsc;

use crate::store::{ProgressStore, StoreError};

#[derive(Debug)]
pub(crate) enum StoreRequest {
    Load {
        key: String,
    },
    Save {
        key: String,
        bytes: Vec<u8>,
        generation: u64,
    },
    Delete {
        key: String,
        generation: u64,
    },
}

#[derive(Debug)]
pub(crate) enum StoreResponse {
    Loaded(Result<Option<Vec<u8>>, StoreError>),
    Saved {
        generation: u64,
        result: Result<(), StoreError>,
    },
    Deleted {
        generation: u64,
        result: Result<(), StoreError>,
    },
}

pub(crate) struct StoreWorker {
    request_tx: mpsc::Sender<StoreRequest>,
    response_rx: mpsc::Receiver<StoreResponse>,
}

impl std::fmt::Debug for StoreWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreWorker").finish_non_exhaustive()
    }
}

impl StoreWorker {
    /// Spawns the worker thread owning `store`.
    ///
    /// The thread exits when the session (and with it the request sender)
    /// is dropped.
    pub(crate) fn spawn(mut store: Box<dyn ProgressStore>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<StoreRequest>();
        let (response_tx, response_rx) = mpsc::channel();
        std::thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let response = match request {
                    StoreRequest::Load { key } => StoreResponse::Loaded(store.get(&key)),
                    StoreRequest::Save {
                        key,
                        bytes,
                        generation,
                    } => StoreResponse::Saved {
                        generation,
                        result: store.set(&key, bytes),
                    },
                    StoreRequest::Delete { key, generation } => StoreResponse::Deleted {
                        generation,
                        result: store.delete(&key),
                    },
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });
        Self {
            request_tx,
            response_rx,
        }
    }

    /// Enqueues a request; a disconnected worker is ignored (session is
    /// shutting down).
    pub(crate) fn send(&self, request: StoreRequest) {
        let _ = self.request_tx.send(request);
    }

    /// Drains completed responses without blocking.
    pub(crate) fn poll(&self) -> Vec<StoreResponse> {
        let mut responses = Vec::new();
        while let Ok(response) = self.response_rx.try_recv() {
            responses.push(response);
        }
        responses
    }
}
