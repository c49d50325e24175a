use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::models::Document;
use crate::store::DocumentStore;

/// Background writer. Callers hand over snapshots and move on; the worker
/// writes the newest pending snapshot and drops older ones still queued.
pub struct SaveQueue {
    mode: Mode,
}

enum Mode {
    Worker {
        tx: Option<Sender<Document>>,
        handle: Option<JoinHandle<()>>,
    },
    /// The worker thread could not be started; save on the caller's thread.
    Inline(Box<dyn DocumentStore>),
}

impl SaveQueue {
    pub fn spawn(store: Box<dyn DocumentStore>) -> Self {
        let (tx, rx) = mpsc::channel::<Document>();
        let shared = Arc::new(Mutex::new(Some(store)));
        let worker_store = shared.clone();

        let spawned = thread::Builder::new()
            .name("tasquest-save".into())
            .spawn(move || {
                let Some(store) = worker_store.lock().ok().and_then(|mut s| s.take()) else {
                    return;
                };
                while let Ok(mut doc) = rx.recv() {
                    while let Ok(newer) = rx.try_recv() {
                        doc = newer;
                    }
                    if let Err(e) = store.save(&doc) {
                        tracing::error!(error = %e, "saving document failed");
                    }
                }
            });

        match spawned {
            Ok(handle) => Self {
                mode: Mode::Worker {
                    tx: Some(tx),
                    handle: Some(handle),
                },
            },
            Err(e) => match shared.lock().ok().and_then(|mut s| s.take()) {
                Some(store) => {
                    tracing::warn!(error = %e, "could not start save worker, saving inline");
                    Self {
                        mode: Mode::Inline(store),
                    }
                }
                None => {
                    tracing::error!(error = %e, "save worker unavailable");
                    Self {
                        mode: Mode::Worker {
                            tx: None,
                            handle: None,
                        },
                    }
                }
            },
        }
    }

    /// Queue a full snapshot for writing. Never blocks on disk I/O in worker mode.
    pub fn enqueue(&self, doc: Document) {
        match &self.mode {
            Mode::Worker { tx: Some(tx), .. } => {
                if tx.send(doc).is_err() {
                    tracing::error!("save worker has stopped; change not persisted");
                }
            }
            Mode::Worker { tx: None, .. } => {
                tracing::error!("no save worker; change not persisted");
            }
            Mode::Inline(store) => {
                if let Err(e) = store.save(&doc) {
                    tracing::error!(error = %e, "saving document failed");
                }
            }
        }
    }

    /// Wait for queued saves to finish.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Mode::Worker { tx, handle } = &mut self.mode {
            drop(tx.take());
            if let Some(handle) = handle.take() {
                if handle.join().is_err() {
                    tracing::error!("save worker panicked");
                }
            }
        }
    }
}

impl Drop for SaveQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn close_flushes_latest_snapshot() {
        let store = MemoryStore::new();
        let queue = SaveQueue::spawn(Box::new(store.clone()));
        for points in 1..=5 {
            queue.enqueue(Document {
                points,
                ..Default::default()
            });
        }
        queue.close();
        assert_eq!(store.snapshot().map(|d| d.points), Some(5));
        assert!(store.saves() >= 1 && store.saves() <= 5);
    }

    #[test]
    fn drop_also_flushes() {
        let store = MemoryStore::new();
        {
            let queue = SaveQueue::spawn(Box::new(store.clone()));
            queue.enqueue(Document {
                points: 9,
                ..Default::default()
            });
        }
        assert_eq!(store.snapshot().map(|d| d.points), Some(9));
    }
}
