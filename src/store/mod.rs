pub mod json_file;
pub mod memory;
pub mod save_queue;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use save_queue::SaveQueue;

use crate::error::TasquestError;
use crate::models::Document;

/// Durable home of the whole [`Document`].
pub trait DocumentStore: Send {
    /// Read the stored document. `Ok(None)` means nothing has been saved yet.
    fn try_load(&self) -> Result<Option<Document>, TasquestError>;

    /// Overwrite the stored document in full.
    fn save(&self, doc: &Document) -> Result<(), TasquestError>;

    /// Load for startup. Never fails: a missing or unreadable document yields the empty default.
    fn load(&self) -> Document {
        match self.try_load() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::debug!("no saved document, starting empty");
                Document::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved document, starting empty");
                Document::default()
            }
        }
    }
}
