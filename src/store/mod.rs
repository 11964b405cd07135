//! Document Store seam. The store exclusively owns document state; views only
//! hold the snapshots it pushes.

mod memory;
mod remote;

pub(crate) use memory::MemoryStore;
pub(crate) use remote::RemoteStore;

use crate::config::{EnvConfig, StoreBackend};
use crate::error::StoreResult;
use crate::models::{Document, DocumentId};
use crate::subscription::{Observer, Subscription};
use futures::future::LocalBoxFuture;
use std::sync::Arc;

/// Single-shot mutation; resolves exactly once.
pub(crate) type MutationFuture = LocalBoxFuture<'static, StoreResult<()>>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Lookup {
    Found(Document),
    NotFound,
}

pub(crate) trait DocumentStore: Send + Sync {
    /// Reactive read of every trashed document. Order is unspecified.
    fn list_trashed(&self, observer: Observer<Vec<Document>>) -> Subscription;

    /// Reactive read of one document.
    fn get_by_id(&self, id: &DocumentId, observer: Observer<Lookup>) -> Subscription;

    fn trash(&self, id: &DocumentId) -> MutationFuture;

    fn restore(&self, id: &DocumentId) -> MutationFuture;

    fn remove_permanently(&self, id: &DocumentId) -> MutationFuture;
}

pub(crate) fn open_store(config: &EnvConfig) -> Arc<dyn DocumentStore> {
    match config.store {
        StoreBackend::Remote => Arc::new(RemoteStore::new(config.api_url.clone())),
        StoreBackend::Memory => Arc::new(MemoryStore::with_documents(memory::sample_documents())),
    }
}
