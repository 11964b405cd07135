use super::{DocumentStore, Lookup, MutationFuture};
use crate::error::{StoreError, StoreResult};
use crate::models::{Document, DocumentId, Lifecycle, LifecycleEvent};
use crate::subscription::{Observer, Subscription, Topic};
use futures::FutureExt;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct MemoryState {
    documents: BTreeMap<DocumentId, Document>,
    /// Tombstones for permanently removed ids.
    deleted: BTreeSet<DocumentId>,
    reject_with: Option<StoreError>,
}

/// In-process store that enforces the lifecycle table and pushes a fresh
/// snapshot to every affected read after each commit.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    trashed: Topic<Vec<Document>>,
    lookups: Arc<Mutex<HashMap<DocumentId, Topic<Lookup>>>>,
}

impl MemoryStore {
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let store = Self::default();
        {
            let mut state = store.state();
            for doc in documents {
                state.documents.insert(doc.id.clone(), doc);
            }
        }
        store.publish_trashed();
        store
    }

    /// Makes every following mutation fail with `error` until cleared.
    #[cfg(test)]
    pub fn reject_mutations(&self, error: Option<StoreError>) {
        self.state().reject_with = error;
    }

    #[cfg(test)]
    pub fn lifecycle(&self, id: &DocumentId) -> Option<Lifecycle> {
        let state = self.state();
        if state.deleted.contains(id) {
            return Some(Lifecycle::Deleted);
        }
        state.documents.get(id).map(Lifecycle::of)
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup_topic(&self, id: &DocumentId) -> Topic<Lookup> {
        let mut lookups = self.lookups.lock().unwrap_or_else(PoisonError::into_inner);
        lookups.entry(id.clone()).or_default().clone()
    }

    fn snapshot_trashed(&self) -> Vec<Document> {
        self.state()
            .documents
            .values()
            .filter(|d| d.is_trashed)
            .cloned()
            .collect()
    }

    fn snapshot_lookup(&self, id: &DocumentId) -> Lookup {
        match self.state().documents.get(id) {
            Some(doc) => Lookup::Found(doc.clone()),
            None => Lookup::NotFound,
        }
    }

    fn publish_trashed(&self) {
        self.trashed.publish(self.snapshot_trashed());
    }

    fn publish_lookup(&self, id: &DocumentId) {
        let topic = {
            let lookups = self.lookups.lock().unwrap_or_else(PoisonError::into_inner);
            lookups.get(id).cloned()
        };
        if let Some(topic) = topic {
            topic.publish(self.snapshot_lookup(id));
        }
    }

    fn commit(&self, id: &DocumentId, event: LifecycleEvent) -> StoreResult<()> {
        {
            let mut state = self.state();
            if let Some(e) = state.reject_with.clone() {
                return Err(e);
            }
            if state.deleted.contains(id) {
                return Err(StoreError::not_found(id));
            }
            let Some(doc) = state.documents.get_mut(id) else {
                return Err(StoreError::not_found(id));
            };

            let next = Lifecycle::of(doc).apply(event)?;
            if next.is_terminal() {
                state.documents.remove(id);
                state.deleted.insert(id.clone());
            } else {
                doc.is_trashed = next == Lifecycle::Trashed;
            }
        }

        self.publish_trashed();
        self.publish_lookup(id);
        Ok(())
    }

    fn mutation(&self, id: &DocumentId, event: LifecycleEvent) -> MutationFuture {
        let store = self.clone();
        let id = id.clone();
        async move { store.commit(&id, event) }.boxed_local()
    }
}

impl DocumentStore for MemoryStore {
    fn list_trashed(&self, observer: Observer<Vec<Document>>) -> Subscription {
        self.trashed.subscribe(observer)
    }

    fn get_by_id(&self, id: &DocumentId, observer: Observer<Lookup>) -> Subscription {
        let topic = self.lookup_topic(id);
        if topic.latest().is_none() {
            topic.publish(self.snapshot_lookup(id));
        }
        topic.subscribe(observer)
    }

    fn trash(&self, id: &DocumentId) -> MutationFuture {
        self.mutation(id, LifecycleEvent::Trash)
    }

    fn restore(&self, id: &DocumentId) -> MutationFuture {
        self.mutation(id, LifecycleEvent::Restore)
    }

    fn remove_permanently(&self, id: &DocumentId) -> MutationFuture {
        self.mutation(id, LifecycleEvent::Remove)
    }
}

/// Seed used when the app runs without a backend.
pub(crate) fn sample_documents() -> Vec<Document> {
    let doc = |id: &str, title: &str, is_trashed: bool| Document {
        id: DocumentId::new(id),
        title: title.to_string(),
        is_trashed,
        cover_image: None,
        icon: None,
        is_full_width: false,
        content: None,
    };

    vec![
        Document {
            icon: Some("📓".to_string()),
            content: Some("Welcome to your workspace.\nPages you delete land in the trash.".to_string()),
            ..doc("getting-started", "Getting Started", false)
        },
        doc("meeting-notes", "Meeting Notes", true),
        Document {
            is_full_width: true,
            ..doc("budget", "Budget", true)
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorKind;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    fn store() -> MemoryStore {
        MemoryStore::with_documents([
            Document::trashed("a", "Meeting Notes"),
            Document::trashed("b", "Budget"),
            Document::active("c", "Roadmap"),
        ])
    }

    fn watch_trash(store: &MemoryStore) -> (Arc<Mutex<Vec<Vec<String>>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.list_trashed(Arc::new(move |docs: Vec<Document>| {
            let ids: Vec<String> = docs.into_iter().map(|d| d.id.to_string()).collect();
            sink.lock().unwrap().push(ids);
        }));
        (seen, sub)
    }

    fn watch_doc(store: &MemoryStore, id: &str) -> (Arc<Mutex<Vec<Lookup>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.get_by_id(
            &DocumentId::new(id),
            Arc::new(move |l: Lookup| sink.lock().unwrap().push(l)),
        );
        (seen, sub)
    }

    #[test]
    fn test_trashed_list_only_contains_trashed() {
        let store = store();
        let (seen, _sub) = watch_trash(&store);
        assert_eq!(*seen.lock().unwrap(), vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_restore_leaves_trash_and_becomes_active() {
        let store = store();
        let (seen, _sub) = watch_trash(&store);

        block_on(store.restore(&DocumentId::new("a"))).expect("restore should succeed");

        assert_eq!(seen.lock().unwrap().last().unwrap(), &vec!["b".to_string()]);
        assert_eq!(store.lifecycle(&DocumentId::new("a")), Some(Lifecycle::Active));
    }

    #[test]
    fn test_trash_enters_trashed_list() {
        let store = store();
        let (seen, _sub) = watch_trash(&store);

        block_on(store.trash(&DocumentId::new("c"))).expect("trash should succeed");

        assert_eq!(
            seen.lock().unwrap().last().unwrap(),
            &vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_remove_is_terminal() {
        let store = store();
        let (lookups, _sub) = watch_doc(&store, "b");
        let b = DocumentId::new("b");

        block_on(store.remove_permanently(&b)).expect("remove should succeed");

        assert_eq!(store.lifecycle(&b), Some(Lifecycle::Deleted));
        assert_eq!(lookups.lock().unwrap().last(), Some(&Lookup::NotFound));

        for fut in [store.restore(&b), store.trash(&b), store.remove_permanently(&b)] {
            let err = block_on(fut).expect_err("deleted documents accept no transitions");
            assert_eq!(err.kind, StoreErrorKind::NotFound);
        }
    }

    #[test]
    fn test_remove_requires_trash_first() {
        let store = store();
        let err = block_on(store.remove_permanently(&DocumentId::new("c")))
            .expect_err("active documents cannot be purged");
        assert_eq!(err.kind, StoreErrorKind::Conflict);
        assert_eq!(store.lifecycle(&DocumentId::new("c")), Some(Lifecycle::Active));
    }

    #[test]
    fn test_mutation_is_lazy_until_polled() {
        let store = store();
        let fut = store.restore(&DocumentId::new("a"));
        assert_eq!(store.lifecycle(&DocumentId::new("a")), Some(Lifecycle::Trashed));
        block_on(fut).expect("restore should succeed");
        assert_eq!(store.lifecycle(&DocumentId::new("a")), Some(Lifecycle::Active));
    }

    #[test]
    fn test_rejected_mutation_changes_nothing() {
        let store = store();
        let (seen, _sub) = watch_trash(&store);
        store.reject_mutations(Some(StoreError::transient("offline")));

        let err = block_on(store.restore(&DocumentId::new("a"))).expect_err("should be rejected");
        assert_eq!(err.kind, StoreErrorKind::Network);
        assert_eq!(seen.lock().unwrap().len(), 1);

        store.reject_mutations(None);
        block_on(store.restore(&DocumentId::new("a"))).expect("restore should succeed");
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_id_resolves_not_found() {
        let store = store();
        let (lookups, _sub) = watch_doc(&store, "missing");
        assert_eq!(*lookups.lock().unwrap(), vec![Lookup::NotFound]);
    }

    #[test]
    fn test_lookup_follows_lifecycle() {
        let store = store();
        let (lookups, _sub) = watch_doc(&store, "a");

        block_on(store.restore(&DocumentId::new("a"))).expect("restore should succeed");

        let lookups = lookups.lock().unwrap();
        assert_eq!(lookups.len(), 2);
        match &lookups[1] {
            Lookup::Found(doc) => assert!(!doc.is_trashed),
            Lookup::NotFound => panic!("restored document should still resolve"),
        }
    }
}
