//! Trash list: the view over trashed documents plus the restore / permanent
//! delete actions offered on each row.

mod trash_box;

pub(crate) use trash_box::TrashBox;

use crate::filter::filter_by_title;
use crate::models::{Document, DocumentId};
use crate::navigation::NavigationCoordinator;
use crate::notify::{toast_promise, Notifier, REMOVE_MESSAGES, RESTORE_MESSAGES};
use crate::store::{DocumentStore, MutationFuture};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TrashView {
    Loading,
    /// Nothing is in the trash at all.
    Empty,
    /// The trash has documents but the search hides all of them.
    NoMatches,
    Items(Vec<Document>),
}

/// Component-local state of the trash list. Holds no authoritative copy of any
/// document, only the latest snapshot pushed by the store.
#[derive(Clone, Debug, Default)]
pub(crate) struct TrashList {
    snapshot: Option<Vec<Document>>,
    /// Ids whose permanent removal already resolved. Kept out of the view until
    /// the store delivers a snapshot without them.
    purged: BTreeSet<DocumentId>,
    confirming: Option<DocumentId>,
}

impl TrashList {
    pub fn apply_snapshot(&mut self, documents: Vec<Document>) {
        self.purged
            .retain(|id| documents.iter().any(|d| &d.id == id));
        self.snapshot = Some(documents);
    }

    pub fn mark_purged(&mut self, id: DocumentId) {
        if self.confirming.as_ref() == Some(&id) {
            self.confirming = None;
        }
        self.purged.insert(id);
    }

    pub fn view(&self, search: &str) -> TrashView {
        let Some(snapshot) = &self.snapshot else {
            return TrashView::Loading;
        };

        let live: Vec<Document> = snapshot
            .iter()
            .filter(|d| d.is_trashed && !self.purged.contains(&d.id))
            .cloned()
            .collect();
        if live.is_empty() {
            return TrashView::Empty;
        }

        let visible = filter_by_title(&live, search);
        if visible.is_empty() {
            TrashView::NoMatches
        } else {
            TrashView::Items(visible)
        }
    }

    /// First step of the two-step delete: reveal the confirmation for `id`.
    pub fn request_remove(&mut self, id: DocumentId) {
        self.confirming = Some(id);
    }

    pub fn cancel_remove(&mut self) {
        self.confirming = None;
    }

    pub fn is_confirming(&self, id: &DocumentId) -> bool {
        self.confirming.as_ref() == Some(id)
    }

    /// Second step. Yields the id to delete only if its confirmation is open.
    pub fn confirm_remove(&mut self, id: &DocumentId) -> Option<DocumentId> {
        if self.is_confirming(id) {
            self.confirming.take()
        } else {
            None
        }
    }
}

/// Dispatches trash row actions to the store with toast feedback.
#[derive(Clone)]
pub(crate) struct TrashActions {
    store: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
    navigation: NavigationCoordinator,
}

impl TrashActions {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
        navigation: NavigationCoordinator,
    ) -> Self {
        Self {
            store,
            notifier,
            navigation,
        }
    }

    pub fn restore(&self, id: &DocumentId) -> MutationFuture {
        toast_promise(self.notifier.clone(), self.store.restore(id), RESTORE_MESSAGES)
    }

    /// Issues the permanent delete, then redirects right away if `id` is open.
    /// The redirect does not wait for (or depend on) the mutation outcome.
    pub fn remove(&self, id: &DocumentId, currently_open: Option<&DocumentId>) -> MutationFuture {
        let pending = toast_promise(
            self.notifier.clone(),
            self.store.remove_permanently(id),
            REMOVE_MESSAGES,
        );
        self.navigation.on_removed(id, currently_open);
        pending
    }

    pub fn open(&self, id: &DocumentId) {
        self.navigation.open(id);
    }
}
